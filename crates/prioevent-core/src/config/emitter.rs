//! Emitter configuration.

use serde::{Deserialize, Serialize};

/// Priority used when a listener is registered without an explicit one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Behaviour knobs for a `PriorityEvent` instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Priority applied by the `*_default` registration helpers.
    #[serde(default = "default_priority")]
    pub default_priority: i32,
    /// Emit a `trace!` event for every listener invocation.
    #[serde(default)]
    pub trace_dispatch: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            trace_dispatch: false,
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}
