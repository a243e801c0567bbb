//! Process-wide emitter and free helper functions operating on it.
//!
//! Applications that have a startup hook should call
//! [`PriorityEvent::init_global`] there; otherwise the instance is created
//! with default configuration on first use.

use std::sync::OnceLock;

use serde_json::Value;
use tracing::info;

use prioevent_core::config::emitter::EmitterConfig;
use prioevent_core::error::EventError;
use prioevent_core::EventResult;

use crate::emitter::registry::PriorityEvent;
use crate::listener::Listener;

static GLOBAL: OnceLock<PriorityEvent> = OnceLock::new();

impl PriorityEvent {
    /// The process-wide instance, created on first access.
    pub fn global() -> &'static PriorityEvent {
        GLOBAL.get_or_init(PriorityEvent::new)
    }

    /// Installs a configured process-wide instance.
    ///
    /// Fails if the instance already exists, including one created lazily
    /// by an earlier [`PriorityEvent::global`] call.
    pub fn init_global(config: EmitterConfig) -> EventResult<&'static PriorityEvent> {
        GLOBAL
            .set(PriorityEvent::with_config(config))
            .map_err(|_| EventError::configuration("Global emitter is already initialized"))?;

        info!("Global emitter initialized");
        Ok(PriorityEvent::global())
    }
}

/// Adds a listener to an event on the global emitter.
pub fn on(event: impl Into<String>, listener: Listener, priority: i32) {
    PriorityEvent::global().add_listener(event, listener, priority);
}

/// Removes a listener from an event on the global emitter.
///
/// The listener is only removed if `priority` matches the one it was
/// added with.
pub fn off(event: &str, listener: &Listener, priority: i32) {
    PriorityEvent::global().remove_listener(event, listener, priority);
}

/// Fires an event on the global emitter, discarding the result.
pub async fn apply(event: &str, payload: Value) -> EventResult<()> {
    PriorityEvent::global().apply(event, payload).await
}

/// Fires an event on the global emitter and returns the filtered value.
pub async fn filter(event: &str, payload: Value) -> EventResult<Option<Value>> {
    PriorityEvent::global().filter(event, payload).await
}

/// Sync version of [`apply`].
pub fn apply_sync(event: &str, payload: Value) -> EventResult<()> {
    PriorityEvent::global().apply_sync(event, payload)
}

/// Sync version of [`filter`].
pub fn filter_sync(event: &str, payload: Value) -> EventResult<Option<Value>> {
    PriorityEvent::global().filter_sync(event, payload)
}
