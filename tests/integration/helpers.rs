//! Shared test helpers for integration tests.

use prioevent::prelude::*;

/// A listener that does nothing and returns nothing.
pub fn f404() -> Listener {
    Listener::named("f404", |_, _, _| Ok(None))
}

/// Priorities of an event's listeners in their current global order.
pub fn priorities(event: &str) -> Vec<i32> {
    PriorityEvent::global()
        .ls_listeners(event)
        .unwrap_or_default()
        .iter()
        .map(|e| e.priority)
        .collect()
}
