//! Dispatcher — runs an event's listeners in priority order.
//!
//! - The event's sequence is stable-sorted by ascending priority in place
//!   before each run; the new order is what later queries observe.
//! - Listeners run strictly one after another. In async dispatch each one
//!   is awaited to completion before the next starts.
//! - Each listener receives the value returned by the previous one. A
//!   listener returning `Ok(None)` hands the original payload on instead.
//! - The first listener error aborts the chain and is returned.
//!
//! Concurrent dispatches of the same event are not serialised against each
//! other. Each run iterates its own snapshot, so listeners may add or remove
//! listeners (themselves included) mid-dispatch.

use std::task::Poll;

use serde_json::Value;
use tracing::{debug, error, trace, warn};

use prioevent_core::error::{ErrorKind, EventError};
use prioevent_core::EventResult;

use super::registry::{ListenerEntry, PriorityEvent};
use crate::listener::ListenerContext;

impl PriorityEvent {
    /// Dispatches `payload` through every listener of `event`.
    ///
    /// Returns `Ok(None)` without touching the registry when the event has
    /// no listeners, otherwise the final threaded value.
    pub async fn listen(&self, event: &str, payload: Value) -> EventResult<Option<Value>> {
        let Some(listeners) = self.sorted_snapshot(event) else {
            return Ok(None);
        };

        debug!(event = %event, listener_count = listeners.len(), "Dispatching event");

        let mut carried = payload.clone();
        for entry in &listeners {
            self.trace_invocation(event, entry);
            let result = entry
                .listener
                .invoke(carried, &payload, self.context_for(event, entry))
                .await
                .map_err(|e| self.listener_failed(event, entry, e))?;
            carried = result.unwrap_or_else(|| payload.clone());
        }

        Ok(Some(carried))
    }

    /// Synchronous [`listen`](Self::listen).
    ///
    /// Async listeners are polled once. One that would suspend is dropped
    /// and the carried value becomes `Value::Null`.
    pub fn listen_sync(&self, event: &str, payload: Value) -> EventResult<Option<Value>> {
        let Some(listeners) = self.sorted_snapshot(event) else {
            return Ok(None);
        };

        debug!(event = %event, listener_count = listeners.len(), "Dispatching event (sync)");

        let mut carried = payload.clone();
        for entry in &listeners {
            self.trace_invocation(event, entry);
            match entry
                .listener
                .invoke_sync(carried, &payload, self.context_for(event, entry))
            {
                Poll::Ready(result) => {
                    let result = result.map_err(|e| self.listener_failed(event, entry, e))?;
                    carried = result.unwrap_or_else(|| payload.clone());
                }
                Poll::Pending => {
                    warn!(
                        event = %event,
                        listener = %entry.listener.label(),
                        priority = entry.priority,
                        "Async listener suspended during sync dispatch, its result is lost"
                    );
                    carried = Value::Null;
                }
            }
        }

        Ok(Some(carried))
    }

    /// Fires an event and discards the chain's result.
    pub async fn apply(&self, event: &str, payload: Value) -> EventResult<()> {
        self.listen(event, payload).await.map(|_| ())
    }

    /// Fires an event and returns the chain's final value.
    pub async fn filter(&self, event: &str, payload: Value) -> EventResult<Option<Value>> {
        self.listen(event, payload).await
    }

    /// Synchronous [`apply`](Self::apply).
    pub fn apply_sync(&self, event: &str, payload: Value) -> EventResult<()> {
        self.listen_sync(event, payload).map(|_| ())
    }

    /// Synchronous [`filter`](Self::filter).
    pub fn filter_sync(&self, event: &str, payload: Value) -> EventResult<Option<Value>> {
        self.listen_sync(event, payload)
    }

    fn context_for(&self, event: &str, entry: &ListenerEntry) -> ListenerContext {
        ListenerContext {
            name: entry.listener.label().to_string(),
            priority: entry.priority,
            event: event.to_string(),
            emitter: self.clone(),
        }
    }

    fn trace_invocation(&self, event: &str, entry: &ListenerEntry) {
        if self.config().trace_dispatch {
            trace!(
                event = %event,
                listener = %entry.listener.label(),
                priority = entry.priority,
                "Invoking listener"
            );
        }
    }

    fn listener_failed(&self, event: &str, entry: &ListenerEntry, err: EventError) -> EventError {
        let label = match entry.listener.label() {
            "" => "anonymous",
            label => label,
        };

        error!(
            event = %event,
            listener = %label,
            priority = entry.priority,
            error = %err,
            "Listener failed, aborting dispatch"
        );

        EventError::with_source(
            ErrorKind::Handler,
            format!(
                "Listener '{}' (priority {}) failed on '{}'",
                label, entry.priority, event
            ),
            err,
        )
    }
}
