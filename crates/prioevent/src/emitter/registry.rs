//! Listener registry — listeners stored per event name with a priority each.
//!
//! Registration never sorts. Each event's sequence stays in insertion order
//! until a dispatch sorts it (see [`super::dispatcher`]), and that sorted
//! order then persists.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use prioevent_core::config::emitter::EmitterConfig;

use crate::listener::Listener;

/// One registration: a listener and the priority it was added with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerEntry {
    /// Priority (lower = earlier execution).
    pub priority: i32,
    /// The listener handle.
    pub listener: Listener,
}

impl ListenerEntry {
    /// Creates a new entry.
    pub fn new(priority: i32, listener: Listener) -> Self {
        Self { priority, listener }
    }
}

struct Inner {
    /// Event name → listeners, event names kept in first-registration order.
    listeners: RwLock<IndexMap<String, Vec<ListenerEntry>>>,
    config: EmitterConfig,
}

/// Priority-ordered event emitter.
///
/// A cheap, clonable handle; clones share one registry. Construct one at
/// startup and pass it around, or use [`PriorityEvent::global`] for the
/// process-wide instance.
#[derive(Clone)]
pub struct PriorityEvent {
    inner: Arc<Inner>,
}

impl PriorityEvent {
    /// Creates an empty emitter with default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an empty emitter with the given configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: RwLock::new(IndexMap::new()),
                config,
            }),
        }
    }

    /// Returns the configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.inner.config
    }

    /// Whether two handles refer to the same registry.
    pub fn same_instance(a: &PriorityEvent, b: &PriorityEvent) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Appends a listener to an event's sequence.
    ///
    /// No deduplication: the same listener may be added any number of
    /// times, at equal or different priorities.
    pub fn add_listener(&self, event: impl Into<String>, listener: Listener, priority: i32) {
        let event = event.into();
        let mut listeners = self.inner.listeners.write();
        let entries = listeners.entry(event.clone()).or_default();
        entries.push(ListenerEntry::new(priority, listener));

        debug!(
            event = %event,
            priority = priority,
            count = entries.len(),
            "Listener added"
        );
    }

    /// [`add_listener`](Self::add_listener) at the configured default priority.
    pub fn add_listener_default(&self, event: impl Into<String>, listener: Listener) {
        self.add_listener(event, listener, self.inner.config.default_priority);
    }

    /// Removes the first entry matching both `priority` and the listener's
    /// identity. Unknown events and non-matching priorities are no-ops.
    pub fn remove_listener(&self, event: &str, listener: &Listener, priority: i32) {
        let mut listeners = self.inner.listeners.write();
        let Some(entries) = listeners.get_mut(event) else {
            return;
        };

        let position = entries
            .iter()
            .position(|e| e.priority == priority && e.listener.same_as(listener));

        if let Some(index) = position {
            entries.remove(index);
            debug!(
                event = %event,
                priority = priority,
                remaining = entries.len(),
                "Listener removed"
            );
        }
    }

    /// [`remove_listener`](Self::remove_listener) at the configured default priority.
    pub fn remove_listener_default(&self, event: &str, listener: &Listener) {
        self.remove_listener(event, listener, self.inner.config.default_priority);
    }

    /// Drops every listener of an event and forgets the event name.
    pub fn remove_all_listeners(&self, event: &str) {
        let removed = self.inner.listeners.write().shift_remove(event);
        if let Some(entries) = removed {
            debug!(event = %event, removed = entries.len(), "All listeners removed");
        }
    }

    /// Event names that currently hold at least one listener.
    pub fn ls_events(&self) -> Vec<String> {
        let listeners = self.inner.listeners.read();
        listeners
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Current listener order for an event, `None` if it was never registered.
    pub fn ls_listeners(&self, event: &str) -> Option<Vec<ListenerEntry>> {
        let listeners = self.inner.listeners.read();
        listeners.get(event).cloned()
    }

    /// Number of listeners registered for an event.
    pub fn count_listeners(&self, event: &str) -> usize {
        let listeners = self.inner.listeners.read();
        listeners.get(event).map(Vec::len).unwrap_or(0)
    }

    /// Whether any listener is registered for an event.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.count_listeners(event) > 0
    }

    /// Stable-sorts the event's sequence in place and returns a snapshot of
    /// it, or `None` when there is nothing to run. The lock is released
    /// before the caller iterates.
    pub(crate) fn sorted_snapshot(&self, event: &str) -> Option<Vec<ListenerEntry>> {
        let mut listeners = self.inner.listeners.write();
        let entries = listeners.get_mut(event)?;
        if entries.is_empty() {
            return None;
        }

        entries.sort_by_key(|e| e.priority);
        Some(entries.clone())
    }
}

impl Default for PriorityEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PriorityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityEvent")
            .field("events", &self.ls_events())
            .field("config", &self.inner.config)
            .finish()
    }
}
