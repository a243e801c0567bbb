//! Emitter — listener registry and the dispatcher that runs it.

pub mod dispatcher;
pub mod registry;

pub use registry::{ListenerEntry, PriorityEvent};
