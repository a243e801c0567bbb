//! Prelude for convenient imports.

pub use async_trait::async_trait;
pub use serde_json::{Value, json};

pub use crate::emitter::registry::{ListenerEntry, PriorityEvent};
pub use crate::global::{apply, apply_sync, filter, filter_sync, off, on};
pub use crate::listener::{HandlerResult, Listener, ListenerContext, ListenerHandler};
pub use crate::typed::{Carried, CarriedOf, Event, typed_listener};

pub use prioevent_core::config::emitter::DEFAULT_PRIORITY;
pub use prioevent_core::{ErrorKind, EventError, EventResult};
