//! # prioevent
//!
//! Priority-ordered event emitter. Provides:
//!
//! - A listener registry keyed by event name, with integer priorities
//! - Dispatch in ascending priority order (stable for ties), threading a
//!   payload from one listener to the next
//! - `apply` (result discarded) and `filter` (result returned) entry points,
//!   each in async and sync flavours
//! - A lazily created process-wide instance plus free helper functions
//! - A typed layer mapping event names to payload/output types

pub mod emitter;
pub mod global;
pub mod listener;
pub mod prelude;
pub mod typed;

pub use emitter::registry::{ListenerEntry, PriorityEvent};
pub use global::{apply, apply_sync, filter, filter_sync, off, on};
pub use listener::{HandlerResult, Listener, ListenerContext, ListenerHandler};
pub use prioevent_core::config::emitter::{DEFAULT_PRIORITY, EmitterConfig};
pub use prioevent_core::{ErrorKind, EventError, EventResult};
pub use typed::{Carried, CarriedOf, Event};
