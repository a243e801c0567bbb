//! Convenience result type alias for the emitter.

use crate::error::EventError;

/// A specialized `Result` type for emitter operations.
///
/// Listener bodies and dispatch calls both return this, so a handler can
/// use `?` on anything that converts into [`EventError`].
pub type EventResult<T> = Result<T, EventError>;
