//! Typed events: bind an event name to its payload and output types.
//!
//! ```rust,ignore
//! struct HexColor;
//!
//! impl Event for HexColor {
//!     const NAME: &'static str = "core/filter-event";
//!     type Payload = u32;
//!     type Output = String;
//! }
//!
//! emitter.on_typed::<HexColor, _>(
//!     |n, _, _| match n {
//!         Carried::Payload(n) => Ok(Some(format!("#{n:X}"))),
//!         Carried::Output(hex) => Ok(Some(hex)),
//!     },
//!     10,
//! );
//! let hex = emitter.filter_typed_sync::<HexColor>(0x77DD77)?;
//! ```
//!
//! A listener returning `None` hands the original payload to the next one,
//! so the value travelling down a chain is either an `Output` or the
//! `Payload`. [`Carried`] is that union; listeners and filter results both
//! see it. A value matching neither type is an
//! [`ErrorKind::Serialization`](prioevent_core::ErrorKind) error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use prioevent_core::EventResult;

use crate::emitter::registry::PriorityEvent;
use crate::listener::{Listener, ListenerContext};

/// A named event with known payload and output types.
pub trait Event {
    /// Event name used in the registry.
    const NAME: &'static str;
    /// Value the dispatch starts with.
    type Payload: Serialize + DeserializeOwned + Send + 'static;
    /// Value a filter listener produces.
    type Output: Serialize + DeserializeOwned + Send + 'static;
}

/// Value threaded through a typed chain.
///
/// Decoding tries `Output` first. When both types share a JSON shape the
/// value always comes back as `Output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Carried<P, O> {
    /// Produced by an earlier listener.
    Output(O),
    /// The dispatch payload, untouched or restored by the fallback.
    Payload(P),
}

impl<P, O> Carried<P, O> {
    /// The output, if a listener produced one.
    pub fn into_output(self) -> Option<O> {
        match self {
            Self::Output(output) => Some(output),
            Self::Payload(_) => None,
        }
    }

    /// Whether this is still the payload.
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Payload(_))
    }
}

impl<T> Carried<T, T> {
    /// Unwraps a chain whose payload and output share a type.
    pub fn into_inner(self) -> T {
        match self {
            Self::Output(value) | Self::Payload(value) => value,
        }
    }
}

/// Shorthand for the carried value of an event.
pub type CarriedOf<E> = Carried<<E as Event>::Payload, <E as Event>::Output>;

/// Wraps a typed closure as an untyped [`Listener`].
pub fn typed_listener<E, F>(label: impl Into<String>, f: F) -> Listener
where
    E: Event,
    F: Fn(CarriedOf<E>, E::Payload, &ListenerContext) -> EventResult<Option<E::Output>>
        + Send
        + Sync
        + 'static,
{
    Listener::named(label, move |carried, original, ctx| {
        let carried: CarriedOf<E> = serde_json::from_value(carried)?;
        let original: E::Payload = serde_json::from_value(original.clone())?;
        match f(carried, original, ctx)? {
            Some(output) => Ok(Some(serde_json::to_value(output)?)),
            None => Ok(None),
        }
    })
}

impl PriorityEvent {
    /// Registers a typed listener and returns its handle for later removal.
    pub fn on_typed<E, F>(&self, f: F, priority: i32) -> Listener
    where
        E: Event,
        F: Fn(CarriedOf<E>, E::Payload, &ListenerContext) -> EventResult<Option<E::Output>>
            + Send
            + Sync
            + 'static,
    {
        let listener = typed_listener::<E, F>("", f);
        self.add_listener(E::NAME, listener.clone(), priority);
        listener
    }

    /// Typed [`filter`](PriorityEvent::filter).
    pub async fn filter_typed<E: Event>(
        &self,
        payload: E::Payload,
    ) -> EventResult<Option<CarriedOf<E>>> {
        let value = serde_json::to_value(payload)?;
        decode::<E>(self.filter(E::NAME, value).await?)
    }

    /// Typed [`filter_sync`](PriorityEvent::filter_sync).
    pub fn filter_typed_sync<E: Event>(
        &self,
        payload: E::Payload,
    ) -> EventResult<Option<CarriedOf<E>>> {
        let value = serde_json::to_value(payload)?;
        decode::<E>(self.filter_sync(E::NAME, value)?)
    }

    /// Typed [`apply`](PriorityEvent::apply).
    pub async fn apply_typed<E: Event>(&self, payload: E::Payload) -> EventResult<()> {
        let value = serde_json::to_value(payload)?;
        self.apply(E::NAME, value).await
    }

    /// Typed [`apply_sync`](PriorityEvent::apply_sync).
    pub fn apply_typed_sync<E: Event>(&self, payload: E::Payload) -> EventResult<()> {
        let value = serde_json::to_value(payload)?;
        self.apply_sync(E::NAME, value)
    }
}

fn decode<E: Event>(value: Option<Value>) -> EventResult<Option<CarriedOf<E>>> {
    value
        .map(serde_json::from_value::<CarriedOf<E>>)
        .transpose()
        .map_err(Into::into)
}
