//! Listener handles and the per-invocation execution context.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::Poll;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use prioevent_core::EventResult;

use crate::emitter::registry::PriorityEvent;

/// What a listener hands back to the dispatcher.
///
/// `Ok(None)` means "no value": the dispatcher falls back to the original
/// payload for the next listener instead of threading nothing forward.
pub type HandlerResult = EventResult<Option<Value>>;

type SyncFn = dyn Fn(Value, &Value, &ListenerContext) -> HandlerResult + Send + Sync;
type AsyncFn = dyn Fn(Value, Value, ListenerContext) -> BoxFuture<'static, HandlerResult> + Send + Sync;

/// Trait for listener implementations that carry their own state.
///
/// Closures cover most cases; implement this when a listener is a
/// struct with fields, then wrap it with [`Listener::from_handler`].
#[async_trait]
pub trait ListenerHandler: Send + Sync {
    /// Handles one invocation. `payload` is the value threaded from the
    /// previous listener, `original` the value the dispatch started with.
    async fn handle(&self, payload: Value, original: Value, ctx: ListenerContext) -> HandlerResult;
}

enum Handler {
    Sync(Box<SyncFn>),
    Async(Box<AsyncFn>),
}

struct ListenerInner {
    label: String,
    handler: Handler,
}

/// A registered callable.
///
/// Cloning is cheap and clones share identity: [`Listener::same_as`] (and
/// `==`) compare the underlying allocation, never the closure body. Keep a
/// clone around to remove the listener later.
#[derive(Clone)]
pub struct Listener {
    inner: Arc<ListenerInner>,
}

impl Listener {
    /// Creates an anonymous synchronous listener.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value, &Value, &ListenerContext) -> HandlerResult + Send + Sync + 'static,
    {
        Self::named("", f)
    }

    /// Creates a synchronous listener with a diagnostic label.
    pub fn named<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, &Value, &ListenerContext) -> HandlerResult + Send + Sync + 'static,
    {
        Self::from_parts(label.into(), Handler::Sync(Box::new(f)))
    }

    /// Creates an anonymous asynchronous listener.
    pub fn new_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Value, Value, ListenerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::named_async("", f)
    }

    /// Creates an asynchronous listener with a diagnostic label.
    pub fn named_async<F, Fut>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, Value, ListenerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let boxed: Box<AsyncFn> =
            Box::new(move |payload: Value, original: Value, ctx: ListenerContext| {
                f(payload, original, ctx).boxed()
            });
        Self::from_parts(label.into(), Handler::Async(boxed))
    }

    /// Wraps a [`ListenerHandler`] implementation.
    pub fn from_handler(label: impl Into<String>, handler: Arc<dyn ListenerHandler>) -> Self {
        Self::named_async(label, move |payload, original, ctx| {
            let handler = handler.clone();
            async move { handler.handle(payload, original, ctx).await }
        })
    }

    fn from_parts(label: String, handler: Handler) -> Self {
        Self {
            inner: Arc::new(ListenerInner { label, handler }),
        }
    }

    /// Declared label, empty for anonymous listeners.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Whether the listener body is asynchronous.
    pub fn is_async(&self) -> bool {
        matches!(self.inner.handler, Handler::Async(_))
    }

    /// Identity comparison: true only for clones of the same listener.
    pub fn same_as(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) async fn invoke(
        &self,
        payload: Value,
        original: &Value,
        ctx: ListenerContext,
    ) -> HandlerResult {
        match &self.inner.handler {
            Handler::Sync(f) => f(payload, original, &ctx),
            Handler::Async(f) => f(payload, original.clone(), ctx).await,
        }
    }

    /// Runs the listener without suspending. An async body gets exactly one
    /// poll; `Poll::Pending` means it wanted to wait and was dropped.
    pub(crate) fn invoke_sync(
        &self,
        payload: Value,
        original: &Value,
        ctx: ListenerContext,
    ) -> Poll<HandlerResult> {
        match &self.inner.handler {
            Handler::Sync(f) => Poll::Ready(f(payload, original, &ctx)),
            Handler::Async(f) => match f(payload, original.clone(), ctx).now_or_never() {
                Some(result) => Poll::Ready(result),
                None => Poll::Pending,
            },
        }
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.inner.label)
            .field("async", &self.is_async())
            .finish()
    }
}

/// Context handed to a listener for one invocation.
///
/// Built fresh per call and dropped afterwards.
#[derive(Clone)]
pub struct ListenerContext {
    /// The listener's label (empty when anonymous).
    pub name: String,
    /// Priority this listener was registered with.
    pub priority: i32,
    /// Event being dispatched.
    pub event: String,
    /// The emitter running the dispatch.
    pub emitter: PriorityEvent,
}

impl PartialEq for ListenerContext {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.priority == other.priority
            && self.event == other.event
            && PriorityEvent::same_instance(&self.emitter, &other.emitter)
    }
}

impl fmt::Debug for ListenerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerContext")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}
