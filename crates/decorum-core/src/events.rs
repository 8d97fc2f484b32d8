//! Event system for decorators.
//!
//! Every behavior reports what it did through typed events. Listeners are
//! registered on a behavior's builder with `on_*` hooks and receive events
//! synchronously, in registration order, on the calling thread.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Trait for events emitted by decorators.
pub trait DecoratorEvent: Send + Sync + fmt::Debug {
    /// Returns the type of event (e.g., "call_counted", "hit").
    fn event_type(&self) -> &'static str;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Instant;

    /// Returns the name of the wrapped callable the event concerns.
    fn callable_name(&self) -> &str;

    /// One-line rendering such as `call_counted for 'greet'`.
    fn describe(&self) -> String {
        format!("{} for '{}'", self.event_type(), self.callable_name())
    }
}

/// Trait for listening to decorator events.
pub trait EventListener<E: DecoratorEvent>: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &E);
}

/// Type alias for boxed event listeners.
pub type BoxedEventListener<E> = Arc<dyn EventListener<E>>;

/// A collection of event listeners.
#[derive(Clone)]
pub struct EventListeners<E: DecoratorEvent> {
    listeners: Vec<BoxedEventListener<E>>,
}

impl<E: DecoratorEvent> EventListeners<E> {
    /// Creates a new empty event listener collection.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener to the collection.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Emits an event to all registered listeners, in registration order.
    ///
    /// A panicking listener is caught so the remaining listeners still see
    /// the event and the wrapped call is unaffected. Returns how many
    /// listeners panicked.
    pub fn emit(&self, event: &E) -> usize {
        let mut panicked = 0;
        for (index, listener) in self.listeners.iter().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));
            if let Err(payload) = outcome {
                panicked += 1;
                report_panic(index, event, payload.as_ref());
            }
        }
        panicked
    }

    /// Returns true if there are no listeners.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns the number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic>"
    }
}

#[cfg(feature = "tracing")]
fn report_panic<E: DecoratorEvent>(index: usize, event: &E, payload: &(dyn Any + Send)) {
    tracing::warn!(
        listener = index,
        event = event.event_type(),
        callable = event.callable_name(),
        "listener panicked while handling {}: {}",
        event.describe(),
        panic_message(payload)
    );
}

#[cfg(not(feature = "tracing"))]
fn report_panic<E: DecoratorEvent>(_index: usize, _event: &E, payload: &(dyn Any + Send)) {
    let _ = panic_message(payload);
}

impl<E: DecoratorEvent> Default for EventListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DecoratorEvent> fmt::Debug for EventListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

/// A simple function-based event listener.
pub struct FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    f: F,
    _phantom: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Creates a new function-based listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<E, F>
where
    E: DecoratorEvent,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }
}
