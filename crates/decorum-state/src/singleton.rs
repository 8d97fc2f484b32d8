//! Singleton construction.

use crate::events::SingletonEvent;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tower_layer::Layer;

#[cfg(feature = "metrics")]
use metrics::counter;

/// Configuration for the singleton decorator.
pub struct SingletonConfig {
    pub(crate) event_listeners: EventListeners<SingletonEvent>,
}

/// Builder for [`SingletonLayer`].
pub struct SingletonConfigBuilder {
    event_listeners: EventListeners<SingletonEvent>,
}

impl Default for SingletonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SingletonConfigBuilder {
    pub fn new() -> Self {
        Self {
            event_listeners: EventListeners::new(),
        }
    }

    /// Registers a callback invoked when the instance is first constructed.
    pub fn on_created<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SingletonEvent::Created { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Registers a callback invoked whenever the cached instance is handed
    /// out again. The flag is `true` when the call's arguments differ from
    /// the ones the instance was constructed with.
    pub fn on_reused<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, bool) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SingletonEvent::Reused {
                name, args_differ, ..
            } = event
            {
                f(name, *args_differ);
            }
        }));
        self
    }

    pub fn build(self) -> SingletonLayer {
        SingletonLayer {
            config: Arc::new(SingletonConfig {
                event_listeners: self.event_listeners,
            }),
        }
    }
}

/// A [`Layer`] that turns a constructor into a singleton factory.
///
/// The first successful call constructs the instance and caches it. Every
/// call after that returns the cached instance without invoking the
/// constructor, and any arguments it receives are ignored.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
/// use decorum_state::SingletonLayer;
///
/// struct TheOne;
///
/// let make = callable_fn("TheOne", "", |_| Ok(Value::object(TheOne)))
///     .decorate(SingletonLayer::builder().build());
///
/// let first = make.call(CallArgs::new()).unwrap();
/// let second = make.call(CallArgs::new().arg(42)).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Clone)]
pub struct SingletonLayer {
    config: Arc<SingletonConfig>,
}

impl SingletonLayer {
    pub fn builder() -> SingletonConfigBuilder {
        SingletonConfigBuilder::new()
    }
}

impl Decorator for SingletonLayer {
    const BEHAVIOR: &'static str = "singleton";

    fn defaults() -> Self {
        SingletonConfigBuilder::new().build()
    }

    /// Takes no options.
    fn configured(options: &Options) -> Result<Self, CallError> {
        options.reader(Self::BEHAVIOR).finish()?;
        Ok(Self::defaults())
    }
}

impl<S: Callable> Layer<S> for SingletonLayer {
    type Service = Singleton<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Singleton::new(inner, Arc::clone(&self.config))
    }
}

struct Slot {
    instance: Value,
    args: CallArgs,
}

/// A callable that constructs its result once and then keeps returning it.
///
/// Clones share the cached instance.
///
/// The slot lock is held while the constructor runs, so concurrent first
/// calls construct once. A constructor must therefore not call its own
/// singleton handle (or a clone of it): `std::sync::Mutex` is not
/// reentrant and the call deadlocks. Calling a *different* singleton from
/// inside a constructor is fine.
pub struct Singleton<S> {
    inner: S,
    config: Arc<SingletonConfig>,
    slot: Arc<Mutex<Option<Slot>>>,
}

impl<S> Singleton<S> {
    pub fn new(inner: S, config: Arc<SingletonConfig>) -> Self {
        Self {
            inner,
            config,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// The cached instance, if it has been constructed.
    pub fn instance(&self) -> Option<Value> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|slot| slot.instance.clone())
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for Singleton<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S: Callable> Callable for Singleton<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();
        // Held across construction so concurrent first calls build only once.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = slot.as_ref() {
            let args_differ = existing.args != args;
            tracing::debug!(callable = %name, args_differ, "Reusing singleton instance");
            self.config.event_listeners.emit(&SingletonEvent::Reused {
                name: name.to_string(),
                timestamp: Instant::now(),
                args_differ,
            });
            return Ok(existing.instance.clone());
        }

        // A failed construction leaves the slot empty for the next caller.
        let instance = self.inner.call(args.clone())?;
        *slot = Some(Slot {
            instance: instance.clone(),
            args,
        });
        drop(slot);

        tracing::debug!(callable = %name, "Constructed singleton instance");

        #[cfg(feature = "metrics")]
        counter!("decorum_singleton_constructions_total", "callable" => name.to_string())
            .increment(1);

        self.config.event_listeners.emit(&SingletonEvent::Created {
            name: name.to_string(),
            timestamp: Instant::now(),
        });
        Ok(instance)
    }
}
