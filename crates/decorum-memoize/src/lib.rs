//! Memoization for decorum callables.
//!
//! This crate provides a layer that caches a callable's results by argument
//! signature, so repeated calls with equal arguments return the stored
//! result without running the function again.
//!
//! # Features
//!
//! - **Unbounded or LRU-bounded**: unbounded by default, or capped at a fixed
//!   number of entries with least-recently-used eviction
//! - **Order-insensitive named arguments**: `f(a=1, b=2)` and `f(b=2, a=1)`
//!   share an entry
//! - **Failures are not cached**: an error from the wrapped function is
//!   returned and the next call tries again
//! - **Event System**: Observability through memo events (Hit, Miss, Eviction)
//!
//! Arguments must be hashable by content. Lists, maps, and opaque objects
//! are rejected with [`CallError::UnhashableArgument`] before the wrapped
//! function runs.
//!
//! # Examples
//!
//! ```
//! use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
//! use decorum_memoize::MemoizeLayer;
//!
//! let slow_add = callable_fn("slow_add", "", |args: CallArgs| {
//!     let a = args.get(0).and_then(Value::as_int).unwrap_or(0);
//!     let b = args.get(1).and_then(Value::as_int).unwrap_or(0);
//!     Ok(Value::Int(a + b))
//! });
//!
//! let add = slow_add.decorate(
//!     MemoizeLayer::builder()
//!         .capacity(2)
//!         .on_hit(|name| println!("{} served from cache", name))
//!         .build()
//!         .unwrap(),
//! );
//!
//! assert_eq!(add.call(CallArgs::positional([2, 3])).unwrap(), Value::Int(5));
//! assert_eq!(add.call(CallArgs::positional([2, 3])).unwrap(), Value::Int(5));
//! assert_eq!(add.len(), 1);
//! ```

mod config;
mod events;
mod key;
mod layer;
mod store;

pub use config::{MemoizeConfig, MemoizeConfigBuilder};
pub use events::MemoizeEvent;
pub use key::{ArgSignature, KeyPart};
pub use layer::MemoizeLayer;

use decorum_core::{CallArgs, CallError, Callable, Metadata, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use store::{Inserted, MemoStore};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_gauge, gauge};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// A callable that caches the results of the callable it wraps.
///
/// The table lock is not held while the wrapped function runs, so a
/// memoized function may call itself recursively through its own handle.
/// Clones share the table.
pub struct Memoize<S> {
    inner: S,
    config: Arc<config::MemoizeConfig>,
    store: Arc<Mutex<MemoStore>>,
}

impl<S> Memoize<S> {
    /// Creates a new `Memoize` wrapping the given callable.
    pub fn new(inner: S, config: Arc<config::MemoizeConfig>) -> Self {
        #[cfg(feature = "metrics")]
        {
            describe_counter!(
                "memoize_requests_total",
                "Total number of memoized calls (hits and misses)"
            );
            describe_counter!("memoize_evictions_total", "Total number of memo evictions");
            describe_gauge!("memoize_size", "Current number of entries in the memo table");
        }

        let store = Arc::new(Mutex::new(MemoStore::new(config.capacity)));
        Self {
            inner,
            config,
            store,
        }
    }

    fn table(&self) -> MutexGuard<'_, MemoStore> {
        // Every critical section leaves the table consistent, so a poisoned
        // lock is safe to keep using.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The capacity bound, or `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.table().capacity()
    }

    /// Returns `true` if a result for `args` is cached. Does not affect
    /// eviction order. Unhashable arguments are never cached.
    pub fn contains(&self, args: &CallArgs) -> bool {
        match ArgSignature::from_args(args) {
            Ok(key) => self.table().contains(&key),
            Err(_) => false,
        }
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.table().clear();
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for Memoize<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Callable> Callable for Memoize<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let key = ArgSignature::from_args(&args)?;
        let name = self.inner.name();

        let cached = self.table().get(&key);
        if let Some(value) = cached {
            #[cfg(feature = "metrics")]
            counter!("memoize_requests_total", "callable" => name.to_string(), "result" => "hit")
                .increment(1);

            #[cfg(feature = "tracing")]
            debug!(callable = %name, "Memo hit");

            self.config.event_listeners.emit(&MemoizeEvent::Hit {
                name: name.to_string(),
                timestamp: Instant::now(),
            });
            return Ok(value);
        }

        #[cfg(feature = "metrics")]
        counter!("memoize_requests_total", "callable" => name.to_string(), "result" => "miss")
            .increment(1);

        #[cfg(feature = "tracing")]
        debug!(callable = %name, "Memo miss");

        self.config.event_listeners.emit(&MemoizeEvent::Miss {
            name: name.to_string(),
            timestamp: Instant::now(),
        });

        let value = self.inner.call(args)?;

        let inserted = {
            let mut table = self.table();
            let inserted = table.insert(key, value.clone());

            #[cfg(feature = "metrics")]
            gauge!("memoize_size", "callable" => name.to_string()).set(table.len() as f64);

            inserted
        };

        match inserted {
            Inserted::Fresh | Inserted::Replaced => {}
            Inserted::Evicted(_) => {
                #[cfg(feature = "metrics")]
                counter!("memoize_evictions_total", "callable" => name.to_string()).increment(1);

                #[cfg(feature = "tracing")]
                info!(callable = %name, "Memo eviction occurred");

                self.config.event_listeners.emit(&MemoizeEvent::Eviction {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                });
            }
        }

        Ok(value)
    }
}
