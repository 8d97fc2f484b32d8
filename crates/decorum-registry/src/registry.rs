use crate::events::RegistryEvent;
use decorum_core::{BoxCallable, CallError, EventListeners, FnListener};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

struct Shared {
    entries: RwLock<BTreeMap<String, BoxCallable>>,
    rng: Option<Mutex<StdRng>>,
    event_listeners: EventListeners<RegistryEvent>,
    name: String,
}

/// A name-indexed collection of callables.
///
/// The registry is an ordinary value: create one, hand clones of it to
/// whatever needs to register or dispatch, and it lives as long as the last
/// handle. Clones share the same entries. Independent registries never see
/// each other's entries.
///
/// Entries are keyed by the callable's reported name, which for a wrapped
/// callable is the name of the function at the bottom of the stack.
/// Registering a second callable under an existing name replaces the first.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, Value};
/// use decorum_registry::PluginRegistry;
/// use std::sync::Arc;
///
/// let plugins = PluginRegistry::new();
/// plugins.register(Arc::new(callable_fn("say_hello", "", |args: CallArgs| {
///     Ok(Value::from(format!("Hello {}", args.get(0).map(|v| v.to_string()).unwrap_or_default())))
/// })));
///
/// let greeter = plugins.lookup("say_hello").unwrap();
/// assert_eq!(greeter.call(CallArgs::new().arg("Alice")).unwrap(), Value::from("Hello Alice"));
/// assert!(matches!(plugins.lookup("say_goodbye"), Err(e) if e.is_not_found()));
/// ```
#[derive(Clone)]
pub struct PluginRegistry {
    shared: Arc<Shared>,
}

impl PluginRegistry {
    /// Creates an empty registry that picks random entries with the thread
    /// RNG.
    pub fn new() -> Self {
        PluginRegistryBuilder::new().build()
    }

    /// Creates an empty registry whose random picks are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        PluginRegistryBuilder::new().seed(seed).build()
    }

    pub fn builder() -> PluginRegistryBuilder {
        PluginRegistryBuilder::new()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, BoxCallable>> {
        self.shared
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `callable` under its reported name and hands it back unchanged.
    ///
    /// An existing entry with the same name is replaced.
    pub fn register(&self, callable: BoxCallable) -> BoxCallable {
        let name = callable.name().to_string();
        let (replaced, len) = {
            let mut entries = self
                .shared
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let replaced = entries
                .insert(name.clone(), Arc::clone(&callable))
                .is_some();
            (replaced, entries.len())
        };

        #[cfg(feature = "tracing")]
        if replaced {
            warn!(registry = %self.shared.name, callable = %name, "Replaced registered callable");
        } else {
            debug!(registry = %self.shared.name, callable = %name, "Registered callable");
        }

        #[cfg(feature = "metrics")]
        gauge!("registry_entries", "registry" => self.shared.name.clone()).set(len as f64);

        #[cfg(not(feature = "metrics"))]
        let _ = len;

        self.shared.event_listeners.emit(&RegistryEvent::Registered {
            name,
            timestamp: Instant::now(),
            replaced,
        });
        callable
    }

    /// Returns the callable registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<BoxCallable, CallError> {
        let found = self.read().get(name).cloned();

        #[cfg(feature = "metrics")]
        counter!(
            "registry_lookups_total",
            "registry" => self.shared.name.clone(),
            "result" => if found.is_some() { "found" } else { "not_found" }
        )
        .increment(1);

        match found {
            Some(callable) => Ok(callable),
            None => {
                self.shared.event_listeners.emit(&RegistryEvent::NotFound {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                });
                Err(CallError::NotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Picks one entry uniformly at random.
    ///
    /// Fails with [`CallError::EmptyRegistry`] when nothing is registered.
    pub fn random_entry(&self) -> Result<(String, BoxCallable), CallError> {
        let entries = self.read();
        if entries.is_empty() {
            return Err(CallError::EmptyRegistry);
        }

        let index = match &self.shared.rng {
            Some(rng) => rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .random_range(0..entries.len()),
            None => rand::rng().random_range(0..entries.len()),
        };

        entries
            .iter()
            .nth(index)
            .map(|(name, callable)| (name.clone(), Arc::clone(callable)))
            .ok_or(CallError::EmptyRegistry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The label used in logs and metrics.
    pub fn label(&self) -> &str {
        &self.shared.name
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("name", &self.shared.name)
            .field("entries", &self.names())
            .finish()
    }
}

/// Builder for [`PluginRegistry`].
pub struct PluginRegistryBuilder {
    seed: Option<u64>,
    event_listeners: EventListeners<RegistryEvent>,
    name: String,
}

impl Default for PluginRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistryBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - seed: none (thread RNG)
    /// - name: `"<unnamed>"`
    pub fn new() -> Self {
        Self {
            seed: None,
            event_listeners: EventListeners::new(),
            name: "<unnamed>".to_string(),
        }
    }

    /// Seeds the RNG used by [`PluginRegistry::random_entry`].
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the label used in logs and metrics.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked after each registration with the
    /// registered name and whether an earlier entry was replaced.
    pub fn on_registered<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, bool) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RegistryEvent::Registered { name, replaced, .. } = event {
                f(name, *replaced);
            }
        }));
        self
    }

    /// Registers a callback invoked when a lookup finds nothing.
    pub fn on_not_found<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RegistryEvent::NotFound { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    pub fn build(self) -> PluginRegistry {
        PluginRegistry {
            shared: Arc::new(Shared {
                entries: RwLock::new(BTreeMap::new()),
                rng: self.seed.map(|s| Mutex::new(StdRng::seed_from_u64(s))),
                event_listeners: self.event_listeners,
                name: self.name,
            }),
        }
    }
}
