//! Configuration for memoization.

use crate::events::MemoizeEvent;
use crate::MemoizeLayer;
use decorum_core::{CallError, EventListeners, FnListener};
use std::num::NonZeroUsize;

/// Configuration for the memoization pattern.
pub struct MemoizeConfig {
    pub(crate) capacity: Option<NonZeroUsize>,
    pub(crate) event_listeners: EventListeners<MemoizeEvent>,
}

/// Builder for configuring and constructing a [`MemoizeLayer`].
pub struct MemoizeConfigBuilder {
    capacity: Option<usize>,
    event_listeners: EventListeners<MemoizeEvent>,
}

impl MemoizeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            capacity: None,
            event_listeners: EventListeners::new(),
        }
    }

    /// Bounds the table to `capacity` entries, evicting the least recently
    /// used entry when a new one would exceed it.
    ///
    /// Default: unbounded
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Removes any capacity bound.
    pub fn unbounded(mut self) -> Self {
        self.capacity = None;
        self
    }

    /// Registers a callback invoked with the callable's name on a cache hit.
    pub fn on_hit<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let MemoizeEvent::Hit { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Registers a callback invoked with the callable's name on a cache miss.
    pub fn on_miss<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let MemoizeEvent::Miss { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Registers a callback invoked when an entry is evicted.
    pub fn on_eviction<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let MemoizeEvent::Eviction { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Builds the memoize layer.
    ///
    /// Fails with [`CallError::InvalidConfiguration`] if a capacity of zero
    /// was requested.
    pub fn build(self) -> Result<MemoizeLayer, CallError> {
        let capacity = match self.capacity {
            None => None,
            Some(cap) => Some(NonZeroUsize::new(cap).ok_or_else(|| {
                CallError::invalid_config("memoize", "capacity must be at least 1")
            })?),
        };

        Ok(MemoizeLayer::new(MemoizeConfig {
            capacity,
            event_listeners: self.event_listeners,
        }))
    }
}

impl Default for MemoizeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
