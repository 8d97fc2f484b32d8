use decorum_core::DecoratorEvent;
use std::time::Instant;

/// Events emitted by a [`PluginRegistry`](crate::PluginRegistry).
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A callable was added. `replaced` is set when it overwrote an earlier
    /// entry with the same name.
    Registered {
        name: String,
        timestamp: Instant,
        replaced: bool,
    },
    /// A lookup asked for a name nothing is registered under.
    NotFound { name: String, timestamp: Instant },
}

impl DecoratorEvent for RegistryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::Registered { replaced: false, .. } => "registered",
            RegistryEvent::Registered { replaced: true, .. } => "overwritten",
            RegistryEvent::NotFound { .. } => "not_found",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RegistryEvent::Registered { timestamp, .. }
            | RegistryEvent::NotFound { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            RegistryEvent::Registered { name, .. } | RegistryEvent::NotFound { name, .. } => name,
        }
    }
}
