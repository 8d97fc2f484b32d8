use decorum_core::DecoratorEvent;
use std::time::Instant;

/// Events emitted by the memoizer.
#[derive(Debug, Clone)]
pub enum MemoizeEvent {
    /// A cached result was returned without calling the wrapped function.
    Hit { name: String, timestamp: Instant },
    /// No cached result existed; the wrapped function was called.
    Miss { name: String, timestamp: Instant },
    /// An entry was dropped to stay within capacity.
    Eviction { name: String, timestamp: Instant },
}

impl DecoratorEvent for MemoizeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MemoizeEvent::Hit { .. } => "hit",
            MemoizeEvent::Miss { .. } => "miss",
            MemoizeEvent::Eviction { .. } => "eviction",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            MemoizeEvent::Hit { timestamp, .. }
            | MemoizeEvent::Miss { timestamp, .. }
            | MemoizeEvent::Eviction { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            MemoizeEvent::Hit { name, .. }
            | MemoizeEvent::Miss { name, .. }
            | MemoizeEvent::Eviction { name, .. } => name,
        }
    }
}
