use decorum_core::DecoratorEvent;
use std::time::Instant;

/// Events emitted by the login guard.
#[derive(Debug, Clone)]
pub enum LoginEvent {
    /// The caller was authenticated and the call went through.
    Admitted { name: String, timestamp: Instant },
    /// The caller was not authenticated and got the redirect instead.
    Redirected { name: String, timestamp: Instant },
}

impl DecoratorEvent for LoginEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LoginEvent::Admitted { .. } => "admitted",
            LoginEvent::Redirected { .. } => "redirected",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            LoginEvent::Admitted { timestamp, .. } | LoginEvent::Redirected { timestamp, .. } => {
                *timestamp
            }
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            LoginEvent::Admitted { name, .. } | LoginEvent::Redirected { name, .. } => name,
        }
    }
}

/// Events emitted by the quiet-hours gate.
#[derive(Debug, Clone)]
pub enum QuietHoursEvent {
    /// The call ran because `hour` was inside the allowed window.
    Allowed {
        name: String,
        timestamp: Instant,
        hour: u32,
    },
    /// The call was skipped because `hour` was outside the allowed window.
    Suppressed {
        name: String,
        timestamp: Instant,
        hour: u32,
    },
}

impl DecoratorEvent for QuietHoursEvent {
    fn event_type(&self) -> &'static str {
        match self {
            QuietHoursEvent::Allowed { .. } => "allowed",
            QuietHoursEvent::Suppressed { .. } => "suppressed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            QuietHoursEvent::Allowed { timestamp, .. }
            | QuietHoursEvent::Suppressed { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            QuietHoursEvent::Allowed { name, .. } | QuietHoursEvent::Suppressed { name, .. } => {
                name
            }
        }
    }
}
