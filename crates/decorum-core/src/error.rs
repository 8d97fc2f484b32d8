//! The error type shared by every callable and decorator.
//!
//! All decorators in the workspace speak [`CallError`], so stacking any
//! number of layers never needs error conversions. Failures raised by the
//! base callable travel through every enclosing layer as
//! [`CallError::Application`].

use thiserror::Error;

/// Errors returned by callables, decorators, and the plugin registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// No callable is registered under the requested name.
    #[error("no callable registered under '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A random pick was requested from a registry with no entries.
    #[error("registry is empty")]
    EmptyRegistry,

    /// An argument cannot be used as a memoization key.
    #[error("unhashable argument of type '{kind}'")]
    UnhashableArgument {
        /// The kind of the offending value (e.g. "list").
        kind: &'static str,
    },

    /// A decorator received a configuration value outside its valid domain.
    #[error("invalid configuration for {behavior}: {reason}")]
    InvalidConfiguration {
        /// The behavior being configured (e.g. "repeat").
        behavior: &'static str,
        /// What was wrong with the value.
        reason: String,
    },

    /// A non-negative attribute was set to a negative value.
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue {
        /// The attribute name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The wrapped function itself failed.
    #[error("{name} failed: {message}")]
    Application {
        /// The name of the failing callable.
        name: String,
        /// A description of the failure.
        message: String,
    },
}

impl CallError {
    /// Builds an [`CallError::Application`] failure for the callable `name`.
    pub fn application(name: impl Into<String>, message: impl Into<String>) -> Self {
        CallError::Application {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Builds an [`CallError::InvalidConfiguration`] for `behavior`.
    pub fn invalid_config(behavior: &'static str, reason: impl Into<String>) -> Self {
        CallError::InvalidConfiguration {
            behavior,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CallError::NotFound { .. })
    }

    pub fn is_empty_registry(&self) -> bool {
        matches!(self, CallError::EmptyRegistry)
    }

    pub fn is_unhashable(&self) -> bool {
        matches!(self, CallError::UnhashableArgument { .. })
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, CallError::InvalidConfiguration { .. })
    }

    pub fn is_negative_value(&self) -> bool {
        matches!(self, CallError::NegativeValue { .. })
    }

    /// Returns `true` if the failure came from the wrapped function rather
    /// than from the framework.
    pub fn is_application(&self) -> bool {
        matches!(self, CallError::Application { .. })
    }
}
