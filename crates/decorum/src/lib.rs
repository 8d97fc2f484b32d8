//! Composable function decorators.
//!
//! `decorum` wraps callables in reusable behaviors: each behavior is a
//! [`Layer`](decorum_core::Layer) that turns a [`Callable`](decorum_core::Callable)
//! into another callable with the same name and description. Behaviors stack
//! with [`DecorateExt::decorate`](decorum_core::DecorateExt::decorate) or
//! `tower::ServiceBuilder`, and every behavior is available both as its own
//! crate and as a feature of this one.
//!
//! # Behaviors
//!
//! - **State** (`state` feature): call counting and singletons
//! - **Memoize** (`memoize` feature): result caching, unbounded or LRU
//! - **Registry** (`registry` feature): named plugin registry
//! - **Repeat** (`repeat` feature): run a callable several times per call
//! - **Diagnostics** (`diagnostics` feature): timer, debug and announce
//! - **Rate limit** (`ratelimit` feature): pause before every call
//! - **Retry** (`retry` feature): retry failed calls with backoff
//! - **Guard** (`guard` feature): login checks and quiet hours
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! decorum = { version = "0.1", features = ["memoize", "state"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "memoize", feature = "state"))]
//! # {
//! use decorum::prelude::*;
//! use decorum::memoize::MemoizeLayer;
//! use decorum::state::CountCallsLayer;
//!
//! let fibonacci = callable_fn("fibonacci", "", |args: CallArgs| {
//!     let n = args.get(0).and_then(Value::as_int).unwrap_or(0);
//!     Ok(Value::Int(n * 2))
//! })
//! .decorate(CountCallsLayer::defaults())
//! .decorate(MemoizeLayer::defaults());
//!
//! fibonacci.call(CallArgs::new().arg(10)).unwrap();
//! fibonacci.call(CallArgs::new().arg(10)).unwrap();
//! assert_eq!(fibonacci.inner().count(), 1);
//! # }
//! ```

// Re-export core (always available)
pub use decorum_core as core;

#[cfg(feature = "diagnostics")]
pub use decorum_diagnostics as diagnostics;

#[cfg(feature = "guard")]
pub use decorum_guard as guard;

#[cfg(feature = "memoize")]
pub use decorum_memoize as memoize;

#[cfg(feature = "ratelimit")]
pub use decorum_ratelimit as ratelimit;

#[cfg(feature = "registry")]
pub use decorum_registry as registry;

#[cfg(feature = "repeat")]
pub use decorum_repeat as repeat;

#[cfg(feature = "retry")]
pub use decorum_retry as retry;

#[cfg(feature = "state")]
pub use decorum_state as state;

/// The types needed to define, wrap and call a callable.
pub mod prelude {
    pub use decorum_core::{
        callable_fn, wrap_fn, BoxCallable, CallArgs, CallError, Callable, DecorateExt, Decorator,
        Layer, Options, Value,
    };
}
