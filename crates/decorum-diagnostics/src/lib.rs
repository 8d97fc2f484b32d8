//! Diagnostic decorators.
//!
//! These layers observe a call without changing its outcome:
//!
//! - [`TimerLayer`]: logs and reports how long each call took
//! - [`DebugLayer`]: logs each call's arguments and its return value
//! - [`AnnounceLayer`]: logs a fixed message before and after each call
//!
//! Log lines go through `tracing`; install a subscriber to see them. Every
//! layer also emits typed events to listeners registered on its builder.
//!
//! # Examples
//!
//! ```
//! use decorum_core::{callable_fn, CallArgs, Callable, Decorator, Value};
//! use decorum_diagnostics::{DebugLayer, TimerLayer};
//! use tower::ServiceBuilder;
//!
//! let make_greeting = ServiceBuilder::new()
//!     .layer(TimerLayer::defaults())
//!     .layer(DebugLayer::defaults())
//!     .service(callable_fn("make_greeting", "", |args: CallArgs| {
//!         Ok(Value::from(format!("Howdy {}!", args.get(0).map(|v| v.to_string()).unwrap_or_default())))
//!     }));
//!
//! assert_eq!(make_greeting.call(CallArgs::new().arg("Dorrisile")).unwrap(), Value::from("Howdy Dorrisile!"));
//! assert_eq!(make_greeting.name(), "make_greeting");
//! ```

mod announce;
mod debug;
mod events;
mod timer;

pub use announce::{
    Announce, AnnounceConfig, AnnounceConfigBuilder, AnnounceLayer, DEFAULT_AFTER, DEFAULT_BEFORE,
};
pub use debug::{DebugCalls, DebugConfig, DebugConfigBuilder, DebugLayer};
pub use events::{AnnounceEvent, DebugEvent, TimerEvent};
pub use timer::{Timer, TimerConfig, TimerConfigBuilder, TimerLayer};
