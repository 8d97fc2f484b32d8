//! Stateful decorators.
//!
//! Each wrapped callable owns its state; the state is created when the
//! layer is applied and lives as long as the wrapped callable does.
//!
//! - [`CountCallsLayer`]: counts invocations and reports each new count
//! - [`SingletonLayer`]: constructs once, returns the same instance forever
//!
//! Both are safe to call from several threads at once.

mod counter;
mod events;
mod singleton;

pub use counter::{CountCalls, CountCallsConfig, CountCallsConfigBuilder, CountCallsLayer};
pub use events::{CountCallsEvent, SingletonEvent};
pub use singleton::{Singleton, SingletonConfig, SingletonConfigBuilder, SingletonLayer};
