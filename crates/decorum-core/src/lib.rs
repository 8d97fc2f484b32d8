//! Core infrastructure for decorum.
//!
//! This crate provides the pieces every decorator in the workspace shares:
//! - [`Callable`], the interface of anything that can be wrapped
//! - [`CallArgs`] and [`Value`], the argument list forwarded through wrappers
//! - [`wrap_fn`] and [`WrapLayer`], the generic around-call wrapper
//! - [`Decorator`], the bare-or-configured construction entry points
//! - [`DecorateExt`], for stacking layers onto a callable
//! - [`CallError`], the error type shared by all layers
//! - An event system for observability

pub mod args;
pub mod attribute;
pub mod callable;
pub mod compose;
pub mod error;
pub mod events;
pub mod factory;
pub mod value;

pub use args::CallArgs;
pub use attribute::NonNegative;
pub use callable::{callable_fn, wrap_fn, BoxCallable, Callable, FnCallable, Metadata, Wrap, WrapLayer};
pub use compose::DecorateExt;
pub use error::CallError;
pub use events::{DecoratorEvent, EventListener, EventListeners, FnListener};
pub use factory::{Decorator, OptionReader, Options};
pub use tower_layer::Layer;
pub use value::{Instance, Value};
