//! Plugin registry for decorum callables.
//!
//! A [`PluginRegistry`] maps names to callables. Callables can be added
//! directly with [`PluginRegistry::register`] or as part of a decorator
//! stack with [`RegisterLayer`]. Registration never alters the callable.
//!
//! - [`PluginRegistry::lookup`] fails with [`CallError::NotFound`](decorum_core::CallError::NotFound)
//! - [`PluginRegistry::random_entry`] fails with [`CallError::EmptyRegistry`](decorum_core::CallError::EmptyRegistry)
//!
//! Registries are explicit values rather than process-wide state; a seeded
//! registry makes random selection reproducible in tests.

mod events;
mod layer;
mod registry;

pub use events::RegistryEvent;
pub use layer::RegisterLayer;
pub use registry::{PluginRegistry, PluginRegistryBuilder};
