mod factory;
mod listeners;
mod memoize;
mod registry;
mod singleton;
