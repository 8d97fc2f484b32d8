//! Property tests for the plugin registry.
//!
//! Invariants tested:
//! - Every registered name can be looked up
//! - random_entry only ever returns registered entries
//! - The same seed gives the same sequence of picks

use decorum_core::{callable_fn, CallArgs, Callable, Value};
use decorum_registry::PluginRegistry;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn populate(registry: &PluginRegistry, names: &BTreeSet<String>) {
    for name in names {
        let reply = name.clone();
        registry.register(Arc::new(callable_fn(name.clone(), "", move |_| {
            Ok(Value::from(reply.clone()))
        })));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: lookup finds every registered name, and only those
    #[test]
    fn lookup_finds_registered_names(
        names in prop::collection::btree_set("[a-z_]{1,8}", 1..10),
        absent in "[A-Z]{1,8}",
    ) {
        let registry = PluginRegistry::new();
        populate(&registry, &names);

        prop_assert_eq!(registry.len(), names.len());
        for name in &names {
            let found = registry.lookup(name).unwrap();
            prop_assert_eq!(found.call(CallArgs::new()).unwrap(), Value::from(name.as_str()));
        }
        prop_assert!(registry.lookup(&absent).err().unwrap().is_not_found());
    }

    /// Property: random picks are drawn from the registered entries
    #[test]
    fn random_entry_is_a_member(
        names in prop::collection::btree_set("[a-z_]{1,8}", 1..10),
        seed in any::<u64>(),
    ) {
        let registry = PluginRegistry::with_seed(seed);
        populate(&registry, &names);

        for _ in 0..20 {
            let (name, callable) = registry.random_entry().unwrap();
            prop_assert!(names.contains(&name));
            prop_assert_eq!(callable.name(), name.as_str());
        }
    }

    /// Property: equal seeds give equal pick sequences
    #[test]
    fn seeded_picks_are_reproducible(
        names in prop::collection::btree_set("[a-z_]{1,8}", 2..10),
        seed in any::<u64>(),
    ) {
        let a = PluginRegistry::with_seed(seed);
        let b = PluginRegistry::with_seed(seed);
        populate(&a, &names);
        populate(&b, &names);

        for _ in 0..10 {
            prop_assert_eq!(a.random_entry().unwrap().0, b.random_entry().unwrap().0);
        }
    }
}
