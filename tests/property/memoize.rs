//! Property tests for memoization.
//!
//! Invariants tested:
//! - A memoized function returns what the bare function returns
//! - The bare function runs once per distinct argument while unbounded
//! - A bounded table never exceeds its capacity
//! - Named argument order never changes the key

use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Decorator, Value};
use decorum_memoize::MemoizeLayer;
use decorum_state::CountCallsLayer;
use proptest::prelude::*;
use std::collections::HashSet;

fn cube(args: CallArgs) -> Result<Value, decorum_core::CallError> {
    let n = args.get(0).and_then(Value::as_int).unwrap_or(0);
    Ok(Value::Int(n * n * n))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: memoized results equal direct results
    #[test]
    fn memoized_results_match_direct_results(inputs in prop::collection::vec(-100i64..100, 1..60)) {
        let bare = callable_fn("cube", "", cube);
        let memoized = callable_fn("cube", "", cube).decorate(MemoizeLayer::defaults());

        for n in &inputs {
            let args = CallArgs::new().arg(*n);
            prop_assert_eq!(memoized.call(args.clone()).unwrap(), bare.call(args).unwrap());
        }
    }

    /// Property: the bare function runs once per distinct argument
    #[test]
    fn unbounded_table_computes_each_key_once(inputs in prop::collection::vec(0i64..20, 1..80)) {
        let f = callable_fn("cube", "", cube)
            .decorate(CountCallsLayer::defaults())
            .decorate(MemoizeLayer::defaults());

        for n in &inputs {
            f.call(CallArgs::new().arg(*n)).unwrap();
        }
        let distinct: HashSet<_> = inputs.iter().collect();
        prop_assert_eq!(f.inner().count(), distinct.len() as u64);
        prop_assert_eq!(f.len(), distinct.len());
    }

    /// Property: a bounded table never holds more than its capacity
    #[test]
    fn bounded_table_respects_capacity(
        capacity in 1usize..8,
        inputs in prop::collection::vec(0i64..30, 1..80),
    ) {
        let f = callable_fn("cube", "", cube)
            .decorate(MemoizeLayer::builder().capacity(capacity).build().unwrap());

        for n in &inputs {
            f.call(CallArgs::new().arg(*n)).unwrap();
            prop_assert!(f.len() <= capacity);
        }
        // The most recent argument is always still cached.
        let last = *inputs.last().unwrap();
        prop_assert!(f.contains(&CallArgs::new().arg(last)));
    }

    /// Property: reordering named arguments hits the same entry
    #[test]
    fn named_argument_order_is_irrelevant(named in prop::collection::btree_map("[a-z]{1,4}", -50i64..50, 1..6)) {
        let f = callable_fn("sum", "", |args: CallArgs| {
            Ok(Value::Int(args.kwargs().iter().filter_map(|(_, v)| v.as_int()).sum::<i64>()))
        })
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults());

        let forward = named
            .iter()
            .fold(CallArgs::new(), |args, (k, v)| args.kwarg(k.clone(), *v));
        let backward = named
            .iter()
            .rev()
            .fold(CallArgs::new(), |args, (k, v)| args.kwarg(k.clone(), *v));

        let first = f.call(forward).unwrap();
        let second = f.call(backward).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(f.inner().count(), 1);
    }
}
