//! Property tests for call counting.
//!
//! Invariants tested:
//! - The count equals the number of calls, failed calls included
//! - Each observed count is exactly one more than the previous one
//! - Clones share one count

use decorum_core::{callable_fn, CallArgs, CallError, Callable, DecorateExt, Decorator, Value};
use decorum_state::CountCallsLayer;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: the count tracks every call, successful or not
    #[test]
    fn count_matches_number_of_calls(outcomes in prop::collection::vec(any::<bool>(), 0..50)) {
        let f = callable_fn("maybe", "", |args: CallArgs| {
            match args.get(0).and_then(Value::as_bool) {
                Some(true) => Ok(Value::None),
                _ => Err(CallError::application("maybe", "no")),
            }
        })
        .decorate(CountCallsLayer::defaults());

        for ok in &outcomes {
            let _ = f.call(CallArgs::new().arg(*ok));
        }
        prop_assert_eq!(f.count(), outcomes.len() as u64);
    }

    /// Property: observed counts increase by exactly one per call
    #[test]
    fn observed_counts_are_consecutive(calls in 1usize..40) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let f = callable_fn("tick", "", |_| Ok(Value::None)).decorate(
            CountCallsLayer::builder()
                .on_call(move |_, count| s.lock().unwrap().push(count))
                .build(),
        );

        for _ in 0..calls {
            f.call(CallArgs::new()).unwrap();
        }
        let expected: Vec<u64> = (1..=calls as u64).collect();
        prop_assert_eq!(seen.lock().unwrap().clone(), expected);
    }

    /// Property: calls through any clone land on the same counter
    #[test]
    fn clones_share_the_count(split in prop::collection::vec(0usize..3, 0..30)) {
        let f = callable_fn("tick", "", |_| Ok(Value::None))
            .decorate(CountCallsLayer::defaults());
        let handles = [f.clone(), f.clone(), f.clone()];

        for i in &split {
            handles[*i].call(CallArgs::new()).unwrap();
        }
        prop_assert_eq!(f.count(), split.len() as u64);
    }
}
