//! Property tests for repeat.
//!
//! Invariants tested:
//! - The wrapped function runs exactly `times` times per successful call
//! - The result is the last run's result
//! - A failure stops the remaining runs

use decorum_core::{callable_fn, CallArgs, CallError, Callable, DecorateExt, Value};
use decorum_repeat::RepeatLayer;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: runs == times, and the last result wins
    #[test]
    fn runs_exactly_times(times in 1usize..20) {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let f = callable_fn("tick", "", move |_| {
            Ok(Value::Int(r.fetch_add(1, Ordering::SeqCst) as i64 + 1))
        })
        .decorate(RepeatLayer::builder().times(times).build().unwrap());

        let out = f.call(CallArgs::new()).unwrap();
        prop_assert_eq!(runs.load(Ordering::SeqCst), times);
        prop_assert_eq!(out, Value::Int(times as i64));
    }

    /// Property: the first failure ends the call
    #[test]
    fn failure_stops_repetition(times in 1usize..20, fail_at in 1usize..20) {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let f = callable_fn("tick", "", move |_| {
            let run = r.fetch_add(1, Ordering::SeqCst) + 1;
            if run == fail_at {
                Err(CallError::application("tick", "boom"))
            } else {
                Ok(Value::None)
            }
        })
        .decorate(RepeatLayer::builder().times(times).build().unwrap());

        let result = f.call(CallArgs::new());
        if fail_at <= times {
            prop_assert!(result.is_err());
            prop_assert_eq!(runs.load(Ordering::SeqCst), fail_at);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(runs.load(Ordering::SeqCst), times);
        }
    }
}
