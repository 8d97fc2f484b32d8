//! Failure propagation through stacks.

use decorum_core::{CallArgs, CallError, Callable, DecorateExt, Decorator};
use decorum_diagnostics::{AnnounceLayer, DebugLayer, TimerLayer};
use decorum_memoize::MemoizeLayer;
use decorum_repeat::RepeatLayer;
use decorum_retry::RetryLayer;
use decorum_state::CountCallsLayer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::test_utils::failing;

#[test]
fn base_failure_reaches_the_caller_unchanged() {
    let f = failing("disk full")
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults())
        .decorate(TimerLayer::defaults())
        .decorate(DebugLayer::defaults())
        .decorate(AnnounceLayer::defaults());

    assert_eq!(
        f.call(CallArgs::new().arg(1)).unwrap_err(),
        CallError::application("flaky", "disk full")
    );
}

#[test]
fn failures_are_not_memoized() {
    let f = failing("nope")
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults());

    assert!(f.call(CallArgs::new().arg(1)).is_err());
    assert!(f.call(CallArgs::new().arg(1)).is_err());
    assert_eq!(f.inner().count(), 2);
    assert!(f.is_empty());
}

#[test]
fn repeat_stops_at_first_failure() {
    let f = failing("nope")
        .decorate(CountCallsLayer::defaults())
        .decorate(RepeatLayer::builder().times(5).build().unwrap());

    assert!(f.call(CallArgs::new()).unwrap_err().is_application());
    assert_eq!(f.inner().count(), 1);
}

#[test]
fn retry_outside_counter_sees_every_attempt() {
    let exhausted = Arc::new(AtomicUsize::new(0));
    let e = Arc::clone(&exhausted);
    let f = failing("nope")
        .decorate(CountCallsLayer::defaults())
        .decorate(
            RetryLayer::builder()
                .max_attempts(4)
                .on_exhausted(move |attempts| {
                    e.store(attempts, Ordering::SeqCst);
                })
                .build()
                .unwrap(),
        );

    assert!(f.call(CallArgs::new()).is_err());
    assert_eq!(f.inner().count(), 4);
    assert_eq!(exhausted.load(Ordering::SeqCst), 4);
}

#[test]
fn unhashable_arguments_fail_before_the_base_runs() {
    let counted = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counted);
    let f = decorum_core::callable_fn("len", "", move |args: CallArgs| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(decorum_core::Value::Int(args.len() as i64))
    })
    .decorate(MemoizeLayer::defaults());

    let list = decorum_core::Value::List(vec![1.into(), 2.into()]);
    let err = f.call(CallArgs::new().arg(list)).unwrap_err();
    assert!(err.is_unhashable());
    assert_eq!(counted.load(Ordering::SeqCst), 0);
}
