//! Metadata propagation through deep stacks.

use decorum_core::{Callable, DecorateExt, Decorator};
use decorum_diagnostics::{AnnounceLayer, DebugLayer, TimerLayer};
use decorum_guard::{FixedClock, QuietHoursLayer};
use decorum_memoize::MemoizeLayer;
use decorum_ratelimit::SlowDownLayer;
use decorum_repeat::RepeatLayer;
use decorum_retry::RetryLayer;
use decorum_state::{CountCallsLayer, SingletonLayer};
use std::time::Duration;

use super::test_utils::{base, tracer, Trace};

#[test]
fn every_layer_reports_the_base_metadata() {
    let trace = Trace::new();
    let f = base(&trace)
        .decorate(tracer(&trace, "wrap"))
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults())
        .decorate(RepeatLayer::defaults())
        .decorate(TimerLayer::defaults())
        .decorate(DebugLayer::defaults())
        .decorate(AnnounceLayer::defaults())
        .decorate(
            SlowDownLayer::builder()
                .delay(Duration::ZERO)
                .build()
                .unwrap(),
        )
        .decorate(RetryLayer::defaults())
        .decorate(
            QuietHoursLayer::builder()
                .clock(FixedClock(12))
                .build()
                .unwrap(),
        )
        .decorate(SingletonLayer::defaults());

    assert_eq!(f.name(), "base");
    assert_eq!(f.description(), "Echo the first argument.");
}

#[test]
fn boxed_stacks_keep_metadata() {
    let trace = Trace::new();
    let boxed = base(&trace)
        .decorate(CountCallsLayer::defaults())
        .decorate(TimerLayer::defaults())
        .boxed();

    assert_eq!(boxed.name(), "base");
    assert_eq!(boxed.metadata().description(), "Echo the first argument.");
}
