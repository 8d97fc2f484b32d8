//! Slow-down metrics regression tests

use super::helpers::*;
use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
use decorum_ratelimit::SlowDownLayer;
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn slow_down_metrics_exist() {
    init_recorder();

    let f = callable_fn("metrics_slow", "", |_| Ok(Value::None)).decorate(
        SlowDownLayer::builder()
            .name("test_slow_down")
            .delay(Duration::from_millis(1))
            .build()
            .unwrap(),
    );
    f.call(CallArgs::new()).unwrap();

    assert_histogram_exists("slow_down_delay_seconds");
    assert_metric_has_label("slow_down_delay_seconds", "slow_down", "test_slow_down");
}
