//! Timer metrics regression tests

use super::helpers::*;
use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Decorator, Value};
use decorum_diagnostics::TimerLayer;
use serial_test::serial;

#[test]
#[serial]
fn timer_metrics_exist() {
    init_recorder();

    let f = callable_fn("metrics_timed", "", |_| Ok(Value::None))
        .decorate(TimerLayer::defaults());
    f.call(CallArgs::new()).unwrap();

    assert_histogram_exists("decorum_call_duration_seconds");
    assert_metric_has_label("decorum_call_duration_seconds", "callable", "metrics_timed");
}
