//! Repeat metrics regression tests

use super::helpers::*;
use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
use decorum_repeat::RepeatLayer;
use serial_test::serial;

#[test]
#[serial]
fn repeat_metrics_exist() {
    init_recorder();

    let f = callable_fn("metrics_repeat", "", |_| Ok(Value::None))
        .decorate(RepeatLayer::builder().times(3).build().unwrap());
    f.call(CallArgs::new()).unwrap();

    assert_counter_exists("repeat_runs_total");
    assert_metric_has_label("repeat_runs_total", "callable", "metrics_repeat");
}
