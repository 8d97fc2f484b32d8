//! Memoize metrics regression tests

use super::helpers::*;
use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
use decorum_memoize::MemoizeLayer;
use serial_test::serial;

#[test]
#[serial]
fn memoize_metrics_exist() {
    init_recorder();

    let f = callable_fn("metrics_memo", "", |args: CallArgs| {
        Ok(args.get(0).cloned().unwrap_or(Value::None))
    })
    .decorate(MemoizeLayer::builder().capacity(1).build().unwrap());

    f.call(CallArgs::new().arg(1)).unwrap(); // miss
    f.call(CallArgs::new().arg(1)).unwrap(); // hit
    f.call(CallArgs::new().arg(2)).unwrap(); // miss + eviction

    assert_counter_exists("memoize_requests_total");
    assert_metric_has_label("memoize_requests_total", "callable", "metrics_memo");
    assert_metric_has_label("memoize_requests_total", "result", "hit");
    assert_metric_has_label("memoize_requests_total", "result", "miss");

    assert_counter_exists("memoize_evictions_total");
    assert_metric_has_label("memoize_evictions_total", "callable", "metrics_memo");

    assert_gauge_exists("memoize_size");
    assert_metric_has_label("memoize_size", "callable", "metrics_memo");
}
