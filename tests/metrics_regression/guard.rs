//! Login guard metrics regression tests

use super::helpers::*;
use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
use decorum_guard::LoginRequiredLayer;
use serial_test::serial;

#[test]
#[serial]
fn login_required_metrics_exist() {
    init_recorder();

    let f = callable_fn("metrics_secret", "", |_| Ok(Value::None)).decorate(
        LoginRequiredLayer::builder()
            .authenticator(|args: &CallArgs| args.named("user").is_some())
            .build()
            .unwrap(),
    );
    f.call(CallArgs::new()).unwrap();
    f.call(CallArgs::new().kwarg("user", "ada")).unwrap();

    assert_counter_exists("login_required_calls_total");
    assert_metric_has_label("login_required_calls_total", "callable", "metrics_secret");
    assert_metric_has_label("login_required_calls_total", "result", "redirected");
    assert_metric_has_label("login_required_calls_total", "result", "admitted");
}
