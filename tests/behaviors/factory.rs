//! Bare and configured construction.

use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Decorator, Layer, Options, Value};
use decorum_diagnostics::AnnounceLayer;
use decorum_guard::QuietHoursLayer;
use decorum_memoize::MemoizeLayer;
use decorum_ratelimit::SlowDownLayer;
use decorum_repeat::RepeatLayer;
use decorum_retry::RetryLayer;
use decorum_state::CountCallsLayer;
use std::time::Duration;

fn greet() -> impl Callable + Clone {
    callable_fn("greet", "Say hello.", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("World");
        Ok(Value::from(format!("Hello {}", name)))
    })
}

#[test]
fn bare_and_configured_forms_agree() {
    let bare = RepeatLayer::with_defaults(CountCallsLayer::with_defaults(greet()));
    let configured = RepeatLayer::configured(&Options::new().with("times", 2))
        .unwrap()
        .layer(CountCallsLayer::with_defaults(greet()));

    bare.call(CallArgs::new()).unwrap();
    configured.call(CallArgs::new()).unwrap();
    assert_eq!(bare.inner().count(), configured.inner().count());
    assert_eq!(bare.name(), configured.name());
}

#[test]
fn configured_layers_validate_every_option() {
    let invalid = [
        RepeatLayer::configured(&Options::new().with("times", 0)).err(),
        RepeatLayer::configured(&Options::new().with("times", "three")).err(),
        MemoizeLayer::configured(&Options::new().with("capacity", -4)).err(),
        SlowDownLayer::configured(&Options::new().with("rate", 0.0)).err(),
        SlowDownLayer::configured(&Options::new().with("delay", 1).with("rate", 1)).err(),
        RetryLayer::configured(&Options::new().with("max_attempts", 0)).err(),
        QuietHoursLayer::configured(&Options::new().with("start", 20).with("end", 8)).err(),
        AnnounceLayer::configured(&Options::new().with("before", 3)).err(),
    ];

    for err in invalid {
        let err = err.expect("configuration should have been rejected");
        assert!(err.is_invalid_configuration(), "unexpected error: {}", err);
    }
}

#[test]
fn unknown_options_are_rejected() {
    let err = CountCallsLayer::configured(&Options::new().with("tiems", 3))
        .err()
        .unwrap();
    assert!(err.is_invalid_configuration());
}

#[test]
fn configured_values_are_applied() {
    assert_eq!(
        MemoizeLayer::configured(&Options::new().with("capacity", 16))
            .unwrap()
            .capacity(),
        Some(16)
    );
    assert_eq!(
        SlowDownLayer::configured(&Options::new().with("rate", 4.0))
            .unwrap()
            .delay(),
        Duration::from_millis(250)
    );
    assert_eq!(
        RetryLayer::configured(&Options::new().with("max_attempts", 5))
            .unwrap()
            .max_attempts(),
        5
    );

    let thrice = greet().decorate(
        RepeatLayer::configured(&Options::new().with("times", 3)).unwrap(),
    );
    assert_eq!(thrice.call(CallArgs::new().arg("Ada")).unwrap(), Value::from("Hello Ada"));
}

#[test]
fn defaults_need_no_options() {
    assert_eq!(RepeatLayer::defaults().times(), 2);
    assert_eq!(MemoizeLayer::defaults().capacity(), None);
    assert_eq!(SlowDownLayer::defaults().delay(), Duration::from_secs(1));
    assert_eq!(RetryLayer::defaults().max_attempts(), 3);
}
