//! Event listener behavior across decorators.

use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
use decorum_diagnostics::{AnnounceLayer, TimerLayer};
use decorum_memoize::MemoizeLayer;
use decorum_ratelimit::SlowDownLayer;
use decorum_state::CountCallsLayer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn panicking_listener_does_not_break_the_call() {
    let after = Arc::new(AtomicUsize::new(0));
    let a = Arc::clone(&after);
    let f = callable_fn("tick", "", |_| Ok(Value::Int(1))).decorate(
        CountCallsLayer::builder()
            .on_call(|_, _| panic!("listener bug"))
            .on_call(move |_, _| {
                a.fetch_add(1, Ordering::SeqCst);
            })
            .build(),
    );

    assert_eq!(f.call(CallArgs::new()).unwrap(), Value::Int(1));
    assert_eq!(f.count(), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[test]
fn listeners_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (o1, o2) = (Arc::clone(&order), Arc::clone(&order));
    let f = callable_fn("tick", "", |_| Ok(Value::None)).decorate(
        MemoizeLayer::builder()
            .on_miss(move |_| o1.lock().unwrap().push("first"))
            .on_miss(move |_| o2.lock().unwrap().push("second"))
            .build()
            .unwrap(),
    );

    f.call(CallArgs::new()).unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn memo_hooks_report_hits_misses_and_evictions() {
    let hits = Arc::new(AtomicUsize::new(0));
    let misses = Arc::new(AtomicUsize::new(0));
    let evictions = Arc::new(AtomicUsize::new(0));
    let (h, m, e) = (Arc::clone(&hits), Arc::clone(&misses), Arc::clone(&evictions));

    let f = callable_fn("id", "", |args: CallArgs| Ok(args.get(0).cloned().unwrap_or_default()))
        .decorate(
            MemoizeLayer::builder()
                .capacity(2)
                .on_hit(move |_| {
                    h.fetch_add(1, Ordering::SeqCst);
                })
                .on_miss(move |_| {
                    m.fetch_add(1, Ordering::SeqCst);
                })
                .on_eviction(move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                })
                .build()
                .unwrap(),
        );

    for n in [1, 2, 1, 3, 4] {
        f.call(CallArgs::new().arg(n)).unwrap();
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(misses.load(Ordering::SeqCst), 4);
    assert_eq!(evictions.load(Ordering::SeqCst), 2);
}

#[test]
fn timer_and_slow_down_report_durations() {
    let measured = Arc::new(Mutex::new(None));
    let delayed = Arc::new(Mutex::new(None));
    let (m, d) = (Arc::clone(&measured), Arc::clone(&delayed));

    let f = callable_fn("nap", "", |_| Ok(Value::None))
        .decorate(
            SlowDownLayer::builder()
                .delay(Duration::from_millis(5))
                .on_delayed(move |delay| *d.lock().unwrap() = Some(delay))
                .build()
                .unwrap(),
        )
        .decorate(
            TimerLayer::builder()
                .on_finished(move |_, elapsed| *m.lock().unwrap() = Some(elapsed))
                .build(),
        );

    f.call(CallArgs::new()).unwrap();
    assert_eq!(*delayed.lock().unwrap(), Some(Duration::from_millis(5)));
    assert!(measured.lock().unwrap().unwrap() >= Duration::from_millis(5));
}

#[test]
fn announce_wraps_the_call_with_messages() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let (before, after, body) = (Arc::clone(&lines), Arc::clone(&lines), Arc::clone(&lines));

    let f = callable_fn("say_whee", "", move |_| {
        body.lock().unwrap().push("Whee!".to_string());
        Ok(Value::None)
    })
    .decorate(
        AnnounceLayer::builder()
            .on_before(move |message| before.lock().unwrap().push(message.to_string()))
            .on_after(move |message| after.lock().unwrap().push(message.to_string()))
            .build(),
    );

    f.call(CallArgs::new()).unwrap();
    assert_eq!(
        *lines.lock().unwrap(),
        vec![
            "Something is happening before the function is called.",
            "Whee!",
            "Something is happening after the function is called.",
        ]
    );
}
