//! Memoization through the public API.

use decorum_core::{callable_fn, CallArgs, CallError, Callable, DecorateExt, Decorator, Value};
use decorum_memoize::MemoizeLayer;
use decorum_state::CountCallsLayer;
use std::sync::{Arc, OnceLock};
use std::thread;

fn square() -> impl Callable + Clone {
    callable_fn("square", "Square a number.", |args: CallArgs| {
        let n = args.get(0).and_then(Value::as_int).unwrap_or(0);
        Ok(Value::Int(n * n))
    })
}

#[test]
fn lru_evicts_least_recently_used() {
    let f = square()
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::builder().capacity(2).build().unwrap());

    f.call(CallArgs::new().arg(1)).unwrap();
    f.call(CallArgs::new().arg(2)).unwrap();
    // Touch 1 so that 2 becomes the eviction candidate.
    f.call(CallArgs::new().arg(1)).unwrap();
    f.call(CallArgs::new().arg(3)).unwrap();

    assert_eq!(f.len(), 2);
    assert!(f.contains(&CallArgs::new().arg(1)));
    assert!(!f.contains(&CallArgs::new().arg(2)));
    assert!(f.contains(&CallArgs::new().arg(3)));
    assert_eq!(f.inner().count(), 3);

    f.call(CallArgs::new().arg(2)).unwrap();
    assert_eq!(f.inner().count(), 4);
}

#[test]
fn k_plus_one_distinct_calls_evict_exactly_one() {
    let k = 5;
    let f = square()
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::builder().capacity(k).build().unwrap());

    for n in 0..=k as i64 {
        f.call(CallArgs::new().arg(n)).unwrap();
    }
    assert_eq!(f.len(), k);
    assert!(!f.contains(&CallArgs::new().arg(0)));

    // Everything but the evicted entry is still served from the table.
    for n in 1..=k as i64 {
        f.call(CallArgs::new().arg(n)).unwrap();
    }
    assert_eq!(f.inner().count(), k as u64 + 1);
}

#[test]
fn equal_numbers_share_an_entry() {
    let f = square()
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults());

    f.call(CallArgs::new().arg(3)).unwrap();
    f.call(CallArgs::new().arg(3.0)).unwrap();
    assert_eq!(f.inner().count(), 1);
}

#[test]
fn tuples_are_hashable_lists_are_not() {
    let f = callable_fn("first", "", |args: CallArgs| Ok(args.get(0).cloned().unwrap_or_default()))
        .decorate(MemoizeLayer::defaults());

    let tuple = Value::Tuple(vec![1.into(), "a".into()]);
    assert_eq!(f.call(CallArgs::new().arg(tuple.clone())).unwrap(), tuple);
    assert!(f.contains(&CallArgs::new().arg(tuple)));

    let map = Value::Map(vec![("k".to_string(), 1.into())]);
    assert_eq!(
        f.call(CallArgs::new().kwarg("opts", map)).unwrap_err(),
        CallError::UnhashableArgument { kind: "map" }
    );
}

#[test]
fn separate_layers_keep_separate_tables() {
    let layer = MemoizeLayer::defaults();
    let a = square().decorate(CountCallsLayer::defaults()).decorate(layer.clone());
    let b = square().decorate(CountCallsLayer::defaults()).decorate(layer);

    a.call(CallArgs::new().arg(4)).unwrap();
    b.call(CallArgs::new().arg(4)).unwrap();
    assert_eq!(a.inner().count(), 1);
    assert_eq!(b.inner().count(), 1);
}

#[test]
fn clones_share_the_table_across_threads() {
    let f = square()
        .decorate(CountCallsLayer::defaults())
        .decorate(MemoizeLayer::defaults());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let f = f.clone();
            thread::spawn(move || {
                for n in 0..10 {
                    f.call(CallArgs::new().arg(n)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(f.len(), 10);
    // Concurrent first calls for one key may each compute it.
    assert!(f.inner().count() >= 10);
    assert!(f.inner().count() <= 40);
}

#[test]
fn recursive_fibonacci_computes_each_term_once() {
    // The memoized handle is installed after construction so the function
    // can recurse through it.
    let handle: Arc<OnceLock<decorum_core::BoxCallable>> = Arc::new(OnceLock::new());
    let inner_handle = Arc::clone(&handle);

    let fibonacci = callable_fn("fibonacci", "", move |args: CallArgs| {
        let n = args.get(0).and_then(Value::as_int).unwrap_or(0);
        if n < 2 {
            return Ok(Value::Int(n));
        }
        let me = inner_handle.get().expect("handle installed");
        let a = me.call(CallArgs::new().arg(n - 1))?.as_int().unwrap_or(0);
        let b = me.call(CallArgs::new().arg(n - 2))?.as_int().unwrap_or(0);
        Ok(Value::Int(a + b))
    })
    .decorate(CountCallsLayer::defaults())
    .decorate(MemoizeLayer::defaults());

    let _ = handle.set(Arc::new(fibonacci.clone()));

    assert_eq!(
        fibonacci.call(CallArgs::new().arg(30)).unwrap(),
        Value::Int(832_040)
    );
    assert_eq!(fibonacci.inner().count(), 31);
}
