//! Singleton construction through the public API.

use decorum_core::{callable_fn, CallArgs, CallError, Callable, DecorateExt, Decorator, Value};
use decorum_state::{CountCallsLayer, SingletonLayer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

#[derive(Debug)]
struct TheOne {
    seed: i64,
}

fn the_one() -> impl Callable + Clone {
    callable_fn("TheOne", "The one and only.", |args: CallArgs| {
        let seed = args.get(0).and_then(Value::as_int).unwrap_or(0);
        Ok(Value::object(TheOne { seed }))
    })
}

#[test]
fn every_call_returns_the_first_instance() {
    let make = the_one()
        .decorate(CountCallsLayer::defaults())
        .decorate(SingletonLayer::defaults());

    let first = make.call(CallArgs::new().arg(1)).unwrap();
    let second = make.call(CallArgs::new().arg(2)).unwrap();

    let a = first.as_instance().unwrap();
    let b = second.as_instance().unwrap();
    assert!(a.ptr_eq(b));
    assert_eq!(a.downcast_ref::<TheOne>().unwrap().seed, 1);
    assert_eq!(make.inner().count(), 1);
}

#[test]
fn reuse_reports_ignored_arguments() {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let r = Arc::clone(&reports);
    let make = the_one().decorate(
        SingletonLayer::builder()
            .on_reused(move |_, args_differ| r.lock().unwrap().push(args_differ))
            .build(),
    );

    make.call(CallArgs::new().arg(1)).unwrap();
    make.call(CallArgs::new().arg(1)).unwrap();
    make.call(CallArgs::new().arg(9)).unwrap();
    assert_eq!(*reports.lock().unwrap(), vec![false, true]);
}

#[test]
fn failed_construction_can_be_retried() {
    let fail = Arc::new(AtomicBool::new(true));
    let f = Arc::clone(&fail);
    let make = callable_fn("Connection", "", move |_| {
        if f.load(Ordering::SeqCst) {
            Err(CallError::application("Connection", "refused"))
        } else {
            Ok(Value::object(TheOne { seed: 0 }))
        }
    })
    .decorate(SingletonLayer::defaults());

    assert!(make.call(CallArgs::new()).is_err());
    assert!(make.instance().is_none());

    fail.store(false, Ordering::SeqCst);
    let built = make.call(CallArgs::new()).unwrap();
    assert_eq!(make.instance(), Some(built));
}

#[test]
fn concurrent_first_calls_construct_once() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&constructed);
    let make = callable_fn("Pool", "", move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(Value::object(TheOne { seed: 0 }))
    })
    .decorate(SingletonLayer::defaults());

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let make = make.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                make.call(CallArgs::new()).unwrap()
            })
        })
        .collect();

    let instances: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn separate_layers_build_separate_instances() {
    let layer = SingletonLayer::defaults();
    let a = the_one().decorate(layer.clone());
    let b = the_one().decorate(layer);

    assert_ne!(a.call(CallArgs::new()).unwrap(), b.call(CallArgs::new()).unwrap());
}
