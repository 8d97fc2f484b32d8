//! Plugin registry through the public API.

use decorum_core::{callable_fn, BoxCallable, CallArgs, Callable, DecorateExt, Value};
use decorum_registry::{PluginRegistry, RegisterLayer};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn reply(name: &'static str, text: &'static str) -> BoxCallable {
    Arc::new(callable_fn(name, "", move |_| Ok(Value::from(text))))
}

#[test]
fn register_returns_the_same_callable() {
    let plugins = PluginRegistry::new();
    let hello = reply("say_hello", "Hello");
    let returned = plugins.register(Arc::clone(&hello));

    assert!(Arc::ptr_eq(&hello, &returned));
    assert!(Arc::ptr_eq(&hello, &plugins.lookup("say_hello").unwrap()));
}

#[test]
fn later_registration_overwrites() {
    let replaced = Arc::new(Mutex::new(Vec::new()));
    let r = Arc::clone(&replaced);
    let plugins = PluginRegistry::builder()
        .on_registered(move |name, was_replaced| {
            r.lock().unwrap().push((name.to_string(), was_replaced));
        })
        .build();

    plugins.register(reply("greet", "Hello"));
    plugins.register(reply("greet", "Howdy"));

    assert_eq!(plugins.len(), 1);
    assert_eq!(
        plugins.lookup("greet").unwrap().call(CallArgs::new()).unwrap(),
        Value::from("Howdy")
    );
    assert_eq!(
        *replaced.lock().unwrap(),
        vec![("greet".to_string(), false), ("greet".to_string(), true)]
    );
}

#[test]
fn missing_names_and_empty_registries_fail() {
    let misses = Arc::new(AtomicUsize::new(0));
    let m = Arc::clone(&misses);
    let plugins = PluginRegistry::builder()
        .on_not_found(move |_| {
            m.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    assert!(plugins.random_entry().err().unwrap().is_empty_registry());
    assert!(plugins.lookup("say_goodbye").err().unwrap().is_not_found());
    assert_eq!(misses.load(Ordering::SeqCst), 1);
}

#[test]
fn register_layer_registers_while_decorating() {
    let plugins = PluginRegistry::with_seed(7);
    let hello = callable_fn("say_hello", "", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("World").to_string();
        Ok(Value::from(format!("Hello {}", name)))
    })
    .decorate(RegisterLayer::new(plugins.clone()));
    let _goodbye = callable_fn("be_awesome", "", |_| Ok(Value::from("Yo, be awesome")))
        .decorate(RegisterLayer::new(plugins.clone()));

    assert_eq!(hello.call(CallArgs::new().arg("Alice")).unwrap(), Value::from("Hello Alice"));
    assert_eq!(plugins.names(), vec!["be_awesome", "say_hello"]);

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let (name, greeter) = plugins.random_entry().unwrap();
        assert_eq!(greeter.name(), name);
        seen.insert(name);
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn registries_are_independent() {
    let a = PluginRegistry::new();
    let b = PluginRegistry::new();
    a.register(reply("only_in_a", ""));

    assert!(a.contains("only_in_a"));
    assert!(!b.contains("only_in_a"));
    assert!(b.is_empty());
}
