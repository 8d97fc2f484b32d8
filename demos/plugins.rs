//! Plugin Registry Example
//!
//! Registers a few greeters with a registry and picks one at random.
//!
//! Run with: cargo run --example plugins

use decorum::prelude::*;
use decorum::registry::{PluginRegistry, RegisterLayer};

fn main() -> Result<(), CallError> {
    tracing_subscriber::fmt().with_target(false).init();

    let plugins = PluginRegistry::builder()
        .name("greeters")
        .on_registered(|name, replaced| {
            println!("registered {}{}", name, if replaced { " (replaced)" } else { "" });
        })
        .build();

    let register = RegisterLayer::new(plugins.clone());
    let _hello = callable_fn("say_hello", "", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("World");
        Ok(Value::from(format!("Hello {}", name)))
    })
    .decorate(register.clone());
    let _awesome = callable_fn("be_awesome", "", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("World");
        Ok(Value::from(format!("Yo {}, together we are the awesomest!", name)))
    })
    .decorate(register);

    println!("available: {:?}", plugins.names());

    let (name, greeter) = plugins.random_entry()?;
    println!("Using {:?}", name);
    println!("{}", greeter.call(CallArgs::new().arg("Alice"))?);

    match plugins.lookup("say_goodbye") {
        Ok(_) => println!("unexpected"),
        Err(err) => println!("lookup failed: {}", err),
    }

    Ok(())
}
