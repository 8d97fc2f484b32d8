//! Decorator Tour
//!
//! Walks through the behaviors one at a time: announce, do-twice, timer,
//! debug, slow-down and call counting, then stacks several of them.
//!
//! Run with: cargo run --example tour

use decorum::diagnostics::{AnnounceLayer, DebugLayer, TimerLayer};
use decorum::prelude::*;
use decorum::ratelimit::SlowDownLayer;
use decorum::repeat::RepeatLayer;
use decorum::state::CountCallsLayer;
use std::time::Duration;

fn main() -> Result<(), CallError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let say_whee = callable_fn("say_whee", "Say whee!", |_| {
        println!("Whee!");
        Ok(Value::None)
    });

    println!("=== announce ===");
    AnnounceLayer::with_defaults(say_whee.clone()).call(CallArgs::new())?;

    println!("\n=== do twice ===");
    let greet = callable_fn("greet", "Greet someone.", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("World");
        println!("Hello {}", name);
        Ok(Value::from(format!("Hi {}", name)))
    });
    let twice = RepeatLayer::with_defaults(greet.clone());
    println!("returned {}", twice.call(CallArgs::new().arg("World"))?);

    println!("\n=== timer ===");
    let waste_some_time = callable_fn("waste_some_time", "", |args: CallArgs| {
        let n = args.get(0).and_then(Value::as_int).unwrap_or(1);
        let total: i64 = (0..n).map(|_| (0..10_000i64).map(|i| i * i).sum::<i64>()).sum();
        Ok(Value::Int(total))
    });
    TimerLayer::with_defaults(waste_some_time).call(CallArgs::new().arg(100))?;

    println!("\n=== debug ===");
    let make_greeting = callable_fn("make_greeting", "", |args: CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or("");
        let age = args.named("age").and_then(Value::as_int);
        Ok(Value::from(match age {
            Some(age) => format!("Whoa {}! {} already, you are growing up!", name, age),
            None => format!("Howdy {}!", name),
        }))
    });
    DebugLayer::with_defaults(make_greeting).call(CallArgs::new().arg("Juan").kwarg("age", 114))?;

    println!("\n=== slow countdown ===");
    let countdown = callable_fn("countdown", "Count down to liftoff.", |args: CallArgs| {
        let from = args.get(0).and_then(Value::as_int).unwrap_or(0);
        if from < 1 {
            println!("Liftoff!");
        } else {
            println!("{}", from);
        }
        Ok(Value::None)
    })
    .decorate(
        SlowDownLayer::builder()
            .delay(Duration::from_millis(200))
            .build()?,
    );
    for n in (0..=3).rev() {
        countdown.call(CallArgs::new().arg(n))?;
    }

    println!("\n=== stacked ===");
    let stacked = greet
        .decorate(CountCallsLayer::defaults())
        .decorate(RepeatLayer::configured(&Options::new().with("times", 3))?)
        .decorate(TimerLayer::defaults());
    stacked.call(CallArgs::new().arg("Ada"))?;
    println!(
        "'{}' ran {} times inside the repeat",
        stacked.name(),
        stacked.inner().inner().count()
    );

    Ok(())
}
