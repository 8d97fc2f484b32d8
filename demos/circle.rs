//! Validated Attributes and Singletons
//!
//! A `Circle` whose radius can never go negative, built through a
//! singleton factory so every caller shares the same unit circle.
//!
//! Run with: cargo run --example circle

use decorum::core::{Instance, NonNegative};
use decorum::prelude::*;
use decorum::state::SingletonLayer;
use std::f64::consts::PI;

#[derive(Debug)]
struct Circle {
    radius: NonNegative,
}

impl Circle {
    fn new(radius: f64) -> Result<Self, CallError> {
        Ok(Self {
            radius: NonNegative::new("radius", radius)?,
        })
    }

    fn area(&self) -> f64 {
        PI * self.radius.get().powi(2)
    }
}

fn main() -> Result<(), CallError> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut circle = Circle::new(5.0)?;
    println!("radius {} has area {:.2}", circle.radius.get(), circle.area());

    circle.radius.set(2.0)?;
    println!("radius {} has area {:.2}", circle.radius.get(), circle.area());

    if let Err(err) = circle.radius.set(-1.0) {
        println!("rejected: {}", err);
    }
    println!("radius is still {}", circle.radius.get());

    let unit_circle = callable_fn("unit_circle", "The shared unit circle.", |_| {
        Ok(Value::object(Circle::new(1.0)?))
    })
    .decorate(SingletonLayer::defaults());

    let first = unit_circle.call(CallArgs::new())?;
    let second = unit_circle.call(CallArgs::new().arg(42))?;
    let same = match (first.as_instance(), second.as_instance()) {
        (Some(a), Some(b)) => Instance::ptr_eq(a, b),
        _ => false,
    };
    println!("same instance: {}", same);

    if let Some(circle) = first.as_instance().and_then(|i| i.downcast_ref::<Circle>()) {
        println!("unit circle area {:.4}", circle.area());
    }

    Ok(())
}
