//! Using the ziggy! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_ziggy::{to_string_pretty, ziggy, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let null_val = ziggy!(null);
    let bool_val = ziggy!(true);
    let number = ziggy!(42);
    let text = ziggy!("Hello, Ziggy!");

    println!("Primitives:");
    println!("  null:   {}", to_string_pretty(&null_val)?);
    println!("  bool:   {}", to_string_pretty(&bool_val)?);
    println!("  number: {}", to_string_pretty(&number)?);
    println!("  text:   {}\n", to_string_pretty(&text)?);

    let numbers = ziggy!([1, 2, 3, 4, 5]);
    let mixed = ziggy!([1, "two", true, null]);

    println!("Arrays:");
    println!("  Numbers: {}", numbers);
    println!("  Mixed:   {}\n", mixed);

    let user = ziggy!(User {
        .id = 123,
        .name = "Alice",
        .email = @email("alice@example.com"),
        .active = true,
    });

    println!("Structs:");
    println!("{}\n", to_string_pretty(&user)?);

    let config = ziggy!(Config {
        .app = { .name = "MyApp", .version = "1.0.0" },
        .database = {
            .host = "localhost",
            .port = 5432,
            .name = "mydb",
        },
        .limits = { "requests": 100, "uploads": 5 },
        .features = ["auth", "logging", "metrics"],
        .debug = true,
    });

    println!("Nested structures:");
    println!("{}\n", to_string_pretty(&config)?);

    let items = vec![
        ziggy!({ .id = 1, .status = Active(null) }),
        ziggy!({ .id = 2, .status = Pending(null) }),
        ziggy!({ .id = 3, .status = Done(date("2024-01-15")) }),
    ];

    let summary = ziggy!({
        .total = 3,
        .items = items,
    });

    println!("Dynamic construction:");
    println!("{}\n", to_string_pretty(&summary)?);

    if let Some(app) = config.get("app").and_then(Value::as_struct) {
        if let Some(name) = app.get("name").and_then(Value::as_str) {
            println!("Accessing values:");
            println!("  App name: {}", name);
        }
    }

    if let Some(features) = config.get("features").and_then(Value::as_array) {
        println!("  Features: {}", features.len());
    }

    Ok(())
}
