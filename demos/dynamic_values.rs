//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_ziggy::{from_value, parse, to_string_pretty, to_value, Struct, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

const DOCUMENT: &str = r#"
// Service description, read without a schema
Service {
    .host = "localhost",
    .port = 8080,
    .features = ["auth", "logging", "metrics"],
    .owner = email "ops@example.com",
    .motd =
        \\Welcome aboard.
        \\Mind the gap.
    ,
    .quotas = {"eu": 10, "us": 20},
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let service = parse(DOCUMENT)?;
    println!("Parsed document:\n{}\n", to_string_pretty(&service)?);

    // Access values dynamically
    if let Some(record) = service.as_struct() {
        println!("Struct name: {:?}", record.name);
        println!("Field order: {:?}", record.fields.keys().collect::<Vec<_>>());
    }

    if let Some(host) = service.get("host").and_then(Value::as_str) {
        println!("Accessing field 'host': {}", host);
    }

    if let Some(port) = service.get("port").and_then(Value::as_i64) {
        println!("Accessing field 'port': {}", port);
    }

    if let Some((tag, inner)) = service.get("owner").and_then(Value::as_tag) {
        println!("Accessing field 'owner': {} tagged {}", inner, tag);
    }

    if let Some(motd) = service.get("motd").and_then(Value::as_str) {
        println!("Accessing field 'motd': {:?}", motd);
    }

    if let Some(eu) = service.get("quotas").and_then(|q| q.get("eu")) {
        println!("Accessing map key 'eu': {}\n", eu);
    }

    // Convert existing struct to Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}\n", to_string_pretty(&user_value)?);

    // Runtime type checking
    println!("Type checks:");
    println!("  kind:      {}", user_value.kind_name());
    println!("  is_struct: {}", user_value.is_struct());
    println!("  is_map:    {}", user_value.is_map());
    println!("  is_array:  {}\n", user_value.is_array());

    // Build a Value by hand and bind it to a type
    let built = Value::Struct(
        Struct::named("User")
            .with_field("id", 7)
            .with_field("name", "Bob")
            .with_field("roles", Value::Array(vec![Value::from("viewer")])),
    );
    let bob: User = from_value(built)?;
    println!("Bound from Value: {:?}", bob);

    Ok(())
}
