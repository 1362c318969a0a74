//! Basic Ziggy serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ziggy::{from_str, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    bio: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            bio: Some("Writes compilers.\nClimbs on weekends.".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            bio: None,
        },
    ];

    // Serialize to Ziggy
    let compact = to_string(&users)?;
    println!("Compact output:\n{}\n", compact);

    let pretty = to_string_pretty(&users)?;
    println!("Pretty output:\n{}\n", pretty);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&pretty)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
