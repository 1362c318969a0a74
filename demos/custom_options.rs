//! Customizing reading and writing with ZiggyOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_ziggy::{from_str, from_str_with_options, to_string_with_options, ZiggyOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    ports: Vec<u16>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Endpoint {
    host: String,
    port: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        ports: vec![80, 443],
    };

    // Default format (compact, struct names included)
    println!("Default (compact):");
    let default = serde_ziggy::to_string(&config)?;
    println!("{}\n", default);

    // One entry per line
    println!("Pretty:");
    let pretty = to_string_with_options(&config, ZiggyOptions::pretty())?;
    println!("{}\n", pretty);

    // Narrower indentation
    println!("Pretty, 2-space indent:");
    let narrow = to_string_with_options(&config, ZiggyOptions::pretty().with_indent(2))?;
    println!("{}\n", narrow);

    println!("Pretty, tab indent:");
    let tabbed = to_string_with_options(&config, ZiggyOptions::pretty().with_tabs(true))?;
    println!("{}\n", tabbed);

    // Anonymous structs
    println!("Without struct names:");
    let anonymous = ZiggyOptions::new().with_struct_names(false);
    println!("{}\n", to_string_with_options(&config, anonymous)?);

    // Tolerate fields the target type does not know
    let input = r#"Endpoint {.host = "db.internal", .port = 5432, .comment = "primary"}"#;
    match from_str::<Endpoint>(input) {
        Ok(_) => println!("Strict reading accepted unknown field"),
        Err(e) => println!("Strict reading: {}", e),
    }
    let lenient = ZiggyOptions::new().with_unknown_fields(true);
    let endpoint: Endpoint = from_str_with_options(input, lenient)?;
    println!("Lenient reading: {:?}\n", endpoint);

    // Guard against deeply nested input
    let shallow = ZiggyOptions::new().with_recursion_limit(2);
    match from_str_with_options::<Vec<Vec<Vec<u8>>>>("[[[1]]]", shallow) {
        Ok(_) => println!("Nested input accepted"),
        Err(e) => println!("Recursion limit: {}", e),
    }

    Ok(())
}
