//! Enums, tagged literals and dates.
//!
//! Run with: cargo run --example tagged_literals

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_ziggy::{from_str, parse, to_string, to_string_pretty, Tagged, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Command {
    ClearChat,
    Say(String),
    Move(i32, i32),
    Kick { user: String, reason: String },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Message {
    #[serde(with = "serde_ziggy::tagged::date")]
    sent: DateTime<Utc>,
    // Plain chrono field: written as an untagged string
    edited: Option<DateTime<Utc>>,
    author: Tagged<String>,
    command: Command,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Every enum shape becomes a tagged literal
    let commands = vec![
        Command::ClearChat,
        Command::Say("hello".to_string()),
        Command::Move(3, -1),
        Command::Kick {
            user: "mallory".to_string(),
            reason: "spam".to_string(),
        },
    ];
    println!("Enums:");
    for command in &commands {
        println!("  {}", to_string(command)?);
    }
    println!();

    let message = Message {
        sent: Utc.with_ymd_and_hms(2024, 3, 10, 15, 39, 28).single().ok_or("bad date")?,
        edited: None,
        author: Tagged::new("email", "alice@example.com".to_string()),
        command: Command::Say("hi all".to_string()),
    };
    let text = to_string_pretty(&message)?;
    println!("Message:\n{}\n", text);

    let back: Message = from_str(&text)?;
    assert_eq!(message, back);
    println!("✓ Round-trip successful\n");

    // Both spellings of a tag read the same
    let bare = parse(r#"date "2024-01-15T00:00:00Z""#)?;
    let call = parse(r#"@date("2024-01-15T00:00:00Z")"#)?;
    assert_eq!(bare, call);
    println!("Tag {:?} holds {:?}", bare.as_tag().map(|(t, _)| t), bare.as_date());

    // Tags are transparent to ordinary fields
    let plain: String = from_str(r#"uuid "5a1f""#)?;
    println!("Untagged read: {}", plain);

    let kept: Tagged<String> = from_str(r#"uuid "5a1f""#)?;
    println!("Tagged read:   {} {:?}", kept.tag, kept.value);

    let env = Value::tag("env", Value::Map(vec![(Value::from("HOME"), Value::from("/root"))]));
    println!("Tagged map:    {}", env);

    Ok(())
}
