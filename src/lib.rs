//! # serde_ziggy
//!
//! A Serde-compatible serialization library for the Ziggy data format.
//!
//! ## What is Ziggy?
//!
//! Ziggy is a human-oriented data format in the spirit of JSON, with a few
//! additions that make hand-written documents pleasant to work with:
//!
//! - **Structs** with optional names: `Point {.x = 1, .y = 2}`
//! - **Maps** with arbitrary keys: `{"apples": 3, 7: "seven"}`
//! - **Tagged literals** that annotate a value with a name: `date "2024-01-15"`,
//!   `@date("2024-01-15")` or, for enums, `Green 5`
//! - **Byte strings** that may hold any bytes, plus a multiline form whose
//!   lines start with `\\`
//! - **Arbitrary-precision integers**, `//` comments and trailing commas
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_ziggy = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ziggy::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "User {id = 123, name = \"Alice\", active = true}");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Enums as Tagged Literals
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ziggy::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! enum Shape {
//!     Circle(f64),
//!     Rect { w: u32, h: u32 },
//! }
//!
//! assert_eq!(to_string(&Shape::Circle(1.5)).unwrap(), "Circle 1.5");
//! assert_eq!(from_str::<Shape>("@Circle(2)").unwrap(), Shape::Circle(2.0));
//! assert_eq!(from_str::<Shape>("Rect {.w = 3, .h = 4}").unwrap(), Shape::Rect { w: 3, h: 4 });
//! ```
//!
//! ### Dynamic Values with the ziggy! Macro
//!
//! ```rust
//! use serde_ziggy::{ziggy, Value};
//!
//! let data = ziggy!(Person {
//!     .name = "Alice",
//!     .langs = ["rust", "zig"],
//!     .born = date("1990-01-01"),
//! });
//!
//! assert_eq!(data.get("name").and_then(Value::as_str), Some("Alice"));
//! assert_eq!(
//!     data.to_string(),
//!     "Person {name = \"Alice\", langs = [\"rust\", \"zig\"], born = date \"1990-01-01\"}"
//! );
//! ```
//!
//! ## Errors
//!
//! Every error carries an [`ErrorKind`]: lexing and parsing errors report a
//! 1-based line and column, binding errors name the offending field, type or
//! value, and writing errors name what could not be encoded.
//!
//! ```rust
//! use serde_ziggy::{parse, ErrorKind};
//!
//! let err = parse("{.a = 1, .a = 2}").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! assert_eq!(err.to_string(), "Duplicate field `a` at line 1, column 11");
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, the parser and writer emit `trace`
//! level events through the [`tracing`](https://docs.rs/tracing) crate.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Nesting depth is bounded by [`ZiggyOptions::recursion_limit`]
//! - Proper error propagation with `Result` types
//!
//! ## Examples
//!
//! See the `demos/` directory for focused examples:
//!
//! - **`simple.rs`** - Basic serialization and deserialization
//! - **`macro.rs`** - Building values with the ziggy! macro
//! - **`tagged_literals.rs`** - Enums, tags and dates
//! - **`dynamic_values.rs`** - Working with `Value` dynamically
//! - **`custom_options.rs`** - Pretty printing and binding options
//!
//! Run any example with: `cargo run --example <name>`

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($tt:tt)*) => {
        tracing::trace!($($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

pub mod de;
pub mod error;
pub mod fields;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;
pub mod ser;
pub mod tagged;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, ErrorKind, Position, Result};
pub use fields::Fields;
pub use options::ZiggyOptions;
pub use ser::{Serializer, ValueSerializer};
pub use tagged::Tagged;
pub use value::{Struct, Value, DATE_TAG};

use de::ValueDeserializer;
use parser::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parse Ziggy text into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{parse, Value};
///
/// let value = parse("[1, \"two\", null]").unwrap();
/// assert_eq!(value, Value::Array(vec![1.into(), "two".into(), Value::Null]));
/// ```
///
/// # Errors
///
/// Returns a lex or parse error with the line and column where the input
/// stopped being valid Ziggy.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, ZiggyOptions::default())
}

/// Parse Ziggy text into a [`Value`] with custom options.
///
/// Only [`ZiggyOptions::recursion_limit`] affects parsing.
///
/// # Errors
///
/// Returns a lex or parse error, including when nesting exceeds the limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ZiggyOptions) -> Result<Value> {
    Parser::new(input, &options).parse()
}

/// Serialize any `T: Serialize` to a Ziggy string.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "Point {x = 1, y = 2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded (e.g., non-finite floats).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ZiggyOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed Ziggy string.
///
/// Pretty-printing puts every entry on its own line with a trailing comma.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string_pretty(&point).unwrap(), "Point {\n    x = 1,\n    y = 2,\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ZiggyOptions::pretty())
}

/// Serialize any `T: Serialize` to a Ziggy string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{to_string_with_options, ZiggyOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let options = ZiggyOptions::pretty().with_indent(2).with_struct_names(false);
/// assert_eq!(
///     to_string_with_options(&point, options).unwrap(),
///     "{\n  x = 1,\n  y = 2,\n}"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: ZiggyOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Useful for working with Ziggy data dynamically when the structure isn't
/// known at compile time.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_struct());
/// assert_eq!(value.get("x").and_then(Value::as_i64), Some(1));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, ZiggyOptions::default())
}

/// Convert any `T: Serialize` to a [`Value`] with custom options.
///
/// Only [`ZiggyOptions::struct_names`] affects the result.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_options<T>(value: &T, options: ZiggyOptions) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(&options))
}

/// Serialize any `T: Serialize` to a writer in Ziggy format.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2]).unwrap();
/// assert_eq!(buffer, b"[1, 2]");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ZiggyOptions::default())
}

/// Serialize any `T: Serialize` to a writer in Ziggy format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ZiggyOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of Ziggy text.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{.x = 1, .y = 2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid Ziggy or cannot be bound to
/// type `T`. Lex and parse errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, ZiggyOptions::default())
}

/// Deserialize an instance of type `T` from Ziggy text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{from_str_with_options, ZiggyOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let options = ZiggyOptions::new().with_unknown_fields(true);
/// let point: Point = from_str_with_options("{.x = 1, .y = 2, .z = 3}", options).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid Ziggy or cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: ZiggyOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = Deserializer::with_options(s, options);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of Ziggy.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"Point {.x = 1, .y = 2}");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// Ziggy, or the data cannot be bound to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of Ziggy text.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{from_slice, ErrorKind};
///
/// let numbers: Vec<u8> = from_slice(b"[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
///
/// let err = from_slice::<Vec<u8>>(b"[1,\n \xff]").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Lex);
/// assert_eq!(err.to_string(), "Lex error at line 2, column 2: invalid UTF-8");
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid Ziggy,
/// or cannot be bound to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    match std::str::from_utf8(v) {
        Ok(s) => from_str(s),
        Err(e) => {
            let valid = std::str::from_utf8(&v[..e.valid_up_to()]).unwrap_or_default();
            let line = valid.matches('\n').count() + 1;
            let column = valid.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
            Err(Error::lex(Position::new(line, column), "invalid UTF-8"))
        }
    }
}

/// Bind a [`Value`] to type `T`.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{from_value, ziggy};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(ziggy!({ .x = 1, .y = 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a binding error if the value does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value_with_options(value, ZiggyOptions::default())
}

/// Bind a [`Value`] to type `T` with custom options.
///
/// # Errors
///
/// Returns a binding error if the value does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value_with_options<T>(value: Value, options: ZiggyOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::with_options(value, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        bio: String,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            bio: "Likes Rust.\nAnd Zig.".to_string(),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&user()).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let text = to_string_pretty(&user()).unwrap();
        assert!(text.starts_with("User {\n    id = 123,\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let s = value.as_struct().unwrap();
        assert_eq!(s.name.as_deref(), Some("Point"));
        assert_eq!(s.get("x"), Some(&Value::from(1)));
        assert_eq!(s.get("y"), Some(&Value::from(2)));

        let options = ZiggyOptions::new().with_struct_names(false);
        let unnamed = to_value_with_options(&Point { x: 1, y: 2 }, options).unwrap();
        assert_eq!(unnamed.as_struct().unwrap().name, None);
    }

    #[test]
    fn test_from_value() {
        let value = parse("Point {.x = 1, .y = 2}").unwrap();
        assert_eq!(from_value::<Point>(value.clone()).unwrap(), Point { x: 1, y: 2 });
        assert_eq!(from_value::<Value>(value.clone()).unwrap(), value);
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "[1, 2, 3, 4, 5]");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &user(), ZiggyOptions::pretty()).unwrap();
        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, user());
        let back: User = from_slice(&buffer).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_value_from_str_trait() {
        let value: Value = "[true, 1.5]".parse().unwrap();
        assert_eq!(value, Value::Array(vec![true.into(), 1.5.into()]));
    }

    #[test]
    fn test_recursion_limit_option() {
        let options = ZiggyOptions::new().with_recursion_limit(2);
        assert!(parse_with_options("[[1]]", options).is_ok());
        let err = parse_with_options("[[[1]]]", options).unwrap_err();
        assert!(matches!(err, Error::RecursionLimit { limit: 2, .. }));
    }
}
