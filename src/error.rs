//! Error types for Ziggy reading, binding and writing.
//!
//! Every failure is reported through a single [`Error`] enum. Its variants fall
//! into five categories, exposed through [`Error::kind`]:
//!
//! - **Lex**: a malformed token (unterminated byte string, bad escape, bad numeral)
//! - **Parse**: a grammar violation (unexpected token, duplicate struct field)
//! - **Binding**: a parsed value does not fit the requested Rust type
//! - **Write**: a value cannot be represented as Ziggy text
//! - **Io**: reading or writing the underlying stream failed
//!
//! Lex and parse errors carry the [`Position`] of the offending token.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ziggy::{parse, ErrorKind};
//!
//! let err = parse("[1, 2").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// A 1-based line and column in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The broad category an [`Error`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Parse,
    Binding,
    Write,
    Io,
}

/// Represents all possible errors that can occur while reading, binding or writing Ziggy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed token
    #[error("Lex error at {position}: {msg}")]
    Lex { position: Position, msg: String },

    /// Unexpected token
    #[error("Syntax error at {position}: expected {expected}, found {found}")]
    Syntax {
        position: Position,
        expected: String,
        found: String,
    },

    /// A struct literal names the same field twice
    #[error("Duplicate field `{field}` at {position}")]
    DuplicateField { position: Position, field: String },

    /// Nesting deeper than the configured recursion limit
    #[error("Recursion limit of {limit} exceeded at {position}")]
    RecursionLimit { position: Position, limit: usize },

    #[error("Missing field `{0}`")]
    MissingField(String),

    #[error("Unknown field `{field}`, expected {expected}")]
    UnknownField { field: String, expected: String },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Unknown variant `{variant}`, expected {expected}")]
    UnknownVariant { variant: String, expected: String },

    /// A named struct literal was bound to a record of another name
    #[error("Expected struct `{expected}`, found struct `{found}`")]
    StructName { expected: String, found: String },

    #[error("Integer {value} is out of range for {target}")]
    OutOfRange { value: String, target: String },

    #[error("Invalid length {len}, expected {expected}")]
    InvalidLength { len: usize, expected: String },

    /// Binding error raised by a `Deserialize` implementation
    #[error("{0}")]
    Bind(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A value that has no Ziggy text representation
    #[error("Cannot encode {0}")]
    Unencodable(String),

    /// Serialization error raised by a `Serialize` implementation
    #[error("{0}")]
    Write(String),
}

impl Error {
    /// Creates a lexical error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{Error, ErrorKind, Position};
    ///
    /// let err = Error::lex(Position::new(3, 7), "unterminated byte string");
    /// assert_eq!(err.kind(), ErrorKind::Lex);
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn lex(position: Position, msg: impl Into<String>) -> Self {
        Error::Lex {
            position,
            msg: msg.into(),
        }
    }

    /// Creates a syntax error describing what the parser expected and what it found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{Error, Position};
    ///
    /// let err = Error::syntax(Position::new(1, 4), "`]`", "`}`");
    /// assert!(err.to_string().contains("expected `]`, found `}`"));
    /// ```
    pub fn syntax(position: Position, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn duplicate_field(position: Position, field: &str) -> Self {
        Error::DuplicateField {
            position,
            field: field.to_string(),
        }
    }

    pub fn recursion_limit(position: Position, limit: usize) -> Self {
        Error::RecursionLimit { position, limit }
    }

    /// Creates a type mismatch error when binding fails due to incompatible kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::Error;
    ///
    /// let err = Error::type_mismatch("integer", "bytes");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn out_of_range(value: impl fmt::Display, target: &str) -> Self {
        Error::OutOfRange {
            value: value.to_string(),
            target: target.to_string(),
        }
    }

    pub fn struct_name(expected: &str, found: &str) -> Self {
        Error::StructName {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for types that cannot be serialized to Ziggy.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an error for a value the writer cannot represent as text.
    pub fn unencodable(msg: impl Into<String>) -> Self {
        Error::Unencodable(msg.into())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{from_str, parse, ErrorKind};
    ///
    /// assert_eq!(parse("\"open").unwrap_err().kind(), ErrorKind::Lex);
    /// assert_eq!(parse("{a = 1, a = 2}").unwrap_err().kind(), ErrorKind::Parse);
    /// assert_eq!(from_str::<bool>("1").unwrap_err().kind(), ErrorKind::Binding);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Lex { .. } => ErrorKind::Lex,
            Error::Syntax { .. } | Error::DuplicateField { .. } | Error::RecursionLimit { .. } => {
                ErrorKind::Parse
            }
            Error::MissingField(_)
            | Error::UnknownField { .. }
            | Error::TypeMismatch { .. }
            | Error::UnknownVariant { .. }
            | Error::StructName { .. }
            | Error::OutOfRange { .. }
            | Error::InvalidLength { .. }
            | Error::Bind(_) => ErrorKind::Binding,
            Error::UnsupportedType(_) | Error::Unencodable(_) | Error::Write(_) => ErrorKind::Write,
        }
    }

    /// Returns the source position for lex and parse errors.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex { position, .. }
            | Error::Syntax { position, .. }
            | Error::DuplicateField { position, .. }
            | Error::RecursionLimit { position, .. } => Some(*position),
            _ => None,
        }
    }
}

fn one_of(names: &'static [&'static str]) -> String {
    match names {
        [] => "nothing".to_string(),
        [only] => format!("`{}`", only),
        _ => {
            let quoted: Vec<_> = names.iter().map(|n| format!("`{}`", n)).collect();
            format!("one of {}", quoted.join(", "))
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Write(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Bind(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(exp.to_string(), unexp.to_string())
    }

    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(exp.to_string(), unexp.to_string())
    }

    fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidLength {
            len,
            expected: exp.to_string(),
        }
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Error::UnknownVariant {
            variant: variant.to_string(),
            expected: one_of(expected),
        }
    }

    fn unknown_field(field: &str, expected: &'static [&'static str]) -> Self {
        Error::UnknownField {
            field: field.to_string(),
            expected: one_of(expected),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingField(field.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::lex(Position::new(1, 1), "x").kind(), ErrorKind::Lex);
        assert_eq!(
            Error::duplicate_field(Position::new(1, 1), "a").kind(),
            ErrorKind::Parse
        );
        assert_eq!(Error::missing_field("y").kind(), ErrorKind::Binding);
        assert_eq!(Error::unencodable("NaN").kind(), ErrorKind::Write);
        assert_eq!(Error::io("closed").kind(), ErrorKind::Io);
    }

    #[test]
    fn test_position_only_for_source_errors() {
        let pos = Position::new(2, 5);
        assert_eq!(Error::syntax(pos, "`:`", "`=`").position(), Some(pos));
        assert_eq!(Error::type_mismatch("bool", "integer").position(), None);
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = Error::unknown_variant("Blue", &["Red", "Green"]);
        assert_eq!(
            err.to_string(),
            "Unknown variant `Blue`, expected one of `Red`, `Green`"
        );
    }
}
