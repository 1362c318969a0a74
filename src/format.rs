//! Ziggy Format Reference
//!
//! This module documents the Ziggy text format as implemented by this library.
//!
//! # Overview
//!
//! A Ziggy document is exactly one value. Whitespace (including newlines) is
//! insignificant between tokens and `//` starts a comment that runs to the end
//! of the line.
//!
//! ```text
//! // A named struct with every kind of value
//! Server {
//!     .name = "edge-1",
//!     .ports = [80, 443],
//!     .weights = {"eu": 0.7, "us": 0.3},
//!     .started = @date("2024-01-15T10:30:00Z"),
//!     .mode = Active null,
//!     .motd =
//!         \\ Welcome!
//!         \\ Be nice.
//!     ,
//! }
//! ```
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `null` |
//! | Boolean | `true` or `false` | `true` |
//! | Integer | Decimal digits, optional `-`, `_` between digits | `-1_000` |
//! | Float | Integer part, `.`, fractional digits | `19.99` |
//! | Bytes | Quoted or multiline | `"hello"` |
//!
//! Integers have arbitrary precision. Exponents and non-decimal bases are not
//! supported, and a numeral directly followed by a letter, `_` or `.` is a
//! lexical error (`1x`, `1.`, `1.2.3`).
//!
//! ## Byte Strings
//!
//! Quoted byte strings are delimited by `"` and may not contain a raw newline.
//! Supported escapes:
//!
//! | Escape | Byte(s) |
//! |--------|---------|
//! | `\"` `\'` `\\` | the quote or backslash itself |
//! | `\n` `\r` `\t` `\0` | newline, carriage return, tab, NUL |
//! | `\xHH` | one arbitrary byte |
//! | `\u{H..}` | the UTF-8 encoding of a code point (1 to 6 hex digits) |
//!
//! A multiline byte string is a run of consecutive lines that each start with
//! `\\` (after indentation). The prefix and one following space are stripped,
//! and the lines are joined with `\n`:
//!
//! ```text
//! \\ first line
//! \\
//! \\ third line
//! ```
//!
//! reads as `"first line\n\nthird line"`. Both forms produce the same bytes.
//!
//! # Compound Values
//!
//! ## Arrays
//!
//! ```text
//! [1, "two", [3.0], null,]
//! ```
//!
//! A trailing comma is allowed in every list form.
//!
//! ## Maps
//!
//! Map keys may be any value; entries keep their source order and duplicate
//! keys are kept as written.
//!
//! ```text
//! {"apples": 3, 7: "seven", [1, 2]: true}
//! ```
//!
//! `{}` is an empty map.
//!
//! ## Structs
//!
//! Fields are `name = value`; the leading `.` is optional. A struct may be
//! preceded by its name. Field names are unique within a struct literal.
//!
//! ```text
//! {.x = 1, .y = 2}
//! Point {x = 1, y = 2}
//! Empty {}
//! ```
//!
//! The first entry decides between map and struct: `.` or `identifier =`
//! starts a struct, anything else a map. `Name {}` is an empty named struct and
//! `Name {"k": v}` is the map tagged with `Name`.
//!
//! # Tagged Literals
//!
//! A tag is an identifier in front of a value. Three spellings are accepted:
//!
//! ```text
//! date "2024-01-15"
//! date("2024-01-15")
//! @date("2024-01-15")
//! ```
//!
//! A tag binds to the single value that follows it, so `outer inner 1` is
//! `outer` wrapping `inner` wrapping `1`.
//!
//! # Writer Output
//!
//! The writer emits one canonical form per value:
//!
//! - floats always carry a `.` (`1.0`); NaN and infinities cannot be encoded
//! - byte strings are quoted unless they contain a newline, in which case the
//!   multiline form is used; bytes that are not UTF-8 are written as `\xHH`
//! - struct fields are written without the leading `.`
//! - tags wrapping a map or an unnamed struct use the `name(...)` form, all
//!   others `name value`
//! - enum variants become tags; a unit variant is the tag wrapping `null`
//!
//! Compact output separates entries with `, `. Pretty output puts every entry
//! on its own line, indented by [`ZiggyOptions::indent`](crate::ZiggyOptions)
//! spaces per level, with a trailing comma.
//!
//! # Limits
//!
//! Nesting of arrays, braces and tags is limited by
//! [`ZiggyOptions::recursion_limit`](crate::ZiggyOptions) (128 by default).
//! Schema files, top-level structs without braces, custom literal parsers and
//! a minified output mode are not supported.
