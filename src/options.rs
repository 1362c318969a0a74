//! Configuration options for Ziggy reading and writing.
//!
//! [`ZiggyOptions`] controls both directions:
//!
//! - writer layout (compact or pretty, indentation width or tabs)
//! - whether records are written with their type name (`Point { x = 1 }`)
//! - whether binding rejects struct fields the target type does not declare
//! - how deeply nested a document may be
//!
//! ## Examples
//!
//! ```rust
//! use serde_ziggy::{to_string_with_options, ZiggyOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let options = ZiggyOptions::new().with_struct_names(false);
//! let text = to_string_with_options(&Point { x: 1, y: 2 }, options).unwrap();
//! assert_eq!(text, "{x = 1, y = 2}");
//! ```

/// Configuration options for Ziggy serialization and deserialization.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::ZiggyOptions;
///
/// // Default compact options
/// let options = ZiggyOptions::new();
///
/// // Pretty-printed with 4-space indentation
/// let options = ZiggyOptions::pretty();
///
/// // Custom configuration
/// let options = ZiggyOptions::pretty()
///     .with_indent(2)
///     .with_unknown_fields(true)
///     .with_recursion_limit(64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZiggyOptions {
    pub indent: usize,
    pub use_tabs: bool,
    pub pretty: bool,
    pub struct_names: bool,
    pub allow_unknown_fields: bool,
    pub recursion_limit: usize,
}

impl Default for ZiggyOptions {
    fn default() -> Self {
        ZiggyOptions {
            indent: 4,
            use_tabs: false,
            pretty: false,
            struct_names: true,
            allow_unknown_fields: false,
            recursion_limit: 128,
        }
    }
}

impl ZiggyOptions {
    /// Creates default options (compact layout, named structs, strict fields).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::ZiggyOptions;
    ///
    /// let options = ZiggyOptions::new();
    /// assert_eq!(options.indent, 4);
    /// assert!(!options.pretty);
    /// assert!(options.struct_names);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with one entry per line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::ZiggyOptions;
    ///
    /// let options = ZiggyOptions::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        ZiggyOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Default is 4. Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Indents pretty output with one tab per level instead of spaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{to_string_with_options, ZiggyOptions};
    ///
    /// let options = ZiggyOptions::pretty().with_tabs(true);
    /// let text = to_string_with_options(&vec![[1]], options).unwrap();
    /// assert_eq!(text, "[\n\t[\n\t\t1,\n\t],\n]");
    /// ```
    #[must_use]
    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    /// Controls whether records are written with their type name as struct tag.
    ///
    /// Struct variants of enums always carry their variant name.
    #[must_use]
    pub fn with_struct_names(mut self, struct_names: bool) -> Self {
        self.struct_names = struct_names;
        self
    }

    /// Controls whether binding tolerates struct fields the target type does not declare.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{from_str, from_str_with_options, ZiggyOptions};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize, Debug, PartialEq)]
    /// struct Point { x: i32 }
    ///
    /// assert!(from_str::<Point>("{x = 1, note = \"extra\"}").is_err());
    ///
    /// let options = ZiggyOptions::new().with_unknown_fields(true);
    /// let point: Point = from_str_with_options("{x = 1, note = \"extra\"}", options).unwrap();
    /// assert_eq!(point, Point { x: 1 });
    /// ```
    #[must_use]
    pub fn with_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Sets the maximum nesting depth of arrays, maps, structs and tags.
    #[must_use]
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}
