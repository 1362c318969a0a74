//! Dynamic value representation for Ziggy data.
//!
//! This module provides the [`Value`] enum which represents any valid Ziggy document.
//! It's what [`parse`](crate::parse) returns and what the writer consumes, and it is
//! useful whenever the structure isn't known at compile time.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, integer, float, bytes, tag, array, map or struct
//! - [`Struct`]: an optionally named, ordered set of unique fields
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_ziggy::{Struct, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let tagged = Value::tag("uuid", "5d8e...");
//! let point = Value::from(Struct::named("Point").with_field("x", 1).with_field("y", 2));
//! assert_eq!(point.to_string(), "Point {x = 1, y = 2}");
//! ```
//!
//! ### Parsing and Inspecting
//!
//! ```rust
//! use serde_ziggy::Value;
//!
//! let value: Value = "Message {.sender = \"Allocgator\", .time = 1710085168}".parse().unwrap();
//! assert_eq!(value.get("sender").and_then(Value::as_str), Some("Allocgator"));
//! assert_eq!(value.get("time").and_then(Value::as_i64), Some(1710085168));
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use serde_ziggy::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! let fields = value.as_struct().unwrap();
//! assert_eq!(fields.name.as_deref(), Some("Point"));
//! assert_eq!(fields.fields.len(), 2);
//! ```

use crate::{Error, Fields, ZiggyOptions};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Newtype-struct names that let `Value` pass through this crate's own
// serializer and deserializer without losing tags, struct names or big
// integers. Other serde formats see ordinary newtype structs.
pub(crate) const VALUE_TOKEN: &str = "$serde_ziggy::private::Value";
pub(crate) const TAG_TOKEN: &str = "$serde_ziggy::private::Tag";
pub(crate) const STRUCT_TOKEN: &str = "$serde_ziggy::private::Struct";
pub(crate) const NAMED_STRUCT_TOKEN: &str = "$serde_ziggy::private::NamedStruct";
pub(crate) const BIGINT_TOKEN: &str = "$serde_ziggy::private::BigInt";

/// Tag name used by [`Value::date`] and [`Value::as_date`].
pub const DATE_TAG: &str = "date";

/// A dynamically-typed representation of any valid Ziggy value.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::Value;
///
/// let value = serde_ziggy::parse("[1, 2.5, \"pi\", {\"a\": 0}]").unwrap();
/// let items = value.as_array().unwrap();
/// assert!(items[0].is_int());
/// assert!(items[1].is_float());
/// assert!(items[2].is_bytes());
/// assert!(items[3].is_map());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Bytes(Vec<u8>),
    Tag(String, Box<Value>),
    Array(Vec<Value>),
    /// Entries in source order; keys may be any value and may repeat.
    Map(Vec<(Value, Value)>),
    Struct(Struct),
}

/// A struct literal: an optional type name plus ordered, uniquely named fields.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{Struct, Value};
///
/// let book = Struct::named("Book")
///     .with_field("title", "Ruy Blas")
///     .with_field("author", "Victor Hugo");
/// assert_eq!(book.get("title").and_then(Value::as_str), Some("Ruy Blas"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Struct {
    pub name: Option<String>,
    pub fields: Fields,
}

impl Struct {
    /// Creates an empty struct without a type name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty struct tagged with a type name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Struct {
            name: Some(name.into()),
            fields: Fields::new(),
        }
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Value {
    /// Wraps a value in a named tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::Value;
    ///
    /// let action = Value::tag("action", "clear_chat");
    /// assert_eq!(action.to_string(), "action \"clear_chat\"");
    /// ```
    #[must_use]
    pub fn tag(name: impl Into<String>, inner: impl Into<Value>) -> Self {
        Value::Tag(name.into(), Box::new(inner.into()))
    }

    /// Builds a `date` tag holding an RFC 3339 timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use serde_ziggy::Value;
    ///
    /// let when = Utc.with_ymd_and_hms(2025, 10, 25, 11, 34, 0).unwrap();
    /// let value = Value::date(when);
    /// assert_eq!(value.to_string(), "date \"2025-10-25T11:34:00+00:00\"");
    /// assert_eq!(value.as_date(), Some(when));
    /// ```
    #[must_use]
    pub fn date(when: DateTime<Utc>) -> Self {
        Value::tag(DATE_TAG, when.to_rfc3339())
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self, Value::Tag(..))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(_))
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Tag(..) => "tagged literal",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer that fits in an `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::Value;
    ///
    /// assert_eq!(Value::from(42).as_i64(), Some(42));
    /// assert_eq!(Value::from(u64::MAX).as_i64(), None);
    /// assert_eq!(Value::from(4.2).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => i.to_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) => i.to_u64(),
            _ => None,
        }
    }

    /// Returns floats as-is and widens integers; other kinds return `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => i.to_f64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If the value is a byte string holding valid UTF-8, returns it as `&str`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::Bytes(vec![0xff]).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a tagged literal, returns its name and inner value.
    #[inline]
    #[must_use]
    pub fn as_tag(&self) -> Option<(&str, &Value)> {
        match self {
            Value::Tag(name, inner) => Some((name.as_str(), &**inner)),
            _ => None,
        }
    }

    /// Decodes a `date` tag created by [`Value::date`] or written as `date "..."`.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Tag(name, inner) if name == DATE_TAG => inner
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Looks up a struct field, or the last map entry whose key is the given byte string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{parse, Value};
    ///
    /// let map = parse("{\"a\": 1, \"a\": 2}").unwrap();
    /// assert_eq!(map.get("a"), Some(&Value::from(2)));
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(s) => s.get(name),
            Value::Map(entries) => entries
                .iter()
                .rev()
                .find(|(key, _)| key.as_bytes() == Some(name.as_bytes()))
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Follows tags down to the first untagged value.
    #[must_use]
    pub fn untagged(&self) -> &Value {
        let mut value = self;
        while let Value::Tag(_, inner) = value {
            value = inner;
        }
        value
    }

    pub(crate) fn into_untagged(self) -> Value {
        let mut value = self;
        while let Value::Tag(_, inner) = value {
            value = *inner;
        }
        value
    }

    pub(crate) fn unexpected(&self) -> de::Unexpected<'_> {
        match self {
            Value::Null => de::Unexpected::Unit,
            Value::Bool(b) => de::Unexpected::Bool(*b),
            Value::Int(i) => match i.to_i64() {
                Some(v) => de::Unexpected::Signed(v),
                None => de::Unexpected::Other("integer"),
            },
            Value::Float(f) => de::Unexpected::Float(*f),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => de::Unexpected::Str(s),
                Err(_) => de::Unexpected::Bytes(b),
            },
            Value::Tag(..) => de::Unexpected::Other("tagged literal"),
            Value::Array(_) => de::Unexpected::Seq,
            Value::Map(_) => de::Unexpected::Map,
            Value::Struct(_) => de::Unexpected::Other("struct"),
        }
    }
}

/// Writes canonical Ziggy text; `{:#}` selects the pretty layout.
///
/// A value the writer rejects (a non-finite float, a name that is not an
/// identifier) renders as `<message>`, which is not Ziggy text. Use
/// [`to_string`](crate::to_string) to get the error instead.
///
/// ```rust
/// use serde_ziggy::{to_string, Value};
///
/// let nan = Value::Float(f64::NAN);
/// assert!(nan.to_string().starts_with('<'));
/// assert!(to_string(&nan).is_err());
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = if f.alternate() {
            ZiggyOptions::pretty()
        } else {
            ZiggyOptions::default()
        };
        let mut out = String::new();
        match crate::ser::write_value(&mut out, self, &options, 0) {
            Ok(()) => f.write_str(&out),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        crate::parse(s)
    }
}

/// Serializes as a map with exactly one entry.
pub(crate) struct SingleEntry<'a, V: ?Sized>(pub &'a str, pub &'a V);

impl<V: ?Sized + Serialize> Serialize for SingleEntry<'_, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => {
                if let Some(v) = i.to_i64() {
                    serializer.serialize_i64(v)
                } else if let Some(v) = i.to_u64() {
                    serializer.serialize_u64(v)
                } else if let Some(v) = i.to_i128() {
                    serializer.serialize_i128(v)
                } else if let Some(v) = i.to_u128() {
                    serializer.serialize_u128(v)
                } else {
                    serializer.serialize_newtype_struct(BIGINT_TOKEN, &i.to_string())
                }
            }
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => serializer.serialize_str(s),
                Err(_) => serializer.serialize_bytes(b),
            },
            Value::Tag(name, inner) => {
                serializer.serialize_newtype_struct(TAG_TOKEN, &SingleEntry(name, &**inner))
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Struct(s) => match &s.name {
                Some(name) => serializer
                    .serialize_newtype_struct(NAMED_STRUCT_TOKEN, &SingleEntry(name, &s.fields)),
                None => serializer.serialize_newtype_struct(STRUCT_TOKEN, &s.fields),
            },
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid Ziggy value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value.into()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::Int(value.into()))
    }

    fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
        Ok(Value::Int(value.into()))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Value, E> {
        Ok(Value::Int(value.into()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::Bytes(value.as_bytes().to_vec()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::Bytes(value.into_bytes()))
    }

    fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(value.to_vec()))
    }

    fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(value))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let first: Option<Value> = map.next_key()?;
        match first {
            None => Ok(Value::Map(Vec::new())),
            Some(Value::Bytes(ref key)) if key == STRUCT_TOKEN.as_bytes() => {
                let name: Option<String> = map.next_value()?;
                let mut fields = Fields::new();
                while let Some((field, value)) = map.next_entry::<String, Value>()? {
                    fields.insert(field, value);
                }
                Ok(Value::Struct(Struct { name, fields }))
            }
            Some(Value::Bytes(ref key)) if key == BIGINT_TOKEN.as_bytes() => {
                let digits: String = map.next_value()?;
                digits
                    .parse::<BigInt>()
                    .map(Value::Int)
                    .map_err(de::Error::custom)
            }
            Some(key) => {
                let mut entries = vec![(key, map.next_value()?)];
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Value::Map(entries))
            }
        }
    }

    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        use serde::de::VariantAccess;

        let (name, variant): (String, _) = data.variant()?;
        let inner: Value = variant.newtype_variant()?;
        Ok(Value::Tag(name, Box::new(inner)))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_newtype_struct(VALUE_TOKEN, ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => i.to_i64().ok_or_else(|| Error::out_of_range(&i, "i64")),
            other => Err(Error::type_mismatch("integer", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value.as_f64() {
            Some(f) => Ok(f),
            None => Err(Error::type_mismatch("float", value.kind_name())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch("bool", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bytes(b) => {
                String::from_utf8(b).map_err(|_| Error::type_mismatch("string", "non-UTF-8 bytes"))
            }
            other => Err(Error::type_mismatch("string", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            other => Err(Error::type_mismatch("bytes", other.kind_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(BigInt::from(value))
                }
            }
        )*
    };
}

from_integer!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Bytes(value.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Bytes(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(value: Vec<(Value, Value)>) -> Self {
        Value::Map(value)
    }
}

impl From<Struct> for Value {
    fn from(value: Struct) -> Self {
        Value::Struct(value)
    }
}

impl From<Fields> for Value {
    fn from(value: Fields) -> Self {
        Value::Struct(Struct {
            name: None,
            fields: value,
        })
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert!(i64::try_from(Value::from(u64::MAX)).is_err());
        assert!(i64::try_from(Value::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64_widens_integers() {
        assert_eq!(f64::try_from(Value::from(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::from(42)).unwrap(), 42.0);
        assert!(f64::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_tryfrom_string() {
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::Bytes(vec![0xc3])).is_err());
        assert!(String::try_from(Value::from(1)).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42u8), Value::Int(BigInt::from(42)));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("test"), Value::Bytes(b"test".to_vec()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(1)), Value::from(1));
    }

    #[test]
    fn test_get_struct_and_map() {
        let s = Value::from(Struct::new().with_field("a", 1));
        assert_eq!(s.get("a"), Some(&Value::from(1)));
        assert_eq!(s.get("b"), None);

        let m = Value::Map(vec![(Value::from(1), Value::from("one"))]);
        assert_eq!(m.get("1"), None);
        assert_eq!(Value::from(1).get("a"), None);
    }

    #[test]
    fn test_untagged() {
        let v = Value::tag("outer", Value::tag("inner", 5));
        assert_eq!(v.untagged(), &Value::from(5));
        assert_eq!(v.as_tag().map(|(name, _)| name), Some("outer"));
        assert_eq!(v.into_untagged(), Value::from(5));
    }

    #[test]
    fn test_date_requires_date_tag() {
        assert_eq!(Value::tag("when", "2024-01-15T10:30:00Z").as_date(), None);
        let parsed = Value::tag(DATE_TAG, "2024-01-15T10:30:00Z").as_date().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::from(Struct::new()).kind_name(), "struct");
        assert_eq!(Value::tag("t", 1).kind_name(), "tagged literal");
    }

    #[test]
    fn test_display_of_unwritable_value() {
        let bad = Value::tag("two words", 1);
        assert_eq!(bad.to_string(), format!("<{}>", crate::to_string(&bad).unwrap_err()));
        assert_eq!(format!("{:#}", Value::from(vec![Value::from(1)])), "[\n    1,\n]");
    }
}
