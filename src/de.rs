//! Ziggy deserialization.
//!
//! This module binds parsed [`Value`] trees to Rust types through serde.
//! Text is first parsed into a `Value` by the [`Parser`](crate::parser::Parser);
//! the binding layer then walks that tree on behalf of the target type's
//! `Deserialize` implementation.
//!
//! ## Binding rules
//!
//! - **Structs**: fields match by exact name. Fields the type does not declare
//!   are rejected unless [`ZiggyOptions::allow_unknown_fields`] is set, and a
//!   named struct literal (`Point {...}`) must carry the type's own name.
//! - **Primitives**: integers must be in range for the target; integers widen to
//!   floats, floats never narrow to integers; byte strings bind to `String`
//!   and `char` when they hold valid UTF-8.
//! - **Enums**: a tag selects the variant (`Green 5`), a named struct selects a
//!   struct variant and a bare string selects a unit variant.
//! - **Tags** bound to anything other than an enum are transparent.
//!
//! ```rust
//! use serde_ziggy::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! enum Color { Red, Green(i32) }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Pixel { at: (u16, u16), color: Color }
//!
//! let pixel: Pixel = from_str("Pixel {.at = [3, 4], .color = Green 5}").unwrap();
//! assert_eq!(pixel, Pixel { at: (3, 4), color: Color::Green(5) });
//! ```

use crate::parser::Parser;
use crate::value::{BIGINT_TOKEN, STRUCT_TOKEN, TAG_TOKEN, VALUE_TOKEN};
use crate::{Error, Fields, Result, Value, ZiggyOptions};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{self, Error as _};

fn invalid_type(value: &Value, exp: &dyn de::Expected) -> Error {
    Error::invalid_type(value.unexpected(), exp)
}

/// Struct fields as map entries keyed by byte strings.
fn field_entries(fields: Fields) -> Vec<(Value, Value)> {
    fields
        .into_iter()
        .map(|(name, value)| (Value::Bytes(name.into_bytes()), value))
        .collect()
}

fn visit_int<'de, V>(i: BigInt, raw: bool, options: ZiggyOptions, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Some(v) = i.to_i64() {
        visitor.visit_i64(v)
    } else if let Some(v) = i.to_u64() {
        visitor.visit_u64(v)
    } else if let Some(v) = i.to_i128() {
        visitor.visit_i128(v)
    } else if let Some(v) = i.to_u128() {
        visitor.visit_u128(v)
    } else if raw {
        let marker = vec![(
            Value::Bytes(BIGINT_TOKEN.as_bytes().to_vec()),
            Value::Bytes(i.to_string().into_bytes()),
        )];
        visitor.visit_map(MapDeserializer::new(marker, options))
    } else {
        Err(Error::out_of_range(&i, "128-bit integer"))
    }
}

/// The Ziggy text deserializer.
///
/// Parses the whole input on first use, then binds the resulting [`Value`].
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    input: &'de str,
    options: ZiggyOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, ZiggyOptions::default())
    }

    pub fn with_options(input: &'de str, options: ZiggyOptions) -> Self {
        Deserializer { input, options }
    }

    fn value(&self) -> Result<ValueDeserializer> {
        let value = Parser::new(self.input, &self.options).parse()?;
        Ok(ValueDeserializer::with_options(value, self.options))
    }
}

macro_rules! forward_to_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(self.value()?, visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    forward_to_value! {
        deserialize_any deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32
        deserialize_i64 deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32
        deserialize_u64 deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char
        deserialize_str deserialize_string deserialize_bytes deserialize_byte_buf
        deserialize_option deserialize_unit deserialize_seq deserialize_map
        deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit_struct(self.value()?, name, visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_newtype_struct(self.value()?, name, visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(self.value()?, len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple_struct(self.value()?, name, len, visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.value()?, name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_enum(self.value()?, name, variants, visitor)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
    options: ZiggyOptions,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>, options: ZiggyOptions) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
            options,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(ValueDeserializer::with_options(value, self.options))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(Value, Value)>,
    value: Option<Value>,
    options: ZiggyOptions,
}

impl MapDeserializer {
    fn new(entries: Vec<(Value, Value)>, options: ZiggyOptions) -> Self {
        MapDeserializer {
            iter: entries.into_iter(),
            value: None,
            options,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::with_options(key, self.options))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::with_options(value, self.options)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
    options: ZiggyOptions,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name = Value::Bytes(self.variant.into_bytes());
        let variant = seed.deserialize(ValueDeserializer::with_options(name, self.options))?;
        let access = VariantDeserializer {
            value: self.value,
            options: self.options,
        };
        Ok((variant, access))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
    options: ZiggyOptions,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.kind_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::with_options(value, self.options)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_tuple(
                ValueDeserializer::with_options(value, self.options),
                len,
                visitor,
            ),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => {
                ValueDeserializer::with_options(value, self.options).bind_struct(None, fields, visitor)
            }
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

/// Binds an owned [`Value`] to a `Deserialize` type.
///
/// In raw mode (entered when the target is [`Value`] itself) tags, struct names
/// and very large integers are exposed through private markers so that they
/// survive the trip through serde unchanged.
pub(crate) struct ValueDeserializer {
    value: Value,
    options: ZiggyOptions,
    raw: bool,
}

impl ValueDeserializer {
    pub(crate) fn with_options(value: Value, options: ZiggyOptions) -> Self {
        ValueDeserializer {
            value,
            options,
            raw: false,
        }
    }

    fn bind_struct<'de, V>(
        self,
        name: Option<&str>,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        let entries = match self.value.into_untagged() {
            Value::Struct(s) => {
                if let (Some(expected), Some(found)) = (name, s.name.as_deref()) {
                    if expected != found {
                        return Err(Error::struct_name(expected, found));
                    }
                }
                field_entries(s.fields)
            }
            Value::Map(entries) if entries.iter().all(|(key, _)| key.is_bytes()) => entries,
            other => return Err(invalid_type(&other, &visitor)),
        };

        if !options.allow_unknown_fields {
            for (key, _) in &entries {
                let field = String::from_utf8_lossy(key.as_bytes().unwrap_or_default());
                if !fields.iter().any(|known| *known == field) {
                    return Err(Error::unknown_field(&field, fields));
                }
            }
        }

        visitor.visit_map(MapDeserializer::new(entries, options))
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($ty:ty),)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.value.into_untagged() {
                    Value::Int(i) => match <$ty>::try_from(&i) {
                        Ok(v) => visitor.$visit(v),
                        Err(_) => Err(Error::out_of_range(&i, stringify!($ty))),
                    },
                    other => Err(invalid_type(&other, &visitor)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visit_int(i, self.raw, options, visitor),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => visitor.visit_string(s),
                Err(e) => visitor.visit_byte_buf(e.into_bytes()),
            },
            Value::Tag(name, inner) => {
                if self.raw {
                    visitor.visit_enum(EnumDeserializer {
                        variant: name,
                        value: Some(*inner),
                        options,
                    })
                } else {
                    ValueDeserializer::with_options(*inner, options).deserialize_any(visitor)
                }
            }
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items, options)),
            Value::Map(entries) => visitor.visit_map(MapDeserializer::new(entries, options)),
            Value::Struct(s) => {
                let mut entries = Vec::with_capacity(s.fields.len() + 1);
                if self.raw {
                    let name = s.name.map_or(Value::Null, |n| Value::Bytes(n.into_bytes()));
                    entries.push((Value::Bytes(STRUCT_TOKEN.as_bytes().to_vec()), name));
                }
                entries.extend(field_entries(s.fields));
                visitor.visit_map(MapDeserializer::new(entries, options))
            }
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.into_untagged() {
            Value::Bool(b) => visitor.visit_bool(b),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.into_untagged() {
            Value::Float(f) => visitor.visit_f64(f),
            Value::Int(i) => match i.to_f64() {
                Some(f) => visitor.visit_f64(f),
                None => Err(Error::out_of_range(&i, "f64")),
            },
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.into_untagged() {
            Value::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => visitor.visit_char(c),
                        _ => Err(Error::invalid_value(de::Unexpected::Str(&s), &visitor)),
                    }
                }
                Err(_) => Err(Error::type_mismatch("a character", "non-UTF-8 bytes")),
            },
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.into_untagged() {
            Value::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => visitor.visit_string(s),
                Err(_) => Err(Error::type_mismatch("a string", "non-UTF-8 bytes")),
            },
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        match self.value.into_untagged() {
            Value::Bytes(b) => visitor.visit_byte_buf(b),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items, options)),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.into_untagged() {
            Value::Null => visitor.visit_unit(),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if name == VALUE_TOKEN {
            return visitor.visit_newtype_struct(ValueDeserializer {
                raw: true,
                ..self
            });
        }
        match self.value {
            Value::Tag(tag, inner) if name == TAG_TOKEN => {
                let entry = vec![(Value::Bytes(tag.into_bytes()), *inner)];
                visitor.visit_newtype_struct(ValueDeserializer::with_options(
                    Value::Map(entry),
                    self.options,
                ))
            }
            value => visitor.visit_newtype_struct(ValueDeserializer { value, ..self }),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        match self.value.into_untagged() {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items, options)),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        match self.value.into_untagged() {
            Value::Map(entries) => visitor.visit_map(MapDeserializer::new(entries, options)),
            Value::Struct(s) => {
                visitor.visit_map(MapDeserializer::new(field_entries(s.fields), options))
            }
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.bind_struct(Some(name), fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let options = self.options;
        let (variant, value) = match self.value {
            Value::Tag(variant, inner) => (variant, Some(*inner)),
            Value::Struct(s) if s.name.is_some() => {
                let variant = s.name.unwrap_or_default();
                let payload = Value::Struct(crate::Struct {
                    name: None,
                    fields: s.fields,
                });
                (variant, Some(payload))
            }
            Value::Bytes(b) => match String::from_utf8(b) {
                Ok(variant) => (variant, None),
                Err(_) => return Err(Error::type_mismatch("an enum variant", "non-UTF-8 bytes")),
            },
            Value::Map(entries) if entries.len() == 1 => {
                let mut entries = entries.into_iter();
                match entries.next() {
                    Some((Value::Bytes(key), value)) => match String::from_utf8(key) {
                        Ok(variant) => (variant, Some(value)),
                        Err(_) => {
                            return Err(Error::type_mismatch("an enum variant", "non-UTF-8 bytes"))
                        }
                    },
                    _ => return Err(Error::type_mismatch("an enum variant", "map")),
                }
            }
            other => return Err(invalid_type(&other, &visitor)),
        };

        visitor.visit_enum(EnumDeserializer {
            variant,
            value,
            options,
        })
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}
