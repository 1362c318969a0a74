//! Ziggy serialization.
//!
//! This module turns Rust values into Ziggy text in two steps:
//!
//! 1. [`ValueSerializer`] introspects any `Serialize` type into a [`Value`]:
//!    records become structs, enum variants become tags, maps and sequences
//!    keep their iteration order.
//! 2. The writer renders that `Value` as canonical text, either compact or
//!    pretty-printed with one entry per line.
//!
//! [`Serializer`] chains both steps behind serde's `Serializer` trait.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_ziggy::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, tags: Vec<&'static str> }
//!
//! let data = Data { x: 1, tags: vec!["a", "b"] };
//!
//! assert_eq!(to_string(&data).unwrap(), "Data {x = 1, tags = [\"a\", \"b\"]}");
//! assert_eq!(
//!     to_string_pretty(&data).unwrap(),
//!     "Data {\n    x = 1,\n    tags = [\n        \"a\",\n        \"b\",\n    ],\n}"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_ziggy::{Serializer, ZiggyOptions};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(ZiggyOptions::new());
//! vec![1, 2, 3].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "[1, 2, 3]");
//! ```
//!
//! ## Byte strings
//!
//! Bytes without a newline are quoted; bytes containing a newline use the
//! multiline form, which always ends its line. Newline bytes that the
//! multiline form cannot carry (CRLF line ends, invalid UTF-8) are quoted:
//!
//! ```rust
//! use serde_ziggy::Value;
//!
//! assert_eq!(Value::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
//! assert_eq!(Value::from("one\ntwo").to_string(), "\\\\ one\n\\\\ two\n");
//! assert_eq!(Value::from("one\r\ntwo").to_string(), r#""one\r\ntwo""#);
//! ```

use crate::lexer::is_identifier;
use crate::value::{BIGINT_TOKEN, NAMED_STRUCT_TOKEN, STRUCT_TOKEN, TAG_TOKEN};
use crate::{Error, Fields, Result, Struct, Value, ZiggyOptions};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// The Ziggy text serializer.
///
/// Converts Rust values implementing `Serialize` into Ziggy text.
/// Created via [`Serializer::new`] with customizable options.
pub struct Serializer {
    output: String,
    options: ZiggyOptions,
}

impl Serializer {
    pub fn new(options: ZiggyOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn value_serializer(&self) -> ValueSerializer {
        ValueSerializer::new(&self.options)
    }

    fn emit(&mut self, value: &Value) -> Result<()> {
        trace!("writing {}", value.kind_name());
        write_value(&mut self.output, value, &self.options, 0)
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a, SerializeVec>;
    type SerializeTuple = Compound<'a, SerializeVec>;
    type SerializeTupleStruct = Compound<'a, SerializeVec>;
    type SerializeTupleVariant = Compound<'a, SerializeVec>;
    type SerializeMap = Compound<'a, SerializeMap>;
    type SerializeStruct = Compound<'a, SerializeStruct>;
    type SerializeStructVariant = Compound<'a, SerializeStruct>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.emit(&Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.emit(&Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.emit(&Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.emit(&Value::from(v))
    }

    fn serialize_none(self) -> Result<()> {
        self.emit(&Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.emit(&Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.emit(&Value::Null)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        let value = ser::Serializer::serialize_unit_variant(
            self.value_serializer(),
            name,
            variant_index,
            variant,
        )?;
        self.emit(&value)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = self.value_serializer().serialize_newtype_struct(name, value)?;
        self.emit(&value)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = self
            .value_serializer()
            .serialize_newtype_variant(name, variant_index, variant, value)?;
        self.emit(&value)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let inner = self.value_serializer().serialize_seq(len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        let inner = self.value_serializer().serialize_tuple(len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        let inner = self.value_serializer().serialize_tuple_struct(name, len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let inner = self
            .value_serializer()
            .serialize_tuple_variant(name, variant_index, variant, len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        let inner = self.value_serializer().serialize_map(len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        let inner = self.value_serializer().serialize_struct(name, len)?;
        Ok(Compound { ser: self, inner })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let inner = self
            .value_serializer()
            .serialize_struct_variant(name, variant_index, variant, len)?;
        Ok(Compound { ser: self, inner })
    }
}

/// Collects a compound value through [`ValueSerializer`] and writes it on `end`.
pub struct Compound<'a, C> {
    ser: &'a mut Serializer,
    inner: C,
}

impl<'a, C> ser::SerializeSeq for Compound<'a, C>
where
    C: ser::SerializeSeq<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_element(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeTuple for Compound<'a, C>
where
    C: ser::SerializeTuple<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_element(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeTupleStruct for Compound<'a, C>
where
    C: ser::SerializeTupleStruct<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeTupleVariant for Compound<'a, C>
where
    C: ser::SerializeTupleVariant<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeMap for Compound<'a, C>
where
    C: ser::SerializeMap<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_value(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeStruct for Compound<'a, C>
where
    C: ser::SerializeStruct<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

impl<'a, C> ser::SerializeStructVariant for Compound<'a, C>
where
    C: ser::SerializeStructVariant<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.emit(&value)
    }
}

/// Serializes Rust values into [`Value`] trees.
///
/// # Examples
///
/// ```rust
/// use serde_ziggy::{Value, ValueSerializer};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// enum Shape { Circle(f64), Empty }
///
/// let value = Shape::Circle(1.5).serialize(ValueSerializer::default()).unwrap();
/// assert_eq!(value, Value::tag("Circle", 1.5));
///
/// let value = Shape::Empty.serialize(ValueSerializer::default()).unwrap();
/// assert_eq!(value, Value::tag("Empty", Value::Null));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ValueSerializer {
    struct_names: bool,
}

impl Default for ValueSerializer {
    fn default() -> Self {
        ValueSerializer { struct_names: true }
    }
}

impl ValueSerializer {
    pub fn new(options: &ZiggyOptions) -> Self {
        ValueSerializer {
            struct_names: options.struct_names,
        }
    }

    fn to_value<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }
}

pub struct SerializeVec {
    ser: ValueSerializer,
    items: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    ser: ValueSerializer,
    entries: Vec<(Value, Value)>,
    next_key: Option<Value>,
}

pub struct SerializeStruct {
    ser: ValueSerializer,
    name: Option<String>,
    fields: Fields,
}

/// Splits a one-entry map produced by a private marker into its key and value.
fn single_entry(value: Value) -> Result<(String, Value)> {
    if let Value::Map(entries) = value {
        let mut entries = entries.into_iter();
        if let (Some((Value::Bytes(key), inner)), None) = (entries.next(), entries.next()) {
            if let Ok(key) = String::from_utf8(key) {
                return Ok((key, inner));
            }
        }
    }
    Err(Error::unsupported_type("malformed tagged value"))
}

fn into_fields(value: Value) -> Result<Fields> {
    match value {
        Value::Map(entries) => entries
            .into_iter()
            .map(|(key, value)| match key {
                Value::Bytes(name) => String::from_utf8(name)
                    .map(|name| (name, value))
                    .map_err(|_| Error::unsupported_type("non-UTF-8 struct field name")),
                other => Err(Error::unsupported_type(&format!(
                    "struct field named by {}",
                    other.kind_name()
                ))),
            })
            .collect(),
        other => Err(Error::unsupported_type(&format!(
            "struct fields from {}",
            other.kind_name()
        ))),
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStruct;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::tag(variant, Value::Null))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match name {
            TAG_TOKEN => {
                let (tag, inner) = single_entry(self.to_value(value)?)?;
                Ok(Value::Tag(tag, Box::new(inner)))
            }
            STRUCT_TOKEN => Ok(Value::Struct(Struct {
                name: None,
                fields: into_fields(self.to_value(value)?)?,
            })),
            NAMED_STRUCT_TOKEN => {
                let (name, fields) = single_entry(self.to_value(value)?)?;
                Ok(Value::Struct(Struct {
                    name: Some(name),
                    fields: into_fields(fields)?,
                }))
            }
            BIGINT_TOKEN => match self.to_value(value)?.as_str().map(str::parse::<BigInt>) {
                Some(Ok(i)) => Ok(Value::Int(i)),
                _ => Err(Error::unsupported_type("malformed big integer")),
            },
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::tag(variant, self.to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            ser: self,
            items: Vec::with_capacity(len.unwrap_or(0)),
            variant: None,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec {
            ser: self,
            items: Vec::with_capacity(len),
            variant: Some(variant),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            ser: self,
            entries: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeStruct> {
        Ok(SerializeStruct {
            ser: self,
            name: self.struct_names.then(|| name.to_string()),
            fields: Fields::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStruct> {
        Ok(SerializeStruct {
            ser: self,
            name: Some(variant.to_string()),
            fields: Fields::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn finish(self) -> Value {
        let array = Value::Array(self.items);
        match self.variant {
            Some(variant) => Value::tag(variant, array),
            None => array,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(self.ser.to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| <Error as ser::Error>::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, self.ser.to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.entries))
    }
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.insert(key.to_string(), self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Struct(Struct {
            name: self.name,
            fields: self.fields,
        }))
    }
}

impl ser::SerializeStructVariant for SerializeStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.insert(key.to_string(), self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Struct(Struct {
            name: self.name,
            fields: self.fields,
        }))
    }
}

fn push_indent(output: &mut String, options: &ZiggyOptions, level: usize) {
    if !options.pretty {
        return;
    }
    if options.use_tabs {
        output.extend(std::iter::repeat('\t').take(level));
    } else {
        output.extend(std::iter::repeat(' ').take(level * options.indent));
    }
}

fn check_name<'n>(name: &'n str, what: &str) -> Result<&'n str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(Error::unencodable(format!("{} `{}`: not an identifier", what, name)))
    }
}

/// Writes `value` as Ziggy text; nested lines are indented relative to `indent_level`.
pub(crate) fn write_value(
    output: &mut String,
    value: &Value,
    options: &ZiggyOptions,
    indent_level: usize,
) -> Result<()> {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => output.push_str(&i.to_string()),
        Value::Float(f) => write_float(output, *f)?,
        Value::Bytes(bytes) => match multiline_text(bytes) {
            Some(text) => write_multiline(output, text, options, indent_level),
            None => write_quoted(output, bytes),
        },
        Value::Tag(name, inner) => write_tag(output, name, inner, options, indent_level)?,
        Value::Array(items) => write_list(output, "[", ']', items, options, indent_level, |out, item| {
            write_value(out, item, options, indent_level + 1)
        })?,
        Value::Map(entries) => write_map(output, entries, options, indent_level)?,
        Value::Struct(s) => write_struct(output, s, options, indent_level)?,
    }
    Ok(())
}

/// Writes a delimited, comma-separated list.
///
/// Pretty output puts every item on its own line with a trailing comma.
fn write_list<I, F>(
    output: &mut String,
    open: &str,
    close: char,
    items: I,
    options: &ZiggyOptions,
    indent_level: usize,
    mut write_item: F,
) -> Result<()>
where
    I: IntoIterator,
    F: FnMut(&mut String, I::Item) -> Result<()>,
{
    output.push_str(open);
    let mut empty = true;
    for item in items {
        if options.pretty {
            if empty {
                output.push('\n');
            }
            push_indent(output, options, indent_level + 1);
            write_item(output, item)?;
            // A multiline literal has already ended the line
            if output.ends_with('\n') {
                push_indent(output, options, indent_level + 1);
            }
            output.push_str(",\n");
        } else {
            if !empty {
                output.push_str(", ");
            }
            write_item(output, item)?;
        }
        empty = false;
    }
    if options.pretty && !empty {
        push_indent(output, options, indent_level);
    }
    output.push(close);
    Ok(())
}

fn write_map(
    output: &mut String,
    entries: &[(Value, Value)],
    options: &ZiggyOptions,
    indent_level: usize,
) -> Result<()> {
    write_list(output, "{", '}', entries, options, indent_level, |out, (key, value)| {
        write_value(out, key, options, indent_level + 1)?;
        if out.ends_with('\n') {
            push_indent(out, options, indent_level + 1);
        }
        out.push_str(": ");
        write_value(out, value, options, indent_level + 1)
    })
}

fn write_struct(
    output: &mut String,
    s: &Struct,
    options: &ZiggyOptions,
    indent_level: usize,
) -> Result<()> {
    let open = match &s.name {
        Some(name) => format!("{} {{", check_name(name, "struct name")?),
        None => "{".to_string(),
    };
    write_list(output, &open, '}', &s.fields, options, indent_level, |out, (name, value)| {
        out.push_str(check_name(name, "field name")?);
        out.push_str(" = ");
        write_value(out, value, options, indent_level + 1)
    })
}

fn write_tag(
    output: &mut String,
    name: &str,
    inner: &Value,
    options: &ZiggyOptions,
    indent_level: usize,
) -> Result<()> {
    output.push_str(check_name(name, "tag name")?);
    // `name {...}` would read back as a named struct
    let parenthesized = matches!(inner, Value::Map(_) | Value::Struct(Struct { name: None, .. }));
    if parenthesized {
        output.push('(');
        write_value(output, inner, options, indent_level)?;
        output.push(')');
    } else {
        output.push(' ');
        write_value(output, inner, options, indent_level)?;
    }
    Ok(())
}

fn write_float(output: &mut String, f: f64) -> Result<()> {
    if !f.is_finite() {
        return Err(Error::unencodable(format!("non-finite float {}", f)));
    }
    let text = f.to_string();
    output.push_str(&text);
    if !text.contains('.') {
        output.push_str(".0");
    }
    Ok(())
}

fn write_quoted(output: &mut String, bytes: &[u8]) {
    output.push('"');
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                escape_str(output, text);
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                escape_str(output, std::str::from_utf8(valid).unwrap_or_default());
                let bad = err.error_len().unwrap_or(invalid.len());
                for byte in &invalid[..bad] {
                    output.push_str(&format!("\\x{:02x}", byte));
                }
                rest = &invalid[bad..];
            }
        }
    }
    output.push('"');
}

fn escape_str(output: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\0' => output.push_str("\\0"),
            c if c.is_ascii_control() => output.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => output.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => output.push(c),
        }
    }
}

/// Text that the multiline form carries unchanged.
///
/// The reader drops a `\r` at the end of each line, so such lines stay quoted,
/// as does anything that is not UTF-8.
fn multiline_text(bytes: &[u8]) -> Option<&str> {
    if !bytes.contains(&b'\n') {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    if text.split('\n').any(|line| line.ends_with('\r')) {
        return None;
    }
    Some(text)
}

fn write_multiline(output: &mut String, text: &str, options: &ZiggyOptions, indent_level: usize) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            push_indent(output, options, indent_level + 1);
        }
        output.push_str("\\\\");
        if !line.is_empty() {
            output.push(' ');
            output.push_str(line);
        }
        output.push('\n');
    }
}
