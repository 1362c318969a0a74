//! Tagged literals on typed fields.
//!
//! A tagged literal is a name in front of a value, such as `date "2024-01-15"`
//! or `@date("2024-01-15")`. Tags bound to ordinary fields are transparent,
//! so a `String` field happily reads `date "2024-01-15"`. When the tag itself
//! matters, use [`Tagged`] to keep it, or [`date`] to bind a
//! `chrono::DateTime<Utc>` through the `date` tag.
//!
//! ```rust
//! use chrono::{DateTime, TimeZone, Utc};
//! use serde::{Deserialize, Serialize};
//! use serde_ziggy::{from_str, to_string, Tagged};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Message {
//!     #[serde(with = "serde_ziggy::tagged::date")]
//!     sent: DateTime<Utc>,
//!     id: Tagged<String>,
//! }
//!
//! let msg: Message = from_str(
//!     "Message {.sent = @date(\"2024-03-10T15:39:28Z\"), .id = uuid \"5a1f\"}",
//! ).unwrap();
//! assert_eq!(msg.sent, Utc.with_ymd_and_hms(2024, 3, 10, 15, 39, 28).unwrap());
//! assert_eq!(msg.id, Tagged::new("uuid", "5a1f".to_string()));
//!
//! assert_eq!(
//!     to_string(&msg).unwrap(),
//!     "Message {sent = date \"2024-03-10T15:39:28+00:00\", id = uuid \"5a1f\"}"
//! );
//! ```

use crate::value::{SingleEntry, TAG_TOKEN};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A value together with the tag it was written with.
///
/// Serializes as a tagged literal in Ziggy and as a one-entry map
/// (`{"tag": value}`) in other serde formats.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tagged<T> {
    pub tag: String,
    pub value: T,
}

impl<T> Tagged<T> {
    pub fn new(tag: impl Into<String>, value: T) -> Self {
        Tagged {
            tag: tag.into(),
            value,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Serialize> Serialize for Tagged<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(TAG_TOKEN, &SingleEntry(&self.tag, &self.value))
    }
}

struct TaggedVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TaggedVisitor<T> {
    type Value = Tagged<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a tagged literal")
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let (tag, value) = map
            .next_entry::<String, T>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(Tagged { tag, value })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tagged<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_newtype_struct(TAG_TOKEN, TaggedVisitor(PhantomData))
    }
}

/// `#[serde(with = "serde_ziggy::tagged::date")]` for `DateTime<Utc>` fields.
///
/// Writes `date "<RFC 3339>"` and reads either `date "..."` or `@date("...")`.
pub mod date {
    use super::Tagged;
    use crate::value::{SingleEntry, DATE_TAG, TAG_TOKEN};
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(when: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(TAG_TOKEN, &SingleEntry(DATE_TAG, &when.to_rfc3339()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tagged = Tagged::<String>::deserialize(deserializer)?;
        if tagged.tag != DATE_TAG {
            return Err(D::Error::custom(format!(
                "expected tag `{}`, found `{}`",
                DATE_TAG, tagged.tag
            )));
        }
        DateTime::parse_from_rfc3339(&tagged.value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
