//! Ordered field storage for Ziggy struct literals.
//!
//! [`Fields`] wraps an [`IndexMap`] so that struct fields keep the order in
//! which they appeared in the source text (or were declared on the Rust
//! type) and field names stay unique. The parser rejects a repeated field name
//! before it ever reaches this type, so [`Fields::insert`] simply replaces.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ziggy::{Fields, Value};
//!
//! let mut fields = Fields::new();
//! fields.insert("title".to_string(), Value::from("Ruy Blas"));
//! fields.insert("year".to_string(), Value::from(1838));
//!
//! let names: Vec<_> = fields.keys().cloned().collect();
//! assert_eq!(names, vec!["title", "year"]);
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered struct fields keyed by identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(IndexMap<String, crate::Value>);

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Fields(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Fields(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, keeping its original position if it already existed.
    ///
    /// If the struct already contained this field, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ziggy::{Fields, Value};
    ///
    /// let mut fields = Fields::new();
    /// assert!(fields.insert("x".to_string(), Value::from(1)).is_none());
    /// assert!(fields.insert("x".to_string(), Value::from(2)).is_some());
    /// ```
    pub fn insert(&mut self, name: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&crate::Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the field values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl IntoIterator for Fields {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Fields {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Fields(IndexMap::from_iter(iter))
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_insert_keeps_position() {
        let mut fields = Fields::new();
        fields.insert("a".to_string(), Value::from(1));
        fields.insert("b".to_string(), Value::from(2));
        fields.insert("a".to_string(), Value::from(3));

        let entries: Vec<_> = fields.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(entries, vec![("a", Value::from(3)), ("b", Value::from(2))]);
    }

    #[test]
    fn test_from_iter() {
        let fields: Fields = vec![
            ("z".to_string(), Value::Null),
            ("y".to_string(), Value::Bool(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("z"));
        assert_eq!(fields.keys().next().map(String::as_str), Some("z"));
    }
}
