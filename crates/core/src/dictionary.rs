//! Keyed attribute container
//!
//! A [`Dictionary`] owns every child outright. Key order carries no meaning:
//! two dictionaries with the same entries compare equal regardless of the
//! order they were filled in.

use rustc_hash::FxHashMap;

use crate::attribute::{Attribute, AttributeCast, Meta};
use crate::error::{Error, KeyError};

/// Mapping from string key to an owned [`Attribute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    items: FxHashMap<String, Attribute>,
    meta: Meta,
}

impl Dictionary {
    /// Empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary produced from a summary; holds no children
    pub fn new_summary() -> Self {
        Self {
            items: FxHashMap::default(),
            meta: Meta::summary(),
        }
    }

    /// Insert or replace the child stored under `key`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Attribute>) {
        self.items.insert(key.into(), value.into());
    }

    /// Child stored under `key`
    pub fn get(&self, key: &str) -> Result<&Attribute, KeyError> {
        self.items.get(key).ok_or_else(|| KeyError::new(key))
    }

    /// Mutable child stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Attribute, KeyError> {
        self.items.get_mut(key).ok_or_else(|| KeyError::new(key))
    }

    /// Child stored under `key`, borrowed as a concrete variant.
    ///
    /// Fails with [`Error::Key`] when absent and [`Error::WrongType`] when the
    /// child is a different variant.
    pub fn get_as<T: AttributeCast>(&self, key: &str) -> Result<&T, Error> {
        let attr = self.get(key)?;
        T::cast_ref(attr).ok_or(Error::WrongType {
            expected: T::EXPECTED,
            actual: attr.type_name(),
        })
    }

    /// True when `key` is present
    pub fn has(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Remove and return the child stored under `key`
    pub fn remove(&mut self, key: &str) -> Option<Attribute> {
        self.items.remove(key)
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no children
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate keys in unspecified order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Iterate entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    /// True when produced from a summary
    pub fn is_summary(&self) -> bool {
        self.meta.is_summary()
    }
}

impl<K: Into<String>, V: Into<Attribute>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.set(key, value);
        }
        dict
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, Attribute);
    type IntoIter = std::collections::hash_map::IntoIter<String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::atomic::{Atomic, Null};

    #[test]
    fn test_set_get_has() {
        let mut dict = Dictionary::new();
        dict.set("ipla", 1.2e6f64);
        dict.set("shot", 30420i32);
        assert!(dict.has("ipla"));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("shot").unwrap(), &Attribute::from(30420i32));
    }

    #[test]
    fn test_missing_key() {
        let dict = Dictionary::new();
        assert_eq!(dict.get("nope").unwrap_err(), KeyError::new("nope"));
        assert!(!dict.has("nope"));
    }

    #[test]
    fn test_set_replaces() {
        let mut dict = Dictionary::new();
        dict.set("a", 1u8);
        dict.set("a", "text");
        assert_eq!(dict.len(), 1);
        assert!(dict.get("a").unwrap().is_string());
    }

    #[test]
    fn test_get_as() {
        let mut dict = Dictionary::new();
        dict.set("x", Array::<f32>::new(&[3]));
        dict.set("n", Null::new());

        assert_eq!(dict.get_as::<Array<f32>>("x").unwrap().size(), 3);
        assert_eq!(
            dict.get_as::<Atomic<i32>>("x").unwrap_err(),
            Error::WrongType {
                expected: "int32",
                actual: "array"
            }
        );
        assert!(matches!(
            dict.get_as::<Null>("missing"),
            Err(Error::Key(_))
        ));
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut dict = Dictionary::new();
        dict.set("count", 1u32);
        if let Some(count) = dict.get_mut("count").unwrap().downcast_mut::<Atomic<u32>>() {
            count.set(2);
        }
        assert_eq!(dict.get("count").unwrap(), &Attribute::from(2u32));
    }

    #[test]
    fn test_remove() {
        let mut dict: Dictionary = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert!(dict.remove("a").is_some());
        assert!(dict.remove("a").is_none());
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: Dictionary = [("x", 1i8), ("y", 2i8)].into_iter().collect();
        let b: Dictionary = [("y", 2i8), ("x", 1i8)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_dictionary() {
        let dict = Dictionary::new_summary();
        assert!(dict.is_summary());
        assert!(dict.is_empty());
    }
}
