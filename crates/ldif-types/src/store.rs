//! Insertion-ordered entry store.

use indexmap::map::{IntoValues, Values};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entry::Entry;

/// Mapping from entry key to [`Entry`], iterated in insertion order.
///
/// Overwriting an existing key keeps that key's original position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Store {
    entries: IndexMap<String, Entry>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its own key, returning the entry it replaced.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in iteration order.
    pub fn iter(&self) -> Values<'_, String, Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = IndexMap::<String, Entry>::deserialize(deserializer)?;
        if let Some((key, entry)) = entries.iter().find(|(key, entry)| **key != entry.key) {
            return Err(D::Error::custom(format!(
                "store key `{key}` does not match entry dn `{}`",
                entry.key
            )));
        }
        Ok(Self { entries })
    }
}

impl FromIterator<Entry> for Store {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut store = Store::new();
        store.extend(iter);
        store
    }
}

impl Extend<Entry> for Store {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl IntoIterator for Store {
    type Item = Entry;
    type IntoIter = IntoValues<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Entry;
    type IntoIter = Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let store: Store = ["c", "a", "b"].into_iter().map(Entry::new).collect();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut store: Store = ["a", "b"].into_iter().map(Entry::new).collect();
        let replaced = store.insert(Entry::new("a").with_attribute("cn", "new"));

        assert!(replaced.is_some());
        assert_eq!(store.len(), 2);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().attribute("cn"), Some("new"));
    }

    #[test]
    fn clone_is_independent() {
        let original: Store = [Entry::new("a").with_class("top")].into_iter().collect();
        let mut copy = original.clone();
        copy.get_mut("a").unwrap().add_class("person");

        assert_eq!(original.get("a").unwrap().object_classes, vec!["top"]);
        assert_eq!(copy.get("a").unwrap().object_classes, vec!["top", "person"]);
    }

    #[test]
    fn serializes_as_object_keyed_by_dn() {
        let store: Store = [Entry::new("z"), Entry::new("a")].into_iter().collect();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert_eq!(json["z"]["key"], "z");

        let back: Store = serde_json::from_value(json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.get("z").unwrap().key, "z");
    }

    #[test]
    fn deserialize_rejects_key_mismatch() {
        let json = serde_json::json!({
            "a": { "key": "b", "object_classes": ["top"], "attributes": {} }
        });
        let err = serde_json::from_value::<Store>(json).unwrap_err();
        assert!(err.to_string().contains("store key `a` does not match entry dn `b`"));
    }

    #[test]
    fn empty_store() {
        let store = Store::new();
        assert!(store.is_empty());
        assert!(!store.contains_key("a"));
        assert!(store.get("a").is_none());
    }
}
