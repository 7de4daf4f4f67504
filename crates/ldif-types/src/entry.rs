//! Records and entries.
//!
//! A [`Record`] is what the parser accumulates between blank lines: class
//! tags plus every other attribute, the `dn` included. Converting it into
//! an [`Entry`] pulls the `dn` out into the structural key.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Attribute whose value identifies an entry within a store.
pub const KEY_ATTRIBUTE: &str = "dn";

/// Repeatable attribute holding the entry's class tags.
pub const CLASS_ATTRIBUTE: &str = "objectclass";

/// Separator between attribute name and value on a line.
pub const DELIMITER: &str = ": ";

/// An attribute block as read from text, before key extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line number of the block's first line.
    pub line: usize,
    /// Class tags in the order they were read. May contain duplicates.
    pub object_classes: Vec<String>,
    /// All other attributes. Later assignments overwrite earlier ones.
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record starting at `line`.
    pub fn new(line: usize) -> Self {
        Self {
            line,
            ..Default::default()
        }
    }

    /// Returns `true` if at least one class tag was read.
    pub fn has_classes(&self) -> bool {
        !self.object_classes.is_empty()
    }

    /// Apply one `tag: value` pair.
    pub fn push(&mut self, tag: &str, value: &str) {
        if tag == CLASS_ATTRIBUTE {
            self.object_classes.push(value.to_string());
        } else {
            self.attributes.insert(tag.to_string(), value.to_string());
        }
    }
}

/// A directory entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Value of the `dn` attribute.
    pub key: String,
    /// Class tags, first-seen order.
    pub object_classes: Vec<String>,
    /// Scalar attributes other than `dn` and `objectclass`, sorted by name.
    pub attributes: BTreeMap<String, String>,
}

impl Entry {
    /// Create an entry with no classes and no attributes.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            object_classes: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder: append a class tag.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.object_classes.push(class.into());
        self
    }

    /// Builder: set a scalar attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append `class` unless already present. Returns `true` if appended.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.object_classes.iter().any(|c| c == class) {
            return false;
        }
        self.object_classes.push(class.to_string());
        true
    }

    /// Drop repeated class tags, keeping each first occurrence in place.
    /// Returns the number removed.
    pub fn dedup_classes(&mut self) -> usize {
        let before = self.object_classes.len();
        let mut seen = HashSet::new();
        self.object_classes.retain(|class| seen.insert(class.clone()));
        before - self.object_classes.len()
    }

    /// Look up a scalar attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl TryFrom<Record> for Entry {
    type Error = TypeError;

    fn try_from(mut record: Record) -> Result<Self, Self::Error> {
        let key = record
            .attributes
            .remove(KEY_ATTRIBUTE)
            .ok_or(TypeError::MissingKey { line: record.line })?;
        Ok(Self {
            key,
            object_classes: record.object_classes,
            attributes: record.attributes,
        })
    }
}
