//! Merge engine for ldifmerge.
//!
//! Combines two entry stores keyed by `dn`. Entries present on only one
//! side pass through. Entries present on both sides take every right-hand
//! scalar attribute and the ordered union of both class lists.
//!
//! The left-hand store is cloned, never mutated.

use tracing::debug;

use ldif_types::{Entry, Store};

/// Counts describing what a merge did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Right-hand entries whose key was absent on the left.
    pub added: usize,
    /// Keys present on both sides.
    pub merged: usize,
    /// Attributes whose left-hand value was replaced by a different right-hand value.
    pub attributes_overridden: usize,
    /// Class tags appended to left-hand entries.
    pub classes_added: usize,
    /// Repeated class tags dropped from left-hand entries.
    pub classes_deduplicated: usize,
}

impl MergeStats {
    /// Returns `true` if the right-hand store changed nothing.
    pub fn is_noop(&self) -> bool {
        self.added == 0
            && self.attributes_overridden == 0
            && self.classes_added == 0
            && self.classes_deduplicated == 0
    }
}

/// Merge `other` into `target`, which must share its key.
///
/// Right-hand attributes overwrite same-named left-hand ones. The class
/// list becomes `target`'s tags without repeats, in their original order,
/// followed by `other`'s tags not already present, in `other`'s order.
pub fn merge_entry(target: &mut Entry, other: &Entry) -> MergeStats {
    let mut stats = MergeStats {
        merged: 1,
        ..Default::default()
    };
    for (name, value) in &other.attributes {
        if let Some(previous) = target.attributes.insert(name.clone(), value.clone()) {
            if previous != *value {
                stats.attributes_overridden += 1;
            }
        }
    }
    stats.classes_deduplicated = target.dedup_classes();
    for class in &other.object_classes {
        if target.add_class(class) {
            stats.classes_added += 1;
        }
    }
    stats
}

/// Merge two stores, returning the result and what changed.
pub fn merge_with_stats(left: &Store, right: &Store) -> (Store, MergeStats) {
    let mut result = left.clone();
    let mut stats = MergeStats::default();

    for entry in right {
        match result.get_mut(&entry.key) {
            Some(existing) => {
                let entry_stats = merge_entry(existing, entry);
                debug!(
                    key = %entry.key,
                    overridden = entry_stats.attributes_overridden,
                    classes_added = entry_stats.classes_added,
                    "merged entry"
                );
                stats.merged += entry_stats.merged;
                stats.attributes_overridden += entry_stats.attributes_overridden;
                stats.classes_added += entry_stats.classes_added;
                stats.classes_deduplicated += entry_stats.classes_deduplicated;
            }
            None => {
                debug!(key = %entry.key, "added entry");
                result.insert(entry.clone());
                stats.added += 1;
            }
        }
    }

    (result, stats)
}

/// Merge two stores.
///
/// Result order: all left-hand keys in left order, then right-hand-only
/// keys in right order.
pub fn merge(left: &Store, right: &Store) -> Store {
    merge_with_stats(left, right).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldif_codec::read_store;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn store(text: &str) -> Store {
        read_store(Cursor::new(text), "test").unwrap()
    }

    fn keys(store: &Store) -> Vec<&str> {
        store.keys().collect()
    }

    #[test]
    fn overlapping_entry_merges_classes_and_attributes() {
        let a = store("dn: x\nobjectclass: top\ncn: Alice\n\n");
        let b = store("dn: x\nobjectclass: person\ncn: Bob\nsn: Smith\n\n");

        let merged = merge(&a, &b);
        let x = merged.get("x").unwrap();
        assert_eq!(x.object_classes, vec!["top", "person"]);
        assert_eq!(x.attribute("cn"), Some("Bob"));
        assert_eq!(x.attribute("sn"), Some("Smith"));
    }

    #[test]
    fn disjoint_keys_keep_left_then_right_order() {
        let a = store("dn: a\nobjectclass: top\n\n");
        let b = store("dn: b\nobjectclass: top\n\n");
        assert_eq!(keys(&merge(&a, &b)), vec!["a", "b"]);
    }

    #[test]
    fn right_only_keys_are_appended_in_right_order() {
        let a = store("dn: m\nobjectclass: top\n\ndn: a\nobjectclass: top\n\n");
        let b = store("dn: z\nobjectclass: top\n\ndn: a\nobjectclass: top\n\ndn: b\nobjectclass: top\n\n");
        assert_eq!(keys(&merge(&a, &b)), vec!["m", "a", "z", "b"]);
    }

    #[test]
    fn left_only_attributes_survive() {
        let a = Store::from_iter([Entry::new("x").with_class("top").with_attribute("mail", "a@x")]);
        let b = Store::from_iter([Entry::new("x").with_class("top").with_attribute("cn", "X")]);
        let x = merge(&a, &b).get("x").cloned().unwrap();
        assert_eq!(x.attribute("mail"), Some("a@x"));
        assert_eq!(x.attribute("cn"), Some("X"));
    }

    #[test]
    fn class_union_drops_duplicates_from_both_sides() {
        let a = Store::from_iter([Entry::new("x")
            .with_class("top")
            .with_class("account")
            .with_class("top")]);
        let b = Store::from_iter([Entry::new("x")
            .with_class("person")
            .with_class("top")
            .with_class("person")]);
        let (merged, stats) = merge_with_stats(&a, &b);
        let x = merged.get("x").unwrap();
        assert_eq!(x.object_classes, vec!["top", "account", "person"]);
        assert_eq!(stats.classes_added, 1);
    }

    #[test]
    fn self_merge_of_parsed_duplicates_collapses_them() {
        let s = store("dn: x\nobjectclass: top\nobjectclass: top\n\n");
        assert_eq!(s.get("x").unwrap().object_classes, vec!["top", "top"]);

        let (merged, stats) = merge_with_stats(&s, &s);
        assert_eq!(merged.get("x").unwrap().object_classes, vec!["top"]);
        assert_eq!(stats.classes_deduplicated, 1);
        assert!(!stats.is_noop());
    }

    #[test]
    fn left_only_entry_keeps_duplicates() {
        let a = store("dn: x\nobjectclass: top\nobjectclass: top\n\n");
        let b = store("dn: y\nobjectclass: top\n\n");
        let merged = merge(&a, &b);
        assert_eq!(merged.get("x").unwrap().object_classes, vec!["top", "top"]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = store("dn: x\nobjectclass: top\ncn: Alice\n\n");
        let b = store("dn: x\nobjectclass: person\ncn: Bob\n\ndn: y\nobjectclass: top\n\n");
        let (a_before, b_before) = (a.clone(), b.clone());

        let _ = merge(&a, &b);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn stats_count_changes() {
        let a = store("dn: x\nobjectclass: top\ncn: Alice\nsn: Smith\n\n");
        let b = store("dn: x\nobjectclass: person\ncn: Bob\nsn: Smith\n\ndn: y\nobjectclass: top\n\n");

        let (_, stats) = merge_with_stats(&a, &b);
        assert_eq!(
            stats,
            MergeStats {
                added: 1,
                merged: 1,
                attributes_overridden: 1,
                classes_added: 1,
                classes_deduplicated: 0,
            }
        );
        assert!(!stats.is_noop());
    }

    #[test]
    fn merging_with_self_is_noop() {
        let a = store("dn: x\nobjectclass: top\ncn: Alice\n\n");
        let (merged, stats) = merge_with_stats(&a, &a);
        assert!(stats.is_noop());
        assert_eq!(merged, a);
    }

    fn arb_store() -> impl Strategy<Value = Store> {
        let entry = (
            "[a-f]",
            prop::collection::vec("[a-d]", 1..5),
            prop::collection::btree_map("[a-d]", "[0-9]{1,2}", 0..4),
        )
            .prop_map(|(key, classes, attributes)| {
                let mut entry = Entry::new(key);
                entry.object_classes = classes;
                entry.attributes = attributes;
                entry
            });
        prop::collection::vec(entry, 0..6).prop_map(Store::from_iter)
    }

    fn without_duplicate_classes(store: &Store) -> Store {
        store
            .iter()
            .cloned()
            .map(|mut entry| {
                entry.dedup_classes();
                entry
            })
            .collect()
    }

    fn dedup(classes: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for class in classes {
            if !out.contains(class) {
                out.push(class.clone());
            }
        }
        out
    }

    proptest! {
        #[test]
        fn empty_right_is_identity(s in arb_store()) {
            prop_assert_eq!(merge(&s, &Store::new()), s);
        }

        #[test]
        fn empty_left_is_identity(s in arb_store()) {
            let merged = merge(&Store::new(), &s);
            prop_assert_eq!(keys(&merged), keys(&s));
            prop_assert_eq!(merged, s);
        }

        #[test]
        fn self_merge_only_removes_class_repeats(s in arb_store()) {
            prop_assert_eq!(merge(&s, &s), without_duplicate_classes(&s));
        }

        #[test]
        fn self_merge_deduplicates_classes(s in arb_store()) {
            let merged = merge(&s, &s);
            for entry in &s {
                let m = merged.get(&entry.key).unwrap();
                prop_assert_eq!(&m.object_classes, &dedup(&entry.object_classes));
            }
        }

        #[test]
        fn right_hand_attributes_win(a in arb_store(), b in arb_store()) {
            let merged = merge(&a, &b);
            for entry in &b {
                let m = merged.get(&entry.key).unwrap();
                for (name, value) in &entry.attributes {
                    prop_assert_eq!(m.attribute(name), Some(value.as_str()));
                }
            }
        }

        #[test]
        fn overlapping_classes_are_ordered_union(a in arb_store(), b in arb_store()) {
            let merged = merge(&a, &b);
            for entry in &b {
                if let Some(left) = a.get(&entry.key) {
                    let mut both = left.object_classes.clone();
                    both.extend(entry.object_classes.iter().cloned());
                    prop_assert_eq!(&merged.get(&entry.key).unwrap().object_classes, &dedup(&both));
                }
            }
        }

        #[test]
        fn keys_are_union_in_order(a in arb_store(), b in arb_store()) {
            let merged = merge(&a, &b);
            let mut expected: Vec<&str> = keys(&a);
            expected.extend(b.keys().filter(|k| !a.contains_key(k)));
            prop_assert_eq!(keys(&merged), expected);
        }
    }
}
