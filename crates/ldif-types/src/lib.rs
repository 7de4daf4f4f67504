//! Foundation types for ldifmerge.
//!
//! This crate provides the record, entry, and store types shared by the
//! codec, the merge engine, and the command-line tool.
//!
//! # Key Types
//!
//! - [`Record`] -- Raw attribute block as read from text, key not yet extracted
//! - [`Entry`] -- Directory entry keyed by its `dn`, with class tags and scalar attributes
//! - [`Store`] -- Insertion-ordered mapping from key to [`Entry`]
//! - [`LineEnding`] -- Output line terminator

pub mod entry;
pub mod error;
pub mod line_ending;
pub mod store;

pub use entry::{Entry, Record, CLASS_ATTRIBUTE, DELIMITER, KEY_ATTRIBUTE};
pub use error::TypeError;
pub use line_ending::LineEnding;
pub use store::Store;
