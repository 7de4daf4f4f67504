//! Serializer.
//!
//! Each entry is written as its `dn` line, its class tags in order, then
//! the remaining attributes sorted by name, followed by one empty line
//! element. Blocks are joined with the line terminator, so consecutive
//! entries are separated by a blank line and the output does not end with
//! one.

use std::io::Write;

use ldif_types::{Entry, LineEnding, Store, CLASS_ATTRIBUTE, DELIMITER, KEY_ATTRIBUTE};

use crate::config::DumpConfig;
use crate::error::CodecResult;

fn line(name: &str, value: &str) -> String {
    format!("{name}{DELIMITER}{value}")
}

/// Render one entry block.
pub fn dump_entry(entry: &Entry, line_ending: LineEnding) -> String {
    let mut lines = Vec::with_capacity(2 + entry.object_classes.len() + entry.attributes.len());
    lines.push(line(KEY_ATTRIBUTE, &entry.key));
    for class in &entry.object_classes {
        lines.push(line(CLASS_ATTRIBUTE, class));
    }
    for (name, value) in &entry.attributes {
        if name == KEY_ATTRIBUTE || name == CLASS_ATTRIBUTE {
            continue;
        }
        lines.push(line(name, value));
    }
    lines.push(String::new());
    lines.join(line_ending.as_str())
}

/// Render every entry of `store` in iteration order.
pub fn dump_store(store: &Store, line_ending: LineEnding) -> String {
    store
        .iter()
        .map(|entry| dump_entry(entry, line_ending))
        .collect::<Vec<_>>()
        .join(line_ending.as_str())
}

/// Write [`dump_store`] output to `writer` and flush it.
pub fn write_store<W: Write>(writer: &mut W, store: &Store, config: &DumpConfig) -> CodecResult<()> {
    writer.write_all(dump_store(store, config.line_ending).as_bytes())?;
    writer.flush()?;
    Ok(())
}
