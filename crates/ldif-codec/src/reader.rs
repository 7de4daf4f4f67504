//! Record parser and store construction.
//!
//! Input is a sequence of `name: value` lines. A blank line closes the
//! current block, which is emitted only if it carried at least one
//! `objectclass` line. A block still open at end of input is discarded:
//! only a blank line emits.

use std::io::BufRead;
use std::mem;

use tracing::debug;

use ldif_types::{Entry, Record, Store, TypeError, DELIMITER};

use crate::error::{CodecError, CodecResult};

const DEFAULT_ORIGIN: &str = "<input>";

/// Lazy iterator over the records of a text stream.
///
/// Yields at most one error; after an error or end of input it returns
/// `None` and reads nothing further.
pub struct Records<R> {
    reader: R,
    origin: String,
    line: usize,
    buf: String,
    current: Record,
    done: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            origin: DEFAULT_ORIGIN.to_string(),
            line: 0,
            buf: String::new(),
            current: Record::default(),
            done: false,
        }
    }

    /// Label carried in error messages, typically the file path.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = CodecResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    if self.current.has_classes() {
                        debug!(
                            origin = %self.origin,
                            line = self.current.line,
                            "dropping record not followed by a blank line"
                        );
                    }
                    return None;
                }
                Ok(_) => self.line += 1,
                Err(source) => {
                    self.done = true;
                    return Some(Err(CodecError::Read {
                        origin: self.origin.clone(),
                        source,
                    }));
                }
            }

            let text = self.buf.trim_end_matches(&['\r', '\n'][..]);
            if text.is_empty() {
                let finished = mem::take(&mut self.current);
                if finished.has_classes() {
                    return Some(Ok(finished));
                }
                continue;
            }

            match text.split_once(DELIMITER) {
                Some((tag, value)) => {
                    if self.current.line == 0 {
                        self.current.line = self.line;
                    }
                    self.current.push(tag, value);
                }
                None => {
                    self.done = true;
                    return Some(Err(CodecError::MalformedLine {
                        origin: self.origin.clone(),
                        line: self.line,
                        content: text.to_string(),
                    }));
                }
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Records<R> {}

/// Read every record from `reader`.
pub fn parse_records<R: BufRead>(reader: R) -> CodecResult<Vec<Record>> {
    Records::new(reader).collect()
}

/// Read `reader` to the end and key its records by `dn`.
///
/// A later record with an already-seen `dn` replaces the earlier one in
/// place.
pub fn read_store<R: BufRead>(reader: R, origin: impl Into<String>) -> CodecResult<Store> {
    let origin = origin.into();
    let mut store = Store::new();
    for record in Records::new(reader).with_origin(origin.clone()) {
        let entry = Entry::try_from(record?).map_err(|e| match e {
            TypeError::MissingKey { line } => CodecError::MissingKey {
                origin: origin.clone(),
                line,
            },
        })?;
        if let Some(previous) = store.insert(entry) {
            debug!(origin = %origin, key = %previous.key, "duplicate key replaces earlier entry");
        }
    }
    debug!(origin = %origin, entries = store.len(), "store built");
    Ok(store)
}
