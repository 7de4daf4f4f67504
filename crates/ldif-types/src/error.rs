use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("record starting at line {line} has no `dn` attribute")]
    MissingKey { line: usize },
}
