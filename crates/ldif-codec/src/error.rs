//! Error types for the codec crate.

/// Errors that can occur while reading or writing entry text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A non-blank line has no `": "` delimiter.
    #[error("{origin}:{line}: malformed line {content:?}: expected `name: value`")]
    MalformedLine {
        origin: String,
        line: usize,
        content: String,
    },

    /// A complete record carries no `dn` attribute.
    #[error("{origin}:{line}: record has no `dn` attribute")]
    MissingKey { origin: String, line: usize },

    /// Reading the input failed, including input that is not valid UTF-8.
    #[error("{origin}: failed to read input")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the output failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
