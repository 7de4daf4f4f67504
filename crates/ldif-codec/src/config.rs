use serde::{Deserialize, Serialize};

use ldif_types::LineEnding;

/// Serializer settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Terminator placed between lines and between entry blocks.
    pub line_ending: LineEnding,
}

impl DumpConfig {
    pub fn with_line_ending(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }
}
