use std::path::PathBuf;

use clap::{ArgAction, Parser};
use ldif_types::LineEnding;

#[derive(Parser, Debug)]
#[command(
    name = "ldifmerge",
    about = "Merge two LDIF files keyed by dn; the second file's values win",
    version
)]
pub struct Cli {
    /// Left-hand and right-hand LDIF files, in that order
    #[arg(value_name = "LDIF_FILE", num_args = 2, required = true)]
    pub files: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Line terminator for the merged output
    #[arg(long, default_value = "lf")]
    pub line_ending: LineEnding,

    /// Output notation
    #[arg(long, default_value = "ldif")]
    pub format: OutputFormat,

    /// Write the result here instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Ldif,
    Json,
}

impl Cli {
    pub fn left(&self) -> &PathBuf {
        &self.files[0]
    }

    pub fn right(&self) -> &PathBuf {
        &self.files[1]
    }
}
