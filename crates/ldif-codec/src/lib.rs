//! Text codec for ldifmerge.
//!
//! Reads blank-line separated `name: value` blocks into [`Record`]s and
//! [`Store`]s, and writes stores back out in the same notation with a
//! fixed line order per entry.
//!
//! [`Record`]: ldif_types::Record
//! [`Store`]: ldif_types::Store

pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

pub use config::DumpConfig;
pub use error::{CodecError, CodecResult};
pub use reader::{parse_records, read_store, Records};
pub use writer::{dump_entry, dump_store, write_store};
