use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use ldif_codec::{read_store, write_store, DumpConfig};
use ldif_merge::{merge_with_stats, MergeStats};
use ldif_types::Store;

use crate::cli::{Cli, OutputFormat};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let (merged, stats) = merge_files(cli.left(), cli.right())?;
    info!(
        entries = merged.len(),
        added = stats.added,
        merged = stats.merged,
        overridden = stats.attributes_overridden,
        "merge complete"
    );

    let config = DumpConfig::with_line_ending(cli.line_ending);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_output(&mut BufWriter::new(file), &merged, cli.format, &config)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => write_output(&mut io::stdout().lock(), &merged, cli.format, &config)
            .context("failed to write standard output"),
    }
}

/// Read both files completely, then merge them.
pub fn merge_files(left: &Path, right: &Path) -> anyhow::Result<(Store, MergeStats)> {
    let left = load(left)?;
    let right = load(right)?;
    Ok(merge_with_stats(&left, &right))
}

fn load(path: &Path) -> anyhow::Result<Store> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let store = read_store(BufReader::new(file), path.display().to_string())?;
    info!(path = %path.display(), entries = store.len(), "loaded");
    Ok(store)
}

pub fn write_output<W: Write>(
    writer: &mut W,
    store: &Store,
    format: OutputFormat,
    config: &DumpConfig,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Ldif => write_store(writer, store, config)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, store)?;
            writer.flush()?;
        }
    }
    Ok(())
}
