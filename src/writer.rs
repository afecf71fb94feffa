// src/writer.rs

//! One-shot string-to-file writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Write `contents` to `path`, creating or truncating the file.
///
/// The string is written exactly as given, with no trailing newline
/// appended. The parent directory must already exist; this does not create
/// directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    debug!(?path, bytes = contents.len(), "writing string to file");

    let mut file = File::create(path).with_context(|| format!("creating file {:?}", path))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("writing to file {:?}", path))?;

    Ok(())
}
