//! Writing sidecars to disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::sidecar::SidecarDocument;

/// How the destination file is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and write in place. Concurrent writers race; the last one wins.
    #[default]
    Overwrite,
    /// Write a temp file next to the destination and rename it over the target.
    Atomic,
}

/// Serialize `document` and write it to `destination`, replacing any
/// existing content.
///
/// The parent directory is never created.
///
/// # Errors
///
/// Returns [`Error::Io`] if the parent directory is missing or not writable,
/// and [`Error::Persist`] if an atomic rename fails.
pub fn write(document: &SidecarDocument, destination: &Path, mode: WriteMode) -> Result<()> {
    let json = document.to_json_pretty()?;

    match mode {
        WriteMode::Overwrite => {
            fs::write(destination, json.as_bytes()).map_err(|e| Error::io(destination, e))?;
        },
        WriteMode::Atomic => write_atomic(destination, json.as_bytes())?,
    }

    debug!(
        path = %destination.display(),
        bytes = json.len(),
        ?mode,
        "Sidecar written"
    );
    Ok(())
}

fn write_atomic(destination: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(destination, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(destination, e))?;
    tmp.flush().map_err(|e| Error::io(destination, e))?;
    tmp.persist(destination).map_err(|e| Error::Persist {
        path: destination.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
