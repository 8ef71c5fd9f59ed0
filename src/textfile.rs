//! Atomic replacement of a textfile-collector output file.
//!
//! The text is written to a uniquely named temporary sibling of the target
//! and then renamed over it, so a scraper reading the target sees either the
//! previous complete file or the new complete file. The temporary file is
//! removed if anything fails before the rename. Temporary names end in
//! `.tmp`, which textfile collectors skip.

use std::io::Write;
use std::path::Path;

use crate::error::CollectorError;

pub fn write_atomic(path: &Path, contents: &str) -> Result<(), CollectorError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|source| CollectorError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let prefix = match path.file_name() {
        Some(name) => format!(".{}.", name.to_string_lossy()),
        None => ".metrics.".to_string(),
    };

    // Dropped (and unlinked) on every early return below.
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    // Scrapers usually run as another user.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o644);
        tmp.as_file().set_permissions(perms)?;
    }

    tmp.persist(path).map_err(|e| CollectorError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Metrics file replaced");
    Ok(())
}
