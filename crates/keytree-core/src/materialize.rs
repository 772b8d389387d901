//! # Materializer
//!
//! Writes a source map into a target directory, one file per key, and
//! builds the redacted metadata list for the response document.
//!
//! Keys are relative paths under the target directory. A key containing
//! path separators produces nested files, with intermediate directories
//! created on demand. Keys are used verbatim: `..` segments are not
//! rejected, and callers own the key namespace (see DESIGN.md).
//!
//! Writes are not transactional. A failure partway through leaves the
//! already-written files in place and propagates the error; there is no
//! rollback.

use crate::error::Result;
use crate::models::{MetadataEntry, SourceMap};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Materializes every item of `map` under `target_dir`.
///
/// Creates `target_dir` (and any missing parents) if absent, then writes
/// `stored_value` of each item as the complete contents of the file at the
/// key's relative path, overwriting existing files. Returns one metadata
/// entry per key, sorted by key, carrying the item's display value.
///
/// # Errors
///
/// Any filesystem failure (permissions, disk full) aborts the remaining
/// work and propagates; files already written stay on disk.
pub fn materialize(map: &SourceMap, target_dir: &Path) -> Result<Vec<MetadataEntry>> {
    fs::create_dir_all(target_dir)?;

    let mut metadata = Vec::with_capacity(map.len());
    for (key, item) in map {
        let path = target_dir.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, item.stored_value())?;
        debug!("materialized {}", path.display());

        metadata.push(MetadataEntry {
            name: key.clone(),
            value: item.display_value().to_string(),
        });
    }

    Ok(metadata)
}
