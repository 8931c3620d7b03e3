//! CSV manifest mapping each PDF's web path to its thumbnail's web path.
//!
//! The manifest is written once, after every file has been attempted.
//! Writing goes to a temp file next to the target which is then renamed over
//! it, so a reader never sees a half-written manifest.

use crate::error::ThumbError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};
use tracing::debug;

/// Column names, in order.
pub const MANIFEST_HEADER: [&str; 2] = ["pdf", "thumb"];

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub pdf: String,
    pub thumb: String,
}

impl ManifestRow {
    /// Row for a PDF at `rel` (relative to the papers dir).
    ///
    /// The `pdf` column always carries a `.pdf` extension and the `thumb`
    /// column a `.png` one, whatever the case of the source extension.
    pub fn for_relative(rel: &Path, papers_prefix: &str, thumbs_prefix: &str) -> Self {
        Self {
            pdf: web_path(papers_prefix, &rel.with_extension("pdf")),
            thumb: web_path(thumbs_prefix, &rel.with_extension("png")),
        }
    }
}

/// Join a web prefix and a relative filesystem path with `/`.
pub fn web_path(prefix: &str, rel: &Path) -> String {
    let rel = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{rel}")
}

/// Serialise rows as CSV, header first, into any writer.
///
/// The header is always written, so an empty batch still yields a valid
/// two-column file.
pub fn write_rows<W: Write>(writer: W, rows: &[ManifestRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(MANIFEST_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Mode for a freshly created manifest; it is served as a public asset.
#[cfg(unix)]
const NEW_MANIFEST_MODE: u32 = 0o644;

/// Give the temp file the permissions the manifest should end up with: the
/// previous manifest's mode if there is one, world-readable otherwise.
#[cfg(unix)]
fn manifest_permissions(target: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        Err(_) => std::fs::Permissions::from_mode(NEW_MANIFEST_MODE),
    }
}

/// Write the manifest to `path`, replacing any previous one.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> Result<(), ThumbError> {
    let write_failed = |detail: String| ThumbError::ManifestWriteFailed {
        path: path.to_path_buf(),
        detail,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| ThumbError::CreateDirFailed {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| write_failed(e.to_string()))?;
    write_rows(&mut tmp, rows).map_err(|e| write_failed(e.to_string()))?;
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(manifest_permissions(path))
        .map_err(|e| write_failed(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_failed(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| write_failed(e.error.to_string()))?;

    debug!("Wrote {} manifest rows to {}", rows.len(), path.display());
    Ok(())
}
