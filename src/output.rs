//! Result types produced by a thumbnail batch.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Page dimensions in PostScript points, as reported by `pdfinfo`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_pts: f64,
    pub height_pts: f64,
}

impl PageSize {
    pub fn new(width_pts: f64, height_pts: f64) -> Self {
        Self {
            width_pts,
            height_pts,
        }
    }

    /// The longer of the two edges.
    pub fn longest_edge(&self) -> f64 {
        self.width_pts.max(self.height_pts)
    }
}

/// One successfully rendered PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailResult {
    /// Source PDF on disk.
    pub pdf_path: PathBuf,
    /// Rendered PNG on disk.
    pub thumb_path: PathBuf,
    /// Web-root-relative path of the PDF, e.g. `/assets/papers/a.pdf`.
    pub web_pdf: String,
    /// Web-root-relative path of the PNG, e.g. `/assets/paper_thumbs/a.png`.
    pub web_thumb: String,
    /// The `-scale-to` value handed to the rasteriser.
    pub scale_to: u32,
    /// Probed page size, `None` when the probe fell back to the default.
    pub page_size: Option<PageSize>,
    /// Pixel size of the produced PNG, `None` if its header was unreadable.
    pub dimensions: Option<(u32, u32)>,
}

/// A PDF that was skipped because rendering failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub pdf_path: PathBuf,
    pub error: FileError,
}

/// Aggregate numbers for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Files matched by the glob.
    pub total_files: usize,
    /// Files that produced a thumbnail (equals the manifest row count).
    pub succeeded: usize,
    /// Files that were skipped.
    pub failed: usize,
    /// Files rendered with the fallback scale because the probe failed.
    pub probe_fallbacks: usize,
    /// Wall-clock time of the whole batch.
    pub duration_ms: u64,
}

/// Everything a batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Successful files in discovery order; one manifest row each.
    pub results: Vec<ThumbnailResult>,
    pub failures: Vec<FileFailure>,
    pub stats: BatchStats,
    /// Where the manifest was written.
    pub manifest_path: PathBuf,
}

impl BatchOutput {
    /// `true` when every matched file produced a thumbnail.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
