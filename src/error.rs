//! Error types for the paper-thumbs library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ThumbError`] — **Fatal**: the batch cannot proceed at all (papers
//!   directory missing, nothing matched the glob, manifest not writable).
//!   Returned as `Err(ThumbError)` from the top-level `generate*` functions.
//!
//! * [`FileError`] — **Non-fatal**: a single PDF failed to render but every
//!   other file is fine. Stored inside [`crate::output::FileFailure`] so one
//!   bad PDF never aborts the batch.
//!
//! A failed page-size probe is neither: it silently falls back to the default
//! scale (see [`crate::pipeline::scale`]).

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the paper-thumbs library.
///
/// Per-file failures use [`FileError`] and are collected in
/// [`crate::output::BatchOutput::failures`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ThumbError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The directory that should contain the PDFs does not exist.
    #[error("PDFs dir does not exist: '{path}'\nPass --papers-dir or create public/assets/papers.")]
    PapersDirNotFound { path: PathBuf },

    /// The papers directory exists but nothing in it matched the glob.
    #[error("No PDFs found with pattern '{pattern}' under '{dir}'")]
    NoPdfsFound { pattern: String, dir: PathBuf },

    /// The glob pattern could not be compiled.
    #[error("Invalid glob pattern '{pattern}': {detail}")]
    InvalidGlob { pattern: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create an output directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the CSV manifest.
    #[error("Failed to write manifest '{path}': {detail}")]
    ManifestWriteFailed { path: PathBuf, detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single PDF.
///
/// The file is skipped and left out of the manifest; the batch continues.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The rasteriser could not be spawned at all.
    #[error("'{tool}' could not be started: {detail}\nInstall poppler-utils (e.g. sudo apt-get install poppler-utils).")]
    ToolNotFound { tool: String, detail: String },

    /// The rasteriser ran but exited unsuccessfully.
    #[error("{tool} exited with {status} for '{pdf}': {stderr}")]
    RenderFailed {
        tool: String,
        pdf: PathBuf,
        status: String,
        stderr: String,
    },

    /// The rasteriser reported success but the expected PNG is absent.
    #[error("Expected rendered image not found: '{path}'")]
    OutputMissing { path: PathBuf },

    /// The rendered PNG could not be moved to its final name.
    #[error("Failed to rename '{from}' to '{to}': {detail}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        detail: String,
    },

    /// Any other filesystem failure tied to one file.
    #[error("I/O error on '{path}': {detail}")]
    Io { path: PathBuf, detail: String },
}
