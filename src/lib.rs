//! # paper-thumbs
//!
//! Render a PNG thumbnail of the first page of every PDF in a directory tree
//! and write a CSV manifest mapping each PDF's web path to its thumbnail.
//!
//! The heavy lifting is done by two poppler-utils programs: `pdfinfo` reports
//! the page size, `pdftoppm` rasterises the page. This crate finds the files,
//! picks a `-scale-to` value so each thumbnail fits a `max_width x max_height`
//! box, runs the tools one file at a time, and records the results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! papers dir
//!  │
//!  ├─ 1. Layout    project root + default locations
//!  ├─ 2. Discover  walk + glob (default **/*.pdf), sorted
//!  ├─ 3. Probe     pdfinfo → "Page size: W x H pts"
//!  ├─ 4. Scale     min(max_w/W, max_h/H) × max(W, H)
//!  ├─ 5. Render    pdftoppm -png -singlefile -f 1 -l 1 -scale-to N
//!  └─ 6. Manifest  pdf,thumb CSV
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paper_thumbs::{generate, ThumbnailConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ThumbnailConfig::builder()
//!         .papers_dir("public/assets/papers")
//!         .build()?;
//!     let output = generate(&config).await?;
//!     eprintln!("{} thumbnails, {} failed",
//!         output.stats.succeeded,
//!         output.stats.failed);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `paper-thumbs` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ThumbnailConfig, ThumbnailConfigBuilder};
pub use error::{FileError, ThumbError};
pub use generate::{generate, generate_in, generate_sync, inspect, PdfInspection};
pub use output::{BatchOutput, BatchStats, FileFailure, PageSize, ThumbnailResult};
pub use pipeline::layout::ResolvedLayout;
pub use pipeline::manifest::ManifestRow;
pub use progress::{NoopProgressCallback, ProgressCallback, ThumbnailProgressCallback};
