//! Batch entry points.
//!
//! Files are processed strictly one after another. A failure on one PDF is
//! logged, recorded in [`BatchOutput::failures`], and the loop moves on; only
//! problems that make the whole batch meaningless (no papers directory,
//! nothing matched, manifest not writable) end it early.

use crate::config::ThumbnailConfig;
use crate::error::{FileError, ThumbError};
use crate::output::{BatchOutput, BatchStats, FileFailure, PageSize, ThumbnailResult};
use crate::pipeline::layout::{self, ResolvedLayout};
use crate::pipeline::manifest::{self, ManifestRow};
use crate::pipeline::{discover, probe, render, scale, tools};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Render thumbnails for every matching PDF and write the manifest.
///
/// Locations not set in `config` are resolved relative to the current
/// working directory (see [`crate::pipeline::layout`]).
///
/// # Returns
/// `Ok(BatchOutput)` whenever the manifest was written, even if some files
/// failed (check `output.failures`).
///
/// # Errors
/// Returns `Err(ThumbError)` only for fatal errors:
/// - papers directory does not exist
/// - no file matches the glob
/// - an output directory or the manifest cannot be written
pub async fn generate(config: &ThumbnailConfig) -> Result<BatchOutput, ThumbError> {
    let cwd = std::env::current_dir()
        .map_err(|e| ThumbError::Internal(format!("cannot read current directory: {e}")))?;
    let layout = layout::resolve_layout(config, &cwd);
    generate_in(&layout, config).await
}

/// Same as [`generate`] with every location already resolved.
pub async fn generate_in(
    layout: &ResolvedLayout,
    config: &ThumbnailConfig,
) -> Result<BatchOutput, ThumbError> {
    let start = Instant::now();

    info!("Project root : {}", layout.project_root.display());
    info!("PDFs dir     : {}", layout.papers_dir.display());
    info!("Thumbs dir   : {}", layout.thumbs_dir.display());
    info!("CSV out      : {}", layout.manifest_path.display());

    // ── Step 1: Tools ────────────────────────────────────────────────────
    // Without pdfinfo every file takes the fallback scale; skip the probes.
    let statuses = tools::check_tools(&[config.pdftoppm.as_path(), config.pdfinfo.as_path()]);
    let can_probe = statuses
        .iter()
        .any(|s| s.program == config.pdfinfo && s.is_available());

    // ── Step 2: Discover ─────────────────────────────────────────────────
    if !layout.papers_dir.is_dir() {
        return Err(ThumbError::PapersDirNotFound {
            path: layout.papers_dir.clone(),
        });
    }
    let pdfs = discover::discover_pdfs(&layout.papers_dir, &config.pattern)?;
    if pdfs.is_empty() {
        return Err(ThumbError::NoPdfsFound {
            pattern: config.pattern.clone(),
            dir: layout.papers_dir.clone(),
        });
    }
    let total = pdfs.len();
    info!("Found {} PDFs", total);

    for dir in [
        Some(layout.thumbs_dir.as_path()),
        layout.manifest_path.parent(),
    ]
    .into_iter()
    .flatten()
    {
        std::fs::create_dir_all(dir).map_err(|e| ThumbError::CreateDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Step 3: Render each file ─────────────────────────────────────────
    let mut results = Vec::with_capacity(total);
    let mut failures = Vec::new();
    let mut probe_fallbacks = 0;

    for (i, pdf) in pdfs.iter().enumerate() {
        let index = i + 1;
        info!(
            "[{}/{}] {}",
            index,
            total,
            pdf.file_name().unwrap_or_default().to_string_lossy()
        );
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(index, total, pdf);
        }

        match process_file(pdf, layout, config, can_probe).await {
            Ok(result) => {
                if result.page_size.is_none() {
                    probe_fallbacks += 1;
                }
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_complete(index, total, &result);
                }
                results.push(result);
            }
            Err(e) => {
                error!("{}: {}", pdf.display(), e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_error(index, total, pdf, &e);
                }
                failures.push(FileFailure {
                    pdf_path: pdf.clone(),
                    error: e,
                });
            }
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, results.len());
    }

    // ── Step 4: Manifest ─────────────────────────────────────────────────
    let rows: Vec<ManifestRow> = results
        .iter()
        .map(|r| ManifestRow {
            pdf: r.web_pdf.clone(),
            thumb: r.web_thumb.clone(),
        })
        .collect();
    manifest::write_manifest(&layout.manifest_path, &rows)?;

    let stats = BatchStats {
        total_files: total,
        succeeded: results.len(),
        failed: failures.len(),
        probe_fallbacks,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Wrote {} rows -> {} ({} failed, {}ms)",
        stats.succeeded,
        layout.manifest_path.display(),
        stats.failed,
        stats.duration_ms
    );

    Ok(BatchOutput {
        results,
        failures,
        stats,
        manifest_path: layout.manifest_path.clone(),
    })
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(config: &ThumbnailConfig) -> Result<BatchOutput, ThumbError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ThumbError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate(config))
}

/// What the batch would do with a single PDF, without rendering it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInspection {
    pub pdf_path: PathBuf,
    pub page_size: Option<PageSize>,
    pub scale_to: u32,
}

/// Probe one PDF and compute its scale. Does not need `pdftoppm`.
pub async fn inspect(
    pdf: impl AsRef<Path>,
    config: &ThumbnailConfig,
) -> Result<PdfInspection, ThumbError> {
    let pdf = pdf.as_ref();
    if !pdf.is_file() {
        return Err(ThumbError::InvalidConfig(format!(
            "'{}' is not a file",
            pdf.display()
        )));
    }
    let page_size = probe::probe_page_size(&config.pdfinfo, pdf).await;
    Ok(PdfInspection {
        pdf_path: pdf.to_path_buf(),
        page_size,
        scale_to: scale::compute_scale_to(page_size, config.max_width, config.max_height),
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Probe, scale, render and describe one PDF.
async fn process_file(
    pdf: &Path,
    layout: &ResolvedLayout,
    config: &ThumbnailConfig,
    can_probe: bool,
) -> Result<ThumbnailResult, FileError> {
    let rel = pdf
        .strip_prefix(&layout.papers_dir)
        .map_err(|e| FileError::Io {
            path: pdf.to_path_buf(),
            detail: e.to_string(),
        })?;
    let thumb_path = layout.thumbs_dir.join(rel.with_extension("png"));

    let page_size = if can_probe {
        probe::probe_page_size(&config.pdfinfo, pdf).await
    } else {
        None
    };
    if page_size.is_none() {
        warn!(
            "No page size for {}; using fallback scale",
            pdf.display()
        );
    }
    let scale_to = scale::compute_scale_to(page_size, config.max_width, config.max_height);
    debug!("scale-to {} for {}", scale_to, pdf.display());

    render::render_first_page(&config.pdftoppm, pdf, &thumb_path, scale_to).await?;
    let dimensions = render::thumbnail_dimensions(&thumb_path);

    let row = ManifestRow::for_relative(
        rel,
        &config.papers_web_prefix,
        &config.thumbs_web_prefix,
    );

    Ok(ThumbnailResult {
        pdf_path: pdf.to_path_buf(),
        thumb_path,
        web_pdf: row.pdf,
        web_thumb: row.thumb,
        scale_to,
        page_size,
        dimensions,
    })
}
