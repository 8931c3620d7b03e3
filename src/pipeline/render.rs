//! First-page rasterisation via `pdftoppm`.
//!
//! With `-singlefile`, `pdftoppm` writes exactly `<base>.png` where `<base>`
//! is the output root it was given. We pass the desired path minus its
//! extension and move the file afterwards if the names disagree.

use crate::error::FileError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Extension `pdftoppm -png` appends to the output root.
const PNG_EXT: &str = "png";

/// The output root handed to `pdftoppm` for a desired PNG path.
pub fn output_base(out_png: &Path) -> PathBuf {
    out_png.with_extension("")
}

/// The file `pdftoppm -png -singlefile` produces for `base`.
///
/// This appends rather than replaces: for `paper.v2` the tool writes
/// `paper.v2.png`, not `paper.png`.
pub fn produced_path(base: &Path) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(PNG_EXT);
    PathBuf::from(name)
}

/// Arguments for rendering page 1 of `pdf` to `<base>.png`.
pub fn render_args(pdf: &Path, base: &Path, scale_to: u32) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-png",
        "-singlefile",
        "-f",
        "1",
        "-l",
        "1",
        "-scale-to",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(scale_to.to_string().into());
    args.push(pdf.as_os_str().to_os_string());
    args.push(base.as_os_str().to_os_string());
    args
}

/// Render the first page of `pdf` into `out_png`, scaled so its longer edge
/// is `scale_to` pixels.
pub async fn render_first_page(
    pdftoppm: &Path,
    pdf: &Path,
    out_png: &Path,
    scale_to: u32,
) -> Result<(), FileError> {
    let base = output_base(out_png);
    if let Some(parent) = base.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FileError::Io {
                path: parent.to_path_buf(),
                detail: e.to_string(),
            })?;
    }

    let args = render_args(pdf, &base, scale_to);
    debug!(
        "{} {}",
        pdftoppm.display(),
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = Command::new(pdftoppm)
        .args(&args)
        .output()
        .await
        .map_err(|e| FileError::ToolNotFound {
            tool: pdftoppm.display().to_string(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(FileError::RenderFailed {
            tool: pdftoppm.display().to_string(),
            pdf: pdf.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let produced = produced_path(&base);
    if !produced.is_file() {
        return Err(FileError::OutputMissing { path: produced });
    }
    if produced != out_png {
        tokio::fs::rename(&produced, out_png)
            .await
            .map_err(|e| FileError::RenameFailed {
                from: produced.clone(),
                to: out_png.to_path_buf(),
                detail: e.to_string(),
            })?;
    }
    Ok(())
}

/// Read the pixel size of a rendered PNG from its header.
pub fn thumbnail_dimensions(png: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(png) {
        Ok(dims) => Some(dims),
        Err(e) => {
            warn!("Could not read dimensions of {}: {}", png.display(), e);
            None
        }
    }
}
