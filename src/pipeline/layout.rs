//! Path resolution: project root and default input/output locations.
//!
//! The tool is meant to be run from anywhere inside a web project, so the
//! root is found by walking up to the nearest `package.json`. Explicit
//! locations in [`ThumbnailConfig`] always win over derived ones.

use crate::config::ThumbnailConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How many directories above the start point are searched for a root marker.
pub const ROOT_SEARCH_DEPTH: usize = 6;

/// File whose presence marks the project root.
pub const ROOT_MARKER: &str = "package.json";

/// Every location a batch touches, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub project_root: PathBuf,
    pub papers_dir: PathBuf,
    pub thumbs_dir: PathBuf,
    pub manifest_path: PathBuf,
}

/// Walk up from `start` looking for [`ROOT_MARKER`].
///
/// Returns `start` itself when no marker is found within
/// [`ROOT_SEARCH_DEPTH`] levels.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut dir = start;
    for _ in 0..ROOT_SEARCH_DEPTH {
        if dir.join(ROOT_MARKER).exists() {
            return dir.to_path_buf();
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    start.to_path_buf()
}

/// `<root>/public/assets/papers`, or `<root>/src/assets/papers` when the
/// public one is absent.
pub fn default_papers_dir(root: &Path) -> PathBuf {
    let public = root.join("public").join("assets").join("papers");
    if public.exists() {
        public
    } else {
        root.join("src").join("assets").join("papers")
    }
}

pub fn default_thumbs_dir(root: &Path) -> PathBuf {
    root.join("public").join("assets").join("paper_thumbs")
}

pub fn default_manifest_path(root: &Path) -> PathBuf {
    root.join("public")
        .join("assets")
        .join("papers_thumbnails.csv")
}

/// Resolve every location for a batch relative to `cwd`.
///
/// Relative paths in the config are taken relative to `cwd`, not to the
/// project root, matching how a user types them on the command line.
pub fn resolve_layout(config: &ThumbnailConfig, cwd: &Path) -> ResolvedLayout {
    let project_root = match &config.project_root {
        Some(root) => absolutize(root, cwd),
        None => find_project_root(cwd),
    };

    let papers_dir = config
        .papers_dir
        .as_deref()
        .map(|p| absolutize(p, cwd))
        .unwrap_or_else(|| default_papers_dir(&project_root));
    let thumbs_dir = config
        .thumbs_dir
        .as_deref()
        .map(|p| absolutize(p, cwd))
        .unwrap_or_else(|| default_thumbs_dir(&project_root));
    let manifest_path = config
        .manifest_path
        .as_deref()
        .map(|p| absolutize(p, cwd))
        .unwrap_or_else(|| default_manifest_path(&project_root));

    let layout = ResolvedLayout {
        project_root,
        papers_dir,
        thumbs_dir,
        manifest_path,
    };
    debug!(?layout, "resolved layout");
    layout
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
