//! Configuration types for a thumbnail batch.
//!
//! All batch behaviour is controlled through [`ThumbnailConfig`], built via
//! its [`ThumbnailConfigBuilder`]. Every location is optional: anything left
//! unset is derived from the project layout at run time (see
//! [`crate::pipeline::layout`]).

use crate::error::ThumbError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default glob, relative to the papers directory.
pub const DEFAULT_PATTERN: &str = "**/*.pdf";

/// Default web prefix of the source PDFs in the manifest.
pub const DEFAULT_PAPERS_PREFIX: &str = "/assets/papers";

/// Default web prefix of the thumbnails in the manifest.
pub const DEFAULT_THUMBS_PREFIX: &str = "/assets/paper_thumbs";

/// Configuration for a thumbnail batch.
///
/// Built via [`ThumbnailConfig::builder()`] or using
/// [`ThumbnailConfig::default()`].
///
/// # Example
/// ```rust
/// use paper_thumbs::ThumbnailConfig;
///
/// let config = ThumbnailConfig::builder()
///     .papers_dir("public/assets/papers")
///     .max_width(600)
///     .max_height(800)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ThumbnailConfig {
    /// Project root. If None, searched upwards from the current directory
    /// for a `package.json`.
    pub project_root: Option<PathBuf>,

    /// Where the PDFs live. If None: `<root>/public/assets/papers`, or
    /// `<root>/src/assets/papers` when the former does not exist.
    pub papers_dir: Option<PathBuf>,

    /// Where thumbnails go. If None: `<root>/public/assets/paper_thumbs`.
    pub thumbs_dir: Option<PathBuf>,

    /// CSV manifest path. If None: `<root>/public/assets/papers_thumbnails.csv`.
    pub manifest_path: Option<PathBuf>,

    /// Glob matched against paths relative to the papers dir. Default: `**/*.pdf`.
    pub pattern: String,

    /// Maximum thumbnail width in pixels. Default: 900.
    pub max_width: u32,

    /// Maximum thumbnail height in pixels. Default: 1200.
    pub max_height: u32,

    /// Page-size probe executable. Default: `pdfinfo` looked up on `PATH`.
    pub pdfinfo: PathBuf,

    /// Rasteriser executable. Default: `pdftoppm` looked up on `PATH`.
    pub pdftoppm: PathBuf,

    /// Web prefix for the `pdf` manifest column. Default: `/assets/papers`.
    pub papers_web_prefix: String,

    /// Web prefix for the `thumb` manifest column. Default: `/assets/paper_thumbs`.
    pub thumbs_web_prefix: String,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            project_root: None,
            papers_dir: None,
            thumbs_dir: None,
            manifest_path: None,
            pattern: DEFAULT_PATTERN.to_string(),
            max_width: 900,
            max_height: 1200,
            pdfinfo: PathBuf::from("pdfinfo"),
            pdftoppm: PathBuf::from("pdftoppm"),
            papers_web_prefix: DEFAULT_PAPERS_PREFIX.to_string(),
            thumbs_web_prefix: DEFAULT_THUMBS_PREFIX.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ThumbnailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailConfig")
            .field("project_root", &self.project_root)
            .field("papers_dir", &self.papers_dir)
            .field("thumbs_dir", &self.thumbs_dir)
            .field("manifest_path", &self.manifest_path)
            .field("pattern", &self.pattern)
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .field("pdfinfo", &self.pdfinfo)
            .field("pdftoppm", &self.pdftoppm)
            .field("papers_web_prefix", &self.papers_web_prefix)
            .field("thumbs_web_prefix", &self.thumbs_web_prefix)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ThumbnailProgressCallback>"),
            )
            .finish()
    }
}

impl ThumbnailConfig {
    /// Create a new builder for `ThumbnailConfig`.
    pub fn builder() -> ThumbnailConfigBuilder {
        ThumbnailConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ThumbnailConfig`].
#[derive(Debug)]
pub struct ThumbnailConfigBuilder {
    config: ThumbnailConfig,
}

impl ThumbnailConfigBuilder {
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.project_root = Some(root.into());
        self
    }

    pub fn papers_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.papers_dir = Some(dir.into());
        self
    }

    pub fn thumbs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.thumbs_dir = Some(dir.into());
        self
    }

    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = Some(path.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    pub fn max_width(mut self, px: u32) -> Self {
        self.config.max_width = px;
        self
    }

    pub fn max_height(mut self, px: u32) -> Self {
        self.config.max_height = px;
        self
    }

    pub fn pdfinfo(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.pdfinfo = program.into();
        self
    }

    pub fn pdftoppm(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.pdftoppm = program.into();
        self
    }

    /// Trailing slashes are dropped so `"/assets/papers/"` and
    /// `"/assets/papers"` produce the same manifest.
    pub fn papers_web_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.papers_web_prefix = trim_prefix(prefix.into());
        self
    }

    pub fn thumbs_web_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.thumbs_web_prefix = trim_prefix(prefix.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ThumbnailConfig, ThumbError> {
        let c = &self.config;
        if c.max_width == 0 || c.max_height == 0 {
            return Err(ThumbError::InvalidConfig(format!(
                "max width and height must be ≥ 1, got {}x{}",
                c.max_width, c.max_height
            )));
        }
        if c.pattern.trim().is_empty() {
            return Err(ThumbError::InvalidGlob {
                pattern: c.pattern.clone(),
                detail: "pattern is empty".into(),
            });
        }
        glob::Pattern::new(&c.pattern).map_err(|e| ThumbError::InvalidGlob {
            pattern: c.pattern.clone(),
            detail: e.to_string(),
        })?;
        for prefix in [&c.papers_web_prefix, &c.thumbs_web_prefix] {
            if !prefix.starts_with('/') {
                return Err(ThumbError::InvalidConfig(format!(
                    "web prefix must start with '/', got '{prefix}'"
                )));
            }
        }
        if c.pdfinfo.as_os_str().is_empty() || c.pdftoppm.as_os_str().is_empty() {
            return Err(ThumbError::InvalidConfig(
                "tool executables must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

fn trim_prefix(prefix: String) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        // "/" means the web root itself.
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
