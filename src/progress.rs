//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn ThumbnailProgressCallback>`] via
//! [`crate::config::ThumbnailConfigBuilder::progress_callback`] to receive
//! events as the batch walks through each PDF.
//!
//! # Example
//!
//! ```rust
//! use paper_thumbs::{ThumbnailConfig, ThumbnailProgressCallback, ThumbnailResult};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     rendered: AtomicUsize,
//! }
//!
//! impl ThumbnailProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, index: usize, total: usize, result: &ThumbnailResult) {
//!         self.rendered.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("[{index}/{total}] {}", result.web_thumb);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { rendered: AtomicUsize::new(0) });
//!
//! let config = ThumbnailConfig::builder()
//!     .progress_callback(counter as Arc<dyn ThumbnailProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::FileError;
use crate::output::ThumbnailResult;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch as it processes each PDF.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Files are processed one at a time, in discovery
/// order, and `index` is 1-based.
pub trait ThumbnailProgressCallback: Send + Sync {
    /// Called once after discovery, before the first file is probed.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is probed.
    fn on_file_start(&self, index: usize, total: usize, pdf: &Path) {
        let _ = (index, total, pdf);
    }

    /// Called when a thumbnail was written.
    fn on_file_complete(&self, index: usize, total: usize, result: &ThumbnailResult) {
        let _ = (index, total, result);
    }

    /// Called when a file was skipped.
    fn on_file_error(&self, index: usize, total: usize, pdf: &Path, error: &FileError) {
        let _ = (index, total, pdf, error);
    }

    /// Called once after every file has been attempted, before the manifest
    /// is written.
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ThumbnailProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ThumbnailConfig`].
pub type ProgressCallback = Arc<dyn ThumbnailProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        batch_total: AtomicUsize,
        batch_success: AtomicUsize,
    }

    impl ThumbnailProgressCallback for TrackingCallback {
        fn on_batch_start(&self, total_files: usize) {
            self.batch_total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _index: usize, _total: usize, _pdf: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _index: usize, _total: usize, _result: &ThumbnailResult) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _index: usize, _total: usize, _pdf: &Path, _error: &FileError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total_files: usize, success_count: usize) {
            self.batch_success.store(success_count, Ordering::SeqCst);
        }
    }

    fn sample_result() -> ThumbnailResult {
        ThumbnailResult {
            pdf_path: PathBuf::from("papers/a.pdf"),
            thumb_path: PathBuf::from("thumbs/a.png"),
            web_pdf: "/assets/papers/a.pdf".into(),
            web_thumb: "/assets/paper_thumbs/a.png".into(),
            scale_to: 1164,
            page_size: None,
            dimensions: None,
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(1, 2, Path::new("a.pdf"));
        cb.on_file_complete(1, 2, &sample_result());
        cb.on_file_error(
            2,
            2,
            Path::new("b.pdf"),
            &FileError::OutputMissing {
                path: PathBuf::from("b.png"),
            },
        );
        cb.on_batch_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_batch_start(3);
        assert_eq!(tracker.batch_total.load(Ordering::SeqCst), 3);

        tracker.on_file_start(1, 3, Path::new("a.pdf"));
        tracker.on_file_complete(1, 3, &sample_result());
        tracker.on_file_start(2, 3, Path::new("b.pdf"));
        tracker.on_file_complete(2, 3, &sample_result());
        tracker.on_file_start(3, 3, Path::new("c.pdf"));
        tracker.on_file_error(
            3,
            3,
            Path::new("c.pdf"),
            &FileError::Io {
                path: PathBuf::from("c.pdf"),
                detail: "denied".into(),
            },
        );

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);

        tracker.on_batch_complete(3, 2);
        assert_eq!(tracker.batch_success.load(Ordering::SeqCst), 2);
    }
}
