//! Pipeline stages for a thumbnail batch.
//!
//! Each submodule implements exactly one step, so each can be tested without
//! the external tools installed.
//!
//! ## Data Flow
//!
//! ```text
//! layout ──▶ discover ──▶ probe ──▶ scale ──▶ render ──▶ manifest
//! (paths)    (walk+glob)  (pdfinfo)  (fit)    (pdftoppm)  (CSV)
//! ```
//!
//! 1. [`layout`]   — project root and default directories
//! 2. [`discover`] — sorted list of PDFs matching the glob
//! 3. [`tools`]    — startup check that the poppler tools are on `PATH`
//! 4. [`probe`]    — page size from `pdfinfo`, or `None`
//! 5. [`scale`]    — the `-scale-to` integer
//! 6. [`render`]   — `pdftoppm` invocation and output rename
//! 7. [`manifest`] — `pdf,thumb` CSV written atomically

pub mod discover;
pub mod layout;
pub mod manifest;
pub mod probe;
pub mod render;
pub mod scale;
pub mod tools;
