//! Page-size probe: ask `pdfinfo` for the first page's dimensions.
//!
//! The probe never fails the batch. Whatever goes wrong (tool missing, tool
//! exits non-zero, output lacks a `Page size:` line) the caller gets `None`
//! and renders with the fallback scale instead.

use crate::output::PageSize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

/// Matches e.g. `Page size:      612 x 792 pts (letter)` and
/// `Page size:      595.276 x 841.89 pts (A4)`.
static RE_PAGE_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Page size:\s+(\d+(?:\.\d+)?)\s+x\s+(\d+(?:\.\d+)?)(?:\s|$)").unwrap()
});

/// Extract the page size from `pdfinfo` stdout.
///
/// Only the first matching line counts. Zero-sized pages are treated as
/// absent since no scale can be derived from them.
pub fn parse_page_size(output: &str) -> Option<PageSize> {
    output.lines().find_map(|line| {
        let caps = RE_PAGE_SIZE.captures(line)?;
        let w: f64 = caps[1].parse().ok()?;
        let h: f64 = caps[2].parse().ok()?;
        (w > 0.0 && h > 0.0).then(|| PageSize::new(w, h))
    })
}

/// Run `pdfinfo <pdf>` and parse its page size.
pub async fn probe_page_size(pdfinfo: &Path, pdf: &Path) -> Option<PageSize> {
    let output = match Command::new(pdfinfo).arg(pdf).output().await {
        Ok(o) => o,
        Err(e) => {
            warn!("Could not run {}: {}", pdfinfo.display(), e);
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            "{} exited with {} for {}: {}",
            pdfinfo.display(),
            output.status,
            pdf.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let size = parse_page_size(&stdout);
    match size {
        Some(s) => debug!(
            "Page size of {}: {} x {} pts",
            pdf.display(),
            s.width_pts,
            s.height_pts
        ),
        None => debug!("No page size line in pdfinfo output for {}", pdf.display()),
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: &str = "\
Title:          Attention Is All You Need
Producer:       pdfTeX-1.40.25
Tagged:         no
Pages:          15
Encrypted:      no
Page size:      612 x 792 pts (letter)
Page rot:       0
File size:      2215244 bytes
PDF version:    1.5
";

    #[test]
    fn parses_letter() {
        assert_eq!(parse_page_size(LETTER), Some(PageSize::new(612.0, 792.0)));
    }

    #[test]
    fn parses_decimal_a4() {
        let out = "Pages: 3\nPage size:      595.276 x 841.89 pts (A4)\n";
        assert_eq!(parse_page_size(out), Some(PageSize::new(595.276, 841.89)));
    }

    #[test]
    fn parses_without_paper_name() {
        let out = "Page size:      1024 x 768 pts\n";
        assert_eq!(parse_page_size(out), Some(PageSize::new(1024.0, 768.0)));
    }

    #[test]
    fn missing_line_is_none() {
        assert_eq!(parse_page_size("Pages: 1\nEncrypted: no\n"), None);
        assert_eq!(parse_page_size(""), None);
    }

    #[test]
    fn line_must_start_with_prefix() {
        assert_eq!(parse_page_size("Bogus Page size: 612 x 792 pts"), None);
    }

    #[test]
    fn separator_token_is_required() {
        assert_eq!(parse_page_size("Page size:      612 by 792 pts"), None);
        assert_eq!(parse_page_size("Page size:      612x792 pts"), None);
    }

    #[test]
    fn zero_dimension_is_none() {
        assert_eq!(parse_page_size("Page size:      0 x 792 pts"), None);
    }

    #[test]
    fn first_match_wins() {
        let out = "Page    1 size: 300 x 300 pts\nPage size:      612 x 792 pts\nPage size:      1 x 1 pts\n";
        assert_eq!(parse_page_size(out), Some(PageSize::new(612.0, 792.0)));
    }

    #[tokio::test]
    async fn missing_tool_is_none() {
        let size = probe_page_size(
            Path::new("/definitely/not/a/real/pdfinfo"),
            Path::new("paper.pdf"),
        )
        .await;
        assert_eq!(size, None);
    }
}
