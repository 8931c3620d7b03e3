//! Scale calculation for `pdftoppm -scale-to`.
//!
//! `-scale-to N` makes the rasteriser scale the page so that its longer edge
//! is `N` pixels. To fit a `max_width x max_height` box we pick the tighter
//! of the two axis ratios and apply it to the longer edge.

use crate::output::PageSize;

/// Compute the `-scale-to` value for a page.
///
/// * With a known page size:
///   `floor(max(1, min(max_w / w, max_h / h) * max(w, h)))`.
/// * Without one: `max(max_w, max_h)`.
///
/// The result is never below 1.
pub fn compute_scale_to(page: Option<PageSize>, max_width: u32, max_height: u32) -> u32 {
    let fallback = max_width.max(max_height).max(1);
    let Some(page) = page else {
        return fallback;
    };
    if !(page.width_pts > 0.0 && page.height_pts > 0.0) {
        return fallback;
    }

    let sx = f64::from(max_width) / page.width_pts;
    let sy = f64::from(max_height) / page.height_pts;
    let scaled = (sx.min(sy) * page.longest_edge()).max(1.0);
    if scaled.is_finite() && scaled < f64::from(u32::MAX) {
        scaled as u32
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_into_default_box() {
        // min(900/612, 1200/792) = 1.4706 → 1.4706 * 792 = 1164.7
        let s = compute_scale_to(Some(PageSize::new(612.0, 792.0)), 900, 1200);
        assert_eq!(s, 1164);
    }

    #[test]
    fn landscape_page_is_bound_by_width() {
        // 900/792 = 1.136 vs 1200/612 = 1.96 → 1.136 * 792 = 900
        let s = compute_scale_to(Some(PageSize::new(792.0, 612.0)), 900, 1200);
        assert_eq!(s, 900);
    }

    #[test]
    fn unknown_page_uses_larger_bound() {
        assert_eq!(compute_scale_to(None, 900, 1200), 1200);
        assert_eq!(compute_scale_to(None, 1600, 1200), 1600);
    }

    #[test]
    fn degenerate_page_uses_larger_bound() {
        assert_eq!(
            compute_scale_to(Some(PageSize::new(0.0, 792.0)), 900, 1200),
            1200
        );
        assert_eq!(
            compute_scale_to(Some(PageSize::new(f64::NAN, 792.0)), 900, 1200),
            1200
        );
    }

    #[test]
    fn tiny_box_is_floored_at_one() {
        let s = compute_scale_to(Some(PageSize::new(100_000.0, 10.0)), 1, 1);
        assert_eq!(s, 1);
    }

    #[test]
    fn never_below_one_across_a_grid() {
        let sizes = [1.0, 3.5, 72.0, 612.0, 792.0, 14_400.0, 1e9];
        let bounds = [1u32, 2, 50, 900, 1200, 10_000];
        for &w in &sizes {
            for &h in &sizes {
                for &bw in &bounds {
                    for &bh in &bounds {
                        let s = compute_scale_to(Some(PageSize::new(w, h)), bw, bh);
                        assert!(s >= 1, "w={w} h={h} bw={bw} bh={bh} gave {s}");
                    }
                }
            }
        }
    }

    #[test]
    fn fitted_edge_never_exceeds_box() {
        let page = PageSize::new(595.276, 841.89);
        let s = compute_scale_to(Some(page), 300, 300);
        let ratio = f64::from(s) / page.longest_edge();
        assert!(page.width_pts * ratio <= 300.0 + 1e-9);
        assert!(page.height_pts * ratio <= 300.0 + 1e-9);
    }
}
