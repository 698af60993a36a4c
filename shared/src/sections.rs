//! Section visibility math for the intersection adapter.
//!
//! The viewer lays five full-height sections out in a virtual document and
//! watches them against the viewport. A section "fires" when its visible fraction crosses
//! the threshold; the viewport is inset on both edges before the overlap
//! is measured.

/// Fraction of a section that must be visible for it to fire.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Inset applied to both viewport edges, as a fraction of viewport height.
pub const VIEWPORT_INSET: f64 = 0.1;

/// One observed section: a horizontal band of the virtual document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBand {
    /// Top edge in document coordinates.
    pub top: f64,
    pub height: f64,
}

impl SectionBand {
    /// Fraction of this band inside the inset viewport, in `[0,1]`.
    ///
    /// `viewport_top` is the scroll offset; the viewport spans
    /// `[viewport_top, viewport_top + viewport_height]` before the inset
    /// shrinks it by [`VIEWPORT_INSET`] on each edge.
    pub fn visible_fraction(&self, viewport_top: f64, viewport_height: f64) -> f64 {
        if self.height <= 0.0 || viewport_height <= 0.0 {
            return 0.0;
        }
        let inset = viewport_height * VIEWPORT_INSET;
        let vp_top = viewport_top + inset;
        let vp_bottom = viewport_top + viewport_height - inset;
        let overlap = (self.top + self.height).min(vp_bottom) - self.top.max(vp_top);
        (overlap / self.height).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self, viewport_top: f64, viewport_height: f64) -> bool {
        self.visible_fraction(viewport_top, viewport_height) >= VISIBILITY_THRESHOLD
    }
}

/// Lay `count` full-viewport sections out back to back.
pub fn stacked_bands(count: usize, viewport_height: f64) -> Vec<SectionBand> {
    (0..count)
        .map(|i| SectionBand {
            top: i as f64 * viewport_height,
            height: viewport_height,
        })
        .collect()
}

/// Parse a section's declared view-index attribute.
///
/// Non-numeric attributes are skipped. Range checking is left to the
/// state machine, where an out-of-range index is inert.
pub fn parse_view_attr(attr: &str) -> Option<usize> {
    attr.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_covered_section_is_visible() {
        let band = SectionBand {
            top: 0.0,
            height: 720.0,
        };
        assert!(band.is_visible(0.0, 720.0));
        // Inset trims 10% off each edge, so coverage caps at 80%.
        let f = band.visible_fraction(0.0, 720.0);
        assert!((f - 0.8).abs() < 1e-9);
    }

    #[test]
    fn section_scrolled_half_in_crosses_threshold() {
        let h = 720.0;
        let band = SectionBand { top: h, height: h };
        // Section fully below the viewport.
        assert!(!band.is_visible(0.0, h));
        // Scrolled so 40% of the band is inside: under threshold.
        assert!(!band.is_visible(0.4 * h, h));
        // Scrolled 70% of the way: visible fraction 0.6, above threshold.
        assert!(band.is_visible(0.7 * h, h));
    }

    #[test]
    fn inset_shrinks_effective_viewport() {
        let h = 1000.0;
        let band = SectionBand {
            top: 0.0,
            height: h,
        };
        // Band exactly at the viewport: only the inset region overlaps.
        let f = band.visible_fraction(0.0, h);
        assert!((f - 0.8).abs() < 1e-9);
        // Scrolled one full viewport away: nothing overlaps.
        assert_eq!(band.visible_fraction(h, h), 0.0);
    }

    #[test]
    fn degenerate_geometry_is_never_visible() {
        let band = SectionBand {
            top: 0.0,
            height: 0.0,
        };
        assert_eq!(band.visible_fraction(0.0, 720.0), 0.0);
        let band = SectionBand {
            top: 0.0,
            height: 720.0,
        };
        assert_eq!(band.visible_fraction(0.0, 0.0), 0.0);
    }

    #[test]
    fn stacked_bands_tile_the_document() {
        let bands = stacked_bands(5, 720.0);
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[0].top, 0.0);
        assert_eq!(bands[4].top, 4.0 * 720.0);
        for b in &bands {
            assert_eq!(b.height, 720.0);
        }
    }

    #[test]
    fn view_attr_parse_guard() {
        assert_eq!(parse_view_attr("3"), Some(3));
        assert_eq!(parse_view_attr(" 4 "), Some(4));
        assert_eq!(parse_view_attr("intro"), None);
        assert_eq!(parse_view_attr(""), None);
        assert_eq!(parse_view_attr("-1"), None);
        // Out of view range still parses; the state machine drops it.
        assert_eq!(parse_view_attr("9"), Some(9));
    }
}
