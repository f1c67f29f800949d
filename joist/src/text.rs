//! Text measurement seam.
//!
//! The engine never rasterizes text; it only needs the extent a string
//! would occupy. [`TextMeasurer`] is the single trait the host supplies,
//! and [`MonospaceMeasurer`] is a deterministic built-in good enough
//! for terminal-style hosts and for tests.

use unicode_width::UnicodeWidthStr;

use crate::primitives::Size;

/// Measures text extents for a given font size, wrapping at an optional
/// maximum width. Implementations must be pure: the same inputs always
/// yield the same size, and measuring has no side effects.
pub trait TextMeasurer {
    /// Extent of `text` rendered at `font_px`, wrapped to `max_width`
    /// when given. An empty string measures zero wide and one line tall.
    fn measure_text(&self, text: &str, font_px: f32, max_width: Option<i32>) -> Size;

    /// Height of one text line at `font_px`. The `em` dimension unit is
    /// a multiple of this.
    fn line_height(&self, font_px: f32) -> f32 {
        font_px * 1.2
    }
}

/// Fixed-advance measurer: every cell is `font_px / 2` wide, wide glyphs
/// take two cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl MonospaceMeasurer {
    fn advance(font_px: f32) -> f32 {
        font_px / 2.0
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_text(&self, text: &str, font_px: f32, max_width: Option<i32>) -> Size {
        let advance = Self::advance(font_px);
        let line_height = self.line_height(font_px);
        let mut lines = 0i32;
        let mut widest = 0.0f32;
        for line in text.split('\n') {
            let cols = line.width() as f32;
            let mut width = cols * advance;
            match max_width {
                Some(max) if max > 0 && width > max as f32 => {
                    // Wrap by whole cells; partial glyphs never overflow.
                    let per_line = (max as f32 / advance).floor().max(1.0);
                    lines += (cols / per_line).ceil() as i32;
                    width = per_line * advance;
                }
                _ => lines += 1,
            }
            widest = widest.max(width);
        }
        lines = lines.max(1);
        Size::new(
            widest.round() as i32,
            (lines as f32 * line_height).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_one_line() {
        let m = MonospaceMeasurer;
        let size = m.measure_text("", 16.0, None);
        assert_eq!(size.width, 0);
        assert_eq!(size.height, m.line_height(16.0).round() as i32);
    }

    #[test]
    fn test_monospace_width() {
        let m = MonospaceMeasurer;
        let size = m.measure_text("abcd", 16.0, None);
        assert_eq!(size.width, 32);
    }

    #[test]
    fn test_wide_glyphs_take_two_cells() {
        let m = MonospaceMeasurer;
        let narrow = m.measure_text("ab", 16.0, None);
        let wide = m.measure_text("日", 16.0, None);
        assert_eq!(narrow.width, wide.width);
    }

    #[test]
    fn test_wrapping_adds_lines() {
        let m = MonospaceMeasurer;
        let one_line = m.measure_text("abcdefgh", 16.0, None);
        let wrapped = m.measure_text("abcdefgh", 16.0, Some(32));
        assert!(wrapped.height > one_line.height);
        assert!(wrapped.width <= 32);
    }

    #[test]
    fn test_multiline_uses_widest_line() {
        let m = MonospaceMeasurer;
        let size = m.measure_text("ab\nabcdef", 16.0, None);
        assert_eq!(size.width, 48);
        assert_eq!(size.height, (2.0 * m.line_height(16.0)).round() as i32);
    }
}
