//! Per-box measurement output.
//!
//! Every box owns a [`Frame`]: the position and constrained size the
//! measure passes fill in, the resolved margin and padding edges, and a
//! [`Resolved`] flag set recording which of those quantities have been
//! pinned so far. Later passes consult the flags instead of re-deriving
//! whether a quantity is known.

use std::fmt;

use crate::dimension::MeasureSpec;
use crate::primitives::{Rect, Size};

/// Resolved pixel values for the four edges of a margin or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    #[inline]
    pub const fn horizontal(self) -> i32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(self) -> i32 {
        self.top + self.bottom
    }
}

/// Which measured quantities of a box have been resolved.
///
/// A small flag set rather than booleans so composite queries
/// ("everything on the horizontal axis") stay one mask test. All
/// transitions go through [`Resolved::with`], which only ever adds
/// flags; a pass never un-resolves a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolved(u16);

impl Resolved {
    pub const NONE: Resolved = Resolved(0);
    pub const WIDTH: Resolved = Resolved(1 << 0);
    pub const HEIGHT: Resolved = Resolved(1 << 1);
    pub const MARGIN_LEFT: Resolved = Resolved(1 << 2);
    pub const MARGIN_RIGHT: Resolved = Resolved(1 << 3);
    pub const MARGIN_TOP: Resolved = Resolved(1 << 4);
    pub const MARGIN_BOTTOM: Resolved = Resolved(1 << 5);
    /// The box's own `measure` has run against its final constraints.
    pub const MEASURED: Resolved = Resolved(1 << 6);

    /// Width plus both horizontal margins.
    pub const H_COMPLETE: Resolved =
        Resolved(Self::WIDTH.0 | Self::MARGIN_LEFT.0 | Self::MARGIN_RIGHT.0);
    /// Height plus both vertical margins.
    pub const V_COMPLETE: Resolved =
        Resolved(Self::HEIGHT.0 | Self::MARGIN_TOP.0 | Self::MARGIN_BOTTOM.0);
    /// Everything, including the measure itself.
    pub const COMPLETE: Resolved =
        Resolved(Self::H_COMPLETE.0 | Self::V_COMPLETE.0 | Self::MEASURED.0);

    #[inline]
    #[must_use]
    pub const fn with(self, other: Resolved) -> Resolved {
        Resolved(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Resolved) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_complete(self) -> bool {
        self.contains(Self::COMPLETE)
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Resolved, &str); 7] = [
            (Resolved::WIDTH, "w"),
            (Resolved::HEIGHT, "h"),
            (Resolved::MARGIN_LEFT, "ml"),
            (Resolved::MARGIN_RIGHT, "mr"),
            (Resolved::MARGIN_TOP, "mt"),
            (Resolved::MARGIN_BOTTOM, "mb"),
            (Resolved::MEASURED, "measured"),
        ];
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

/// Measured geometry of one box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Absolute position in root coordinates, set by layout.
    pub x: i32,
    pub y: i32,
    /// Constrained sizes. After a successful measure both carry
    /// `Pixel` mode with the final outer size of the box.
    pub width: MeasureSpec,
    pub height: MeasureSpec,
    pub margin: Edges,
    pub padding: Edges,
    pub resolved: Resolved,
}

impl Frame {
    /// Reset everything a measure pass fills in. Called at the top of
    /// each layout cycle so stale values from a previous frame never
    /// leak into this one.
    pub fn clear(&mut self) {
        *self = Frame::default();
    }

    /// Final outer size; zero on any axis not yet pinned to pixels.
    pub fn size(&self) -> Size {
        Size::new(
            if self.width.is_pixel() { self.width.value() } else { 0 },
            if self.height.is_pixel() { self.height.value() } else { 0 },
        )
    }

    /// Absolute bounds in root coordinates.
    pub fn rect(&self) -> Rect {
        let size = self.size();
        Rect::new(self.x, self.y, size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_with_is_additive() {
        let r = Resolved::NONE.with(Resolved::WIDTH);
        assert!(r.contains(Resolved::WIDTH));
        assert!(!r.contains(Resolved::HEIGHT));
        let r = r.with(Resolved::MARGIN_LEFT).with(Resolved::MARGIN_RIGHT);
        assert!(r.contains(Resolved::H_COMPLETE));
        assert!(!r.is_complete());
    }

    #[test]
    fn test_resolved_complete() {
        let r = Resolved::H_COMPLETE
            .with(Resolved::V_COMPLETE)
            .with(Resolved::MEASURED);
        assert!(r.is_complete());
        assert_eq!(r, Resolved::COMPLETE);
    }

    #[test]
    fn test_resolved_display() {
        let r = Resolved::WIDTH.with(Resolved::MARGIN_LEFT);
        assert_eq!(r.to_string(), "w|ml");
        assert_eq!(Resolved::NONE.to_string(), "none");
    }

    #[test]
    fn test_frame_rect_requires_pixel() {
        let mut frame = Frame::default();
        frame.x = 10;
        frame.y = 20;
        frame.width = MeasureSpec::pixel(100);
        frame.height = MeasureSpec::auto(50);
        assert_eq!(frame.rect(), Rect::new(10, 20, 100, 0));
        frame.height = MeasureSpec::pixel(50);
        assert_eq!(frame.size(), Size::new(100, 50));
    }

    #[test]
    fn test_clear_resets() {
        let mut frame = Frame {
            x: 5,
            y: 5,
            width: MeasureSpec::pixel(10),
            height: MeasureSpec::pixel(10),
            margin: Edges {
                left: 1,
                top: 2,
                right: 3,
                bottom: 4,
            },
            padding: Edges::ZERO,
            resolved: Resolved::COMPLETE,
        };
        frame.clear();
        assert_eq!(frame, Frame::default());
    }
}
