//! Shared resolution arithmetic used by every container.
//!
//! All intermediate math is `f32`; pixel values are rounded (ties away
//! from zero) only when written into a [`Frame`].

use crate::dimension::{DimenSpec, MeasureSpec, SpecMode};
use crate::error::LayoutError;
use crate::frame::Frame;
use crate::layout::spec::Paddings;

/// Round to the nearest integer, ties away from zero.
#[inline]
pub(crate) fn round_px(v: f32) -> i32 {
    if v >= 0.0 { (v + 0.5) as i32 } else { (v - 0.5) as i32 }
}

/// Inner content extent of an axis once pixel padding and a deferred
/// padding percent total are taken out: `value * (1 - pct/100) - px`.
#[inline]
pub(crate) fn inner_size(value: i32, pct_total: f32, px_total: f32) -> f32 {
    value as f32 * (1.0 - pct_total / 100.0) - px_total
}

/// Constraint mode a child's own declared size maps to when the parent
/// hands down leftover space.
#[inline]
pub(crate) fn own_mode(spec: DimenSpec) -> SpecMode {
    match spec {
        DimenSpec::Auto => SpecMode::Auto,
        DimenSpec::Unlimited => SpecMode::Unlimited,
        _ => SpecMode::Pixel,
    }
}

/// Padding totals carried out of [`measure_padding`]: resolved pixels
/// plus the percent still deferred on each axis.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PaddingTotals {
    pub h_px: f32,
    pub h_pt: f32,
    pub v_px: f32,
    pub v_pt: f32,
}

/// Resolve a container's own padding against its constraints. Pixel and
/// em edges resolve immediately; a percent edge resolves when the axis
/// constraint is already pixel and otherwise defers into the percent
/// total, to be finished by [`resolve_percent_padding_h`] /
/// [`resolve_percent_padding_v`] once the axis size is derived.
pub(crate) fn measure_padding(
    width: MeasureSpec,
    height: MeasureSpec,
    padding: Option<&Paddings>,
    frame: &mut Frame,
    em_px: f32,
) -> Result<PaddingTotals, LayoutError> {
    let mut totals = PaddingTotals::default();
    let Some(padding) = padding else {
        return Ok(totals);
    };

    let mut edge = |spec: DimenSpec,
                    axis: MeasureSpec,
                    px: &mut f32,
                    pt: &mut f32|
     -> Result<Option<i32>, LayoutError> {
        if spec.is_zero() {
            return Ok(Some(0));
        }
        match spec {
            DimenSpec::Pixel(v) => {
                *px += v;
                Ok(Some(round_px(v)))
            }
            DimenSpec::Ems(v) => {
                let v = v * em_px;
                *px += v;
                Ok(Some(round_px(v)))
            }
            DimenSpec::Percent(p) => {
                if axis.is_pixel() {
                    let v = p / 100.0 * axis.value() as f32;
                    *px += v;
                    Ok(Some(round_px(v)))
                } else {
                    *pt += p;
                    Ok(None)
                }
            }
            other => Err(LayoutError::InvalidDimension(format!(
                "padding edge can not be {}",
                other.mode_name()
            ))),
        }
    };

    if let Some(v) = edge(padding.left, width, &mut totals.h_px, &mut totals.h_pt)? {
        frame.padding.left = v;
    }
    if let Some(v) = edge(padding.right, width, &mut totals.h_px, &mut totals.h_pt)? {
        frame.padding.right = v;
    }
    if let Some(v) = edge(padding.top, height, &mut totals.v_px, &mut totals.v_pt)? {
        frame.padding.top = v;
    }
    if let Some(v) = edge(padding.bottom, height, &mut totals.v_px, &mut totals.v_pt)? {
        frame.padding.bottom = v;
    }

    if totals.h_pt >= 100.0 {
        return Err(LayoutError::PercentOutOfRange { value: totals.h_pt });
    }
    if totals.v_pt >= 100.0 {
        return Err(LayoutError::PercentOutOfRange { value: totals.v_pt });
    }
    Ok(totals)
}

/// Finish deferred horizontal percent padding once the container width
/// is known. Returns the pixels added.
pub(crate) fn resolve_percent_padding_h(
    padding: Option<&Paddings>,
    frame: &mut Frame,
    final_width: f32,
) -> f32 {
    let Some(padding) = padding else { return 0.0 };
    let mut added = 0.0;
    if let DimenSpec::Percent(p) = padding.left {
        let l = p / 100.0 * final_width;
        frame.padding.left = round_px(l);
        added += l;
    }
    if let DimenSpec::Percent(p) = padding.right {
        let r = p / 100.0 * final_width;
        frame.padding.right = round_px(r);
        added += r;
    }
    added
}

/// Vertical counterpart of [`resolve_percent_padding_h`].
pub(crate) fn resolve_percent_padding_v(
    padding: Option<&Paddings>,
    frame: &mut Frame,
    final_height: f32,
) -> f32 {
    let Some(padding) = padding else { return 0.0 };
    let mut added = 0.0;
    if let DimenSpec::Percent(p) = padding.top {
        let t = p / 100.0 * final_height;
        frame.padding.top = round_px(t);
        added += t;
    }
    if let DimenSpec::Percent(p) = padding.bottom {
        let b = p / 100.0 * final_height;
        frame.padding.bottom = round_px(b);
        added += b;
    }
    added
}

/// If the declared width is `Ratio`, derive it from the frame's height:
/// `width = height * r`. Zero height pins the width to zero.
pub(crate) fn set_ratio_width(width_spec: DimenSpec, frame: &mut Frame, mode: SpecMode) {
    if let DimenSpec::Ratio(r) = width_spec {
        let h = frame.height.value();
        frame.width = if h == 0 {
            MeasureSpec::new(0, mode)
        } else {
            MeasureSpec::new(round_px(h as f32 * r), mode)
        };
    }
}

/// If the declared height is `Ratio`, derive it from the frame's width:
/// `height = width / r`.
pub(crate) fn set_ratio_height(height_spec: DimenSpec, frame: &mut Frame, mode: SpecMode) {
    if let DimenSpec::Ratio(r) = height_spec {
        let w = frame.width.value();
        frame.height = if w == 0 {
            MeasureSpec::new(0, mode)
        } else {
            MeasureSpec::new(round_px(w as f32 / r), mode)
        };
    }
}

/// Commit a derived width against the constraint the parent passed in:
/// `Pixel` keeps the constraint, `Unlimited` takes the derived size, and
/// `Auto` takes the derived size clamped to the constraint's bound.
pub(crate) fn set_new_width(frame: &mut Frame, origin: MeasureSpec, derived: MeasureSpec) {
    frame.width = match origin.mode() {
        SpecMode::Pixel => origin,
        SpecMode::Unlimited => derived,
        SpecMode::Auto => {
            if derived.value() > origin.value() {
                MeasureSpec::pixel(origin.value())
            } else {
                derived
            }
        }
    };
}

/// Error for a dimension mode that is meaningless on an edge, like an
/// auto margin.
pub(crate) fn invalid_edge(kind: &str, spec: DimenSpec) -> LayoutError {
    LayoutError::InvalidDimension(format!("{kind} cannot be {}", spec.mode_name()))
}

/// Height counterpart of [`set_new_width`].
pub(crate) fn set_new_height(frame: &mut Frame, origin: MeasureSpec, derived: MeasureSpec) {
    frame.height = match origin.mode() {
        SpecMode::Pixel => origin,
        SpecMode::Unlimited => derived,
        SpecMode::Auto => {
            if derived.value() > origin.value() {
                MeasureSpec::pixel(origin.value())
            } else {
                derived
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimenSpec;

    #[test]
    fn test_round_px_ties_away_from_zero() {
        assert_eq!(round_px(2.5), 3);
        assert_eq!(round_px(2.4), 2);
        assert_eq!(round_px(-2.5), -3);
        assert_eq!(round_px(-2.4), -2);
        assert_eq!(round_px(0.0), 0);
    }

    #[test]
    fn test_inner_size() {
        assert_eq!(inner_size(200, 0.0, 20.0), 180.0);
        assert_eq!(inner_size(200, 50.0, 0.0), 100.0);
    }

    #[test]
    fn test_measure_padding_pixel_axis() {
        let padding = Paddings {
            left: DimenSpec::Pixel(10.0),
            top: DimenSpec::Percent(10.0),
            right: DimenSpec::Ems(1.0),
            bottom: DimenSpec::Pixel(0.0),
        };
        let mut frame = Frame::default();
        let totals = measure_padding(
            MeasureSpec::pixel(100),
            MeasureSpec::pixel(200),
            Some(&padding),
            &mut frame,
            16.0,
        )
        .unwrap();
        assert_eq!(frame.padding.left, 10);
        assert_eq!(frame.padding.top, 20);
        assert_eq!(frame.padding.right, 16);
        assert_eq!(frame.padding.bottom, 0);
        assert_eq!(totals.h_px, 26.0);
        assert_eq!(totals.v_px, 20.0);
        assert_eq!(totals.h_pt, 0.0);
    }

    #[test]
    fn test_measure_padding_defers_percent_on_auto() {
        let padding = Paddings::all(DimenSpec::Percent(10.0));
        let mut frame = Frame::default();
        let totals = measure_padding(
            MeasureSpec::auto(100),
            MeasureSpec::auto(100),
            Some(&padding),
            &mut frame,
            16.0,
        )
        .unwrap();
        assert_eq!(totals.h_pt, 20.0);
        assert_eq!(totals.v_pt, 20.0);
        assert_eq!(frame.padding.left, 0);

        let added = resolve_percent_padding_h(Some(&padding), &mut frame, 200.0);
        assert_eq!(frame.padding.left, 20);
        assert_eq!(frame.padding.right, 20);
        assert_eq!(added, 40.0);
    }

    #[test]
    fn test_measure_padding_percent_total_overflow() {
        let padding = Paddings::all(DimenSpec::Percent(60.0));
        let mut frame = Frame::default();
        let err = measure_padding(
            MeasureSpec::auto(100),
            MeasureSpec::pixel(100),
            Some(&padding),
            &mut frame,
            16.0,
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::PercentOutOfRange { value: 120.0 });
    }

    #[test]
    fn test_ratio_helpers() {
        let mut frame = Frame::default();
        frame.width = MeasureSpec::pixel(200);
        set_ratio_height(DimenSpec::Ratio(2.0), &mut frame, SpecMode::Pixel);
        assert_eq!(frame.height, MeasureSpec::pixel(100));

        let mut frame = Frame::default();
        frame.height = MeasureSpec::pixel(90);
        set_ratio_width(DimenSpec::Ratio(16.0 / 9.0), &mut frame, SpecMode::Pixel);
        assert_eq!(frame.width, MeasureSpec::pixel(160));
    }

    #[test]
    fn test_set_new_width_clamps_auto() {
        let mut frame = Frame::default();
        set_new_width(&mut frame, MeasureSpec::auto(100), MeasureSpec::pixel(250));
        assert_eq!(frame.width, MeasureSpec::pixel(100));

        set_new_width(&mut frame, MeasureSpec::auto(100), MeasureSpec::pixel(80));
        assert_eq!(frame.width, MeasureSpec::pixel(80));

        set_new_width(
            &mut frame,
            MeasureSpec::unlimited(100),
            MeasureSpec::pixel(250),
        );
        assert_eq!(frame.width, MeasureSpec::pixel(250));

        set_new_width(&mut frame, MeasureSpec::pixel(40), MeasureSpec::pixel(250));
        assert_eq!(frame.width, MeasureSpec::pixel(40));
    }
}
