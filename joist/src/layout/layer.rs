//! Free-form overlay container.
//!
//! A layer places every child independently against its own content
//! box, so children may overlap. Measurement is two phases: one walk
//! that resolves everything resolvable against the incoming
//! constraints, then (only when children were left waiting on an auto
//! container size) a margin fixup walk against the reified inner
//! sizes. There is no main axis, so weights divide the remaining space
//! per child rather than across siblings: a `Weight(w)` width gets
//! `w / (margin_weights + w)` of what is left beside that child's own
//! margins.

use tracing::debug;

use crate::canvas::Canvas;
use crate::dimension::{DimenSpec, MeasureSpec, SpecMode};
use crate::error::LayoutError;
use crate::frame::{Frame, Resolved};
use crate::layout::column::remeasure_if_ratio_moved;
use crate::layout::resolve::{
    inner_size, invalid_edge, measure_padding, own_mode, resolve_percent_padding_h,
    resolve_percent_padding_v, round_px, set_new_height, set_new_width, set_ratio_height,
    set_ratio_width,
};
use crate::layout::{BoxSpec, Element, MeasureContext};
use crate::primitives::Rect;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub spec: BoxSpec,
    pub children: Vec<Element>,
    pub frame: Frame,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(mut self, spec: BoxSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn measure(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &MeasureContext<'_>,
    ) -> Result<(), LayoutError> {
        let origin_width = width;
        let origin_height = height;
        let mut width = width;
        let mut height = height;
        let em = ctx.em_px();

        let totals = measure_padding(width, height, self.spec.padding.as_ref(), &mut self.frame, em)?;
        let h_ppx = totals.h_px;
        let h_ppt = totals.h_pt;
        let v_ppx = totals.v_px;
        let v_ppt = totals.v_pt;

        let mut inner_width = inner_size(width.value(), h_ppt, h_ppx);
        let mut inner_height = inner_size(height.value(), v_ppt, v_ppx);

        let mut flags = vec![Resolved::NONE; self.children.len()];
        let (mut h_px_max, mut v_px_max, mut complete) =
            self.measure_children(width, height, inner_width, inner_height, &mut flags, ctx)?;

        if !width.is_pixel() {
            if width.mode() == SpecMode::Auto {
                let bound = inner_size(width.value(), h_ppt, h_ppx);
                if h_px_max > bound {
                    h_px_max = bound;
                }
            }
            inner_width = h_px_max;
            let w = (inner_width + h_ppx) / (1.0 - h_ppt / 100.0);
            width = MeasureSpec::pixel(round_px(w));
            resolve_percent_padding_h(self.spec.padding.as_ref(), &mut self.frame, w);
        }
        if !height.is_pixel() {
            if height.mode() == SpecMode::Auto {
                let bound = inner_size(height.value(), v_ppt, v_ppx);
                if v_px_max > bound {
                    v_px_max = bound;
                }
            }
            inner_height = v_px_max;
            let h = (inner_height + v_ppx) / (1.0 - v_ppt / 100.0);
            height = MeasureSpec::pixel(round_px(h));
            resolve_percent_padding_v(self.spec.padding.as_ref(), &mut self.frame, h);
        }

        if complete != self.children.len() {
            debug!(
                complete,
                total = self.children.len(),
                "layer margin fixup against reified size"
            );
            complete =
                self.measure_children_margins(inner_width, inner_height, &mut flags);
            if complete != self.children.len() {
                return Err(LayoutError::Unresolved {
                    container: "layer",
                    remaining: self.children.len() - complete,
                });
            }
        }

        set_new_width(&mut self.frame, origin_width, width);
        set_new_height(&mut self.frame, origin_height, height);
        Ok(())
    }

    /// Phase one: resolve each child as far as the incoming constraints
    /// allow. Returns the widest and tallest child extents (margins
    /// included, deferred percent margins divided back out) and how
    /// many children finished completely.
    fn measure_children(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        inner_width: f32,
        inner_height: f32,
        child_flags: &mut [Resolved],
        ctx: &MeasureContext<'_>,
    ) -> Result<(f32, f32, usize), LayoutError> {
        let em = ctx.em_px();
        let mut h_px_max = 0.0f32;
        let mut v_px_max = 0.0f32;
        let mut complete = 0usize;

        for (index, child) in self.children.iter_mut().enumerate() {
            let mut h_px = 0.0f32;
            let mut v_px = 0.0f32;
            let mut h_m_wt = 0.0f32;
            let mut v_m_wt = 0.0f32;
            let mut h_m_pt = 0.0f32;
            let mut v_m_pt = 0.0f32;
            let mut flags = child_flags[index];

            {
                let cf = child.frame_mut();
                cf.clear();
                cf.width = MeasureSpec::unlimited(0);
                cf.height = MeasureSpec::unlimited(0);
            }

            if let Some(m) = child.spec().margin {
                for (edge, flag, horizontal) in [
                    (m.left, Resolved::MARGIN_LEFT, true),
                    (m.right, Resolved::MARGIN_RIGHT, true),
                    (m.top, Resolved::MARGIN_TOP, false),
                    (m.bottom, Resolved::MARGIN_BOTTOM, false),
                ] {
                    let container = if horizontal { width } else { height };
                    let inner = if horizontal { inner_width } else { inner_height };
                    if edge.is_zero() {
                        flags = flags.with(flag);
                        continue;
                    }
                    match edge {
                        DimenSpec::Pixel(v) => {
                            set_margin(child.frame_mut(), flag, round_px(v));
                            if horizontal {
                                h_px += v;
                            } else {
                                v_px += v;
                            }
                            flags = flags.with(flag);
                        }
                        DimenSpec::Ems(v) => {
                            let v = v * em;
                            set_margin(child.frame_mut(), flag, round_px(v));
                            if horizontal {
                                h_px += v;
                            } else {
                                v_px += v;
                            }
                            flags = flags.with(flag);
                        }
                        DimenSpec::Weight(w) => {
                            if horizontal {
                                h_m_wt += w;
                            } else {
                                v_m_wt += w;
                            }
                        }
                        DimenSpec::Percent(p) => {
                            if container.is_pixel() {
                                let v = p / 100.0 * inner;
                                set_margin(child.frame_mut(), flag, round_px(v));
                                if horizontal {
                                    h_px += v;
                                } else {
                                    v_px += v;
                                }
                                flags = flags.with(flag);
                            } else if horizontal {
                                h_m_pt += p;
                            } else {
                                v_m_pt += p;
                            }
                        }
                        other => return Err(invalid_edge("margin", other)),
                    }
                }
            } else {
                flags = flags
                    .with(Resolved::MARGIN_LEFT)
                    .with(Resolved::MARGIN_RIGHT)
                    .with(Resolved::MARGIN_TOP)
                    .with(Resolved::MARGIN_BOTTOM);
            }

            let mut h_px_remain = (inner_width - h_px).max(0.0);
            let mut v_px_remain = (inner_height - v_px).max(0.0);

            if !flags.contains(Resolved::WIDTH) {
                match child.spec().width {
                    DimenSpec::Pixel(w) => {
                        child.frame_mut().width = MeasureSpec::pixel(round_px(w));
                        set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Ems(w) => {
                        child.frame_mut().width = MeasureSpec::pixel(round_px(w * em));
                        set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Weight(w) => {
                        let px = w / (h_m_wt + w) * h_px_remain;
                        child.frame_mut().width = MeasureSpec::new(round_px(px), width.mode());
                        set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Percent(p) => {
                        let px = p / 100.0 * inner_width;
                        child.frame_mut().width = MeasureSpec::new(round_px(px), width.mode());
                        set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Ratio(_) => {
                        if matches!(child.spec().height, DimenSpec::Ratio(_)) {
                            return Err(LayoutError::RatioBothAxes);
                        }
                    }
                    DimenSpec::Auto | DimenSpec::Unlimited => {
                        child.frame_mut().width =
                            MeasureSpec::new(round_px(h_px_remain), own_mode(child.spec().width));
                        set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    }
                }
            }

            if !flags.contains(Resolved::HEIGHT) {
                match child.spec().height {
                    DimenSpec::Pixel(h) => {
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Ems(h) => {
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h * em));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Weight(w) => {
                        let px = w / (v_m_wt + w) * v_px_remain;
                        child.frame_mut().height = MeasureSpec::new(round_px(px), height.mode());
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Percent(p) => {
                        let px = p / 100.0 * inner_height;
                        child.frame_mut().height = MeasureSpec::new(round_px(px), height.mode());
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    DimenSpec::Ratio(_) => {
                        if matches!(child.spec().width, DimenSpec::Ratio(_)) {
                            return Err(LayoutError::RatioBothAxes);
                        }
                    }
                    DimenSpec::Auto | DimenSpec::Unlimited => {
                        child.frame_mut().height =
                            MeasureSpec::new(round_px(v_px_remain), own_mode(child.spec().height));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                }
            }

            if !flags.contains(Resolved::MEASURED) {
                let (w, h) = (child.frame().width, child.frame().height);
                child.measure(w, h, ctx)?;
                if !child.frame().width.is_pixel() || !child.frame().height.is_pixel() {
                    return Err(LayoutError::Unresolved {
                        container: "layer",
                        remaining: 1,
                    });
                }
                remeasure_if_ratio_moved(child, ctx)?;
                flags = flags
                    .with(Resolved::MEASURED)
                    .with(Resolved::WIDTH)
                    .with(Resolved::HEIGHT);

                let cf = child.frame();
                h_px += cf.width.value() as f32;
                v_px += cf.height.value() as f32;
                h_px_remain = (h_px_remain - cf.width.value() as f32).max(0.0);
                v_px_remain = (v_px_remain - cf.height.value() as f32).max(0.0);
            }

            // Weight margins get their share now if the container side
            // is already pixel; otherwise they wait for the reified
            // size and the fixup walk.
            if let Some(m) = child.spec().margin {
                for (edge, flag, horizontal) in [
                    (m.left, Resolved::MARGIN_LEFT, true),
                    (m.right, Resolved::MARGIN_RIGHT, true),
                    (m.top, Resolved::MARGIN_TOP, false),
                    (m.bottom, Resolved::MARGIN_BOTTOM, false),
                ] {
                    if flags.contains(flag) {
                        continue;
                    }
                    let container = if horizontal { width } else { height };
                    if let DimenSpec::Weight(w) = edge {
                        if container.is_pixel() {
                            let (wt, remain) = if horizontal {
                                (h_m_wt, h_px_remain)
                            } else {
                                (v_m_wt, v_px_remain)
                            };
                            let v = w / wt * remain;
                            set_margin(child.frame_mut(), flag, round_px(v));
                            if horizontal {
                                h_px += v;
                            } else {
                                v_px += v;
                            }
                            flags = flags.with(flag);
                        }
                    }
                }
            }

            // Deferred percent margins scale the child's extent the same
            // way percent padding scales a container.
            h_px /= 1.0 - h_m_pt / 100.0;
            v_px /= 1.0 - v_m_pt / 100.0;
            if h_px > h_px_max {
                h_px_max = h_px;
            }
            if v_px > v_px_max {
                v_px_max = v_px;
            }

            child.frame_mut().resolved = flags;
            child_flags[index] = flags;
            if flags.is_complete() {
                complete += 1;
            }
        }

        Ok((h_px_max, v_px_max, complete))
    }

    /// Phase two: margins that waited on an auto container size, now
    /// resolved against the final inner sizes.
    fn measure_children_margins(
        &mut self,
        inner_width: f32,
        inner_height: f32,
        child_flags: &mut [Resolved],
    ) -> usize {
        let mut complete = 0usize;

        for (index, child) in self.children.iter_mut().enumerate() {
            let mut flags = child_flags[index];

            if let Some(m) = child.spec().margin {
                let mut h_m_wt = 0.0f32;
                let mut v_m_wt = 0.0f32;

                for (edge, flag, horizontal) in [
                    (m.left, Resolved::MARGIN_LEFT, true),
                    (m.right, Resolved::MARGIN_RIGHT, true),
                    (m.top, Resolved::MARGIN_TOP, false),
                    (m.bottom, Resolved::MARGIN_BOTTOM, false),
                ] {
                    if flags.contains(flag) {
                        continue;
                    }
                    match edge {
                        DimenSpec::Weight(w) => {
                            if horizontal {
                                h_m_wt += w;
                            } else {
                                v_m_wt += w;
                            }
                        }
                        DimenSpec::Percent(p) => {
                            let inner = if horizontal { inner_width } else { inner_height };
                            set_margin(child.frame_mut(), flag, round_px(p / 100.0 * inner));
                            flags = flags.with(flag);
                        }
                        _ => {}
                    }
                }

                let cf = *child.frame();
                let h_px_remain =
                    inner_width - (cf.width.value() + cf.margin.left + cf.margin.right) as f32;
                let v_px_remain =
                    inner_height - (cf.height.value() + cf.margin.top + cf.margin.bottom) as f32;

                for (edge, flag, horizontal) in [
                    (m.left, Resolved::MARGIN_LEFT, true),
                    (m.right, Resolved::MARGIN_RIGHT, true),
                    (m.top, Resolved::MARGIN_TOP, false),
                    (m.bottom, Resolved::MARGIN_BOTTOM, false),
                ] {
                    if flags.contains(flag) {
                        continue;
                    }
                    if let DimenSpec::Weight(w) = edge {
                        let (wt, remain) = if horizontal {
                            (h_m_wt, h_px_remain)
                        } else {
                            (v_m_wt, v_px_remain)
                        };
                        if wt > 0.0 && remain > 0.0 {
                            set_margin(child.frame_mut(), flag, round_px(w / wt * remain));
                        }
                        flags = flags.with(flag);
                    }
                }
            } else {
                flags = flags
                    .with(Resolved::MARGIN_LEFT)
                    .with(Resolved::MARGIN_RIGHT)
                    .with(Resolved::MARGIN_TOP)
                    .with(Resolved::MARGIN_BOTTOM);
            }

            child.frame_mut().resolved = flags;
            child_flags[index] = flags;
            if flags.is_complete() {
                complete += 1;
            }
        }

        complete
    }

    pub fn layout(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;

        for child in &mut self.children {
            let cf = *child.frame();
            let l = self.frame.padding.left + cf.margin.left;
            let t = self.frame.padding.top + cf.margin.top;
            child.layout(x + l, y + t);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            let cf = child.frame();
            canvas.save();
            canvas.translate(cf.x - self.frame.x, cf.y - self.frame.y);
            canvas.clip_rect(Rect::from_origin_size(
                crate::primitives::Point::ORIGIN,
                cf.size(),
            ));
            child.draw(canvas);
            canvas.restore();
        }
    }
}

fn set_margin(frame: &mut Frame, flag: Resolved, value: i32) {
    if flag == Resolved::MARGIN_LEFT {
        frame.margin.left = value;
    } else if flag == Resolved::MARGIN_RIGHT {
        frame.margin.right = value;
    } else if flag == Resolved::MARGIN_TOP {
        frame.margin.top = value;
    } else {
        frame.margin.bottom = value;
    }
}

impl From<Layer> for Element {
    fn from(layer: Layer) -> Self {
        Element::Layer(Box::new(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, Margins};
    use crate::primitives::Size;
    use crate::text::MonospaceMeasurer;

    fn block(width: DimenSpec, height: DimenSpec) -> Block {
        Block::new().spec(BoxSpec::new(width, height))
    }

    #[test]
    fn test_children_overlap_at_origin() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut layer = Layer::new()
            .child(block(DimenSpec::Pixel(100.0), DimenSpec::Pixel(100.0)))
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Pixel(40.0)));
        layer
            .measure(MeasureSpec::pixel(200), MeasureSpec::pixel(200), &ctx)
            .unwrap();
        layer.layout(0, 0);
        assert_eq!(layer.children[0].frame().rect(), Rect::new(0, 0, 100, 100));
        assert_eq!(layer.children[1].frame().rect(), Rect::new(0, 0, 40, 40));
    }

    #[test]
    fn test_auto_size_takes_largest_child() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut layer = Layer::new()
            .child(block(DimenSpec::Pixel(80.0), DimenSpec::Pixel(30.0)))
            .child(block(DimenSpec::Pixel(30.0), DimenSpec::Pixel(120.0)));
        layer
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        assert_eq!(layer.frame.size(), Size::new(80, 120));
    }

    #[test]
    fn test_percent_child_of_fixed_layer() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut layer =
            Layer::new().child(block(DimenSpec::Percent(50.0), DimenSpec::Percent(25.0)));
        layer
            .measure(MeasureSpec::pixel(400), MeasureSpec::pixel(400), &ctx)
            .unwrap();
        assert_eq!(layer.children[0].frame().size(), Size::new(200, 100));
    }

    #[test]
    fn test_weight_width_shares_with_weight_margins() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let child = Block::new().spec(
            BoxSpec::new(DimenSpec::Weight(2.0), DimenSpec::Pixel(10.0)).margin(Margins {
                left: DimenSpec::Weight(1.0),
                right: DimenSpec::Weight(1.0),
                ..Margins::default()
            }),
        );
        let mut layer = Layer::new().child(child);
        layer
            .measure(MeasureSpec::pixel(400), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        // width takes 2/(2+2) of 400, margins split the 200 left over
        assert_eq!(layer.children[0].frame().size().width, 200);
        assert_eq!(layer.children[0].frame().margin.left, 100);
        assert_eq!(layer.children[0].frame().margin.right, 100);
    }

    #[test]
    fn test_percent_margin_waits_for_auto_size() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let child = Block::new().spec(
            BoxSpec::new(DimenSpec::Pixel(90.0), DimenSpec::Pixel(90.0)).margin(Margins {
                left: DimenSpec::Percent(10.0),
                ..Margins::default()
            }),
        );
        let mut layer = Layer::new().child(child);
        layer
            .measure(MeasureSpec::auto(500), MeasureSpec::pixel(200), &ctx)
            .unwrap();
        // inner width reifies to 90 / (1 - 10/100) = 100
        assert_eq!(layer.frame.size().width, 100);
        assert_eq!(layer.children[0].frame().margin.left, 10);
        layer.layout(0, 0);
        assert_eq!(layer.children[0].frame().x, 10);
    }
}
