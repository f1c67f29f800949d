//! Viewport container holding at most one child.
//!
//! A scroll box decouples the child's size from its own: on any axis
//! where the child declares `Auto` or `Unlimited`, the child is
//! measured with an unlimited constraint so it takes its natural size
//! even when that exceeds the viewport. The overflow is clipped at
//! draw time; panning the clip window is the host's concern.

use tracing::debug;

use crate::canvas::Canvas;
use crate::dimension::{DimenSpec, MeasureSpec, SpecMode};
use crate::error::LayoutError;
use crate::frame::Frame;
use crate::layout::resolve::{
    inner_size, invalid_edge, measure_padding, resolve_percent_padding_h,
    resolve_percent_padding_v, round_px, set_new_height, set_new_width, set_ratio_height,
    set_ratio_width,
};
use crate::layout::{BoxSpec, Element, MeasureContext};
use crate::primitives::Rect;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scroll {
    pub spec: BoxSpec,
    pub children: Vec<Element>,
    pub frame: Frame,
}

impl Scroll {
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
        if self.children.len() > 1 {
            return Err(LayoutError::ScrollChildCount {
                count: self.children.len(),
            });
        }

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

        let inner_width = inner_size(width.value(), h_ppt, h_ppx);
        let inner_height = inner_size(height.value(), v_ppt, v_ppx);

        let mut h_px = 0.0f32;
        let mut v_px = 0.0f32;

        if let Some(child) = self.children.first_mut() {
            let mut h_px_used = 0.0f32;
            let mut v_px_used = 0.0f32;
            let mut h_wt = 0.0f32;
            let mut v_wt = 0.0f32;
            let mut h_pt = 0.0f32;
            let mut v_pt = 0.0f32;

            {
                let cf = child.frame_mut();
                cf.clear();
                cf.width = MeasureSpec::unlimited(0);
                cf.height = MeasureSpec::unlimited(0);
            }

            if let Some(m) = child.spec().margin {
                for (edge, horizontal, leading) in [
                    (m.top, false, true),
                    (m.bottom, false, false),
                    (m.left, true, true),
                    (m.right, true, false),
                ] {
                    let container = if horizontal { width } else { height };
                    let inner = if horizontal { inner_width } else { inner_height };
                    let set = |cf: &mut Frame, v: i32| match (horizontal, leading) {
                        (true, true) => cf.margin.left = v,
                        (true, false) => cf.margin.right = v,
                        (false, true) => cf.margin.top = v,
                        (false, false) => cf.margin.bottom = v,
                    };
                    match edge {
                        DimenSpec::Pixel(v) => {
                            set(child.frame_mut(), round_px(v));
                            if horizontal {
                                h_px += v;
                                h_px_used += v;
                            } else {
                                v_px += v;
                                v_px_used += v;
                            }
                        }
                        DimenSpec::Ems(v) => {
                            let v = v * em;
                            set(child.frame_mut(), round_px(v));
                            if horizontal {
                                h_px += v;
                                h_px_used += v;
                            } else {
                                v_px += v;
                                v_px_used += v;
                            }
                        }
                        DimenSpec::Weight(w) => {
                            // only shares space inside a fixed viewport
                            if container.is_pixel() {
                                if horizontal {
                                    h_wt += w;
                                } else {
                                    v_wt += w;
                                }
                            }
                        }
                        DimenSpec::Percent(p) => {
                            if container.is_pixel() {
                                let v = p / 100.0 * inner;
                                set(child.frame_mut(), round_px(v));
                                if horizontal {
                                    h_px += v;
                                    h_px_used += v;
                                } else {
                                    v_px += v;
                                    v_px_used += v;
                                }
                            } else if horizontal {
                                h_pt += p;
                            } else {
                                v_pt += p;
                            }
                        }
                        other => return Err(invalid_edge("margin", other)),
                    }
                }
            }

            let mut h_px_remain = inner_width - h_px_used;
            let mut v_px_remain = inner_height - v_px_used;

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
                    let px = w / (h_wt + w) * h_px_remain;
                    let mode = if width.is_pixel() {
                        SpecMode::Pixel
                    } else {
                        SpecMode::Unlimited
                    };
                    child.frame_mut().width = MeasureSpec::new(round_px(px), mode);
                    set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                }
                DimenSpec::Percent(p) => {
                    if width.is_pixel() {
                        let w = p / 100.0 * inner_width;
                        child.frame_mut().width = MeasureSpec::pixel(round_px(w));
                    } else if h_px > 0.0 {
                        // percent of the content the margins already pin down
                        h_pt += p;
                        let derived_inner = h_px / (1.0 - h_pt / 100.0);
                        let w = p / 100.0 * derived_inner;
                        child.frame_mut().width = MeasureSpec::pixel(round_px(w));
                    } else {
                        let w = p / 100.0 * inner_width;
                        child.frame_mut().width = MeasureSpec::unlimited(round_px(w));
                    }
                    set_ratio_height(
                        child.spec().height,
                        child.frame_mut(),
                        SpecMode::Pixel,
                    );
                }
                DimenSpec::Ratio(_) => {
                    if matches!(child.spec().height, DimenSpec::Ratio(_)) {
                        return Err(LayoutError::RatioBothAxes);
                    }
                }
                DimenSpec::Auto | DimenSpec::Unlimited => {
                    child.frame_mut().width = MeasureSpec::unlimited(round_px(h_px_remain));
                    set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                }
            }

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
                    let px = w / (v_wt + w) * v_px_remain;
                    let mode = if height.is_pixel() {
                        SpecMode::Pixel
                    } else {
                        SpecMode::Unlimited
                    };
                    child.frame_mut().height = MeasureSpec::new(round_px(px), mode);
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
                DimenSpec::Percent(p) => {
                    if height.is_pixel() {
                        let h = p / 100.0 * inner_height;
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                    } else if v_px > 0.0 {
                        v_pt += p;
                        let derived_inner = v_px / (1.0 - v_pt / 100.0);
                        let h = p / 100.0 * derived_inner;
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                    } else {
                        let h = p / 100.0 * inner_height;
                        child.frame_mut().height = MeasureSpec::unlimited(round_px(h));
                    }
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
                DimenSpec::Ratio(_) => {
                    if matches!(child.spec().width, DimenSpec::Ratio(_)) {
                        return Err(LayoutError::RatioBothAxes);
                    }
                }
                DimenSpec::Auto | DimenSpec::Unlimited => {
                    child.frame_mut().height = MeasureSpec::unlimited(round_px(v_px_remain));
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
            }

            debug!(
                width = %child.frame().width,
                height = %child.frame().height,
                "scroll child constraints"
            );
            let (w, h) = (child.frame().width, child.frame().height);
            child.measure(w, h, ctx)?;

            let cf = *child.frame();
            h_px += cf.width.value() as f32;
            v_px += cf.height.value() as f32;
            h_px_remain -= cf.width.value() as f32;
            v_px_remain -= cf.height.value() as f32;

            if let Some(m) = child.spec().margin {
                for (edge, horizontal, leading) in [
                    (m.top, false, true),
                    (m.bottom, false, false),
                    (m.left, true, true),
                    (m.right, true, false),
                ] {
                    let container = if horizontal { width } else { height };
                    let set = |cf: &mut Frame, v: i32| match (horizontal, leading) {
                        (true, true) => cf.margin.left = v,
                        (true, false) => cf.margin.right = v,
                        (false, true) => cf.margin.top = v,
                        (false, false) => cf.margin.bottom = v,
                    };
                    match edge {
                        DimenSpec::Weight(w) => {
                            if container.is_pixel() {
                                let (wt, remain) = if horizontal {
                                    (h_wt, h_px_remain)
                                } else {
                                    (v_wt, v_px_remain)
                                };
                                let v = if wt > 0.0 { w / wt * remain } else { 0.0 };
                                set(child.frame_mut(), round_px(v));
                                if horizontal {
                                    h_px += v;
                                } else {
                                    v_px += v;
                                }
                            }
                        }
                        DimenSpec::Percent(p) => {
                            if !container.is_pixel() {
                                let (px, pt) = if horizontal { (h_px, h_pt) } else { (v_px, v_pt) };
                                if px > 0.0 {
                                    let derived_inner = px / (1.0 - pt / 100.0);
                                    let v = p / 100.0 * derived_inner;
                                    set(child.frame_mut(), round_px(v));
                                    if horizontal {
                                        h_px += v;
                                    } else {
                                        v_px += v;
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }

            h_px /= 1.0 - h_pt / 100.0;
            v_px /= 1.0 - v_pt / 100.0;
        }

        if !width.is_pixel() {
            let w = (h_px + h_ppx) / (1.0 - h_ppt / 100.0);
            width = MeasureSpec::pixel(round_px(w));
            resolve_percent_padding_h(self.spec.padding.as_ref(), &mut self.frame, w);
        }
        if !height.is_pixel() {
            let h = (v_px + v_ppx) / (1.0 - v_ppt / 100.0);
            height = MeasureSpec::pixel(round_px(h));
            resolve_percent_padding_v(self.spec.padding.as_ref(), &mut self.frame, h);
        }

        set_new_width(&mut self.frame, origin_width, width);
        set_new_height(&mut self.frame, origin_height, height);
        Ok(())
    }

    pub fn layout(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;

        if let Some(child) = self.children.first_mut() {
            let cf = *child.frame();
            let l = self.frame.padding.left + cf.margin.left;
            let t = self.frame.padding.top + cf.margin.top;
            child.layout(x + l, y + t);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(child) = self.children.first() {
            let cf = child.frame();
            canvas.save();
            canvas.translate(cf.x - self.frame.x, cf.y - self.frame.y);
            // clip to the viewport, not the child's natural size
            let size = self.frame.size();
            canvas.clip_rect(Rect::new(
                self.frame.x - cf.x,
                self.frame.y - cf.y,
                size.width,
                size.height,
            ));
            child.draw(canvas);
            canvas.restore();
        }
    }
}

impl From<Scroll> for Element {
    fn from(scroll: Scroll) -> Self {
        Element::Scroll(Box::new(scroll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, Column, Margins};
    use crate::primitives::Size;
    use crate::text::MonospaceMeasurer;

    fn block(width: DimenSpec, height: DimenSpec) -> Block {
        Block::new().spec(BoxSpec::new(width, height))
    }

    #[test]
    fn test_child_overflows_fixed_viewport() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let tall = Column::new()
            .spec(BoxSpec::new(DimenSpec::Pixel(100.0), DimenSpec::Auto))
            .child(block(DimenSpec::Pixel(100.0), DimenSpec::Pixel(400.0)))
            .child(block(DimenSpec::Pixel(100.0), DimenSpec::Pixel(400.0)));
        let mut scroll = Scroll::new().child(tall);
        scroll
            .measure(MeasureSpec::pixel(120), MeasureSpec::pixel(200), &ctx)
            .unwrap();
        // viewport keeps its size, the child keeps its natural height
        assert_eq!(scroll.frame.size(), Size::new(120, 200));
        assert_eq!(scroll.children[0].frame().size(), Size::new(100, 800));
    }

    #[test]
    fn test_rejects_second_child() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut scroll = Scroll::new()
            .child(block(DimenSpec::Pixel(10.0), DimenSpec::Pixel(10.0)))
            .child(block(DimenSpec::Pixel(10.0), DimenSpec::Pixel(10.0)));
        let err = scroll
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(100), &ctx)
            .unwrap_err();
        assert_eq!(err, LayoutError::ScrollChildCount { count: 2 });
    }

    #[test]
    fn test_empty_scroll_wraps_to_padding() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut scroll = Scroll::new().spec(
            BoxSpec::new(DimenSpec::Auto, DimenSpec::Auto)
                .padding(crate::layout::Paddings::all(DimenSpec::Pixel(8.0))),
        );
        scroll
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        assert_eq!(scroll.frame.size(), Size::new(16, 16));
    }

    #[test]
    fn test_pixel_margins_inside_fixed_viewport() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let child = Block::new().spec(
            BoxSpec::new(DimenSpec::Weight(1.0), DimenSpec::Pixel(50.0)).margin(Margins::all(
                DimenSpec::Pixel(10.0),
            )),
        );
        let mut scroll = Scroll::new().child(child);
        scroll
            .measure(MeasureSpec::pixel(200), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        assert_eq!(scroll.children[0].frame().size().width, 180);
        scroll.layout(5, 5);
        assert_eq!(scroll.children[0].frame().x, 15);
        assert_eq!(scroll.children[0].frame().y, 15);
    }

    #[test]
    fn test_auto_viewport_takes_child_size() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut scroll =
            Scroll::new().child(block(DimenSpec::Pixel(60.0), DimenSpec::Pixel(40.0)));
        scroll
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        assert_eq!(scroll.frame.size(), Size::new(60, 40));
    }
}
