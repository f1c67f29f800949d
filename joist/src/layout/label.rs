//! Text leaf with up to four icon slots.
//!
//! A label measures its text through the [`TextMeasurer`] seam, then
//! fits one optional icon subtree on each side of the text. Sizing
//! happens in bands: the horizontal band is the left icon, the text,
//! and the right icon laid side by side; the vertical band stacks the
//! top icon, the text, and the bottom icon. The label's natural size
//! on an auto axis is the widest/tallest band plus padding. `em`
//! dimensions inside a label resolve against the measured text height
//! rather than the context's base font.
//!
//! [`TextMeasurer`]: crate::text::TextMeasurer

use tracing::{debug, trace};

use crate::align::Align;
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
use crate::primitives::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub spec: BoxSpec,
    pub align: Align,
    pub text: String,
    pub font_px: f32,
    pub icon_left: Option<Box<Element>>,
    pub icon_top: Option<Box<Element>>,
    pub icon_right: Option<Box<Element>>,
    pub icon_bottom: Option<Box<Element>>,
    pub frame: Frame,

    text_width: i32,
    text_height: i32,
    text_offset: Point,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            spec: BoxSpec::default(),
            align: Align::CENTER,
            text: String::new(),
            font_px: 12.0,
            icon_left: None,
            icon_top: None,
            icon_right: None,
            icon_bottom: None,
            frame: Frame::default(),
            text_width: 0,
            text_height: 0,
            text_offset: Point::ORIGIN,
        }
    }
}

/// Per-icon totals accumulated while resolving one slot.
#[derive(Debug, Default, Clone, Copy)]
struct IconMetrics {
    h_wt: f32,
    v_wt: f32,
    measured: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn spec(mut self, spec: BoxSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn font_px(mut self, font_px: f32) -> Self {
        self.font_px = font_px;
        self
    }

    pub fn icon_left(mut self, icon: impl Into<Element>) -> Self {
        self.icon_left = Some(Box::new(icon.into()));
        self
    }

    pub fn icon_top(mut self, icon: impl Into<Element>) -> Self {
        self.icon_top = Some(Box::new(icon.into()));
        self
    }

    pub fn icon_right(mut self, icon: impl Into<Element>) -> Self {
        self.icon_right = Some(Box::new(icon.into()));
        self
    }

    pub fn icon_bottom(mut self, icon: impl Into<Element>) -> Self {
        self.icon_bottom = Some(Box::new(icon.into()));
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text != text {
            self.text = text;
            return true;
        }
        false
    }

    /// Measured text size from the last measure pass.
    pub fn text_size(&self) -> (i32, i32) {
        (self.text_width, self.text_height)
    }

    pub fn icons(&self) -> impl Iterator<Item = &Element> {
        [
            self.icon_left.as_deref(),
            self.icon_top.as_deref(),
            self.icon_right.as_deref(),
            self.icon_bottom.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    pub(crate) fn icons_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        [
            self.icon_left.as_deref_mut(),
            self.icon_top.as_deref_mut(),
            self.icon_right.as_deref_mut(),
            self.icon_bottom.as_deref_mut(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn measure(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &MeasureContext<'_>,
    ) -> Result<(), LayoutError> {
        let max_width = match width.mode() {
            SpecMode::Unlimited => None,
            _ => Some(width.value()),
        };
        let text_size = ctx.text.measure_text(&self.text, self.font_px, max_width);
        self.text_width = text_size.width;
        self.text_height = text_size.height;
        let txt_w = text_size.width as f32;
        let txt_h = text_size.height as f32;
        trace!(text = %self.text, txt_w, txt_h, "label text measured");

        // Within a label, em anchors to the measured text height.
        let totals =
            measure_padding(width, height, self.spec.padding.as_ref(), &mut self.frame, txt_h)?;
        let h_ppx = totals.h_px;
        let h_ppt = totals.h_pt;
        let v_ppx = totals.v_px;
        let v_ppt = totals.v_pt;

        let inner_width = inner_size(width.value(), h_ppt, h_ppx);
        let inner_height = inner_size(height.value(), v_ppt, v_ppx);

        let mut metrics = [IconMetrics::default(); 4];
        for (slot, m) in [
            &mut self.icon_left,
            &mut self.icon_top,
            &mut self.icon_right,
            &mut self.icon_bottom,
        ]
        .into_iter()
        .zip(metrics.iter_mut())
        {
            if let Some(icon) = slot {
                *m = measure_icon(icon, width, height, inner_width, inner_height, txt_h, ctx)?;
            } else {
                m.measured = true;
            }
        }

        let extent = |icon: &Option<Box<Element>>| {
            icon.as_deref().map_or((0.0, 0.0), |i| {
                let f = i.frame();
                (
                    (f.margin.horizontal() + f.size().width) as f32,
                    (f.margin.vertical() + f.size().height) as f32,
                )
            })
        };

        let (hl, vl) = extent(&self.icon_left);
        let (ht, vt) = extent(&self.icon_top);
        let (hr, vr) = extent(&self.icon_right);
        let (hb, vb) = extent(&self.icon_bottom);

        let h_px = (hl + txt_w + hr).max(ht).max(hb);
        let v_px = (vt + txt_h + vb).max(vl).max(vr);

        // Weight and auto icon axes take what the text band left over.
        let leftover = [
            (inner_width - hl - txt_w - hr, inner_height - vl),
            (inner_width - ht, inner_height - vt - txt_h - vb),
            (inner_width - hl - txt_w - hr, inner_height - vr),
            (inner_width - hb, inner_height - vt - txt_h - vb),
        ];
        let paired_wt = [
            (metrics[0].h_wt + metrics[2].h_wt, metrics[0].v_wt),
            (metrics[1].h_wt, metrics[1].v_wt + metrics[3].v_wt),
            (metrics[0].h_wt + metrics[2].h_wt, metrics[2].v_wt),
            (metrics[3].h_wt, metrics[1].v_wt + metrics[3].v_wt),
        ];
        for (index, slot) in [
            &mut self.icon_left,
            &mut self.icon_top,
            &mut self.icon_right,
            &mut self.icon_bottom,
        ]
        .into_iter()
        .enumerate()
        {
            if metrics[index].measured {
                continue;
            }
            if let Some(icon) = slot {
                let (h_remain, v_remain) = leftover[index];
                let (h_wt, v_wt) = paired_wt[index];
                measure_icon_leftover(
                    icon,
                    h_remain.max(0.0),
                    v_remain.max(0.0),
                    h_wt,
                    v_wt,
                    h_px,
                    v_px,
                    ctx,
                )?;
            }
        }

        // Bands again, now that every icon has a size.
        let (hl, vl) = extent(&self.icon_left);
        let (ht, vt) = extent(&self.icon_top);
        let (hr, vr) = extent(&self.icon_right);
        let (hb, vb) = extent(&self.icon_bottom);
        let h_px = (hl + txt_w + hr).max(ht).max(hb);
        let v_px = (vt + txt_h + vb).max(vl).max(vr);

        let mut final_width = width;
        let mut final_height = height;
        if !width.is_pixel() {
            let w = (h_px + h_ppx) / (1.0 - h_ppt / 100.0);
            final_width = MeasureSpec::pixel(w.ceil() as i32);
            resolve_percent_padding_h(self.spec.padding.as_ref(), &mut self.frame, w);
        }
        if !height.is_pixel() {
            let h = (v_px + v_ppx) / (1.0 - v_ppt / 100.0);
            final_height = MeasureSpec::pixel(h.ceil() as i32);
            resolve_percent_padding_v(self.spec.padding.as_ref(), &mut self.frame, h);
        }

        set_new_width(&mut self.frame, width, final_width);
        set_new_height(&mut self.frame, height, final_height);
        debug!(
            width = %self.frame.width,
            height = %self.frame.height,
            text_width = self.text_width,
            "label measured"
        );
        Ok(())
    }

    pub fn layout(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;

        let size = self.frame.size();
        let inner_width = size.width - self.frame.padding.horizontal();
        let inner_height = size.height - self.frame.padding.vertical();

        let extent = |icon: &Option<Box<Element>>| {
            icon.as_deref().map_or((0, 0), |i| {
                let f = i.frame();
                (
                    f.margin.horizontal() + f.size().width,
                    f.margin.vertical() + f.size().height,
                )
            })
        };
        let (left_w, left_h) = extent(&self.icon_left);
        let (top_w, top_h) = extent(&self.icon_top);
        let (right_w, right_h) = extent(&self.icon_right);
        let (bottom_w, bottom_h) = extent(&self.icon_bottom);

        // Band content sizes: the horizontal band through the text and
        // the cross extents of the solo bands.
        let band_w = left_w + self.text_width + right_w;
        let band_h = top_h + self.text_height + bottom_h;

        let pl = self.frame.padding.left;
        let pt = self.frame.padding.top;
        let h = self.align.horizontal;
        let v = self.align.vertical;

        let band_x = pl + h.offset(inner_width, band_w);
        let band_y = pt + v.offset(inner_height, band_h);

        self.text_offset = Point::new(band_x + left_w, band_y + top_h);

        if let Some(icon) = self.icon_left.as_deref_mut() {
            let f = *icon.frame();
            let ix = x + band_x + f.margin.left;
            let iy = y + pt + v.offset(inner_height, left_h) + f.margin.top;
            icon.layout(ix, iy);
        }
        if let Some(icon) = self.icon_right.as_deref_mut() {
            let f = *icon.frame();
            let ix = x + band_x + left_w + self.text_width + f.margin.left;
            let iy = y + pt + v.offset(inner_height, right_h) + f.margin.top;
            icon.layout(ix, iy);
        }
        if let Some(icon) = self.icon_top.as_deref_mut() {
            let f = *icon.frame();
            let ix = x + pl + h.offset(inner_width, top_w) + f.margin.left;
            let iy = y + band_y + f.margin.top;
            icon.layout(ix, iy);
        }
        if let Some(icon) = self.icon_bottom.as_deref_mut() {
            let f = *icon.frame();
            let ix = x + pl + h.offset(inner_width, bottom_w) + f.margin.left;
            let iy = y + band_y + top_h + self.text_height + f.margin.top;
            icon.layout(ix, iy);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for icon in self.icons() {
            let f = icon.frame();
            canvas.save();
            canvas.translate(f.x - self.frame.x, f.y - self.frame.y);
            icon.draw(canvas);
            canvas.restore();
        }

        if !self.text.is_empty() {
            canvas.draw_text(
                &self.text,
                self.font_px,
                self.text_offset.x,
                self.text_offset.y,
            );
        }
    }
}

/// Resolve one icon slot as far as the label's constraints allow. Icons
/// that need leftover band space (weight or auto axes, percent against
/// an auto label) stay unmeasured for the second pass.
fn measure_icon(
    icon: &mut Element,
    width: MeasureSpec,
    height: MeasureSpec,
    inner_width: f32,
    inner_height: f32,
    txt_h: f32,
    ctx: &MeasureContext<'_>,
) -> Result<IconMetrics, LayoutError> {
    let mut m = IconMetrics::default();

    {
        let f = icon.frame_mut();
        f.clear();
        f.width = MeasureSpec::unlimited(0);
        f.height = MeasureSpec::unlimited(0);
    }

    if let Some(margin) = icon.spec().margin {
        for (edge, horizontal, leading) in [
            (margin.left, true, true),
            (margin.right, true, false),
            (margin.top, false, true),
            (margin.bottom, false, false),
        ] {
            let container = if horizontal { width } else { height };
            let inner = if horizontal { inner_width } else { inner_height };
            let set = |f: &mut Frame, v: i32| match (horizontal, leading) {
                (true, true) => f.margin.left = v,
                (true, false) => f.margin.right = v,
                (false, true) => f.margin.top = v,
                (false, false) => f.margin.bottom = v,
            };
            match edge {
                DimenSpec::Pixel(v) => {
                    set(icon.frame_mut(), round_px(v));
                }
                DimenSpec::Ems(v) => {
                    set(icon.frame_mut(), round_px(v * txt_h));
                }
                DimenSpec::Percent(p) => {
                    if container.is_pixel() {
                        set(icon.frame_mut(), round_px(p / 100.0 * inner));
                    }
                    // else resolved against the band in the second pass
                }
                DimenSpec::Weight(w) => {
                    if horizontal {
                        m.h_wt += w;
                    } else {
                        m.v_wt += w;
                    }
                }
                other => return Err(invalid_edge("margin", other)),
            }
        }
    }

    let mut can_measure = true;
    match icon.spec().width {
        DimenSpec::Pixel(w) => {
            icon.frame_mut().width = MeasureSpec::pixel(round_px(w));
            set_ratio_height(icon.spec().height, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Ems(w) => {
            icon.frame_mut().width = MeasureSpec::pixel(round_px(w * txt_h));
            set_ratio_height(icon.spec().height, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Percent(p) => {
            if width.is_pixel() {
                let w = p / 100.0 * inner_width;
                icon.frame_mut().width = MeasureSpec::pixel(round_px(w));
                set_ratio_height(icon.spec().height, icon.frame_mut(), SpecMode::Pixel);
            } else {
                can_measure = false;
            }
        }
        DimenSpec::Weight(w) => {
            m.h_wt += w;
            can_measure = false;
        }
        DimenSpec::Ratio(_) => {
            if matches!(icon.spec().height, DimenSpec::Ratio(_)) {
                return Err(LayoutError::RatioBothAxes);
            }
        }
        DimenSpec::Auto | DimenSpec::Unlimited => {
            can_measure = false;
        }
    }

    match icon.spec().height {
        DimenSpec::Pixel(h) => {
            icon.frame_mut().height = MeasureSpec::pixel(round_px(h));
            set_ratio_width(icon.spec().width, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Ems(h) => {
            icon.frame_mut().height = MeasureSpec::pixel(round_px(h * txt_h));
            set_ratio_width(icon.spec().width, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Percent(p) => {
            if height.is_pixel() {
                let h = p / 100.0 * inner_height;
                icon.frame_mut().height = MeasureSpec::pixel(round_px(h));
                set_ratio_width(icon.spec().width, icon.frame_mut(), SpecMode::Pixel);
            } else {
                can_measure = false;
            }
        }
        DimenSpec::Weight(w) => {
            m.v_wt += w;
            can_measure = false;
        }
        DimenSpec::Ratio(_) => {
            if matches!(icon.spec().width, DimenSpec::Ratio(_)) {
                return Err(LayoutError::RatioBothAxes);
            }
        }
        DimenSpec::Auto | DimenSpec::Unlimited => {
            can_measure = false;
        }
    }

    if can_measure {
        let (w, h) = (icon.frame().width, icon.frame().height);
        icon.measure(w, h, ctx)?;
        m.measured = true;
    }
    Ok(m)
}

/// Second chance for icons that waited on band leftovers: weights take
/// their share of the remaining band space, auto axes take all of it,
/// and deferred percents resolve against the band totals.
#[allow(clippy::too_many_arguments)]
fn measure_icon_leftover(
    icon: &mut Element,
    h_px_remain: f32,
    v_px_remain: f32,
    h_wt: f32,
    v_wt: f32,
    band_width: f32,
    band_height: f32,
    ctx: &MeasureContext<'_>,
) -> Result<(), LayoutError> {
    match icon.spec().width {
        DimenSpec::Weight(w) => {
            let px = if h_wt > 0.0 { h_px_remain * w / h_wt } else { 0.0 };
            icon.frame_mut().width = MeasureSpec::pixel(round_px(px));
            set_ratio_height(icon.spec().height, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Percent(p) => {
            icon.frame_mut().width = MeasureSpec::pixel(round_px(p / 100.0 * band_width));
            set_ratio_height(icon.spec().height, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Auto => {
            icon.frame_mut().width = MeasureSpec::auto(round_px(h_px_remain.max(0.0)));
        }
        DimenSpec::Unlimited => {
            icon.frame_mut().width = MeasureSpec::unlimited(round_px(h_px_remain.max(0.0)));
        }
        _ => {}
    }

    match icon.spec().height {
        DimenSpec::Weight(w) => {
            let px = if v_wt > 0.0 { v_px_remain * w / v_wt } else { 0.0 };
            icon.frame_mut().height = MeasureSpec::pixel(round_px(px));
            set_ratio_width(icon.spec().width, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Percent(p) => {
            icon.frame_mut().height = MeasureSpec::pixel(round_px(p / 100.0 * band_height));
            set_ratio_width(icon.spec().width, icon.frame_mut(), SpecMode::Pixel);
        }
        DimenSpec::Auto => {
            icon.frame_mut().height = MeasureSpec::auto(round_px(v_px_remain.max(0.0)));
        }
        DimenSpec::Unlimited => {
            icon.frame_mut().height = MeasureSpec::unlimited(round_px(v_px_remain.max(0.0)));
        }
        _ => {}
    }

    if let Some(margin) = icon.spec().margin {
        for (edge, horizontal, leading) in [
            (margin.left, true, true),
            (margin.right, true, false),
            (margin.top, false, true),
            (margin.bottom, false, false),
        ] {
            let set = |f: &mut Frame, v: i32| match (horizontal, leading) {
                (true, true) => f.margin.left = v,
                (true, false) => f.margin.right = v,
                (false, true) => f.margin.top = v,
                (false, false) => f.margin.bottom = v,
            };
            match edge {
                DimenSpec::Weight(w) => {
                    let (wt, remain) = if horizontal {
                        (h_wt, h_px_remain)
                    } else {
                        (v_wt, v_px_remain)
                    };
                    let v = if wt > 0.0 { remain * w / wt } else { 0.0 };
                    set(icon.frame_mut(), round_px(v));
                }
                DimenSpec::Percent(p) => {
                    let band = if horizontal { band_width } else { band_height };
                    set(icon.frame_mut(), round_px(p / 100.0 * band));
                }
                _ => {}
            }
        }
    }

    let (w, h) = (icon.frame().width, icon.frame().height);
    icon.measure(w, h, ctx)
}

impl From<Label> for Element {
    fn from(label: Label) -> Self {
        Element::Label(Box::new(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Block;
    use crate::layout::Paddings;
    use crate::primitives::Size;
    use crate::text::MonospaceMeasurer;

    fn block(width: DimenSpec, height: DimenSpec) -> Block {
        Block::new().spec(BoxSpec::new(width, height))
    }

    // MonospaceMeasurer: advance = font_px / 2, line height = font_px * 1.2.

    #[test]
    fn test_auto_size_wraps_text() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("hello").font_px(10.0);
        label
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        // 5 cells * 5px advance, one 12px line
        assert_eq!(label.frame.size(), Size::new(25, 12));
    }

    #[test]
    fn test_side_icons_widen_the_band() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("hi")
            .font_px(10.0)
            .icon_left(block(DimenSpec::Pixel(16.0), DimenSpec::Pixel(16.0)))
            .icon_right(block(DimenSpec::Pixel(16.0), DimenSpec::Pixel(16.0)));
        label
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        // 16 + 2*5 + 16 wide, tallest band is the 16px icons
        assert_eq!(label.frame.size(), Size::new(42, 16));
    }

    #[test]
    fn test_vertical_band_stacks_icons() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("hi")
            .font_px(10.0)
            .icon_top(block(DimenSpec::Pixel(8.0), DimenSpec::Pixel(20.0)))
            .icon_bottom(block(DimenSpec::Pixel(8.0), DimenSpec::Pixel(20.0)));
        label
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        assert_eq!(label.frame.size().height, 52);
    }

    #[test]
    fn test_em_padding_anchors_to_text_height() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("x")
            .font_px(10.0)
            .spec(BoxSpec::default().padding(Paddings::all(DimenSpec::Ems(1.0))));
        label
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        // text is 5x12, one em of padding is 12px per edge
        assert_eq!(label.frame.size(), Size::new(29, 36));
    }

    #[test]
    fn test_layout_centers_text_in_fixed_box() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("ab").font_px(10.0);
        label
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(40), &ctx)
            .unwrap();
        label.layout(0, 0);
        // text 10x12 centered in 100x40
        assert_eq!(label.text_offset, Point::new(45, 14));
    }

    #[test]
    fn test_layout_places_side_icons_around_text() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("ab")
            .font_px(10.0)
            .align(Align::TOP_LEFT)
            .icon_left(block(DimenSpec::Pixel(16.0), DimenSpec::Pixel(12.0)))
            .icon_right(block(DimenSpec::Pixel(16.0), DimenSpec::Pixel(12.0)));
        label
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(12), &ctx)
            .unwrap();
        label.layout(0, 0);
        let left = label.icon_left.as_deref().unwrap().frame();
        let right = label.icon_right.as_deref().unwrap().frame();
        assert_eq!(left.x, 0);
        assert_eq!(label.text_offset.x, 16);
        // left icon + text width
        assert_eq!(right.x, 26);
    }

    #[test]
    fn test_weight_icon_takes_band_leftover() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("ab")
            .font_px(10.0)
            .icon_left(block(DimenSpec::Weight(1.0), DimenSpec::Pixel(12.0)));
        label
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(12), &ctx)
            .unwrap();
        // band leftover beside the 10px text is 90
        assert_eq!(
            label.icon_left.as_deref().unwrap().frame().size().width,
            90
        );
    }

    #[test]
    fn test_draw_emits_text_at_offset() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut label = Label::new("ab").font_px(10.0).align(Align::TOP_LEFT);
        label
            .measure(MeasureSpec::pixel(50), MeasureSpec::pixel(20), &ctx)
            .unwrap();
        label.layout(0, 0);
        let mut canvas = crate::canvas::RecordingCanvas::new();
        label.draw(&mut canvas);
        assert_eq!(canvas.text_positions(), vec![("ab".to_string(), 0, 0)]);
    }
}
