//! Vertical stack container.
//!
//! Children are stacked top to bottom. Vertical sizing runs in up to
//! three passes: pass 1 resolves everything derivable without sibling
//! totals (pixel, em, percent against a pixel container, ratio against a
//! known axis) while accumulating weight and percent totals; pass 2
//! reifies weighted heights and margins against the leftover space;
//! pass 3 runs only when the container's own height was auto and
//! children deferred percent sizes against it, and must resolve every
//! remaining child or the configuration is unsatisfiable.
//!
//! Horizontal (cross-axis) resolution for one child happens in
//! [`measure_child_width`], guarded by the child's [`Resolved`] flags so
//! repeat passes never redo settled work.

use tracing::{debug, trace, warn};

use crate::align::{Align, HorizontalAlign, VerticalAlign};
use crate::canvas::Canvas;
use crate::dimension::{DimenSpec, MeasureSpec, SpecMode};
use crate::error::LayoutError;
use crate::frame::{Frame, Resolved};
use crate::layout::resolve::{
    inner_size, invalid_edge, measure_padding, own_mode, resolve_percent_padding_h,
    resolve_percent_padding_v, round_px, set_new_height, set_new_width, set_ratio_height,
    set_ratio_width,
};
use crate::layout::{BoxSpec, Element, MeasureContext};
use crate::primitives::Rect;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub spec: BoxSpec,
    pub align: Align,
    pub children: Vec<Element>,
    pub frame: Frame,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(mut self, spec: BoxSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
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
        let mut h_ppx = totals.h_px;
        let mut h_ppt = totals.h_pt;
        let v_ppx = totals.v_px;
        let v_ppt = totals.v_pt;

        let mut inner_width = inner_size(width.value(), h_ppt, h_ppx);
        let mut inner_height = inner_size(height.value(), v_ppt, v_ppx);

        if (width.is_pixel() && inner_width <= 0.0)
            || (height.is_pixel() && inner_height <= 0.0)
        {
            return self.measure_zero_space(origin_width, origin_height, &totals, ctx);
        }

        let mut h_px_max = 0.0f32; // widest child incl. margins
        let mut v_px = 0.0f32; //     resolved vertical pixels
        let mut v_wt = 0.0f32; //     vertical weight total
        let mut v_pt = 0.0f32; //     deferred vertical percent total
        let mut v_px_used = 0.0f32;

        let mut flags = vec![Resolved::NONE; self.children.len()];

        // Pass 1: independent quantities.
        for (index, child) in self.children.iter_mut().enumerate() {
            {
                let cf = child.frame_mut();
                cf.clear();
                cf.width = MeasureSpec::unlimited(0);
                cf.height = MeasureSpec::unlimited(0);
            }
            let mut resolved = Resolved::NONE;

            if let Some(m) = child.spec().margin {
                for (edge, top) in [(m.top, true), (m.bottom, false)] {
                    let flag = if top {
                        Resolved::MARGIN_TOP
                    } else {
                        Resolved::MARGIN_BOTTOM
                    };
                    let set = |cf: &mut Frame, v: i32| {
                        if top {
                            cf.margin.top = v;
                        } else {
                            cf.margin.bottom = v;
                        }
                    };
                    if edge.is_zero() {
                        resolved = resolved.with(flag);
                        continue;
                    }
                    match edge {
                        DimenSpec::Pixel(v) => {
                            set(child.frame_mut(), round_px(v));
                            v_px += v;
                            v_px_used += v;
                            resolved = resolved.with(flag);
                        }
                        DimenSpec::Ems(v) => {
                            let v = v * em;
                            set(child.frame_mut(), round_px(v));
                            v_px += v;
                            v_px_used += v;
                            resolved = resolved.with(flag);
                        }
                        DimenSpec::Weight(w) => match height.mode() {
                            SpecMode::Pixel => v_wt += w,
                            // No leftover space exists to share; the
                            // margin collapses.
                            _ => {
                                set(child.frame_mut(), 0);
                                resolved = resolved.with(flag);
                            }
                        },
                        DimenSpec::Percent(p) => match height.mode() {
                            SpecMode::Pixel => {
                                let v = p / 100.0 * inner_height;
                                set(child.frame_mut(), round_px(v));
                                v_px += v;
                                v_px_used += v;
                                resolved = resolved.with(flag);
                            }
                            _ => v_pt += p,
                        },
                        other => return Err(invalid_edge("margin", other)),
                    }
                }
            } else {
                resolved = resolved.with(Resolved::MARGIN_TOP).with(Resolved::MARGIN_BOTTOM);
            }

            let mut can_measure_height = true;
            match child.spec().height {
                DimenSpec::Pixel(h) => {
                    child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
                DimenSpec::Ems(h) => {
                    child.frame_mut().height = MeasureSpec::pixel(round_px(h * em));
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
                DimenSpec::Weight(w) => match height.mode() {
                    SpecMode::Pixel => {
                        v_wt += w;
                        can_measure_height = false;
                    }
                    _ => {
                        child.frame_mut().height = MeasureSpec::pixel(0);
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                },
                DimenSpec::Percent(p) => match height.mode() {
                    SpecMode::Pixel => {
                        let h = p / 100.0 * inner_height;
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    // 0% is zero pixels whatever the container turns
                    // out to be; deferring it would leave pass 3 with
                    // nothing to trigger on.
                    _ if p == 0.0 => {
                        child.frame_mut().height = MeasureSpec::pixel(0);
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                    _ => {
                        v_pt += p;
                        can_measure_height = false;
                    }
                },
                DimenSpec::Ratio(_) => {
                    if matches!(child.spec().width, DimenSpec::Ratio(_)) {
                        return Err(LayoutError::RatioBothAxes);
                    }
                    // Resolved together with the width.
                }
                DimenSpec::Auto | DimenSpec::Unlimited => {
                    let h = inner_height - v_px_used;
                    child.frame_mut().height =
                        MeasureSpec::new(round_px(h), own_mode(child.spec().height));
                    set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                }
            }

            trace!(index, can_measure_height, "column pass 1 child");
            let (new_flags, h_px) = measure_child_width(
                width,
                inner_width,
                child,
                can_measure_height,
                resolved,
                ctx,
            )?;

            // Heights join the used total only once they are pixels.
            if child.frame().height.is_pixel() {
                v_px_used += child.frame().height.value() as f32;
            }
            if h_px > h_px_max {
                h_px_max = h_px;
            }
            flags[index] = new_flags;
        }

        // Auto/unlimited width: the widest child is the inner width.
        let mut width_changed = false;
        if !width.is_pixel() {
            h_px_max = h_px_max.max(0.0);
            if width.mode() == SpecMode::Auto {
                let bound = inner_size(width.value(), h_ppt, h_ppx);
                if h_px_max > bound {
                    h_px_max = bound;
                }
            }
            inner_width = h_px_max;
            let w = (inner_width + h_ppx) / (1.0 - h_ppt / 100.0);
            width = MeasureSpec::pixel(round_px(w));
            width_changed = origin_width.value() != width.value();
            h_ppx += resolve_percent_padding_h(self.spec.padding.as_ref(), &mut self.frame, w);
            h_ppt = 0.0;
        }
        let _ = (h_ppx, h_ppt);

        let v_px_remain = (inner_height - v_px_used).max(0.0);
        debug!(h_px_max, v_px_remain, "column pass 1 done");

        // Pass 2: weights, and whatever pass 1 left unfinished.
        for (index, child) in self.children.iter_mut().enumerate() {
            let mut can_measure_height = true;

            match height.mode() {
                SpecMode::Pixel => {
                    if let Some(m) = child.spec().margin {
                        if let DimenSpec::Weight(w) = m.top {
                            let t = w / v_wt * v_px_remain;
                            child.frame_mut().margin.top = round_px(t);
                            v_px += t;
                            flags[index] = flags[index].with(Resolved::MARGIN_TOP);
                        }
                        if let DimenSpec::Weight(w) = m.bottom {
                            let b = w / v_wt * v_px_remain;
                            child.frame_mut().margin.bottom = round_px(b);
                            v_px += b;
                            flags[index] = flags[index].with(Resolved::MARGIN_BOTTOM);
                        }
                    }
                    if let DimenSpec::Weight(w) = child.spec().height {
                        let h = if v_wt > 0.0 && v_px_remain > 0.0 {
                            w / v_wt * v_px_remain
                        } else {
                            0.0
                        };
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }
                }
                _ => {
                    if matches!(child.spec().height, DimenSpec::Percent(_)) {
                        // Waits for the container height in pass 3.
                        can_measure_height = false;
                    }
                }
            }

            let settled = flags[index].contains(Resolved::H_COMPLETE)
                && flags[index].contains(Resolved::MEASURED);
            if !settled && can_measure_height {
                debug_assert!(width.is_pixel());
                trace!(index, "column pass 2 child");
                let (new_flags, _) = measure_child_width(
                    width,
                    inner_width,
                    child,
                    can_measure_height,
                    flags[index],
                    ctx,
                )?;
                flags[index] = new_flags;
            } else if settled && width_changed && can_measure_height {
                // A child wrapped against the pre-reification width is
                // stale once the container settles on a different one.
                let cf = *child.frame();
                let extent = cf.width.value() + cf.margin.left + cf.margin.right;
                if extent != round_px(inner_width)
                    && matches!(child.spec().width, DimenSpec::Auto | DimenSpec::Unlimited)
                {
                    trace!(index, extent, "column pass 2 stale width remeasure");
                    let remain = inner_width - (cf.margin.left + cf.margin.right) as f32;
                    let w = MeasureSpec::new(
                        round_px(remain.max(0.0)),
                        own_mode(child.spec().width),
                    );
                    let h = match child.spec().height {
                        DimenSpec::Auto | DimenSpec::Unlimited => MeasureSpec::new(
                            cf.height.value(),
                            own_mode(child.spec().height),
                        ),
                        _ => cf.height,
                    };
                    child.frame_mut().width = w;
                    child.frame_mut().height = h;
                    child.measure(w, h, ctx)?;
                    remeasure_if_ratio_moved(child, ctx)?;
                }
            }

            if child.frame().height.is_pixel() {
                v_px += child.frame().height.value() as f32;
            }
        }

        // Pass 3: the container height was auto and children hold
        // percent sizes against it.
        if !height.is_pixel() {
            if !(0.0..100.0).contains(&v_pt) {
                return Err(LayoutError::PercentOutOfRange { value: v_pt });
            }

            inner_height = v_px / (1.0 - v_pt / 100.0);
            let h = (inner_height + v_ppx) / (1.0 - v_ppt / 100.0);
            height = MeasureSpec::pixel(round_px(h));

            if v_ppt > 0.0 {
                resolve_percent_padding_v(self.spec.padding.as_ref(), &mut self.frame, h);
            }

            if v_pt > 0.0 {
                debug!(inner_height, "column pass 3");
                for (index, child) in self.children.iter_mut().enumerate() {
                    if let Some(m) = child.spec().margin {
                        if let DimenSpec::Percent(p) = m.top {
                            child.frame_mut().margin.top = round_px(p / 100.0 * inner_height);
                            flags[index] = flags[index].with(Resolved::MARGIN_TOP);
                        }
                        if let DimenSpec::Percent(p) = m.bottom {
                            child.frame_mut().margin.bottom =
                                round_px(p / 100.0 * inner_height);
                            flags[index] = flags[index].with(Resolved::MARGIN_BOTTOM);
                        }
                    }
                    if let DimenSpec::Percent(p) = child.spec().height {
                        let h = p / 100.0 * inner_height;
                        child.frame_mut().height = MeasureSpec::pixel(round_px(h));
                        set_ratio_width(child.spec().width, child.frame_mut(), SpecMode::Pixel);
                    }

                    let settled = flags[index].contains(Resolved::H_COMPLETE)
                        && flags[index].contains(Resolved::MEASURED);
                    if !settled {
                        let (new_flags, _) = measure_child_width(
                            width,
                            inner_width,
                            child,
                            true,
                            flags[index],
                            ctx,
                        )?;
                        flags[index] = new_flags;
                        if !(new_flags.contains(Resolved::H_COMPLETE)
                            && new_flags.contains(Resolved::MEASURED))
                        {
                            return Err(LayoutError::Unresolved {
                                container: "column",
                                remaining: 1,
                            });
                        }
                    }
                }
            }
        }

        let unresolved = self
            .children
            .iter()
            .filter(|c| !c.frame().height.is_pixel() || !c.frame().width.is_pixel())
            .count();
        if unresolved > 0 {
            return Err(LayoutError::Unresolved {
                container: "column",
                remaining: unresolved,
            });
        }

        set_new_width(&mut self.frame, origin_width, width);
        set_new_height(&mut self.frame, origin_height, height);
        Ok(())
    }

    /// Zero inner space on a pixel axis: every child measures at zero
    /// and the container is its padding alone.
    fn measure_zero_space(
        &mut self,
        origin_width: MeasureSpec,
        origin_height: MeasureSpec,
        totals: &crate::layout::resolve::PaddingTotals,
        ctx: &MeasureContext<'_>,
    ) -> Result<(), LayoutError> {
        debug!("column has no inner space, zero-sizing children");
        for child in &mut self.children {
            child.frame_mut().clear();
            child.measure(MeasureSpec::pixel(0), MeasureSpec::pixel(0), ctx)?;
        }
        set_new_width(
            &mut self.frame,
            origin_width,
            MeasureSpec::pixel(round_px(totals.h_px)),
        );
        set_new_height(
            &mut self.frame,
            origin_height,
            MeasureSpec::pixel(round_px(totals.v_px)),
        );
        Ok(())
    }

    pub fn layout(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;

        let size = self.frame.size();
        let inner_width = (size.width - self.frame.padding.horizontal()) as f32;
        let inner_height = (size.height - self.frame.padding.vertical()) as f32;
        let children_height: i32 = self
            .children
            .iter()
            .map(|c| c.frame().margin.vertical() + c.frame().size().height)
            .sum();

        let mut t = match self.align.vertical {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => inner_height / 2.0 - children_height as f32 / 2.0,
            VerticalAlign::Bottom => inner_height - children_height as f32,
        };
        t += self.frame.padding.top as f32;

        for child in &mut self.children {
            let cf = *child.frame();
            let child_width = cf.size().width as f32;

            // Weighted widths and weighted side margins already consumed
            // the leftover space; alignment would double-count it.
            let pinned = matches!(child.spec().width, DimenSpec::Weight(_))
                || child.spec().margin.is_some_and(|m| {
                    matches!(m.left, DimenSpec::Weight(_))
                        || matches!(m.right, DimenSpec::Weight(_))
                });
            let mut l = if pinned {
                0.0
            } else {
                match self.align.horizontal {
                    HorizontalAlign::Left => 0.0,
                    HorizontalAlign::Center => inner_width / 2.0 - child_width / 2.0,
                    HorizontalAlign::Right => inner_width - child_width,
                }
            };
            l += (self.frame.padding.left + cf.margin.left) as f32;
            t += cf.margin.top as f32;

            child.layout(x + round_px(l), y + round_px(t));

            t += (cf.size().height + cf.margin.bottom) as f32;
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

/// Resolve one child's horizontal quantities (width and side margins)
/// inside a column, measuring the child once both axes are concrete.
/// Returns the updated flags and the child's total horizontal extent in
/// pixels (zero when the child could not be measured yet).
pub(super) fn measure_child_width(
    width: MeasureSpec,
    inner_width: f32,
    child: &mut Element,
    can_measure_height: bool,
    has: Resolved,
    ctx: &MeasureContext<'_>,
) -> Result<(Resolved, f32), LayoutError> {
    let em = ctx.em_px();
    let mut h_wt = 0.0f32;
    let mut h_px = 0.0f32;
    let mut h_px_used = 0.0f32;
    let mut flags = has;

    if has.contains(Resolved::H_COMPLETE) && has.contains(Resolved::MEASURED) {
        let cf = child.frame();
        let extent = cf.width.value() + cf.margin.left + cf.margin.right;
        return Ok((has, extent as f32));
    }

    // Step 1: width resolvable without the leftover total.
    if !flags.contains(Resolved::WIDTH) {
        match child.spec().width {
            DimenSpec::Pixel(w) => {
                child.frame_mut().width = MeasureSpec::pixel(round_px(w));
                set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                flags = flags.with(Resolved::WIDTH);
            }
            DimenSpec::Ems(w) => {
                child.frame_mut().width = MeasureSpec::pixel(round_px(w * em));
                set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                flags = flags.with(Resolved::WIDTH);
            }
            DimenSpec::Weight(w) => {
                if width.is_pixel() {
                    h_wt += w;
                }
                // Otherwise wait for the widest-child width.
            }
            DimenSpec::Percent(p) => {
                if width.is_pixel() {
                    let w = p / 100.0 * inner_width;
                    child.frame_mut().width = MeasureSpec::pixel(round_px(w));
                    set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    flags = flags.with(Resolved::WIDTH);
                }
            }
            // Resolved together with the height.
            DimenSpec::Ratio(_) => {}
            // Measured against the leftover below.
            DimenSpec::Auto | DimenSpec::Unlimited => {}
        }
    }

    // Step 2: side margins.
    if let Some(m) = child.spec().margin {
        for (edge, left) in [(m.left, true), (m.right, false)] {
            let flag = if left {
                Resolved::MARGIN_LEFT
            } else {
                Resolved::MARGIN_RIGHT
            };
            if flags.contains(flag) {
                continue;
            }
            let set = |cf: &mut Frame, v: i32| {
                if left {
                    cf.margin.left = v;
                } else {
                    cf.margin.right = v;
                }
            };
            if edge.is_zero() {
                flags = flags.with(flag);
                continue;
            }
            match edge {
                DimenSpec::Pixel(v) => {
                    set(child.frame_mut(), round_px(v));
                    h_px += v;
                    h_px_used += v;
                    flags = flags.with(flag);
                }
                DimenSpec::Ems(v) => {
                    let v = v * em;
                    set(child.frame_mut(), round_px(v));
                    h_px += v;
                    h_px_used += v;
                    flags = flags.with(flag);
                }
                DimenSpec::Weight(w) => {
                    if width.is_pixel() {
                        h_wt += w;
                    }
                }
                DimenSpec::Percent(p) => {
                    if width.is_pixel() {
                        let v = p / 100.0 * inner_width;
                        set(child.frame_mut(), round_px(v));
                        h_px += v;
                        h_px_used += v;
                        flags = flags.with(flag);
                    }
                }
                other => return Err(invalid_edge("margin", other)),
            }
        }
    } else {
        flags = flags.with(Resolved::MARGIN_LEFT).with(Resolved::MARGIN_RIGHT);
    }

    let mut h_px_remain = (inner_width - h_px_used).max(0.0);

    // Step 3: leftover-dependent widths.
    let mut can_measure_width = true;
    if !flags.contains(Resolved::WIDTH) {
        match child.spec().width {
            DimenSpec::Weight(w) => {
                if width.is_pixel() {
                    let wpx = w / h_wt * h_px_remain;
                    child.frame_mut().width = MeasureSpec::pixel(round_px(wpx));
                    set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
                    flags = flags.with(Resolved::WIDTH);
                } else {
                    can_measure_width = false;
                }
            }
            DimenSpec::Percent(_) => {
                if !width.is_pixel() {
                    can_measure_width = false;
                }
            }
            DimenSpec::Auto | DimenSpec::Unlimited => {
                child.frame_mut().width =
                    MeasureSpec::new(round_px(h_px_remain), own_mode(child.spec().width));
                set_ratio_height(child.spec().height, child.frame_mut(), SpecMode::Pixel);
            }
            _ => {}
        }
    }

    if can_measure_width && can_measure_height {
        if !flags.contains(Resolved::MEASURED) {
            let (w, h) = (child.frame().width, child.frame().height);
            child.measure(w, h, ctx)?;
            remeasure_if_ratio_moved(child, ctx)?;
            flags = flags.with(Resolved::WIDTH).with(Resolved::MEASURED);
        }

        h_px_remain -= child.frame().width.value() as f32;
        h_px += child.frame().width.value() as f32;

        if let Some(m) = child.spec().margin {
            if !flags.contains(Resolved::MARGIN_LEFT) {
                if let DimenSpec::Weight(w) = m.left {
                    if width.is_pixel() {
                        let l = if h_wt > 0.0 && h_px_remain > 0.0 {
                            w / h_wt * h_px_remain
                        } else {
                            0.0
                        };
                        child.frame_mut().margin.left = round_px(l);
                        h_px += l;
                        flags = flags.with(Resolved::MARGIN_LEFT);
                    }
                }
            }
            if !flags.contains(Resolved::MARGIN_RIGHT) {
                if let DimenSpec::Weight(w) = m.right {
                    if width.is_pixel() {
                        let r = if h_wt > 0.0 && h_px_remain > 0.0 {
                            w / h_wt * h_px_remain
                        } else {
                            0.0
                        };
                        child.frame_mut().margin.right = round_px(r);
                        h_px += r;
                        flags = flags.with(Resolved::MARGIN_RIGHT);
                    }
                }
            }
        }

        child.frame_mut().resolved = flags;
        return Ok((flags, h_px));
    }

    child.frame_mut().resolved = flags;
    Ok((flags, 0.0))
}

/// After a child's measure, a ratio axis may disagree with the now-final
/// paired axis; re-derive it and measure once more if it moved.
pub(super) fn remeasure_if_ratio_moved(
    child: &mut Element,
    ctx: &MeasureContext<'_>,
) -> Result<(), LayoutError> {
    if let DimenSpec::Ratio(r) = child.spec().width {
        let old = child.frame().width;
        let new = MeasureSpec::pixel(round_px(child.frame().height.value() as f32 * r));
        if old != new {
            warn!("auto and ratio sizes force a second measure");
            child.frame_mut().width = new;
            let h = child.frame().height;
            child.measure(new, h, ctx)?;
        }
    }
    if let DimenSpec::Ratio(r) = child.spec().height {
        let old = child.frame().height;
        let new = MeasureSpec::pixel(round_px(child.frame().width.value() as f32 / r));
        if old != new {
            warn!("auto and ratio sizes force a second measure");
            child.frame_mut().height = new;
            let w = child.frame().width;
            child.measure(w, new, ctx)?;
        }
    }
    Ok(())
}

impl From<Column> for Element {
    fn from(column: Column) -> Self {
        Element::Column(Box::new(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, Label, Margins};
    use crate::primitives::Size;
    use crate::text::MonospaceMeasurer;

    fn block(width: DimenSpec, height: DimenSpec) -> Block {
        Block::new().spec(BoxSpec::new(width, height))
    }

    #[test]
    fn test_fixed_and_weight_heights() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .child(block(DimenSpec::Pixel(50.0), DimenSpec::Pixel(100.0)))
            .child(block(DimenSpec::Pixel(50.0), DimenSpec::Weight(1.0)))
            .child(block(DimenSpec::Pixel(50.0), DimenSpec::Weight(3.0)));
        column
            .measure(MeasureSpec::pixel(50), MeasureSpec::pixel(300), &ctx)
            .unwrap();
        let heights: Vec<i32> = column
            .children
            .iter()
            .map(|c| c.frame().size().height)
            .collect();
        assert_eq!(heights, vec![100, 50, 150]);
    }

    #[test]
    fn test_percent_child_on_auto_height() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Pixel(100.0)))
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Percent(50.0)));
        column
            .measure(MeasureSpec::pixel(40), MeasureSpec::auto(1000), &ctx)
            .unwrap();
        // inner = 100 / (1 - 50/100) = 200, so the percent child is 100.
        assert_eq!(column.frame.size().height, 200);
        assert_eq!(column.children[1].frame().size().height, 100);
    }

    #[test]
    fn test_auto_width_takes_widest_child() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .child(block(DimenSpec::Pixel(80.0), DimenSpec::Pixel(10.0)))
            .child(block(DimenSpec::Pixel(120.0), DimenSpec::Pixel(10.0)));
        column
            .measure(MeasureSpec::auto(500), MeasureSpec::auto(500), &ctx)
            .unwrap();
        assert_eq!(column.frame.size(), Size::new(120, 20));
    }

    #[test]
    fn test_auto_width_clamps_to_bound() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column =
            Column::new().child(block(DimenSpec::Pixel(300.0), DimenSpec::Pixel(10.0)));
        column
            .measure(MeasureSpec::auto(100), MeasureSpec::auto(100), &ctx)
            .unwrap();
        assert_eq!(column.frame.size().width, 100);
    }

    #[test]
    fn test_zero_inner_space() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new().child(block(DimenSpec::Auto, DimenSpec::Auto));
        column
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(0), &ctx)
            .unwrap();
        assert_eq!(column.children[0].frame().size(), Size::ZERO);
        assert_eq!(column.frame.size(), Size::new(100, 0));
    }

    #[test]
    fn test_weight_margins_share_leftover() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new().child(
            Block::new()
                .spec(
                    BoxSpec::new(DimenSpec::Pixel(10.0), DimenSpec::Pixel(100.0)).margin(
                        Margins {
                            top: DimenSpec::Weight(1.0),
                            bottom: DimenSpec::Weight(1.0),
                            ..Margins::default()
                        },
                    ),
                )
                .content(Size::ZERO),
        );
        column
            .measure(MeasureSpec::pixel(10), MeasureSpec::pixel(300), &ctx)
            .unwrap();
        let cf = column.children[0].frame();
        assert_eq!(cf.margin.top, 100);
        assert_eq!(cf.margin.bottom, 100);
        assert_eq!(cf.size().height, 100);
    }

    #[test]
    fn test_overfull_weight_margin_collapses() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new().child(
            Block::new().spec(
                BoxSpec::new(DimenSpec::Pixel(50.0), DimenSpec::Pixel(150.0)).margin(Margins {
                    top: DimenSpec::Weight(1.0),
                    ..Margins::default()
                }),
            ),
        );
        column
            .measure(MeasureSpec::pixel(50), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        // The child overfills the container; no leftover exists for the
        // weighted margin, which must collapse to zero, not go negative.
        let cf = column.children[0].frame();
        assert_eq!(cf.margin.top, 0);
        assert_eq!(cf.size().height, 150);
    }

    #[test]
    fn test_zero_percent_child_on_auto_height() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Pixel(50.0)))
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Percent(0.0)));
        column
            .measure(MeasureSpec::pixel(40), MeasureSpec::auto(1000), &ctx)
            .unwrap();
        assert_eq!(column.frame.size().height, 50);
        assert_eq!(column.children[1].frame().size().height, 0);
    }

    #[test]
    fn test_wider_sibling_unwraps_text() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        // 30 columns at a 6px advance: 180px unwrapped.
        let mut column = Column::new()
            .child(block(DimenSpec::Pixel(300.0), DimenSpec::Pixel(50.0)))
            .child(Label::new("abcdefghijklmnopqrstuvwxyz0123"));
        column
            .measure(MeasureSpec::unlimited(100), MeasureSpec::pixel(200), &ctx)
            .unwrap();
        // The label wrapped against the 100px hint in pass 1; the pixel
        // sibling pushes the inner width to 300, so pass 2 re-measures
        // it and the text straightens out to one line.
        assert_eq!(column.frame.size().width, 300);
        assert_eq!(column.children[1].frame().size(), Size::new(180, 14));
    }

    #[test]
    fn test_layout_stacks_and_aligns() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .align(Align {
                horizontal: HorizontalAlign::Center,
                vertical: VerticalAlign::Top,
            })
            .child(block(DimenSpec::Pixel(40.0), DimenSpec::Pixel(30.0)))
            .child(block(DimenSpec::Pixel(100.0), DimenSpec::Pixel(30.0)));
        column
            .measure(MeasureSpec::pixel(100), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        column.layout(0, 0);
        assert_eq!(column.children[0].frame().x, 30);
        assert_eq!(column.children[0].frame().y, 0);
        assert_eq!(column.children[1].frame().x, 0);
        assert_eq!(column.children[1].frame().y, 30);
    }

    #[test]
    fn test_measure_is_idempotent() {
        let measurer = MonospaceMeasurer;
        let ctx = MeasureContext::new(&measurer);
        let mut column = Column::new()
            .child(block(DimenSpec::Percent(50.0), DimenSpec::Pixel(20.0)))
            .child(block(DimenSpec::Auto, DimenSpec::Weight(1.0)));
        column
            .measure(MeasureSpec::pixel(200), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        let first: Vec<Frame> = column.children.iter().map(|c| *c.frame()).collect();
        let mut again = column.clone();
        for child in &mut again.children {
            child.clear_frames();
        }
        again
            .measure(MeasureSpec::pixel(200), MeasureSpec::pixel(100), &ctx)
            .unwrap();
        let second: Vec<Frame> = again.children.iter().map(|c| *c.frame()).collect();
        assert_eq!(first, second);
    }
}
