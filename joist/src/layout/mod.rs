//! The box tree and the measurement/arrangement entry point.
//!
//! Every box in a layout tree is an [`Element`]: one closed enum instead
//! of trait objects, so the hot measurement loop dispatches with a match
//! and capability checks are a flag test rather than a downcast.

use std::fmt;

use tracing::debug;

use crate::canvas::Canvas;
use crate::dimension::{DimenSpec, MeasureSpec};
use crate::error::LayoutError;
use crate::frame::Frame;
use crate::primitives::Size;
use crate::text::TextMeasurer;

pub mod spec;

mod block;
mod column;
mod label;
mod layer;
pub(crate) mod resolve;
mod row;
mod scroll;

pub use block::Block;
pub use column::Column;
pub use label::Label;
pub use layer::Layer;
pub use row::Row;
pub use scroll::Scroll;
pub use spec::{BoxSpec, Margins, Paddings};

use resolve::round_px;

/// What a box can do, declared at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps(u8);

impl Caps {
    pub const SIZEABLE: Caps = Caps(1 << 0);
    pub const MEASURABLE: Caps = Caps(1 << 1);
    pub const LAYOUTABLE: Caps = Caps(1 << 2);
    pub const DRAWABLE: Caps = Caps(1 << 3);
    pub const PARENT: Caps = Caps(1 << 4);

    /// Every leaf box.
    pub const LEAF: Caps =
        Caps(Self::SIZEABLE.0 | Self::MEASURABLE.0 | Self::LAYOUTABLE.0 | Self::DRAWABLE.0);
    /// Every container box.
    pub const CONTAINER: Caps = Caps(Self::LEAF.0 | Self::PARENT.0);

    #[inline]
    pub const fn contains(self, other: Caps) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Shared collaborators a measure pass reads from.
#[derive(Clone, Copy)]
pub struct MeasureContext<'a> {
    pub text: &'a dyn TextMeasurer,
    /// Base font size used to resolve `em` dimensions outside of text
    /// boxes (a text box anchors `em` to its own measured text instead).
    pub base_font_px: f32,
}

impl<'a> MeasureContext<'a> {
    pub fn new(text: &'a dyn TextMeasurer) -> Self {
        Self {
            text,
            base_font_px: 12.0,
        }
    }

    /// Pixels per `em` for boxes with no text of their own.
    pub(crate) fn em_px(&self) -> f32 {
        self.text.line_height(self.base_font_px)
    }
}

impl fmt::Debug for MeasureContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureContext")
            .field("base_font_px", &self.base_font_px)
            .finish_non_exhaustive()
    }
}

/// One box in the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Row(Box<Row>),
    Column(Box<Column>),
    Layer(Box<Layer>),
    Scroll(Box<Scroll>),
    Label(Box<Label>),
    Block(Block),
}

impl Element {
    pub fn caps(&self) -> Caps {
        match self {
            Element::Row(_)
            | Element::Column(_)
            | Element::Layer(_)
            | Element::Scroll(_) => Caps::CONTAINER,
            Element::Label(_) | Element::Block(_) => Caps::LEAF,
        }
    }

    pub fn spec(&self) -> &BoxSpec {
        match self {
            Element::Row(e) => &e.spec,
            Element::Column(e) => &e.spec,
            Element::Layer(e) => &e.spec,
            Element::Scroll(e) => &e.spec,
            Element::Label(e) => &e.spec,
            Element::Block(e) => &e.spec,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Element::Row(e) => &e.frame,
            Element::Column(e) => &e.frame,
            Element::Layer(e) => &e.frame,
            Element::Scroll(e) => &e.frame,
            Element::Label(e) => &e.frame,
            Element::Block(e) => &e.frame,
        }
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        match self {
            Element::Row(e) => &mut e.frame,
            Element::Column(e) => &mut e.frame,
            Element::Layer(e) => &mut e.frame,
            Element::Scroll(e) => &mut e.frame,
            Element::Label(e) => &mut e.frame,
            Element::Block(e) => &mut e.frame,
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Row(e) => &e.children,
            Element::Column(e) => &e.children,
            Element::Layer(e) => &e.children,
            Element::Scroll(e) => &e.children,
            Element::Label(_) | Element::Block(_) => &[],
        }
    }

    /// Resolve this box's frame against the given constraints.
    pub fn measure(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &MeasureContext<'_>,
    ) -> Result<(), LayoutError> {
        match self {
            Element::Row(e) => e.measure(width, height, ctx),
            Element::Column(e) => e.measure(width, height, ctx),
            Element::Layer(e) => e.measure(width, height, ctx),
            Element::Scroll(e) => e.measure(width, height, ctx),
            Element::Label(e) => e.measure(width, height, ctx),
            Element::Block(e) => e.measure(width, height, ctx),
        }
    }

    /// Assign absolute positions from already-final sizes.
    pub fn layout(&mut self, x: i32, y: i32) {
        match self {
            Element::Row(e) => e.layout(x, y),
            Element::Column(e) => e.layout(x, y),
            Element::Layer(e) => e.layout(x, y),
            Element::Scroll(e) => e.layout(x, y),
            Element::Label(e) => e.layout(x, y),
            Element::Block(e) => e.layout(x, y),
        }
    }

    /// Emit draw operations in local coordinates; the caller translates
    /// the canvas to this box's origin first.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Element::Row(e) => e.draw(canvas),
            Element::Column(e) => e.draw(canvas),
            Element::Layer(e) => e.draw(canvas),
            Element::Scroll(e) => e.draw(canvas),
            Element::Label(e) => e.draw(canvas),
            Element::Block(e) => e.draw(canvas),
        }
    }

    /// Check declared sizes over the whole subtree before measuring.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.spec().validate()?;
        if let Element::Scroll(scroll) = self {
            if scroll.children.len() > 1 {
                return Err(LayoutError::ScrollChildCount {
                    count: scroll.children.len(),
                });
            }
        }
        if let Element::Label(label) = self {
            for icon in label.icons() {
                icon.validate()?;
            }
        }
        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }

    /// Reset every frame in the subtree to unresolved.
    pub fn clear_frames(&mut self) {
        self.frame_mut().clear();
        match self {
            Element::Row(e) => e.children.iter_mut().for_each(Element::clear_frames),
            Element::Column(e) => e.children.iter_mut().for_each(Element::clear_frames),
            Element::Layer(e) => e.children.iter_mut().for_each(Element::clear_frames),
            Element::Scroll(e) => e.children.iter_mut().for_each(Element::clear_frames),
            Element::Label(e) => e.icons_mut().for_each(Element::clear_frames),
            Element::Block(_) => {}
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Element::Row(_) => "row",
            Element::Column(_) => "column",
            Element::Layer(_) => "layer",
            Element::Scroll(_) => "scroll",
            Element::Label(_) => "label",
            Element::Block(_) => "block",
        }
    }
}

/// Derive the constraint a root box's declared axis maps to inside a
/// viewport of `available` pixels.
fn root_constraint(spec: DimenSpec, available: i32, em_px: f32) -> MeasureSpec {
    match spec {
        DimenSpec::Pixel(v) => MeasureSpec::pixel(round_px(v)),
        DimenSpec::Percent(p) => MeasureSpec::pixel(round_px(p / 100.0 * available as f32)),
        DimenSpec::Ems(v) => MeasureSpec::pixel(round_px(v * em_px)),
        // A root has no siblings to compete with.
        DimenSpec::Weight(_) => MeasureSpec::pixel(available),
        DimenSpec::Auto => MeasureSpec::auto(available),
        DimenSpec::Unlimited => MeasureSpec::unlimited(available),
        // Resolved against the opposite axis by the caller.
        DimenSpec::Ratio(_) => MeasureSpec::auto(available),
    }
}

/// Run one full measurement and arrangement cycle over a tree.
///
/// Clears every frame, measures the root inside the
/// `viewport_width x viewport_height` pixel viewport, arranges the tree
/// at the origin, and returns the root's resolved size.
pub fn run_layout(
    root: &mut Element,
    viewport_width: i32,
    viewport_height: i32,
    ctx: &MeasureContext<'_>,
) -> Result<Size, LayoutError> {
    root.validate()?;
    root.clear_frames();

    let em = ctx.em_px();
    let mut width = root_constraint(root.spec().width, viewport_width, em);
    let mut height = root_constraint(root.spec().height, viewport_height, em);
    if let DimenSpec::Ratio(r) = root.spec().width {
        if height.is_pixel() {
            width = MeasureSpec::pixel(round_px(height.value() as f32 * r));
        }
    }
    if let DimenSpec::Ratio(r) = root.spec().height {
        if width.is_pixel() {
            height = MeasureSpec::pixel(round_px(width.value() as f32 / r));
        }
    }

    debug!(kind = root.kind(), %width, %height, "layout cycle begin");
    root.measure(width, height, ctx)?;

    let frame = root.frame();
    if !frame.width.is_pixel() || !frame.height.is_pixel() {
        return Err(LayoutError::Unresolved {
            container: "root",
            remaining: 1,
        });
    }

    root.layout(0, 0);
    let size = root.frame().size();
    debug!(width = size.width, height = size.height, "layout cycle end");
    Ok(size)
}
