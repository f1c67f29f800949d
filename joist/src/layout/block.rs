//! Plain rectangular leaf: an image-like box with a fixed intrinsic
//! content size and no children.

use crate::canvas::Canvas;
use crate::dimension::MeasureSpec;
use crate::error::LayoutError;
use crate::frame::{Frame, Resolved};
use crate::layout::resolve::{set_new_height, set_new_width};
use crate::layout::{BoxSpec, MeasureContext};
use crate::primitives::{Rect, Size};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub spec: BoxSpec,
    /// Intrinsic content size, reported when a constraint leaves an
    /// axis free.
    pub content: Size,
    pub frame: Frame,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(mut self, spec: BoxSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn content(mut self, content: Size) -> Self {
        self.content = content;
        self
    }

    pub fn measure(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        _ctx: &MeasureContext<'_>,
    ) -> Result<(), LayoutError> {
        set_new_width(&mut self.frame, width, MeasureSpec::pixel(self.content.width));
        set_new_height(
            &mut self.frame,
            height,
            MeasureSpec::pixel(self.content.height),
        );
        self.frame.resolved = self.frame.resolved.with(Resolved::COMPLETE);
        Ok(())
    }

    pub fn layout(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let size = self.frame.size();
        canvas.fill_rect(Rect::new(0, 0, size.width, size.height));
    }
}

impl From<Block> for super::Element {
    fn from(block: Block) -> Self {
        super::Element::Block(block)
    }
}
