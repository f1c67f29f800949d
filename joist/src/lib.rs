//! Box-model layout engine: declared dimensions in, pixel geometry out.
//!
//! A tree of [`Element`] boxes carries declared sizes ([`DimenSpec`]:
//! pixels, percentages, weights, aspect ratios, ems, or auto). One call
//! to [`run_layout`] measures the tree against a viewport, arranges it,
//! and leaves every box with an absolute pixel [`Frame`]. Rendering is
//! separate: the draw pass emits operations into a [`Canvas`] the host
//! provides, and text metrics come in through the [`TextMeasurer`]
//! seam.
//!
//! ```
//! use joist::{
//!     run_layout, Block, BoxSpec, Column, DimenSpec, Element, MeasureContext,
//!     MonospaceMeasurer,
//! };
//!
//! let measurer = MonospaceMeasurer;
//! let ctx = MeasureContext::new(&measurer);
//! let mut root: Element = Column::new()
//!     .spec(BoxSpec::new(DimenSpec::Pixel(300.0), DimenSpec::Pixel(200.0)))
//!     .child(Block::new().spec(BoxSpec::new(DimenSpec::Auto, DimenSpec::Pixel(50.0))))
//!     .child(Block::new().spec(BoxSpec::new(DimenSpec::Auto, DimenSpec::Weight(1.0))))
//!     .into();
//! let size = run_layout(&mut root, 300, 200, &ctx).unwrap();
//! assert_eq!(size.width, 300);
//! assert_eq!(root.children()[1].frame().size().height, 150);
//! ```

mod align;
mod canvas;
mod dimension;
mod error;
mod frame;
mod invalidate;
pub mod layout;
mod primitives;
mod text;

pub use align::{Align, HorizontalAlign, VerticalAlign};
pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use dimension::{DimenSpec, MeasureSpec, SpecMode};
pub use error::LayoutError;
pub use frame::{Edges, Frame, Resolved};
pub use invalidate::{BoxId, InvalidateQueue};
pub use layout::{
    run_layout, Block, BoxSpec, Caps, Column, Element, Label, Layer, Margins, MeasureContext,
    Paddings, Row, Scroll,
};
pub use primitives::{Point, Rect, Size};
pub use text::{MonospaceMeasurer, TextMeasurer};
