//! Drawing seam.
//!
//! Layout produces geometry; the host renders it. [`Canvas`] is the
//! minimal surface the draw pass writes to. [`RecordingCanvas`] captures
//! the emitted operations so tests can assert on draw order and
//! positions without a real backend.

use crate::primitives::Rect;

/// Render target for the draw pass. Coordinates are relative to the
/// current translation; containers translate to a child's origin before
/// drawing it and restore afterwards.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: i32, dy: i32);
    fn clip_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);
    fn draw_text(&mut self, text: &str, font_px: f32, x: i32, y: i32);
}

/// One captured [`Canvas`] operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate { dx: i32, dy: i32 },
    ClipRect(Rect),
    FillRect(Rect),
    Text { text: String, font_px: f32, x: i32, y: i32 },
}

/// Canvas that records operations instead of rendering them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute positions of all recorded text ops, applying the
    /// translation stack as a real backend would.
    pub fn text_positions(&self) -> Vec<(String, i32, i32)> {
        let mut stack = vec![(0, 0)];
        let mut current = (0, 0);
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Save => stack.push(current),
                DrawOp::Restore => {
                    if let Some(prev) = stack.pop() {
                        current = prev;
                    }
                }
                DrawOp::Translate { dx, dy } => {
                    current = (current.0 + dx, current.1 + dy);
                }
                DrawOp::Text { text, x, y, .. } => {
                    out.push((text.clone(), current.0 + x, current.1 + y));
                }
                DrawOp::FillRect(_) | DrawOp::ClipRect(_) => {}
            }
        }
        out
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClipRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect(rect));
    }

    fn draw_text(&mut self, text: &str, font_px: f32, x: i32, y: i32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            font_px,
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_positions_follow_translation() {
        let mut canvas = RecordingCanvas::new();
        canvas.save();
        canvas.translate(10, 20);
        canvas.draw_text("a", 16.0, 1, 2);
        canvas.save();
        canvas.translate(5, 5);
        canvas.draw_text("b", 16.0, 0, 0);
        canvas.restore();
        canvas.draw_text("c", 16.0, 0, 0);
        canvas.restore();
        canvas.draw_text("d", 16.0, 0, 0);

        assert_eq!(
            canvas.text_positions(),
            vec![
                ("a".to_string(), 11, 22),
                ("b".to_string(), 15, 25),
                ("c".to_string(), 10, 20),
                ("d".to_string(), 0, 0),
            ]
        );
    }
}
