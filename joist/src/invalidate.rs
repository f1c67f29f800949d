//! Coalesced relayout and redraw requests.
//!
//! Hosts call [`InvalidateQueue::request_layout`] or
//! [`InvalidateQueue::request_redraw`] whenever a box's declared sizes or
//! content change. Requests are keyed by box id and deduplicated, so a
//! burst of changes to the same box costs one entry; the host drains the
//! queue once per frame and runs the passes for whatever accumulated.

use indexmap::IndexSet;
use tracing::trace;

/// Opaque identity of a box, assigned by the host.
pub type BoxId = u64;

/// Pending invalidations, deduplicated per box, drained in the order
/// first requested.
#[derive(Debug, Default)]
pub struct InvalidateQueue {
    layout: IndexSet<BoxId>,
    redraw: IndexSet<BoxId>,
}

impl InvalidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a box as needing measure and layout. A box pending layout
    /// is implicitly pending redraw too.
    pub fn request_layout(&mut self, id: BoxId) {
        if self.layout.insert(id) {
            trace!(id, "layout requested");
        }
        self.redraw.swap_remove(&id);
    }

    /// Mark a box as needing redraw only; its geometry is unchanged.
    pub fn request_redraw(&mut self, id: BoxId) {
        if self.layout.contains(&id) {
            return;
        }
        if self.redraw.insert(id) {
            trace!(id, "redraw requested");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty() && self.redraw.is_empty()
    }

    /// Take all pending layout requests, in first-requested order.
    pub fn drain_layout(&mut self) -> Vec<BoxId> {
        self.layout.drain(..).collect()
    }

    /// Take all pending redraw-only requests, in first-requested order.
    pub fn drain_redraw(&mut self) -> Vec<BoxId> {
        self.redraw.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_requests_coalesce() {
        let mut queue = InvalidateQueue::new();
        queue.request_layout(1);
        queue.request_layout(2);
        queue.request_layout(1);
        assert_eq!(queue.drain_layout(), vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_layout_subsumes_redraw() {
        let mut queue = InvalidateQueue::new();
        queue.request_redraw(7);
        queue.request_layout(7);
        queue.request_redraw(7);
        assert_eq!(queue.drain_redraw(), Vec::<BoxId>::new());
        assert_eq!(queue.drain_layout(), vec![7]);
    }

    #[test]
    fn test_redraw_only() {
        let mut queue = InvalidateQueue::new();
        queue.request_redraw(3);
        queue.request_redraw(3);
        assert_eq!(queue.drain_redraw(), vec![3]);
        assert!(queue.drain_layout().is_empty());
    }
}
