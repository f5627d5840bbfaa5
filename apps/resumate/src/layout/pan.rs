//! Drag-to-pan over the preview scroll area.
//!
//! Panning moves the scroll position opposite to the pointer: dragging the
//! page right scrolls the viewport left. A session captures the scroll origin
//! and pointer anchor at press time and stays pure after that.
#![allow(dead_code)]

use crate::layout::Point;

#[derive(Debug, Default)]
pub struct PanSession {
    active: Option<Anchor>,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    /// Scroll offset when the drag began.
    scroll_origin: Point,
    /// Pointer position when the drag began.
    pointer_start: Point,
}

impl PanSession {
    pub fn new() -> Self {
        PanSession::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begins a drag at the given pointer position and current scroll offset.
    pub fn begin(&mut self, pointer: Point, scroll: Point) {
        self.active = Some(Anchor {
            scroll_origin: scroll,
            pointer_start: pointer,
        });
    }

    /// The scroll offset for the current pointer position, or `None` when no
    /// drag is in progress (stray move events are ignored).
    pub fn drag(&self, pointer: Point) -> Option<Point> {
        let anchor = self.active?;
        Some(Point {
            x: anchor.scroll_origin.x + (anchor.pointer_start.x - pointer.x),
            y: anchor.scroll_origin.y + (anchor.pointer_start.y - pointer.y),
        })
    }

    pub fn end(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_drag_moves_scroll_opposite_to_pointer() {
        let mut pan = PanSession::new();
        pan.begin(point(100.0, 100.0), point(40.0, 60.0));

        // Pointer moved down-right; scroll goes up-left.
        let scroll = pan.drag(point(130.0, 150.0)).unwrap();
        assert_eq!(scroll, point(10.0, 10.0));
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let pan = PanSession::new();
        assert!(pan.drag(point(10.0, 10.0)).is_none());
        assert!(!pan.is_active());
    }

    #[test]
    fn test_end_stops_tracking() {
        let mut pan = PanSession::new();
        pan.begin(point(0.0, 0.0), point(0.0, 0.0));
        assert!(pan.is_active());
        pan.end();
        assert!(pan.drag(point(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_rebegin_rebases_the_anchor() {
        let mut pan = PanSession::new();
        pan.begin(point(0.0, 0.0), point(0.0, 0.0));
        pan.end();
        pan.begin(point(50.0, 50.0), point(20.0, 20.0));

        let scroll = pan.drag(point(45.0, 55.0)).unwrap();
        assert_eq!(scroll, point(25.0, 15.0));
    }
}
