//! Integer screen-space rectangles.

use serde::Serialize;

/// Axis-aligned rectangle in signed screen coordinates, as reported by the window system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// Build a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle has no area on either axis.
    pub fn is_empty(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }

    /// Shrink every edge inward by `dx` horizontally and `dy` vertically.
    pub fn shrink(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right - dx,
            bottom: self.bottom - dy,
        }
    }

    /// Inclusive interval intersection on both axes.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 200, 100);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(101, 0, 200, 100);
        assert!(!a.intersects(&b));
        let c = Rect::new(0, 150, 100, 200);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn shrink_moves_all_edges() {
        let r = Rect::new(-50, 10, 50, 110).shrink(10, 5);
        assert_eq!(r, Rect::new(-40, 15, 40, 105));
        assert_eq!(r.width(), 80);
        assert_eq!(r.height(), 90);
    }

    #[test]
    fn empty_when_degenerate() {
        assert!(Rect::new(5, 0, 5, 10).is_empty());
        assert!(Rect::default().is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
