#![forbid(unsafe_code)]

//! Integer points and half-open pixel rectangles.
//!
//! A [`Rect`] spans `x1..x2` by `y1..y2` and is always normalized so that
//! `x1 <= x2` and `y1 <= y2`. Constructing one with swapped corners reorders
//! them, which is what lets background-rectangle commands accept corners in
//! either order.

use std::ops::Add;

/// An integer pixel position or offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    /// Saturating. Offsets are unbounded (move deltas carry no range
    /// limit), so extreme sums pin to the `i32` range; downstream clipping
    /// discards anything off-surface.
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// A half-open axis-aligned rectangle: `x1..x2` by `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Builds a rectangle from two corners, normalizing so min <= max on
    /// both axes.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Rect { x1, y1, x2, y2 }
    }

    /// The rectangle covering a `width` x `height` surface.
    pub fn from_size(width: u32, height: u32) -> Self {
        Rect {
            x1: 0,
            y1: 0,
            x2: width as i32,
            y2: height as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Intersection with `other`; may be empty.
    pub fn intersect(&self, other: Rect) -> Rect {
        Rect {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_corners() {
        let r = Rect::new(9, 7, 2, 3);
        assert_eq!(r, Rect::new(2, 3, 9, 7));
        assert_eq!(r.width(), 7);
        assert_eq!(r.height(), 4);
    }

    #[test]
    fn empty_when_degenerate() {
        assert!(Rect::new(5, 0, 5, 10).is_empty());
        assert!(!Rect::new(5, 0, 6, 10).is_empty());
    }

    #[test]
    fn intersect_clips() {
        let bounds = Rect::from_size(100, 50);
        let r = Rect::new(-10, 40, 120, 80).intersect(bounds);
        assert_eq!(r, Rect::new(0, 40, 100, 50));

        let outside = Rect::new(200, 200, 300, 300).intersect(bounds);
        assert!(outside.is_empty());
    }

    #[test]
    fn point_add_saturates_at_extremes() {
        let p = Point::new(i32::MAX - 1, i32::MIN + 1) + Point::new(100, -100);
        assert_eq!(p, Point::new(i32::MAX, i32::MIN));
        // Ordinary sums are unaffected.
        assert_eq!(Point::new(3, -4) + Point::new(1, 2), Point::new(4, -2));
    }
}
