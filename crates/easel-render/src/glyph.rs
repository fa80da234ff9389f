#![forbid(unsafe_code)]

//! Figure glyph geometry.
//!
//! Each glyph is one of the four rotations of a "T" or a cross, decomposed
//! into two or three axis-aligned rectangles whose union is centered on the
//! figure's effective center. Geometry is a pure function of (center,
//! variant, base size); the cross splits its vertical bar so the
//! intersection with the horizontal bar is filled exactly once.

use crate::color::Rgba;
use crate::rect::{Point, Rect};
use crate::surface::Surface;

/// Smallest glyph edge in pixels, regardless of surface size.
pub const MIN_BASE_SIZE: i32 = 20;

/// Glyph edge as a fraction of the smaller surface dimension. Kept under
/// 0.5 so glyphs never exceed half the window.
pub const BASE_FRACTION: f64 = 0.3;

/// The shape variant of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Upright T: cap on top, stem below.
    T0,
    /// T rotated 90 deg clockwise: cap on the right.
    T90,
    /// Inverted T: cap on the bottom.
    T180,
    /// T rotated 270 deg clockwise: cap on the left.
    T270,
    /// Plus-shaped cross.
    Cross,
}

/// Glyph edge length for a surface of the given dimensions.
pub fn base_size(width: u32, height: u32) -> i32 {
    let min_dim = width.min(height) as f64;
    ((min_dim * BASE_FRACTION) as i32).max(MIN_BASE_SIZE)
}

/// The rectangles making up `glyph` with edge length `base`, centered on
/// `center`. Unclipped; callers rely on fill-time clipping.
pub fn rects(center: Point, glyph: Glyph, base: i32) -> Vec<Rect> {
    let cap = base / 3; // cap thickness, also stem width and cross arm
    let stem = base - cap; // stem length
    // Saturating offsets: a center pinned near the i32 limits (extreme move
    // offsets) yields collapsed off-surface rects instead of overflowing.
    let x = |d: i32| center.x.saturating_add(d);
    let y = |d: i32| center.y.saturating_add(d);

    match glyph {
        Glyph::T0 => {
            let bar = Rect::new(x(-(base / 2)), y(-(base / 2)), x(base / 2), y(cap - base / 2));
            let leg = Rect::new(x(-(cap / 2)), bar.y2, x(cap / 2), bar.y2.saturating_add(stem));
            vec![bar, leg]
        }
        Glyph::T90 => {
            let bar = Rect::new(x(base / 2 - cap), y(-(base / 2)), x(base / 2), y(base / 2));
            let leg = Rect::new(bar.x1.saturating_sub(stem), y(-(cap / 2)), bar.x1, y(cap / 2));
            vec![bar, leg]
        }
        Glyph::T180 => {
            let bar = Rect::new(x(-(base / 2)), y(base / 2 - cap), x(base / 2), y(base / 2));
            let leg = Rect::new(x(-(cap / 2)), bar.y1.saturating_sub(stem), x(cap / 2), bar.y1);
            vec![bar, leg]
        }
        Glyph::T270 => {
            let bar = Rect::new(x(-(base / 2)), y(-(base / 2)), x(cap - base / 2), y(base / 2));
            let leg = Rect::new(bar.x2, y(-(cap / 2)), bar.x2.saturating_add(stem), y(cap / 2));
            vec![bar, leg]
        }
        Glyph::Cross => {
            let hbar = Rect::new(x(-(base / 2)), y(-(cap / 2)), x(base / 2), y(cap / 2));
            let upper = Rect::new(x(-(cap / 2)), y(-(base / 2)), x(cap / 2), hbar.y1);
            let lower = Rect::new(x(-(cap / 2)), hbar.y2, x(cap / 2), y(base / 2));
            vec![hbar, upper, lower]
        }
    }
}

/// Draws `glyph` in `color`, sized for the surface and clipped to it.
pub fn draw(surface: &mut dyn Surface, center: Point, glyph: Glyph, color: Rgba) {
    let base = base_size(surface.width(), surface.height());
    for rect in rects(center, glyph, base) {
        surface.fill(rect, color);
    }
}
