#![forbid(unsafe_code)]

//! The mutable canvas state and its render pass.
//!
//! `State` is owned outright by the execution loop thread while the loop is
//! running; nothing here is synchronized. All mutation happens through
//! [`crate::op::Op::apply`] on that thread.

use easel_render::color::Rgba;
use easel_render::glyph::{self, Glyph};
use easel_render::rect::{Point, Rect};
use easel_render::surface::Surface;

/// Background color at loop start.
pub const INITIAL_BACKGROUND: Rgba = Rgba::WHITE;

/// Background color restored by the reset operation.
pub const RESET_BACKGROUND: Rgba = Rgba::BLACK;

/// Interior fill of the background rectangle.
pub const RECT_FILL: Rgba = Rgba::BLACK;

/// One-pixel border of the background rectangle.
pub const RECT_BORDER: Rgba = Rgba::GREEN;

/// Converts a unit-interval (or unrestricted, for move deltas) coordinate
/// to pixel space against one surface dimension.
pub fn to_px(unit: f64, dimension: u32) -> i32 {
    (unit * f64::from(dimension)).round() as i32
}

/// A figure on the canvas. Immutable once created; only the state's shared
/// move offset shifts its rendered position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub center: Point,
    pub glyph: Glyph,
    pub color: Rgba,
}

/// Decides the shape and color assigned to newly added figures.
///
/// The assignment rule is a product decision, not a structural one, so it is
/// carried as data rather than hard-coded in the add operation. By default
/// every figure is an inverted yellow T.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigurePolicy {
    pub glyph: Glyph,
    pub color: Rgba,
}

impl Default for FigurePolicy {
    fn default() -> Self {
        FigurePolicy {
            glyph: Glyph::T180,
            color: Rgba::YELLOW,
        }
    }
}

/// The drawing state a loop applies operations against.
#[derive(Debug, Clone)]
pub struct State {
    pub bg_color: Rgba,
    pub bg_rect: Option<Rect>,
    pub figures: Vec<Figure>,
    pub move_offset: Point,
    pub width: u32,
    pub height: u32,
    pub policy: FigurePolicy,
}

impl State {
    pub fn new(width: u32, height: u32, policy: FigurePolicy) -> Self {
        State {
            bg_color: INITIAL_BACKGROUND,
            bg_rect: None,
            figures: Vec::new(),
            move_offset: Point::ZERO,
            width,
            height,
            policy,
        }
    }

    /// Clears every mutable field back to the reset defaults.
    pub fn reset(&mut self) {
        self.bg_color = RESET_BACKGROUND;
        self.bg_rect = None;
        self.figures.clear();
        self.move_offset = Point::ZERO;
    }

    /// The full render pass: background, background rectangle with border,
    /// then every figure in insertion order at `center + move_offset`.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill(surface.bounds(), self.bg_color);

        if let Some(rect) = self.bg_rect {
            surface.fill(rect, RECT_FILL);
            self.render_rect_border(surface, rect);
        }

        for figure in &self.figures {
            glyph::draw(
                surface,
                figure.center + self.move_offset,
                figure.glyph,
                figure.color,
            );
        }
    }

    fn render_rect_border(&self, surface: &mut dyn Surface, rect: Rect) {
        if rect.width() > 0 && rect.height() > 0 {
            // Top edge, then the remaining edges where the rectangle is
            // tall/wide enough that they do not collapse into it.
            surface.fill(
                Rect::new(rect.x1, rect.y1, rect.x2, rect.y1 + 1).intersect(rect),
                RECT_BORDER,
            );
            if rect.height() > 1 {
                surface.fill(
                    Rect::new(rect.x1, rect.y2 - 1, rect.x2, rect.y2).intersect(rect),
                    RECT_BORDER,
                );
            }
            if rect.width() > 1 {
                surface.fill(
                    Rect::new(rect.x1, rect.y1 + 1, rect.x1 + 1, rect.y2 - 1).intersect(rect),
                    RECT_BORDER,
                );
                surface.fill(
                    Rect::new(rect.x2 - 1, rect.y1 + 1, rect.x2, rect.y2 - 1).intersect(rect),
                    RECT_BORDER,
                );
            }
        } else if rect.width() > 0 {
            // Zero-height rectangle: a single horizontal border line.
            surface.fill(Rect::new(rect.x1, rect.y1, rect.x2, rect.y1 + 1), RECT_BORDER);
        } else if rect.height() > 0 {
            // Zero-width rectangle: a single vertical border line.
            surface.fill(Rect::new(rect.x1, rect.y1, rect.x1 + 1, rect.y2), RECT_BORDER);
        }
        // Zero-area rectangle: nothing to draw.
    }
}
