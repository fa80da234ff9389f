#![forbid(unsafe_code)]

//! The closed set of operations producers may request.
//!
//! Every variant carries its own apply logic and reports whether a visual
//! refresh is required. Only [`Op::Reset`], [`Op::Refresh`], and a
//! [`Op::Batch`] containing one of them answer yes; plain state mutations
//! wait for the next refresh to become visible.

use easel_render::rect::{Point, Rect};
use easel_render::surface::Surface;
use tracing::debug;

use crate::state::{State, to_px};
use easel_render::color::Rgba;

/// A unit of requested state change.
///
/// Coordinate-carrying variants other than `Move` expect unit-interval
/// values; range validation is the parser's job and is not repeated here.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Overwrite the background color.
    SetBackground(Rgba),
    /// Set the background rectangle from unit-interval corners (any order).
    SetBackgroundRect { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Append a figure at a unit-interval position. Shape and color come
    /// from the state's figure policy.
    AddFigure { x: f64, y: f64 },
    /// Add a unit-scaled delta to the cumulative move offset. Unrestricted
    /// range.
    Move { dx: f64, dy: f64 },
    /// Restore defaults: reset background, drop the rectangle and all
    /// figures, zero the offset.
    Reset,
    /// Run the render pass against the owned surface.
    Refresh,
    /// Apply a list of operations in order as one unit.
    Batch(Vec<Op>),
}

impl Op {
    /// Applies the operation, returning true when the surface now needs to
    /// be presented.
    pub fn apply(&self, state: &mut State, surface: &mut dyn Surface) -> bool {
        match self {
            Op::SetBackground(color) => {
                state.bg_color = *color;
                false
            }
            Op::SetBackgroundRect { x1, y1, x2, y2 } => {
                let rect = Rect::new(
                    to_px(*x1, state.width),
                    to_px(*y1, state.height),
                    to_px(*x2, state.width),
                    to_px(*y2, state.height),
                );
                debug!(?rect, "background rectangle set");
                state.bg_rect = Some(rect);
                false
            }
            Op::AddFigure { x, y } => {
                let center = Point::new(to_px(*x, state.width), to_px(*y, state.height));
                state.figures.push(crate::state::Figure {
                    center,
                    glyph: state.policy.glyph,
                    color: state.policy.color,
                });
                debug!(?center, count = state.figures.len(), "figure added");
                false
            }
            Op::Move { dx, dy } => {
                let delta = Point::new(to_px(*dx, state.width), to_px(*dy, state.height));
                state.move_offset = state.move_offset + delta;
                false
            }
            Op::Reset => {
                state.reset();
                true
            }
            Op::Refresh => {
                state.render(surface);
                true
            }
            Op::Batch(ops) => {
                let mut needs_refresh = false;
                for op in ops {
                    if op.apply(state, surface) {
                        needs_refresh = true;
                    }
                }
                needs_refresh
            }
        }
    }
}
