#![forbid(unsafe_code)]

//! Render kernel: colors, rectangles, pixel surfaces, and glyph geometry.
//!
//! # Role in Easel
//! `easel-render` is the deterministic drawing layer. It defines the pixel
//! [`surface::Surface`] abstraction the execution loop owns exclusively, the
//! in-memory [`surface::PixelSurface`] implementation handed to render sinks,
//! and the axis-aligned rectangle decomposition of the five figure glyphs.
//!
//! # Primary responsibilities
//! - **Rgba/Rect**: color values and normalized, half-open pixel rectangles.
//! - **Surface**: fillable off-screen pixel buffers plus their provider.
//! - **Glyph**: T-rotation and cross geometry as 2-3 rectangles per figure.
//!
//! # How it fits in the system
//! `easel-runtime` applies queued operations against a `Surface` and runs the
//! refresh pass through this crate's primitives. Everything here is pure and
//! single-threaded; thread confinement is the runtime's job.

pub mod color;
pub mod glyph;
pub mod rect;
pub mod surface;

pub use color::Rgba;
pub use glyph::Glyph;
pub use rect::{Point, Rect};
pub use surface::{PixelSurface, PixelSurfaceProvider, Surface, SurfaceError, SurfaceProvider};
