#![forbid(unsafe_code)]

//! Off-screen pixel surfaces and their provider.
//!
//! The execution loop owns exactly one [`Surface`] for its whole run and is
//! the only thread that touches it. Fills are clipped to the surface bounds,
//! so callers may pass rectangles that extend off-surface.

use std::error::Error;
use std::fmt;

use crate::color::Rgba;
use crate::rect::Rect;

/// A fillable off-screen pixel buffer.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Fills `rect` (clipped to the surface bounds) with `color`.
    fn fill(&mut self, rect: Rect, color: Rgba);

    /// Releases the surface's backing storage. Called exactly once, by the
    /// owning loop thread, on shutdown.
    fn release(&mut self);
}

/// Allocates surfaces for an execution loop at startup.
pub trait SurfaceProvider {
    type Surface: Surface + Send + 'static;

    fn allocate(&mut self, width: u32, height: u32) -> Result<Self::Surface, SurfaceError>;
}

/// Surface allocation failure. Fatal to loop startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    ZeroSized { width: u32, height: u32 },
    TooLarge { width: u32, height: u32, max: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::ZeroSized { width, height } => {
                write!(f, "cannot allocate zero-sized surface ({width}x{height})")
            }
            SurfaceError::TooLarge { width, height, max } => {
                write!(f, "surface {width}x{height} exceeds maximum dimension {max}")
            }
        }
    }
}

impl Error for SurfaceError {}

/// An RGBA8 pixel buffer in row-major order.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        PixelSurface {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Color at `(x, y)`. Out-of-bounds reads return transparent black,
    /// which keeps presentation code free of bounds bookkeeping.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::rgba(0, 0, 0, 0);
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, rect: Rect, color: Rgba) {
        let r = rect.intersect(self.bounds());
        if r.is_empty() {
            return;
        }
        let px = [color.r, color.g, color.b, color.a];
        for y in r.y1..r.y2 {
            let row = (y as usize * self.width as usize + r.x1 as usize) * 4;
            for x in 0..r.width() as usize {
                let i = row + x * 4;
                self.data[i..i + 4].copy_from_slice(&px);
            }
        }
    }

    // Dimensions are zeroed with the storage so a stray post-release fill
    // clips to an empty bounds instead of indexing a dropped buffer.
    fn release(&mut self) {
        self.width = 0;
        self.height = 0;
        self.data = Vec::new();
    }
}

/// Provider for in-memory [`PixelSurface`] buffers.
#[derive(Debug, Clone)]
pub struct PixelSurfaceProvider {
    pub max_dimension: u32,
}

impl Default for PixelSurfaceProvider {
    fn default() -> Self {
        PixelSurfaceProvider { max_dimension: 8192 }
    }
}

impl SurfaceProvider for PixelSurfaceProvider {
    type Surface = PixelSurface;

    fn allocate(&mut self, width: u32, height: u32) -> Result<PixelSurface, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSized { width, height });
        }
        if width > self.max_dimension || height > self.max_dimension {
            return Err(SurfaceError::TooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        Ok(PixelSurface::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_writes_interior() {
        let mut s = PixelSurface::new(8, 8);
        s.fill(Rect::new(2, 2, 4, 4), Rgba::GREEN);
        assert_eq!(s.pixel(2, 2), Rgba::GREEN);
        assert_eq!(s.pixel(3, 3), Rgba::GREEN);
        assert_eq!(s.pixel(4, 4), Rgba::rgba(0, 0, 0, 0));
        assert_eq!(s.pixel(1, 2), Rgba::rgba(0, 0, 0, 0));
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut s = PixelSurface::new(4, 4);
        s.fill(Rect::new(-5, -5, 100, 100), Rgba::WHITE);
        assert_eq!(s.pixel(0, 0), Rgba::WHITE);
        assert_eq!(s.pixel(3, 3), Rgba::WHITE);
    }

    #[test]
    fn fill_empty_rect_is_noop() {
        let mut s = PixelSurface::new(4, 4);
        s.fill(Rect::new(2, 0, 2, 4), Rgba::WHITE);
        assert!(s.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn out_of_bounds_pixel_is_transparent() {
        let s = PixelSurface::new(2, 2);
        assert_eq!(s.pixel(9, 0), Rgba::rgba(0, 0, 0, 0));
    }

    #[test]
    fn provider_rejects_bad_sizes() {
        let mut p = PixelSurfaceProvider { max_dimension: 64 };
        assert!(matches!(
            p.allocate(0, 10),
            Err(SurfaceError::ZeroSized { .. })
        ));
        assert!(matches!(
            p.allocate(65, 10),
            Err(SurfaceError::TooLarge { .. })
        ));
        assert!(p.allocate(64, 64).is_ok());
    }

    #[test]
    fn release_drops_storage_and_neuters_the_surface() {
        let mut s = PixelSurface::new(16, 16);
        s.release();
        assert!(s.data().is_empty());
        assert_eq!((s.width(), s.height()), (0, 0));
        // Late fills and reads degrade to no-ops.
        s.fill(Rect::new(0, 0, 8, 8), Rgba::WHITE);
        assert!(s.data().is_empty());
        assert_eq!(s.pixel(0, 0), Rgba::rgba(0, 0, 0, 0));
    }
}
