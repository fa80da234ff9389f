#![forbid(unsafe_code)]

//! RGBA color values.

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const GREEN: Rgba = Rgba::rgb(0x00, 0xff, 0x00);
    pub const YELLOW: Rgba = Rgba::rgb(0xff, 0xff, 0x00);

    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Rgba::rgb(1, 2, 3).a, 0xff);
    }

    #[test]
    fn named_colors() {
        assert_eq!(Rgba::GREEN, Rgba::rgba(0, 255, 0, 255));
        assert_eq!(Rgba::YELLOW.b, 0);
    }
}
