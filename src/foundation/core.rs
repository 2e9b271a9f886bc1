use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, Point, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Pack channels that are already premultiplied, alpha first.
    pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiply straight-alpha channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// Build from a `[r, g, b, a]` premultiplied byte quad.
    pub const fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }

    /// `[r, g, b, a]` byte order used by surfaces.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether alpha is at its maximum.
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
