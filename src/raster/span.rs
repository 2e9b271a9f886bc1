//! Minimal span driver: fills an integer rectangle of a surface through a bound shader.

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::raster::composite::{copy_row, over_row};
use crate::shader::Shader;
use crate::transform::matrix::Matrix;

/// Tightly packed premultiplied RGBA8 destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub data: Vec<u8>,
}

impl Surface {
    /// Transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8Premul::transparent())
    }

    /// Surface cleared to `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8Premul) -> Self {
        Self {
            width,
            height,
            data: px.to_array().repeat(width as usize * height as usize),
        }
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let d = self.data.get(i..i + 4)?;
        Some(Rgba8Premul::from_array([d[0], d[1], d[2], d[3]]))
    }

    fn expected_len(&self) -> ShadeResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ShadeError::evaluation("surface size overflow"))
    }
}

/// Device-space rectangle in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Rectangle from origin and size.
    pub const fn xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open intersection with `0..w` x `0..h` as `(x0, y0, x1, y1)`, or `None` if empty.
    fn clip(self, w: u32, h: u32) -> Option<(i64, i64, i64, i64)> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(w));
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(h));
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

/// Fill `rect` on `surface` with `shader` under device matrix `ctm`.
///
/// Binds once and shades one span per covered scanline. Opaque shaders drawn at full opacity
/// overwrite the destination; everything else is blended source-over. Returns `Ok(false)` when
/// the combined matrix is singular and nothing was drawn.
pub fn fill_rect(
    surface: &mut Surface,
    rect: PixelRect,
    shader: &dyn Shader,
    ctm: &Matrix,
    opacity: f32,
) -> ShadeResult<bool> {
    if surface.data.len() != surface.expected_len()? {
        return Err(ShadeError::evaluation(
            "fill_rect expects surface data matching width*height*4",
        ));
    }

    let Some(ctx) = shader.bind(ctm) else {
        return Ok(false);
    };
    let Some((x0, y0, x1, y1)) = rect.clip(surface.width, surface.height) else {
        return Ok(true);
    };

    let replace = ctx.is_opaque() && opacity >= 1.0;
    tracing::trace!(x0, y0, x1, y1, replace, "fill_rect");

    let stride = surface.width as usize * 4;
    let mut row = vec![Rgba8Premul::transparent(); (x1 - x0) as usize];
    for y in y0..y1 {
        ctx.shade_row(x0 as i32, y as i32, &mut row);
        let start = y as usize * stride + x0 as usize * 4;
        let dst = &mut surface.data[start..start + row.len() * 4];
        if replace {
            copy_row(dst, &row);
        } else {
            over_row(dst, &row, opacity);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/span.rs"]
mod tests;
