//! Image-backed shader and the factory that builds it.

use std::sync::Arc;

use crate::bitmap::Bitmap;
use crate::foundation::core::{Point, Rgba8Premul, Vec2};
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::foundation::math::unit_to_u8;
use crate::shader::Shader;
use crate::shader::sampler::{FilterMode, SamplerOpts};
use crate::transform::matrix::Matrix;

/// Shader that samples a private, tightly packed copy of a bitmap.
///
/// Local space maps pixel `(i, j)` of the image to the unit square `[i, i+1) x [j, j+1)`.
#[derive(Debug)]
pub struct BitmapShader {
    width: u32,
    height: u32,
    pixels: Box<[Rgba8Premul]>,
    opaque: bool,
    local: Matrix,
    opts: SamplerOpts,
}

/// Build a shared [`BitmapShader`] with default sampling (clamp, nearest).
///
/// The bitmap and matrix are copied; the caller may mutate or drop both as soon as this returns.
pub fn create_bitmap_shader(bitmap: &Bitmap, local: &Matrix) -> ShadeResult<Arc<BitmapShader>> {
    create_bitmap_shader_with(bitmap, local, SamplerOpts::default())
}

/// Build a shared [`BitmapShader`] with explicit sampling options.
#[tracing::instrument(
    level = "debug",
    skip(bitmap, local),
    fields(width = bitmap.width, height = bitmap.height, row_bytes = bitmap.row_bytes)
)]
pub fn create_bitmap_shader_with(
    bitmap: &Bitmap,
    local: &Matrix,
    opts: SamplerOpts,
) -> ShadeResult<Arc<BitmapShader>> {
    bitmap
        .validate()
        .inspect_err(|err| tracing::debug!(%err, "rejected bitmap shader input"))?;
    if !local.is_finite() {
        tracing::debug!(?local, "rejected bitmap shader input");
        return Err(ShadeError::validation(
            "bitmap shader local matrix must be finite",
        ));
    }

    let w = bitmap.width as usize;
    let pixels: Box<[Rgba8Premul]> = bitmap
        .pixels
        .chunks(bitmap.row_pixels())
        .take(bitmap.height as usize)
        .flat_map(|row| row[..w].iter().copied())
        .collect();

    Ok(Arc::new(BitmapShader {
        width: bitmap.width,
        height: bitmap.height,
        pixels,
        opaque: bitmap.opaque,
        local: *local,
        opts,
    }))
}

impl BitmapShader {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sampling options chosen at construction.
    pub fn sampler(&self) -> SamplerOpts {
        self.opts
    }

    fn fetch(&self, ix: i64, iy: i64) -> Rgba8Premul {
        let x = self.opts.tile.resolve(ix, i64::from(self.width));
        let y = self.opts.tile.resolve(iy, i64::from(self.height));
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn sample_nearest(&self, p: Point) -> Rgba8Premul {
        self.fetch(p.x.floor() as i64, p.y.floor() as i64)
    }

    fn sample_bilinear(&self, p: Point) -> Rgba8Premul {
        // Pixel centres sit at half-integers.
        let fx = p.x - 0.5;
        let fy = p.y - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        // Float-to-int casts saturate far from the image; the neighbour index must too.
        let (x0, y0) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));

        let taps = [
            (self.fetch(x0, y0), (1.0 - tx) * (1.0 - ty)),
            (self.fetch(x1, y0), tx * (1.0 - ty)),
            (self.fetch(x0, y1), (1.0 - tx) * ty),
            (self.fetch(x1, y1), tx * ty),
        ];

        let mut acc = [0.0f32; 4];
        for (px, w) in taps {
            for (a, c) in acc.iter_mut().zip(px.to_array()) {
                *a += f32::from(c) * w;
            }
        }
        Rgba8Premul::from_array(acc.map(unit_to_u8))
    }
}

impl Shader for BitmapShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn local_matrix(&self) -> Matrix {
        self.local
    }

    fn shade_local(&self, start: Point, step: Vec2, row: &mut [Rgba8Premul]) {
        match self.opts.filter {
            FilterMode::Nearest => {
                for (i, px) in row.iter_mut().enumerate() {
                    *px = self.sample_nearest(start + step * i as f64);
                }
            }
            FilterMode::Bilinear => {
                for (i, px) in row.iter_mut().enumerate() {
                    *px = self.sample_bilinear(start + step * i as f64);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/bitmap.rs"]
mod tests;
