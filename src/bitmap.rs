//! Caller-owned pixel buffers and the image-decoding entry point that fills them.

use anyhow::Context;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ShadeError, ShadeResult};

/// Bytes occupied by one [`Rgba8Premul`] pixel in a row.
pub const BYTES_PER_PIXEL: usize = 4;

/// 2D grid of premultiplied pixels with an explicit row stride.
///
/// Fields are public and may hold any value; geometry is only checked by [`Bitmap::validate`],
/// which shader construction calls before taking its own copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    /// Pixels per row that carry image data.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Distance between row starts in bytes; may exceed `width * BYTES_PER_PIXEL`.
    pub row_bytes: usize,
    /// Row-major storage, `row_bytes / BYTES_PER_PIXEL` pixels per row.
    pub pixels: Vec<Rgba8Premul>,
    /// Declared by the producer: every addressed pixel has alpha 0xFF.
    pub opaque: bool,
}

impl Bitmap {
    /// Wrap existing storage. No validation happens here.
    pub fn new(
        width: u32,
        height: u32,
        row_bytes: usize,
        pixels: Vec<Rgba8Premul>,
        opaque: bool,
    ) -> Self {
        Self {
            width,
            height,
            row_bytes,
            pixels,
            opaque,
        }
    }

    /// Tightly packed bitmap whose opacity flag is derived from the pixels.
    pub fn tight(width: u32, height: u32, pixels: Vec<Rgba8Premul>) -> Self {
        let mut bm = Self::new(
            width,
            height,
            (width as usize).saturating_mul(BYTES_PER_PIXEL),
            pixels,
            false,
        );
        bm.opaque = bm.compute_is_opaque();
        bm
    }

    /// Drop the storage and zero the geometry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Row stride measured in pixels.
    pub fn row_pixels(&self) -> usize {
        self.row_bytes / BYTES_PER_PIXEL
    }

    /// Check the geometry rules shader construction relies on.
    pub fn validate(&self) -> ShadeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShadeError::validation(format!(
                "bitmap must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let min_row_bytes = (self.width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| ShadeError::validation("bitmap row size overflow"))?;
        if self.row_bytes < min_row_bytes {
            return Err(ShadeError::validation(format!(
                "bitmap row_bytes {} smaller than width * {BYTES_PER_PIXEL} = {min_row_bytes}",
                self.row_bytes
            )));
        }
        if !self.row_bytes.is_multiple_of(BYTES_PER_PIXEL) {
            return Err(ShadeError::validation(format!(
                "bitmap row_bytes {} is not a multiple of {BYTES_PER_PIXEL}",
                self.row_bytes
            )));
        }
        let needed = (self.height as usize - 1)
            .checked_mul(self.row_pixels())
            .and_then(|v| v.checked_add(self.width as usize))
            .ok_or_else(|| ShadeError::validation("bitmap size overflow"))?;
        if self.pixels.len() < needed {
            return Err(ShadeError::validation(format!(
                "bitmap storage holds {} pixels, geometry needs {needed}",
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Pixel at `(x, y)`, or `None` outside the image or storage.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        self.index_of(x, y).and_then(|i| self.pixels.get(i).copied())
    }

    /// Mutable pixel at `(x, y)`.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut Rgba8Premul> {
        self.index_of(x, y).and_then(|i| self.pixels.get_mut(i))
    }

    /// Scan the addressed pixels for full alpha. Padding is ignored.
    pub fn compute_is_opaque(&self) -> bool {
        let stride = self.row_pixels().max(1);
        let w = self.width as usize;
        self.pixels
            .chunks(stride)
            .take(self.height as usize)
            .all(|row| row.iter().take(w).all(|px| px.is_opaque()))
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.row_pixels() + x as usize)
    }
}

/// Decode an encoded image (any format `image` understands) into a tight premultiplied bitmap.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_bitmap(bytes: &[u8]) -> ShadeResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels = rgba
        .into_raw()
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|px| Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]))
        .collect();

    let bm = Bitmap::tight(width, height, pixels);
    tracing::debug!(width, height, opaque = bm.opaque, "decoded bitmap");
    Ok(bm)
}

#[cfg(test)]
#[path = "../tests/unit/bitmap/bitmap.rs"]
mod tests;
