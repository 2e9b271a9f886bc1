//! Sampling policy for image-backed shaders.

/// How local coordinates outside the image are folded back into it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    /// Extend the edge pixels.
    #[default]
    Clamp,
    /// Wrap around, repeating the image.
    Repeat,
    /// Repeat with every other tile flipped.
    Mirror,
}

impl TileMode {
    /// Fold pixel index `i` into `0..n`. Callers pass the validated, non-zero image extent.
    pub(crate) fn resolve(self, i: i64, n: i64) -> i64 {
        match self {
            TileMode::Clamp => i.clamp(0, n - 1),
            TileMode::Repeat => i.rem_euclid(n),
            TileMode::Mirror => {
                let m = i.rem_euclid(2 * n);
                if m < n { m } else { 2 * n - 1 - m }
            }
        }
    }
}

/// Reconstruction filter.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Pixel whose cell contains the sample point.
    #[default]
    Nearest,
    /// Weighted blend of the four pixel centres around the sample point.
    Bilinear,
}

/// Options for [`crate::create_bitmap_shader_with`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(default)]
pub struct SamplerOpts {
    /// Out-of-range policy (default: clamp).
    pub tile: TileMode,
    /// Filter (default: nearest).
    pub filter: FilterMode,
}

impl SamplerOpts {
    /// Return options with the given tile mode.
    pub fn with_tile(mut self, tile: TileMode) -> Self {
        self.tile = tile;
        self
    }

    /// Return options with the given filter.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/sampler.rs"]
mod tests;
