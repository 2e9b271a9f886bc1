//! shadekit is the per-pixel color stage of a CPU 2D rasterizer.
//!
//! A [`Shader`] defines colors in its own local space. Drawing code binds it to the current
//! device [`Matrix`], which yields a [`ShaderContext`] holding the device-to-local inverse, and
//! then asks that context for one span of colors per covered scanline.
//!
//! # Evaluation model
//!
//! 1. **Bind**: `ctm * shader.local_matrix()` is inverted once per draw. A singular product
//!    yields `None` and the draw is skipped.
//! 2. **Shade**: pixel `(x + i, y)` is evaluated at `inverse * (x + 0.5, y + 0.5) + i * step`,
//!    where `step` is the inverse's x column. There is no per-pixel matrix multiply.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable shaders**: binding state lives in the returned context, never in the shader,
//!   so one `Arc<dyn Shader>` can serve concurrent draws.
//! - **Owned inputs**: image-backed shaders copy their bitmap and matrix at construction.
//! - **Premultiplied RGBA8** end-to-end.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bitmap;
mod foundation;
mod raster;
mod shader;
mod transform;

pub use bitmap::{BYTES_PER_PIXEL, Bitmap, decode_bitmap};
pub use foundation::core::{Affine, Point, Rgba8Premul, Vec2};
pub use foundation::error::{ShadeError, ShadeResult};
pub use raster::composite::over;
pub use raster::span::{PixelRect, Surface, fill_rect};
pub use shader::bitmap::{BitmapShader, create_bitmap_shader, create_bitmap_shader_with};
pub use shader::checker::CheckerShader;
pub use shader::sampler::{FilterMode, SamplerOpts, TileMode};
pub use shader::{AsDynShader, Shader, ShaderContext};
pub use transform::matrix::{Matrix, SINGULAR_EPSILON};
