//! The shader contract: immutable color sources evaluated in their own local space.
//!
//! Drawing code binds a shader to the current device matrix once per draw and then asks the
//! returned [`ShaderContext`] for one span of colors per scanline. The shader itself never
//! changes after construction; everything a binding produces lives in the context value, so a
//! single `Arc<dyn Shader>` can back any number of concurrent draws.

use std::fmt;

use crate::foundation::core::{Point, Rgba8Premul, Vec2};
use crate::transform::matrix::Matrix;

pub(crate) mod bitmap;
pub(crate) mod checker;
pub(crate) mod sampler;

/// Upcast helper so provided methods on [`Shader`] work for both concrete and `dyn` shaders.
pub trait AsDynShader {
    /// `self` as a trait object.
    fn as_dyn_shader(&self) -> &dyn Shader;
}

impl<T: Shader> AsDynShader for T {
    fn as_dyn_shader(&self) -> &dyn Shader {
        self
    }
}

/// A color source defined in local space.
pub trait Shader: AsDynShader + fmt::Debug + Send + Sync {
    /// True when every color this shader can emit has alpha 0xFF.
    fn is_opaque(&self) -> bool;

    /// Local-to-pattern transform fixed at construction.
    fn local_matrix(&self) -> Matrix;

    /// Fill `row` with colors for local points `start + step * i`.
    ///
    /// `start` is the local coordinate of the first pixel centre; `step` is the local advance
    /// for one device pixel along x.
    fn shade_local(&self, start: Point, step: Vec2, row: &mut [Rgba8Premul]);

    /// Bind to a device matrix. `None` means the combined matrix is singular and nothing
    /// should be drawn.
    fn bind(&self, ctm: &Matrix) -> Option<ShaderContext<'_>> {
        ShaderContext::new(self.as_dyn_shader(), ctm)
    }
}

/// A shader bound to one device matrix.
///
/// Holds the device-to-local inverse for as long as the caller keeps it. Binding again produces
/// a new, independent context.
#[derive(Clone, Copy, Debug)]
pub struct ShaderContext<'a> {
    shader: &'a dyn Shader,
    inverse: Matrix,
    step: Vec2,
}

impl<'a> ShaderContext<'a> {
    /// Compose `ctm * shader.local_matrix()` and invert it.
    pub fn new(shader: &'a dyn Shader, ctm: &Matrix) -> Option<Self> {
        let total = ctm.compose(shader.local_matrix());
        let Some(inverse) = total.invert() else {
            tracing::debug!(det = total.determinant(), "shader bind skipped: singular matrix");
            return None;
        };
        Some(Self {
            shader,
            inverse,
            step: inverse.x_step(),
        })
    }

    /// The shader this context evaluates.
    pub fn shader(&self) -> &'a dyn Shader {
        self.shader
    }

    /// Device-to-local matrix captured at bind time.
    pub fn inverse(&self) -> Matrix {
        self.inverse
    }

    /// Same as the bound shader's [`Shader::is_opaque`].
    pub fn is_opaque(&self) -> bool {
        self.shader.is_opaque()
    }

    /// Local coordinate of the centre of device pixel `(x, y)`.
    pub fn local_point(&self, x: i32, y: i32) -> Point {
        self.inverse
            .apply(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5))
    }

    /// Fill `row` with the colors of the device pixels `(x..x + row.len(), y)`.
    pub fn shade_row(&self, x: i32, y: i32, row: &mut [Rgba8Premul]) {
        if row.is_empty() {
            return;
        }
        self.shader.shade_local(self.local_point(x, y), self.step, row);
    }

    /// Allocating form of [`ShaderContext::shade_row`].
    pub fn produce_span(&self, x: i32, y: i32, count: usize) -> Vec<Rgba8Premul> {
        let mut row = vec![Rgba8Premul::transparent(); count];
        self.shade_row(x, y, &mut row);
        row
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/context.rs"]
mod tests;
