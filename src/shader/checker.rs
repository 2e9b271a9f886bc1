//! Procedural checkerboard shader.

use crate::foundation::core::{Point, Rgba8Premul, Vec2};
use crate::shader::Shader;
use crate::transform::matrix::Matrix;

/// Two-color checkerboard with square cells of a given local size.
///
/// Cell `(floor(x), floor(y))` of the scaled pattern space takes `colors[0]` when the sum of its
/// indices is even and `colors[1]` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckerShader {
    local: Matrix,
    colors: [Rgba8Premul; 2],
}

impl CheckerShader {
    /// Checkerboard with `cell`-sized squares. A zero cell size never binds.
    pub fn new(cell: f64, even: Rgba8Premul, odd: Rgba8Premul) -> Self {
        Self {
            local: Matrix::scale(cell, cell),
            colors: [even, odd],
        }
    }

    /// Color at a point in pattern space (after the cell scale has been undone).
    pub fn color_at(&self, p: Point) -> Rgba8Premul {
        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        self.colors[(i.wrapping_add(j) & 1) as usize]
    }
}

impl Shader for CheckerShader {
    fn is_opaque(&self) -> bool {
        self.colors.iter().all(|c| c.is_opaque())
    }

    fn local_matrix(&self) -> Matrix {
        self.local
    }

    fn shade_local(&self, start: Point, step: Vec2, row: &mut [Rgba8Premul]) {
        for (i, px) in row.iter_mut().enumerate() {
            *px = self.color_at(start + step * i as f64);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/checker.rs"]
mod tests;
