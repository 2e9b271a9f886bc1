//! 2D affine matrix used to map between device and shader-local space.
//!
//! [`Matrix`] is an immutable value type over [`kurbo::Affine`]. Composition follows the usual
//! right-to-left convention: `a.compose(b)` (or `a * b`) applies `b` first, then `a`.

use std::ops::Mul;

use crate::foundation::core::{Affine, Point, Vec2};

/// Linear parts whose determinant magnitude is at or below this value are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Affine transform `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Matrix(Affine);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The neutral transform.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// The neutral transform.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Translation by `(dx, dy)`.
    pub fn translate(dx: f64, dy: f64) -> Self {
        Self(Affine::translate(Vec2::new(dx, dy)))
    }

    /// Axis-aligned scale. Zero factors yield a non-invertible matrix.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(Affine::scale_non_uniform(sx, sy))
    }

    /// Rotation by `radians` (positive turns +x towards +y).
    pub fn rotate(radians: f64) -> Self {
        Self(Affine::rotate(radians))
    }

    /// Build from `[a, b, c, d, e, f]`.
    pub const fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self(Affine::new(coeffs))
    }

    /// Coefficients as `[a, b, c, d, e, f]`.
    pub fn coeffs(self) -> [f64; 6] {
        self.0.as_coeffs()
    }

    /// Underlying kurbo transform.
    pub const fn to_affine(self) -> Affine {
        self.0
    }

    /// Transform equivalent to applying `other` first, then `self`.
    pub fn compose(self, other: Matrix) -> Matrix {
        Self(self.0 * other.0)
    }

    /// `self * translate(dx, dy)`, the way a canvas stack accumulates a translate call.
    pub fn pre_translate(self, dx: f64, dy: f64) -> Matrix {
        self.compose(Self::translate(dx, dy))
    }

    /// `self * scale(sx, sy)`.
    pub fn pre_scale(self, sx: f64, sy: f64) -> Matrix {
        self.compose(Self::scale(sx, sy))
    }

    /// `self * rotate(radians)`.
    pub fn pre_rotate(self, radians: f64) -> Matrix {
        self.compose(Self::rotate(radians))
    }

    /// Map a point through the transform.
    pub fn apply(self, p: Point) -> Point {
        self.0 * p
    }

    /// Map a slice of points.
    pub fn map_points(self, pts: &[Point]) -> Vec<Point> {
        pts.iter().map(|&p| self.apply(p)).collect()
    }

    /// Determinant of the linear part.
    pub fn determinant(self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs();
        a * d - b * c
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(self) -> bool {
        self.coeffs().iter().all(|v| v.is_finite())
    }

    /// Inverse transform, or `None` when the linear part is singular.
    pub fn invert(self) -> Option<Matrix> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON {
            return None;
        }
        let inv = Self(self.0.inverse());
        inv.is_finite().then_some(inv)
    }

    /// Change in mapped coordinates when the input x advances by one unit.
    pub fn x_step(self) -> Vec2 {
        let [a, b, _, _, _, _] = self.coeffs();
        Vec2::new(a, b)
    }

    /// Coefficient-wise comparison within `eps`.
    pub fn approx_eq(self, other: Matrix, eps: f64) -> bool {
        self.coeffs()
            .iter()
            .zip(other.coeffs().iter())
            .all(|(x, y)| (x - y).abs() <= eps)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.compose(rhs)
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply(rhs)
    }
}

impl From<Affine> for Matrix {
    fn from(value: Affine) -> Self {
        Self(value)
    }
}

impl From<Matrix> for Affine {
    fn from(value: Matrix) -> Self {
        value.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
