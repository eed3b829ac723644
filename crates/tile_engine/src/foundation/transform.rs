//! 2D affine transforms
//!
//! Transforms are stored as homogeneous 3x3 matrices acting on column vectors.
//! Every builder method *appends* an operation: `t.translate(..)` means "do
//! `t`, then translate". This is the order in which draw calls compose camera,
//! parallax and per-component offsets.

use nalgebra::{Matrix3, Point2 as FPoint2, Vector2};
use serde::{Deserialize, Serialize};

/// An affine transform in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: Matrix3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// A pure translation
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut t = Self::identity();
        t.translate(dx, dy);
        t
    }

    /// A pure scale about the origin
    pub fn scaling(sx: f64, sy: f64) -> Self {
        let mut t = Self::identity();
        t.scale(sx, sy);
        t
    }

    /// Append a translation
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.matrix = Matrix3::new_translation(&Vector2::new(dx, dy)) * self.matrix;
        self
    }

    /// Append a scale about the origin
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.matrix = Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)) * self.matrix;
        self
    }

    /// Append another transform (`other` applies after `self`)
    pub fn concat(&mut self, other: &Self) -> &mut Self {
        self.matrix = other.matrix * self.matrix;
        self
    }

    /// Consuming form of [`Transform::concat`]
    #[must_use]
    pub fn then(mut self, other: &Self) -> Self {
        self.concat(other);
        self
    }

    /// Apply the transform to a point
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.matrix.transform_point(&FPoint2::new(x, y));
        (p.x, p.y)
    }

    /// The underlying homogeneous matrix
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}
