//! 2D transformations and transformable placement.
//!
//! This module provides the affine matrix used to place text and the
//! position/rotation/scale/origin bundle that runs and layouts carry.

use crate::types::{Point, Rect};

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  skew_x   translate_x |
/// | m01 m11 m21 | = | skew_y   scale_y  translate_y |
/// ```
///
/// # Examples
///
/// ```
/// use horizon_lattice_text::{Transform2D, Point};
///
/// // Transforms are composed right-to-left with `then`
/// // (first translate, then scale)
/// let transform = Transform2D::scale(2.0)
///     .then(&Transform2D::translate(10.0, 0.0));
///
/// let p = transform.transform_point(Point::new(5.0, 0.0));
/// assert_eq!(p, Point::new(30.0, 0.0));
///
/// let back = transform.inverse().unwrap().transform_point(p);
/// assert!((back.x - 5.0).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Matrix elements in column-major order.
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a uniform scaling transform.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Create a rotation transform (angle in radians).
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Create a horizontal shear: `x' = x + factor * y`.
    #[inline]
    pub const fn shear_x(factor: f32) -> Self {
        Self {
            m: [1.0, 0.0, factor, 1.0, 0.0, 0.0],
        }
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }

    /// Compute the inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self {
            m: [
                self.m[3] * inv_det,
                -self.m[1] * inv_det,
                -self.m[2] * inv_det,
                self.m[0] * inv_det,
                (self.m[2] * self.m[5] - self.m[3] * self.m[4]) * inv_det,
                (self.m[1] * self.m[4] - self.m[0] * self.m[5]) * inv_det,
            ],
        })
    }

    /// Get the determinant of the transform matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    /// Check if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Convert to a column-major 4x4 matrix for GPU use.
    #[inline]
    pub fn to_mat4(&self) -> glam::Mat4 {
        glam::Mat4::from_cols(
            glam::Vec4::new(self.m[0], self.m[1], 0.0, 0.0),
            glam::Vec4::new(self.m[2], self.m[3], 0.0, 0.0),
            glam::Vec4::new(0.0, 0.0, 1.0, 0.0),
            glam::Vec4::new(self.m[4], self.m[5], 0.0, 1.0),
        )
    }

    /// Transform a rectangle's bounding box.
    ///
    /// Note: This returns the axis-aligned bounding box of the transformed rectangle,
    /// which may be larger than the input if rotation or shear is involved.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.transform_point(rect.top_left()),
            self.transform_point(rect.top_right()),
            self.transform_point(rect.bottom_left()),
            self.transform_point(rect.bottom_right()),
        ];

        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = corners
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let max_y = corners
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max);

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Placement of a drawable in its parent's coordinate space.
///
/// The composed matrix is `translate(position) * rotate(rotation) * scale * translate(-origin)`:
/// the origin is the local point that lands on `position` and about which
/// rotation and scaling happen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformable {
    position: Point,
    rotation: f32,
    scale: (f32, f32),
    origin: Point,
}

impl Default for Transformable {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            rotation: 0.0,
            scale: (1.0, 1.0),
            origin: Point::ZERO,
        }
    }
}

impl Transformable {
    /// Create an identity placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Get the rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation in radians.
    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = angle;
    }

    /// Get the scale factors.
    pub fn scale(&self) -> (f32, f32) {
        self.scale
    }

    /// Set the scale factors.
    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        self.scale = (sx, sy);
    }

    /// Get the local origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Set the local origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Move by an offset.
    pub fn translate_by(&mut self, offset: Point) {
        self.position += offset;
    }

    /// The composed local-to-parent transform.
    pub fn transform(&self) -> Transform2D {
        Transform2D::translate(self.position.x, self.position.y)
            .then(&Transform2D::rotate(self.rotation))
            .then(&Transform2D::scale_xy(self.scale.0, self.scale.1))
            .then(&Transform2D::translate(-self.origin.x, -self.origin.y))
    }

    /// The parent-to-local transform, if the placement is invertible.
    pub fn inverse_transform(&self) -> Option<Transform2D> {
        self.transform().inverse()
    }
}
