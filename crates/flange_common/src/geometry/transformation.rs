use std::ops::Mul;

use bevy::math::{DMat4, DVec3};

use super::Frame;

/// A 4x4 affine transformation in homogeneous coordinates.
///
/// Composition follows matrix multiplication: `(a * b).transform_point(p)`
/// applies `b` first, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    matrix: DMat4,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    /// The identity transformation.
    pub const IDENTITY: Transformation = Transformation {
        matrix: DMat4::IDENTITY,
    };

    /// The identity transformation.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Wrap a raw matrix.
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// The transformation that maps the world XY frame onto `frame`.
    ///
    /// Its columns are the frame's axes and origin.
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            matrix: DMat4::from_cols(
                frame.xaxis().extend(0.0),
                frame.yaxis().extend(0.0),
                frame.zaxis().extend(0.0),
                frame.point().extend(1.0),
            ),
        }
    }

    /// The transformation that maps frame `from` onto frame `to`.
    pub fn from_frame_to_frame(from: &Frame, to: &Frame) -> Self {
        Self::from_frame(to) * Self::from_frame(from).inverse()
    }

    /// A pure translation.
    pub fn from_translation(translation: impl Into<DVec3>) -> Self {
        Self {
            matrix: DMat4::from_translation(translation.into()),
        }
    }

    /// A rotation of `angle` radians about `axis` through the origin.
    ///
    /// A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: impl Into<DVec3>, angle: f64) -> Self {
        let axis = axis.into().normalize_or_zero();
        if axis == DVec3::ZERO {
            return Self::IDENTITY;
        }
        Self {
            matrix: DMat4::from_axis_angle(axis, angle),
        }
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Translation part of the transformation.
    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }

    /// The inverse transformation.
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.inverse(),
        }
    }

    /// Apply to a point (translation included).
    pub fn transform_point(&self, point: impl Into<DVec3>) -> DVec3 {
        self.matrix.transform_point3(point.into())
    }

    /// Apply to a direction (translation ignored).
    pub fn transform_vector(&self, vector: impl Into<DVec3>) -> DVec3 {
        self.matrix.transform_vector3(vector.into())
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    fn mul(self, rhs: Transformation) -> Transformation {
        Transformation {
            matrix: self.matrix * rhs.matrix,
        }
    }
}
