use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::Transformation;
use crate::{FlangeError, Result, Tolerance};

/// Inputs this close to orthonormal are stored untouched, so serialized frames
/// read back bit-for-bit.
const ORTHONORMAL_EPSILON: f64 = 1e-12;

/// Axes shorter than this are treated as zero.
const AXIS_EPSILON: f64 = 1e-12;

/// An oriented coordinate system: an origin and two orthonormal axes.
///
/// The z-axis is implied as `xaxis × yaxis`. Construction normalizes the
/// x-axis and makes the y-axis orthogonal to it, so a frame is always a valid
/// right-handed basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameData", into = "FrameData")]
pub struct Frame {
    point: DVec3,
    xaxis: DVec3,
    yaxis: DVec3,
}

/// Serialized form of a [`Frame`].
///
/// `{"point": [x, y, z], "xaxis": [x, y, z], "yaxis": [x, y, z]}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    /// Origin of the frame.
    pub point: [f64; 3],
    /// X-axis direction.
    pub xaxis: [f64; 3],
    /// Y-axis direction.
    pub yaxis: [f64; 3],
}

impl Frame {
    /// The world XY frame: origin at zero, unit X and Y axes.
    pub const WORLD_XY: Frame = Frame {
        point: DVec3::ZERO,
        xaxis: DVec3::X,
        yaxis: DVec3::Y,
    };

    /// Create a frame from an origin and two axis directions.
    ///
    /// The x-axis is normalized and the y-axis is projected onto the plane
    /// orthogonal to it before normalizing. Fails on non-finite input, a
    /// zero-length axis, or parallel axes.
    pub fn new(
        point: impl Into<DVec3>,
        xaxis: impl Into<DVec3>,
        yaxis: impl Into<DVec3>,
    ) -> Result<Self> {
        let point = point.into();
        let xaxis = xaxis.into();
        let yaxis = yaxis.into();

        if !(point.is_finite() && xaxis.is_finite() && yaxis.is_finite()) {
            return Err(FlangeError::DegenerateFrame {
                reason: "non-finite component",
            });
        }

        let xlen = xaxis.length();
        let ylen = yaxis.length();
        if xlen <= AXIS_EPSILON {
            return Err(FlangeError::DegenerateFrame {
                reason: "zero-length xaxis",
            });
        }
        if ylen <= AXIS_EPSILON {
            return Err(FlangeError::DegenerateFrame {
                reason: "zero-length yaxis",
            });
        }

        if (xlen - 1.0).abs() <= ORTHONORMAL_EPSILON
            && (ylen - 1.0).abs() <= ORTHONORMAL_EPSILON
            && xaxis.dot(yaxis).abs() <= ORTHONORMAL_EPSILON
        {
            return Ok(Self { point, xaxis, yaxis });
        }

        let xaxis = xaxis / xlen;
        let orthogonal = yaxis - xaxis * yaxis.dot(xaxis);
        let olen = orthogonal.length();
        if olen <= AXIS_EPSILON * ylen.max(1.0) {
            return Err(FlangeError::DegenerateFrame {
                reason: "xaxis and yaxis are parallel",
            });
        }

        Ok(Self {
            point,
            xaxis,
            yaxis: orthogonal / olen,
        })
    }

    /// The world XY frame.
    pub fn worldxy() -> Self {
        Self::WORLD_XY
    }

    /// Extract the frame described by a rigid transformation.
    ///
    /// The columns of the rotation block are normalized, so any uniform scale
    /// carried by the transformation is dropped.
    pub fn from_transformation(transformation: &Transformation) -> Self {
        let matrix = transformation.matrix();
        let xaxis = matrix.x_axis.truncate().normalize_or_zero();
        let yaxis = matrix.y_axis.truncate();
        let yaxis = (yaxis - xaxis * yaxis.dot(xaxis)).normalize_or_zero();

        Self {
            point: matrix.w_axis.truncate(),
            xaxis,
            yaxis,
        }
    }

    /// Origin of the frame.
    pub fn point(&self) -> DVec3 {
        self.point
    }

    /// Unit x-axis.
    pub fn xaxis(&self) -> DVec3 {
        self.xaxis
    }

    /// Unit y-axis.
    pub fn yaxis(&self) -> DVec3 {
        self.yaxis
    }

    /// Unit z-axis, `xaxis × yaxis`.
    pub fn zaxis(&self) -> DVec3 {
        self.xaxis.cross(self.yaxis)
    }

    /// The same orientation moved to a new origin.
    pub fn with_point(mut self, point: impl Into<DVec3>) -> Self {
        self.point = point.into();
        self
    }

    /// Apply a rigid transformation to this frame.
    pub fn transformed(&self, transformation: &Transformation) -> Self {
        Self::from_transformation(&(*transformation * Transformation::from_frame(self)))
    }

    /// Returns true if origin and axes all agree within `tolerance`.
    pub fn is_close(&self, other: &Frame, tolerance: &Tolerance) -> bool {
        tolerance.is_close3(self.point.to_array(), other.point.to_array())
            && tolerance.is_close3(self.xaxis.to_array(), other.xaxis.to_array())
            && tolerance.is_close3(self.yaxis.to_array(), other.yaxis.to_array())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::WORLD_XY
    }
}

impl From<Frame> for FrameData {
    fn from(frame: Frame) -> Self {
        Self {
            point: frame.point.to_array(),
            xaxis: frame.xaxis.to_array(),
            yaxis: frame.yaxis.to_array(),
        }
    }
}

impl TryFrom<FrameData> for Frame {
    type Error = FlangeError;

    fn try_from(data: FrameData) -> Result<Self> {
        Frame::new(data.point, data.xaxis, data.yaxis)
    }
}
