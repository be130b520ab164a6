//! Joints and their motion.

use std::collections::BTreeMap;

use flange_common::geometry::DVec3;
use flange_common::{Frame, Transformation};
use serde::{Deserialize, Serialize};

/// Kind of motion a joint allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Rotation about the axis, bounded by limits.
    Revolute,
    /// Unbounded rotation about the axis.
    Continuous,
    /// Translation along the axis.
    Prismatic,
    /// No motion.
    Fixed,
    /// Six degrees of freedom; not driven by a single value.
    Floating,
    /// Motion in the plane normal to the axis; not driven by a single value.
    Planar,
}

impl JointType {
    /// Whether a single joint value drives this joint.
    pub fn is_configurable(&self) -> bool {
        matches!(
            self,
            JointType::Revolute | JointType::Continuous | JointType::Prismatic
        )
    }
}

/// Joint value limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    /// Lowest allowed value (rad or m).
    pub lower: f64,
    /// Highest allowed value (rad or m).
    pub upper: f64,
    /// Maximum effort; zero if unknown.
    #[serde(default)]
    pub effort: f64,
    /// Maximum velocity; zero if unknown.
    #[serde(default)]
    pub velocity: f64,
}

impl Limit {
    /// Position limits without effort or velocity bounds.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            effort: 0.0,
            velocity: 0.0,
        }
    }

    /// Returns true if `value` lies within `[lower, upper]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

fn default_axis() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

/// Connection between a parent and a child link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Unique name within the tree.
    pub name: String,

    /// Kind of motion.
    #[serde(rename = "type")]
    pub joint_type: JointType,

    /// Name of the parent link.
    pub parent: String,

    /// Name of the child link.
    pub child: String,

    /// Placement of the joint frame in the parent link frame.
    #[serde(default)]
    pub origin: Frame,

    /// Motion axis in the joint frame.
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],

    /// Value limits, if bounded.
    #[serde(default)]
    pub limit: Option<Limit>,

    /// Free-form string attributes.
    #[serde(default)]
    pub attr: BTreeMap<String, String>,
}

impl Joint {
    /// A joint at the parent origin with motion along/about the x-axis.
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            parent: parent.into(),
            child: child.into(),
            origin: Frame::worldxy(),
            axis: default_axis(),
            limit: None,
            attr: BTreeMap::new(),
        }
    }

    /// Place the joint frame in the parent link frame.
    pub fn with_origin(mut self, origin: Frame) -> Self {
        self.origin = origin;
        self
    }

    /// Set the motion axis.
    pub fn with_axis(mut self, axis: [f64; 3]) -> Self {
        self.axis = axis;
        self
    }

    /// Bound the joint value.
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single joint value drives this joint.
    pub fn is_configurable(&self) -> bool {
        self.joint_type.is_configurable()
    }

    /// Placement of the child link frame in the parent link frame at `value`.
    ///
    /// Non-configurable joints ignore `value`.
    pub fn transformation(&self, value: f64) -> Transformation {
        let axis = DVec3::from_array(self.axis);
        let motion = match self.joint_type {
            JointType::Revolute | JointType::Continuous => {
                Transformation::from_axis_angle(axis, value)
            }
            JointType::Prismatic => {
                Transformation::from_translation(axis.normalize_or_zero() * value)
            }
            JointType::Fixed | JointType::Floating | JointType::Planar => {
                Transformation::identity()
            }
        };
        Transformation::from_frame(&self.origin) * motion
    }
}
