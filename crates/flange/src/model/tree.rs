//! Read access shared by robot and tool models.

use flange_common::Transformation;

use super::{Joint, Link};

/// Read access to a tree of named links connected by joints.
///
/// Implemented by [`RobotModel`](super::RobotModel) and by every type that
/// owns one and forwards to it, such as [`ToolModel`](super::ToolModel).
pub trait KinematicTree {
    /// Name of the tree.
    fn name(&self) -> &str;

    /// All links, in insertion order.
    fn links(&self) -> &[Link];

    /// All joints, in insertion order.
    fn joints(&self) -> &[Joint];

    /// Name of the root link: the first link that is no joint's child.
    fn root_name(&self) -> Option<&str>;

    /// World placement of a link as computed by the last `create` call.
    fn link_placement(&self, link_name: &str) -> Option<Transformation>;

    /// The root link.
    fn root(&self) -> Option<&Link> {
        self.root_name().and_then(|name| self.get_link_by_name(name))
    }

    /// Link with the given name.
    fn get_link_by_name(&self, name: &str) -> Option<&Link> {
        self.links().iter().find(|link| link.name == name)
    }

    /// Joint with the given name.
    fn get_joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.joints().iter().find(|joint| joint.name == name)
    }

    /// Link names in insertion order.
    fn get_link_names(&self) -> Vec<&str> {
        self.links().iter().map(|link| link.name.as_str()).collect()
    }

    /// Joint names in insertion order.
    fn get_joint_names(&self) -> Vec<&str> {
        self.joints().iter().map(|joint| joint.name.as_str()).collect()
    }

    /// Joints driven by a single value, in insertion order.
    fn get_configurable_joints(&self) -> Vec<&Joint> {
        self.joints()
            .iter()
            .filter(|joint| joint.is_configurable())
            .collect()
    }
}
