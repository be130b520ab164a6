//! Kinematic trees and the tools mounted on them.

pub mod configuration;
pub mod joint;
pub mod link;
pub mod robot;
pub mod tool;
pub mod tree;

pub use configuration::{Configuration, ConfigurationData};
pub use joint::{Joint, JointType, Limit};
pub use link::{Link, LinkGeometry};
pub use robot::{RobotModel, RobotModelData};
pub use tool::{DEFAULT_TOOL_NAME, TOOL_LINK_NAME, ToolModel, ToolModelBuilder, ToolModelData};
pub use tree::KinematicTree;
