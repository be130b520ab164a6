#![deny(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/*!
Robot kinematic trees and the tools mounted on their flange.

A [`ToolModel`] describes a physical end effector: the geometry it carries
and the frame of its working point (the tool-center frame, tcf) relative to
the robot's mounting flange (`tool0`). Its two conversion methods move batches
of frames between the tcf and the flange frame (t0cf), which is what a motion
planner needs when targets are taught at the tool tip but the robot is driven
by its flange.

## Example

```rust
use flange::{Data, Frame, KinematicTree, Mesh, ToolModel};

let frame = Frame::new([0.14, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0])?;
let tool = ToolModel::builder(Mesh::cuboid(0.04, 0.04, 0.14), frame)
    .name("cone")
    .link_name("tool0")
    .build();

// Persist and restore the tool definition.
let json = tool.to_json()?;
let restored = ToolModel::from_json(&json)?;
assert_eq!(restored.name(), "cone");
assert_eq!(restored.link_name(), Some("tool0"));

// Targets taught at the tool tip, converted for the flange and back.
let targets = [Frame::new([0.5, 0.0, 0.3], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0])?];
let flange_targets = tool.from_tcf_to_t0cf(&targets);
let back = tool.from_t0cf_to_tcf(&flange_targets);
assert!(back[0].is_close(&targets[0], &Default::default()));
# Ok::<(), flange::FlangeError>(())
```

Robot models built link by link give forward kinematics; pairing them with a
tool yields tool-tip frames:

```rust
use flange::{Configuration, Frame, Joint, JointType, Link, RobotModel};

let mut robot = RobotModel::new("arm");
robot.add_link(Link::new("base"))?;
robot.add_link(Link::new("flange"))?;
robot.add_joint(
    Joint::new("j1", JointType::Revolute, "base", "flange")
        .with_origin(Frame::worldxy().with_point([0.0, 0.0, 0.5]))
        .with_axis([0.0, 0.0, 1.0]),
)?;

let flange = robot.forward_kinematics(&Configuration::from_pairs([("j1", 0.0)]), None)?;
assert_eq!(flange.point().z, 0.5);
# Ok::<(), flange::FlangeError>(())
```
*/

pub mod model;
pub use model::*;

pub use flange_common::codec;
pub use flange_common::geometry;
pub use flange_common::{
    Data, Dtype, FlangeError, Frame, FrameData, Mesh, Result, Tolerance, Transformation,
};
