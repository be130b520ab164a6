//! Tools mounted on a robot flange.

use std::collections::BTreeMap;
use std::sync::Arc;

use flange_common::{Data, Dtype, Frame, Mesh, Result, Transformation};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{Joint, KinematicTree, Link, LinkGeometry, RobotModel, RobotModelData};

/// Name given to a tool when none (or an empty one) is supplied.
pub const DEFAULT_TOOL_NAME: &str = "attached_tool";

/// Name of the single link that carries the tool geometry.
pub const TOOL_LINK_NAME: &str = "attached_tool_link";

/// A physical tool attached to a robot's flange.
///
/// The tool owns a kinematic tree (normally a single link carrying its
/// geometry) and the frame of its working point, the tool-center frame (tcf),
/// expressed in the flange frame, `tool0`.
///
/// ## Example
///
/// ```rust
/// use flange::{Frame, Mesh, ToolModel};
///
/// let frame = Frame::new([0.14, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0])?;
/// let tool = ToolModel::new(Mesh::cuboid(0.05, 0.05, 0.14), frame);
///
/// let tcf = [Frame::new([-0.309, -0.046, -0.266], [0.276, 0.926, -0.256], [0.879, -0.136, 0.456])?];
/// let t0cf = tool.from_tcf_to_t0cf(&tcf);
/// assert!((t0cf[0].point().x - -0.363).abs() < 1e-3);
/// # Ok::<(), flange::FlangeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Dtype)]
#[dtype("compas_robots/ToolModel")]
#[cfg_attr(feature = "ecs", derive(bevy::prelude::Component))]
pub struct ToolModel {
    model: RobotModel,
    frame: Frame,
    link_name: Option<String>,
}

/// Serialized form of a [`ToolModel`]: every [`RobotModelData`] field plus
/// `frame` and `link_name`.
///
/// `frame` is required. `link_name` may be absent and `name` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolModelData {
    /// Tool name.
    #[serde(default)]
    pub name: String,
    /// Links of the tool's tree.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Joints of the tool's tree.
    #[serde(default)]
    pub joints: Vec<Joint>,
    /// Free-form string attributes.
    #[serde(default)]
    pub attr: BTreeMap<String, String>,
    /// The tcf in the flange frame.
    pub frame: Frame,
    /// Flange-side link the tool mounts to.
    #[serde(default)]
    pub link_name: Option<String>,
}

impl ToolModelData {
    /// Extend tree data with the tool-specific fields.
    pub fn overlay(model: RobotModelData, frame: Frame, link_name: Option<String>) -> Self {
        Self {
            name: model.name,
            links: model.links,
            joints: model.joints,
            attr: model.attr,
            frame,
            link_name,
        }
    }

    /// Split into tree data and the tool-specific fields.
    pub fn into_parts(self) -> (RobotModelData, Frame, Option<String>) {
        let model = RobotModelData {
            name: self.name,
            links: self.links,
            joints: self.joints,
            attr: self.attr,
        };
        (model, self.frame, self.link_name)
    }
}

/// Builder for [`ToolModel`], covering the optional construction arguments.
#[derive(Debug, Clone)]
pub struct ToolModelBuilder {
    visual: Arc<Mesh>,
    frame: Frame,
    collision: Option<Arc<Mesh>>,
    name: String,
    link_name: Option<String>,
}

impl ToolModelBuilder {
    /// Use a separate collision mesh instead of sharing the visual one.
    pub fn collision(mut self, collision: impl Into<Arc<Mesh>>) -> Self {
        self.collision = Some(collision.into());
        self
    }

    /// Tool name; an empty name falls back to [`DEFAULT_TOOL_NAME`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name of the flange-side link the tool mounts to.
    pub fn link_name(mut self, link_name: impl Into<String>) -> Self {
        self.link_name = Some(link_name.into());
        self
    }

    /// Finish the tool. The collision mesh defaults to the visual one.
    pub fn build(self) -> ToolModel {
        let collision = self.collision.unwrap_or_else(|| Arc::clone(&self.visual));
        let name = if self.name.is_empty() {
            DEFAULT_TOOL_NAME.to_string()
        } else {
            self.name
        };

        let link = Link::new(TOOL_LINK_NAME)
            .with_visual(LinkGeometry::new(self.visual))
            .with_collision(LinkGeometry::new(collision));

        debug!(tool = %name, link_name = ?self.link_name, "Created tool model");

        ToolModel {
            model: RobotModel::with_root_link(name, link),
            frame: self.frame,
            link_name: self.link_name,
        }
    }
}

impl ToolModel {
    /// A tool whose collision geometry is its visual mesh, named
    /// [`DEFAULT_TOOL_NAME`], not bound to a flange link.
    pub fn new(visual: impl Into<Arc<Mesh>>, frame_in_tool0_frame: Frame) -> Self {
        Self::builder(visual, frame_in_tool0_frame).build()
    }

    /// Start a [`ToolModelBuilder`] for the optional arguments.
    pub fn builder(visual: impl Into<Arc<Mesh>>, frame_in_tool0_frame: Frame) -> ToolModelBuilder {
        ToolModelBuilder {
            visual: visual.into(),
            frame: frame_in_tool0_frame,
            collision: None,
            name: DEFAULT_TOOL_NAME.to_string(),
            link_name: None,
        }
    }

    /// Turn an existing robot model into a tool.
    ///
    /// The robot is left untouched; the tool gets its own copy of the tree.
    pub fn from_robot_model(
        robot: &RobotModel,
        frame_in_tool0_frame: Frame,
        link_name: Option<String>,
    ) -> Result<Self> {
        Self::from_data(ToolModelData::overlay(
            robot.data(),
            frame_in_tool0_frame,
            link_name,
        ))
    }

    /// The tcf expressed in the flange frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Mutable access to the tcf.
    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    /// Replace the tcf.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    /// Name of the flange-side link the tool mounts to.
    pub fn link_name(&self) -> Option<&str> {
        self.link_name.as_deref()
    }

    /// Bind the tool to a flange link, or unbind it with `None`.
    pub fn set_link_name(&mut self, link_name: Option<String>) {
        self.link_name = link_name;
    }

    /// The owned kinematic tree.
    pub fn model(&self) -> &RobotModel {
        &self.model
    }

    fn tool_link(&self) -> Option<&Link> {
        self.model
            .get_link_by_name(TOOL_LINK_NAME)
            .or_else(|| self.model.root())
    }

    /// First visual mesh of the tool link (or of the root link for tools
    /// built from a robot model).
    pub fn visual(&self) -> Option<&Arc<Mesh>> {
        self.tool_link()
            .and_then(|link| link.visual.first())
            .map(|geometry| &geometry.mesh)
    }

    /// First collision mesh of the tool link (or of the root link).
    pub fn collision(&self) -> Option<&Arc<Mesh>> {
        self.tool_link()
            .and_then(|link| link.collision.first())
            .map(|geometry| &geometry.mesh)
    }

    /// Convert frames at the tool tip (tcf) into frames at the flange (t0cf).
    pub fn from_tcf_to_t0cf(&self, frames_tcf: &[Frame]) -> Vec<Frame> {
        trace!(tool = %self.model.name(), count = frames_tcf.len(), "tcf -> t0cf");
        let te = Transformation::from_frame_to_frame(&self.frame, &Frame::worldxy());
        Self::apply(te, frames_tcf)
    }

    /// Convert frames at the flange (t0cf) into frames at the tool tip (tcf).
    pub fn from_t0cf_to_tcf(&self, frames_t0cf: &[Frame]) -> Vec<Frame> {
        trace!(tool = %self.model.name(), count = frames_t0cf.len(), "t0cf -> tcf");
        let te = Transformation::from_frame_to_frame(&Frame::worldxy(), &self.frame);
        Self::apply(te, frames_t0cf)
    }

    fn apply(te: Transformation, frames: &[Frame]) -> Vec<Frame> {
        frames
            .iter()
            .map(|frame| Frame::from_transformation(&(Transformation::from_frame(frame) * te)))
            .collect()
    }
}

impl KinematicTree for ToolModel {
    fn name(&self) -> &str {
        self.model.name()
    }

    fn links(&self) -> &[Link] {
        self.model.links()
    }

    fn joints(&self) -> &[Joint] {
        self.model.joints()
    }

    fn root_name(&self) -> Option<&str> {
        self.model.root_name()
    }

    fn link_placement(&self, link_name: &str) -> Option<Transformation> {
        self.model.link_placement(link_name)
    }

    fn get_link_by_name(&self, name: &str) -> Option<&Link> {
        self.model.get_link_by_name(name)
    }

    fn get_joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.model.get_joint_by_name(name)
    }
}

impl Data for ToolModel {
    type Repr = ToolModelData;

    fn data(&self) -> ToolModelData {
        ToolModelData::overlay(self.model.data(), self.frame, self.link_name.clone())
    }

    fn from_data(data: ToolModelData) -> Result<Self> {
        let (model, frame, link_name) = data.into_parts();
        let mut model = RobotModel::from_data(model)?;

        if model.name().is_empty() {
            warn!("Tool data has no name, using '{}'", DEFAULT_TOOL_NAME);
            model.set_name(DEFAULT_TOOL_NAME);
        }

        Ok(Self {
            model,
            frame,
            link_name,
        })
    }
}
