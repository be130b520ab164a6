//! Kinematic trees built from links and joints.

use std::collections::{BTreeMap, HashMap};

use flange_common::{Data, Dtype, FlangeError, Frame, Result, Transformation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Configuration, Joint, KinematicTree, Link};

/// A kinematic tree of links connected by joints.
///
/// Lookup indices are kept in sync by [`RobotModel::add_link`] and
/// [`RobotModel::add_joint`]. Link placements are a cache filled by
/// [`RobotModel::create`] and reflect the tree at the time of that call.
#[derive(Debug, Clone, PartialEq, Dtype)]
#[dtype("compas_robots/RobotModel")]
#[cfg_attr(feature = "ecs", derive(bevy::prelude::Component))]
pub struct RobotModel {
    name: String,
    links: Vec<Link>,
    joints: Vec<Joint>,
    attr: BTreeMap<String, String>,

    link_index: HashMap<String, usize>,
    joint_index: HashMap<String, usize>,
    /// child link -> joint above it
    parent_joint: HashMap<String, usize>,
    /// link -> joints below it, in insertion order
    child_joints: HashMap<String, Vec<usize>>,
    placements: HashMap<String, Transformation>,
}

/// Serialized form of a [`RobotModel`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RobotModelData {
    /// Tree name.
    #[serde(default)]
    pub name: String,
    /// Links, in insertion order.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Joints, in insertion order.
    #[serde(default)]
    pub joints: Vec<Joint>,
    /// Free-form string attributes.
    #[serde(default)]
    pub attr: BTreeMap<String, String>,
}

impl RobotModel {
    /// An empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
            joints: Vec::new(),
            attr: BTreeMap::new(),
            link_index: HashMap::new(),
            joint_index: HashMap::new(),
            parent_joint: HashMap::new(),
            child_joints: HashMap::new(),
            placements: HashMap::new(),
        }
    }

    /// A tree holding a single root link, placed at the identity.
    pub(crate) fn with_root_link(name: impl Into<String>, link: Link) -> Self {
        let mut model = Self::new(name);
        let root = link.name.clone();
        model.link_index.insert(root.clone(), 0);
        model.child_joints.insert(root.clone(), Vec::new());
        model.links.push(link);
        model.place_from(&root, Transformation::identity());
        model
    }

    /// Rename the tree.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Free-form string attributes.
    pub fn attr(&self) -> &BTreeMap<String, String> {
        &self.attr
    }

    /// Mutable access to the attributes.
    pub fn attr_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.attr
    }

    /// The named link, or [`FlangeError::LinkNotFound`].
    pub fn link(&self, name: &str) -> Result<&Link> {
        self.get_link_by_name(name)
            .ok_or_else(|| FlangeError::LinkNotFound(name.to_string()))
    }

    /// The named joint, or [`FlangeError::JointNotFound`].
    pub fn joint(&self, name: &str) -> Result<&Joint> {
        self.get_joint_by_name(name)
            .ok_or_else(|| FlangeError::JointNotFound(name.to_string()))
    }

    /// Add a link. Names must be unique.
    pub fn add_link(&mut self, link: Link) -> Result<&Link> {
        if self.link_index.contains_key(&link.name) {
            return Err(FlangeError::DuplicateLink(link.name));
        }

        let index = self.links.len();
        self.link_index.insert(link.name.clone(), index);
        self.child_joints.insert(link.name.clone(), Vec::new());
        self.links.push(link);

        Ok(&self.links[index])
    }

    /// Add a joint between two existing links.
    ///
    /// The child must not already have a parent joint, and the joint must not
    /// close a loop.
    pub fn add_joint(&mut self, joint: Joint) -> Result<&Joint> {
        self.check_joint(&joint)?;

        let index = self.joints.len();
        self.joint_index.insert(joint.name.clone(), index);
        self.parent_joint.insert(joint.child.clone(), index);
        self.child_joints
            .entry(joint.parent.clone())
            .or_default()
            .push(index);
        self.joints.push(joint);

        Ok(&self.joints[index])
    }

    fn check_joint(&self, joint: &Joint) -> Result<()> {
        if self.joint_index.contains_key(&joint.name) {
            return Err(FlangeError::DuplicateJoint(joint.name.clone()));
        }
        self.link(&joint.parent)?;
        self.link(&joint.child)?;
        if let Some(&existing) = self.parent_joint.get(&joint.child) {
            return Err(FlangeError::MultipleParents {
                link: joint.child.clone(),
                existing: self.joints[existing].name.clone(),
            });
        }

        // Walk up from the parent; meeting the child means a loop.
        let mut current = joint.parent.as_str();
        loop {
            if current == joint.child {
                return Err(FlangeError::CyclicJoint {
                    joint: joint.name.clone(),
                    link: joint.child.clone(),
                });
            }
            match self.parent_joint.get(current) {
                Some(&j) => current = self.joints[j].parent.as_str(),
                None => return Ok(()),
            }
        }
    }

    /// Recompute every lookup index from the link and joint lists.
    ///
    /// Needed after the lists were filled wholesale, e.g. on deserialization.
    /// On error the model is left unchanged.
    pub fn rebuild_tree(&mut self) -> Result<()> {
        let mut rebuilt = Self::new(self.name.clone());
        for link in &self.links {
            rebuilt.add_link(link.clone())?;
        }
        for joint in &self.joints {
            rebuilt.add_joint(joint.clone())?;
        }

        if !rebuilt.links.is_empty() && rebuilt.root_name().is_none() {
            return Err(FlangeError::MissingRoot(self.name.clone()));
        }

        self.link_index = rebuilt.link_index;
        self.joint_index = rebuilt.joint_index;
        self.parent_joint = rebuilt.parent_joint;
        self.child_joints = rebuilt.child_joints;
        self.placements.clear();

        debug!(
            model = %self.name,
            links = self.links.len(),
            joints = self.joints.len(),
            root = ?self.root_name(),
            "Rebuilt kinematic tree"
        );
        Ok(())
    }

    /// Recompute link placements at zero configuration, starting from
    /// `transformation` at `root`.
    pub fn create(&mut self, root: &str, transformation: Transformation) -> Result<()> {
        self.link(root)?;
        self.placements.clear();
        self.place_from(root, transformation);
        Ok(())
    }

    fn place_from(&mut self, root: &str, transformation: Transformation) {
        let mut stack = vec![(root.to_string(), transformation)];
        while let Some((link, placement)) = stack.pop() {
            if let Some(children) = self.child_joints.get(&link) {
                for &j in children {
                    let joint = &self.joints[j];
                    stack.push((joint.child.clone(), placement * joint.transformation(0.0)));
                }
            }
            self.placements.insert(link, placement);
        }
    }

    /// Child link of the last configurable joint, or the root if nothing moves.
    pub fn get_end_effector_link_name(&self) -> Option<&str> {
        self.get_configurable_joints()
            .into_iter()
            .last()
            .map(|joint| joint.child.as_str())
            .or_else(|| self.root_name())
    }

    /// All configurable joints at zero.
    pub fn zero_configuration(&self) -> Configuration {
        Configuration::from_pairs(
            self.get_configurable_joints()
                .into_iter()
                .map(|joint| (joint.name.clone(), 0.0)),
        )
    }

    /// Joints on the path from the root down to `link_name`, root first.
    fn joint_chain(&self, link_name: &str) -> Result<Vec<&Joint>> {
        self.link(link_name)?;
        let mut chain = Vec::new();
        let mut current = link_name;
        while let Some(&j) = self.parent_joint.get(current) {
            let joint = &self.joints[j];
            chain.push(joint);
            current = joint.parent.as_str();
        }
        chain.reverse();
        Ok(chain)
    }

    /// Alternating link and joint names from `start` down to `end`.
    ///
    /// `start` defaults to the root and `end` to the end-effector link.
    pub fn iter_chain(&self, start: Option<&str>, end: Option<&str>) -> Result<Vec<String>> {
        let root = self
            .root_name()
            .ok_or_else(|| FlangeError::MissingRoot(self.name.clone()))?;
        let start = start.unwrap_or(root);
        let end = end.or_else(|| self.get_end_effector_link_name()).unwrap_or(root);

        self.link(start)?;

        let chain = self.joint_chain(end)?;
        let top = chain.first().map(|joint| joint.parent.as_str()).unwrap_or(end);
        let first = if start == top {
            0
        } else {
            chain
                .iter()
                .position(|joint| joint.child == start)
                .map(|i| i + 1)
                .ok_or_else(|| FlangeError::Unreachable {
                    start: start.to_string(),
                    end: end.to_string(),
                })?
        };

        let mut names = vec![start.to_string()];
        for joint in &chain[first..] {
            names.push(joint.name.clone());
            names.push(joint.child.clone());
        }
        Ok(names)
    }

    /// Frame of `link_name` (default: the end-effector link) in the root frame.
    ///
    /// Every configurable joint on the chain must have a value in
    /// `configuration`.
    pub fn forward_kinematics(
        &self,
        configuration: &Configuration,
        link_name: Option<&str>,
    ) -> Result<Frame> {
        let link_name = match link_name {
            Some(name) => name,
            None => self
                .get_end_effector_link_name()
                .ok_or_else(|| FlangeError::MissingRoot(self.name.clone()))?,
        };

        let mut transformation = Transformation::identity();
        for joint in self.joint_chain(link_name)? {
            let value = if joint.is_configurable() {
                configuration
                    .get(&joint.name)
                    .ok_or_else(|| FlangeError::MissingJointValue(joint.name.clone()))?
            } else {
                0.0
            };
            transformation = transformation * joint.transformation(value);
        }

        Ok(Frame::from_transformation(&transformation))
    }
}

impl KinematicTree for RobotModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn joints(&self) -> &[Joint] {
        &self.joints
    }

    fn root_name(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| !self.parent_joint.contains_key(&link.name))
            .map(|link| link.name.as_str())
    }

    fn link_placement(&self, link_name: &str) -> Option<Transformation> {
        self.placements.get(link_name).copied()
    }

    fn get_link_by_name(&self, name: &str) -> Option<&Link> {
        self.link_index.get(name).map(|&i| &self.links[i])
    }

    fn get_joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.joint_index.get(name).map(|&i| &self.joints[i])
    }
}

impl Data for RobotModel {
    type Repr = RobotModelData;

    fn data(&self) -> RobotModelData {
        RobotModelData {
            name: self.name.clone(),
            links: self.links.clone(),
            joints: self.joints.clone(),
            attr: self.attr.clone(),
        }
    }

    fn from_data(data: RobotModelData) -> Result<Self> {
        let mut model = Self::new(data.name);
        model.links = data.links;
        model.joints = data.joints;
        model.attr = data.attr;
        model.rebuild_tree()?;

        if let Some(root) = model.root_name().map(str::to_string) {
            model.create(&root, Transformation::identity())?;
        }
        Ok(model)
    }
}
