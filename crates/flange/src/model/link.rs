//! Links and the geometry they carry.

use std::collections::BTreeMap;
use std::sync::Arc;

use flange_common::{Frame, Mesh, Transformation};
use serde::{Deserialize, Serialize};

/// One visual or collision element of a link.
///
/// The mesh is reference counted so the same geometry can back both the
/// visual and collision description without being copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkGeometry {
    /// Optional element name.
    #[serde(default)]
    pub name: Option<String>,

    /// Placement of the mesh in the link frame; `None` means the link origin.
    #[serde(default)]
    pub origin: Option<Frame>,

    /// The mesh.
    pub mesh: Arc<Mesh>,
}

impl LinkGeometry {
    /// Geometry placed at the link origin.
    pub fn new(mesh: impl Into<Arc<Mesh>>) -> Self {
        Self {
            name: None,
            origin: None,
            mesh: mesh.into(),
        }
    }

    /// Set the element name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Place the mesh at `origin` in the link frame.
    pub fn with_origin(mut self, origin: Frame) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The mesh expressed in the frame given by `link_placement`.
    pub fn placed_mesh(&self, link_placement: &Transformation) -> Mesh {
        let placement = match &self.origin {
            Some(origin) => *link_placement * Transformation::from_frame(origin),
            None => *link_placement,
        };
        self.mesh.transformed(&placement)
    }
}

/// A rigid body of the kinematic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique name within the tree.
    pub name: String,

    /// Geometry for display.
    #[serde(default)]
    pub visual: Vec<LinkGeometry>,

    /// Geometry for collision checks.
    #[serde(default)]
    pub collision: Vec<LinkGeometry>,

    /// Free-form string attributes.
    #[serde(default)]
    pub attr: BTreeMap<String, String>,
}

impl Link {
    /// A link without geometry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visual: Vec::new(),
            collision: Vec::new(),
            attr: BTreeMap::new(),
        }
    }

    /// Add a visual element.
    pub fn with_visual(mut self, visual: LinkGeometry) -> Self {
        self.visual.push(visual);
        self
    }

    /// Add a collision element.
    pub fn with_collision(mut self, collision: LinkGeometry) -> Self {
        self.collision.push(collision);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flange_common::Tolerance;

    #[test]
    fn test_placed_mesh_applies_origin_then_link_placement() {
        let geometry = LinkGeometry::new(Mesh::cuboid(0.2, 0.2, 0.2))
            .with_origin(Frame::worldxy().with_point([0.0, 0.0, 0.1]));
        let placement = Transformation::from_translation([1.0, 0.0, 0.0]);

        let (min, max) = geometry.placed_mesh(&placement).bounding_box().unwrap();

        assert!(Tolerance::default().is_close3(min, [0.9, -0.1, 0.0]));
        assert!(Tolerance::default().is_close3(max, [1.1, 0.1, 0.2]));
    }

    #[test]
    fn test_placed_mesh_without_origin() {
        let geometry = LinkGeometry::new(Mesh::cuboid(0.2, 0.2, 0.2));
        let placed = geometry.placed_mesh(&Transformation::identity());

        assert_eq!(placed, *geometry.mesh);
    }
}
