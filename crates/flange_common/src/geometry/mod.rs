//! Frames, rigid transformations and meshes.

pub mod frame;
pub mod mesh;
pub mod transformation;

pub use frame::{Frame, FrameData};
pub use mesh::{Mesh, MeshData};
pub use transformation::Transformation;

pub use bevy::math::{DMat4, DVec3};
