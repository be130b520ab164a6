use serde::{Deserialize, Serialize};

use super::Transformation;
use crate::{FlangeError, Result};

/// A polygon mesh given as a vertex list and faces indexing into it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "MeshData")]
pub struct Mesh {
    vertices: Vec<[f64; 3]>,
    faces: Vec<Vec<usize>>,
}

/// Unvalidated serialized form of a [`Mesh`].
#[derive(Debug, Clone, Deserialize)]
pub struct MeshData {
    /// Vertex coordinates.
    pub vertices: Vec<[f64; 3]>,
    /// Faces as lists of vertex indices.
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Build a mesh, checking that every face index refers to an existing vertex.
    pub fn from_vertices_and_faces(vertices: Vec<[f64; 3]>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&vertex) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(FlangeError::InvalidMesh {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// An axis-aligned box centred on the origin, with quad faces.
    pub fn cuboid(xsize: f64, ysize: f64, zsize: f64) -> Self {
        let (x, y, z) = (xsize / 2.0, ysize / 2.0, zsize / 2.0);
        let vertices = vec![
            [-x, -y, -z],
            [x, -y, -z],
            [x, y, -z],
            [-x, y, -z],
            [-x, -y, z],
            [x, -y, z],
            [x, y, z],
            [-x, y, z],
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Self { vertices, faces }
    }

    /// Vertex coordinates.
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Faces as vertex index lists.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
            (min, max)
        }))
    }

    /// A copy of this mesh with every vertex transformed.
    pub fn transformed(&self, transformation: &Transformation) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| transformation.transform_point(*v).to_array())
                .collect(),
            faces: self.faces.clone(),
        }
    }
}

impl TryFrom<MeshData> for Mesh {
    type Error = FlangeError;

    fn try_from(data: MeshData) -> Result<Self> {
        Mesh::from_vertices_and_faces(data.vertices, data.faces)
    }
}
