use thiserror::Error;

/// Convenience alias used throughout the flange crates.
pub type Result<T> = std::result::Result<T, FlangeError>;

/// Errors raised by geometry construction, kinematic tree edits and data codecs.
#[derive(Debug, Error)]
pub enum FlangeError {
    /// A frame was built from a zero-length axis or from parallel axes.
    #[error("degenerate frame: {reason}")]
    DegenerateFrame {
        /// What made the axes unusable.
        reason: &'static str,
    },

    /// A mesh face references a vertex that does not exist.
    #[error("invalid mesh: face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    InvalidMesh {
        /// Index of the offending face.
        face: usize,
        /// Vertex index referenced by the face.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// JSON (de)serialization failed, including missing required keys.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding failed.
    #[error("failed to encode '{dtype}': {error}")]
    Encode {
        /// Type tag of the value being encoded.
        dtype: String,
        /// Message from the encoder.
        error: String,
    },

    /// Binary decoding failed.
    #[error("failed to decode '{dtype}': {error}")]
    Decode {
        /// Type tag expected by the decoder.
        dtype: String,
        /// Message from the decoder.
        error: String,
    },

    /// The serialized document carries a different type tag than the one requested.
    #[error("dtype mismatch: expected '{expected}', found '{found}'")]
    DtypeMismatch {
        /// Type tag of the requested type.
        expected: String,
        /// Type tag found in the document.
        found: String,
    },

    /// No link with the given name exists in the tree.
    #[error("link '{0}' not found")]
    LinkNotFound(String),

    /// No joint with the given name exists in the tree.
    #[error("joint '{0}' not found")]
    JointNotFound(String),

    /// A link with the given name already exists.
    #[error("link '{0}' already exists")]
    DuplicateLink(String),

    /// A joint with the given name already exists.
    #[error("joint '{0}' already exists")]
    DuplicateJoint(String),

    /// The child link of a new joint already hangs off another joint.
    #[error("link '{link}' already has parent joint '{existing}'")]
    MultipleParents {
        /// The child link.
        link: String,
        /// Joint already attached above it.
        existing: String,
    },

    /// The joint would close a loop in the tree.
    #[error("joint '{joint}' would make link '{link}' its own ancestor")]
    CyclicJoint {
        /// The rejected joint.
        joint: String,
        /// Link that would become its own ancestor.
        link: String,
    },

    /// `end` does not hang below `start` in the tree.
    #[error("link '{end}' is not reachable from link '{start}'")]
    Unreachable {
        /// Chain start.
        start: String,
        /// Chain end.
        end: String,
    },

    /// Every link is the child of some joint, so the tree has no root.
    #[error("kinematic tree '{0}' has no root link")]
    MissingRoot(String),

    /// A configurable joint on the requested chain has no value in the configuration.
    #[error("configuration has no value for joint '{0}'")]
    MissingJointValue(String),

    /// Joint names and joint values differ in length.
    #[error("configuration has {names} joint names but {values} values")]
    ConfigurationMismatch {
        /// Number of joint names.
        names: usize,
        /// Number of joint values.
        values: usize,
    },
}
