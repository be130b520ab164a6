//! Shared building blocks for the flange crates: geometry primitives, numeric
//! tolerances, the error type, and the typed data representation with its
//! JSON and binary codecs.

pub mod codec;

pub mod data;
pub use data::{Data, Dtype};

pub mod error;
pub use error::{FlangeError, Result};

pub mod geometry;
pub use geometry::{Frame, FrameData, Mesh, Transformation};

pub mod tolerance;
pub use tolerance::Tolerance;

pub use flange_macros::Dtype;
