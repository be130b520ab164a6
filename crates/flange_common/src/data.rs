use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::Result;
use crate::codec::{DataBincodeCodec, DataJsonCodec};
use codee::{Decoder, Encoder};

/// A fixed type tag identifying a serialized type.
///
/// The tag is written next to the data in every encoded document so that
/// sibling types sharing a data layout can be told apart. Derive it with
/// `#[derive(Dtype)]` and a `#[dtype("...")]` attribute.
///
/// ## Example
///
/// ```rust
/// use flange_common::Dtype;
///
/// struct Gripper;
///
/// impl Dtype for Gripper {
///     const DTYPE: &'static str = "my_cell/Gripper";
/// }
///
/// assert_eq!(Gripper.dtype(), "my_cell/Gripper");
/// ```
pub trait Dtype {
    /// The type tag.
    const DTYPE: &'static str;

    /// Returns the type tag. Independent of instance state.
    fn dtype(&self) -> &'static str {
        Self::DTYPE
    }
}

/// A type with a typed, serializable data representation.
///
/// `from_data(x.data())` must reproduce a value equivalent to `x`.
/// The representation is recomputed on every call to [`Data::data`].
pub trait Data: Dtype + Sized {
    /// Serializable representation of the value.
    type Repr: Serialize + DeserializeOwned + Clone + Debug;

    /// Export the current state.
    fn data(&self) -> Self::Repr;

    /// Rebuild a value from its representation.
    fn from_data(data: Self::Repr) -> Result<Self>;

    /// Encode as a JSON document `{"dtype": ..., "data": ...}`.
    fn to_json(&self) -> Result<String> {
        <DataJsonCodec as Encoder<Self>>::encode(self)
    }

    /// Decode a JSON document written by [`Data::to_json`].
    fn from_json(json: &str) -> Result<Self> {
        <DataJsonCodec as Decoder<Self>>::decode(json)
    }

    /// Encode as a length-prefixed bincode packet.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        <DataBincodeCodec as Encoder<Self>>::encode(self)
    }

    /// Decode a packet written by [`Data::to_bytes`].
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <DataBincodeCodec as Decoder<Self>>::decode(bytes)
    }
}
