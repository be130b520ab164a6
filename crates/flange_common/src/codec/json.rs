use codee::{Decoder, Encoder};
use serde::{Deserialize, Serialize};

use crate::{Data, FlangeError};

/// JSON document wrapping a data representation with its type tag.
///
/// `{"dtype": "compas_robots/ToolModel", "data": {...}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataEnvelope<R> {
    /// Type tag of the wrapped value.
    pub dtype: String,
    /// The wrapped representation.
    pub data: R,
}

/// Human-readable codec for [`Data`] values, used for persisted definitions.
///
/// Decoding checks the envelope's `dtype` before touching `data`, so a
/// document written for a sibling type is rejected with
/// [`FlangeError::DtypeMismatch`] instead of a confusing field error.
pub struct DataJsonCodec;

impl<T: Data> Encoder<T> for DataJsonCodec {
    type Error = FlangeError;
    type Encoded = String;

    fn encode(val: &T) -> Result<Self::Encoded, Self::Error> {
        let envelope = DataEnvelope {
            dtype: T::DTYPE.to_string(),
            data: val.data(),
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

impl<T: Data> Decoder<T> for DataJsonCodec {
    type Error = FlangeError;
    type Encoded = str;

    fn decode(val: &Self::Encoded) -> Result<T, Self::Error> {
        let envelope: DataEnvelope<serde_json::Value> = serde_json::from_str(val)?;

        if envelope.dtype != T::DTYPE {
            return Err(FlangeError::DtypeMismatch {
                expected: T::DTYPE.to_string(),
                found: envelope.dtype,
            });
        }

        let repr: T::Repr = serde_json::from_value(envelope.data)?;
        T::from_data(repr)
    }
}
