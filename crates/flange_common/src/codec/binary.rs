use std::fmt::Debug;

use codee::{Decoder, Encoder};
use serde::{Deserialize, Serialize};

use crate::{Data, FlangeError};

#[derive(Serialize, Deserialize, Clone, PartialEq)]
/// [`DataPacket`]s carry a bincode-encoded data representation plus its type tag.
pub struct DataPacket {
    /// Type tag of the encoded value, e.g. `"compas_robots/ToolModel"`.
    pub dtype: String,
    /// The serialized representation from bincode.
    pub data: Vec<u8>,
}

impl Debug for DataPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataPacket")
            .field("dtype", &self.dtype)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Compact binary codec for [`Data`] values.
///
/// Layout:
/// - 8-byte little-endian length prefix
/// - Bincode-serialized [`DataPacket`]
///
/// ## Usage
///
/// ```rust,ignore
/// use codee::{Decoder, Encoder};
/// use flange_common::codec::DataBincodeCodec;
///
/// let bytes = DataBincodeCodec::encode(&tool)?;
/// let tool: ToolModel = DataBincodeCodec::decode(&bytes)?;
/// ```
pub struct DataBincodeCodec;

impl<T: Data> Encoder<T> for DataBincodeCodec {
    type Error = FlangeError;
    type Encoded = Vec<u8>;

    fn encode(val: &T) -> Result<Self::Encoded, Self::Error> {
        let encode_error = |e: bincode::error::EncodeError| FlangeError::Encode {
            dtype: T::DTYPE.to_string(),
            error: e.to_string(),
        };

        let packet = DataPacket {
            dtype: T::DTYPE.to_string(),
            data: bincode::serde::encode_to_vec(val.data(), bincode::config::standard())
                .map_err(encode_error)?,
        };

        let encoded_packet = bincode::serde::encode_to_vec(&packet, bincode::config::standard())
            .map_err(encode_error)?;

        let len = encoded_packet.len() as u64;
        let mut buffer = Vec::with_capacity(8 + encoded_packet.len());
        buffer.extend_from_slice(&len.to_le_bytes());
        buffer.extend_from_slice(&encoded_packet);

        Ok(buffer)
    }
}

impl<T: Data> Decoder<T> for DataBincodeCodec {
    type Error = FlangeError;
    type Encoded = [u8];

    fn decode(val: &Self::Encoded) -> Result<T, Self::Error> {
        let decode_error = |error: String| FlangeError::Decode {
            dtype: T::DTYPE.to_string(),
            error,
        };

        if val.len() < 8 {
            return Err(decode_error(format!(
                "buffer too small ({} bytes), need at least 8",
                val.len()
            )));
        }

        let length_bytes: [u8; 8] = val[..8]
            .try_into()
            .map_err(|_| decode_error("unreadable length prefix".to_string()))?;
        let length = u64::from_le_bytes(length_bytes);
        if length != (val.len() - 8) as u64 {
            return Err(decode_error(format!(
                "length prefix says {} bytes, buffer holds {}",
                length,
                val.len() - 8
            )));
        }

        let packet: DataPacket =
            bincode::serde::decode_from_slice(&val[8..], bincode::config::standard())
                .map(|(packet, _)| packet)
                .map_err(|e| decode_error(e.to_string()))?;

        if packet.dtype != T::DTYPE {
            return Err(FlangeError::DtypeMismatch {
                expected: T::DTYPE.to_string(),
                found: packet.dtype,
            });
        }

        let repr: T::Repr = bincode::serde::decode_from_slice(&packet.data, bincode::config::standard())
            .map(|(repr, _)| repr)
            .map_err(|e| decode_error(e.to_string()))?;

        T::from_data(repr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dtype, Frame, Result};

    #[derive(Debug, Clone, PartialEq)]
    struct Marker {
        label: String,
        frame: Frame,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct MarkerData {
        label: String,
        frame: Frame,
    }

    impl Dtype for Marker {
        const DTYPE: &'static str = "tests/Marker";
    }

    impl Data for Marker {
        type Repr = MarkerData;

        fn data(&self) -> MarkerData {
            MarkerData {
                label: self.label.clone(),
                frame: self.frame,
            }
        }

        fn from_data(data: MarkerData) -> Result<Self> {
            Ok(Marker {
                label: data.label,
                frame: data.frame,
            })
        }
    }

    struct OtherMarker;

    impl Dtype for OtherMarker {
        const DTYPE: &'static str = "tests/OtherMarker";
    }

    impl Data for OtherMarker {
        type Repr = MarkerData;

        fn data(&self) -> MarkerData {
            MarkerData {
                label: String::new(),
                frame: Frame::worldxy(),
            }
        }

        fn from_data(_data: MarkerData) -> Result<Self> {
            Ok(OtherMarker)
        }
    }

    fn marker() -> Marker {
        Marker {
            label: String::from("tcp"),
            frame: Frame::new([0.1, 0.2, 0.3], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]).unwrap(),
        }
    }

    #[test]
    fn test_length_prefix() {
        let enc = DataBincodeCodec::encode(&marker()).unwrap();

        // Should have 8-byte length prefix + encoded packet
        assert!(enc.len() > 8);

        let length_bytes: [u8; 8] = enc[..8].try_into().unwrap();
        let length = u64::from_le_bytes(length_bytes);
        assert_eq!(length as usize, enc.len() - 8);

        let dec: Marker = DataBincodeCodec::decode(&enc).unwrap();
        assert_eq!(dec, marker());
    }

    #[test]
    fn test_packet_carries_dtype() {
        let enc = DataBincodeCodec::encode(&marker()).unwrap();
        let (packet, _): (DataPacket, usize) =
            bincode::serde::decode_from_slice(&enc[8..], bincode::config::standard()).unwrap();

        assert_eq!(packet.dtype, "tests/Marker");
        assert!(format!("{:?}", packet).contains("data_len"));
    }

    #[test]
    fn test_truncated_buffer() {
        let enc = DataBincodeCodec::encode(&marker()).unwrap();

        let short: std::result::Result<Marker, _> = DataBincodeCodec::decode(&enc[..4]);
        assert!(matches!(short, Err(FlangeError::Decode { .. })));

        let cut: std::result::Result<Marker, _> = DataBincodeCodec::decode(&enc[..enc.len() - 1]);
        assert!(matches!(cut, Err(FlangeError::Decode { .. })));
    }

    #[test]
    fn test_dtype_mismatch() {
        let enc = DataBincodeCodec::encode(&OtherMarker).unwrap();
        let dec: std::result::Result<Marker, _> = DataBincodeCodec::decode(&enc);

        assert!(matches!(dec, Err(FlangeError::DtypeMismatch { .. })));
    }
}
