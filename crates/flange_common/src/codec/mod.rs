//! Encoders and decoders for [`Data`](crate::Data) values.
//!
//! Both codecs implement codee's `Encoder`/`Decoder` traits, so they plug into
//! anything that is generic over a codee codec.

pub mod binary;
pub mod json;

pub use binary::{DataBincodeCodec, DataPacket};
pub use json::{DataEnvelope, DataJsonCodec};
