use std::fmt::Debug;
use std::ops::Deref;

use codee::{Decoder, Encoder};
use flange::codec::{DataBincodeCodec, DataEnvelope, DataJsonCodec};
use flange::{Data, FlangeError, Frame, Mesh, ToolModel, ToolModelData};

fn gripper() -> ToolModel {
    let frame = Frame::new([0.0, 0.0, 0.12], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap();
    ToolModel::builder(Mesh::cuboid(0.08, 0.04, 0.12), frame)
        .name("gripper")
        .link_name("tool0")
        .build()
}

// Encode then decode with any codee codec pair
fn round_trip<C, T>(value: &T) -> T
where
    C: Encoder<T> + Decoder<T>,
    <C as Encoder<T>>::Encoded: Deref<Target = <C as Decoder<T>>::Encoded>,
    <C as Encoder<T>>::Error: Debug,
    <C as Decoder<T>>::Error: Debug,
{
    let encoded = C::encode(value).unwrap();
    C::decode(&*encoded).unwrap()
}

#[test]
fn test_tool_through_json_codec() {
    let tool = gripper();

    let json = <DataJsonCodec as Encoder<ToolModel>>::encode(&tool).unwrap();
    let envelope: DataEnvelope<ToolModelData> = serde_json::from_str(&json).unwrap();
    assert_eq!(envelope.dtype, "compas_robots/ToolModel");
    assert_eq!(envelope.data.name, "gripper");
    assert_eq!(envelope.data.link_name.as_deref(), Some("tool0"));
    assert_eq!(envelope.data.links.len(), 1);

    let restored = round_trip::<DataJsonCodec, ToolModel>(&tool);
    assert_eq!(restored.link_name(), Some("tool0"));
    assert!(restored.frame().is_close(tool.frame(), &Default::default()));
}

#[test]
fn test_tool_through_bincode_codec() {
    let tool = gripper();

    let bytes = <DataBincodeCodec as Encoder<ToolModel>>::encode(&tool).unwrap();
    let prefix = u64::from_le_bytes(bytes[..8].try_into().unwrap());
    assert_eq!(prefix as usize, bytes.len() - 8);

    assert_eq!(round_trip::<DataBincodeCodec, ToolModel>(&tool), tool);
}

#[test]
fn test_codecs_agree_with_data_methods() {
    let tool = gripper();

    assert_eq!(
        <DataJsonCodec as Encoder<ToolModel>>::encode(&tool).unwrap(),
        tool.to_json().unwrap()
    );
    assert_eq!(
        <DataBincodeCodec as Encoder<ToolModel>>::encode(&tool).unwrap(),
        tool.to_bytes().unwrap()
    );
}

#[test]
fn test_truncated_tool_bytes_are_rejected() {
    let bytes = gripper().to_bytes().unwrap();

    let result: Result<ToolModel, _> = DataBincodeCodec::decode(&bytes[..bytes.len() - 1]);
    assert!(matches!(
        result,
        Err(FlangeError::Decode { ref dtype, .. }) if dtype == "compas_robots/ToolModel"
    ));

    let result: Result<ToolModel, _> = DataBincodeCodec::decode(&bytes[..4]);
    assert!(matches!(result, Err(FlangeError::Decode { .. })));
}
