use flange::{
    Configuration, Data, FlangeError, Frame, Joint, JointType, KinematicTree, Link, Limit,
    RobotModel, RobotModelData, Tolerance, Transformation,
};

fn origin(point: [f64; 3]) -> Frame {
    Frame::worldxy().with_point(point)
}

// base -j1(rz)-> shoulder -j2(ry)-> elbow -j3(fixed)-> tool0
//                    \-cam_mount(fixed)-> camera
fn arm() -> RobotModel {
    let mut robot = RobotModel::new("arm");
    for name in ["base", "shoulder", "elbow", "tool0", "camera"] {
        robot.add_link(Link::new(name)).unwrap();
    }
    robot
        .add_joint(
            Joint::new("j1", JointType::Revolute, "base", "shoulder")
                .with_origin(origin([0.0, 0.0, 0.4]))
                .with_axis([0.0, 0.0, 1.0])
                .with_limit(Limit::new(-3.0, 3.0)),
        )
        .unwrap();
    robot
        .add_joint(
            Joint::new("j2", JointType::Revolute, "shoulder", "elbow")
                .with_origin(origin([0.0, 0.0, 0.3]))
                .with_axis([0.0, 1.0, 0.0]),
        )
        .unwrap();
    robot
        .add_joint(
            Joint::new("j3", JointType::Fixed, "elbow", "tool0").with_origin(origin([0.0, 0.0, 0.2])),
        )
        .unwrap();
    robot
        .add_joint(
            Joint::new("cam_mount", JointType::Fixed, "shoulder", "camera")
                .with_origin(origin([0.1, 0.0, 0.0])),
        )
        .unwrap();
    robot
}

#[test]
fn test_lookups() {
    let robot = arm();

    assert_eq!(robot.name(), "arm");
    assert_eq!(robot.root_name(), Some("base"));
    assert_eq!(robot.root().map(|link| link.name.as_str()), Some("base"));
    assert_eq!(
        robot.get_link_names(),
        ["base", "shoulder", "elbow", "tool0", "camera"]
    );
    assert_eq!(robot.get_joint_names(), ["j1", "j2", "j3", "cam_mount"]);
    assert_eq!(robot.get_joint_by_name("j3").unwrap().child, "tool0");
    assert!(robot.get_link_by_name("gripper").is_none());

    let configurable: Vec<&str> = robot
        .get_configurable_joints()
        .iter()
        .map(|joint| joint.name.as_str())
        .collect();
    assert_eq!(configurable, ["j1", "j2"]);
    assert_eq!(robot.get_end_effector_link_name(), Some("elbow"));
}

#[test]
fn test_zero_configuration() {
    let zero = arm().zero_configuration();
    assert_eq!(zero.joint_names(), ["j1", "j2"]);
    assert_eq!(zero.joint_values(), [0.0, 0.0]);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut robot = arm();

    assert!(matches!(
        robot.add_link(Link::new("elbow")),
        Err(FlangeError::DuplicateLink(name)) if name == "elbow"
    ));

    robot.add_link(Link::new("spare")).unwrap();
    assert!(matches!(
        robot.add_joint(Joint::new("j1", JointType::Fixed, "tool0", "spare")),
        Err(FlangeError::DuplicateJoint(name)) if name == "j1"
    ));
}

#[test]
fn test_joint_to_unknown_link_is_rejected() {
    let mut robot = arm();
    assert!(matches!(
        robot.add_joint(Joint::new("j4", JointType::Fixed, "tool0", "gripper")),
        Err(FlangeError::LinkNotFound(name)) if name == "gripper"
    ));
    assert_eq!(robot.joints().len(), 4);
}

#[test]
fn test_second_parent_is_rejected() {
    let mut robot = arm();
    assert!(matches!(
        robot.add_joint(Joint::new("j4", JointType::Fixed, "camera", "tool0")),
        Err(FlangeError::MultipleParents { link, existing }) if link == "tool0" && existing == "j3"
    ));
}

#[test]
fn test_cycle_is_rejected() {
    let mut robot = arm();
    assert!(matches!(
        robot.add_joint(Joint::new("loop", JointType::Fixed, "tool0", "base")),
        Err(FlangeError::CyclicJoint { joint, link }) if joint == "loop" && link == "base"
    ));
    assert_eq!(robot.root_name(), Some("base"));
}

#[test]
fn test_forward_kinematics() {
    let robot = arm();

    let zero = robot
        .forward_kinematics(&robot.zero_configuration(), Some("tool0"))
        .unwrap();
    assert!(Tolerance::default().is_close3(zero.point().to_array(), [0.0, 0.0, 0.9]));

    // Bending j2 by 90 degrees swings the forearm onto +x.
    let bent = Configuration::from_pairs([("j1", 0.0), ("j2", std::f64::consts::FRAC_PI_2)]);
    let tool0 = robot.forward_kinematics(&bent, Some("tool0")).unwrap();
    assert!(Tolerance::default().is_close3(tool0.point().to_array(), [0.2, 0.0, 0.7]));
    assert!(Tolerance::default().is_close3(tool0.zaxis().to_array(), [1.0, 0.0, 0.0]));

    // Default link is the end effector.
    let elbow = robot.forward_kinematics(&bent, None).unwrap();
    assert!(Tolerance::default().is_close3(elbow.point().to_array(), [0.0, 0.0, 0.7]));
}

#[test]
fn test_forward_kinematics_errors() {
    let robot = arm();

    let partial = Configuration::from_pairs([("j1", 0.0)]);
    assert!(matches!(
        robot.forward_kinematics(&partial, Some("tool0")),
        Err(FlangeError::MissingJointValue(name)) if name == "j2"
    ));

    // Only joints on the chain need values.
    assert!(robot.forward_kinematics(&partial, Some("camera")).is_ok());

    assert!(matches!(
        robot.forward_kinematics(&partial, Some("gripper")),
        Err(FlangeError::LinkNotFound(_))
    ));
}

#[test]
fn test_iter_chain() {
    let robot = arm();

    assert_eq!(
        robot.iter_chain(None, None).unwrap(),
        ["base", "j1", "shoulder", "j2", "elbow"]
    );
    assert_eq!(
        robot.iter_chain(Some("shoulder"), Some("tool0")).unwrap(),
        ["shoulder", "j2", "elbow", "j3", "tool0"]
    );
    assert_eq!(robot.iter_chain(Some("tool0"), Some("tool0")).unwrap(), ["tool0"]);

    assert!(matches!(
        robot.iter_chain(Some("camera"), Some("tool0")),
        Err(FlangeError::Unreachable { start, end }) if start == "camera" && end == "tool0"
    ));
    assert!(matches!(
        robot.iter_chain(Some("nowhere"), None),
        Err(FlangeError::LinkNotFound(_))
    ));
}

#[test]
fn test_create_places_links() {
    let mut robot = arm();
    assert!(robot.link_placement("tool0").is_none());

    robot
        .create("base", Transformation::from_translation([1.0, 0.0, 0.0]))
        .unwrap();

    let tool0 = robot.link_placement("tool0").unwrap();
    assert!(Tolerance::default().is_close3(tool0.translation().to_array(), [1.0, 0.0, 0.9]));
    let camera = robot.link_placement("camera").unwrap();
    assert!(Tolerance::default().is_close3(camera.translation().to_array(), [1.1, 0.0, 0.4]));

    assert!(matches!(
        robot.create("gripper", Transformation::identity()),
        Err(FlangeError::LinkNotFound(_))
    ));
}

#[test]
fn test_json_round_trip() {
    let robot = arm();

    let json = robot.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["dtype"], "compas_robots/RobotModel");
    assert_eq!(value["data"]["joints"][0]["type"], "revolute");

    let restored = RobotModel::from_json(&json).unwrap();
    assert_eq!(restored.links(), robot.links());
    assert_eq!(restored.joints(), robot.joints());
    assert_eq!(restored.root_name(), Some("base"));
    // Deserialization places the tree at the identity.
    assert!(restored.link_placement("tool0").is_some());
}

#[test]
fn test_bytes_round_trip() {
    let mut robot = arm();
    robot.attr_mut().insert("vendor".to_string(), "acme".to_string());
    robot.create("base", Transformation::identity()).unwrap();

    let restored = RobotModel::from_bytes(&robot.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, robot);
}

#[test]
fn test_from_data_rejects_invalid_tree() {
    let data = RobotModelData {
        name: "broken".to_string(),
        links: vec![Link::new("a"), Link::new("a")],
        ..Default::default()
    };
    assert!(matches!(
        RobotModel::from_data(data),
        Err(FlangeError::DuplicateLink(name)) if name == "a"
    ));

    let data = RobotModelData {
        name: "dangling".to_string(),
        links: vec![Link::new("a")],
        joints: vec![Joint::new("j", JointType::Fixed, "a", "b")],
        ..Default::default()
    };
    assert!(matches!(
        RobotModel::from_data(data),
        Err(FlangeError::LinkNotFound(name)) if name == "b"
    ));
}

#[test]
fn test_rebuild_tree_is_idempotent() {
    let mut robot = arm();
    let before = robot.get_link_names().join(",");

    robot.rebuild_tree().unwrap();

    assert_eq!(robot.get_link_names().join(","), before);
    assert_eq!(robot.root_name(), Some("base"));
    assert_eq!(robot.get_joint_by_name("cam_mount").unwrap().parent, "shoulder");
    assert!(robot.forward_kinematics(&robot.zero_configuration(), Some("tool0")).is_ok());
}

#[test]
fn test_fallible_lookups() {
    let robot = arm();

    assert_eq!(robot.link("elbow").unwrap().name, "elbow");
    assert_eq!(robot.joint("j2").unwrap().parent, "shoulder");
    assert!(matches!(
        robot.link("gripper"),
        Err(FlangeError::LinkNotFound(name)) if name == "gripper"
    ));
    assert!(matches!(
        robot.joint("j9"),
        Err(FlangeError::JointNotFound(name)) if name == "j9"
    ));
}

#[test]
fn test_decoded_configuration_must_pair_names_and_values() {
    let robot = arm();

    let err = serde_json::from_str::<Configuration>(
        r#"{"joint_names": ["j1", "j2"], "joint_values": [0.0]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("2 joint names but 1 values"));

    let bent: Configuration = serde_json::from_str(
        r#"{"joint_names": ["j1", "j2"], "joint_values": [0.0, 1.5707963267948966]}"#,
    )
    .unwrap();
    let tool0 = robot.forward_kinematics(&bent, Some("tool0")).unwrap();
    assert!(Tolerance::default().is_close3(tool0.point().to_array(), [0.2, 0.0, 0.7]));
}
