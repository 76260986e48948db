//! Version dispatch and per-version field and enum tables

mod test_helpers;

use serde_json::json;
use test_helpers::{bytes, driving_state, example_order, idle_state, rich_order};
use vda5050::{
    decode, ActionStatus, Codec, CodecConfig, CodecError, ErrorKind, MessageKind, OperatingMode,
    ProtocolVersion,
};

fn codec_error(kind: MessageKind, raw: &serde_json::Value, version: ProtocolVersion) -> CodecError {
    decode(kind, &bytes(raw), version)
        .unwrap_err()
        .as_codec()
        .cloned()
        .expect("expected a codec error")
}

// ========== Version claims ==========

#[test]
fn test_version_claim_forms() {
    assert_eq!(ProtocolVersion::from_claim("2.0.0").unwrap(), ProtocolVersion::V2_0_0);
    assert_eq!(ProtocolVersion::from_claim("2.0").unwrap(), ProtocolVersion::V2_0_0);
    assert_eq!(ProtocolVersion::from_claim("v2.1.3").unwrap(), ProtocolVersion::V2_1_0);
    assert_eq!(
        ProtocolVersion::from_claim("1.1.0"),
        Err(CodecError::UnsupportedVersion("1.1.0".to_string()))
    );
    assert!(ProtocolVersion::from_claim("2").is_err());
    assert!(ProtocolVersion::from_claim("").is_err());
}

#[test]
fn test_declared_tag_selects_schema_not_document_shape() {
    // A 2.1.0-only field is ignored when the 2.0.0 schema is selected
    let mut raw = rich_order("2.0.0");
    raw["edges"][0]["corridor"] = json!({"leftWidth": 0.5, "rightWidth": 0.5});
    let message = decode(MessageKind::Order, &bytes(&raw), ProtocolVersion::V2_0_0).unwrap();
    assert_eq!(message.as_order().unwrap().edges[0].corridor, None);

    raw["version"] = json!("2.1.0");
    let message = decode(MessageKind::Order, &bytes(&raw), ProtocolVersion::V2_1_0).unwrap();
    let corridor = message.as_order().unwrap().edges[0].corridor.clone().unwrap();
    assert_eq!(corridor.left_width, 0.5);
}

#[test]
fn test_mismatched_claim_is_unsupported() {
    assert_eq!(
        codec_error(MessageKind::Order, &example_order("2.1.0"), ProtocolVersion::V2_0_0),
        CodecError::UnsupportedVersion("2.1.0".to_string())
    );
    assert_eq!(
        codec_error(MessageKind::Order, &example_order("3.0.0"), ProtocolVersion::V2_1_0),
        CodecError::UnsupportedVersion("3.0.0".to_string())
    );
}

#[test]
fn test_claim_check_is_configurable() {
    let mut config = CodecConfig::default();
    config.dispatch.require_version_match = false;
    let codec = Codec::new(config);
    assert!(codec
        .decode(MessageKind::Order, &bytes(&example_order("2.1.0")), ProtocolVersion::V2_0_0)
        .is_ok());
}

#[test]
fn test_connection_has_no_2_0_schema() {
    let raw = json!({
        "headerId": 1, "timestamp": "2024-05-01T10:00:00Z", "version": "2.0.0",
        "manufacturer": "acme", "serialNumber": "agv-1", "connectionState": "ONLINE"
    });
    assert_eq!(
        codec_error(MessageKind::Connection, &raw, ProtocolVersion::V2_0_0),
        CodecError::UnsupportedVersion("2.0.0".to_string())
    );
}

// ========== Field tables ==========

#[test]
fn test_missing_header_id_in_2_0_state() {
    let mut raw = idle_state("2.0.0");
    raw.as_object_mut().unwrap().remove("headerId");
    assert_eq!(
        codec_error(MessageKind::State, &raw, ProtocolVersion::V2_0_0),
        CodecError::MissingField("headerId".to_string())
    );
}

#[test]
fn test_action_states_optional_from_2_1() {
    let mut raw = idle_state("2.1.0");
    raw.as_object_mut().unwrap().remove("actionStates");
    let message = decode(MessageKind::State, &bytes(&raw), ProtocolVersion::V2_1_0).unwrap();
    assert!(message.as_state().unwrap().action_states.is_empty());

    let mut raw = idle_state("2.0.0");
    raw.as_object_mut().unwrap().remove("actionStates");
    assert_eq!(
        codec_error(MessageKind::State, &raw, ProtocolVersion::V2_0_0),
        CodecError::MissingField("actionStates".to_string())
    );
}

#[test]
fn test_trajectory_degree_required_from_2_1() {
    let mut raw = rich_order("2.1.0");
    raw["edges"][0]["trajectory"]
        .as_object_mut()
        .unwrap()
        .remove("degree");
    assert_eq!(
        codec_error(MessageKind::Order, &raw, ProtocolVersion::V2_1_0),
        CodecError::MissingField("edges[0].trajectory.degree".to_string())
    );

    raw["version"] = json!("2.0.0");
    assert!(decode(MessageKind::Order, &bytes(&raw), ProtocolVersion::V2_0_0).is_ok());
}

// ========== Enum tables ==========

#[test]
fn test_paused_only_in_2_0() {
    let mut raw = driving_state("2.0.0");
    raw["actionStates"][1]["actionStatus"] = json!("PAUSED");
    let message = decode(MessageKind::State, &bytes(&raw), ProtocolVersion::V2_0_0).unwrap();
    assert_eq!(
        message.as_state().unwrap().action_states[1].action_status,
        ActionStatus::Paused
    );

    raw["version"] = json!("2.1.0");
    assert_eq!(
        codec_error(MessageKind::State, &raw, ProtocolVersion::V2_1_0),
        CodecError::InvalidEnumValue(
            "actionStates[1].actionStatus".to_string(),
            "PAUSED".to_string()
        )
    );
}

#[test]
fn test_operating_mode_open_in_2_1() {
    let mut raw = idle_state("2.1.0");
    raw["operatingMode"] = json!("INTERVENED");
    let message = decode(MessageKind::State, &bytes(&raw), ProtocolVersion::V2_1_0).unwrap();
    assert_eq!(
        message.as_state().unwrap().operating_mode,
        OperatingMode::Other("INTERVENED".to_string())
    );

    raw["version"] = json!("2.0.0");
    assert_eq!(
        codec_error(MessageKind::State, &raw, ProtocolVersion::V2_0_0),
        CodecError::InvalidEnumValue("operatingMode".to_string(), "INTERVENED".to_string())
    );
}

#[test]
fn test_enum_match_is_case_sensitive() {
    let mut raw = idle_state("2.0.0");
    raw["safetyState"]["eStop"] = json!("none");
    let err = decode(MessageKind::State, &bytes(&raw), ProtocolVersion::V2_0_0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
}

#[test]
fn test_wrong_json_type_reports_found_type() {
    let mut raw = idle_state("2.0.0");
    raw["driving"] = json!("yes");
    assert_eq!(
        codec_error(MessageKind::State, &raw, ProtocolVersion::V2_0_0),
        CodecError::UnexpectedType {
            path: "driving".to_string(),
            expected: "boolean",
            found: "string",
        }
    );
}
