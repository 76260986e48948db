//! Cross-version inspection and conversion
//!
//! Conversion never guesses. A message is re-encoded under the target
//! family, so anything the target schema cannot express (a 2.1.0-only edge
//! field, a `PAUSED` action, a custom operating mode) fails with the error
//! the target encoder raises. The factsheet is the one message with a real
//! mapping, because 2.1.0 replaced its free strings with closed enums.

use crate::codec::path::Cursor;
use crate::codec::reader::FromWire;
use crate::codec::writer::ToWire;
use crate::codec::{Message, Payload};
use crate::error::{CodecError, CodecResult};
use crate::protocol::enums::WireEnum;
use crate::protocol::factsheet::{v2_0, v2_1, Factsheet};
use crate::protocol::topics::MessageKind;
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;
use tracing::debug;

/// What a raw document says about its own version
#[derive(Debug, Clone, PartialEq)]
pub struct VersionReport {
    /// Tag supplied by the transport
    pub declared: ProtocolVersion,
    /// The document's own `version` field, verbatim
    pub claimed: Option<String>,
    /// Family the claim resolves to, when it names a supported one
    pub claimed_family: Option<ProtocolVersion>,
    /// Family whose schema accepts the document, declared tag tried first
    pub schema: Option<ProtocolVersion>,
}

impl VersionReport {
    /// Inspect a raw document of the given kind
    ///
    /// Diagnostic only: decoding still uses the declared tag alone.
    pub fn inspect(kind: MessageKind, bytes: &[u8], declared: ProtocolVersion) -> CodecResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let claimed = value.get("version").and_then(Value::as_str).map(str::to_string);
        let claimed_family = claimed
            .as_deref()
            .and_then(|claim| ProtocolVersion::from_claim(claim).ok());

        let candidates = std::iter::once(declared)
            .chain(ProtocolVersion::ALL.into_iter().filter(|v| *v != declared));
        let schema = candidates
            .filter(|version| kind.defined_in(*version))
            .find(|version| accepts(kind, &value, *version));

        Ok(Self {
            declared,
            claimed,
            claimed_family,
            schema,
        })
    }

    /// Declared tag, claim and accepting schema all agree
    pub fn is_consistent(&self) -> bool {
        self.schema == Some(self.declared)
            && self.claimed_family.map_or(self.claimed.is_none(), |v| v == self.declared)
    }
}

fn accepts(kind: MessageKind, value: &Value, version: ProtocolVersion) -> bool {
    use crate::protocol::{Connection, InstantActions, Order, State, Visualization};

    let at = Cursor::root(version);
    match kind {
        MessageKind::Order => Order::from_wire(value, at).is_ok(),
        MessageKind::State => State::from_wire(value, at).is_ok(),
        MessageKind::InstantActions => InstantActions::from_wire(value, at).is_ok(),
        MessageKind::Visualization => Visualization::from_wire(value, at).is_ok(),
        MessageKind::Connection => Connection::from_wire(value, at).is_ok(),
        MessageKind::Factsheet => Factsheet::from_wire(value, at).is_ok(),
    }
}

/// Re-target a message to another protocol family
pub fn convert(message: &Message, target: ProtocolVersion) -> CodecResult<Message> {
    if message.version() == target {
        return Ok(message.clone());
    }

    let payload = match message.payload().clone() {
        Payload::Order(mut order) => {
            order.header.version = target.as_str().to_string();
            Payload::Order(reencode(&order, target)?)
        }
        Payload::State(mut state) => {
            state.header.version = target.as_str().to_string();
            Payload::State(reencode(&state, target)?)
        }
        Payload::InstantActions(mut batch) => {
            batch.header.version = target.as_str().to_string();
            Payload::InstantActions(reencode(&batch, target)?)
        }
        Payload::Visualization(mut visualization) => {
            if visualization.version.is_some() {
                visualization.version = Some(target.as_str().to_string());
            }
            Payload::Visualization(reencode(&visualization, target)?)
        }
        Payload::Connection(_) => return Err(CodecError::unsupported_version(target.as_str())),
        Payload::Factsheet(Factsheet::V2_0_0(factsheet)) if target == ProtocolVersion::V2_1_0 => {
            Payload::Factsheet(Factsheet::V2_1_0(upgrade_factsheet(&factsheet)?))
        }
        Payload::Factsheet(_) => return Err(CodecError::unsupported_version(target.as_str())),
    };

    debug!(
        kind = %message.kind(),
        from = %message.version(),
        to = %target,
        "Message converted"
    );
    Message::new(target, payload)
}

/// Encode under the target and read the result back
fn reencode<T: FromWire + ToWire>(message: &T, target: ProtocolVersion) -> CodecResult<T> {
    let at = Cursor::root(target);
    let value = message.to_wire(at)?;
    T::from_wire(&value, at)
}

fn closed<E: WireEnum>(raw: &str, path: impl FnOnce() -> String) -> CodecResult<E> {
    E::parse(raw, ProtocolVersion::V2_1_0).ok_or_else(|| CodecError::InvalidEnumValue(path(), raw.to_string()))
}

fn closed_list<E: WireEnum>(raw: &[String], field: &str) -> CodecResult<Vec<E>> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| closed(value, || format!("{field}[{i}]")))
        .collect()
}

/// Map a 2.0.0 factsheet onto the 2.1.0 schema
pub fn upgrade_factsheet(old: &v2_0::Factsheet) -> CodecResult<v2_1::Factsheet> {
    if old.localization_parameters.is_some() {
        return Err(CodecError::IncompatibleField {
            path: "localizationParameters".to_string(),
            version: ProtocolVersion::V2_1_0.as_str().to_string(),
        });
    }

    let types = &old.type_specification;
    let type_specification = v2_1::TypeSpecification {
        series_name: types.series_name.clone(),
        series_description: types.series_description.clone(),
        agv_kinematic: closed(&types.agv_kinematic, || {
            "typeSpecification.agvKinematic".to_string()
        })?,
        agv_class: types.agv_class,
        max_load_mass: types.max_load_mass,
        localization_types: closed_list(
            &types.localization_types,
            "typeSpecification.localizationTypes",
        )?,
        navigation_types: closed_list(&types.navigation_types, "typeSpecification.navigationTypes")?,
    };

    let physical = &old.physical_parameters;
    let physical_parameters = v2_1::PhysicalParameters {
        speed_min: physical.speed_min,
        speed_max: physical.speed_max,
        acceleration_max: physical.acceleration_max,
        deceleration_max: physical.deceleration_max,
        height_min: Some(physical.height_min),
        height_max: physical.height_max,
        width: physical.width,
        length: physical.length,
    };

    let limits = &old.protocol_limits;
    let protocol_limits = v2_1::ProtocolLimits {
        max_string_lens: v2_1::MaxStringLens {
            msg_len: limits.max_string_lens.msg_len,
            topic_serial_len: None,
            topic_elem_len: None,
            id_len: limits.max_string_lens.id_len,
            id_numerical_only: None,
            enum_len: limits.max_string_lens.enum_len,
            load_id_len: None,
        },
        max_array_lens: v2_1::MaxArrayLens {
            order_nodes: Some(limits.max_array_lens.order_nodes),
            order_edges: Some(limits.max_array_lens.order_edges),
            node_actions: None,
            edge_actions: None,
            actions_action_parameters: None,
            instant_actions: None,
            trajectory_knot_vector: None,
            trajectory_control_points: None,
            state_node_states: None,
            state_edge_states: None,
            state_loads: Some(limits.max_array_lens.state_loads),
            state_action_states: None,
            state_errors: None,
            state_information: None,
            error_error_references: None,
            information_info_references: None,
        },
        timing: limits.timing.clone(),
    };

    let protocol_features = v2_1::ProtocolFeatures {
        optional_parameters: old
            .protocol_features
            .optional_parameters
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Ok(v2_1::OptionalParameter {
                    parameter: p.parameter.clone(),
                    support: closed(&p.support, || {
                        format!("protocolFeatures.optionalParameters[{i}].support")
                    })?,
                    description: p.description.clone(),
                })
            })
            .collect::<CodecResult<_>>()?,
        agv_actions: old
            .protocol_features
            .agv_actions
            .iter()
            .enumerate()
            .map(|(i, a)| upgrade_action(i, a))
            .collect::<CodecResult<_>>()?,
    };

    let geometry = &old.agv_geometry;
    let agv_geometry = v2_1::AgvGeometry {
        wheel_definitions: Some(
            geometry
                .wheel_definitions
                .iter()
                .enumerate()
                .map(|(i, wheel)| {
                    Ok(v2_1::WheelDefinition {
                        wheel_type: closed(&wheel.wheel_type, || {
                            format!("agvGeometry.wheelDefinitions[{i}].type")
                        })?,
                        is_active_driven: wheel.is_active_driven,
                        is_active_steered: wheel.is_active_steered,
                        position: v2_1::WheelPosition {
                            x: wheel.position.x,
                            y: wheel.position.y,
                            theta: wheel.position.theta,
                        },
                        diameter: wheel.diameter,
                        width: wheel.width,
                        center_displacement: wheel.center_displacement,
                        constraints: wheel.constraints.clone(),
                    })
                })
                .collect::<CodecResult<_>>()?,
        ),
        envelopes2d: Some(
            geometry
                .envelopes2d
                .iter()
                .map(|envelope| v2_1::Envelope2D {
                    set: envelope.set.clone(),
                    polygon_points: envelope
                        .polygon_points
                        .iter()
                        .map(|p| v2_1::PolygonPoint { x: p.x, y: p.y })
                        .collect(),
                    description: envelope.description.clone(),
                })
                .collect(),
        ),
        envelopes3d: geometry.envelopes3d.clone(),
    };

    let load_specification = v2_1::LoadSpecification {
        load_positions: Some(old.load_specification.load_positions.clone()),
        load_sets: Some(
            old.load_specification
                .load_sets
                .iter()
                .map(|set| v2_1::LoadSet {
                    set_name: set.set_name.clone(),
                    load_type: set.load_type.clone(),
                    load_positions: Some(set.load_positions.clone()),
                    bounding_box_reference: Some(set.bounding_box_reference.clone()),
                    load_dimensions: Some(set.load_dimensions.clone()),
                    max_weight: None,
                    min_loadhandling_height: None,
                    max_loadhandling_height: None,
                    min_loadhandling_depth: None,
                    max_loadhandling_depth: None,
                    min_loadhandling_tilt: None,
                    max_loadhandling_tilt: None,
                    agv_speed_limit: None,
                    agv_acceleration_limit: None,
                    agv_deceleration_limit: None,
                    pick_time: None,
                    drop_time: None,
                    description: None,
                })
                .collect(),
        ),
    };

    Ok(v2_1::Factsheet {
        header_id: Some(old.header.header_id),
        timestamp: Some(old.header.timestamp),
        version: ProtocolVersion::V2_1_0.as_str().to_string(),
        manufacturer: old.header.manufacturer.clone(),
        serial_number: old.header.serial_number.clone(),
        type_specification,
        physical_parameters,
        protocol_limits,
        protocol_features,
        agv_geometry,
        load_specification,
        vehicle_config: None,
    })
}

fn upgrade_action(index: usize, action: &v2_0::AgvAction) -> CodecResult<v2_1::AgvAction> {
    let base = format!("protocolFeatures.agvActions[{index}]");
    let action_parameters = action
        .action_parameters
        .as_ref()
        .map(|params| {
            params
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    Ok(v2_1::ActionParameterSpec {
                        key: p.key.clone(),
                        value_data_type: closed(&p.value_data_type, || {
                            format!("{base}.actionParameters[{i}].valueDataType")
                        })?,
                        description: p.description.clone(),
                        is_optional: p.is_optional,
                    })
                })
                .collect::<CodecResult<Vec<_>>>()
        })
        .transpose()?;

    Ok(v2_1::AgvAction {
        action_type: action.action_type.clone(),
        action_description: action.action_description.clone(),
        action_scopes: closed_list(&action.action_scopes, &format!("{base}.actionScopes"))?,
        action_parameters,
        result_description: action.result_description.clone(),
        blocking_types: action
            .blocking_types
            .as_deref()
            .map(|raw| closed_list(raw, &format!("{base}.blockingTypes")))
            .transpose()?,
    })
}
