//! Factsheet schema of protocol 2.1.0
//!
//! Classifications are closed enumerations, most geometry and load lists
//! became optional, protocol limits cover sixteen arrays and the vehicle
//! configuration block is new.

use super::{ArrayLimit, Envelope3D, Timing};
use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{BoundingBoxReference, LoadDimensions};
use crate::protocol::enums::{
    ActionScope, AgvClass, AgvKinematic, BlockingType, LocalizationType, NavigationType,
    SupportType, ValueDataType, WheelType,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// 2.1.0 factsheet; `header_id` and `timestamp` became optional
#[derive(Debug, Clone, PartialEq)]
pub struct Factsheet {
    pub header_id: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
    pub version: String,
    pub manufacturer: String,
    pub serial_number: String,
    pub type_specification: TypeSpecification,
    pub physical_parameters: PhysicalParameters,
    pub protocol_limits: ProtocolLimits,
    pub protocol_features: ProtocolFeatures,
    pub agv_geometry: AgvGeometry,
    pub load_specification: LoadSpecification,
    pub vehicle_config: Option<VehicleConfig>,
}

impl FromWire for Factsheet {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header_id: obj.optional("headerId")?,
            timestamp: obj.optional("timestamp")?,
            version: obj.required("version")?,
            manufacturer: obj.required("manufacturer")?,
            serial_number: obj.required("serialNumber")?,
            type_specification: obj.required("typeSpecification")?,
            physical_parameters: obj.required("physicalParameters")?,
            protocol_limits: obj.required("protocolLimits")?,
            protocol_features: obj.required("protocolFeatures")?,
            agv_geometry: obj.required("agvGeometry")?,
            load_specification: obj.required("loadSpecification")?,
            vehicle_config: obj.optional("vehicleConfig")?,
        })
    }
}

impl ToWire for Factsheet {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.optional("headerId", &self.header_id)?;
        w.optional("timestamp", &self.timestamp)?;
        w.required("version", &self.version)?;
        w.required("manufacturer", &self.manufacturer)?;
        w.required("serialNumber", &self.serial_number)?;
        w.required("typeSpecification", &self.type_specification)?;
        w.required("physicalParameters", &self.physical_parameters)?;
        w.required("protocolLimits", &self.protocol_limits)?;
        w.required("protocolFeatures", &self.protocol_features)?;
        w.required("agvGeometry", &self.agv_geometry)?;
        w.required("loadSpecification", &self.load_specification)?;
        w.optional("vehicleConfig", &self.vehicle_config)?;
        Ok(w.finish())
    }
}

wire_record! {
    pub struct TypeSpecification {
        series_name: String => required "seriesName",
        series_description: Option<String> => optional "seriesDescription",
        agv_kinematic: AgvKinematic => required "agvKinematic",
        agv_class: AgvClass => required "agvClass",
        max_load_mass: f64 => required "maxLoadMass",
        localization_types: Vec<LocalizationType> => required "localizationTypes",
        navigation_types: Vec<NavigationType> => required "navigationTypes",
    }
}

wire_record! {
    pub struct PhysicalParameters {
        speed_min: f64 => required "speedMin",
        speed_max: f64 => required "speedMax",
        acceleration_max: f64 => required "accelerationMax",
        deceleration_max: f64 => required "decelerationMax",
        height_min: Option<f64> => optional "heightMin",
        height_max: f64 => required "heightMax",
        width: f64 => required "width",
        length: f64 => required "length",
    }
}

wire_record! {
    pub struct ProtocolLimits {
        max_string_lens: MaxStringLens => required "maxStringLens",
        max_array_lens: MaxArrayLens => required "maxArrayLens",
        timing: Timing => required "timing",
    }
}

wire_record! {
    pub struct MaxStringLens {
        msg_len: Option<u32> => optional "msgLen",
        topic_serial_len: Option<u32> => optional "topicSerialLen",
        topic_elem_len: Option<u32> => optional "topicElemLen",
        id_len: Option<u32> => optional "idLen",
        id_numerical_only: Option<bool> => optional "idNumericalOnly",
        enum_len: Option<u32> => optional "enumLen",
        load_id_len: Option<u32> => optional "loadIdLen",
    }
}

wire_record! {
    pub struct MaxArrayLens {
        order_nodes: Option<u32> => optional "order.nodes",
        order_edges: Option<u32> => optional "order.edges",
        node_actions: Option<u32> => optional "node.actions",
        edge_actions: Option<u32> => optional "edge.actions",
        actions_action_parameters: Option<u32> => optional "actions.actionsParameters",
        instant_actions: Option<u32> => optional "instantActions",
        trajectory_knot_vector: Option<u32> => optional "trajectory.knotVector",
        trajectory_control_points: Option<u32> => optional "trajectory.controlPoints",
        state_node_states: Option<u32> => optional "state.nodeStates",
        state_edge_states: Option<u32> => optional "state.edgeStates",
        state_loads: Option<u32> => optional "state.loads",
        state_action_states: Option<u32> => optional "state.actionStates",
        state_errors: Option<u32> => optional "state.errors",
        state_information: Option<u32> => optional "state.information",
        error_error_references: Option<u32> => optional "error.errorReferences",
        information_info_references: Option<u32> => optional "information.infoReferences",
    }
}

impl MaxArrayLens {
    pub fn get(&self, field: ArrayLimit) -> Option<u32> {
        match field {
            ArrayLimit::OrderNodes => self.order_nodes,
            ArrayLimit::OrderEdges => self.order_edges,
            ArrayLimit::NodeActions => self.node_actions,
            ArrayLimit::EdgeActions => self.edge_actions,
            ArrayLimit::ActionParameters => self.actions_action_parameters,
            ArrayLimit::InstantActions => self.instant_actions,
            ArrayLimit::TrajectoryKnotVector => self.trajectory_knot_vector,
            ArrayLimit::TrajectoryControlPoints => self.trajectory_control_points,
            ArrayLimit::StateNodeStates => self.state_node_states,
            ArrayLimit::StateEdgeStates => self.state_edge_states,
            ArrayLimit::StateLoads => self.state_loads,
            ArrayLimit::StateActionStates => self.state_action_states,
            ArrayLimit::StateErrors => self.state_errors,
            ArrayLimit::StateInformation => self.state_information,
            ArrayLimit::ErrorReferences => self.error_error_references,
            ArrayLimit::InfoReferences => self.information_info_references,
        }
    }
}

wire_record! {
    pub struct ProtocolFeatures {
        optional_parameters: Vec<OptionalParameter> => required "optionalParameters",
        agv_actions: Vec<AgvAction> => required "agvActions",
    }
}

wire_record! {
    pub struct OptionalParameter {
        parameter: String => required "parameter",
        support: SupportType => required "support",
        description: Option<String> => optional "description",
    }
}

wire_record! {
    pub struct AgvAction {
        action_type: String => required "actionType",
        action_description: Option<String> => optional "actionDescription",
        action_scopes: Vec<ActionScope> => required "actionScopes",
        action_parameters: Option<Vec<ActionParameterSpec>> => optional "actionParameters",
        result_description: Option<String> => optional "resultDescription",
        blocking_types: Option<Vec<BlockingType>> => optional "blockingTypes",
    }
}

wire_record! {
    pub struct ActionParameterSpec {
        key: String => required "key",
        value_data_type: ValueDataType => required "valueDataType",
        description: Option<String> => optional "description",
        is_optional: Option<bool> => optional "isOptional",
    }
}

wire_record! {
    pub struct AgvGeometry {
        wheel_definitions: Option<Vec<WheelDefinition>> => optional "wheelDefinitions",
        envelopes2d: Option<Vec<Envelope2D>> => optional "envelopes2d",
        envelopes3d: Option<Vec<Envelope3D>> => optional "envelopes3d",
    }
}

wire_record! {
    pub struct WheelDefinition {
        wheel_type: WheelType => required "type",
        is_active_driven: bool => required "isActiveDriven",
        is_active_steered: bool => required "isActiveSteered",
        position: WheelPosition => required "position",
        diameter: f64 => required "diameter",
        width: f64 => required "width",
        center_displacement: Option<f64> => optional "centerDisplacement",
        constraints: Option<String> => optional "constraints",
    }
}

wire_record! {
    /// Wheel mounting point in vehicle coordinates
    pub struct WheelPosition {
        x: f64 => required "x",
        y: f64 => required "y",
        theta: Option<f64> => optional "theta",
    }
}

wire_record! {
    pub struct Envelope2D {
        set: String => required "set",
        polygon_points: Vec<PolygonPoint> => required "polygonPoints",
        description: Option<String> => optional "description",
    }
}

wire_record! {
    pub struct PolygonPoint {
        x: f64 => required "x",
        y: f64 => required "y",
    }
}

wire_record! {
    pub struct LoadSpecification {
        load_positions: Option<Vec<String>> => optional "loadPositions",
        load_sets: Option<Vec<LoadSet>> => optional "loadSets",
    }
}

wire_record! {
    /// Load type the vehicle can handle, with its handling envelope
    pub struct LoadSet {
        set_name: String => required "setName",
        load_type: String => required "loadType",
        load_positions: Option<Vec<String>> => optional "loadPositions",
        bounding_box_reference: Option<BoundingBoxReference> => optional "boundingBoxReference",
        load_dimensions: Option<LoadDimensions> => optional "loadDimensions",
        max_weight: Option<f64> => optional "maxWeight",
        min_loadhandling_height: Option<f64> => optional "minLoadhandlingHeight",
        max_loadhandling_height: Option<f64> => optional "maxLoadhandlingHeight",
        min_loadhandling_depth: Option<f64> => optional "minLoadhandlingDepth",
        max_loadhandling_depth: Option<f64> => optional "maxLoadhandlingDepth",
        min_loadhandling_tilt: Option<f64> => optional "minLoadhandlingTilt",
        max_loadhandling_tilt: Option<f64> => optional "maxLoadhandlingTilt",
        agv_speed_limit: Option<f64> => optional "agvSpeedLimit",
        agv_acceleration_limit: Option<f64> => optional "agvAccelerationLimit",
        agv_deceleration_limit: Option<f64> => optional "agvDecelerationLimit",
        pick_time: Option<f64> => optional "pickTime",
        drop_time: Option<f64> => optional "dropTime",
        description: Option<String> => optional "description",
    }
}

wire_record! {
    pub struct VehicleConfig {
        versions: Option<Vec<VersionInfo>> => optional "versions",
        network: Option<NetworkConfiguration> => optional "network",
    }
}

wire_record! {
    /// Software or hardware component version, e.g. firmware
    pub struct VersionInfo {
        key: String => required "key",
        value: String => required "value",
    }
}

wire_record! {
    pub struct NetworkConfiguration {
        dns_servers: Option<Vec<String>> => optional "dnsServers",
        local_ip_address: Option<String> => optional "localIpAddress",
        ntp_servers: Option<Vec<String>> => optional "ntpServers",
        netmask: Option<String> => optional "netmask",
        default_gateway: Option<String> => optional "defaultGateway",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::protocol::version::ProtocolVersion;
    use serde_json::json;

    fn at() -> Cursor<'static> {
        Cursor::root(ProtocolVersion::V2_1_0)
    }

    #[test]
    fn test_kinematic_is_closed() {
        let raw = json!({
            "seriesName": "S1",
            "agvKinematic": "SOMETHING_CUSTOM",
            "agvClass": "CARRIER",
            "maxLoadMass": 500,
            "localizationTypes": [],
            "navigationTypes": []
        });
        assert_eq!(
            TypeSpecification::from_wire(&raw, at()),
            Err(CodecError::InvalidEnumValue(
                "agvKinematic".to_string(),
                "SOMETHING_CUSTOM".to_string()
            ))
        );
    }

    #[test]
    fn test_action_scope_path_in_error() {
        let raw = json!({"actionType": "pick", "actionScopes": ["NODE", "ANYWHERE"]});
        assert_eq!(
            AgvAction::from_wire(&raw, at()),
            Err(CodecError::InvalidEnumValue(
                "actionScopes[1]".to_string(),
                "ANYWHERE".to_string()
            ))
        );
    }

    #[test]
    fn test_empty_geometry_allowed() {
        let geometry = AgvGeometry::from_wire(&json!({}), at()).unwrap();
        assert_eq!(geometry.wheel_definitions, None);
        assert_eq!(geometry.to_wire(at()).unwrap(), json!({}));
    }

    #[test]
    fn test_max_array_lens_sparse() {
        let lens = MaxArrayLens::from_wire(&json!({"order.nodes": 20, "instantActions": 5}), at()).unwrap();
        assert_eq!(lens.get(ArrayLimit::OrderNodes), Some(20));
        assert_eq!(lens.get(ArrayLimit::InstantActions), Some(5));
        assert_eq!(lens.get(ArrayLimit::StateErrors), None);
    }
}
