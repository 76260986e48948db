//! State message: the vehicle's progress report against its current order

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{
    AgvPosition, BoundingBoxReference, Header, LoadDimensions, Trajectory, Velocity,
};
use crate::protocol::enums::{ActionStatus, EStop, ErrorLevel, InfoLevel, OperatingMode};
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;

const V2_1: ProtocolVersion = ProtocolVersion::V2_1_0;

/// Vehicle status report
///
/// `node_states` and `edge_states` hold the part of the order graph that has
/// not been traversed yet; both are empty while the vehicle is idle.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub header: Header,
    pub maps: Option<Vec<Map>>,
    pub order_id: String,
    pub order_update_id: u32,
    pub zone_set_id: Option<String>,
    pub last_node_id: String,
    pub last_node_sequence_id: u32,
    pub driving: bool,
    pub paused: Option<bool>,
    pub new_base_request: Option<bool>,
    pub distance_since_last_node: Option<f64>,
    pub operating_mode: OperatingMode,
    pub node_states: Vec<NodeState>,
    pub edge_states: Vec<EdgeState>,
    pub agv_position: Option<AgvPosition>,
    pub velocity: Option<Velocity>,
    pub loads: Option<Vec<Load>>,
    pub action_states: Vec<ActionState>,
    pub battery_state: BatteryState,
    pub errors: Vec<AgvError>,
    pub information: Option<Vec<Information>>,
    pub safety_state: SafetyState,
}

impl State {
    /// True when no order graph remains to be driven
    pub fn is_idle(&self) -> bool {
        self.node_states.is_empty() && self.edge_states.is_empty()
    }

    pub fn action_state(&self, action_id: &str) -> Option<&ActionState> {
        self.action_states.iter().find(|a| a.action_id == action_id)
    }

    pub fn has_fatal_error(&self) -> bool {
        self.errors.iter().any(|e| e.error_level == ErrorLevel::Fatal)
    }
}

impl FromWire for State {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header: Header::read(&obj)?,
            maps: obj.optional_since(V2_1, "maps")?,
            order_id: obj.required("orderId")?,
            order_update_id: obj.required("orderUpdateId")?,
            zone_set_id: obj.optional("zoneSetId")?,
            last_node_id: obj.required("lastNodeId")?,
            last_node_sequence_id: obj.required("lastNodeSequenceId")?,
            driving: obj.required("driving")?,
            paused: obj.optional("paused")?,
            new_base_request: obj.optional("newBaseRequest")?,
            distance_since_last_node: obj.optional("distanceSinceLastNode")?,
            operating_mode: obj.required("operatingMode")?,
            node_states: obj.required("nodeStates")?,
            edge_states: obj.required("edgeStates")?,
            agv_position: obj.optional("agvPosition")?,
            velocity: obj.optional("velocity")?,
            loads: obj.optional("loads")?,
            action_states: obj
                .required_until(V2_1, "actionStates")?
                .unwrap_or_default(),
            battery_state: obj.required("batteryState")?,
            errors: obj.required("errors")?,
            information: obj.optional("information")?,
            safety_state: obj.required("safetyState")?,
        })
    }
}

impl ToWire for State {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        self.header.write(&mut w)?;
        w.optional_since(V2_1, "maps", &self.maps)?;
        w.required("orderId", &self.order_id)?;
        w.required("orderUpdateId", &self.order_update_id)?;
        w.optional("zoneSetId", &self.zone_set_id)?;
        w.required("lastNodeId", &self.last_node_id)?;
        w.required("lastNodeSequenceId", &self.last_node_sequence_id)?;
        w.required("driving", &self.driving)?;
        w.optional("paused", &self.paused)?;
        w.optional("newBaseRequest", &self.new_base_request)?;
        w.optional("distanceSinceLastNode", &self.distance_since_last_node)?;
        w.required("operatingMode", &self.operating_mode)?;
        w.required("nodeStates", &self.node_states)?;
        w.required("edgeStates", &self.edge_states)?;
        w.optional("agvPosition", &self.agv_position)?;
        w.optional("velocity", &self.velocity)?;
        w.optional("loads", &self.loads)?;
        w.required("actionStates", &self.action_states)?;
        w.required("batteryState", &self.battery_state)?;
        w.required("errors", &self.errors)?;
        w.optional("information", &self.information)?;
        w.required("safetyState", &self.safety_state)?;
        Ok(w.finish())
    }
}

/// Map loaded on the vehicle (2.1.0)
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub map_id: String,
    pub map_version: String,
    pub map_description: Option<String>,
    pub map_status: String,
}

impl FromWire for Map {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            map_id: obj.required("mapId")?,
            map_version: obj.required("mapVersion")?,
            map_description: obj.optional("mapDescription")?,
            map_status: obj.required("mapStatus")?,
        })
    }
}

impl ToWire for Map {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("mapId", &self.map_id)?;
        w.required("mapVersion", &self.map_version)?;
        w.optional("mapDescription", &self.map_description)?;
        w.required("mapStatus", &self.map_status)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub node_id: String,
    pub sequence_id: u32,
    pub node_description: Option<String>,
    pub released: bool,
    pub node_position: Option<NodeStatePosition>,
}

impl NodeState {
    pub fn new<S: Into<String>>(node_id: S, sequence_id: u32, released: bool) -> Self {
        Self {
            node_id: node_id.into(),
            sequence_id,
            node_description: None,
            released,
            node_position: None,
        }
    }
}

impl FromWire for NodeState {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            node_id: obj.required("nodeId")?,
            sequence_id: obj.required("sequenceId")?,
            node_description: obj.optional_since(V2_1, "nodeDescription")?,
            released: obj.required("released")?,
            node_position: obj.optional_since(V2_1, "nodePosition")?,
        })
    }
}

impl ToWire for NodeState {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("nodeId", &self.node_id)?;
        w.required("sequenceId", &self.sequence_id)?;
        w.optional_since(V2_1, "nodeDescription", &self.node_description)?;
        w.required("released", &self.released)?;
        w.optional_since(V2_1, "nodePosition", &self.node_position)?;
        Ok(w.finish())
    }
}

/// Reduced node position reported back in a state (2.1.0)
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStatePosition {
    pub x: f64,
    pub y: f64,
    pub theta: Option<f64>,
    pub map_id: String,
}

impl FromWire for NodeStatePosition {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            x: obj.required("x")?,
            y: obj.required("y")?,
            theta: obj.optional("theta")?,
            map_id: obj.required("mapId")?,
        })
    }
}

impl ToWire for NodeStatePosition {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("x", &self.x)?;
        w.required("y", &self.y)?;
        w.optional("theta", &self.theta)?;
        w.required("mapId", &self.map_id)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeState {
    pub edge_id: String,
    pub sequence_id: u32,
    pub edge_description: Option<String>,
    pub released: bool,
    pub trajectory: Option<Trajectory>,
}

impl EdgeState {
    pub fn new<S: Into<String>>(edge_id: S, sequence_id: u32, released: bool) -> Self {
        Self {
            edge_id: edge_id.into(),
            sequence_id,
            edge_description: None,
            released,
            trajectory: None,
        }
    }
}

impl FromWire for EdgeState {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            edge_id: obj.required("edgeId")?,
            sequence_id: obj.required("sequenceId")?,
            edge_description: obj.optional_since(V2_1, "edgeDescription")?,
            released: obj.required("released")?,
            trajectory: obj.optional("trajectory")?,
        })
    }
}

impl ToWire for EdgeState {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("edgeId", &self.edge_id)?;
        w.required("sequenceId", &self.sequence_id)?;
        w.optional_since(V2_1, "edgeDescription", &self.edge_description)?;
        w.required("released", &self.released)?;
        w.optional("trajectory", &self.trajectory)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionState {
    pub action_id: String,
    pub action_type: Option<String>,
    pub action_description: Option<String>,
    pub action_status: ActionStatus,
    pub result_description: Option<String>,
}

impl ActionState {
    pub fn new<S: Into<String>>(action_id: S, action_status: ActionStatus) -> Self {
        Self {
            action_id: action_id.into(),
            action_type: None,
            action_description: None,
            action_status,
            result_description: None,
        }
    }
}

impl FromWire for ActionState {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            action_id: obj.required("actionId")?,
            action_type: obj.optional("actionType")?,
            action_description: obj.optional("actionDescription")?,
            action_status: obj.required("actionStatus")?,
            result_description: obj.optional("resultDescription")?,
        })
    }
}

impl ToWire for ActionState {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("actionId", &self.action_id)?;
        w.optional("actionType", &self.action_type)?;
        w.optional("actionDescription", &self.action_description)?;
        w.required("actionStatus", &self.action_status)?;
        w.optional("resultDescription", &self.result_description)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryState {
    pub battery_charge: f64,
    pub battery_voltage: Option<f64>,
    pub battery_health: Option<f64>,
    pub charging: bool,
    pub reach: Option<f64>,
}

impl BatteryState {
    pub fn new(battery_charge: f64, charging: bool) -> Self {
        Self {
            battery_charge,
            battery_voltage: None,
            battery_health: None,
            charging,
            reach: None,
        }
    }
}

impl FromWire for BatteryState {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            battery_charge: obj.required("batteryCharge")?,
            battery_voltage: obj.optional("batteryVoltage")?,
            battery_health: obj.optional("batteryHealth")?,
            charging: obj.required("charging")?,
            reach: obj.optional("reach")?,
        })
    }
}

impl ToWire for BatteryState {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("batteryCharge", &self.battery_charge)?;
        w.optional("batteryVoltage", &self.battery_voltage)?;
        w.optional("batteryHealth", &self.battery_health)?;
        w.required("charging", &self.charging)?;
        w.optional("reach", &self.reach)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SafetyState {
    pub e_stop: EStop,
    pub field_violation: bool,
}

impl FromWire for SafetyState {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            e_stop: obj.required("eStop")?,
            field_violation: obj.required("fieldViolation")?,
        })
    }
}

impl ToWire for SafetyState {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("eStop", &self.e_stop)?;
        w.required("fieldViolation", &self.field_violation)?;
        Ok(w.finish())
    }
}

/// Key/value reference attached to an error or information entry
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub reference_key: String,
    pub reference_value: String,
}

impl FromWire for Reference {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            reference_key: obj.required("referenceKey")?,
            reference_value: obj.required("referenceValue")?,
        })
    }
}

impl ToWire for Reference {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("referenceKey", &self.reference_key)?;
        w.required("referenceValue", &self.reference_value)?;
        Ok(w.finish())
    }
}

/// Entry of `State.errors`
#[derive(Debug, Clone, PartialEq)]
pub struct AgvError {
    pub error_type: String,
    pub error_references: Option<Vec<Reference>>,
    pub error_description: Option<String>,
    pub error_hint: Option<String>,
    pub error_level: ErrorLevel,
}

impl FromWire for AgvError {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            error_type: obj.required("errorType")?,
            error_references: obj.optional("errorReferences")?,
            error_description: obj.optional("errorDescription")?,
            error_hint: obj.optional_since(V2_1, "errorHint")?,
            error_level: obj.required("errorLevel")?,
        })
    }
}

impl ToWire for AgvError {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("errorType", &self.error_type)?;
        w.optional("errorReferences", &self.error_references)?;
        w.optional("errorDescription", &self.error_description)?;
        w.optional_since(V2_1, "errorHint", &self.error_hint)?;
        w.required("errorLevel", &self.error_level)?;
        Ok(w.finish())
    }
}

/// Entry of `State.information`
#[derive(Debug, Clone, PartialEq)]
pub struct Information {
    pub info_type: String,
    pub info_references: Option<Vec<Reference>>,
    pub info_description: Option<String>,
    pub info_level: InfoLevel,
}

impl FromWire for Information {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            info_type: obj.required("infoType")?,
            info_references: obj.optional("infoReferences")?,
            info_description: obj.optional("infoDescription")?,
            info_level: obj.required("infoLevel")?,
        })
    }
}

impl ToWire for Information {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("infoType", &self.info_type)?;
        w.optional("infoReferences", &self.info_references)?;
        w.optional("infoDescription", &self.info_description)?;
        w.required("infoLevel", &self.info_level)?;
        Ok(w.finish())
    }
}

/// Load currently carried by the vehicle; every field is optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Load {
    pub load_id: Option<String>,
    pub load_type: Option<String>,
    pub load_position: Option<String>,
    pub bounding_box_reference: Option<BoundingBoxReference>,
    pub load_dimensions: Option<LoadDimensions>,
    pub weight: Option<f64>,
}

impl FromWire for Load {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            load_id: obj.optional("loadId")?,
            load_type: obj.optional("loadType")?,
            load_position: obj.optional("loadPosition")?,
            bounding_box_reference: obj.optional("boundingBoxReference")?,
            load_dimensions: obj.optional("loadDimensions")?,
            weight: obj.optional("weight")?,
        })
    }
}

impl ToWire for Load {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.optional("loadId", &self.load_id)?;
        w.optional("loadType", &self.load_type)?;
        w.optional("loadPosition", &self.load_position)?;
        w.optional("boundingBoxReference", &self.bounding_box_reference)?;
        w.optional("loadDimensions", &self.load_dimensions)?;
        w.optional("weight", &self.weight)?;
        Ok(w.finish())
    }
}
