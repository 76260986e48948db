//! Types shared by several message families
//!
//! The header block, actions and the small geometry records appear in more
//! than one message and keep the same shape in both protocol versions.

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::enums::BlockingType;
use crate::protocol::version::ProtocolVersion;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Header fields carried at the top level of every message
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub header_id: u32,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub manufacturer: String,
    pub serial_number: String,
}

impl Header {
    pub fn new<M: Into<String>, S: Into<String>>(
        header_id: u32,
        timestamp: DateTime<Utc>,
        version: ProtocolVersion,
        manufacturer: M,
        serial_number: S,
    ) -> Self {
        Self {
            header_id,
            timestamp,
            version: version.as_str().to_string(),
            manufacturer: manufacturer.into(),
            serial_number: serial_number.into(),
        }
    }

    pub(crate) fn read(obj: &WireObject<'_, '_>) -> CodecResult<Self> {
        Ok(Self {
            header_id: obj.required("headerId")?,
            timestamp: obj.required("timestamp")?,
            version: obj.required("version")?,
            manufacturer: obj.required("manufacturer")?,
            serial_number: obj.required("serialNumber")?,
        })
    }

    pub(crate) fn write(&self, w: &mut ObjectWriter<'_>) -> CodecResult<()> {
        w.required("headerId", &self.header_id)?;
        w.required("timestamp", &self.timestamp)?;
        w.required("version", &self.version)?;
        w.required("manufacturer", &self.manufacturer)?;
        w.required("serialNumber", &self.serial_number)?;
        Ok(())
    }
}

/// Key/value pair attached to an action; the value is opaque JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ActionParameter {
    pub key: String,
    pub value: Value,
}

impl ActionParameter {
    pub fn new<K: Into<String>>(key: K, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl FromWire for ActionParameter {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            key: obj.required("key")?,
            value: obj.required("value")?,
        })
    }
}

impl ToWire for ActionParameter {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("key", &self.key)?;
        w.required("value", &self.value)?;
        Ok(w.finish())
    }
}

/// Action attached to a node, an edge or sent as an instant action
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub action_id: String,
    pub action_type: String,
    pub action_description: Option<String>,
    pub blocking_type: BlockingType,
    pub action_parameters: Option<Vec<ActionParameter>>,
}

impl Action {
    pub fn new<I: Into<String>, T: Into<String>>(
        action_id: I,
        action_type: T,
        blocking_type: BlockingType,
    ) -> Self {
        Self {
            action_id: action_id.into(),
            action_type: action_type.into(),
            action_description: None,
            blocking_type,
            action_parameters: None,
        }
    }

    pub fn with_parameter<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.action_parameters
            .get_or_insert_with(Vec::new)
            .push(ActionParameter::new(key, value));
        self
    }

    /// Parameters in wire order; empty when none were sent
    pub fn parameters(&self) -> &[ActionParameter] {
        self.action_parameters.as_deref().unwrap_or(&[])
    }
}

impl FromWire for Action {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            action_id: obj.required("actionId")?,
            action_type: obj.required("actionType")?,
            action_description: obj.optional("actionDescription")?,
            blocking_type: obj.required("blockingType")?,
            action_parameters: obj.optional("actionParameters")?,
        })
    }
}

impl ToWire for Action {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("actionId", &self.action_id)?;
        w.required("actionType", &self.action_type)?;
        w.optional("actionDescription", &self.action_description)?;
        w.required("blockingType", &self.blocking_type)?;
        w.optional("actionParameters", &self.action_parameters)?;
        Ok(w.finish())
    }
}

/// Target position of an order node
#[derive(Debug, Clone, PartialEq)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub theta: Option<f64>,
    pub allowed_deviation_xy: Option<f64>,
    pub allowed_deviation_theta: Option<f64>,
    pub map_id: String,
    pub map_description: Option<String>,
}

impl FromWire for NodePosition {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            x: obj.required("x")?,
            y: obj.required("y")?,
            theta: obj.optional("theta")?,
            allowed_deviation_xy: obj.optional("allowedDeviationXY")?,
            allowed_deviation_theta: obj.optional("allowedDeviationTheta")?,
            map_id: obj.required("mapId")?,
            map_description: obj.optional("mapDescription")?,
        })
    }
}

impl ToWire for NodePosition {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("x", &self.x)?;
        w.required("y", &self.y)?;
        w.optional("theta", &self.theta)?;
        w.optional("allowedDeviationXY", &self.allowed_deviation_xy)?;
        w.optional("allowedDeviationTheta", &self.allowed_deviation_theta)?;
        w.required("mapId", &self.map_id)?;
        w.optional("mapDescription", &self.map_description)?;
        Ok(w.finish())
    }
}

/// Single NURBS control point; a missing weight means 1.0
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub weight: Option<f64>,
}

impl ControlPoint {
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

impl FromWire for ControlPoint {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            x: obj.required("x")?,
            y: obj.required("y")?,
            weight: obj.optional("weight")?,
        })
    }
}

impl ToWire for ControlPoint {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("x", &self.x)?;
        w.required("y", &self.y)?;
        w.optional("weight", &self.weight)?;
        Ok(w.finish())
    }
}

/// NURBS curve the vehicle should follow along an edge
///
/// `degree` is optional in 2.0.0 and required from 2.1.0 onwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub degree: Option<u32>,
    pub knot_vector: Vec<f64>,
    pub control_points: Vec<ControlPoint>,
}

impl FromWire for Trajectory {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            degree: obj.required_since(ProtocolVersion::V2_1_0, "degree")?,
            knot_vector: obj.required("knotVector")?,
            control_points: obj.required("controlPoints")?,
        })
    }
}

impl ToWire for Trajectory {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required_since(ProtocolVersion::V2_1_0, "degree", &self.degree)?;
        w.required("knotVector", &self.knot_vector)?;
        w.required("controlPoints", &self.control_points)?;
        Ok(w.finish())
    }
}

/// Current vehicle pose on a map
#[derive(Debug, Clone, PartialEq)]
pub struct AgvPosition {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub map_id: String,
    pub map_description: Option<String>,
    pub position_initialized: bool,
    pub localization_score: Option<f64>,
    pub deviation_range: Option<f64>,
}

impl FromWire for AgvPosition {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            x: obj.required("x")?,
            y: obj.required("y")?,
            theta: obj.required("theta")?,
            map_id: obj.required("mapId")?,
            map_description: obj.optional("mapDescription")?,
            position_initialized: obj.required("positionInitialized")?,
            localization_score: obj.optional("localizationScore")?,
            deviation_range: obj.optional("deviationRange")?,
        })
    }
}

impl ToWire for AgvPosition {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("x", &self.x)?;
        w.required("y", &self.y)?;
        w.required("theta", &self.theta)?;
        w.required("mapId", &self.map_id)?;
        w.optional("mapDescription", &self.map_description)?;
        w.required("positionInitialized", &self.position_initialized)?;
        w.optional("localizationScore", &self.localization_score)?;
        w.optional("deviationRange", &self.deviation_range)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Velocity {
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub omega: Option<f64>,
}

impl FromWire for Velocity {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            vx: obj.optional("vx")?,
            vy: obj.optional("vy")?,
            omega: obj.optional("omega")?,
        })
    }
}

impl ToWire for Velocity {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.optional("vx", &self.vx)?;
        w.optional("vy", &self.vy)?;
        w.optional("omega", &self.omega)?;
        Ok(w.finish())
    }
}

/// Reference point of a load's bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxReference {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub theta: Option<f64>,
}

impl FromWire for BoundingBoxReference {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            x: obj.required("x")?,
            y: obj.required("y")?,
            z: obj.required("z")?,
            theta: obj.optional("theta")?,
        })
    }
}

impl ToWire for BoundingBoxReference {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("x", &self.x)?;
        w.required("y", &self.y)?;
        w.required("z", &self.z)?;
        w.optional("theta", &self.theta)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadDimensions {
    pub length: f64,
    pub width: f64,
    pub height: Option<f64>,
}

impl FromWire for LoadDimensions {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            length: obj.required("length")?,
            width: obj.required("width")?,
            height: obj.optional("height")?,
        })
    }
}

impl ToWire for LoadDimensions {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("length", &self.length)?;
        w.required("width", &self.width)?;
        w.optional("height", &self.height)?;
        Ok(w.finish())
    }
}
