//! Factsheet schema of protocol 2.0.0
//!
//! Classifications such as the kinematic type, localization and navigation
//! types, action scopes and value data types are free strings in this
//! version; only `agvClass` is a closed enumeration.

use super::{ArrayLimit, Envelope3D, Timing};
use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{BoundingBoxReference, Header, LoadDimensions};
use crate::protocol::enums::AgvClass;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Factsheet {
    pub header: Header,
    pub type_specification: TypeSpecification,
    pub physical_parameters: PhysicalParameters,
    pub protocol_limits: ProtocolLimits,
    pub protocol_features: ProtocolFeatures,
    pub agv_geometry: AgvGeometry,
    pub load_specification: LoadSpecification,
    /// Vendor-defined localization settings, carried verbatim
    pub localization_parameters: Option<Value>,
}

impl FromWire for Factsheet {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header: Header::read(&obj)?,
            type_specification: obj.required("typeSpecification")?,
            physical_parameters: obj.required("physicalParameters")?,
            protocol_limits: obj.required("protocolLimits")?,
            protocol_features: obj.required("protocolFeatures")?,
            agv_geometry: obj.required("agvGeometry")?,
            load_specification: obj.required("loadSpecification")?,
            localization_parameters: obj.optional("localizationParameters")?,
        })
    }
}

impl ToWire for Factsheet {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        self.header.write(&mut w)?;
        w.required("typeSpecification", &self.type_specification)?;
        w.required("physicalParameters", &self.physical_parameters)?;
        w.required("protocolLimits", &self.protocol_limits)?;
        w.required("protocolFeatures", &self.protocol_features)?;
        w.required("agvGeometry", &self.agv_geometry)?;
        w.required("loadSpecification", &self.load_specification)?;
        w.optional("localizationParameters", &self.localization_parameters)?;
        Ok(w.finish())
    }
}

wire_record! {
    pub struct TypeSpecification {
        series_name: String => required "seriesName",
        series_description: Option<String> => optional "seriesDescription",
        agv_kinematic: String => required "agvKinematic",
        agv_class: AgvClass => required "agvClass",
        max_load_mass: f64 => required "maxLoadMass",
        localization_types: Vec<String> => required "localizationTypes",
        navigation_types: Vec<String> => required "navigationTypes",
    }
}

wire_record! {
    pub struct PhysicalParameters {
        speed_min: f64 => required "speedMin",
        speed_max: f64 => required "speedMax",
        acceleration_max: f64 => required "accelerationMax",
        deceleration_max: f64 => required "decelerationMax",
        height_min: f64 => required "heightMin",
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
        id_len: Option<u32> => optional "idLen",
        enum_len: Option<u32> => optional "enumLen",
    }
}

wire_record! {
    pub struct MaxArrayLens {
        order_nodes: u32 => required "order.nodes",
        order_edges: u32 => required "order.edges",
        state_loads: u32 => required "state.loads",
    }
}

impl MaxArrayLens {
    /// Only three arrays are bounded in this version
    pub fn get(&self, field: ArrayLimit) -> Option<u32> {
        match field {
            ArrayLimit::OrderNodes => Some(self.order_nodes),
            ArrayLimit::OrderEdges => Some(self.order_edges),
            ArrayLimit::StateLoads => Some(self.state_loads),
            _ => None,
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
        support: String => required "support",
        description: Option<String> => optional "description",
    }
}

wire_record! {
    /// Action the vehicle type can execute
    pub struct AgvAction {
        action_type: String => required "actionType",
        action_description: Option<String> => optional "actionDescription",
        action_scopes: Vec<String> => required "actionScopes",
        action_parameters: Option<Vec<ActionParameterSpec>> => optional "actionParameters",
        result_description: Option<String> => optional "resultDescription",
        blocking_types: Option<Vec<String>> => optional "blockingTypes",
    }
}

wire_record! {
    /// Declared parameter of a supported action
    pub struct ActionParameterSpec {
        key: String => required "key",
        value_data_type: String => required "valueDataType",
        description: Option<String> => optional "description",
        is_optional: Option<bool> => optional "isOptional",
    }
}

wire_record! {
    pub struct AgvGeometry {
        wheel_definitions: Vec<WheelDefinition> => required "wheelDefinitions",
        envelopes2d: Vec<Envelope2D> => required "envelopes2d",
        envelopes3d: Option<Vec<Envelope3D>> => optional "envelopes3d",
    }
}

wire_record! {
    pub struct WheelDefinition {
        wheel_type: String => required "type",
        is_active_driven: bool => required "isActiveDriven",
        is_active_steered: bool => required "isActiveSteered",
        position: Position => required "position",
        diameter: f64 => required "diameter",
        width: f64 => required "width",
        center_displacement: Option<f64> => optional "centerDisplacement",
        constraints: Option<String> => optional "constraints",
    }
}

wire_record! {
    pub struct Envelope2D {
        set: String => required "set",
        polygon_points: Vec<Position> => required "polygonPoints",
        description: Option<String> => optional "description",
    }
}

wire_record! {
    /// Map-referenced position used by the 2.0.0 geometry records
    pub struct Position {
        x: f64 => required "x",
        y: f64 => required "y",
        z: Option<f64> => optional "z",
        theta: Option<f64> => optional "theta",
        allowed_deviation_xy: Option<f64> => optional "allowedDeviationXY",
        allowed_deviation_theta: Option<f64> => optional "allowedDeviationTheta",
        map_id: String => required "mapId",
        map_description: Option<String> => optional "mapDescription",
    }
}

wire_record! {
    pub struct LoadSpecification {
        load_positions: Vec<String> => required "loadPositions",
        load_sets: Vec<LoadSet> => required "loadSets",
    }
}

wire_record! {
    pub struct LoadSet {
        set_name: String => required "setName",
        load_type: String => required "loadType",
        load_positions: Vec<String> => required "loadPositions",
        bounding_box_reference: BoundingBoxReference => required "boundingBoxReference",
        load_dimensions: LoadDimensions => required "loadDimensions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::protocol::version::ProtocolVersion;
    use serde_json::json;

    fn at() -> Cursor<'static> {
        Cursor::root(ProtocolVersion::V2_0_0)
    }

    #[test]
    fn test_free_string_kinematic() {
        let raw = json!({
            "seriesName": "S1",
            "agvKinematic": "SOMETHING_CUSTOM",
            "agvClass": "CARRIER",
            "maxLoadMass": 500,
            "localizationTypes": ["NATURAL", "VENDOR_SLAM"],
            "navigationTypes": ["AUTONOMOUS"]
        });
        let spec = TypeSpecification::from_wire(&raw, at()).unwrap();
        assert_eq!(spec.agv_kinematic, "SOMETHING_CUSTOM");
        assert_eq!(spec.agv_class, AgvClass::Carrier);
        assert_eq!(spec.max_load_mass, 500.0);
    }

    #[test]
    fn test_agv_class_is_closed() {
        let raw = json!({
            "seriesName": "S1",
            "agvKinematic": "DIFF",
            "agvClass": "SPACESHIP",
            "maxLoadMass": 500,
            "localizationTypes": [],
            "navigationTypes": []
        });
        assert_eq!(
            TypeSpecification::from_wire(&raw, at()),
            Err(CodecError::InvalidEnumValue(
                "agvClass".to_string(),
                "SPACESHIP".to_string()
            ))
        );
    }

    #[test]
    fn test_max_array_lens_required() {
        let raw = json!({"order.nodes": 10, "order.edges": 9});
        assert_eq!(
            MaxArrayLens::from_wire(&raw, at()),
            Err(CodecError::MissingField("state.loads".to_string()))
        );
    }

    #[test]
    fn test_max_array_lens_lookup() {
        let lens = MaxArrayLens {
            order_nodes: 10,
            order_edges: 9,
            state_loads: 1,
        };
        assert_eq!(lens.get(ArrayLimit::OrderEdges), Some(9));
        assert_eq!(lens.get(ArrayLimit::NodeActions), None);
    }
}
