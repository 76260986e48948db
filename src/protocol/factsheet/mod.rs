//! Factsheet: static capability description of a vehicle type
//!
//! The 2.0.0 and 2.1.0 factsheets differ in requiredness and in whether most
//! classifications are free strings or closed enums, so each family has its
//! own module. Leaf records that did not change are shared here.

/// Declares a plain record whose fields map one-to-one onto wire names
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $mode:ident $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty ),*
        }

        impl $crate::codec::reader::FromWire for $name {
            const EXPECTED: &'static str = "object";

            fn from_wire(
                value: &serde_json::Value,
                at: $crate::codec::path::Cursor<'_>,
            ) -> $crate::error::CodecResult<Self> {
                let obj = $crate::codec::reader::WireObject::new(value, at)?;
                Ok(Self {
                    $( $field: obj.$mode($wire)? ),*
                })
            }
        }

        impl $crate::codec::writer::ToWire for $name {
            fn to_wire(
                &self,
                at: $crate::codec::path::Cursor<'_>,
            ) -> $crate::error::CodecResult<serde_json::Value> {
                let mut w = $crate::codec::writer::ObjectWriter::new(at);
                $( w.$mode($wire, &self.$field)?; )*
                Ok(w.finish())
            }
        }
    };
}

pub mod v2_0;
pub mod v2_1;

use crate::codec::path::Cursor;
use crate::codec::reader::FromWire;
use crate::codec::writer::ToWire;
use crate::error::{CodecError, CodecResult};
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;
use std::fmt;

wire_record! {
    /// Message timing constraints in seconds
    pub struct Timing {
        min_order_interval: f64 => required "minOrderInterval",
        min_state_interval: f64 => required "minStateInterval",
        default_state_interval: Option<f64> => optional "defaultStateInterval",
        visualization_interval: Option<f64> => optional "visualizationInterval",
    }
}

wire_record! {
    /// 3D envelope; `data` is an opaque, format-specific JSON value
    pub struct Envelope3D {
        set: String => required "set",
        format: String => required "format",
        data: Option<Value> => optional "data",
        url: Option<String> => optional "url",
        description: Option<String> => optional "description",
    }
}

/// Array-valued message fields a factsheet may bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLimit {
    OrderNodes,
    OrderEdges,
    NodeActions,
    EdgeActions,
    ActionParameters,
    InstantActions,
    TrajectoryKnotVector,
    TrajectoryControlPoints,
    StateNodeStates,
    StateEdgeStates,
    StateLoads,
    StateActionStates,
    StateErrors,
    StateInformation,
    ErrorReferences,
    InfoReferences,
}

impl ArrayLimit {
    /// Key used in `protocolLimits.maxArrayLens`
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayLimit::OrderNodes => "order.nodes",
            ArrayLimit::OrderEdges => "order.edges",
            ArrayLimit::NodeActions => "node.actions",
            ArrayLimit::EdgeActions => "edge.actions",
            ArrayLimit::ActionParameters => "actions.actionsParameters",
            ArrayLimit::InstantActions => "instantActions",
            ArrayLimit::TrajectoryKnotVector => "trajectory.knotVector",
            ArrayLimit::TrajectoryControlPoints => "trajectory.controlPoints",
            ArrayLimit::StateNodeStates => "state.nodeStates",
            ArrayLimit::StateEdgeStates => "state.edgeStates",
            ArrayLimit::StateLoads => "state.loads",
            ArrayLimit::StateActionStates => "state.actionStates",
            ArrayLimit::StateErrors => "state.errors",
            ArrayLimit::StateInformation => "state.information",
            ArrayLimit::ErrorReferences => "error.errorReferences",
            ArrayLimit::InfoReferences => "information.infoReferences",
        }
    }
}

impl fmt::Display for ArrayLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A factsheet of either protocol family
#[derive(Debug, Clone, PartialEq)]
pub enum Factsheet {
    V2_0_0(v2_0::Factsheet),
    V2_1_0(v2_1::Factsheet),
}

impl Factsheet {
    /// Protocol family this factsheet belongs to
    pub fn version(&self) -> ProtocolVersion {
        match self {
            Factsheet::V2_0_0(_) => ProtocolVersion::V2_0_0,
            Factsheet::V2_1_0(_) => ProtocolVersion::V2_1_0,
        }
    }

    pub fn manufacturer(&self) -> &str {
        match self {
            Factsheet::V2_0_0(f) => &f.header.manufacturer,
            Factsheet::V2_1_0(f) => &f.manufacturer,
        }
    }

    pub fn serial_number(&self) -> &str {
        match self {
            Factsheet::V2_0_0(f) => &f.header.serial_number,
            Factsheet::V2_1_0(f) => &f.serial_number,
        }
    }

    /// Version string carried in the factsheet itself
    pub fn declared_version(&self) -> &str {
        match self {
            Factsheet::V2_0_0(f) => &f.header.version,
            Factsheet::V2_1_0(f) => &f.version,
        }
    }

    pub fn timing(&self) -> &Timing {
        match self {
            Factsheet::V2_0_0(f) => &f.protocol_limits.timing,
            Factsheet::V2_1_0(f) => &f.protocol_limits.timing,
        }
    }

    /// Maximum length of an array-valued field, when the factsheet bounds it
    pub fn max_array_len(&self, field: ArrayLimit) -> Option<u32> {
        match self {
            Factsheet::V2_0_0(f) => f.protocol_limits.max_array_lens.get(field),
            Factsheet::V2_1_0(f) => f.protocol_limits.max_array_lens.get(field),
        }
    }

    /// Maximum length of id strings, when the factsheet bounds it
    pub fn max_id_len(&self) -> Option<u32> {
        match self {
            Factsheet::V2_0_0(f) => f.protocol_limits.max_string_lens.id_len,
            Factsheet::V2_1_0(f) => f.protocol_limits.max_string_lens.id_len,
        }
    }

    pub fn as_v2_0(&self) -> Option<&v2_0::Factsheet> {
        match self {
            Factsheet::V2_0_0(f) => Some(f),
            Factsheet::V2_1_0(_) => None,
        }
    }

    pub fn as_v2_1(&self) -> Option<&v2_1::Factsheet> {
        match self {
            Factsheet::V2_1_0(f) => Some(f),
            Factsheet::V2_0_0(_) => None,
        }
    }
}

impl From<v2_0::Factsheet> for Factsheet {
    fn from(factsheet: v2_0::Factsheet) -> Self {
        Factsheet::V2_0_0(factsheet)
    }
}

impl From<v2_1::Factsheet> for Factsheet {
    fn from(factsheet: v2_1::Factsheet) -> Self {
        Factsheet::V2_1_0(factsheet)
    }
}

impl FromWire for Factsheet {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        match at.version() {
            ProtocolVersion::V2_0_0 => v2_0::Factsheet::from_wire(value, at).map(Factsheet::V2_0_0),
            ProtocolVersion::V2_1_0 => v2_1::Factsheet::from_wire(value, at).map(Factsheet::V2_1_0),
        }
    }
}

impl ToWire for Factsheet {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        match (self, at.version()) {
            (Factsheet::V2_0_0(f), ProtocolVersion::V2_0_0) => f.to_wire(at),
            (Factsheet::V2_1_0(f), ProtocolVersion::V2_1_0) => f.to_wire(at),
            (_, other) => Err(CodecError::unsupported_version(other.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timing_record() {
        let raw = json!({"minOrderInterval": 1.0, "minStateInterval": 0.5});
        let timing = Timing::from_wire(&raw, Cursor::root(ProtocolVersion::V2_0_0)).unwrap();
        assert_eq!(timing.default_state_interval, None);
        assert_eq!(timing.to_wire(Cursor::root(ProtocolVersion::V2_0_0)).unwrap(), raw);
    }

    #[test]
    fn test_envelope_data_is_opaque() {
        let raw = json!({"set": "normal", "format": "DXF", "data": {"layers": [1, {"a": null}]}});
        let envelope = Envelope3D::from_wire(&raw, Cursor::root(ProtocolVersion::V2_1_0)).unwrap();
        assert_eq!(envelope.to_wire(Cursor::root(ProtocolVersion::V2_1_0)).unwrap(), raw);
    }

    #[test]
    fn test_array_limit_keys() {
        assert_eq!(ArrayLimit::OrderNodes.as_str(), "order.nodes");
        assert_eq!(
            ArrayLimit::ActionParameters.to_string(),
            "actions.actionsParameters"
        );
    }
}
