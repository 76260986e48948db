//! Visualization message: high-rate position updates for display only
//!
//! Unlike every other message the header fields are all optional here.

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{AgvPosition, Velocity};
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visualization {
    pub header_id: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
    pub version: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub agv_position: Option<AgvPosition>,
    pub velocity: Option<Velocity>,
}

impl FromWire for Visualization {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header_id: obj.optional("headerId")?,
            timestamp: obj.optional("timestamp")?,
            version: obj.optional("version")?,
            manufacturer: obj.optional("manufacturer")?,
            serial_number: obj.optional("serialNumber")?,
            agv_position: obj.optional("agvPosition")?,
            velocity: obj.optional("velocity")?,
        })
    }
}

impl ToWire for Visualization {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.optional("headerId", &self.header_id)?;
        w.optional("timestamp", &self.timestamp)?;
        w.optional("version", &self.version)?;
        w.optional("manufacturer", &self.manufacturer)?;
        w.optional("serialNumber", &self.serial_number)?;
        w.optional("agvPosition", &self.agv_position)?;
        w.optional("velocity", &self.velocity)?;
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::version::ProtocolVersion;
    use serde_json::json;

    #[test]
    fn test_empty_visualization_is_valid() {
        let vis = Visualization::from_wire(&json!({}), Cursor::root(ProtocolVersion::V2_0_0)).unwrap();
        assert_eq!(vis, Visualization::default());
        assert_eq!(
            vis.to_wire(Cursor::root(ProtocolVersion::V2_0_0)).unwrap(),
            json!({})
        );
    }
}
