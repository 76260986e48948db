//! Connection message (2.1.0): last-will style online/offline notification

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::{CodecError, CodecResult};
use crate::protocol::common::Header;
use crate::protocol::enums::ConnectionState;
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub header: Header,
    pub connection_state: ConnectionState,
}

impl Connection {
    pub const SINCE: ProtocolVersion = ProtocolVersion::V2_1_0;

    pub fn new(header: Header, connection_state: ConnectionState) -> Self {
        Self {
            header,
            connection_state,
        }
    }
}

fn require_supported(at: &Cursor<'_>) -> CodecResult<()> {
    if at.version() < Connection::SINCE {
        return Err(CodecError::unsupported_version(at.version().as_str()));
    }
    Ok(())
}

impl FromWire for Connection {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        require_supported(&at)?;
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header: Header::read(&obj)?,
            connection_state: obj.required("connectionState")?,
        })
    }
}

impl ToWire for Connection {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        require_supported(&at)?;
        let mut w = ObjectWriter::new(at);
        self.header.write(&mut w)?;
        w.required("connectionState", &self.connection_state)?;
        Ok(w.finish())
    }
}
