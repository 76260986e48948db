//! InstantActions message: actions executed immediately, outside any order

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{Action, Header};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct InstantActions {
    pub header: Header,
    pub actions: Vec<Action>,
}

impl InstantActions {
    pub fn new(header: Header, actions: Vec<Action>) -> Self {
        Self { header, actions }
    }
}

impl FromWire for InstantActions {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header: Header::read(&obj)?,
            actions: obj.required("actions")?,
        })
    }
}

impl ToWire for InstantActions {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        self.header.write(&mut w)?;
        w.required("actions", &self.actions)?;
        Ok(w.finish())
    }
}
