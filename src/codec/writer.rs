//! Version-aware encoding of typed messages into JSON values
//!
//! Absent optional fields are omitted rather than written as `null`. Writing
//! a populated field that the target version does not define is an error,
//! never a silent drop.

use super::path::Cursor;
use super::timestamp::format_timestamp;
use crate::error::{CodecError, CodecResult};
use crate::protocol::version::ProtocolVersion;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

/// Encode a value of this type to JSON under the cursor's protocol version
pub trait ToWire {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value>;
}

impl ToWire for String {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl ToWire for str {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl ToWire for bool {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(Value::Bool(*self))
    }
}

impl ToWire for u32 {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(Value::Number((*self).into()))
    }
}

impl ToWire for f64 {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| CodecError::NonFiniteNumber(at.path()))
    }
}

impl ToWire for DateTime<Utc> {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(Value::String(format_timestamp(self)))
    }
}

impl ToWire for Value {
    fn to_wire(&self, _at: Cursor<'_>) -> CodecResult<Value> {
        Ok(self.clone())
    }
}

impl<T: ToWire> ToWire for [T] {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        self.iter()
            .enumerate()
            .map(|(i, item)| at.index(i, |at| item.to_wire(at)))
            .collect::<CodecResult<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: ToWire> ToWire for Vec<T> {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        self.as_slice().to_wire(at)
    }
}

/// Field writer building a JSON object
pub struct ObjectWriter<'a> {
    map: Map<String, Value>,
    at: Cursor<'a>,
}

impl<'a> ObjectWriter<'a> {
    pub fn new(at: Cursor<'a>) -> Self {
        Self {
            map: Map::new(),
            at,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.at.version()
    }

    pub fn required<T: ToWire + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> CodecResult<&mut Self> {
        let encoded = self.at.field(name, |at| value.to_wire(at))?;
        self.map.insert(name.to_string(), encoded);
        Ok(self)
    }

    pub fn optional<T: ToWire>(
        &mut self,
        name: &'static str,
        value: &Option<T>,
    ) -> CodecResult<&mut Self> {
        match value {
            Some(inner) => self.required(name, inner),
            None => Ok(self),
        }
    }

    /// Optional field that only exists from `since` onwards
    pub fn optional_since<T: ToWire>(
        &mut self,
        since: ProtocolVersion,
        name: &'static str,
        value: &Option<T>,
    ) -> CodecResult<&mut Self> {
        if self.version() < since && value.is_some() {
            return Err(self.incompatible(name));
        }
        self.optional(name, value)
    }

    /// Field that is optional before `since` and required from `since` onwards
    pub fn required_since<T: ToWire>(
        &mut self,
        since: ProtocolVersion,
        name: &'static str,
        value: &Option<T>,
    ) -> CodecResult<&mut Self> {
        match value {
            None if self.version() >= since => {
                Err(CodecError::MissingField(self.at.child_path(name)))
            }
            _ => self.optional(name, value),
        }
    }

    /// Field that is required before `until` and optional from `until` onwards
    pub fn required_until<T: ToWire>(
        &mut self,
        until: ProtocolVersion,
        name: &'static str,
        value: &Option<T>,
    ) -> CodecResult<&mut Self> {
        match value {
            None if self.version() < until => {
                Err(CodecError::MissingField(self.at.child_path(name)))
            }
            _ => self.optional(name, value),
        }
    }

    /// Error for a populated field the target version cannot carry
    pub fn incompatible(&self, name: &'static str) -> CodecError {
        CodecError::IncompatibleField {
            path: self.at.child_path(name),
            version: self.version().to_string(),
        }
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}
