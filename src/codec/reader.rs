//! Version-aware decoding of JSON values into typed messages
//!
//! Every schema type implements [`FromWire`]. Objects are read through
//! [`WireObject`], which applies the field rules shared by all messages:
//!
//! - a required field that is absent fails with `MissingField`
//! - a required field that is `null` fails with `UnexpectedType`
//! - an optional field that is absent or `null` decodes to `None`
//! - a field introduced in a later version is ignored by older schemas
//! - unknown fields are ignored

use super::path::Cursor;
use super::timestamp::parse_timestamp;
use crate::error::{CodecError, CodecResult};
use crate::protocol::version::ProtocolVersion;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// JSON type name used in `UnexpectedType` errors
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build an `UnexpectedType` error for the value at the cursor
pub fn unexpected(at: &Cursor<'_>, expected: &'static str, found: &Value) -> CodecError {
    CodecError::UnexpectedType {
        path: at.path(),
        expected,
        found: json_type(found),
    }
}

/// Decode a value of this type from JSON under the cursor's protocol version
pub trait FromWire: Sized {
    /// Human-readable name of the expected JSON shape
    const EXPECTED: &'static str;

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self>;
}

impl FromWire for String {
    const EXPECTED: &'static str = "string";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))
    }
}

impl FromWire for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))
    }
}

impl FromWire for u32 {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))
    }
}

impl FromWire for f64 {
    const EXPECTED: &'static str = "number";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        value
            .as_f64()
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))
    }
}

impl FromWire for DateTime<Utc> {
    const EXPECTED: &'static str = "timestamp string";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let raw = value
            .as_str()
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))?;
        parse_timestamp(raw).ok_or_else(|| CodecError::InvalidTimestamp(at.path(), raw.to_string()))
    }
}

/// Opaque values are carried through untouched
impl FromWire for Value {
    const EXPECTED: &'static str = "JSON value";

    fn from_wire(value: &Value, _at: Cursor<'_>) -> CodecResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| at.index(i, |at| T::from_wire(item, at)))
            .collect()
    }
}

/// Field reader over a JSON object
pub struct WireObject<'v, 'a> {
    map: &'v Map<String, Value>,
    at: Cursor<'a>,
}

impl<'v, 'a> WireObject<'v, 'a> {
    pub fn new(value: &'v Value, at: Cursor<'a>) -> CodecResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, at }),
            other => Err(unexpected(&at, "object", other)),
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.at.version()
    }

    pub fn cursor(&self) -> Cursor<'a> {
        self.at
    }

    pub fn required<T: FromWire>(&self, name: &'static str) -> CodecResult<T> {
        match self.map.get(name) {
            None => Err(CodecError::MissingField(self.at.child_path(name))),
            Some(Value::Null) => Err(CodecError::UnexpectedType {
                path: self.at.child_path(name),
                expected: T::EXPECTED,
                found: "null",
            }),
            Some(value) => self.at.field(name, |at| T::from_wire(value, at)),
        }
    }

    pub fn optional<T: FromWire>(&self, name: &'static str) -> CodecResult<Option<T>> {
        match self.map.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.at.field(name, |at| T::from_wire(value, at)).map(Some),
        }
    }

    /// Optional field that only exists from `since` onwards; ignored before
    pub fn optional_since<T: FromWire>(
        &self,
        since: ProtocolVersion,
        name: &'static str,
    ) -> CodecResult<Option<T>> {
        if self.version() < since {
            return Ok(None);
        }
        self.optional(name)
    }

    /// Field that is optional before `since` and required from `since` onwards
    pub fn required_since<T: FromWire>(
        &self,
        since: ProtocolVersion,
        name: &'static str,
    ) -> CodecResult<Option<T>> {
        if self.version() < since {
            return self.optional(name);
        }
        self.required(name).map(Some)
    }

    /// Field that is required before `until` and optional from `until` onwards
    pub fn required_until<T: FromWire>(
        &self,
        until: ProtocolVersion,
        name: &'static str,
    ) -> CodecResult<Option<T>> {
        if self.version() < until {
            return self.required(name).map(Some);
        }
        self.optional(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Cursor<'static> {
        Cursor::root(ProtocolVersion::V2_0_0)
    }

    #[test]
    fn test_missing_required_field() {
        let doc = json!({});
        let obj = WireObject::new(&doc, root()).unwrap();
        assert_eq!(
            obj.required::<u32>("headerId"),
            Err(CodecError::MissingField("headerId".to_string()))
        );
    }

    #[test]
    fn test_null_required_field_is_type_error() {
        let doc = json!({"orderId": null});
        let obj = WireObject::new(&doc, root()).unwrap();
        assert_eq!(
            obj.required::<String>("orderId"),
            Err(CodecError::UnexpectedType {
                path: "orderId".to_string(),
                expected: "string",
                found: "null",
            })
        );
    }

    #[test]
    fn test_null_optional_field_is_absent() {
        let doc = json!({"zoneSetId": null});
        let obj = WireObject::new(&doc, root()).unwrap();
        assert_eq!(obj.optional::<String>("zoneSetId").unwrap(), None);
        assert_eq!(obj.optional::<String>("other").unwrap(), None);
    }

    #[test]
    fn test_u32_rejects_fractions_negatives_and_overflow() {
        for bad in [json!(1.5), json!(-1), json!(4_294_967_296u64), json!("7")] {
            let result = u32::from_wire(&bad, root());
            assert!(
                matches!(result, Err(CodecError::UnexpectedType { .. })),
                "{bad} should not decode as u32"
            );
        }
        assert_eq!(u32::from_wire(&json!(4_294_967_295u64), root()).unwrap(), u32::MAX);
    }

    #[test]
    fn test_f64_accepts_integers() {
        assert_eq!(f64::from_wire(&json!(3), root()).unwrap(), 3.0);
    }

    #[test]
    fn test_array_errors_carry_index() {
        let doc = json!({"nodes": [1, 2, "x"]});
        let obj = WireObject::new(&doc, root()).unwrap();
        assert_eq!(
            obj.required::<Vec<u32>>("nodes"),
            Err(CodecError::UnexpectedType {
                path: "nodes[2]".to_string(),
                expected: "unsigned integer",
                found: "string",
            })
        );
    }

    #[test]
    fn test_optional_since_ignores_field_in_older_version() {
        let doc = json!({"maps": "not-an-array"});
        let obj = WireObject::new(&doc, root()).unwrap();
        let maps: Option<Vec<String>> = obj.optional_since(ProtocolVersion::V2_1_0, "maps").unwrap();
        assert_eq!(maps, None);
    }

    #[test]
    fn test_required_since_and_until() {
        let doc = json!({});
        let v20 = WireObject::new(&doc, root()).unwrap();
        let v21 = WireObject::new(&doc, Cursor::root(ProtocolVersion::V2_1_0)).unwrap();

        assert_eq!(
            v20.required_since::<f64>(ProtocolVersion::V2_1_0, "degree").unwrap(),
            None
        );
        assert!(v21
            .required_since::<f64>(ProtocolVersion::V2_1_0, "degree")
            .is_err());

        assert!(v20
            .required_until::<Vec<u32>>(ProtocolVersion::V2_1_0, "actionStates")
            .is_err());
        assert_eq!(
            v21.required_until::<Vec<u32>>(ProtocolVersion::V2_1_0, "actionStates")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_non_object_root() {
        let doc = json!([1, 2]);
        assert!(matches!(
            WireObject::new(&doc, root()),
            Err(CodecError::UnexpectedType {
                expected: "object",
                found: "array",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_timestamp_reports_path() {
        let doc = json!({"timestamp": "2024-05-01T12:00:00"});
        let obj = WireObject::new(&doc, root()).unwrap();
        assert_eq!(
            obj.required::<DateTime<Utc>>("timestamp"),
            Err(CodecError::InvalidTimestamp(
                "timestamp".to_string(),
                "2024-05-01T12:00:00".to_string()
            ))
        );
    }
}
