//! String-encoded enumerations with per-version value tables
//!
//! Enum values travel as exact, case-sensitive strings. Each variant may be
//! restricted to a subset of protocol versions; a string that names a
//! variant the active version does not define is rejected like any other
//! unknown value.

use crate::codec::path::Cursor;
use crate::codec::reader::{unexpected, FromWire};
use crate::codec::writer::ToWire;
use crate::error::{CodecError, CodecResult};
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;
use std::fmt;

/// Closed enumeration with a fixed wire string per variant
pub trait WireEnum: Sized + Copy + 'static {
    /// Schema name, used in log output
    const NAME: &'static str;

    fn variants() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn available_in(&self, version: ProtocolVersion) -> bool;

    /// Exact-match lookup restricted to the variants of `version`
    fn parse(raw: &str, version: ProtocolVersion) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.available_in(version) && v.as_str() == raw)
    }
}

fn decode_enum<E: WireEnum>(value: &Value, at: Cursor<'_>) -> CodecResult<E> {
    let raw = value
        .as_str()
        .ok_or_else(|| unexpected(&at, "enum string", value))?;
    E::parse(raw, at.version())
        .ok_or_else(|| CodecError::InvalidEnumValue(at.path(), raw.to_string()))
}

fn encode_enum<E: WireEnum>(variant: &E, at: Cursor<'_>) -> CodecResult<Value> {
    if !variant.available_in(at.version()) {
        return Err(CodecError::InvalidEnumValue(
            at.path(),
            variant.as_str().to_string(),
        ));
    }
    Ok(Value::String(variant.as_str().to_string()))
}

macro_rules! wire_enum {
    (@versions $version:ident) => {
        true
    };
    (@versions $version:ident, $($allowed:ident),+) => {
        matches!($version, $(ProtocolVersion::$allowed)|+)
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal $(in [$($allowed:ident),+])?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn variants() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn available_in(&self, version: ProtocolVersion) -> bool {
                match self {
                    $($name::$variant => wire_enum!(@versions version $(, $($allowed),+)?)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromWire for $name {
            const EXPECTED: &'static str = "enum string";

            fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
                decode_enum(value, at)
            }
        }

        impl ToWire for $name {
            fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
                encode_enum(self, at)
            }
        }
    };
}

// ========== Messages ==========

wire_enum! {
    /// How an action interacts with driving and other actions
    pub enum BlockingType {
        None => "NONE",
        Soft => "SOFT",
        Hard => "HARD",
    }
}

wire_enum! {
    pub enum ActionStatus {
        Waiting => "WAITING",
        Initializing => "INITIALIZING",
        Running => "RUNNING",
        /// Removed in 2.1.0
        Paused => "PAUSED" in [V2_0_0],
        Finished => "FINISHED",
        Failed => "FAILED",
    }
}

wire_enum! {
    pub enum ErrorLevel {
        Warning => "WARNING",
        Fatal => "FATAL",
    }
}

wire_enum! {
    pub enum InfoLevel {
        Info => "INFO",
        Debug => "DEBUG",
    }
}

wire_enum! {
    /// Acknowledge type of an active emergency stop
    pub enum EStop {
        AutoAck => "AUTOACK",
        Manual => "MANUAL",
        Remote => "REMOTE",
        None => "NONE",
    }
}

wire_enum! {
    pub enum ConnectionState {
        Online => "ONLINE",
        Offline => "OFFLINE",
        ConnectionBroken => "CONNECTIONBROKEN",
    }
}

// ========== Factsheet ==========

wire_enum! {
    pub enum AgvKinematic {
        Diff => "DIFF",
        Omni => "OMNI",
        ThreeWheel => "THREEWHEEL",
    }
}

wire_enum! {
    pub enum AgvClass {
        Forklift => "FORKLIFT",
        Conveyor => "CONVEYOR",
        Tugger => "TUGGER",
        Carrier => "CARRIER",
    }
}

wire_enum! {
    pub enum LocalizationType {
        Natural => "NATURAL",
        Reflector => "REFLECTOR",
        Rfid => "RFID",
        Dmc => "DMC",
        Spot => "SPOT",
        Grid => "GRID",
    }
}

wire_enum! {
    pub enum NavigationType {
        PhysicalLineGuided => "PHYSICAL_LINE_GUIDED",
        VirtualLineGuided => "VIRTUAL_LINE_GUIDED",
        Autonomous => "AUTONOMOUS",
    }
}

wire_enum! {
    pub enum ActionScope {
        Instant => "INSTANT",
        Node => "NODE",
        Edge => "EDGE",
    }
}

wire_enum! {
    pub enum SupportType {
        Supported => "SUPPORTED",
        Required => "REQUIRED",
    }
}

wire_enum! {
    pub enum ValueDataType {
        Bool => "BOOL",
        Number => "NUMBER",
        Integer => "INTEGER",
        Float => "FLOAT",
        String => "STRING",
        Object => "OBJECT",
        Array => "ARRAY",
    }
}

wire_enum! {
    pub enum WheelType {
        Drive => "DRIVE",
        Caster => "CASTER",
        Fixed => "FIXED",
        Mecanum => "MECANUM",
    }
}

/// Operating mode reported in `State.operatingMode`
///
/// 2.0.0 only knows the five named modes. 2.1.0 turned the field into a free
/// string, so unknown values survive there as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    Automatic,
    Semiautomatic,
    Manual,
    Service,
    Teachin,
    Other(String),
}

impl OperatingMode {
    const NAMED: [(&'static str, OperatingMode); 5] = [
        ("AUTOMATIC", OperatingMode::Automatic),
        ("SEMIAUTOMATIC", OperatingMode::Semiautomatic),
        ("MANUAL", OperatingMode::Manual),
        ("SERVICE", OperatingMode::Service),
        ("TEACHIN", OperatingMode::Teachin),
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OperatingMode::Automatic => "AUTOMATIC",
            OperatingMode::Semiautomatic => "SEMIAUTOMATIC",
            OperatingMode::Manual => "MANUAL",
            OperatingMode::Service => "SERVICE",
            OperatingMode::Teachin => "TEACHIN",
            OperatingMode::Other(raw) => raw,
        }
    }

    /// Named mode for `raw`, if it is one of the five standard values
    pub fn named(raw: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(wire, _)| *wire == raw)
            .map(|(_, mode)| mode.clone())
    }

    pub fn available_in(&self, version: ProtocolVersion) -> bool {
        !matches!(
            (self, version),
            (OperatingMode::Other(_), ProtocolVersion::V2_0_0)
        )
    }
}

impl From<String> for OperatingMode {
    fn from(raw: String) -> Self {
        Self::named(&raw).unwrap_or(OperatingMode::Other(raw))
    }
}

impl From<&str> for OperatingMode {
    fn from(raw: &str) -> Self {
        Self::named(raw).unwrap_or_else(|| OperatingMode::Other(raw.to_string()))
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromWire for OperatingMode {
    const EXPECTED: &'static str = "string";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let raw = value
            .as_str()
            .ok_or_else(|| unexpected(&at, Self::EXPECTED, value))?;
        let mode = OperatingMode::from(raw);
        if !mode.available_in(at.version()) {
            return Err(CodecError::InvalidEnumValue(at.path(), raw.to_string()));
        }
        Ok(mode)
    }
}

impl ToWire for OperatingMode {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        if !self.available_in(at.version()) {
            return Err(CodecError::InvalidEnumValue(
                at.path(),
                self.as_str().to_string(),
            ));
        }
        Ok(Value::String(self.as_str().to_string()))
    }
}
