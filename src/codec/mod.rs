//! Wire codec and version dispatch
//!
//! Decoding is a fixed pipeline:
//!
//! 1. Enforce the configured payload size limit
//! 2. Parse the bytes as JSON (`MalformedJson` otherwise)
//! 3. Compare the document's own `version` claim with the declared tag
//! 4. Decode under the schema family selected by the declared tag
//! 5. Optionally run the semantic validator
//!
//! Schema selection is driven only by the declared tag. The document claim is
//! a consistency check, never a way to pick a different schema.

pub mod path;
pub mod reader;
pub mod timestamp;
pub mod writer;

use crate::config::CodecConfig;
use crate::decode_span;
use crate::error::{CodecError, CodecResult, Vda5050Error, Vda5050Result};
use crate::protocol::connection::Connection;
use crate::protocol::factsheet::Factsheet;
use crate::protocol::instant_actions::InstantActions;
use crate::protocol::order::Order;
use crate::protocol::state::State;
use crate::protocol::topics::MessageKind;
use crate::protocol::version::ProtocolVersion;
use crate::protocol::visualization::Visualization;
use crate::validate::Validate;
use crate::validate_span;
use path::Cursor;
use reader::FromWire;
use serde_json::Value;
use tracing::{debug, warn};
use writer::ToWire;

/// Decoded message body of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Order(Order),
    State(State),
    InstantActions(InstantActions),
    Visualization(Visualization),
    Connection(Connection),
    Factsheet(Factsheet),
}

impl Payload {
    pub fn kind(&self) -> MessageKind {
        match self {
            Payload::Order(_) => MessageKind::Order,
            Payload::State(_) => MessageKind::State,
            Payload::InstantActions(_) => MessageKind::InstantActions,
            Payload::Visualization(_) => MessageKind::Visualization,
            Payload::Connection(_) => MessageKind::Connection,
            Payload::Factsheet(_) => MessageKind::Factsheet,
        }
    }

    /// Version string the message carries about itself, if any
    pub fn claimed_version(&self) -> Option<&str> {
        match self {
            Payload::Order(m) => Some(&m.header.version),
            Payload::State(m) => Some(&m.header.version),
            Payload::InstantActions(m) => Some(&m.header.version),
            Payload::Visualization(m) => m.version.as_deref(),
            Payload::Connection(m) => Some(&m.header.version),
            Payload::Factsheet(m) => Some(m.declared_version()),
        }
    }

    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        match self {
            Payload::Order(m) => m.to_wire(at),
            Payload::State(m) => m.to_wire(at),
            Payload::InstantActions(m) => m.to_wire(at),
            Payload::Visualization(m) => m.to_wire(at),
            Payload::Connection(m) => m.to_wire(at),
            Payload::Factsheet(m) => m.to_wire(at),
        }
    }

    fn from_wire(kind: MessageKind, value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        Ok(match kind {
            MessageKind::Order => Payload::Order(Order::from_wire(value, at)?),
            MessageKind::State => Payload::State(State::from_wire(value, at)?),
            MessageKind::InstantActions => {
                Payload::InstantActions(InstantActions::from_wire(value, at)?)
            }
            MessageKind::Visualization => {
                Payload::Visualization(Visualization::from_wire(value, at)?)
            }
            MessageKind::Connection => Payload::Connection(Connection::from_wire(value, at)?),
            MessageKind::Factsheet => Payload::Factsheet(Factsheet::from_wire(value, at)?),
        })
    }
}

macro_rules! payload_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Payload {
                fn from(message: $variant) -> Self {
                    Payload::$variant(message)
                }
            }
        )*
    };
}

payload_from!(Order, State, InstantActions, Visualization, Connection, Factsheet);

/// A payload bound to the protocol family it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    version: ProtocolVersion,
    payload: Payload,
}

impl Message {
    /// Bind a payload to a protocol family
    ///
    /// Fails when the family does not define the message: a connection
    /// under 2.0.0, or a factsheet of the other family.
    pub fn new<P: Into<Payload>>(version: ProtocolVersion, payload: P) -> CodecResult<Self> {
        let payload = payload.into();
        if !payload.kind().defined_in(version) {
            return Err(CodecError::unsupported_version(version.as_str()));
        }
        if let Payload::Factsheet(factsheet) = &payload {
            if factsheet.version() != version {
                return Err(CodecError::unsupported_version(factsheet.declared_version()));
            }
        }
        Ok(Self { version, payload })
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn kind(&self) -> MessageKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn as_order(&self) -> Option<&Order> {
        match &self.payload {
            Payload::Order(order) => Some(order),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<&State> {
        match &self.payload {
            Payload::State(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_factsheet(&self) -> Option<&Factsheet> {
        match &self.payload {
            Payload::Factsheet(factsheet) => Some(factsheet),
            _ => None,
        }
    }
}

/// A top-level message type with typed JSON entry points
pub trait WireMessage: FromWire + ToWire + Validate + Into<Payload> + Sized {
    const KIND: MessageKind;

    /// Decode and validate with the default configuration
    fn from_json(bytes: &[u8], version: ProtocolVersion) -> Vda5050Result<Self> {
        Codec::default().decode_as(bytes, version)
    }

    /// Encode under `version` with the default configuration
    fn to_json(&self, version: ProtocolVersion) -> CodecResult<Vec<u8>> {
        Codec::default().encode_as(self, version)
    }
}

impl WireMessage for Order {
    const KIND: MessageKind = MessageKind::Order;
}

impl WireMessage for State {
    const KIND: MessageKind = MessageKind::State;
}

impl WireMessage for InstantActions {
    const KIND: MessageKind = MessageKind::InstantActions;
}

impl WireMessage for Visualization {
    const KIND: MessageKind = MessageKind::Visualization;
}

impl WireMessage for Connection {
    const KIND: MessageKind = MessageKind::Connection;
}

impl WireMessage for Factsheet {
    const KIND: MessageKind = MessageKind::Factsheet;
}

/// Configured decoder/encoder
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Steps 1 to 3: size limit, JSON parse and version claim check
    fn inspect(&self, bytes: &[u8], kind: MessageKind, version: ProtocolVersion) -> CodecResult<Value> {
        if let Some(limit) = self.config.limits.max_payload_bytes {
            if bytes.len() > limit {
                return Err(CodecError::PayloadTooLarge {
                    size: bytes.len(),
                    limit,
                });
            }
        }

        if !kind.defined_in(version) {
            return Err(CodecError::unsupported_version(version.as_str()));
        }

        let value: Value = serde_json::from_slice(bytes)?;

        if self.config.dispatch.require_version_match {
            if let Some(claim) = value.get("version").and_then(Value::as_str) {
                self.check_claim(claim, version)?;
            }
        }

        Ok(value)
    }

    fn check_claim(&self, claim: &str, version: ProtocolVersion) -> CodecResult<()> {
        if ProtocolVersion::from_claim(claim)? != version {
            return Err(CodecError::unsupported_version(claim));
        }
        Ok(())
    }

    /// Decode a message without running the validator
    pub fn parse(
        &self,
        kind: MessageKind,
        bytes: &[u8],
        version: ProtocolVersion,
    ) -> CodecResult<Message> {
        let value = self.inspect(bytes, kind, version)?;
        let payload = Payload::from_wire(kind, &value, Cursor::root(version))?;
        Message::new(version, payload)
    }

    /// Decode a message and, unless disabled, validate it
    pub fn decode(
        &self,
        kind: MessageKind,
        bytes: &[u8],
        version: ProtocolVersion,
    ) -> Vda5050Result<Message> {
        let span = decode_span!(kind = %kind, version = %version, bytes = bytes.len());
        let _enter = span.enter();

        let result = self
            .parse(kind, bytes, version)
            .map_err(Vda5050Error::from)
            .and_then(|message| {
                self.check(&message)?;
                Ok(message)
            });

        match &result {
            Ok(_) => debug!("Message accepted"),
            Err(e) => warn!(error_kind = %e.kind(), error = %e, "Message rejected"),
        }
        result
    }

    /// Typed variant of [`Codec::decode`]
    pub fn decode_as<T: WireMessage>(&self, bytes: &[u8], version: ProtocolVersion) -> Vda5050Result<T> {
        let span = decode_span!(kind = %T::KIND, version = %version, bytes = bytes.len());
        let _enter = span.enter();

        let result = self
            .inspect(bytes, T::KIND, version)
            .and_then(|value| T::from_wire(&value, Cursor::root(version)))
            .map_err(Vda5050Error::from)
            .and_then(|message| {
                self.check(&message)?;
                Ok(message)
            });

        match &result {
            Ok(_) => debug!("Message accepted"),
            Err(e) => warn!(error_kind = %e.kind(), error = %e, "Message rejected"),
        }
        result
    }

    fn check<V: Validate>(&self, message: &V) -> Vda5050Result<()> {
        if !self.config.validation.validate_on_decode {
            return Ok(());
        }
        let span = validate_span!(gaps = ?self.config.validation.sequence_gaps);
        let _enter = span.enter();
        message.validate_with(&self.config.rules())?;
        Ok(())
    }

    /// Encode a message under its own protocol family
    pub fn encode(&self, message: &Message) -> CodecResult<Vec<u8>> {
        let version = message.version();
        if self.config.dispatch.require_version_match {
            if let Some(claim) = message.payload().claimed_version() {
                self.check_claim(claim, version)?;
            }
        }
        let value = message.payload().to_wire(Cursor::root(version))?;
        let bytes = serde_json::to_vec(&value)?;
        debug!(kind = %message.kind(), version = %version, bytes = bytes.len(), "Message encoded");
        Ok(bytes)
    }

    /// Encode a single typed message under `version`
    pub fn encode_as<T: WireMessage>(&self, message: &T, version: ProtocolVersion) -> CodecResult<Vec<u8>> {
        if !T::KIND.defined_in(version) {
            return Err(CodecError::unsupported_version(version.as_str()));
        }
        let value = message.to_wire(Cursor::root(version))?;
        if self.config.dispatch.require_version_match {
            if let Some(claim) = value.get("version").and_then(Value::as_str) {
                self.check_claim(claim, version)?;
            }
        }
        Ok(serde_json::to_vec(&value)?)
    }
}

/// Decode and validate with the default configuration
pub fn decode(kind: MessageKind, bytes: &[u8], version: ProtocolVersion) -> Vda5050Result<Message> {
    Codec::default().decode(kind, bytes, version)
}

/// Encode with the default configuration
pub fn encode(message: &Message) -> CodecResult<Vec<u8>> {
    Codec::default().encode(message)
}
