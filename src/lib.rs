//! VDA5050 - Rust Implementation
//!
//! Typed messages, a version-aware JSON codec and a graph validator for the
//! VDA5050 AGV protocol, versions 2.0.0 and 2.1.0.
//!
//! # Overview
//!
//! This crate covers the wire contract only:
//! - Message schemas for order, state, instant actions, visualization,
//!   connection and factsheet
//! - JSON decoding and encoding, selected by an explicit protocol version
//! - Graph validation of order and state node/edge sequences
//! - Conversion between the two protocol families
//!
//! Transport, persistence and fleet logic belong to the embedding
//! application.
//!
//! # Quick Start
//!
//! ```rust
//! use vda5050::{decode, MessageKind, ProtocolVersion};
//!
//! let payload = br#"{
//!     "headerId": 1,
//!     "timestamp": "2024-05-01T10:00:00.000Z",
//!     "version": "2.0.0",
//!     "manufacturer": "acme",
//!     "serialNumber": "agv-1",
//!     "orderId": "o1",
//!     "orderUpdateId": 0,
//!     "nodes": [
//!         {"nodeId": "n1", "sequenceId": 0, "released": true, "actions": []},
//!         {"nodeId": "n2", "sequenceId": 2, "released": true, "actions": []}
//!     ],
//!     "edges": [
//!         {"edgeId": "e1", "sequenceId": 1, "released": true,
//!          "startNodeId": "n1", "endNodeId": "n2", "actions": []}
//!     ]
//! }"#;
//!
//! let message = decode(MessageKind::Order, payload, ProtocolVersion::V2_0_0).unwrap();
//! let order = message.as_order().unwrap();
//! assert_eq!(order.nodes.len(), 2);
//!
//! // Round trip back to JSON bytes
//! let bytes = vda5050::encode(&message).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod codec;
pub mod compat;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod validate;

pub use codec::{decode, encode, Codec, Message, Payload, WireMessage};
pub use compat::{convert, VersionReport};
pub use config::{CodecConfig, ConfigError};
pub use error::{
    CodecError, CodecResult, ElementKind, ErrorKind, ValidationError, ValidationResult,
    Vda5050Error, Vda5050Result,
};
pub use protocol::*;
pub use validate::{GapPolicy, Validate, ValidationRules};
