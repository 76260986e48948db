//! Message kinds and their topic suffixes
//!
//! The transport decides the full topic layout; only the final segment, which
//! names the message family, is known here.

use crate::protocol::version::ProtocolVersion;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Message family, identified by its topic suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Order,
    State,
    InstantActions,
    Visualization,
    Connection,
    Factsheet,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Order,
        MessageKind::State,
        MessageKind::InstantActions,
        MessageKind::Visualization,
        MessageKind::Connection,
        MessageKind::Factsheet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Order => "order",
            MessageKind::State => "state",
            MessageKind::InstantActions => "instantActions",
            MessageKind::Visualization => "visualization",
            MessageKind::Connection => "connection",
            MessageKind::Factsheet => "factsheet",
        }
    }

    /// Whether the protocol family defines this message at all
    pub fn defined_in(&self, version: ProtocolVersion) -> bool {
        !matches!(
            (self, version),
            (MessageKind::Connection, ProtocolVersion::V2_0_0)
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Topic suffix naming no known message family
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown message kind: {0:?}")]
pub struct UnknownKind(pub String);
