//! VDA5050 message schemas for protocol versions 2.0.0 and 2.1.0
//!
//! Each entity has a single definition shared by both versions. Fields that
//! only exist in one version are `Option`s whose presence is gated by the
//! codec; the factsheet is the exception and has one module per version.

pub mod common;
pub mod connection;
pub mod enums;
pub mod factsheet;
pub mod instant_actions;
pub mod order;
pub mod state;
pub mod topics;
pub mod version;
pub mod visualization;

pub use common::*;
pub use connection::Connection;
pub use enums::*;
pub use factsheet::{ArrayLimit, Factsheet};
pub use instant_actions::InstantActions;
pub use order::{Corridor, Edge, Node, Order};
pub use state::{
    ActionState, AgvError, BatteryState, EdgeState, Information, Load, Map, NodeState,
    NodeStatePosition, Reference, SafetyState, State,
};
pub use topics::{MessageKind, UnknownKind};
pub use version::ProtocolVersion;
pub use visualization::Visualization;
