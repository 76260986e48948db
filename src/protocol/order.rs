//! Order message: the node/edge graph commanded by master control

use crate::codec::path::Cursor;
use crate::codec::reader::{FromWire, WireObject};
use crate::codec::writer::{ObjectWriter, ToWire};
use crate::error::CodecResult;
use crate::protocol::common::{Action, Header, NodePosition, Trajectory};
use crate::protocol::version::ProtocolVersion;
use serde_json::Value;

/// A commanded path graph for one vehicle
///
/// Nodes carry even and edges odd `sequence_id`s. The released elements form
/// the base plan; the remaining ones are the horizon the vehicle may not yet
/// drive.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub header: Header,
    pub order_id: String,
    pub order_update_id: u32,
    pub zone_set_id: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Order {
    pub fn new<S: Into<String>>(header: Header, order_id: S, order_update_id: u32) -> Self {
        Self {
            header,
            order_id: order_id.into(),
            order_update_id,
            zone_set_id: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Every action reachable from the order, nodes first
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.nodes
            .iter()
            .flat_map(|n| n.actions.iter())
            .chain(self.edges.iter().flat_map(|e| e.actions.iter()))
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.node_id == node_id)
    }
}

impl FromWire for Order {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            header: Header::read(&obj)?,
            order_id: obj.required("orderId")?,
            order_update_id: obj.required("orderUpdateId")?,
            zone_set_id: obj.optional("zoneSetId")?,
            nodes: obj.required("nodes")?,
            edges: obj.required("edges")?,
        })
    }
}

impl ToWire for Order {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        self.header.write(&mut w)?;
        w.required("orderId", &self.order_id)?;
        w.required("orderUpdateId", &self.order_update_id)?;
        w.optional("zoneSetId", &self.zone_set_id)?;
        w.required("nodes", &self.nodes)?;
        w.required("edges", &self.edges)?;
        Ok(w.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_id: String,
    pub sequence_id: u32,
    pub node_description: Option<String>,
    pub released: bool,
    pub node_position: Option<NodePosition>,
    pub actions: Vec<Action>,
}

impl Node {
    pub fn new<S: Into<String>>(node_id: S, sequence_id: u32, released: bool) -> Self {
        Self {
            node_id: node_id.into(),
            sequence_id,
            node_description: None,
            released,
            node_position: None,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

impl FromWire for Node {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            node_id: obj.required("nodeId")?,
            sequence_id: obj.required("sequenceId")?,
            node_description: obj.optional("nodeDescription")?,
            released: obj.required("released")?,
            node_position: obj.optional("nodePosition")?,
            actions: obj.required("actions")?,
        })
    }
}

impl ToWire for Node {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("nodeId", &self.node_id)?;
        w.required("sequenceId", &self.sequence_id)?;
        w.optional("nodeDescription", &self.node_description)?;
        w.required("released", &self.released)?;
        w.optional("nodePosition", &self.node_position)?;
        w.required("actions", &self.actions)?;
        Ok(w.finish())
    }
}

/// Directed connection between two consecutive nodes
///
/// The fields from `max_height` to `corridor` only exist from 2.1.0 on.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub edge_id: String,
    pub sequence_id: u32,
    pub edge_description: Option<String>,
    pub released: bool,
    pub start_node_id: String,
    pub end_node_id: String,
    pub max_speed: Option<f64>,
    pub trajectory: Option<Trajectory>,
    pub max_height: Option<f64>,
    pub min_height: Option<f64>,
    pub orientation: Option<f64>,
    pub orientation_type: Option<String>,
    pub direction: Option<String>,
    pub rotation_allowed: Option<bool>,
    pub max_rotation_speed: Option<f64>,
    pub length: Option<f64>,
    pub corridor: Option<Corridor>,
    pub actions: Vec<Action>,
}

impl Edge {
    pub fn new<E, S, T>(edge_id: E, sequence_id: u32, released: bool, start: S, end: T) -> Self
    where
        E: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            edge_id: edge_id.into(),
            sequence_id,
            edge_description: None,
            released,
            start_node_id: start.into(),
            end_node_id: end.into(),
            max_speed: None,
            trajectory: None,
            max_height: None,
            min_height: None,
            orientation: None,
            orientation_type: None,
            direction: None,
            rotation_allowed: None,
            max_rotation_speed: None,
            length: None,
            corridor: None,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

impl FromWire for Edge {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        const SINCE: ProtocolVersion = ProtocolVersion::V2_1_0;
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            edge_id: obj.required("edgeId")?,
            sequence_id: obj.required("sequenceId")?,
            edge_description: obj.optional("edgeDescription")?,
            released: obj.required("released")?,
            start_node_id: obj.required("startNodeId")?,
            end_node_id: obj.required("endNodeId")?,
            max_speed: obj.optional("maxSpeed")?,
            trajectory: obj.optional("trajectory")?,
            max_height: obj.optional_since(SINCE, "maxHeight")?,
            min_height: obj.optional_since(SINCE, "minHeight")?,
            orientation: obj.optional_since(SINCE, "orientation")?,
            orientation_type: obj.optional_since(SINCE, "orientationType")?,
            direction: obj.optional_since(SINCE, "direction")?,
            rotation_allowed: obj.optional_since(SINCE, "rotationAllowed")?,
            max_rotation_speed: obj.optional_since(SINCE, "maxRotationSpeed")?,
            length: obj.optional_since(SINCE, "length")?,
            corridor: obj.optional_since(SINCE, "corridor")?,
            actions: obj.required("actions")?,
        })
    }
}

impl ToWire for Edge {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        const SINCE: ProtocolVersion = ProtocolVersion::V2_1_0;
        let mut w = ObjectWriter::new(at);
        w.required("edgeId", &self.edge_id)?;
        w.required("sequenceId", &self.sequence_id)?;
        w.optional("edgeDescription", &self.edge_description)?;
        w.required("released", &self.released)?;
        w.required("startNodeId", &self.start_node_id)?;
        w.required("endNodeId", &self.end_node_id)?;
        w.optional("maxSpeed", &self.max_speed)?;
        w.optional("trajectory", &self.trajectory)?;
        w.optional_since(SINCE, "maxHeight", &self.max_height)?;
        w.optional_since(SINCE, "minHeight", &self.min_height)?;
        w.optional_since(SINCE, "orientation", &self.orientation)?;
        w.optional_since(SINCE, "orientationType", &self.orientation_type)?;
        w.optional_since(SINCE, "direction", &self.direction)?;
        w.optional_since(SINCE, "rotationAllowed", &self.rotation_allowed)?;
        w.optional_since(SINCE, "maxRotationSpeed", &self.max_rotation_speed)?;
        w.optional_since(SINCE, "length", &self.length)?;
        w.optional_since(SINCE, "corridor", &self.corridor)?;
        w.required("actions", &self.actions)?;
        Ok(w.finish())
    }
}

/// Lateral space the vehicle may use around an edge (2.1.0)
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    pub left_width: f64,
    pub right_width: f64,
    pub corridor_ref_point: Option<String>,
}

impl FromWire for Corridor {
    const EXPECTED: &'static str = "object";

    fn from_wire(value: &Value, at: Cursor<'_>) -> CodecResult<Self> {
        let obj = WireObject::new(value, at)?;
        Ok(Self {
            left_width: obj.required("leftWidth")?,
            right_width: obj.required("rightWidth")?,
            corridor_ref_point: obj.optional("corridorRefPoint")?,
        })
    }
}

impl ToWire for Corridor {
    fn to_wire(&self, at: Cursor<'_>) -> CodecResult<Value> {
        let mut w = ObjectWriter::new(at);
        w.required("leftWidth", &self.left_width)?;
        w.required("rightWidth", &self.right_width)?;
        w.optional("corridorRefPoint", &self.corridor_ref_point)?;
        Ok(w.finish())
    }
}
