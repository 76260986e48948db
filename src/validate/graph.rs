//! Node/edge graph consistency
//!
//! Orders and states both carry a node list and an edge list that together
//! form one interleaved sequence. The checks run on that merged sequence:
//!
//! 1. Sort all elements by `sequenceId` (input order is irrelevant)
//! 2. Reject duplicate ids, smallest duplicate first
//! 3. Nodes carry even ids, edges odd ids
//! 4. Walk the sequence once, checking alternation, gaps, edge endpoints
//!    against their neighbours and that the released base is a prefix
//! 5. The sequence ends on a node, and so does the base plan

use super::{GapPolicy, ValidationRules};
use crate::error::{ElementKind, ValidationError, ValidationResult};
use crate::protocol::order::{Edge, Node};
use crate::protocol::state::{EdgeState, NodeState};

/// Node-like element of a plan graph
pub trait PlanNode {
    fn node_id(&self) -> &str;
    fn sequence_id(&self) -> u32;
    fn released(&self) -> bool;
}

/// Edge-like element of a plan graph
pub trait PlanEdge {
    fn edge_id(&self) -> &str;
    fn sequence_id(&self) -> u32;
    fn released(&self) -> bool;
    /// Start and end node ids, when the element carries them
    fn endpoints(&self) -> Option<(&str, &str)>;
}

impl PlanNode for Node {
    fn node_id(&self) -> &str {
        &self.node_id
    }
    fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
    fn released(&self) -> bool {
        self.released
    }
}

impl PlanEdge for Edge {
    fn edge_id(&self) -> &str {
        &self.edge_id
    }
    fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
    fn released(&self) -> bool {
        self.released
    }
    fn endpoints(&self) -> Option<(&str, &str)> {
        Some((&self.start_node_id, &self.end_node_id))
    }
}

impl PlanNode for NodeState {
    fn node_id(&self) -> &str {
        &self.node_id
    }
    fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
    fn released(&self) -> bool {
        self.released
    }
}

impl PlanEdge for EdgeState {
    fn edge_id(&self) -> &str {
        &self.edge_id
    }
    fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
    fn released(&self) -> bool {
        self.released
    }
    fn endpoints(&self) -> Option<(&str, &str)> {
        None
    }
}

/// Which message the graph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphShape {
    /// Must start on a released node
    Order,
    /// Remaining graph of a state; may start with the edge being driven
    State,
}

#[derive(Debug, Clone, Copy)]
struct Element<'a> {
    kind: ElementKind,
    id: &'a str,
    sequence_id: u32,
    released: bool,
    endpoints: Option<(&'a str, &'a str)>,
}

fn opposite(kind: ElementKind) -> ElementKind {
    match kind {
        ElementKind::Node => ElementKind::Edge,
        ElementKind::Edge => ElementKind::Node,
    }
}

/// Validate a node/edge graph; an empty graph is accepted
pub fn validate_graph<N: PlanNode, E: PlanEdge>(
    nodes: &[N],
    edges: &[E],
    shape: GraphShape,
    rules: &ValidationRules,
) -> ValidationResult<()> {
    let mut elements: Vec<Element<'_>> = nodes
        .iter()
        .map(|n| Element {
            kind: ElementKind::Node,
            id: n.node_id(),
            sequence_id: n.sequence_id(),
            released: n.released(),
            endpoints: None,
        })
        .chain(edges.iter().map(|e| Element {
            kind: ElementKind::Edge,
            id: e.edge_id(),
            sequence_id: e.sequence_id(),
            released: e.released(),
            endpoints: e.endpoints(),
        }))
        .collect();

    // Step 1: merge
    elements.sort_by_key(|e| e.sequence_id);

    // Step 2: duplicates
    if let Some(pair) = elements
        .windows(2)
        .find(|pair| pair[0].sequence_id == pair[1].sequence_id)
    {
        return Err(ValidationError::DuplicateSequenceId(pair[0].sequence_id));
    }

    // Step 3: parity
    for element in &elements {
        let even = element.sequence_id % 2 == 0;
        if even != (element.kind == ElementKind::Node) {
            return Err(ValidationError::SequenceParity {
                kind: element.kind,
                id: element.id.to_string(),
                sequence_id: element.sequence_id,
            });
        }
    }

    let Some(first) = elements.first() else {
        return Ok(());
    };

    if shape == GraphShape::Order {
        if first.kind != ElementKind::Node {
            return Err(ValidationError::MisplacedElement {
                sequence_id: first.sequence_id,
                expected: ElementKind::Node,
                found: first.kind,
            });
        }
        if !first.released {
            return Err(ValidationError::EmptyBase(first.id.to_string()));
        }
    }

    // Step 4: single walk over neighbouring pairs
    for pair in elements.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if current.kind == previous.kind {
            return Err(ValidationError::MisplacedElement {
                sequence_id: current.sequence_id,
                expected: opposite(previous.kind),
                found: current.kind,
            });
        }

        if rules.sequence_gaps == GapPolicy::Reject && current.sequence_id != previous.sequence_id + 1 {
            return Err(ValidationError::SequenceGap {
                previous: previous.sequence_id,
                next: current.sequence_id,
            });
        }

        check_endpoints(previous, current)?;

        if !previous.released && current.released {
            return Err(ValidationError::HorizonBeforeBase {
                sequence_id: current.sequence_id,
            });
        }

        if previous.released && !current.released && previous.kind == ElementKind::Edge {
            return Err(ValidationError::BaseEndsOnEdge(previous.id.to_string()));
        }
    }

    // Step 5: tail
    if let Some(last) = elements.last() {
        if last.kind == ElementKind::Edge {
            return Err(ValidationError::MisplacedElement {
                sequence_id: last.sequence_id,
                expected: ElementKind::Node,
                found: ElementKind::Edge,
            });
        }
    }

    Ok(())
}

/// Edge endpoints must name the node right before and right after the edge
fn check_endpoints(previous: &Element<'_>, current: &Element<'_>) -> ValidationResult<()> {
    match (previous.kind, current.kind) {
        (ElementKind::Node, ElementKind::Edge) => match current.endpoints {
            Some((start, _)) if start != previous.id => Err(
                ValidationError::DanglingEdgeReference(current.id.to_string(), start.to_string()),
            ),
            _ => Ok(()),
        },
        (ElementKind::Edge, ElementKind::Node) => match previous.endpoints {
            Some((_, end)) if end != current.id => Err(
                ValidationError::DanglingEdgeReference(previous.id.to_string(), end.to_string()),
            ),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}
