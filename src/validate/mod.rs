//! Semantic validation of decoded messages
//!
//! Decoding only proves that a payload has the right shape. The checks here
//! cover what the JSON schema cannot express: node/edge sequencing, edge
//! endpoints, action id uniqueness and trajectory geometry. Validation never
//! mutates its input and reports the first failure found.

pub mod actions;
pub mod graph;
pub mod limits;
pub mod trajectory;

use crate::codec::{Message, Payload};
use crate::error::{ValidationError, ValidationResult};
use crate::protocol::connection::Connection;
use crate::protocol::factsheet::Factsheet;
use crate::protocol::instant_actions::InstantActions;
use crate::protocol::order::Order;
use crate::protocol::state::State;
use crate::protocol::visualization::Visualization;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use graph::{validate_graph, GraphShape, PlanEdge, PlanNode};
pub use limits::{check_instant_actions_limits, check_order_limits, check_state_limits};

/// Treatment of gaps between consecutive sequence ids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Consecutive elements must differ by exactly one
    #[default]
    Reject,
    /// Any strictly increasing sequence is accepted
    Allow,
}

/// Tunable parts of validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    pub sequence_gaps: GapPolicy,
}

/// A message that can be checked for semantic consistency
pub trait Validate {
    fn validate_with(&self, rules: &ValidationRules) -> ValidationResult<()>;

    /// Validate with the strict default rules
    fn validate(&self) -> ValidationResult<()> {
        self.validate_with(&ValidationRules::default())
    }
}

impl Validate for Order {
    fn validate_with(&self, rules: &ValidationRules) -> ValidationResult<()> {
        if self.nodes.is_empty() {
            return Err(ValidationError::EmptyNodeList);
        }
        validate_graph(&self.nodes, &self.edges, GraphShape::Order, rules)?;
        actions::check_actions(self.actions())?;
        for edge in &self.edges {
            if let Some(t) = &edge.trajectory {
                trajectory::check_trajectory(&edge.edge_id, t)?;
            }
        }
        Ok(())
    }
}

impl Validate for State {
    fn validate_with(&self, rules: &ValidationRules) -> ValidationResult<()> {
        validate_graph(&self.node_states, &self.edge_states, GraphShape::State, rules)?;

        let mut reported = HashSet::new();
        for action_state in &self.action_states {
            if !reported.insert(action_state.action_id.as_str()) {
                return Err(ValidationError::DuplicateActionId(
                    action_state.action_id.clone(),
                ));
            }
        }

        for edge in &self.edge_states {
            if let Some(t) = &edge.trajectory {
                trajectory::check_trajectory(&edge.edge_id, t)?;
            }
        }
        Ok(())
    }
}

impl Validate for InstantActions {
    fn validate_with(&self, _rules: &ValidationRules) -> ValidationResult<()> {
        actions::check_actions(&self.actions)
    }
}

impl Validate for Visualization {
    fn validate_with(&self, _rules: &ValidationRules) -> ValidationResult<()> {
        Ok(())
    }
}

impl Validate for Connection {
    fn validate_with(&self, _rules: &ValidationRules) -> ValidationResult<()> {
        Ok(())
    }
}

impl Validate for Factsheet {
    fn validate_with(&self, _rules: &ValidationRules) -> ValidationResult<()> {
        Ok(())
    }
}

impl Validate for Message {
    fn validate_with(&self, rules: &ValidationRules) -> ValidationResult<()> {
        match self.payload() {
            Payload::Order(m) => m.validate_with(rules),
            Payload::State(m) => m.validate_with(rules),
            Payload::InstantActions(m) => m.validate_with(rules),
            Payload::Visualization(m) => m.validate_with(rules),
            Payload::Connection(m) => m.validate_with(rules),
            Payload::Factsheet(m) => m.validate_with(rules),
        }
    }
}
