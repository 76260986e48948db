//! Message size limits advertised by a vehicle factsheet

use crate::error::{ValidationError, ValidationResult};
use crate::protocol::common::{Action, Trajectory};
use crate::protocol::factsheet::{ArrayLimit, Factsheet};
use crate::protocol::instant_actions::InstantActions;
use crate::protocol::order::Order;
use crate::protocol::state::State;

struct Limits<'f> {
    factsheet: &'f Factsheet,
}

impl Limits<'_> {
    fn array(&self, field: ArrayLimit, actual: usize) -> ValidationResult<()> {
        match self.factsheet.max_array_len(field) {
            Some(limit) if actual > limit as usize => Err(ValidationError::LimitExceeded {
                field: field.as_str().to_string(),
                limit,
                actual,
            }),
            _ => Ok(()),
        }
    }

    fn id(&self, id: &str) -> ValidationResult<()> {
        match self.factsheet.max_id_len() {
            Some(limit) if id.chars().count() > limit as usize => Err(ValidationError::LimitExceeded {
                field: format!("idLen ({id:?})"),
                limit,
                actual: id.chars().count(),
            }),
            _ => Ok(()),
        }
    }

    fn action(&self, action: &Action) -> ValidationResult<()> {
        self.id(&action.action_id)?;
        self.array(ArrayLimit::ActionParameters, action.parameters().len())
    }

    fn trajectory(&self, trajectory: Option<&Trajectory>) -> ValidationResult<()> {
        if let Some(trajectory) = trajectory {
            self.array(ArrayLimit::TrajectoryKnotVector, trajectory.knot_vector.len())?;
            self.array(ArrayLimit::TrajectoryControlPoints, trajectory.control_points.len())?;
        }
        Ok(())
    }
}

/// Check an order against the array and id limits of `factsheet`
pub fn check_order_limits(order: &Order, factsheet: &Factsheet) -> ValidationResult<()> {
    let limits = Limits { factsheet };
    limits.id(&order.order_id)?;
    limits.array(ArrayLimit::OrderNodes, order.nodes.len())?;
    limits.array(ArrayLimit::OrderEdges, order.edges.len())?;

    for node in &order.nodes {
        limits.id(&node.node_id)?;
        limits.array(ArrayLimit::NodeActions, node.actions.len())?;
        node.actions.iter().try_for_each(|a| limits.action(a))?;
    }

    for edge in &order.edges {
        limits.id(&edge.edge_id)?;
        limits.array(ArrayLimit::EdgeActions, edge.actions.len())?;
        edge.actions.iter().try_for_each(|a| limits.action(a))?;
        limits.trajectory(edge.trajectory.as_ref())?;
    }

    Ok(())
}

/// Check an instant action batch against the limits of `factsheet`
pub fn check_instant_actions_limits(
    instant_actions: &InstantActions,
    factsheet: &Factsheet,
) -> ValidationResult<()> {
    let limits = Limits { factsheet };
    limits.array(ArrayLimit::InstantActions, instant_actions.actions.len())?;
    instant_actions
        .actions
        .iter()
        .try_for_each(|a| limits.action(a))
}

/// Check a state report against the limits of `factsheet`
pub fn check_state_limits(state: &State, factsheet: &Factsheet) -> ValidationResult<()> {
    let limits = Limits { factsheet };
    limits.array(ArrayLimit::StateNodeStates, state.node_states.len())?;
    limits.array(ArrayLimit::StateEdgeStates, state.edge_states.len())?;
    limits.array(ArrayLimit::StateActionStates, state.action_states.len())?;
    limits.array(ArrayLimit::StateErrors, state.errors.len())?;
    limits.array(
        ArrayLimit::StateLoads,
        state.loads.as_ref().map_or(0, Vec::len),
    )?;
    limits.array(
        ArrayLimit::StateInformation,
        state.information.as_ref().map_or(0, Vec::len),
    )?;

    for error in &state.errors {
        limits.array(
            ArrayLimit::ErrorReferences,
            error.error_references.as_ref().map_or(0, Vec::len),
        )?;
    }
    for info in state.information.iter().flatten() {
        limits.array(
            ArrayLimit::InfoReferences,
            info.info_references.as_ref().map_or(0, Vec::len),
        )?;
    }
    for edge in &state.edge_states {
        limits.trajectory(edge.trajectory.as_ref())?;
    }

    Ok(())
}
