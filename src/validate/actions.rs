//! Action id and parameter key uniqueness

use crate::error::{ValidationError, ValidationResult};
use crate::protocol::common::Action;
use std::collections::HashSet;

/// Action ids must be unique across the whole message, and parameter keys
/// unique within each action
pub fn check_actions<'a, I>(actions: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a Action>,
{
    let mut seen = HashSet::new();
    for action in actions {
        if !seen.insert(action.action_id.as_str()) {
            return Err(ValidationError::DuplicateActionId(action.action_id.clone()));
        }
        check_parameter_keys(action)?;
    }
    Ok(())
}

fn check_parameter_keys(action: &Action) -> ValidationResult<()> {
    let mut keys = HashSet::new();
    for parameter in action.parameters() {
        if !keys.insert(parameter.key.as_str()) {
            return Err(ValidationError::DuplicateParameterKey {
                action_id: action.action_id.clone(),
                key: parameter.key.clone(),
            });
        }
    }
    Ok(())
}
