//! Independent replay of a solution against its maze.
//!
//! Replay re-walks an action sequence through [`MazeModel::transitions`] and
//! re-sums arrival costs without consulting any search state. A solution is
//! accepted only if every action is legal from the cell it is taken in and
//! every distinct key cell is visited (the start cell counts).

use std::collections::BTreeSet;

use trikey_search::contract::MazeModel;

/// What a successful replay observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcomeV1 {
    /// Number of actions replayed.
    pub steps: usize,
    /// Sum of arrival costs along the walk.
    pub total_cost: u64,
    /// Distinct key cells visited, start included.
    pub keys_visited: usize,
}

impl ReplayOutcomeV1 {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "keys_visited": self.keys_visited,
            "steps": self.steps,
            "total_cost": self.total_cost,
        })
    }
}

/// Replay rejected the solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// `action` is not offered by `transitions` at step `step`.
    IllegalAction { step: usize, action: String },
    /// The walk ended without visiting every key cell.
    MissingKeys { visited: usize, required: usize },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalAction { step, action } => {
                write!(f, "illegal action {action} at step {step}")
            }
            Self::MissingKeys { visited, required } => {
                write!(f, "visited {visited} of {required} key cells")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Walk `actions` from the model's start and check the result.
///
/// # Errors
///
/// Returns [`ReplayError::IllegalAction`] on the first action with no
/// matching transition, or [`ReplayError::MissingKeys`] if the walk misses
/// any key cell.
pub fn verify_solution<M: MazeModel>(
    model: &M,
    actions: &[M::Action],
) -> Result<ReplayOutcomeV1, ReplayError> {
    let keys: BTreeSet<M::Position> = model.key_positions().into_iter().collect();
    let mut visited: BTreeSet<M::Position> = BTreeSet::new();

    let mut position = model.initial_position();
    if keys.contains(&position) {
        visited.insert(position.clone());
    }

    let mut total_cost: u64 = 0;
    for (step, action) in actions.iter().enumerate() {
        let next = model
            .transitions(&position)
            .into_iter()
            .find(|(a, _)| a == action)
            .map(|(_, p)| p)
            .ok_or_else(|| ReplayError::IllegalAction {
                step,
                action: action.to_string(),
            })?;
        total_cost = total_cost.saturating_add(model.cost(&next));
        if keys.contains(&next) {
            visited.insert(next.clone());
        }
        position = next;
    }

    if visited.len() < keys.len() {
        return Err(ReplayError::MissingKeys {
            visited: visited.len(),
            required: keys.len(),
        });
    }

    Ok(ReplayOutcomeV1 {
        steps: actions.len(),
        total_cost,
        keys_visited: visited.len(),
    })
}
