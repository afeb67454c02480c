//! Harness runner: search a grid maze, replay the answer, and bind the
//! results into a digest-stamped report.
//!
//! # Pipeline
//!
//! ```text
//! maze.digest() → policy.digest() → search() → graph.digest()
//!   → [verify_solution() if a goal was reached] → SolveReportV1
//! ```
//!
//! A goal-reaching search whose action sequence fails independent replay, or
//! whose replayed cost differs from the searched cost, is an error, never a
//! report.

use tracing::debug;
use trikey_kernel::proof::canon::{canonical_json_bytes, CanonError};
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use trikey_search::error::SearchError;
use trikey_search::graph::{SearchGraphV1, TerminationReasonV1};
use trikey_search::policy::SearchPolicyV1;
use trikey_search::search;

use crate::maze::GridMaze;
use crate::replay::{verify_solution, ReplayError, ReplayOutcomeV1};

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// Pre-flight search failure.
    Search(SearchError),
    /// The search's answer did not survive replay.
    Replay(ReplayError),
    /// Canonical JSON serialization failed.
    Canon(CanonError),
    /// Replay summed a different path cost than the search reported.
    CostMismatch { searched: u64, replayed: u64 },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Replay(e) => write!(f, "replay rejected solution: {e}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
            Self::CostMismatch { searched, replayed } => write!(
                f,
                "search path cost {searched} differs from replayed cost {replayed}"
            ),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Replay(e) => Some(e),
            Self::Canon(e) => Some(e),
            Self::CostMismatch { .. } => None,
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<ReplayError> for RunError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Outcome of one harness run.
///
/// The graph travels alongside the report but is bound into it only through
/// `graph_digest`.
#[derive(Debug)]
pub struct SolveReportV1 {
    pub world_id: String,
    pub problem_digest: ContentHash,
    pub search_policy_digest: ContentHash,
    pub graph_digest: ContentHash,
    pub termination_reason: TerminationReasonV1,
    /// Action labels, present only when a goal was reached.
    pub actions: Option<Vec<String>>,
    pub path_cost: Option<u64>,
    pub replay: Option<ReplayOutcomeV1>,
    pub total_expansions: u64,
    pub graph: SearchGraphV1,
}

impl SolveReportV1 {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.actions.is_some()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "actions": self.actions,
            "graph_digest": self.graph_digest.as_str(),
            "path_cost": self.path_cost,
            "problem_digest": self.problem_digest.as_str(),
            "replay": self.replay.as_ref().map(ReplayOutcomeV1::to_json_value),
            "schema_version": "solve_report.v1",
            "search_policy_digest": self.search_policy_digest.as_str(),
            "termination_reason": self.termination_reason.to_json_value(),
            "total_expansions": self.total_expansions,
            "world_id": self.world_id,
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical report (graph excluded).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::SolveReport,
            &self.to_canonical_json_bytes()?,
        ))
    }
}

/// Search `maze` under `policy` and produce a replay-checked report.
///
/// Budget exhaustion and caught collaborator panics are reported through
/// `termination_reason`, not as errors.
///
/// # Errors
///
/// Returns [`RunError`] on pre-flight search failure, replay rejection, or
/// canonical serialization failure.
pub fn run_solve(maze: &GridMaze, policy: &SearchPolicyV1) -> Result<SolveReportV1, RunError> {
    let problem_digest = maze.digest()?;
    let search_policy_digest = policy.digest()?;

    let result = search(maze, policy)?;
    let graph_digest = result.graph.digest()?;

    let actions = result.actions();
    let replay = match &actions {
        Some(actions) => {
            let outcome = verify_solution(maze, actions)?;
            check_replay_cost(result.path_cost(), &outcome)?;
            Some(outcome)
        }
        None => None,
    };

    let report = SolveReportV1 {
        world_id: result.graph.metadata.world_id.clone(),
        problem_digest,
        search_policy_digest,
        graph_digest,
        termination_reason: result.termination_reason(),
        actions: actions.map(|a| a.iter().map(ToString::to_string).collect()),
        path_cost: result.path_cost(),
        replay,
        total_expansions: result.graph.metadata.total_expansions,
        graph: result.graph,
    };

    debug!(
        world_id = %report.world_id,
        solved = report.is_solved(),
        path_cost = ?report.path_cost,
        expansions = report.total_expansions,
        graph_digest = %report.graph_digest,
        "solve run complete"
    );

    Ok(report)
}

/// The replayed walk must cost exactly what the search charged for it.
fn check_replay_cost(path_cost: Option<u64>, replay: &ReplayOutcomeV1) -> Result<(), RunError> {
    let searched = path_cost.unwrap_or_default();
    if searched == replay.total_cost {
        Ok(())
    } else {
        Err(RunError::CostMismatch {
            searched,
            replayed: replay.total_cost,
        })
    }
}
