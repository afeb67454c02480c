//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (frontier exhaustion, budget exhaustion, collaborator panics) are
//! expressed via [`crate::graph::TerminationReasonV1`] and always produce a
//! `SearchGraphV1` audit trail. `SolveError` is the flattened view the
//! [`crate::search::solve`] entry point returns.

use crate::graph::PanicStageV1;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchGraphV1` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy contains a value the search cannot honor.
    InvalidPolicy { detail: String },
    /// The maze model violates the three-key problem shape.
    MalformedProblem { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::MalformedProblem { detail } => write!(f, "malformed maze problem: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Failure of [`crate::search::solve`].
///
/// "No path exists" is not an error; `solve` reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Pre-flight validation failed.
    Search(SearchError),
    /// The policy's expansion budget ran out before a goal or exhaustion.
    BudgetExceeded { expansions: u64 },
    /// A maze-model callback panicked. The search does not recover from
    /// collaborator contract violations.
    CollaboratorFault { stage: PanicStageV1 },
    /// An internal search-loop invariant was violated.
    InvariantViolation,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "{e}"),
            Self::BudgetExceeded { expansions } => {
                write!(f, "expansion budget exhausted after {expansions} expansions")
            }
            Self::CollaboratorFault { stage } => {
                write!(f, "maze model panicked during {}", stage.as_str())
            }
            Self::InvariantViolation => f.write_str("search loop invariant violated"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for SolveError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}
