//! Search policy types.

use trikey_kernel::proof::canon::{canonical_json_bytes, CanonError};
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;

/// Search budget, heuristic, and duplicate-pruning configuration.
///
/// The default searches with the nearest-uncollected-key heuristic, no
/// expansion cap, and pruning at insertion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions. `None` runs until goal or exhaustion.
    pub max_expansions: Option<u64>,
    /// Remaining-cost estimate used for frontier ordering.
    pub heuristic: HeuristicV1,
    /// When a generated successor is discarded as a duplicate.
    pub duplicate_policy: DuplicatePolicyV1,
}

impl SearchPolicyV1 {
    /// Validate that every option can be honored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget,
    /// which could never expand the start node.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// JSON projection used for the policy digest.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "duplicate_policy": self.duplicate_policy.as_str(),
            "heuristic": self.heuristic.as_str(),
            "max_expansions": self.max_expansions,
        })
    }

    /// Content hash of the canonical JSON projection.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: None,
            heuristic: HeuristicV1::NearestKey,
            duplicate_policy: DuplicatePolicyV1::BestCostOnInsert,
        }
    }
}

/// Remaining-cost estimate.
///
/// Every variant returns 0 once all keys are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicV1 {
    /// Distance to the closest uncollected key.
    NearestKey,
    /// Distance to the farthest uncollected key. Still a lower bound (every
    /// remaining key must be reached) and never smaller than `NearestKey`.
    FarthestKey,
    /// Always 0; the search degenerates to uniform-cost search.
    Zero,
}

impl HeuristicV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearestKey => "nearest_key",
            Self::FarthestKey => "farthest_key",
            Self::Zero => "zero",
        }
    }
}

/// Duplicate-suppression discipline for generated successors.
///
/// Under both variants a popped node whose state is already closed is
/// skipped, so no search state is expanded twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicyV1 {
    /// Discard a successor whose state is closed, or is already open at an
    /// equal or lower path cost. Default.
    BestCostOnInsert,
    /// Discard a successor only if its state is closed. Pricier open copies
    /// stay queued and are skipped when popped.
    ClosedSetOnly,
}

impl DuplicatePolicyV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestCostOnInsert => "best_cost_on_insert",
            Self::ClosedSetOnly => "closed_set_only",
        }
    }
}
