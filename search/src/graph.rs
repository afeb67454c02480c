//! `SearchGraphV1`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries. Node summaries are a derived index over the node arena.

use trikey_kernel::proof::canon::{canonical_json_bytes, CanonError};
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::policy::{DuplicatePolicyV1, HeuristicV1};

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraphV1 {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEventV1>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<SearchGraphNodeSummaryV1>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + successor-generation event.
#[derive(Debug, Clone)]
pub struct ExpandEventV1 {
    /// Total order of expansions.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's search state.
    pub state_fingerprint: String,
    /// The frontier key at time of pop.
    pub frontier_pop_key: FrontierPopKeyV1,
    /// Successors in the order the maze model listed them.
    pub successors: Vec<SuccessorRecordV1>,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierPopKeyV1 {
    pub f_cost: u64,
    pub depth: u32,
    pub creation_order: u64,
}

/// A generated transition with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecordV1 {
    /// Index in the model's transition list.
    pub index: u64,
    /// `Display` rendering of the action label.
    pub action: String,
    /// Hex of the destination's identity bytes.
    pub position_hex: String,
    /// Arrival cost reported by the model.
    pub edge_cost: u64,
    pub outcome: SuccessorOutcomeV1,
}

/// What happened to a generated successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorOutcomeV1 {
    /// Queued as a new node.
    Enqueued { to_node: u64 },
    /// State already expanded.
    DuplicateClosed,
    /// State already queued at an equal or lower path cost.
    DominatedOpen { queued_g_cost: u64 },
}

/// Derived node summary.
#[derive(Debug, Clone)]
pub struct SearchGraphNodeSummaryV1 {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub state_fingerprint: String,
    pub depth: u32,
    pub g_cost: u64,
    pub h_cost: u64,
    pub keys_collected: u64,
    pub is_goal: bool,
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    // Bindings
    pub world_id: String,
    pub search_policy_digest: String,
    /// `None` when the start position could not be obtained.
    pub root_state_fingerprint: Option<String>,
    pub key_count: u64,

    // Counters
    pub total_expansions: u64,
    pub total_successors_generated: u64,
    pub total_duplicates_closed: u64,
    pub total_dominated_open: u64,
    pub total_stale_pops: u64,
    pub frontier_high_water: u64,
    pub closed_set_size: u64,
    pub termination_reason: TerminationReasonV1,

    // Policy echo
    pub heuristic: HeuristicV1,
    pub duplicate_policy: DuplicatePolicyV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A node holding every key was popped.
    GoalReached { node_id: u64 },
    /// Frontier emptied without finding a goal.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// A maze-model callback panicked.
    CollaboratorPanic { stage: PanicStageV1 },
    /// The frontier handed out a node id missing from the arena.
    FrontierInvariantViolation,
}

/// Maze-model callback in which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStageV1 {
    InitialPosition,
    KeyPositions,
    Transitions,
    Cost,
    Heuristic,
}

impl TerminationReasonV1 {
    /// Tagged JSON form, as embedded in graph metadata.
    #[must_use]
    pub fn to_json_value(self) -> serde_json::Value {
        termination_reason_to_json(self)
    }
}

impl PanicStageV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialPosition => "initial_position",
            Self::KeyPositions => "key_positions",
            Self::Transitions => "transitions",
            Self::Cost => "cost",
            Self::Heuristic => "heuristic",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "expansion_order": e.expansion_order,
        "frontier_pop_key": {
            "creation_order": e.frontier_pop_key.creation_order,
            "depth": e.frontier_pop_key.depth,
            "f_cost": e.frontier_pop_key.f_cost,
        },
        "node_id": e.node_id,
        "state_fingerprint": e.state_fingerprint,
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json(s: &SuccessorRecordV1) -> serde_json::Value {
    serde_json::json!({
        "action": s.action,
        "edge_cost": s.edge_cost,
        "index": s.index,
        "outcome": outcome_to_json(s.outcome),
        "position_hex": s.position_hex,
    })
}

fn outcome_to_json(o: SuccessorOutcomeV1) -> serde_json::Value {
    match o {
        SuccessorOutcomeV1::Enqueued { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "enqueued"})
        }
        SuccessorOutcomeV1::DuplicateClosed => serde_json::json!({"type": "duplicate_closed"}),
        SuccessorOutcomeV1::DominatedOpen { queued_g_cost } => {
            serde_json::json!({"queued_g_cost": queued_g_cost, "type": "dominated_open"})
        }
    }
}

fn node_summary_to_json(n: &SearchGraphNodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "g_cost": n.g_cost,
        "h_cost": n.h_cost,
        "is_goal": n.is_goal,
        "keys_collected": n.keys_collected,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "state_fingerprint": n.state_fingerprint,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "closed_set_size": m.closed_set_size,
        "duplicate_policy": m.duplicate_policy.as_str(),
        "frontier_high_water": m.frontier_high_water,
        "heuristic": m.heuristic.as_str(),
        "key_count": m.key_count,
        "root_state_fingerprint": m.root_state_fingerprint,
        "search_policy_digest": m.search_policy_digest,
        "termination_reason": termination_reason_to_json(m.termination_reason),
        "total_dominated_open": m.total_dominated_open,
        "total_duplicates_closed": m.total_duplicates_closed,
        "total_expansions": m.total_expansions,
        "total_stale_pops": m.total_stale_pops,
        "total_successors_generated": m.total_successors_generated,
        "world_id": m.world_id,
    })
}

fn termination_reason_to_json(r: TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReasonV1::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReasonV1::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
        TerminationReasonV1::CollaboratorPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": "collaborator_panic"})
        }
        TerminationReasonV1::FrontierInvariantViolation => {
            serde_json::json!({"type": "frontier_invariant_violation"})
        }
    }
}
