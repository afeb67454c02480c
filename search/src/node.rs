//! Search states, search nodes, and the frontier ordering key.

use trikey_kernel::grid::StateKey;
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::keys::KeySet;

/// The unit of duplicate detection: a cell plus the keys collected on the
/// way there. Path cost, parent, and inducing action are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchStateV1<P> {
    pub position: P,
    pub keys: KeySet,
}

impl<P: StateKey> SearchStateV1<P> {
    /// `canonical_hash(SearchState, position.identity_bytes() || keys.bits())`.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let mut data = self.position.identity_bytes();
        data.push(self.keys.bits());
        canonical_hash(HashDomain::SearchState, &data)
    }
}

/// One node of the search tree.
///
/// Nodes live in an arena indexed by `node_id`; `parent_id` is the only link
/// between them, so the tree has no cycles and no shared mutable state.
/// Fields are never modified after construction.
///
/// Ordering for frontier extraction uses `(f_cost, depth, creation_order)`
/// where `f_cost = g_cost + h_cost`. Lower is better; ties broken by
/// shallower depth, then older creation order.
#[derive(Debug, Clone)]
pub struct SearchNodeV1<P, A> {
    /// Arena index of this node.
    pub node_id: u64,
    /// Parent node ID (`None` for the start node).
    pub parent_id: Option<u64>,
    /// Cell this node stands on.
    pub position: P,
    /// Keys collected along the path, including one at `position`.
    pub keys: KeySet,
    /// The move that produced this node from its parent.
    pub action: Option<A>,
    /// Tree depth (start = 0).
    pub depth: u32,
    /// Accumulated arrival cost from the start (0 for the start node).
    pub g_cost: u64,
    /// Remaining-cost estimate, computed once at construction.
    pub h_cost: u64,
    /// Per-run counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<P: StateKey, A: Clone> SearchNodeV1<P, A> {
    /// The start node: no parent, no action, zero cost.
    #[must_use]
    pub fn root(position: P, keys: KeySet, h_cost: u64) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            position,
            keys,
            action: None,
            depth: 0,
            g_cost: 0,
            h_cost,
            creation_order: 0,
        }
    }

    /// A successor of `self` reached by `action`.
    ///
    /// `keys` must already include any key at `position`; the parent's set is
    /// never modified. `g_cost` saturates rather than wrapping.
    #[must_use]
    pub fn child(&self, ids: NodeIds, step: Step<P, A>, h_cost: u64) -> Self {
        Self {
            node_id: ids.node_id,
            parent_id: Some(self.node_id),
            position: step.position,
            keys: step.keys,
            action: Some(step.action),
            depth: self.depth.saturating_add(1),
            g_cost: self.g_cost.saturating_add(step.edge_cost),
            h_cost,
            creation_order: ids.creation_order,
        }
    }

    /// `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// The duplicate-detection identity of this node.
    #[must_use]
    pub fn state(&self) -> SearchStateV1<P> {
        SearchStateV1 {
            position: self.position.clone(),
            keys: self.keys,
        }
    }
}

/// Two nodes are equal iff they represent the same search state.
impl<P: PartialEq, A> PartialEq for SearchNodeV1<P, A> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.keys == other.keys
    }
}

/// Identifiers handed out by the search loop for a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIds {
    pub node_id: u64,
    pub creation_order: u64,
}

/// One generated transition, after key collection and cost lookup.
#[derive(Debug, Clone)]
pub struct Step<P, A> {
    pub action: A,
    pub position: P,
    pub keys: KeySet,
    pub edge_cost: u64,
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: u64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<P: StateKey, A: Clone> From<&SearchNodeV1<P, A>> for FrontierKey {
    fn from(node: &SearchNodeV1<P, A>) -> Self {
        Self {
            f_cost: node.f_cost(),
            depth: node.depth,
            creation_order: node.creation_order,
        }
    }
}
