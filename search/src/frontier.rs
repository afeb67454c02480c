//! Best-first frontier with a closed set of expanded search states.
//!
//! The heap holds node ids, not nodes; the search loop's arena owns every
//! node. Uses `BTreeSet`/`BTreeMap` (not hash containers) so the closed set
//! iterates deterministically when summarized.
//!
//! # Discipline
//!
//! 1. Before a successor is created, [`BestFirstFrontier::check`] rejects it
//!    if its state is closed, or (under `BestCostOnInsert`) if the same state
//!    is already queued at an equal or lower path cost.
//! 2. [`BestFirstFrontier::pop`] skips entries whose state was closed after
//!    they were queued, so a state is handed out for expansion at most once.
//! 3. The search loop calls [`BestFirstFrontier::close`] after it has
//!    generated every successor of the popped node.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use trikey_kernel::grid::StateKey;

use crate::node::{FrontierKey, SearchNodeV1, SearchStateV1};
use crate::policy::DuplicatePolicyV1;

/// Why a successor was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The state has already been expanded.
    Closed,
    /// The state is already queued at a path cost no higher than this one.
    DominatedOpen { queued_g_cost: u64 },
}

/// A frontier entry wrapping a node id with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry<P> {
    key: Reverse<FrontierKey>,
    node_id: u64,
    state: SearchStateV1<P>,
}

impl<P> PartialEq for FrontierEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<P> Eq for FrontierEntry<P> {}

impl<P> PartialOrd for FrontierEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for FrontierEntry<P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best node
/// - A `BTreeSet` of closed (expanded) search states
/// - A `BTreeMap` of the cheapest path cost queued per open state
pub struct BestFirstFrontier<P> {
    heap: BinaryHeap<FrontierEntry<P>>,
    closed: BTreeSet<SearchStateV1<P>>,
    best_open: BTreeMap<SearchStateV1<P>, u64>,
    policy: DuplicatePolicyV1,
    high_water: u64,
    stale_pops: u64,
}

impl<P: StateKey> BestFirstFrontier<P> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new(policy: DuplicatePolicyV1) -> Self {
        Self {
            heap: BinaryHeap::new(),
            closed: BTreeSet::new(),
            best_open: BTreeMap::new(),
            policy,
            high_water: 0,
            stale_pops: 0,
        }
    }

    /// Decide whether a successor with `state` reached at `g_cost` may be
    /// queued. `None` means admit.
    #[must_use]
    pub fn check(&self, state: &SearchStateV1<P>, g_cost: u64) -> Option<Rejection> {
        if self.closed.contains(state) {
            return Some(Rejection::Closed);
        }
        if self.policy == DuplicatePolicyV1::BestCostOnInsert {
            if let Some(&queued_g_cost) = self.best_open.get(state) {
                if queued_g_cost <= g_cost {
                    return Some(Rejection::DominatedOpen { queued_g_cost });
                }
            }
        }
        None
    }

    /// Queue `node`. Callers must have admitted it via [`Self::check`].
    pub fn push<A: Clone>(&mut self, node: &SearchNodeV1<P, A>) {
        let state = node.state();
        self.best_open
            .entry(state.clone())
            .and_modify(|g| *g = (*g).min(node.g_cost))
            .or_insert(node.g_cost);
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(node)),
            node_id: node.node_id,
            state,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the id of the best (lowest key) node whose state is not closed.
    #[must_use]
    pub fn pop(&mut self) -> Option<u64> {
        while let Some(entry) = self.heap.pop() {
            if self.closed.contains(&entry.state) {
                self.stale_pops += 1;
                continue;
            }
            return Some(entry.node_id);
        }
        None
    }

    /// Mark `state` as expanded. Returns `false` if it was already closed.
    pub fn close(&mut self, state: SearchStateV1<P>) -> bool {
        self.best_open.remove(&state);
        self.closed.insert(state)
    }

    /// Check if a state has been expanded.
    #[must_use]
    pub fn is_closed(&self, state: &SearchStateV1<P>) -> bool {
        self.closed.contains(state)
    }

    /// Current number of queued entries (including stale ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of closed states.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Entries discarded at pop time because their state was already closed.
    #[must_use]
    pub fn stale_pops(&self) -> u64 {
        self.stale_pops
    }
}
