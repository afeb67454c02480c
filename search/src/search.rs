//! Search entry points and the expansion loop.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, trace, warn};
use trikey_kernel::grid::StateKey;

use crate::contract::MazeModel;
use crate::error::{SearchError, SolveError};
use crate::frontier::{BestFirstFrontier, Rejection};
use crate::graph::{
    ExpandEventV1, FrontierPopKeyV1, PanicStageV1, SearchGraphMetadata, SearchGraphNodeSummaryV1,
    SearchGraphV1, SuccessorOutcomeV1, SuccessorRecordV1, TerminationReasonV1,
};
use crate::heuristic::estimate;
use crate::keys::{KeySet, KeyTable, REQUIRED_KEYS};
use crate::node::{NodeIds, SearchNodeV1, SearchStateV1, Step};
use crate::path::{node_at, reconstruct_actions};
use crate::policy::SearchPolicyV1;

/// Result of a search execution.
///
/// Always contains a complete `SearchGraphV1` audit trail regardless of how
/// the search terminated.
#[derive(Debug)]
pub struct SearchResult<P, A> {
    /// The goal node (if found).
    pub goal_node: Option<SearchNodeV1<P, A>>,
    /// The complete search graph audit trail.
    pub graph: SearchGraphV1,
    /// All nodes created during search, indexed by `node_id`.
    pub nodes: Vec<SearchNodeV1<P, A>>,
}

impl<P, A: Clone> SearchResult<P, A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.graph.metadata.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    #[must_use]
    pub fn termination_reason(&self) -> TerminationReasonV1 {
        self.graph.metadata.termination_reason
    }

    /// The action sequence from start to goal, if a goal was reached.
    #[must_use]
    pub fn actions(&self) -> Option<Vec<A>> {
        self.goal_node
            .as_ref()
            .map(|goal| reconstruct_actions(&self.nodes, goal.node_id))
    }

    /// Total arrival cost of the solution path, if a goal was reached.
    #[must_use]
    pub fn path_cost(&self) -> Option<u64> {
        self.goal_node.as_ref().map(|goal| goal.g_cost)
    }
}

/// Check that `model` describes exactly three distinct key cells.
///
/// [`search`] tolerates fewer; callers that want the strict three-key shape
/// call this first.
///
/// # Errors
///
/// Returns [`SearchError::MalformedProblem`] unless exactly
/// [`REQUIRED_KEYS`] distinct key positions are supplied.
pub fn validate_problem<M: MazeModel>(model: &M) -> Result<(), SearchError> {
    let table = KeyTable::new(model.key_positions())?;
    if table.len() != REQUIRED_KEYS {
        return Err(SearchError::MalformedProblem {
            detail: format!(
                "expected {REQUIRED_KEYS} distinct key positions, got {}",
                table.len()
            ),
        });
    }
    Ok(())
}

/// Find a minimum-cost action sequence that visits every key, using the
/// default policy.
///
/// Returns `Ok(None)` when no such sequence exists.
///
/// # Errors
///
/// See [`solve_with_policy`].
pub fn solve<M: MazeModel>(model: &M) -> Result<Option<Vec<M::Action>>, SolveError> {
    solve_with_policy(model, &SearchPolicyV1::default())
}

/// [`solve`] with an explicit policy.
///
/// # Errors
///
/// - [`SolveError::Search`] for pre-flight failures (invalid policy, more
///   than three distinct keys).
/// - [`SolveError::BudgetExceeded`] if `policy.max_expansions` ran out.
/// - [`SolveError::CollaboratorFault`] if a maze-model callback panicked.
pub fn solve_with_policy<M: MazeModel>(
    model: &M,
    policy: &SearchPolicyV1,
) -> Result<Option<Vec<M::Action>>, SolveError> {
    let result = search(model, policy)?;
    match result.termination_reason() {
        TerminationReasonV1::GoalReached { .. } => Ok(result.actions()),
        TerminationReasonV1::FrontierExhausted => Ok(None),
        TerminationReasonV1::ExpansionBudgetExceeded => Err(SolveError::BudgetExceeded {
            expansions: result.graph.metadata.total_expansions,
        }),
        TerminationReasonV1::CollaboratorPanic { stage } => {
            Err(SolveError::CollaboratorFault { stage })
        }
        TerminationReasonV1::FrontierInvariantViolation => Err(SolveError::InvariantViolation),
    }
}

/// Run best-first search from the model's initial position.
///
/// All runtime terminations (goal, exhaustion, budget, caught collaborator
/// panics) return `Ok(SearchResult)` with the audit trail preserved.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight failures: an invalid policy,
/// or more than three distinct key positions. No `SearchGraphV1` is produced
/// in this case.
pub fn search<M: MazeModel>(
    model: &M,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<M::Position, M::Action>, SearchError> {
    policy.validate()?;
    let policy_digest = policy
        .digest()
        .map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })?;

    let mut run = Run::new(model, policy, policy_digest.as_str().to_string());

    let key_positions = match guarded(PanicStageV1::KeyPositions, || model.key_positions()) {
        Ok(keys) => keys,
        Err(stage) => return Ok(run.finish(TerminationReasonV1::CollaboratorPanic { stage })),
    };
    let table = KeyTable::new(key_positions)?;
    run.key_count = table.len() as u64;
    if table.len() < REQUIRED_KEYS {
        warn!(
            world_id = model.world_id(),
            distinct_keys = table.len(),
            "fewer than three distinct keys; goal is collecting every supplied key"
        );
    }

    debug!(
        world_id = model.world_id(),
        heuristic = policy.heuristic.as_str(),
        duplicate_policy = policy.duplicate_policy.as_str(),
        "search started"
    );

    let reason = match run.seed(&table) {
        Ok(()) => run.drive(&table),
        Err(stage) => TerminationReasonV1::CollaboratorPanic { stage },
    };
    Ok(run.finish(reason))
}

/// Call into the maze model, converting a panic into the stage it happened in.
fn guarded<T>(stage: PanicStageV1, f: impl FnOnce() -> T) -> Result<T, PanicStageV1> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| stage)
}

/// Mutable state of one search invocation. Nothing here outlives the call.
struct Run<'m, M: MazeModel> {
    model: &'m M,
    policy: &'m SearchPolicyV1,
    policy_digest: String,
    key_count: u64,
    root_fingerprint: Option<String>,
    frontier: BestFirstFrontier<M::Position>,
    nodes: Vec<SearchNodeV1<M::Position, M::Action>>,
    expansions: Vec<ExpandEventV1>,
    total_generated: u64,
    total_duplicates_closed: u64,
    total_dominated_open: u64,
}

impl<'m, M: MazeModel> Run<'m, M> {
    fn new(model: &'m M, policy: &'m SearchPolicyV1, policy_digest: String) -> Self {
        Self {
            model,
            policy,
            policy_digest,
            key_count: 0,
            root_fingerprint: None,
            frontier: BestFirstFrontier::new(policy.duplicate_policy),
            nodes: Vec::new(),
            expansions: Vec::new(),
            total_generated: 0,
            total_duplicates_closed: 0,
            total_dominated_open: 0,
        }
    }

    /// Create the start node and queue it.
    ///
    /// A key under the start cell counts as collected at the root, so its key
    /// set and heuristic start from that key rather than from an empty set.
    /// The start cell is part of every path, and a start holding every key is
    /// solved by the empty action sequence.
    fn seed(&mut self, table: &KeyTable<M::Position>) -> Result<(), PanicStageV1> {
        let model = self.model;
        let heuristic = self.policy.heuristic;
        let start = guarded(PanicStageV1::InitialPosition, || model.initial_position())?;
        let keys = table.collect_at(&start, KeySet::EMPTY);
        let h_cost = guarded(PanicStageV1::Heuristic, || {
            estimate(heuristic, model, &start, table, keys)
        })?;

        let root = SearchNodeV1::root(start, keys, h_cost);
        self.root_fingerprint = Some(root.state().fingerprint().hex_digest().to_string());
        self.frontier.push(&root);
        self.nodes.push(root);
        Ok(())
    }

    fn drive(&mut self, table: &KeyTable<M::Position>) -> TerminationReasonV1 {
        loop {
            let Some(node_id) = self.frontier.pop() else {
                return TerminationReasonV1::FrontierExhausted;
            };
            let Some(current) = node_at(&self.nodes, node_id).cloned() else {
                return TerminationReasonV1::FrontierInvariantViolation;
            };

            if table.is_complete(current.keys) {
                return TerminationReasonV1::GoalReached { node_id };
            }

            // A popped goal costs no expansion, so the cap applies here.
            let expanded = self.expansions.len() as u64;
            if self.policy.max_expansions.is_some_and(|max| expanded >= max) {
                return TerminationReasonV1::ExpansionBudgetExceeded;
            }

            if let Err(stage) = self.expand(table, &current) {
                return TerminationReasonV1::CollaboratorPanic { stage };
            }
        }
    }

    /// Generate every successor of `current`, then close its state.
    fn expand(
        &mut self,
        table: &KeyTable<M::Position>,
        current: &SearchNodeV1<M::Position, M::Action>,
    ) -> Result<(), PanicStageV1> {
        let model = self.model;
        let state = current.state();
        let mut event = ExpandEventV1 {
            expansion_order: self.expansions.len() as u64,
            node_id: current.node_id,
            state_fingerprint: state.fingerprint().hex_digest().to_string(),
            frontier_pop_key: FrontierPopKeyV1 {
                f_cost: current.f_cost(),
                depth: current.depth,
                creation_order: current.creation_order,
            },
            successors: Vec::new(),
        };

        let generated = guarded(PanicStageV1::Transitions, || {
            model.transitions(&current.position)
        })
        .and_then(|transitions| self.generate(table, current, transitions, &mut event.successors));

        trace!(
            node_id = current.node_id,
            f_cost = event.frontier_pop_key.f_cost,
            keys = current.keys.len(),
            successors = event.successors.len(),
            "expanded"
        );
        self.expansions.push(event);
        generated?;

        self.frontier.close(state);
        Ok(())
    }

    fn generate(
        &mut self,
        table: &KeyTable<M::Position>,
        current: &SearchNodeV1<M::Position, M::Action>,
        transitions: Vec<(M::Action, M::Position)>,
        records: &mut Vec<SuccessorRecordV1>,
    ) -> Result<(), PanicStageV1> {
        let model = self.model;
        let heuristic = self.policy.heuristic;

        for (index, (action, position)) in transitions.into_iter().enumerate() {
            let edge_cost = guarded(PanicStageV1::Cost, || model.cost(&position))?;
            let keys = table.collect_at(&position, current.keys);
            let g_cost = current.g_cost.saturating_add(edge_cost);
            let state = SearchStateV1 { position, keys };
            let label = action.to_string();
            let position_hex = hex::encode(state.position.identity_bytes());
            self.total_generated += 1;

            let outcome = match self.frontier.check(&state, g_cost) {
                Some(Rejection::Closed) => {
                    self.total_duplicates_closed += 1;
                    SuccessorOutcomeV1::DuplicateClosed
                }
                Some(Rejection::DominatedOpen { queued_g_cost }) => {
                    self.total_dominated_open += 1;
                    SuccessorOutcomeV1::DominatedOpen { queued_g_cost }
                }
                None => {
                    let h_cost = guarded(PanicStageV1::Heuristic, || {
                        estimate(heuristic, model, &state.position, table, keys)
                    })?;
                    let node_id = self.nodes.len() as u64;
                    let ids = NodeIds {
                        node_id,
                        creation_order: node_id,
                    };
                    let step = Step {
                        action,
                        position: state.position,
                        keys,
                        edge_cost,
                    };
                    let child = current.child(ids, step, h_cost);
                    self.frontier.push(&child);
                    self.nodes.push(child);
                    SuccessorOutcomeV1::Enqueued { to_node: node_id }
                }
            };

            records.push(SuccessorRecordV1 {
                index: index as u64,
                action: label,
                position_hex,
                edge_cost,
                outcome,
            });
        }
        Ok(())
    }

    fn finish(self, termination_reason: TerminationReasonV1) -> SearchResult<M::Position, M::Action> {
        let goal_id = match termination_reason {
            TerminationReasonV1::GoalReached { node_id } => Some(node_id),
            _ => None,
        };
        let expansion_of: HashMap<u64, u64> = self
            .expansions
            .iter()
            .map(|e| (e.node_id, e.expansion_order))
            .collect();

        let node_summaries: Vec<SearchGraphNodeSummaryV1> = self
            .nodes
            .iter()
            .map(|n| SearchGraphNodeSummaryV1 {
                node_id: n.node_id,
                parent_id: n.parent_id,
                state_fingerprint: n.state().fingerprint().hex_digest().to_string(),
                depth: n.depth,
                g_cost: n.g_cost,
                h_cost: n.h_cost,
                keys_collected: n.keys.len() as u64,
                is_goal: goal_id == Some(n.node_id),
                expansion_order: expansion_of.get(&n.node_id).copied(),
            })
            .collect();

        let total_expansions = self.expansions.len() as u64;
        let goal_node = goal_id.and_then(|id| node_at(&self.nodes, id)).cloned();

        debug!(
            world_id = self.model.world_id(),
            termination = ?termination_reason,
            expansions = total_expansions,
            nodes = self.nodes.len(),
            path_cost = goal_node.as_ref().map(|g| g.g_cost),
            "search finished"
        );

        let graph = SearchGraphV1 {
            expansions: self.expansions,
            node_summaries,
            metadata: SearchGraphMetadata {
                world_id: self.model.world_id().to_string(),
                search_policy_digest: self.policy_digest,
                root_state_fingerprint: self.root_fingerprint,
                key_count: self.key_count,
                total_expansions,
                total_successors_generated: self.total_generated,
                total_duplicates_closed: self.total_duplicates_closed,
                total_dominated_open: self.total_dominated_open,
                total_stale_pops: self.frontier.stale_pops(),
                frontier_high_water: self.frontier.high_water(),
                closed_set_size: self.frontier.closed_count() as u64,
                termination_reason,
                heuristic: self.policy.heuristic,
                duplicate_policy: self.policy.duplicate_policy,
            },
        };

        SearchResult {
            goal_node,
            graph,
            nodes: self.nodes,
        }
    }
}
