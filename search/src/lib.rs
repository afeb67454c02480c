//! Trikey Search: informed best-first search for the three-key maze problem.
//!
//! Given a caller-supplied [`MazeModel`], finds a minimum-cost sequence of
//! moves from the start cell that visits all three key cells in any order.
//!
//! # Crate dependency graph
//!
//! ```text
//! trikey_kernel  ←  trikey_search  ←  trikey_harness
//! (cells, hashing)  (frontier, nodes)  (grid worlds, runner, replay)
//! ```
//!
//! # Key types
//!
//! - [`MazeModel`]: the transition/cost collaborator the search consumes
//! - [`KeySet`]: collected keys, copied on extension
//! - [`SearchNodeV1`]: immutable tree node with `(f, depth, order)` ordering
//! - [`BestFirstFrontier`]: priority queue plus closed set of search states
//! - [`SearchPolicyV1`]: heuristic, duplicate pruning, expansion budget
//! - [`SearchGraphV1`]: expansion-event audit log
//!
//! [`MazeModel`]: contract::MazeModel
//! [`KeySet`]: keys::KeySet
//! [`SearchNodeV1`]: node::SearchNodeV1
//! [`BestFirstFrontier`]: frontier::BestFirstFrontier
//! [`SearchPolicyV1`]: policy::SearchPolicyV1
//! [`SearchGraphV1`]: graph::SearchGraphV1

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod keys;
pub mod node;
pub mod path;
pub mod policy;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use search::{search, solve, solve_with_policy, validate_problem, SearchResult};
