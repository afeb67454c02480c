//! Remaining-cost estimates.
//!
//! All estimates are minima/maxima of `MazeModel::distance` over the
//! uncollected keys, so they inherit its admissibility. With every key
//! collected they return 0, which lets a completed node reach the front of
//! the frontier on its path cost alone.

use crate::contract::MazeModel;
use crate::keys::{KeySet, KeyTable};
use crate::policy::HeuristicV1;

/// Distance from `position` to the closest key not in `collected`.
///
/// Returns 0 when no keys remain.
pub fn nearest_uncollected_key<M: MazeModel>(
    model: &M,
    position: &M::Position,
    table: &KeyTable<M::Position>,
    collected: KeySet,
) -> u64 {
    table
        .uncollected(collected)
        .map(|key| model.distance(position, key))
        .min()
        .unwrap_or(0)
}

/// Distance from `position` to the farthest key not in `collected`.
///
/// Returns 0 when no keys remain.
pub fn farthest_uncollected_key<M: MazeModel>(
    model: &M,
    position: &M::Position,
    table: &KeyTable<M::Position>,
    collected: KeySet,
) -> u64 {
    table
        .uncollected(collected)
        .map(|key| model.distance(position, key))
        .max()
        .unwrap_or(0)
}

/// Evaluate the estimate selected by `heuristic`.
pub fn estimate<M: MazeModel>(
    heuristic: HeuristicV1,
    model: &M,
    position: &M::Position,
    table: &KeyTable<M::Position>,
    collected: KeySet,
) -> u64 {
    match heuristic {
        HeuristicV1::NearestKey => nearest_uncollected_key(model, position, table, collected),
        HeuristicV1::FarthestKey => farthest_uncollected_key(model, position, table, collected),
        HeuristicV1::Zero => 0,
    }
}
