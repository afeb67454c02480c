//! Maze model contract trait.

use std::fmt;

use trikey_kernel::grid::StateKey;

/// The caller-supplied transition and cost model the search runs against.
///
/// # Contract
///
/// - `transitions` must be deterministic: same position → same successors in
///   the same order. The search does not re-sort them, so this order is part
///   of the tie-break for equal-priority successors.
/// - `cost` is the cost of *arriving* at a position, not of the edge. A move
///   `a → b` costs `cost(b)` regardless of `a`.
/// - `distance` must never overstate the number of moves between two
///   positions times the cheapest arrival cost, or the heuristic loses
///   admissibility. For unit-cost grids, Manhattan distance satisfies this.
/// - All callbacks are read-only. The model may be shared across concurrent
///   searches if its implementation is `Sync`.
pub trait MazeModel {
    /// A maze cell.
    type Position: StateKey;
    /// An opaque move label, emitted verbatim in the solution.
    type Action: Clone + Eq + fmt::Debug + fmt::Display;

    /// Identifier recorded in search graph metadata.
    fn world_id(&self) -> &str;

    /// The cell the search starts from.
    fn initial_position(&self) -> Self::Position;

    /// The key cells. Exactly three distinct positions are expected.
    fn key_positions(&self) -> Vec<Self::Position>;

    /// All legal moves from `position` and the cell each one lands on.
    fn transitions(&self, position: &Self::Position) -> Vec<(Self::Action, Self::Position)>;

    /// The cost of arriving at `position`.
    fn cost(&self, position: &Self::Position) -> u64;

    /// Manhattan-style distance estimate between two cells.
    fn distance(&self, from: &Self::Position, to: &Self::Position) -> u64;
}
