//! Path reconstruction over the node arena.
//!
//! Node ids are arena indices and every parent is created before its
//! children, so a walk from any node strictly decreases the id and ends at
//! the start node.

use crate::node::SearchNodeV1;

/// Arena lookup by node id.
pub(crate) fn node_at<P, A>(nodes: &[SearchNodeV1<P, A>], node_id: u64) -> Option<&SearchNodeV1<P, A>> {
    usize::try_from(node_id).ok().and_then(|i| nodes.get(i))
}

/// Node ids from the start node to `goal_node_id`, inclusive.
///
/// Returns an empty vector if `goal_node_id` is not in the arena.
#[must_use]
pub fn reconstruct_path<P, A>(nodes: &[SearchNodeV1<P, A>], goal_node_id: u64) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current = node_at(nodes, goal_node_id);

    while let Some(node) = current {
        path.push(node.node_id);
        current = node.parent_id.and_then(|id| {
            debug_assert!(id < node.node_id, "parent must precede child");
            node_at(nodes, id)
        });
    }

    path.reverse();
    path
}

/// The actions leading from the start node to `goal_node_id`, in order.
///
/// The start node contributes no action, so a goal at the start yields an
/// empty sequence.
#[must_use]
pub fn reconstruct_actions<P, A: Clone>(nodes: &[SearchNodeV1<P, A>], goal_node_id: u64) -> Vec<A> {
    reconstruct_path(nodes, goal_node_id)
        .into_iter()
        .filter_map(|id| node_at(nodes, id).and_then(|n| n.action.clone()))
        .collect()
}
