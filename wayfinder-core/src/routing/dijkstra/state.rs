use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::Distance;

/// Frontier entry. `priority` is the tentative distance for Dijkstra and
/// `g + h` for heuristic search.
#[derive(Copy, Clone, PartialEq)]
pub(crate) struct State {
    pub(crate) priority: Distance,
    pub(crate) cost: Distance,
    pub(crate) node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by priority (reversed from standard Rust BinaryHeap)
        other.priority.total_cmp(&self.priority)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
