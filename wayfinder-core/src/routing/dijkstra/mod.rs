use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::{debug, warn};
use petgraph::graph::NodeIndex;

use super::SearchBudget;
use super::path::{reconstruct, route_from_nodes};
use crate::Distance;
use crate::model::{Graph, Landmarks, Location, RouteOption};

pub(crate) mod state;

use state::State;

/// Settled part of a Dijkstra search
pub(crate) struct SearchTree {
    /// Final distances of settled nodes only
    pub(crate) distances: HashMap<NodeIndex, Distance>,
    pub(crate) predecessors: HashMap<NodeIndex, NodeIndex>,
    pub(crate) reached_target: bool,
}

/// Dijkstra's algorithm over the location graph.
///
/// Stops as soon as `target` is popped from the frontier, since its distance
/// is final at that point. Without a target the whole reachable component is
/// settled (within the budget).
pub(crate) fn dijkstra(
    graph: &Graph,
    start: NodeIndex,
    target: Option<NodeIndex>,
    budget: SearchBudget,
) -> SearchTree {
    let estimated_nodes = graph.location_count();
    let mut distances: HashMap<NodeIndex, Distance> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4 + 1);
    let mut settled = FixedBitSet::with_capacity(estimated_nodes);
    let mut expansions = 0usize;
    let mut reached_target = false;

    // Start node has distance 0
    heap.push(State {
        priority: 0.0,
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        if target == Some(node) {
            settled.insert(node.index());
            reached_target = true;
            break;
        }

        expansions += 1;
        if budget.exhausted(expansions) {
            warn!(
                "Search from {} ran out of budget after {} expansions",
                graph.location(start),
                expansions - 1
            );
            break;
        }
        settled.insert(node.index());

        // Examine neighbors
        for (next, weight) in graph.edges(node) {
            let next_cost = cost + weight;
            if budget.exceeds_cost(next_cost) {
                continue;
            }

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        priority: next_cost,
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            priority: next_cost,
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    // Frontier entries are only upper bounds
    distances.retain(|node, _| settled.contains(node.index()));

    SearchTree {
        distances,
        predecessors,
        reached_target,
    }
}

/// Shortest route between two locations, or `None` if the goal is unreachable
/// or either location is unknown.
pub fn shortest_path<L: Landmarks + ?Sized>(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    landmarks: &L,
) -> Option<RouteOption> {
    shortest_path_within(graph, start, goal, landmarks, SearchBudget::unlimited())
}

/// [`shortest_path`] that fails closed once `budget` is exceeded
pub fn shortest_path_within<L: Landmarks + ?Sized>(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    landmarks: &L,
    budget: SearchBudget,
) -> Option<RouteOption> {
    let (Some(source), Some(target)) = (graph.node(start.name()), graph.node(goal.name())) else {
        debug!("Cannot route between unknown locations {start} and {goal}");
        return None;
    };

    let tree = dijkstra(graph, source, Some(target), budget);
    if !tree.reached_target {
        debug!("No route found from {start} to {goal}");
        return None;
    }

    let distance = tree.distances.get(&target).copied()?;
    let nodes = reconstruct(&tree.predecessors, source, target)?;
    route_from_nodes(graph, &nodes, distance, landmarks)
}

/// Distances from `source` to every reachable location. When `budget` cuts
/// the search short only the locations settled so far are reported.
pub fn shortest_distances(
    graph: &Graph,
    source: &Location,
    budget: SearchBudget,
) -> HashMap<Location, Distance> {
    let Some(start) = graph.node(source.name()) else {
        return HashMap::new();
    };

    distances_from(graph, start, budget)
        .into_iter()
        .map(|(node, distance)| (graph.location(node).clone(), distance))
        .collect()
}

pub(crate) fn distances_from(
    graph: &Graph,
    source: NodeIndex,
    budget: SearchBudget,
) -> HashMap<NodeIndex, Distance> {
    dijkstra(graph, source, None, budget).distances
}

/// Shortest distance between two locations, if connected
pub(crate) fn distances_between(graph: &Graph, from: &Location, to: &Location) -> Option<Distance> {
    let source = graph.node(from.name())?;
    let target = graph.node(to.name())?;
    let tree = dijkstra(graph, source, Some(target), SearchBudget::unlimited());
    if tree.reached_target {
        tree.distances.get(&target).copied()
    } else {
        None
    }
}
