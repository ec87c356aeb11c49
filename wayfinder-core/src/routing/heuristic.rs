//! Heuristic (A*-shaped) search
//!
//! The frontier is keyed by `g + h(node, goal)`. Results are only guaranteed
//! shortest when the heuristic is admissible, i.e. never overestimates the
//! remaining distance. Locations carry no coordinates, so the default
//! [`ZeroHeuristic`] is used, under which the search is exactly Dijkstra.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::{debug, warn};
use petgraph::graph::NodeIndex;

use super::SearchBudget;
use super::dijkstra::state::State;
use super::path::{reconstruct, route_from_nodes};
use crate::Distance;
use crate::model::{Graph, Landmarks, Location, RouteOption};

/// Estimate of the remaining distance from `node` to `goal`.
///
/// Implementations must be admissible before replacing [`ZeroHeuristic`].
pub trait Heuristic {
    fn estimate(&self, node: &Location, goal: &Location) -> Distance;
}

impl<F> Heuristic for F
where
    F: Fn(&Location, &Location) -> Distance,
{
    fn estimate(&self, node: &Location, goal: &Location) -> Distance {
        self(node, goal)
    }
}

/// Always estimates zero; trivially admissible
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: &Location, _goal: &Location) -> Distance {
        0.0
    }
}

pub fn heuristic_path<H, L>(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    heuristic: &H,
    landmarks: &L,
) -> Option<RouteOption>
where
    H: Heuristic + ?Sized,
    L: Landmarks + ?Sized,
{
    heuristic_path_within(
        graph,
        start,
        goal,
        heuristic,
        landmarks,
        SearchBudget::unlimited(),
    )
}

/// [`heuristic_path`] that fails closed once `budget` is exceeded
pub fn heuristic_path_within<H, L>(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    heuristic: &H,
    landmarks: &L,
    budget: SearchBudget,
) -> Option<RouteOption>
where
    H: Heuristic + ?Sized,
    L: Landmarks + ?Sized,
{
    let (Some(source), Some(target)) = (graph.node(start.name()), graph.node(goal.name())) else {
        debug!("Cannot route between unknown locations {start} and {goal}");
        return None;
    };

    let mut g_score: HashMap<NodeIndex, Distance> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut closed = FixedBitSet::with_capacity(graph.location_count());
    let mut open = BinaryHeap::new();
    let mut expansions = 0usize;

    g_score.insert(source, 0.0);
    open.push(State {
        priority: heuristic.estimate(start, goal),
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node, .. }) = open.pop() {
        if closed.contains(node.index()) || g_score.get(&node).is_some_and(|&g| cost > g) {
            continue;
        }

        if node == target {
            let nodes = reconstruct(&predecessors, source, target)?;
            return route_from_nodes(graph, &nodes, cost, landmarks);
        }

        closed.insert(node.index());
        expansions += 1;
        if budget.exhausted(expansions) {
            warn!(
                "Heuristic search from {start} to {goal} ran out of budget after {} expansions",
                expansions - 1
            );
            return None;
        }

        for (next, weight) in graph.edges(node) {
            let tentative = cost + weight;
            if budget.exceeds_cost(tentative) {
                continue;
            }

            if g_score.get(&next).is_none_or(|&g| tentative < g) {
                g_score.insert(next, tentative);
                predecessors.insert(next, node);
                // Reopen: an inconsistent heuristic may close a node too early
                closed.set(next.index(), false);
                open.push(State {
                    priority: tentative + heuristic.estimate(graph.location(next), goal),
                    cost: tentative,
                    node: next,
                });
            }
        }
    }

    debug!("No route found from {start} to {goal}");
    None
}
