//! Path reconstruction and route assembly shared by the searches

use hashbrown::HashMap;
use itertools::Itertools;
use log::warn;
use petgraph::graph::NodeIndex;

use super::dijkstra::distances_between;
use crate::model::{Graph, Landmarks, Location, RouteOption};
use crate::{Distance, Minutes, WALKING_RATE};

/// Estimated minutes for a distance at [`WALKING_RATE`]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimated_minutes(distance: Distance) -> Minutes {
    (distance / WALKING_RATE).ceil() as Minutes
}

/// Follows predecessors back from `goal`. Returns `None` if the walk does not
/// end at `start`.
pub(crate) fn reconstruct(
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(&previous) = predecessors.get(&current) {
        nodes.push(previous);
        current = previous;
        // A walk longer than the map means a predecessor cycle
        if nodes.len() > predecessors.len() + 1 {
            break;
        }
    }
    nodes.reverse();

    if nodes.first() == Some(&start) {
        Some(nodes)
    } else {
        warn!(
            "Discarding reconstructed path: it starts at node {} instead of {}",
            nodes[0].index(),
            start.index()
        );
        None
    }
}

/// Builds a single-leg route from search output
pub(crate) fn route_from_nodes<L: Landmarks + ?Sized>(
    graph: &Graph,
    nodes: &[NodeIndex],
    distance: Distance,
    landmarks: &L,
) -> Option<RouteOption> {
    if nodes.len() < 2 {
        return None;
    }
    let path: Vec<Location> = nodes
        .iter()
        .map(|&node| graph.location(node).clone())
        .collect();
    let tags = landmarks.along(&path);
    Some(RouteOption::from_parts(
        path,
        distance,
        estimated_minutes(distance),
        tags,
    ))
}

/// Total distance along `path`.
///
/// Consecutive locations that are not directly connected contribute their
/// shortest-path distance instead. Returns `None` if some pair is disconnected
/// or a location is unknown.
pub fn path_distance(graph: &Graph, path: &[Location]) -> Option<Distance> {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            graph
                .distance_between(from, to)
                .or_else(|| distances_between(graph, from, to))
        })
        .sum()
}

/// Concatenates legs into one route, dropping the duplicated boundary node
/// between consecutive legs. Distance and time add up leg by leg.
#[derive(Debug, Clone)]
pub(crate) struct RouteBuilder {
    path: Vec<Location>,
    distance: Distance,
    time: Minutes,
}

impl RouteBuilder {
    pub(crate) fn new(start: &Location) -> Self {
        Self {
            path: vec![start.clone()],
            distance: 0.0,
            time: 0,
        }
    }

    pub(crate) fn current(&self) -> &Location {
        &self.path[self.path.len() - 1]
    }

    pub(crate) fn push_leg(&mut self, leg: &RouteOption) {
        debug_assert_eq!(leg.start(), self.current());
        self.path.extend(leg.path().iter().skip(1).cloned());
        self.distance += leg.distance();
        self.time += leg.time();
    }

    pub(crate) fn finish<L: Landmarks + ?Sized>(self, landmarks: &L) -> Option<RouteOption> {
        if self.path.len() < 2 {
            return None;
        }
        let tags = landmarks.along(&self.path);
        Some(RouteOption::from_parts(
            self.path,
            self.distance,
            self.time,
            tags,
        ))
    }
}
