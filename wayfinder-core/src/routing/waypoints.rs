//! Routes that visit a set of mandatory waypoints
//!
//! The visiting order is a greedy nearest-neighbour approximation of the
//! travelling salesman problem: every step moves to the closest unvisited
//! waypoint by shortest-path distance. Each step is locally optimal; the total
//! ordering is not guaranteed to be minimal.

use log::{debug, trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::SearchBudget;
use super::dijkstra::{distances_from, shortest_path_within};
use super::path::RouteBuilder;
use crate::model::route::push_unique;
use crate::model::{Graph, Landmarks, Location, RouteOption};

/// A multi-leg route together with the waypoints it actually visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRoute {
    pub route: RouteOption,
    /// Waypoints visited, in visiting order
    pub realized: Vec<Location>,
    /// Requested waypoints that could not be reached and were left out
    pub skipped: Vec<Location>,
}

impl WaypointRoute {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Same waypoint outcome over a different route value
    #[must_use]
    pub fn with_route(self, route: RouteOption) -> Self {
        Self { route, ..self }
    }
}

/// Builds routes through mandatory waypoints over a borrowed graph.
pub struct WaypointRouter<'a, L: ?Sized> {
    graph: &'a Graph,
    landmarks: &'a L,
    budget: SearchBudget,
}

impl<'a, L: Landmarks + ?Sized> WaypointRouter<'a, L> {
    pub fn new(graph: &'a Graph, landmarks: &'a L) -> Self {
        Self {
            graph,
            landmarks,
            budget: SearchBudget::unlimited(),
        }
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Routes from `start` to `destination` through every reachable waypoint.
    ///
    /// The first result uses the greedy ordering. With two or more waypoints
    /// the reversed ordering is added, and with three or more a variant that
    /// re-evaluates the nearest reachable waypoint after every leg. Duplicate
    /// routes are dropped. An empty result means the destination itself could
    /// not be reached.
    pub fn route(
        &self,
        start: &Location,
        destination: &Location,
        waypoints: &[Location],
    ) -> Vec<WaypointRoute> {
        let waypoints = unique(waypoints);
        let order = self.greedy_order(start, &waypoints);
        debug!(
            "Routing {start} -> {destination} through {} waypoints, greedy order {order:?}",
            waypoints.len()
        );

        let mut candidates = vec![self.assemble(start, destination, &order)];
        if waypoints.len() >= 2 {
            let reversed: Vec<Location> = order.iter().rev().cloned().collect();
            candidates.push(self.assemble(start, destination, &reversed));
        }
        if waypoints.len() >= 3 {
            candidates.push(self.nearest_neighbour_live(start, destination, &waypoints));
        }

        let mut seen: Vec<RouteOption> = Vec::with_capacity(candidates.len());
        candidates
            .into_iter()
            .flatten()
            .filter(|candidate| push_unique(&mut seen, candidate.route.clone()))
            .collect()
    }

    /// Greedy nearest-neighbour visiting order.
    ///
    /// Waypoints that cannot be reached from the chain are kept at the end so
    /// that assembly reports them as skipped.
    pub fn greedy_order(&self, start: &Location, waypoints: &[Location]) -> Vec<Location> {
        let mut remaining = unique(waypoints);
        let mut order = Vec::with_capacity(remaining.len());
        let mut current = start.clone();

        while !remaining.is_empty() {
            match self.nearest(&current, &remaining) {
                Some(index) => {
                    current = remaining.remove(index);
                    order.push(current.clone());
                }
                None => break,
            }
        }

        order.extend(remaining);
        order
    }

    /// Index of the waypoint closest to `from`, ties resolved by position
    fn nearest(&self, from: &Location, candidates: &[Location]) -> Option<usize> {
        let source = self.graph.node(from.name())?;
        let distances = distances_from(self.graph, source, self.budget);

        candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let node = self.graph.node(candidate.name())?;
                distances.get(&node).map(|&distance| (index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Joins legs along a fixed ordering, skipping unreachable waypoints
    fn assemble(
        &self,
        start: &Location,
        destination: &Location,
        order: &[Location],
    ) -> Option<WaypointRoute> {
        let mut builder = RouteBuilder::new(start);
        let mut realized = Vec::with_capacity(order.len());
        let mut skipped = Vec::new();

        for waypoint in order {
            if builder.current() == waypoint {
                realized.push(waypoint.clone());
                continue;
            }
            match self.leg(builder.current(), waypoint) {
                Some(leg) => {
                    trace!("Leg {} -> {waypoint}: {:.1}", builder.current(), leg.distance());
                    builder.push_leg(&leg);
                    realized.push(waypoint.clone());
                }
                None => {
                    warn!("Skipping unreachable waypoint {waypoint}");
                    skipped.push(waypoint.clone());
                }
            }
        }

        self.finish(builder, destination, realized, skipped)
    }

    /// Picks the nearest reachable waypoint after each realized leg
    fn nearest_neighbour_live(
        &self,
        start: &Location,
        destination: &Location,
        waypoints: &[Location],
    ) -> Option<WaypointRoute> {
        let mut builder = RouteBuilder::new(start);
        let mut remaining = waypoints.to_vec();
        let mut realized = Vec::with_capacity(remaining.len());
        let mut skipped = Vec::new();

        while !remaining.is_empty() {
            let Some(index) = self.nearest(builder.current(), &remaining) else {
                warn!("Skipping unreachable waypoints {remaining:?}");
                skipped.append(&mut remaining);
                break;
            };
            let waypoint = remaining.remove(index);
            if builder.current() != &waypoint {
                match self.leg(builder.current(), &waypoint) {
                    Some(leg) => builder.push_leg(&leg),
                    None => {
                        skipped.push(waypoint);
                        continue;
                    }
                }
            }
            realized.push(waypoint);
        }

        self.finish(builder, destination, realized, skipped)
    }

    fn finish(
        &self,
        mut builder: RouteBuilder,
        destination: &Location,
        realized: Vec<Location>,
        skipped: Vec<Location>,
    ) -> Option<WaypointRoute> {
        if builder.current() != destination {
            let Some(leg) = self.leg(builder.current(), destination) else {
                warn!(
                    "Destination {destination} is unreachable from {}",
                    builder.current()
                );
                return None;
            };
            builder.push_leg(&leg);
        }

        builder.finish(self.landmarks).map(|route| WaypointRoute {
            route,
            realized,
            skipped,
        })
    }

    /// Routes `start -> landmark -> end` for up to `samples` random endpoint
    /// pairs distinct from the landmark.
    pub fn routes_through<R: Rng + ?Sized>(
        &self,
        landmark: &Location,
        samples: usize,
        rng: &mut R,
    ) -> Vec<RouteOption> {
        let candidates: Vec<&Location> = self
            .graph
            .locations()
            .filter(|location| *location != landmark)
            .collect();

        let mut routes = Vec::new();
        for _ in 0..samples.min(self.graph.location_count()) {
            let Some(&start) = candidates.choose(rng) else {
                break;
            };
            let ends: Vec<&Location> = candidates
                .iter()
                .copied()
                .filter(|location| *location != start)
                .collect();
            let Some(&end) = ends.choose(rng) else {
                break;
            };

            let (Some(first), Some(second)) =
                (self.leg(start, landmark), self.leg(landmark, end))
            else {
                trace!("No route {start} -> {landmark} -> {end}");
                continue;
            };

            let mut builder = RouteBuilder::new(start);
            builder.push_leg(&first);
            builder.push_leg(&second);
            if let Some(route) = builder.finish(self.landmarks) {
                push_unique(&mut routes, route);
            }
        }

        routes
    }

    fn leg(&self, from: &Location, to: &Location) -> Option<RouteOption> {
        shortest_path_within(self.graph, from, to, self.landmarks, self.budget)
    }
}

/// Waypoints with repeats removed, first occurrence kept
fn unique(waypoints: &[Location]) -> Vec<Location> {
    let mut result: Vec<Location> = Vec::with_capacity(waypoints.len());
    for waypoint in waypoints {
        if !result.contains(waypoint) {
            result.push(waypoint.clone());
        }
    }
    result
}
