use log::{debug, info};
use rand::Rng;
use rand::seq::IteratorRandom;

use super::dijkstra::shortest_path_within;
use super::heuristic::{Heuristic, ZeroHeuristic, heuristic_path_within};
use super::path::RouteBuilder;
use super::{SearchBudget, WaypointRoute, WaypointRouter};
use crate::model::route::push_unique;
use crate::model::{Graph, Landmarks, Location, RouteOption};
use crate::{DEFAULT_LANDMARK_SAMPLES, Error};

/// Entry point for route queries.
///
/// Combines the searches and the waypoint router; holds the landmark
/// capability, the heuristic and the search budget. The graph is lent to
/// every query.
#[derive(Debug, Clone)]
pub struct RoutePlanner<L, H = ZeroHeuristic> {
    landmarks: L,
    heuristic: H,
    budget: SearchBudget,
}

impl<L: Landmarks> RoutePlanner<L> {
    pub fn new(landmarks: L) -> Self {
        Self {
            landmarks,
            heuristic: ZeroHeuristic,
            budget: SearchBudget::unlimited(),
        }
    }
}

impl<L: Landmarks, H: Heuristic> RoutePlanner<L, H> {
    /// Replaces the heuristic. It must be admissible for results to stay shortest.
    pub fn with_heuristic<H2: Heuristic>(self, heuristic: H2) -> RoutePlanner<L, H2> {
        RoutePlanner {
            landmarks: self.landmarks,
            heuristic,
            budget: self.budget,
        }
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn landmarks(&self) -> &L {
        &self.landmarks
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    /// Routes between two locations: the Dijkstra result, the heuristic-search
    /// result and one alternative through a randomly sampled intermediate
    /// location. Structural duplicates are removed; an empty vector means the
    /// destination is unreachable.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateQuery`] if `start == destination`,
    /// [`Error::UnknownLocation`] if either is not in the graph.
    pub fn find_routes<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        start: &Location,
        destination: &Location,
        rng: &mut R,
    ) -> Result<Vec<RouteOption>, Error> {
        validate_query(graph, start, destination)?;

        let mut routes = Vec::with_capacity(3);
        if let Some(route) =
            shortest_path_within(graph, start, destination, &self.landmarks, self.budget)
        {
            routes.push(route);
        }
        if let Some(route) = heuristic_path_within(
            graph,
            start,
            destination,
            &self.heuristic,
            &self.landmarks,
            self.budget,
        ) {
            push_unique(&mut routes, route);
        }
        if let Some(route) = self.via_sampled_intermediate(graph, start, destination, rng) {
            push_unique(&mut routes, route);
        }

        debug!(
            "Found {} routes from {start} to {destination}",
            routes.len()
        );
        Ok(routes)
    }

    /// Routes that visit every reachable location in `waypoints`.
    ///
    /// Unreachable waypoints are skipped and listed in
    /// [`WaypointRoute::skipped`]. Without waypoints this is a plain two-point
    /// query.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateQuery`] if `start == destination`,
    /// [`Error::UnknownLocation`] if any location is not in the graph.
    pub fn find_routes_via_landmarks<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        start: &Location,
        destination: &Location,
        waypoints: &[Location],
        rng: &mut R,
    ) -> Result<Vec<WaypointRoute>, Error> {
        validate_query(graph, start, destination)?;
        if let Some(unknown) = waypoints.iter().find(|waypoint| !graph.contains(waypoint)) {
            return Err(Error::UnknownLocation(unknown.to_string()));
        }

        if waypoints.is_empty() {
            return Ok(self
                .find_routes(graph, start, destination, rng)?
                .into_iter()
                .map(|route| WaypointRoute {
                    route,
                    realized: Vec::new(),
                    skipped: Vec::new(),
                })
                .collect());
        }

        let routes = WaypointRouter::new(graph, &self.landmarks)
            .with_budget(self.budget)
            .route(start, destination, waypoints);
        info!(
            "Found {} routes from {start} to {destination} via {} waypoints",
            routes.len(),
            waypoints.len()
        );
        Ok(routes)
    }

    /// Sample routes that pass through `landmark`
    ///
    /// # Errors
    ///
    /// [`Error::UnknownLocation`] if the landmark is not in the graph.
    pub fn routes_through_landmark<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        landmark: &Location,
        rng: &mut R,
    ) -> Result<Vec<RouteOption>, Error> {
        if !graph.contains(landmark) {
            return Err(Error::UnknownLocation(landmark.to_string()));
        }

        Ok(WaypointRouter::new(graph, &self.landmarks)
            .with_budget(self.budget)
            .routes_through(landmark, DEFAULT_LANDMARK_SAMPLES, rng))
    }

    fn via_sampled_intermediate<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        start: &Location,
        destination: &Location,
        rng: &mut R,
    ) -> Option<RouteOption> {
        let intermediate = graph
            .locations()
            .filter(|location| *location != start && *location != destination)
            .choose(rng)?;

        let first = shortest_path_within(graph, start, intermediate, &self.landmarks, self.budget)?;
        let second =
            shortest_path_within(graph, intermediate, destination, &self.landmarks, self.budget)?;

        let mut builder = RouteBuilder::new(start);
        builder.push_leg(&first);
        builder.push_leg(&second);
        builder.finish(&self.landmarks)
    }
}

fn validate_query(graph: &Graph, start: &Location, destination: &Location) -> Result<(), Error> {
    if start == destination {
        return Err(Error::DegenerateQuery(start.to_string()));
    }
    for location in [start, destination] {
        if !graph.contains(location) {
            return Err(Error::UnknownLocation(location.to_string()));
        }
    }
    Ok(())
}
