//! Weighted, undirected adjacency store of named locations

use hashbrown::HashMap;
use log::{debug, trace};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;
use rand::seq::SliceRandom;

use super::Location;
use crate::{Distance, Error};

/// Range of generated distances for auto-connected locations
const AUTO_CONNECTION_DISTANCE: std::ops::Range<Distance> = 100.0..800.0;

/// Route graph
///
/// Every edge is stored once in an undirected petgraph graph, so a connection
/// `a - b` with weight `w` is always traversable in both directions with the
/// same weight. Locations and edges can only be added.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) graph: UnGraph<Location, Distance>,
    index: HashMap<Location, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location, returning its node. Existing locations are left untouched.
    pub fn add_location(&mut self, location: impl Into<Location>) -> NodeIndex {
        let location = location.into();
        if let Some(&node) = self.index.get(&location) {
            return node;
        }

        let node = self.graph.add_node(location.clone());
        trace!("Added location {location} as node {}", node.index());
        self.index.insert(location, node);
        node
    }

    /// Connects two locations in both directions, adding them if needed.
    ///
    /// Re-connecting an already connected pair replaces the distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeight`] for negative or NaN distances, in which
    /// case the graph is not modified.
    pub fn connect(
        &mut self,
        from: impl Into<Location>,
        to: impl Into<Location>,
        distance: Distance,
    ) -> Result<(), Error> {
        let (from, to) = (from.into(), to.into());
        if distance.is_nan() || distance < 0.0 {
            return Err(Error::InvalidWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight: distance,
            });
        }

        let a = self.add_location(from);
        let b = self.add_location(to);
        self.graph.update_edge(a, b, distance);
        Ok(())
    }

    /// Adds a location and connects it to up to `max_connections` randomly
    /// chosen existing locations with generated distances.
    ///
    /// Returns `false` without touching the graph if the location already exists.
    pub fn add_location_connected<R: Rng + ?Sized>(
        &mut self,
        location: impl Into<Location>,
        max_connections: usize,
        rng: &mut R,
    ) -> bool {
        let location = location.into();
        if self.contains(&location) {
            return false;
        }

        let mut others: Vec<NodeIndex> = self.graph.node_indices().collect();
        others.shuffle(rng);
        others.truncate(max_connections);

        let node = self.add_location(location.clone());
        for other in others {
            let distance = rng.gen_range(AUTO_CONNECTION_DISTANCE);
            self.graph.update_edge(node, other, distance);
        }

        debug!(
            "Added location {location} with {} generated connections",
            self.graph.edges(node).count()
        );
        true
    }

    /// Neighbouring locations with their distances. Unknown locations have none.
    pub fn neighbors(&self, location: &Location) -> HashMap<Location, Distance> {
        self.node(location.name())
            .map(|node| {
                self.edges(node)
                    .map(|(next, distance)| (self.graph[next].clone(), distance))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distance of the direct edge between two locations, if there is one
    pub fn distance_between(&self, from: &Location, to: &Location) -> Option<Distance> {
        let a = self.node(from.name())?;
        let b = self.node(to.name())?;
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge).copied())
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.index.contains_key(location)
    }

    /// All locations in insertion order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.graph.node_weights()
    }

    /// Case-insensitive search of locations whose name starts with `prefix`
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<Location> {
        let prefix = prefix.to_lowercase();
        self.locations()
            .filter(|location| location.name().to_lowercase().starts_with(&prefix))
            .cloned()
            .collect()
    }

    pub fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub(crate) fn node(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn location(&self, node: NodeIndex) -> &Location {
        &self.graph[node]
    }

    /// Adjacent nodes with edge weights, seen from `node`
    pub(crate) fn edges(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, Distance)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (next, *edge.weight())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        graph.connect("A", "B", 100.0).unwrap();
        graph.connect("B", "C", 200.0).unwrap();
        graph.connect("A", "C", 400.0).unwrap();
        graph
    }

    #[test]
    fn connect_inserts_both_directions() {
        let graph = triangle();

        let from_a = graph.neighbors(&"A".into());
        let from_b = graph.neighbors(&"B".into());
        assert_eq!(from_a.get("B"), Some(&100.0));
        assert_eq!(from_b.get("A"), Some(&100.0));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn reconnecting_replaces_weight() {
        let mut graph = triangle();
        graph.connect("B", "A", 50.0).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.distance_between(&"A".into(), &"B".into()), Some(50.0));
    }

    #[test]
    fn negative_weight_is_rejected_without_changes() {
        let mut graph = triangle();

        let result = graph.connect("A", "D", -1.0);
        assert!(matches!(result, Err(Error::InvalidWeight { .. })));
        assert!(!graph.contains(&"D".into()));
        assert_eq!(graph.edge_count(), 3);

        assert!(graph.connect("A", "D", f64::NAN).is_err());
    }

    #[test]
    fn add_location_is_idempotent() {
        let mut graph = triangle();
        let first = graph.add_location("A");
        let second = graph.add_location("A");

        assert_eq!(first, second);
        assert_eq!(graph.location_count(), 3);
    }

    #[test]
    fn unknown_location_has_no_neighbors() {
        let graph = triangle();
        assert!(graph.neighbors(&"Nowhere".into()).is_empty());
    }

    #[test]
    fn auto_connected_location_is_bounded() {
        let mut graph = triangle();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(graph.add_location_connected("D", 2, &mut rng));
        let neighbors = graph.neighbors(&"D".into());
        assert_eq!(neighbors.len(), 2);
        for (other, distance) in &neighbors {
            assert!((100.0..800.0).contains(distance));
            assert_eq!(graph.distance_between(other, &"D".into()), Some(*distance));
        }

        assert!(!graph.add_location_connected("D", 2, &mut rng));
        assert_eq!(graph.neighbors(&"D".into()).len(), 2);
    }

    #[test]
    fn auto_connection_into_empty_graph() {
        let mut graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(graph.add_location_connected("Lonely", 3, &mut rng));
        assert_eq!(graph.location_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn prefix_search_ignores_case() {
        let mut graph = Graph::new();
        graph.connect("Great Hall", "Main Gate", 400.0).unwrap();
        graph.connect("great court", "Main Gate", 100.0).unwrap();

        let found = graph.search_by_prefix("GREAT");
        assert_eq!(found, vec![Location::from("Great Hall"), "great court".into()]);
        assert!(graph.search_by_prefix("x").is_empty());
    }
}
