use log::info;
use rayon::prelude::*;

use crate::Distance;
use crate::model::{Graph, Location};
use crate::routing::SearchBudget;
use crate::routing::dijkstra::distances_from;

/// Shortest distances between every pair of `locations`.
///
/// Row `i` holds the distances from `locations[i]`; `None` marks an
/// unreachable pair or an unknown location. One search runs per source, in
/// parallel over the shared graph.
pub fn distance_matrix(graph: &Graph, locations: &[Location]) -> Vec<Vec<Option<Distance>>> {
    let targets: Vec<_> = locations
        .iter()
        .map(|location| graph.node(location.name()))
        .collect();

    let matrix: Vec<Vec<Option<Distance>>> = targets
        .par_iter()
        .map(|source| {
            let Some(source) = source else {
                return vec![None; targets.len()];
            };
            let distances = distances_from(graph, *source, SearchBudget::unlimited());
            targets
                .iter()
                .map(|target| target.and_then(|target| distances.get(&target).copied()))
                .collect()
        })
        .collect();

    info!(
        "Computed {}x{} distance matrix",
        locations.len(),
        locations.len()
    );
    matrix
}
