use log::{info, warn};

use super::config::GraphConfig;
use super::parser::deserialize_edges_file;
use crate::Error;
use crate::model::{Graph, LandmarkSet, Location};

/// Builds a location graph and its landmark set from the provided configuration
///
/// # Errors
///
/// Returns an error if the edge file is missing or malformed, no edge source
/// is configured, or an edge has a negative distance.
pub fn create_graph(config: &GraphConfig) -> Result<(Graph, LandmarkSet), Error> {
    validate_config(config)?;

    let mut graph = Graph::new();
    if let Some(path) = &config.edges_path {
        info!("Loading edges from {}", path.display());
        for edge in deserialize_edges_file(path)? {
            graph.connect(edge.from, edge.to, edge.distance)?;
        }
    }
    for edge in &config.edges {
        graph.connect(edge.from.as_str(), edge.to.as_str(), edge.distance)?;
    }

    let mut landmarks = LandmarkSet::new();
    for name in &config.landmarks {
        let location = Location::from(name.as_str());
        if !graph.contains(&location) {
            warn!("Landmark {location} has no connections and is unreachable");
            graph.add_location(location.clone());
        }
        landmarks.insert(location);
    }

    info!(
        "Graph created with {} locations, {} connections and {} landmarks",
        graph.location_count(),
        graph.edge_count(),
        landmarks.len()
    );
    Ok((graph, landmarks))
}

fn validate_config(config: &GraphConfig) -> Result<(), Error> {
    if let Some(path) = &config.edges_path {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Edge file not found: {}", path.display()),
            )));
        }
    } else if config.edges.is_empty() {
        return Err(Error::InvalidData(
            "No edges provided in the configuration".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::EdgeRecord;

    #[test]
    fn inline_edges_and_landmarks() {
        let config = GraphConfig {
            edges: vec![
                EdgeRecord::new("Main Gate", "Library", 250.0),
                EdgeRecord::new("Library", "Cafeteria", 120.0),
            ],
            landmarks: vec!["Library".into(), "Observatory".into()],
            ..GraphConfig::default()
        };
        let (graph, landmarks) = create_graph(&config).unwrap();

        assert_eq!(graph.location_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert!(landmarks.contains(&"Library".into()));
        // Landmarks without edges are still known locations
        assert!(graph.contains(&"Observatory".into()));
        assert!(graph.neighbors(&"Observatory".into()).is_empty());
    }

    #[test]
    fn empty_config_is_rejected() {
        assert!(matches!(
            create_graph(&GraphConfig::default()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let config = GraphConfig {
            edges: vec![EdgeRecord::new("A", "B", -1.0)],
            ..GraphConfig::default()
        };

        assert!(matches!(
            create_graph(&config),
            Err(Error::InvalidWeight { .. })
        ));
    }

    #[test]
    fn missing_edge_file() {
        let config = GraphConfig {
            edges_path: Some("missing/edges.csv".into()),
            ..GraphConfig::default()
        };

        assert!(matches!(create_graph(&config), Err(Error::IoError(_))));
    }
}
