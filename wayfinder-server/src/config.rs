use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use wayfinder_core::prelude::{GraphConfig, SearchBudget, TrafficConfig};

/// Server configuration, read from a TOML file.
///
/// ```toml
/// bind = "127.0.0.1:3000"
/// seed = 42
/// max_expansions = 100000
///
/// [graph]
/// edges_path = "campus.csv"
/// landmarks = ["Library", "Main Gate"]
///
/// [traffic]
/// high_traffic = ["Hall", "Gate", "Market", "Bank"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Seed for route sampling, auto-connections and traffic jitter. Drawn
    /// from the OS when absent.
    pub seed: Option<u64>,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    pub max_expansions: Option<usize>,
    pub graph: GraphConfig,
    pub traffic: TrafficConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            seed: None,
            request_timeout_secs: 10,
            concurrency_limit: 64,
            max_expansions: None,
            graph: GraphConfig::default(),
            traffic: TrafficConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration file; a relative edge file path is resolved
    /// against the directory of the configuration file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        if let (Some(edges), Some(dir)) = (&config.graph.edges_path, path.parent())
            && edges.is_relative()
        {
            config.graph.edges_path = Some(dir.join(edges));
        }
        Ok(config)
    }

    pub fn budget(&self) -> SearchBudget {
        self.max_expansions
            .map_or_else(SearchBudget::unlimited, |max| {
                SearchBudget::unlimited().with_max_expansions(max)
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_with_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            seed = 7

            [graph]
            landmarks = ["Library"]

            [[graph.edges]]
            from = "Main Gate"
            to = "Library"
            distance = 250.0

            [traffic]
            high_traffic = ["Stadium"]
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.graph.edges.len(), 1);
        assert_eq!(config.graph.landmarks, ["Library"]);
        assert_eq!(config.traffic.high_traffic.fragments(), ["Stadium"]);
        assert_eq!(config.budget(), SearchBudget::unlimited());
    }

    #[test]
    fn edge_file_is_relative_to_config() {
        let dir = std::env::temp_dir().join(format!("wayfinder-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("server.toml");
        std::fs::write(&path, "max_expansions = 10\n[graph]\nedges_path = \"edges.csv\"\n").unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.graph.edges_path, Some(dir.join("edges.csv")));
        assert_eq!(
            config.budget(),
            SearchBudget::unlimited().with_max_expansions(10)
        );
    }
}
