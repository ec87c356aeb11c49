use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Distance;

/// One undirected edge of an edge list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub distance: Distance,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: Distance) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// Sources a location graph is built from.
///
/// Edges may come from a CSV file with a `from,to,distance` header, from
/// inline records, or both. Landmarks are location names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub edges_path: Option<PathBuf>,
    pub edges: Vec<EdgeRecord>,
    pub landmarks: Vec<String>,
}
