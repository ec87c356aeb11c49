//! This module is responsible for loading location graphs from configuration
//! and CSV edge lists.

mod builder;
mod config;
mod parser;

pub use builder::create_graph;
pub use config::{EdgeRecord, GraphConfig};
pub use parser::{deserialize_edges_file, read_edges};
