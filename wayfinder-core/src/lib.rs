//! Route planning over a weighted graph of named locations.
//!
//! The crate provides shortest-path search (Dijkstra and a heuristic-search
//! variant), multi-waypoint routing with a greedy nearest-neighbour ordering,
//! stable route ranking and a simulated traffic model for travel times.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod ranking;
pub mod routing;
pub mod traffic;

pub use algo::matrix::distance_matrix;
pub use error::Error;
pub use loading::{EdgeRecord, GraphConfig, create_graph};
pub use model::{Graph, LandmarkSet, Landmarks, Location, RouteOption, SharedGraph};
pub use ranking::{Criterion, rank};
pub use routing::{RoutePlanner, SearchBudget, WaypointRoute};
pub use traffic::{Clock, TrafficConfig, TrafficLevel, TrafficModel};

/// Distance units (meters in the reference dataset)
pub type Distance = f64;
/// Estimated travel time in minutes
pub type Minutes = u32;

/// Assumed traversal rate: distance units covered per minute
pub const WALKING_RATE: Distance = 60.0;

/// Number of existing locations a newly added location is connected to
pub const DEFAULT_AUTO_CONNECTIONS: usize = 3;

/// Number of sampled start/end pairs when routing through a single landmark
pub const DEFAULT_LANDMARK_SAMPLES: usize = 3;
