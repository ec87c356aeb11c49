pub use crate::{DEFAULT_AUTO_CONNECTIONS, DEFAULT_LANDMARK_SAMPLES, WALKING_RATE};

// Re-export key components
pub use crate::algo::matrix::distance_matrix;
pub use crate::loading::{EdgeRecord, GraphConfig, create_graph};
pub use crate::model::{
    Graph, LandmarkSet, Landmarks, Location, NoLandmarks, RouteOption, SharedGraph,
};
pub use crate::ranking::{Criterion, rank, rank_by};
pub use crate::routing::{
    Heuristic, RoutePlanner, SearchBudget, WaypointRoute, WaypointRouter, ZeroHeuristic,
    estimated_minutes, heuristic_path, heuristic_path_within, path_distance, shortest_distances,
    shortest_path, shortest_path_within,
};
pub use crate::traffic::{
    Clock, HighTraffic, NameFragments, TrafficConfig, TrafficLevel, TrafficModel,
};

// Core scalar types
pub use crate::Distance;
pub use crate::Error;
pub use crate::Minutes;
