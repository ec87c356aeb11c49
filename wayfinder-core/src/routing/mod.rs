//! Route search: shortest paths, heuristic search, waypoint routing and the
//! planner that combines them.

mod budget;
pub mod dijkstra;
pub mod heuristic;
pub mod path;
pub mod planner;
pub mod waypoints;

pub use budget::SearchBudget;
pub use dijkstra::{shortest_distances, shortest_path, shortest_path_within};
pub use heuristic::{Heuristic, ZeroHeuristic, heuristic_path, heuristic_path_within};
pub use path::{estimated_minutes, path_distance};
pub use planner::RoutePlanner;
pub use waypoints::{WaypointRoute, WaypointRouter};
