//! Data model for route planning
//!
//! Contains the location graph, landmark configuration and route values.

pub mod graph;
pub mod landmarks;
pub mod location;
pub mod route;
pub mod shared;

pub use graph::Graph;
pub use landmarks::{LandmarkSet, Landmarks, NoLandmarks};
pub use location::Location;
pub use route::RouteOption;
pub use shared::SharedGraph;
