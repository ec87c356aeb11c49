use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use super::Location;
use crate::{Distance, Error, Minutes};

/// An immutable route: path, aggregate distance, estimated time and the
/// landmarks it passes.
///
/// Equality is structural over path, distance and time; landmark tags do not
/// take part in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RouteParts")]
pub struct RouteOption {
    path: Vec<Location>,
    distance: Distance,
    time: Minutes,
    landmarks: Vec<Location>,
}

/// Unchecked wire form; deserialized routes pass through [`RouteOption::new`]
#[derive(Deserialize)]
struct RouteParts {
    path: Vec<Location>,
    distance: Distance,
    time: Minutes,
    #[serde(default)]
    landmarks: Vec<Location>,
}

impl TryFrom<RouteParts> for RouteOption {
    type Error = Error;

    fn try_from(parts: RouteParts) -> Result<Self, Self::Error> {
        Self::new(parts.path, parts.distance, parts.time, parts.landmarks)
    }
}

impl RouteOption {
    /// Creates a route from already computed parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the path has fewer than two locations
    /// or the distance is negative or NaN.
    pub fn new(
        path: Vec<Location>,
        distance: Distance,
        time: Minutes,
        landmarks: Vec<Location>,
    ) -> Result<Self, Error> {
        if path.len() < 2 {
            return Err(Error::InvalidData(format!(
                "A route needs at least two locations, got {}",
                path.len()
            )));
        }
        if distance.is_nan() || distance < 0.0 {
            return Err(Error::InvalidData(format!(
                "Route distance must be non-negative, got {distance}"
            )));
        }

        Ok(Self::from_parts(path, distance, time, landmarks))
    }

    pub(crate) fn from_parts(
        path: Vec<Location>,
        distance: Distance,
        time: Minutes,
        landmarks: Vec<Location>,
    ) -> Self {
        debug_assert!(path.len() >= 2);
        Self {
            path,
            distance,
            time,
            landmarks,
        }
    }

    pub fn path(&self) -> &[Location] {
        &self.path
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Estimated travel time in minutes
    pub fn time(&self) -> Minutes {
        self.time
    }

    pub fn landmarks(&self) -> &[Location] {
        &self.landmarks
    }

    pub fn start(&self) -> &Location {
        &self.path[0]
    }

    pub fn destination(&self) -> &Location {
        &self.path[self.path.len() - 1]
    }

    pub fn passes_through(&self, location: &Location) -> bool {
        self.path.contains(location)
    }

    /// Same route with a different estimated time
    #[must_use]
    pub fn with_time(self, time: Minutes) -> Self {
        Self { time, ..self }
    }

    /// JSON summary for hosts: the route fields plus its endpoints and a
    /// human-readable description.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "start": self.start(),
            "destination": self.destination(),
            "path": self.path,
            "distance": self.distance,
            "time": self.time,
            "landmarks": self.landmarks,
            "summary": self.to_string(),
        })
    }
}

impl PartialEq for RouteOption {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.distance == other.distance && self.time == other.time
    }
}

impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route from {} to {}, distance: {:.1}, time: {} min",
            self.start(),
            self.destination(),
            self.distance,
            self.time
        )
    }
}

/// Appends `route` to `routes` unless a structurally equal route is already there
pub(crate) fn push_unique(routes: &mut Vec<RouteOption>, route: RouteOption) -> bool {
    if routes.contains(&route) {
        false
    } else {
        routes.push(route);
        true
    }
}
