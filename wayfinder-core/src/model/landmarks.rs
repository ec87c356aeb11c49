//! Points of interest supplied by the host

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Location;

/// Single source of truth for deciding whether a location is a landmark.
///
/// Implemented by [`LandmarkSet`] and by any `Fn(&Location) -> bool`.
pub trait Landmarks {
    fn is_landmark(&self, location: &Location) -> bool;

    /// Landmarks along `path` in order of first appearance
    fn along(&self, path: &[Location]) -> Vec<Location> {
        let mut found: Vec<Location> = Vec::new();
        for location in path {
            if self.is_landmark(location) && !found.contains(location) {
                found.push(location.clone());
            }
        }
        found
    }
}

impl<F> Landmarks for F
where
    F: Fn(&Location) -> bool,
{
    fn is_landmark(&self, location: &Location) -> bool {
        self(location)
    }
}

/// Explicitly configured landmark list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet(BTreeSet<Location>);

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the landmark was not present before
    pub fn insert(&mut self, location: impl Into<Location>) -> bool {
        self.0.insert(location.into())
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.0.contains(location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Landmarks for LandmarkSet {
    fn is_landmark(&self, location: &Location) -> bool {
        self.contains(location)
    }
}

impl<L: Into<Location>> FromIterator<L> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// No location is a landmark
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLandmarks;

impl Landmarks for NoLandmarks {
    fn is_landmark(&self, _location: &Location) -> bool {
        false
    }
}
