use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;
use tracing::info;
use wayfinder_core::prelude::{
    Error, LandmarkSet, NameFragments, SearchBudget, SharedGraph, TrafficModel, create_graph,
};

use crate::config::ServerConfig;

/// State shared by all handlers.
///
/// Lock order is graph, then landmarks. The random source is only locked to
/// draw a child seed and never while another lock is held.
#[derive(Clone)]
pub struct AppState {
    pub graph: SharedGraph,
    landmarks: Arc<RwLock<LandmarkSet>>,
    rng: Arc<Mutex<StdRng>>,
    pub traffic: Arc<TrafficModel<NameFragments>>,
    pub budget: SearchBudget,
}

impl AppState {
    /// Builds the graph and landmark set described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be loaded.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Error> {
        let (graph, landmarks) = create_graph(&config.graph)?;
        let rng = match config.seed {
            Some(seed) => {
                info!("Seeding random source with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            graph: SharedGraph::new(graph),
            landmarks: Arc::new(RwLock::new(landmarks)),
            rng: Arc::new(Mutex::new(rng)),
            traffic: Arc::new(TrafficModel::from_config(&config.traffic)),
            budget: config.budget(),
        })
    }

    pub fn landmarks(&self) -> Result<RwLockReadGuard<'_, LandmarkSet>, Error> {
        self.landmarks.read().map_err(|_| Error::LockPoisoned)
    }

    pub fn landmarks_mut(&self) -> Result<RwLockWriteGuard<'_, LandmarkSet>, Error> {
        self.landmarks.write().map_err(|_| Error::LockPoisoned)
    }

    pub fn rng(&self) -> Result<MutexGuard<'_, StdRng>, Error> {
        self.rng.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Independent generator seeded from the shared one. The shared guard is
    /// released before this returns.
    pub fn child_rng(&self) -> Result<StdRng, Error> {
        let seed = self.rng()?.next_u64();
        Ok(StdRng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::prelude::{EdgeRecord, GraphConfig};

    fn state(seed: u64) -> AppState {
        let config = ServerConfig {
            seed: Some(seed),
            graph: GraphConfig {
                edges: vec![EdgeRecord::new("Main Gate", "Library", 250.0)],
                ..GraphConfig::default()
            },
            ..ServerConfig::default()
        };
        AppState::from_config(&config).unwrap()
    }

    #[test]
    fn child_rngs_follow_the_configured_seed() {
        let (first, second) = (state(42), state(42));

        for _ in 0..3 {
            let a = first.child_rng().unwrap().next_u64();
            let b = second.child_rng().unwrap().next_u64();
            assert_eq!(a, b);
        }
        assert_ne!(
            first.child_rng().unwrap().next_u64(),
            first.child_rng().unwrap().next_u64()
        );
    }

    #[test]
    fn child_rng_releases_the_shared_source() {
        let state = state(7);
        let _child = state.child_rng().unwrap();

        assert!(state.rng.try_lock().is_ok());
    }
}
