//! Graph shared between concurrent queries and a serialized writer

use std::sync::{Arc, RwLock, RwLockReadGuard};

use super::Graph;
use crate::Error;

/// Read-mostly handle to a [`Graph`].
///
/// Queries hold a read guard for their whole duration; mutations take the
/// write lock, so readers never observe a graph mid-mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Shared access for route queries
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Graph>, Error> {
        self.inner.read().map_err(|_| Error::LockPoisoned)
    }

    /// Exclusive access for growing the graph
    pub fn update<T>(&self, mutate: impl FnOnce(&mut Graph) -> T) -> Result<T, Error> {
        let mut graph = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        Ok(mutate(&mut graph))
    }

    /// Owned copy of the current graph, detached from later mutations
    pub fn snapshot(&self) -> Result<Graph, Error> {
        Ok(self.read()?.clone())
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn readers_see_complete_updates() {
        let shared = SharedGraph::new(Graph::new());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    shared
                        .update(|graph| graph.connect(format!("n{i}"), format!("n{}", i + 1), 1.0))
                        .unwrap()
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let graph = shared.read().unwrap();
                        // Each connect adds exactly one new node and one edge
                        if !graph.is_empty() {
                            assert_eq!(graph.location_count(), graph.edge_count() + 1);
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.read().unwrap().edge_count(), 50);
    }

    #[test]
    fn snapshot_is_detached() {
        let shared = SharedGraph::new(Graph::new());
        shared.update(|graph| graph.add_location("A")).unwrap();

        let snapshot = shared.snapshot().unwrap();
        shared.update(|graph| graph.add_location("B")).unwrap();

        assert_eq!(snapshot.location_count(), 1);
        assert_eq!(shared.read().unwrap().location_count(), 2);
    }
}
