//! Batch computations over the location graph.

pub mod matrix;
