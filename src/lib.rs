//! Deterministic O(m · log^(2/3) n) single-source shortest paths.
//!
//! This library implements the recursive-partitioning algorithm described in
//! "Breaking the Sorting Barrier for Directed Single-Source Shortest Paths"
//! by Duan et al. (2025) for directed graphs with real non-negative edge
//! weights.
//!
//! The public surface is a [`DirectedGraph`] builder, the [`sssp`] entry
//! point (with [`SsspSolver`] behind it), and a reference [`Dijkstra`] used
//! as the correctness oracle in tests.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    dijkstra::Dijkstra,
    solver::{sssp, SsspSolver},
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid vertex id: {0}")]
    InvalidVertex(usize),

    #[error("negative weight on edge {0} -> {1}")]
    NegativeWeight(usize, usize),

    #[error("source vertex not found in graph")]
    SourceNotFound,

    #[error("algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
