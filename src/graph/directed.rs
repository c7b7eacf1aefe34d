use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::graph::traits::Graph;

/// A directed graph on vertices `0..n`, stored as per-vertex adjacency lists.
///
/// The vertex set is fixed at construction. Parallel edges and self-loops are
/// permitted; edges are kept in insertion order.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W> {
    adjacency: Vec<Vec<(usize, W)>>,
    edge_count: usize,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        DirectedGraph {
            adjacency: vec![Vec::new(); n],
            edge_count: 0,
        }
    }

    /// Appends the directed edge `(from, to, weight)`.
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) {
        assert!(
            from < self.adjacency.len(),
            "edge source {from} out of range for {} vertices",
            self.adjacency.len()
        );
        assert!(
            to < self.adjacency.len(),
            "edge target {to} out of range for {} vertices",
            self.adjacency.len()
        );
        self.adjacency[from].push((to, weight));
        self.edge_count += 1;
    }

    /// Returns true if every edge weight is non-negative.
    pub fn weights_non_negative(&self) -> bool {
        self.adjacency
            .iter()
            .flatten()
            .all(|&(_, w)| w >= W::zero())
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn out_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.adjacency.len()
    }
}
