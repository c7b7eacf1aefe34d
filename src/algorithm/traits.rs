use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::Result;

/// Result of a shortest path computation
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distance from the source to each vertex, `None` when unreachable
    pub distances: Vec<Option<W>>,

    /// Predecessor on a shortest path; `None` for the source itself and
    /// for unreachable vertices
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Reconstructs the path from the source to `target` by walking the
    /// predecessor chain. Returns `None` when the target is unreachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.distances.len() || self.distances[target].is_none() {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            let pred = self.predecessors[current]?;
            path.push(pred);
            current = pred;
            if path.len() > self.predecessors.len() {
                // broken predecessor chain
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
