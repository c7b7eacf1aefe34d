use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::MinHeap;
use crate::graph::Graph;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm; the correctness oracle for the recursive
/// solver and the better choice for small graphs.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        distances[source] = Some(W::zero());

        let mut queue = MinHeap::new();
        queue.push(source, W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            // A smaller entry for u has already been processed
            match distances[u] {
                Some(best) if best < dist_u => continue,
                _ => {}
            }

            for (v, weight) in graph.out_edges(u) {
                let candidate = dist_u + weight;
                let improves = match distances[v] {
                    None => true,
                    Some(best) => candidate < best,
                };
                if improves {
                    distances[v] = Some(candidate);
                    predecessors[v] = Some(u);
                    queue.push(v, candidate);
                }
            }
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
