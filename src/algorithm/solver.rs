use std::fmt::Debug;

use num_traits::{Float, Zero};
use tracing::debug;

use crate::algorithm::bmssp::{Bmssp, Params};
use crate::algorithm::distance::DistanceStore;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::{Error, Result};

/// Single-source shortest paths via the bounded multi-source recursion.
///
/// Validates its input at the boundary, seeds the distance store, and runs
/// the top-level frame at `l_max` under an infinite bound. The recursion
/// itself never fails on valid input; every error this solver returns is a
/// precondition violation.
#[derive(Debug, Default)]
pub struct SsspSolver {
    params: Option<Params>,
}

impl SsspSolver {
    pub fn new() -> Self {
        SsspSolver { params: None }
    }

    /// Overrides the parameters derived from the vertex count. Intended for
    /// tests that pin small `k` and `t` to force deep recursion on graphs
    /// where the derived values would collapse to a single base case. The
    /// override must keep [`Params::completion_cap`] at or above the vertex
    /// count; `compute_shortest_paths` refuses it otherwise.
    pub fn with_params(params: Params) -> Self {
        SsspSolver {
            params: Some(params),
        }
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for SsspSolver
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP (O(m log^(2/3) n))"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }
        for u in 0..graph.vertex_count() {
            for (v, w) in graph.out_edges(u) {
                if w < W::zero() {
                    return Err(Error::NegativeWeight(u, v));
                }
            }
        }

        let n = graph.vertex_count();
        let params = self.params.unwrap_or_else(|| Params::for_vertex_count(n));
        if params.completion_cap() < n {
            return Err(Error::AlgorithmError(format!(
                "parameters k={} t={} l_max={} cap the top frame at {} completions for {} vertices",
                params.k,
                params.t,
                params.l_max,
                params.completion_cap(),
                n
            )));
        }
        debug!(
            n,
            m = graph.edge_count(),
            k = params.k,
            t = params.t,
            l_max = params.l_max,
            "running bmssp"
        );

        let mut store = DistanceStore::new(n, source);
        let bmssp = Bmssp::new(graph, params);
        bmssp.execute(params.l_max, W::infinity(), &[source], &mut store)?;

        let (dist, pred) = store.into_parts();
        Ok(ShortestPathResult {
            distances: dist
                .into_iter()
                .map(|d| if d == W::infinity() { None } else { Some(d) })
                .collect(),
            predecessors: pred,
            source,
        })
    }
}

/// Computes shortest paths from `source` with derived parameters.
pub fn sssp<W, G>(graph: &G, source: usize) -> Result<ShortestPathResult<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    SsspSolver::new().compute_shortest_paths(graph, source)
}
