use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::directed::DirectedGraph;

/// G(n, p) digraph with independent edges and uniform weights in
/// `[0, max_weight]`. Seeded so callers get reproducible graphs.
pub fn random_digraph(
    n: usize,
    p: f64,
    max_weight: f64,
    seed: u64,
) -> DirectedGraph<OrderedFloat<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DirectedGraph::new(n);
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(p) {
                graph.add_edge(u, v, OrderedFloat(rng.gen_range(0.0..=max_weight)));
            }
        }
    }
    graph
}

/// Path `0 -> 1 -> ... -> n-1` with unit weights.
pub fn line_graph(n: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::new(n);
    for u in 1..n {
        graph.add_edge(u - 1, u, OrderedFloat(1.0));
    }
    graph
}

/// Four-connected `width x height` grid with unit weights in both
/// directions.
pub fn grid_graph(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::new(width * height);
    for y in 0..height {
        for x in 0..width {
            let v = y * width + x;
            if x + 1 < width {
                graph.add_edge(v, v + 1, OrderedFloat(1.0));
                graph.add_edge(v + 1, v, OrderedFloat(1.0));
            }
            if y + 1 < height {
                graph.add_edge(v, v + width, OrderedFloat(1.0));
                graph.add_edge(v + width, v, OrderedFloat(1.0));
            }
        }
    }
    graph
}
