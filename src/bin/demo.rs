//! Minimal demonstration: build a random graph, solve it, print a sample of
//! the distances. Set `RUST_LOG=bmssp=debug` to watch the solver work.

use bmssp::graph::generators;
use bmssp::graph::Graph;
use bmssp::{sssp, Dijkstra, ShortestPathAlgorithm};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = generators::random_digraph(2_000, 0.004, 10.0, 42);
    println!(
        "graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let result = sssp(&graph, 0).expect("valid input");
    let reachable = result.distances.iter().flatten().count();
    println!("reachable from 0: {reachable} vertices");

    let oracle = Dijkstra::new().compute_shortest_paths(&graph, 0).expect("valid input");
    assert_eq!(result.distances, oracle.distances);
    println!("distances agree with Dijkstra");

    for v in [1, 10, 100, 1_000] {
        match result.distances[v] {
            Some(d) => {
                let hops = result.path_to(v).map(|p| p.len() - 1).unwrap_or(0);
                println!("  d[{v}] = {:.3} ({hops} hops)", d.into_inner());
            }
            None => println!("  d[{v}] = unreachable"),
        }
    }
}
