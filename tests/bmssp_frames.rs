use bmssp::algorithm::bmssp::{Bmssp, Params};
use bmssp::algorithm::distance::DistanceStore;
use bmssp::graph::DirectedGraph;
use ordered_float::OrderedFloat;

fn of(x: f64) -> OrderedFloat<f64> {
    OrderedFloat(x)
}

fn diamond_chain() -> DirectedGraph<OrderedFloat<f64>> {
    let mut g = DirectedGraph::new(5);
    g.add_edge(0, 1, of(1.0));
    g.add_edge(1, 2, of(1.0));
    g.add_edge(0, 2, of(3.0));
    g.add_edge(2, 3, of(1.0));
    g.add_edge(1, 3, of(4.0));
    g.add_edge(3, 4, of(1.0));
    g.add_edge(0, 4, of(10.0));
    g
}

#[test]
fn base_case_stops_at_the_settlement_budget() {
    let g = diamond_chain();
    let params = Params::for_vertex_count(5);
    assert_eq!(params.k, 1);

    let mut store = DistanceStore::new(5, 0);
    let bmssp = Bmssp::new(&g, params);
    let frame = bmssp
        .execute(0, of(f64::INFINITY), &[0], &mut store)
        .unwrap();

    // budget of k + 1 = 2 settlements; the refused third candidate sits at
    // distance 2 and becomes the new bound
    assert_eq!(frame.bound, of(2.0));
    let mut completed = frame.completed;
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1]);
    assert_eq!(store.distance(1), of(1.0));
}

#[test]
fn base_case_respects_the_caller_bound() {
    let g = diamond_chain();
    let mut store = DistanceStore::new(5, 0);
    let bmssp = Bmssp::new(&g, Params::with_values(10, 1, 1));

    // generous budget, tight bound: expansion must stop below 3
    let frame = bmssp.execute(0, of(3.0), &[0], &mut store).unwrap();
    assert_eq!(frame.bound, of(3.0));
    let mut completed = frame.completed;
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1, 2]);
    assert_eq!(store.distance(2), of(2.0));
    // vertex 3 sits exactly on the bound, so the edge into it is never
    // relaxed by this frame
    assert_eq!(store.distance(3), of(f64::INFINITY));
}

#[test]
fn base_case_settles_a_zero_weight_plateau_in_full() {
    let mut g = DirectedGraph::new(3);
    g.add_edge(0, 1, of(0.0));
    g.add_edge(1, 2, of(0.0));

    let mut store = DistanceStore::new(3, 0);
    let bmssp = Bmssp::new(&g, Params::with_values(1, 1, 1));
    let frame = bmssp
        .execute(0, of(f64::INFINITY), &[0], &mut store)
        .unwrap();

    // the tie plateau at distance 0 exceeds the budget but must come out
    // whole, otherwise the caller would be handed back an unchanged frame
    let mut completed = frame.completed;
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1, 2]);
    assert_eq!(frame.bound, of(f64::INFINITY));
    for v in 0..3 {
        assert_eq!(store.distance(v), of(0.0));
    }
}

#[test]
fn recursive_frame_completes_everything_under_an_infinite_bound() {
    let g = diamond_chain();
    let params = Params::for_vertex_count(5);
    let mut store = DistanceStore::new(5, 0);
    let bmssp = Bmssp::new(&g, params);

    let frame = bmssp
        .execute(params.l_max, of(f64::INFINITY), &[0], &mut store)
        .unwrap();

    let mut completed = frame.completed;
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1, 2, 3, 4]);
    let expected = [0.0, 1.0, 2.0, 3.0, 4.0];
    for (v, &d) in expected.iter().enumerate() {
        assert_eq!(store.distance(v), of(d));
    }
}

#[test]
fn multi_source_level_zero_merges_under_the_tightest_bound() {
    let mut g = DirectedGraph::new(6);
    g.add_edge(0, 2, of(1.0));
    g.add_edge(1, 3, of(1.0));
    g.add_edge(2, 4, of(1.0));
    g.add_edge(3, 5, of(1.0));

    let mut store = DistanceStore::new(6, 0);
    // pretend an outer frame already finished both roots
    store.relax(0, 1, of(0.0));
    let bmssp = Bmssp::new(&g, Params::with_values(5, 1, 1));

    let frame = bmssp
        .execute(0, of(f64::INFINITY), &[0, 1], &mut store)
        .unwrap();
    let mut completed = frame.completed;
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(store.distance(4), of(2.0));
    assert_eq!(store.distance(5), of(2.0));
}

#[test]
fn empty_source_set_is_rejected() {
    let g = diamond_chain();
    let mut store = DistanceStore::new(5, 0);
    let bmssp = Bmssp::new(&g, Params::for_vertex_count(5));
    assert!(bmssp
        .execute(1, of(f64::INFINITY), &[], &mut store)
        .is_err());
}
