use bmssp::data_structures::BoundedHeap;
use ordered_float::OrderedFloat;

fn of(x: f64) -> OrderedFloat<f64> {
    OrderedFloat(x)
}

#[test]
fn insert_keeps_smaller_key() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(2, of(f64::INFINITY));
    heap.insert(1, of(10.0));
    heap.insert(2, of(5.0));
    heap.insert(1, of(8.0));
    // larger re-insert must not win
    heap.insert(2, of(9.0));
    assert_eq!(heap.len(), 2);

    let (_, batch) = heap.pull();
    let mut batch = batch;
    batch.sort_unstable();
    assert_eq!(batch, vec![1, 2]);
    assert!(heap.is_empty());
}

#[test]
fn small_heap_pull_returns_everything_with_the_bound() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(4, of(100.0));
    heap.insert(7, of(1.0));
    heap.insert(8, of(2.0));

    let (next, batch) = heap.pull();
    assert_eq!(next, of(100.0));
    assert_eq!(batch.len(), 2);
    assert!(heap.is_empty());
}

#[test]
fn pull_separates_batches_strictly() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(2, of(f64::INFINITY));
    for (v, key) in [(1, 5.0), (2, 1.0), (3, 4.0), (4, 2.0), (5, 3.0)] {
        heap.insert(v, of(key));
    }

    let (next, mut batch) = heap.pull();
    batch.sort_unstable();
    assert_eq!(batch, vec![2, 4]);
    assert_eq!(next, of(3.0));

    let (next, mut batch) = heap.pull();
    batch.sort_unstable();
    assert_eq!(batch, vec![3, 5]);
    assert_eq!(next, of(5.0));

    let (next, batch) = heap.pull();
    assert_eq!(batch, vec![1]);
    assert_eq!(next, of(f64::INFINITY));
    assert!(heap.is_empty());
}

#[test]
fn pull_extends_through_boundary_ties() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(2, of(f64::INFINITY));
    for v in 0..5 {
        heap.insert(v, of(1.0));
    }
    heap.insert(5, of(2.0));

    // all five key-1 entries tie at the batch boundary and must be pulled
    // together, so the returned bound stays strictly above every batch key
    let (next, batch) = heap.pull();
    assert_eq!(batch.len(), 5);
    assert_eq!(next, of(2.0));
    assert_eq!(heap.len(), 1);
}

#[test]
fn batch_prepend_lands_in_front() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(2, of(f64::INFINITY));
    heap.insert(1, of(10.0));
    heap.insert(2, of(20.0));
    heap.insert(3, of(30.0));

    heap.batch_prepend(vec![(4, of(2.0)), (5, of(1.0)), (4, of(3.0))]);
    assert_eq!(heap.len(), 5);

    let (next, mut batch) = heap.pull();
    batch.sort_unstable();
    assert_eq!(batch, vec![4, 5]);
    assert_eq!(next, of(10.0));
}

#[test]
fn batch_prepend_does_not_override_smaller_stored_key() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(1, of(f64::INFINITY));
    heap.insert(1, of(4.0));
    heap.insert(2, of(5.0));
    heap.insert(3, of(6.0));
    heap.batch_prepend(vec![(9, of(1.0))]);

    let (_, batch) = heap.pull();
    assert_eq!(batch, vec![9]);

    let (next, batch) = heap.pull();
    assert_eq!(batch, vec![1]);
    assert_eq!(next, of(5.0));
}

#[test]
fn interleaved_inserts_and_pulls_drain_in_key_order() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(3, of(1000.0));
    for v in 0..20 {
        heap.insert(v, of((v * 7 % 13) as f64));
    }

    let mut last = of(-1.0);
    let mut drained = 0;
    while !heap.is_empty() {
        let (next, batch) = heap.pull();
        assert!(!batch.is_empty());
        drained += batch.len();
        // every key in this batch is at least the previous separator and
        // strictly below the new one
        assert!(next > last);
        last = next;
    }
    assert_eq!(drained, 20);
}

#[test]
#[should_panic]
fn insert_at_or_above_bound_is_fatal() {
    let mut heap: BoundedHeap<OrderedFloat<f64>> = BoundedHeap::new(2, of(10.0));
    heap.insert(0, of(10.0));
}
