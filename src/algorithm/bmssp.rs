use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::marker::PhantomData;

use num_traits::{Float, Zero};
use tracing::trace;

use crate::algorithm::distance::DistanceStore;
use crate::data_structures::{BoundedHeap, MinHeap};
use crate::graph::Graph;
use crate::{Error, Result};

/// Parameters of the recursion, derived once from the vertex count.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// Pivot threshold and base-case settlement budget, `floor(log2(n)^(1/3))`
    pub k: usize,
    /// Level width exponent, `floor(log2(n)^(2/3))`
    pub t: usize,
    /// Top recursion level, `ceil(log2(n) / t)`
    pub l_max: usize,
}

impl Params {
    pub fn for_vertex_count(n: usize) -> Self {
        let log_n = (n.max(2) as f64).log2();
        let k = log_n.powf(1.0 / 3.0).floor().max(1.0) as usize;
        let t = log_n.powf(2.0 / 3.0).floor().max(1.0) as usize;
        let l_max = (log_n / t as f64).ceil().max(1.0) as usize;
        Params { k, t, l_max }
    }

    /// Explicit parameters, clamped to 1. Intended for tests that pin small
    /// values to exercise deep recursion on small graphs.
    pub fn with_values(k: usize, t: usize, l_max: usize) -> Self {
        Params {
            k: k.max(1),
            t: t.max(1),
            l_max: l_max.max(1),
        }
    }

    /// Completion cap of the top-level frame, `k * 2^(l_max * t)`. The cap
    /// must reach the vertex count or the top frame can stop with vertices
    /// still open; the derived parameters guarantee this, explicit ones must
    /// be checked.
    pub fn completion_cap(&self) -> usize {
        self.k.saturating_mul(self.level_width(self.l_max))
    }

    /// `2^(level * t)`, saturating at `usize::MAX` for parameter ranges that
    /// would overflow the shift.
    fn level_width(&self, level: usize) -> usize {
        let bits = level.saturating_mul(self.t);
        if bits >= usize::BITS as usize {
            usize::MAX
        } else {
            1usize << bits
        }
    }
}

/// Outcome of one recursion frame: a refined bound and the vertices whose
/// distances are final strictly below it.
#[derive(Debug)]
pub struct FrameResult<W> {
    pub bound: W,
    pub completed: Vec<usize>,
}

/// Bounded multi-source shortest path recursion over a shared distance
/// store, as described in the Duan et al. paper.
///
/// Each frame narrows a distance interval: it selects pivot sources whose
/// shortest-path subtrees are worth recursing into, advances the frontier in
/// bounded batches through a [`BoundedHeap`], and hands unfinished work back
/// to its caller through the returned bound.
#[derive(Debug)]
pub struct Bmssp<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    graph: &'a G,
    params: Params,
    _weight: PhantomData<W>,
}

impl<'a, W, G> Bmssp<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    pub fn new(graph: &'a G, params: Params) -> Self {
        Bmssp {
            graph,
            params,
            _weight: PhantomData,
        }
    }

    /// Runs one frame at `level` with distance bound `bound` from `sources`.
    ///
    /// Every source must hold a tentative distance strictly below `bound` on
    /// entry. Returns the refined bound and the vertices completed below it;
    /// distances and predecessors accumulate in `store`.
    pub fn execute(
        &self,
        level: usize,
        bound: W,
        sources: &[usize],
        store: &mut DistanceStore<W>,
    ) -> Result<FrameResult<W>> {
        if sources.is_empty() {
            return Err(Error::AlgorithmError("empty source set".to_string()));
        }
        debug_assert!(sources.iter().all(|&s| store.distance(s) < bound));
        trace!(level, sources = sources.len(), "bmssp frame");

        if level == 0 {
            return Ok(self.level_zero(bound, sources, store));
        }

        let (pivots, touched) = self.find_pivots(bound, sources, store);
        let capacity = self.params.level_width(level - 1);
        let size_target = self.params.k.saturating_mul(self.params.level_width(level));

        let mut frontier = BoundedHeap::new(capacity, bound);
        let mut prev_bound = bound;
        for &p in &pivots {
            let d = store.distance(p);
            frontier.insert(p, d);
            if d < prev_bound {
                prev_bound = d;
            }
        }

        let mut completed: HashSet<usize> = HashSet::new();
        while !frontier.is_empty() && completed.len() < size_target {
            let (batch_bound, mut batch) = frontier.pull();
            // fixed order keeps relax sequencing, and with it tie-breaking,
            // identical across runs
            batch.sort_unstable();
            let sub = self.execute(level - 1, batch_bound, &batch, store)?;

            completed.extend(sub.completed.iter().copied());

            // Relax out-edges of everything the sub-frame finished. A tight
            // edge re-queues its head even when the distance is unchanged:
            // the sub-frame settled the head without scanning its edges.
            let mut carry: Vec<(usize, W)> = Vec::new();
            for &u in &sub.completed {
                let du = store.distance(u);
                for (v, w) in self.graph.out_edges(u) {
                    let nd = du + w;
                    if nd > store.distance(v) {
                        continue;
                    }
                    store.relax(u, v, w);
                    if batch_bound <= nd && nd < bound {
                        frontier.insert(v, nd);
                    } else if sub.bound <= nd && nd < batch_bound {
                        carry.push((v, nd));
                    }
                }
            }
            // Sources the sub-frame did not finish return to the frontier.
            for &s in &batch {
                let ds = store.distance(s);
                if sub.bound <= ds && ds < batch_bound {
                    carry.push((s, ds));
                }
            }
            frontier.batch_prepend(carry);
            prev_bound = sub.bound;
        }

        // Size-capped exit leaves work in the frontier: the result bound
        // retreats to the last sub-frame's. A drained frontier means the
        // whole interval below `bound` is done.
        let new_bound = if frontier.is_empty() { bound } else { prev_bound };

        // Vertices settled as a by-product of the pivot scan belong to this
        // frame's result when they landed under the final bound.
        for &v in &touched {
            if store.distance(v) < new_bound {
                completed.insert(v);
            }
        }

        let mut completed: Vec<usize> = completed.into_iter().collect();
        completed.sort_unstable();
        Ok(FrameResult {
            bound: new_bound,
            completed,
        })
    }

    /// Level 0: bounded Dijkstra expansion. Batches are singletons under the
    /// normal calling discipline, but boundary tie groups can hand several
    /// sources down; they are expanded one by one against the shared store
    /// and merged under the tightest resulting bound.
    fn level_zero(&self, bound: W, sources: &[usize], store: &mut DistanceStore<W>) -> FrameResult<W> {
        if let [x] = sources {
            return self.base_case(bound, *x, store);
        }

        let mut new_bound = bound;
        let mut completed = Vec::new();
        for &x in sources {
            let sub = self.base_case(bound, x, store);
            if sub.bound < new_bound {
                new_bound = sub.bound;
            }
            completed.extend(sub.completed);
        }
        completed.sort_unstable();
        completed.dedup();
        completed.retain(|&v| store.distance(v) < new_bound);
        FrameResult {
            bound: new_bound,
            completed,
        }
    }

    /// Dijkstra-style expansion from a single source, settling vertices in
    /// distance order below `bound` until the budget of `k + 1` settlements
    /// is spent.
    ///
    /// The budget check only fires once the popped key strictly exceeds the
    /// last settled distance, so a tie plateau at the budget boundary is
    /// settled in full; otherwise a frame of equal-distance vertices (for
    /// instance across zero-weight edges) could be handed back to the caller
    /// unchanged, forever.
    fn base_case(&self, bound: W, x: usize, store: &mut DistanceStore<W>) -> FrameResult<W> {
        let budget = self.params.k + 1;
        let mut heap = MinHeap::with_capacity(budget);
        heap.push(x, store.distance(x));

        let mut settled: Vec<usize> = Vec::with_capacity(budget);
        let mut seen: HashSet<usize> = HashSet::with_capacity(budget);
        let mut plateau = W::zero();
        let mut cut = None;

        while let Some((u, key)) = heap.pop() {
            if key >= bound {
                break;
            }
            if key > store.distance(u) || seen.contains(&u) {
                continue;
            }
            if settled.len() >= budget && key > plateau {
                cut = Some(key);
                break;
            }
            seen.insert(u);
            settled.push(u);
            plateau = key;

            for (v, w) in self.graph.out_edges(u) {
                let nd = key + w;
                if nd < bound && nd <= store.distance(v) && !seen.contains(&v) {
                    store.relax(u, v, w);
                    heap.push(v, nd);
                }
            }
        }

        match cut {
            // Budget exhausted: everything settled lies strictly below the
            // first key we refused, which becomes the new bound.
            Some(b) => FrameResult {
                bound: b,
                completed: settled,
            },
            // Candidate pool drained below `bound`: the whole interval is
            // finished.
            None => FrameResult {
                bound,
                completed: settled,
            },
        }
    }

    /// Runs `k` rounds of bounded relaxation from `sources` and classifies
    /// as pivots the sources whose tight-edge subtrees reach size `k`.
    ///
    /// Returns `(pivots, touched)` where `touched` is every vertex reached.
    /// If the touched set outgrows `k * |sources|` the scan aborts early and
    /// every source counts as a pivot: the frontier is too wide for any
    /// compression at this level.
    fn find_pivots(
        &self,
        bound: W,
        sources: &[usize],
        store: &mut DistanceStore<W>,
    ) -> (Vec<usize>, Vec<usize>) {
        let k = self.params.k;
        let mut touched: Vec<usize> = sources.to_vec();
        let mut member: HashSet<usize> = sources.iter().copied().collect();
        // v -> u for the last edge that was tight for v
        let mut parent: HashMap<usize, usize> = HashMap::new();

        for _ in 0..k {
            let round_end = touched.len();
            for idx in 0..round_end {
                let u = touched[idx];
                for (v, w) in self.graph.out_edges(u) {
                    let nd = store.distance(u) + w;
                    if v == u || nd >= bound || nd > store.distance(v) {
                        continue;
                    }
                    if store.relax(u, v, w) {
                        parent.insert(v, u);
                    } else {
                        parent.entry(v).or_insert(u);
                    }
                    if member.insert(v) {
                        touched.push(v);
                    }
                }
            }
            if touched.len() > k.saturating_mul(sources.len()) {
                return (sources.to_vec(), touched);
            }
        }

        // Forest of tight edges, rooted at the sources that kept their own
        // distance. A root whose subtree reaches k vertices is a pivot.
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        for (&v, &u) in &parent {
            children.entry(u).or_default().push(v);
        }

        let mut pivots = Vec::new();
        for &s in sources {
            if parent.contains_key(&s) {
                continue;
            }
            let mut size = 0usize;
            let mut stack = vec![s];
            while let Some(u) = stack.pop() {
                size += 1;
                if size >= k {
                    break;
                }
                if let Some(list) = children.get(&u) {
                    stack.extend(list.iter().copied());
                }
            }
            if size >= k {
                pivots.push(s);
            }
        }
        (pivots, touched)
    }
}
