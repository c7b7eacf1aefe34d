use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use num_traits::{Float, Zero};

/// Batched frontier queue for one recursion frame.
///
/// Holds `(vertex, key)` entries whose keys all lie strictly below the bound
/// fixed at construction. Re-inserting a vertex keeps its smallest key.
/// [`BoundedHeap::pull`] removes a batch of roughly `capacity` smallest-keyed
/// vertices together with a separating bound: every pulled key is strictly
/// below it, every remaining key at or above it. When keys tie at the batch
/// boundary the whole tie group is pulled, so the separation stays strict.
///
/// Internally a two-level block list. `prepended` blocks carry batches whose
/// keys were below everything stored at prepend time (newest batch first, so
/// key ranges ascend front to back). `inserted` blocks hold individually
/// inserted entries, routed by per-block upper bounds and split at the median
/// when they overflow. An entry superseded by a smaller re-insertion is not
/// removed eagerly; it is dropped whenever a pull walks over it.
#[derive(Debug)]
pub struct BoundedHeap<W> {
    capacity: usize,
    bound: W,
    /// Smallest live key per vertex; block entries that disagree are stale.
    keys: HashMap<usize, W>,
    prepended: VecDeque<Block<W>>,
    inserted: VecDeque<Block<W>>,
}

#[derive(Debug)]
struct Block<W> {
    /// Inclusive upper routing bound; the last inserted block always
    /// carries the heap bound so every key has a home.
    upper: W,
    pairs: Vec<(usize, W)>,
}

impl<W> BoundedHeap<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    /// Creates an empty heap with the given batch capacity and key bound.
    pub fn new(capacity: usize, bound: W) -> Self {
        BoundedHeap {
            capacity: capacity.max(1),
            bound,
            keys: HashMap::new(),
            prepended: VecDeque::new(),
            inserted: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Inserts a vertex, keeping the smaller key if it is already present.
    ///
    /// Panics if `key` is not strictly below the heap bound; such an insert
    /// is a caller bug with no runtime recovery.
    pub fn insert(&mut self, vertex: usize, key: W) {
        assert!(
            key < self.bound,
            "inserted key {key:?} not below heap bound {:?}",
            self.bound
        );
        if let Some(&old) = self.keys.get(&vertex) {
            if old <= key {
                return;
            }
        }
        self.keys.insert(vertex, key);

        if self.inserted.is_empty() {
            self.inserted.push_back(Block {
                upper: self.bound,
                pairs: Vec::new(),
            });
        }
        let idx = self
            .inserted
            .iter()
            .position(|b| key <= b.upper)
            .unwrap_or(self.inserted.len() - 1);
        self.inserted[idx].pairs.push((vertex, key));
        if self.inserted[idx].pairs.len() > self.capacity.saturating_mul(2) {
            self.split_inserted(idx);
        }
    }

    /// Bulk-inserts pairs whose keys are all below every key currently
    /// stored (the caller's obligation). Duplicate vertices keep their
    /// smallest key; pairs that do not improve on a stored key are dropped.
    pub fn batch_prepend(&mut self, pairs: Vec<(usize, W)>) {
        let mut best: HashMap<usize, W> = HashMap::with_capacity(pairs.len());
        for (vertex, key) in pairs {
            debug_assert!(key < self.bound);
            match best.get(&vertex) {
                Some(&k) if k <= key => {}
                _ => {
                    best.insert(vertex, key);
                }
            }
        }

        let mut fresh: Vec<(usize, W)> = Vec::with_capacity(best.len());
        for (vertex, key) in best {
            match self.keys.get(&vertex) {
                Some(&old) if old <= key => {}
                _ => {
                    self.keys.insert(vertex, key);
                    fresh.push((vertex, key));
                }
            }
        }
        if fresh.is_empty() {
            return;
        }

        fresh.sort_unstable_by(|a, b| a.1.cmp(&b.1));
        let mut blocks: Vec<Block<W>> = fresh
            .chunks(self.capacity)
            .map(|chunk| Block {
                upper: chunk[chunk.len() - 1].1,
                pairs: chunk.to_vec(),
            })
            .collect();
        while let Some(block) = blocks.pop() {
            self.prepended.push_front(block);
        }
    }

    /// Removes and returns a batch of smallest-keyed vertices together with
    /// the new separating bound.
    ///
    /// If at most `capacity` entries remain, all of them are returned with
    /// the heap bound. Otherwise the batch holds the `capacity` smallest
    /// keys extended through any tie at the boundary, and the bound is the
    /// smallest key left behind.
    pub fn pull(&mut self) -> (W, Vec<usize>) {
        if self.keys.len() <= self.capacity {
            let batch: Vec<usize> = self.keys.drain().map(|(v, _)| v).collect();
            self.prepended.clear();
            self.inserted.clear();
            return (self.bound, batch);
        }

        let mut front = Vec::new();
        let mut back = Vec::new();
        Self::take_front_live(&mut self.prepended, &self.keys, self.capacity, &mut front);
        Self::take_front_live(&mut self.inserted, &self.keys, self.capacity, &mut back);

        // The capacity-th smallest key over both levels is the cut; the
        // candidate lists are guaranteed to contain at least that many.
        let mut merged: Vec<W> = front.iter().chain(back.iter()).map(|p| p.1).collect();
        merged.sort_unstable();
        let cut = merged[self.capacity - 1];

        // Boundary ties hiding in untouched blocks must come along, or the
        // separating bound would not be strict.
        Self::sweep_through(&mut self.prepended, &self.keys, cut, &mut front);
        Self::sweep_through(&mut self.inserted, &self.keys, cut, &mut back);

        let mut batch = Vec::new();
        let mut keep_front = Vec::new();
        let mut keep_back = Vec::new();
        for (vertex, key) in front {
            if key <= cut {
                if self.keys.remove(&vertex).is_some() {
                    batch.push(vertex);
                }
            } else {
                keep_front.push((vertex, key));
            }
        }
        for (vertex, key) in back {
            if key <= cut {
                if self.keys.remove(&vertex).is_some() {
                    batch.push(vertex);
                }
            } else {
                keep_back.push((vertex, key));
            }
        }

        // Leftover candidates return to the front of their own level so the
        // block ordering survives.
        if !keep_front.is_empty() {
            self.prepended.push_front(Self::leftover_block(keep_front));
        }
        if !keep_back.is_empty() {
            self.inserted.push_front(Self::leftover_block(keep_back));
        }
        if let Some(last) = self.inserted.back_mut() {
            last.upper = self.bound;
        }

        let next = match (
            Self::live_min(&mut self.prepended, &self.keys),
            Self::live_min(&mut self.inserted, &self.keys),
        ) {
            (Some(a), Some(b)) => {
                if a < b {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => self.bound,
        };
        (next, batch)
    }

    /// Pops whole front blocks until `want` live pairs are collected or the
    /// level runs dry. Stale pairs encountered on the way are discarded.
    fn take_front_live(
        blocks: &mut VecDeque<Block<W>>,
        keys: &HashMap<usize, W>,
        want: usize,
        out: &mut Vec<(usize, W)>,
    ) {
        let mut taken = 0;
        while taken < want {
            let Some(block) = blocks.pop_front() else {
                break;
            };
            for (vertex, key) in block.pairs {
                if keys.get(&vertex) == Some(&key) {
                    out.push((vertex, key));
                    taken += 1;
                }
            }
        }
    }

    /// Moves every live pair with key at or below `cut` out of the leading
    /// blocks. Stops at the first block holding only larger keys; the block
    /// ordering guarantees nothing beyond it can tie with the cut.
    fn sweep_through(
        blocks: &mut VecDeque<Block<W>>,
        keys: &HashMap<usize, W>,
        cut: W,
        out: &mut Vec<(usize, W)>,
    ) {
        while let Some(block) = blocks.front_mut() {
            if !block.pairs.iter().any(|&(_, k)| k <= cut) {
                return;
            }
            let mut rest = Vec::new();
            for &(vertex, key) in &block.pairs {
                if key <= cut {
                    if keys.get(&vertex) == Some(&key) {
                        out.push((vertex, key));
                    }
                } else {
                    rest.push((vertex, key));
                }
            }
            if rest.is_empty() {
                blocks.pop_front();
            } else {
                block.pairs = rest;
                return;
            }
        }
    }

    /// Smallest live key on this level, dropping exhausted or fully stale
    /// front blocks on the way.
    fn live_min(blocks: &mut VecDeque<Block<W>>, keys: &HashMap<usize, W>) -> Option<W> {
        while let Some(block) = blocks.front_mut() {
            block.pairs.retain(|(v, k)| keys.get(v) == Some(k));
            if block.pairs.is_empty() {
                blocks.pop_front();
                continue;
            }
            return block.pairs.iter().map(|&(_, k)| k).min();
        }
        None
    }

    fn leftover_block(pairs: Vec<(usize, W)>) -> Block<W> {
        let mut upper = pairs[0].1;
        for &(_, key) in &pairs {
            if key > upper {
                upper = key;
            }
        }
        Block { upper, pairs }
    }

    fn split_inserted(&mut self, idx: usize) {
        let block = &mut self.inserted[idx];
        block.pairs.sort_unstable_by(|a, b| a.1.cmp(&b.1));
        let mid_key = block.pairs[block.pairs.len() / 2].1;
        let split_at = block.pairs.partition_point(|p| p.1 <= mid_key);
        if split_at == block.pairs.len() {
            // every key at or past the median ties with it; leave the block
            // oversized rather than create an empty split
            return;
        }
        let rest = block.pairs.split_off(split_at);
        let rest_upper = block.upper;
        block.upper = mid_key;
        self.inserted.insert(
            idx + 1,
            Block {
                upper: rest_upper,
                pairs: rest,
            },
        );
    }
}
