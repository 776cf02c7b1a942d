//! Frontier store: tentative distances, the unvisited set, and the
//! minimum-distance query over unvisited vertices.
//!
//! Vertices are dense indices. Ties on distance always resolve to the lowest
//! index, whichever [`FrontierKind`] backs the query.

use crate::config::FrontierKind;

/// Fixed-size bitset over dense vertex indices.
#[derive(Debug, Clone)]
struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    fn full(n: usize) -> Self {
        let mut words = vec![u64::MAX; n.div_ceil(64)];
        if n % 64 != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << (n % 64)) - 1;
            }
        }
        Self { words, len: n }
    }

    #[inline]
    fn contains(&self, i: usize) -> bool {
        i < self.len && self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    /// Clears bit `i`; returns whether it was set.
    #[inline]
    fn remove(&mut self, i: usize) -> bool {
        let had = self.contains(i);
        if had {
            self.words[i / 64] &= !(1u64 << (i % 64));
        }
        had
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(wi * 64 + bit)
            })
        })
    }
}

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    dist: f64,
    node: u32,
}

impl HeapItem {
    #[inline]
    fn before(&self, other: &Self) -> bool {
        self.dist < other.dist || (self.dist == other.dist && self.node < other.node)
    }
}

/// Binary min-heap keyed on `(dist, node)` with explicit sift operations.
#[derive(Debug, Clone, Default)]
struct MinHeap {
    data: Vec<HeapItem>,
}

impl MinHeap {
    #[inline]
    fn push(&mut self, item: HeapItem) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    #[inline]
    fn peek(&self) -> Option<&HeapItem> {
        self.data.first()
    }

    #[inline]
    fn pop(&mut self) -> Option<HeapItem> {
        let len = self.data.len();
        if len == 0 {
            return None;
        }
        self.data.swap(0, len - 1);
        let out = self.data.pop();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].before(&self.data[parent]) {
                self.data.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < n && self.data[right].before(&self.data[left]) {
                best = right;
            }
            if self.data[best].before(&self.data[idx]) {
                self.data.swap(idx, best);
                idx = best;
            } else {
                break;
            }
        }
    }
}

/// Distances plus unvisited set with a configurable minimum query.
#[derive(Debug, Clone)]
pub(crate) struct Frontier {
    dist: Vec<f64>,
    unvisited: BitSet,
    remaining: usize,
    // Some(..) when backed by a heap. The top entry is always live: it names
    // an unvisited vertex at its current distance.
    heap: Option<MinHeap>,
}

impl Frontier {
    pub(crate) fn new(n: usize, source: usize, kind: FrontierKind) -> Self {
        let mut dist = vec![f64::INFINITY; n];
        dist[source] = 0.0;
        let heap = match kind {
            FrontierKind::LinearScan => None,
            FrontierKind::BinaryHeap => {
                let mut h = MinHeap::default();
                h.push(HeapItem { dist: 0.0, node: source as u32 });
                Some(h)
            }
        };
        Self { dist, unvisited: BitSet::full(n), remaining: n, heap }
    }

    #[inline]
    pub(crate) fn distance(&self, v: usize) -> f64 {
        self.dist[v]
    }

    pub(crate) fn distances(&self) -> &[f64] {
        &self.dist
    }

    #[inline]
    pub(crate) fn is_unvisited(&self, v: usize) -> bool {
        self.unvisited.contains(v)
    }

    pub(crate) fn unvisited_count(&self) -> usize {
        self.remaining
    }

    pub(crate) fn set_distance(&mut self, v: usize, d: f64) {
        self.dist[v] = d;
        if self.unvisited.contains(v) && d.is_finite() {
            if let Some(heap) = self.heap.as_mut() {
                heap.push(HeapItem { dist: d, node: v as u32 });
            }
        }
        self.prune();
    }

    /// Marks `v` visited; returns false when it already was.
    pub(crate) fn remove(&mut self, v: usize) -> bool {
        let had = self.unvisited.remove(v);
        if had {
            self.remaining -= 1;
        }
        self.prune();
        had
    }

    /// Unvisited vertex with the smallest finite distance, lowest index on ties.
    pub(crate) fn min_vertex(&self) -> Option<usize> {
        match &self.heap {
            Some(heap) => heap.peek().map(|top| top.node as usize),
            None => {
                let mut best: Option<usize> = None;
                for v in self.unvisited.iter() {
                    let d = self.dist[v];
                    if d.is_finite() && best.map_or(true, |b| d < self.dist[b]) {
                        best = Some(v);
                    }
                }
                best
            }
        }
    }

    /// `min { distance[v] : v unvisited }`, +inf when none is finite.
    pub(crate) fn min_distance(&self) -> f64 {
        self.min_vertex().map_or(f64::INFINITY, |v| self.dist[v])
    }

    fn prune(&mut self) {
        let Some(heap) = self.heap.as_mut() else { return };
        while let Some(top) = heap.peek() {
            let v = top.node as usize;
            if self.unvisited.contains(v) && self.dist[v] == top.dist {
                break;
            }
            heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(n: usize, source: usize) -> [Frontier; 2] {
        [
            Frontier::new(n, source, FrontierKind::LinearScan),
            Frontier::new(n, source, FrontierKind::BinaryHeap),
        ]
    }

    #[test]
    fn bitset_handles_word_boundaries() {
        let mut b = BitSet::full(130);
        assert!(b.contains(0) && b.contains(63) && b.contains(64) && b.contains(129));
        assert!(!b.contains(130));
        assert!(b.remove(64));
        assert!(!b.remove(64));
        assert_eq!(b.iter().count(), 129);
        assert_eq!(BitSet::full(64).iter().count(), 64);
    }

    #[test]
    fn source_is_initial_minimum() {
        for f in both(5, 3) {
            assert_eq!(f.min_vertex(), Some(3));
            assert_eq!(f.min_distance(), 0.0);
            assert_eq!(f.distance(0), f64::INFINITY);
        }
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        for mut f in both(6, 0) {
            f.remove(0);
            f.set_distance(4, 2.0);
            f.set_distance(2, 2.0);
            f.set_distance(5, 3.0);
            assert_eq!(f.min_vertex(), Some(2));
            f.remove(2);
            assert_eq!(f.min_vertex(), Some(4));
        }
    }

    #[test]
    fn only_infinite_left_means_no_minimum() {
        for mut f in both(3, 1) {
            assert!(f.remove(1));
            assert_eq!(f.min_vertex(), None);
            assert_eq!(f.min_distance(), f64::INFINITY);
            assert_eq!(f.unvisited_count(), 2);
        }
    }

    #[test]
    fn heap_discards_stale_entries_after_raise() {
        let mut f = Frontier::new(3, 0, FrontierKind::BinaryHeap);
        f.remove(0);
        f.set_distance(1, 1.0);
        f.set_distance(2, 2.0);
        // raise vertex 1 above vertex 2; the old 1.0 entry must not win
        f.set_distance(1, 5.0);
        assert_eq!(f.min_vertex(), Some(2));
        f.remove(2);
        assert_eq!(f.min_vertex(), Some(1));
        assert_eq!(f.min_distance(), 5.0);
    }
}
