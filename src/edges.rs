//! Outgoing-edge iterator store: one one-shot queue per vertex, consumed
//! front to back while the vertex is being scanned.

use std::collections::VecDeque;

use crate::config::EdgeOrder;

/// Edge between dense vertex indices. `seq` is its position in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRef {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    pub seq: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeQueues {
    queues: Vec<VecDeque<EdgeRef>>,
}

impl EdgeQueues {
    /// `adjacency[u]` holds the edges of `u` in insertion order; each list is
    /// stably sorted by `order` once and never reordered afterwards.
    pub(crate) fn new(adjacency: Vec<Vec<EdgeRef>>, order: EdgeOrder) -> Self {
        let queues = adjacency
            .into_iter()
            .map(|mut list| {
                match order {
                    EdgeOrder::ByInsertionOrder => {}
                    EdgeOrder::ByTargetId => list.sort_by_key(|e| e.to),
                    EdgeOrder::ByWeight => list.sort_by(|a, b| a.weight.total_cmp(&b.weight)),
                }
                VecDeque::from(list)
            })
            .collect();
        Self { queues }
    }

    pub(crate) fn pop_front(&mut self, v: usize) -> Option<EdgeRef> {
        self.queues[v].pop_front()
    }

    pub(crate) fn remaining(&self, v: usize) -> impl Iterator<Item = &EdgeRef> + '_ {
        self.queues[v].iter()
    }

    pub(crate) fn total(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }
}
