//! Baseline binary-heap Dijkstra over a `CsrGraph`, run to completion in one
//! call. Shared by the integration tests and the `trace` demo to cross-check
//! the stepper's final distances.
#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use sssp_step::{CsrGraph, Error, Result};

#[derive(Copy, Clone)]
struct HeapItem {
    node: u32,
    dist: f64,
}

impl PartialEq for HeapItem {
    fn eq(&self, o: &Self) -> bool {
        self.cmp(o) == Ordering::Equal
    }
}
impl Eq for HeapItem {}
impl Ord for HeapItem {
    // reversed so the std max-heap pops the smallest distance
    fn cmp(&self, o: &Self) -> Ordering {
        o.dist.total_cmp(&self.dist).then_with(|| o.node.cmp(&self.node))
    }
}
impl PartialOrd for HeapItem {
    fn partial_cmp(&self, o: &Self) -> Option<Ordering> {
        Some(self.cmp(o))
    }
}

/// Distances and predecessors of a completed run. `pred[v] == -1` marks the
/// source and unreached vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub dist: Vec<f64>,
    pub pred: Vec<i32>,
    pub relaxations: u64,
    pub settled: u32,
}

/// Classic Dijkstra with lazy deletion.
pub fn dijkstra(graph: &CsrGraph, source: u32) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(Error::SourceNotInGraph(source.to_string()));
    }
    let (off, tgt, wts) = (graph.offsets(), graph.targets(), graph.weights());
    if let Some(pos) = wts.iter().position(|w| !w.is_finite() || *w < 0.0) {
        let from = off.partition_point(|&o| o as usize <= pos) - 1;
        let (from, to, weight) = (from.to_string(), tgt[pos].to_string(), wts[pos]);
        return Err(if weight.is_finite() {
            Error::NegativeWeight { from, to, weight }
        } else {
            Error::InvalidWeight { from, to, weight }
        });
    }

    let mut dist = vec![f64::INFINITY; n as usize];
    let mut pred = vec![-1i32; n as usize];
    let mut settled = vec![false; n as usize];
    dist[source as usize] = 0.0;

    let mut heap = BinaryHeap::with_capacity((n as usize).min(1024));
    let mut relaxations = 0u64;
    let mut settled_count = 0u32;
    heap.push(HeapItem { node: source, dist: 0.0 });

    while let Some(item) = heap.pop() {
        let u = item.node as usize;
        if settled[u] || item.dist > dist[u] {
            continue;
        }
        settled[u] = true;
        settled_count += 1;
        for e in off[u] as usize..off[u + 1] as usize {
            let v = tgt[e] as usize;
            let nd = item.dist + wts[e];
            if nd < dist[v] {
                dist[v] = nd;
                pred[v] = u as i32;
                heap.push(HeapItem { node: v as u32, dist: nd });
                relaxations += 1;
            }
        }
    }

    Ok(ShortestPaths { dist, pred, relaxations, settled: settled_count })
}
