//! Graph adapters consumed by the stepper.
//!
//! The engine only needs to enumerate vertices and the outgoing edges of each
//! vertex, so any store can take part by implementing [`Graph`]. Two stores are
//! provided: an insertion-ordered adjacency list ([`DiGraph`]) and a
//! compressed-sparse-row layout over dense `u32` ids ([`CsrGraph`]).

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bounds every vertex handle must satisfy.
pub trait VertexId: Clone + Eq + Hash + Display {}
impl<T: Clone + Eq + Hash + Display> VertexId for T {}

/// A directed weighted edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    pub from: V,
    pub to: V,
    pub weight: f64,
}

impl<V> Edge<V> {
    pub fn new(from: V, to: V, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// Read-only view of a directed weighted graph.
pub trait Graph {
    type Vertex: VertexId;

    /// All vertices, in a stable enumeration order.
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// Outgoing edges of `vertex`, in insertion order.
    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Vec<Edge<Self::Vertex>>;
}

/// Adjacency-list digraph that remembers vertex and edge insertion order.
///
/// ```rust
/// use sssp_step::{DiGraph, Graph};
///
/// let mut g = DiGraph::new();
/// g.add_edge("A", "B", 1.0);
/// g.add_vertex("C");
/// assert_eq!(g.vertices(), vec!["A", "B", "C"]);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiGraph<V> {
    order: Vec<V>,
    adjacency: HashMap<V, Vec<Edge<V>>>,
    edges: usize,
}

impl<V: VertexId> Default for DiGraph<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            adjacency: HashMap::new(),
            edges: 0,
        }
    }
}

impl<V: VertexId> DiGraph<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex; returns false when it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.order.push(vertex.clone());
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Adds `from -> to`, inserting missing endpoints. Parallel edges are kept.
    pub fn add_edge(&mut self, from: V, to: V, weight: f64) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        if let Some(list) = self.adjacency.get_mut(&from) {
            list.push(Edge::new(from, to, weight));
            self.edges += 1;
        }
    }

    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges
    }
}

impl<V: VertexId> Graph for DiGraph<V> {
    type Vertex = V;

    fn vertices(&self) -> Vec<V> {
        self.order.clone()
    }

    fn outgoing_edges(&self, vertex: &V) -> Vec<Edge<V>> {
        self.adjacency.get(vertex).cloned().unwrap_or_default()
    }
}

/// CSR graph: the edges of `u` are `targets[offsets[u]..offsets[u+1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    offsets: Vec<u32>,
    targets: Vec<u32>,
    weights: Vec<f64>,
}

impl CsrGraph {
    /// Validates the layout: `offsets` has `n + 1` non-decreasing entries
    /// starting at 0 and ending at `targets.len()`, every target is `< n`,
    /// and `weights` matches `targets` in length.
    pub fn new(offsets: Vec<u32>, targets: Vec<u32>, weights: Vec<f64>) -> Result<Self> {
        let Some(&last) = offsets.last() else {
            return Err(Error::InvalidGraph("CSR offsets must not be empty".into()));
        };
        if offsets[0] != 0 || last as usize != targets.len() || targets.len() != weights.len() {
            return Err(Error::InvalidGraph(format!(
                "CSR layout mismatch: offsets end at {last}, {} targets, {} weights",
                targets.len(),
                weights.len()
            )));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidGraph("CSR offsets must be non-decreasing".into()));
        }
        let n = (offsets.len() - 1) as u32;
        for u in 0..n {
            let (s, e) = (offsets[u as usize] as usize, offsets[u as usize + 1] as usize);
            for idx in s..e {
                if targets[idx] >= n {
                    return Err(Error::DanglingEdge { from: u.to_string(), to: targets[idx].to_string() });
                }
            }
        }
        Ok(Self { offsets, targets, weights })
    }

    /// Builds a CSR graph with `n` vertices from an edge list, keeping the
    /// relative order of each vertex's edges.
    pub fn from_edges(n: u32, edges: &[(u32, u32, f64)]) -> Result<Self> {
        let mut adj: Vec<Vec<(u32, f64)>> = vec![Vec::new(); n as usize];
        for &(u, v, w) in edges {
            if u >= n || v >= n {
                return Err(Error::DanglingEdge { from: u.to_string(), to: v.to_string() });
            }
            adj[u as usize].push((v, w));
        }
        let mut offsets = Vec::with_capacity(n as usize + 1);
        offsets.push(0);
        let mut targets = Vec::with_capacity(edges.len());
        let mut weights = Vec::with_capacity(edges.len());
        for list in &adj {
            for &(v, w) in list {
                targets.push(v);
                weights.push(w);
            }
            offsets.push(targets.len() as u32);
        }
        Self::new(offsets, targets, weights)
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        (self.offsets.len() - 1) as u32
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn targets(&self) -> &[u32] {
        &self.targets
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Graph for CsrGraph {
    type Vertex = u32;

    fn vertices(&self) -> Vec<u32> {
        (0..self.vertex_count()).collect()
    }

    fn outgoing_edges(&self, vertex: &u32) -> Vec<Edge<u32>> {
        let u = *vertex as usize;
        if u + 1 >= self.offsets.len() {
            return Vec::new();
        }
        let (s, e) = (self.offsets[u] as usize, self.offsets[u + 1] as usize);
        (s..e)
            .map(|idx| Edge::new(*vertex, self.targets[idx], self.weights[idx]))
            .collect()
    }
}
