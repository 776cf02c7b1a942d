//! The stepwise Dijkstra driver.
//!
//! Each [`Stepper::step`] performs exactly one micro-step of the phase cycle
//!
//! ```text
//! SelectUnvisited -> SelectNeighbor -> (Relax -> SelectNeighbor)* -> SelectUnvisited
//! ```
//!
//! and returns a [`StepEvent`] describing it, so a caller can inspect every
//! intermediate state. All per-run state is owned by the stepper; the input
//! graph is snapshotted at construction and not referenced afterwards.

use std::collections::HashMap;
use std::fmt;

use crate::config::{RelaxPolicy, StepperConfig};
use crate::edges::{EdgeQueues, EdgeRef};
use crate::error::{Error, Result};
use crate::event::{Phase, StepEvent};
use crate::frontier::Frontier;
use crate::graph::{Edge, Graph, VertexId};
use crate::paths::{PathError, Predecessors};

#[derive(Debug, Clone, Copy)]
enum State {
    SelectUnvisited,
    SelectNeighbor { current: usize },
    Relax { current: usize, edge: EdgeRef },
}

/// Stepwise single-source shortest paths over a snapshot of a graph.
///
/// ```rust
/// use sssp_step::{DiGraph, Stepper};
///
/// let mut g = DiGraph::new();
/// g.add_edge("A", "B", 1.0);
/// g.add_edge("B", "C", 1.0);
/// g.add_edge("A", "C", 5.0);
///
/// let mut run = Stepper::new(&g, &"A").unwrap();
/// while run.has_next_step() {
///     run.step().unwrap();
/// }
/// assert_eq!(run.distance_of(&"C").unwrap(), 2.0);
/// assert_eq!(run.path_to(&"C").unwrap(), vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Clone)]
pub struct Stepper<V: VertexId> {
    config: StepperConfig,
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    source: usize,
    edge_count: usize,
    frontier: Frontier,
    edges: EdgeQueues,
    pred: Predecessors,
    state: State,
    steps: usize,
}

impl<V: VertexId> Stepper<V> {
    /// Snapshots `graph` with the default configuration.
    pub fn new<G: Graph<Vertex = V>>(graph: &G, source: &V) -> Result<Self> {
        Self::with_config(graph, source, StepperConfig::default())
    }

    /// Snapshots `graph` and prepares a run from `source`.
    ///
    /// Fails when `source` is not a vertex of `graph`, when an edge weight is
    /// negative or not finite, or when an edge leads to a vertex the graph did
    /// not enumerate.
    pub fn with_config<G: Graph<Vertex = V>>(graph: &G, source: &V, config: StepperConfig) -> Result<Self> {
        let mut vertices = Vec::new();
        let mut index = HashMap::new();
        for v in graph.vertices() {
            if !index.contains_key(&v) {
                index.insert(v.clone(), vertices.len());
                vertices.push(v);
            }
        }
        let source_idx = *index
            .get(source)
            .ok_or_else(|| Error::SourceNotInGraph(source.to_string()))?;

        let mut adjacency = Vec::with_capacity(vertices.len());
        let mut seq = 0usize;
        for (u, vertex) in vertices.iter().enumerate() {
            let mut list = Vec::new();
            for edge in graph.outgoing_edges(vertex) {
                let w = edge.weight;
                if !w.is_finite() {
                    return Err(Error::InvalidWeight { from: edge.from.to_string(), to: edge.to.to_string(), weight: w });
                }
                if w < 0.0 {
                    return Err(Error::NegativeWeight { from: edge.from.to_string(), to: edge.to.to_string(), weight: w });
                }
                let to = *index.get(&edge.to).ok_or_else(|| Error::DanglingEdge {
                    from: edge.from.to_string(),
                    to: edge.to.to_string(),
                })?;
                list.push(EdgeRef { from: u, to, weight: w, seq });
                seq += 1;
            }
            adjacency.push(list);
        }

        let n = vertices.len();
        tracing::debug!(
            vertices = n,
            edges = seq,
            source = %source,
            edge_order = ?config.edge_order,
            frontier = ?config.frontier,
            relax = ?config.relax,
            "stepper initialized"
        );
        Ok(Self {
            config,
            vertices,
            index,
            source: source_idx,
            edge_count: seq,
            frontier: Frontier::new(n, source_idx, config.frontier),
            edges: EdgeQueues::new(adjacency, config.edge_order),
            pred: Predecessors::new(n),
            state: State::SelectUnvisited,
            steps: 0,
        })
    }

    /// True while some unvisited vertex has a finite tentative distance.
    #[must_use]
    pub fn has_next_step(&self) -> bool {
        self.frontier.unvisited_count() > 0 && self.frontier.min_distance().is_finite()
    }

    /// Performs exactly one micro-step.
    pub fn step(&mut self) -> Result<StepEvent<V>> {
        if !self.has_next_step() {
            return Err(Error::StepAfterCompletion);
        }
        let event = match self.state {
            State::SelectUnvisited => self.select_unvisited()?,
            State::SelectNeighbor { current } => self.select_neighbor(current),
            State::Relax { current, edge } => self.relax(current, edge),
        };
        self.steps += 1;
        tracing::trace!(step = self.steps, kind = event.kind(), "micro-step");
        if matches!(event, StepEvent::FinishedVertex { .. }) && !self.has_next_step() {
            tracing::debug!(
                steps = self.steps,
                unreached = self.frontier.unvisited_count(),
                "run complete"
            );
        }
        Ok(event)
    }

    /// Iterator performing one `step()` per item until the run completes.
    pub fn events(&mut self) -> Events<'_, V> {
        Events { stepper: self }
    }

    fn select_unvisited(&mut self) -> Result<StepEvent<V>> {
        let v = self
            .frontier
            .min_vertex()
            .ok_or_else(|| Error::InternalInvariantViolation("frontier empty while a step remains".into()))?;
        self.state = State::SelectNeighbor { current: v };
        Ok(StepEvent::SelectedUnvisited {
            vertex: self.vertices[v].clone(),
            distance: self.frontier.distance(v),
        })
    }

    fn select_neighbor(&mut self, current: usize) -> StepEvent<V> {
        match self.edges.pop_front(current) {
            None => {
                self.frontier.remove(current);
                self.state = State::SelectUnvisited;
                StepEvent::FinishedVertex { vertex: self.vertices[current].clone() }
            }
            Some(edge) => {
                let relaxed = self.frontier.is_unvisited(edge.to);
                if relaxed {
                    self.state = State::Relax { current, edge };
                }
                StepEvent::ExaminedEdge { edge: self.public_edge(&edge), index: edge.seq, relaxed }
            }
        }
    }

    fn relax(&mut self, current: usize, edge: EdgeRef) -> StepEvent<V> {
        let old = self.frontier.distance(edge.to);
        let nd = self.frontier.distance(edge.from) + edge.weight;
        // an overflowed candidate never counts as reaching the target
        let updated = nd.is_finite()
            && match self.config.relax {
                RelaxPolicy::Guarded => nd < old,
                RelaxPolicy::Unconditional => edge.to != edge.from,
            };
        if updated {
            if nd > old {
                let raised = &self.vertices[edge.to];
                tracing::warn!(
                    vertex = %raised,
                    old,
                    new = nd,
                    "unconditional relaxation raised a tentative distance"
                );
            }
            self.frontier.set_distance(edge.to, nd);
            self.pred.set(edge.to, edge.from);
        }
        self.state = State::SelectNeighbor { current };
        StepEvent::Relaxed { edge: self.public_edge(&edge), index: edge.seq, new_distance: nd, updated }
    }

    fn public_edge(&self, e: &EdgeRef) -> Edge<V> {
        Edge::new(self.vertices[e.from].clone(), self.vertices[e.to].clone(), e.weight)
    }

    fn idx(&self, v: &V) -> Result<usize> {
        self.index.get(v).copied().ok_or_else(|| Error::UnknownVertex(v.to_string()))
    }

    /// Current tentative distance of `v` (+inf when not yet reached).
    pub fn distance_of(&self, v: &V) -> Result<f64> {
        Ok(self.frontier.distance(self.idx(v)?))
    }

    /// `source, ..., v` following recorded predecessors.
    pub fn path_to(&self, v: &V) -> Result<Vec<V>> {
        let target = self.idx(v)?;
        match self.pred.path(self.source, target) {
            Ok(path) => Ok(path.into_iter().map(|i| self.vertices[i].clone()).collect()),
            Err(PathError::Unreachable) => Err(Error::Unreachable(v.to_string())),
            Err(PathError::Cycle) => Err(Error::InternalInvariantViolation(format!(
                "predecessor cycle while rebuilding path to {v}"
            ))),
        }
    }

    pub fn predecessor_of(&self, v: &V) -> Result<Option<&V>> {
        Ok(self.pred.get(self.idx(v)?).map(|u| &self.vertices[u]))
    }

    pub fn is_visited(&self, v: &V) -> Result<bool> {
        Ok(!self.frontier.is_unvisited(self.idx(v)?))
    }

    /// Edges still queued for `v`, front first, with their insertion rank.
    pub fn remaining_edges(&self, v: &V) -> Result<Vec<(usize, Edge<V>)>> {
        let u = self.idx(v)?;
        Ok(self.edges.remaining(u).map(|e| (e.seq, self.public_edge(e))).collect())
    }

    /// Current phase label with its payload.
    #[must_use]
    pub fn phase(&self) -> Phase<V> {
        match self.state {
            State::SelectUnvisited => Phase::SelectUnvisited,
            State::SelectNeighbor { current } => Phase::SelectNeighbor { current: self.vertices[current].clone() },
            State::Relax { current, edge } => Phase::Relax {
                current: self.vertices[current].clone(),
                edge: self.public_edge(&edge),
                index: edge.seq,
            },
        }
    }

    /// Vertex being expanded, if any.
    #[must_use]
    pub fn current(&self) -> Option<&V> {
        match self.state {
            State::SelectUnvisited => None,
            State::SelectNeighbor { current } | State::Relax { current, .. } => Some(&self.vertices[current]),
        }
    }

    #[must_use]
    pub fn source(&self) -> &V {
        &self.vertices[self.source]
    }

    /// Vertices in snapshot order.
    #[must_use]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// `(vertex, tentative distance)` in snapshot order.
    pub fn distances(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.vertices.iter().zip(self.frontier.distances().iter().copied())
    }

    #[must_use]
    pub fn unvisited_count(&self) -> usize {
        self.frontier.unvisited_count()
    }

    /// Edges not yet taken off any queue.
    #[must_use]
    pub fn queued_edge_count(&self) -> usize {
        self.edges.total()
    }

    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Upper bound on the number of micro-steps of a full run: `2|V| + 2|E|`.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        2 * self.vertices.len() + 2 * self.edge_count
    }

    #[must_use]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }
}

/// Textual summary: one `vertex = <id>, distance = <d>` line per non-source
/// vertex, a blank line, `paths:`, then one space-terminated path per vertex
/// that has a predecessor.
impl<V: VertexId> fmt::Display for Stepper<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (v, d)) in self.distances().enumerate() {
            if i != self.source {
                writeln!(f, "vertex = {v}, distance = {d}")?;
            }
        }
        write!(f, "\npaths:\n")?;
        for v in self.pred.assigned() {
            match self.pred.path(self.source, v) {
                Ok(path) => {
                    for u in path {
                        write!(f, "{} ", self.vertices[u])?;
                    }
                    writeln!(f)?;
                }
                Err(err) => {
                    let vertex = &self.vertices[v];
                    tracing::error!(%vertex, ?err, "predecessor chain does not lead back to the source");
                }
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`Stepper::events`].
pub struct Events<'a, V: VertexId> {
    stepper: &'a mut Stepper<V>,
}

impl<V: VertexId> Iterator for Events<'_, V> {
    type Item = Result<StepEvent<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stepper.has_next_step() {
            Some(self.stepper.step())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DiGraph;

    fn triangle() -> DiGraph<&'static str> {
        let mut g = DiGraph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("A", "C", 5.0);
        g
    }

    #[test]
    fn phases_cycle_in_order() {
        let g = triangle();
        let mut s = Stepper::new(&g, &"A").unwrap();
        assert_eq!(s.phase(), Phase::SelectUnvisited);
        assert!(s.current().is_none());

        let ev = s.step().unwrap();
        assert_eq!(ev, StepEvent::SelectedUnvisited { vertex: "A", distance: 0.0 });
        assert_eq!(s.phase(), Phase::SelectNeighbor { current: "A" });

        let ev = s.step().unwrap();
        assert!(matches!(ev, StepEvent::ExaminedEdge { relaxed: true, index: 0, .. }));
        assert!(matches!(s.phase(), Phase::Relax { current: "A", index: 0, .. }));

        let ev = s.step().unwrap();
        assert_eq!(
            ev,
            StepEvent::Relaxed { edge: Edge::new("A", "B", 1.0), index: 0, new_distance: 1.0, updated: true }
        );
        assert_eq!(s.predecessor_of(&"B").unwrap(), Some(&"A"));
        assert_eq!(s.steps_taken(), 3);
    }

    #[test]
    fn finished_vertex_leaves_unvisited_set() {
        let mut g = DiGraph::new();
        g.add_vertex("A");
        let mut s = Stepper::new(&g, &"A").unwrap();
        s.step().unwrap();
        assert!(!s.is_visited(&"A").unwrap());
        assert_eq!(s.step().unwrap(), StepEvent::FinishedVertex { vertex: "A" });
        assert!(s.is_visited(&"A").unwrap());
        assert!(!s.has_next_step());
        assert!(matches!(s.step(), Err(Error::StepAfterCompletion)));
    }

    #[test]
    fn visited_target_is_skipped_without_relax() {
        let mut g = DiGraph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "A", 1.0);
        let mut s = Stepper::new(&g, &"A").unwrap();
        let events: Vec<_> = s.events().collect::<Result<_>>().unwrap();
        let skipped = events
            .iter()
            .filter(|e| matches!(e, StepEvent::ExaminedEdge { relaxed: false, .. }))
            .count();
        assert_eq!(skipped, 1);
        assert_eq!(events.len(), 7);
    }

    #[test]
    fn remaining_edges_shrink_from_front() {
        let g = triangle();
        let mut s = Stepper::new(&g, &"A").unwrap();
        assert_eq!(s.remaining_edges(&"A").unwrap().len(), 2);
        s.step().unwrap();
        s.step().unwrap();
        let left = s.remaining_edges(&"A").unwrap();
        assert_eq!(left, vec![(1, Edge::new("A", "C", 5.0))]);
        assert_eq!(s.queued_edge_count(), 2);
    }

    #[test]
    fn construction_errors() {
        let g = triangle();
        assert!(matches!(Stepper::new(&g, &"Z"), Err(Error::SourceNotInGraph(_))));

        let mut neg = DiGraph::new();
        neg.add_edge(1, 2, -0.5);
        assert!(matches!(Stepper::new(&neg, &1), Err(Error::NegativeWeight { .. })));

        let mut nan = DiGraph::new();
        nan.add_edge(1, 2, f64::NAN);
        assert!(matches!(Stepper::new(&nan, &1), Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn unknown_vertex_queries_fail() {
        let g = triangle();
        let s = Stepper::new(&g, &"A").unwrap();
        assert!(matches!(s.distance_of(&"Q"), Err(Error::UnknownVertex(_))));
        assert!(matches!(s.path_to(&"Q"), Err(Error::UnknownVertex(_))));
    }

    #[test]
    fn broken_predecessor_chain_is_left_out_of_summary() {
        let g = triangle();
        let mut s = Stepper::new(&g, &"A").unwrap();
        while s.has_next_step() {
            s.step().unwrap();
        }
        // B and C now point at each other
        s.pred.set(1, 2);
        assert!(matches!(s.path_to(&"C"), Err(Error::InternalInvariantViolation(_))));
        assert_eq!(s.to_string(), "vertex = B, distance = 1\nvertex = C, distance = 2\n\npaths:\n");
    }

    #[test]
    fn self_loop_never_rewrites_current() {
        let mut g = DiGraph::new();
        g.add_edge("A", "A", 2.0);
        for relax in [RelaxPolicy::Guarded, RelaxPolicy::Unconditional] {
            let cfg = StepperConfig::default().with_relax(relax);
            let mut s = Stepper::with_config(&g, &"A", cfg).unwrap();
            let events: Vec<_> = s.events().collect::<Result<_>>().unwrap();
            assert!(events.iter().any(|e| matches!(e, StepEvent::Relaxed { updated: false, .. })));
            assert_eq!(s.distance_of(&"A").unwrap(), 0.0);
            assert_eq!(s.path_to(&"A").unwrap(), vec!["A"]);
        }
    }
}
