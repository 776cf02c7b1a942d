//! Observer-side mirror of a run, rebuilt only from [`StepEvent`]s.
//!
//! A visualizer that receives the event stream (possibly over the C ABI or as
//! JSON) can keep a `TraceState` to know distances, predecessors and visited
//! vertices without touching the engine.

use std::collections::{HashMap, HashSet};

use crate::event::StepEvent;
use crate::graph::VertexId;

#[derive(Debug, Clone)]
pub struct TraceState<V: VertexId> {
    distance: HashMap<V, f64>,
    predecessor: HashMap<V, V>,
    visited: HashSet<V>,
    current: Option<V>,
    applied: usize,
}

impl<V: VertexId> TraceState<V> {
    /// Starts a mirror with every vertex at +inf except `source` at 0.
    pub fn new<I: IntoIterator<Item = V>>(vertices: I, source: V) -> Self {
        let mut distance: HashMap<V, f64> = vertices.into_iter().map(|v| (v, f64::INFINITY)).collect();
        distance.insert(source, 0.0);
        Self {
            distance,
            predecessor: HashMap::new(),
            visited: HashSet::new(),
            current: None,
            applied: 0,
        }
    }

    pub fn apply(&mut self, event: &StepEvent<V>) {
        self.applied += 1;
        match event {
            StepEvent::SelectedUnvisited { vertex, .. } => self.current = Some(vertex.clone()),
            StepEvent::ExaminedEdge { .. } => {}
            StepEvent::Relaxed { edge, new_distance, updated, .. } => {
                if *updated {
                    self.distance.insert(edge.to.clone(), *new_distance);
                    self.predecessor.insert(edge.to.clone(), edge.from.clone());
                }
            }
            StepEvent::FinishedVertex { vertex } => {
                self.visited.insert(vertex.clone());
                self.current = None;
            }
        }
    }

    /// Tentative distance, +inf for vertices never seen.
    #[must_use]
    pub fn distance(&self, v: &V) -> f64 {
        self.distance.get(v).copied().unwrap_or(f64::INFINITY)
    }

    #[must_use]
    pub fn predecessor(&self, v: &V) -> Option<&V> {
        self.predecessor.get(v)
    }

    #[must_use]
    pub fn is_visited(&self, v: &V) -> bool {
        self.visited.contains(v)
    }

    #[must_use]
    pub fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn events_applied(&self) -> usize {
        self.applied
    }
}

impl<V: VertexId> Extend<StepEvent<V>> for TraceState<V> {
    fn extend<T: IntoIterator<Item = StepEvent<V>>>(&mut self, iter: T) {
        for ev in iter {
            self.apply(&ev);
        }
    }
}
