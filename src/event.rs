//! Descriptors returned by each micro-step. This is the only coupling between
//! the engine and whatever renders it.

use serde::{Deserialize, Serialize};

use crate::graph::Edge;

/// Phase label of the driver. The two scanning phases carry the vertex being
/// expanded, and `Relax` additionally carries the pending edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase<V> {
    SelectUnvisited,
    SelectNeighbor { current: V },
    Relax { current: V, edge: Edge<V>, index: usize },
}

/// What one `step()` call did.
///
/// `index` is the position of the edge in the snapshot (vertices in
/// enumeration order, each vertex's edges in adapter order), which tells
/// parallel edges apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepEvent<V> {
    /// `vertex` became the current vertex at tentative distance `distance`.
    SelectedUnvisited { vertex: V, distance: f64 },
    /// The front edge of the current vertex was taken off its queue.
    /// `relaxed` is false when the target was already visited and the edge
    /// was discarded.
    ExaminedEdge { edge: Edge<V>, index: usize, relaxed: bool },
    /// The pending edge was relaxed with candidate `new_distance`; `updated`
    /// tells whether distance and predecessor of the target changed.
    Relaxed { edge: Edge<V>, index: usize, new_distance: f64, updated: bool },
    /// The current vertex's queue drained and it left the unvisited set.
    FinishedVertex { vertex: V },
}

impl<V> StepEvent<V> {
    /// Short kind name, matching the serialized `kind` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StepEvent::SelectedUnvisited { .. } => "selected_unvisited",
            StepEvent::ExaminedEdge { .. } => "examined_edge",
            StepEvent::Relaxed { .. } => "relaxed",
            StepEvent::FinishedVertex { .. } => "finished_vertex",
        }
    }
}
