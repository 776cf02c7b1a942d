//! Run configuration: edge scan order, frontier implementation, relaxation rule.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Order in which a vertex's outgoing edges are consumed during its scan.
///
/// Every order is stable: edges that compare equal keep insertion order.
/// The choice changes tie-breaks and the event stream, never final distances
/// under [`RelaxPolicy::Guarded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrder {
    /// By the dense index of the target (vertex enumeration order).
    ByTargetId,
    /// By ascending weight.
    ByWeight,
    /// As returned by the graph adapter.
    #[default]
    ByInsertionOrder,
}

/// Implementation of the minimum-distance query over unvisited vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierKind {
    /// O(|V|) scan per query.
    #[default]
    LinearScan,
    /// Indexed min-heap with lazy deletion.
    BinaryHeap,
}

/// What a RELAX micro-step does with a candidate distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxPolicy {
    /// Update only when `candidate < distance[target]`.
    #[default]
    Guarded,
    /// Always overwrite distance and predecessor, reproducing the classic
    /// visualizer trace. A self-loop never rewrites the current vertex.
    Unconditional,
}

/// Configuration of a [`Stepper`](crate::Stepper).
///
/// ```rust
/// use sssp_step::{EdgeOrder, FrontierKind, StepperConfig};
///
/// let cfg = StepperConfig::from_json(r#"{"edge_order":"by_weight","frontier":"binary_heap"}"#).unwrap();
/// assert_eq!(cfg.edge_order, EdgeOrder::ByWeight);
/// assert_eq!(cfg.frontier, FrontierKind::BinaryHeap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub edge_order: EdgeOrder,
    pub frontier: FrontierKind,
    pub relax: RelaxPolicy,
}

impl StepperConfig {
    /// Parses a JSON object; missing fields fall back to defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn with_edge_order(mut self, edge_order: EdgeOrder) -> Self {
        self.edge_order = edge_order;
        self
    }

    #[must_use]
    pub fn with_frontier(mut self, frontier: FrontierKind) -> Self {
        self.frontier = frontier;
        self
    }

    #[must_use]
    pub fn with_relax(mut self, relax: RelaxPolicy) -> Self {
        self.relax = relax;
        self
    }
}
