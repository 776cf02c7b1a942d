//! Stepwise single-source shortest paths for visualizers.
//!
//! [`Stepper`] runs Dijkstra's algorithm one externally observable micro-step
//! at a time: select the nearest unvisited vertex, take its next outgoing
//! edge, relax it. Each call to [`Stepper::step`] returns a [`StepEvent`], and
//! every internal structure can be inspected between calls.
//!
//! Also provided:
//!  - graph adapters ([`DiGraph`], [`CsrGraph`]) behind the [`Graph`] trait
//!  - [`TraceState`], a mirror rebuilt purely from the event stream
//!  - a C ABI (`ffi` feature) over CSR input

mod config;
mod edges;
mod error;
mod event;
mod frontier;
mod graph;
mod paths;
mod stepper;
mod trace;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::{EdgeOrder, FrontierKind, RelaxPolicy, StepperConfig};
pub use error::{Error, Result};
pub use event::{Phase, StepEvent};
pub use graph::{CsrGraph, DiGraph, Edge, Graph, VertexId};
pub use stepper::{Events, Stepper};
pub use trace::TraceState;
