//! Topology vertices for the resource graph that accompanies alerts.
//!
//! A [`Vertex`] is the unit the topology observer ingests; relationships are
//! [`Reference`]s restricted to the fixed [`EdgeType`] vocabulary.

pub mod edge;
pub mod error;
pub mod vertex;

pub use edge::EdgeType;
pub use error::{Result, TopologyError};
pub use vertex::{Reference, Vertex, VertexBuilder, INSERT_REPLACE};
