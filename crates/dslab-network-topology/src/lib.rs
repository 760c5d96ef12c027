#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod model;
pub mod registry;
pub mod topology;

pub use config::{Regeneration, TopologyConfig};
pub use error::TopologyError;
pub use graph::{NodeId, TopologicalGraph, TopologicalLink, TopologicalNode};
pub use matrix::{BandwidthMatrix, DelayMatrix};
pub use model::{NetworkTopology, NullTopology};
pub use registry::NodeRegistry;
pub use topology::{Topology, TopologyState};
