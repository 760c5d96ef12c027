//! Topology errors.

use std::fmt::{Debug, Display};

/// Error returned by fallible topology operations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// The requested operation is not supported by the topology.
    ///
    /// Topologies are append-only: links can be added but never removed.
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl TopologyError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }
}

impl Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation { operation } => {
                write!(f, "unsupported operation: {} (network topology is append-only)", operation)
            }
        }
    }
}

impl Debug for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for TopologyError {}
