//! Network topology interface used by the simulation engine.

use std::hash::Hash;

use log::warn;

use crate::error::TopologyError;
use crate::topology::Topology;

/// Network topology interface.
///
/// The simulation engine declares links between actors while building the scenario and then asks
/// for the delay of each message it delivers from one actor to another.
/// Implementations must never fail on queries: unknown actors have zero delay and bandwidth.
pub trait NetworkTopology<A> {
    /// Adds a link with the given bandwidth and latency between two actors.
    fn add_link(&mut self, src: A, dst: A, bandwidth: f64, latency: f64);

    /// Removes a link between two actors.
    ///
    /// Topologies are append-only, so the implementations return [`TopologyError::UnsupportedOperation`].
    fn remove_link(&mut self, src: &A, dst: &A) -> Result<(), TopologyError>;

    /// Returns the network delay from `src` to `dst`.
    fn delay(&self, src: &A, dst: &A) -> f64;

    /// Returns the network bandwidth from `src` to `dst`.
    fn bandwidth(&self, src: &A, dst: &A) -> f64;

    /// Returns true if network delays are simulated.
    fn is_network_enabled(&self) -> bool;
}

impl<A: Eq + Hash> NetworkTopology<A> for Topology<A> {
    fn add_link(&mut self, src: A, dst: A, bandwidth: f64, latency: f64) {
        Topology::add_link(self, src, dst, bandwidth, latency)
    }

    fn remove_link(&mut self, src: &A, dst: &A) -> Result<(), TopologyError> {
        Topology::remove_link(self, src, dst)
    }

    fn delay(&self, src: &A, dst: &A) -> f64 {
        Topology::delay(self, src, dst)
    }

    fn bandwidth(&self, src: &A, dst: &A) -> f64 {
        Topology::bandwidth(self, src, dst)
    }

    fn is_network_enabled(&self) -> bool {
        Topology::is_network_enabled(self)
    }
}

// Null topology -------------------------------------------------------------------------------------------------------

/// Topology used when the network is not simulated: all delays and bandwidths are zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTopology;

impl<A> NetworkTopology<A> for NullTopology {
    fn add_link(&mut self, _src: A, _dst: A, bandwidth: f64, latency: f64) {
        warn!(
            "ignored link with latency {} and bandwidth {}: network is not simulated",
            latency, bandwidth
        );
    }

    fn remove_link(&mut self, _src: &A, _dst: &A) -> Result<(), TopologyError> {
        Err(TopologyError::unsupported("remove_link"))
    }

    fn delay(&self, _src: &A, _dst: &A) -> f64 {
        0.
    }

    fn bandwidth(&self, _src: &A, _dst: &A) -> f64 {
        0.
    }

    fn is_network_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_delays(topology: &dyn NetworkTopology<u32>, messages: &[(u32, u32)]) -> Vec<f64> {
        messages.iter().map(|(src, dst)| topology.delay(src, dst)).collect()
    }

    #[test]
    fn null_topology_has_no_network() {
        let mut topology = NullTopology;
        topology.add_link(1u32, 2, 10., 1.);
        assert!(!NetworkTopology::<u32>::is_network_enabled(&topology));
        assert_eq!(message_delays(&topology, &[(1, 2), (2, 1)]), vec![0., 0.]);
        assert!(NetworkTopology::<u32>::remove_link(&mut topology, &1, &2).is_err());
    }

    #[test]
    fn topology_through_trait_object() {
        let mut topology: Box<dyn NetworkTopology<u32>> = Box::new(Topology::<u32>::new());
        topology.add_link(1, 2, 10., 1.);
        topology.add_link(2, 3, 20., 2.);
        assert!(topology.is_network_enabled());
        assert_eq!(message_delays(&*topology, &[(1, 3), (3, 4)]), vec![3., 0.]);
        assert_eq!(topology.bandwidth(&3, &2), 20.);
    }
}
