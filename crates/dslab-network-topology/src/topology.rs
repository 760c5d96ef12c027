//! Network topology connecting simulation actors.

use std::cell::{Cell, Ref, RefCell};
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace, warn};

use crate::config::{Regeneration, TopologyConfig};
use crate::error::TopologyError;
use crate::graph::{NodeId, TopologicalGraph, TopologicalLink, TopologicalNode};
use crate::matrix::{BandwidthMatrix, DelayMatrix};
use crate::registry::NodeRegistry;

/// Topology lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopologyState {
    /// No links were added, network is not simulated.
    Uninitialized,
    /// At least one link was added, delays and bandwidths are derived from the graph.
    Configured,
}

struct Matrices {
    delays: DelayMatrix,
    bandwidths: BandwidthMatrix,
}

impl Matrices {
    fn empty() -> Self {
        Self {
            delays: DelayMatrix::default(),
            bandwidths: BandwidthMatrix::default(),
        }
    }

    fn generate(graph: &TopologicalGraph, config: &TopologyConfig) -> Self {
        trace!(
            "regenerating {}x{} matrices from {} links",
            graph.node_count(),
            graph.node_count(),
            graph.link_count()
        );
        Self {
            delays: DelayMatrix::new(graph, config.directed_delay),
            bandwidths: BandwidthMatrix::new(graph, config.directed_bandwidth),
        }
    }
}

/// Network topology which maps actors to graph nodes and answers delay and bandwidth queries.
///
/// Delays are shortest-path latencies over the link graph, bandwidths are taken from direct links only.
/// Both are precomputed as matrices which are rebuilt from scratch after each graph change,
/// either immediately or on the next query depending on [`Regeneration`].
///
/// Queries never fail: while the topology has no links, or when an actor is not part of it,
/// the returned delay and bandwidth are zero.
pub struct Topology<A> {
    config: TopologyConfig,
    graph: TopologicalGraph,
    registry: NodeRegistry<A>,
    matrices: RefCell<Matrices>,
    stale: Cell<bool>,
    network_enabled: bool,
    node_name: Option<fn(&A) -> String>,
}

impl<A: Eq + Hash> Topology<A> {
    /// Creates an empty topology with default config.
    pub fn new() -> Self {
        Self::with_config(TopologyConfig::default())
    }

    /// Creates an empty topology with the given config.
    pub fn with_config(config: TopologyConfig) -> Self {
        Self {
            config,
            graph: TopologicalGraph::new(),
            registry: NodeRegistry::new(),
            matrices: RefCell::new(Matrices::empty()),
            stale: Cell::new(false),
            network_enabled: false,
            node_name: None,
        }
    }

    /// Sets whether links are one-way when computing delays.
    pub fn with_directed_delay(mut self, directed: bool) -> Self {
        self.config.directed_delay = directed;
        self.invalidate();
        self
    }

    /// Sets whether links are one-way when computing bandwidths.
    pub fn with_directed_bandwidth(mut self, directed: bool) -> Self {
        self.config.directed_bandwidth = directed;
        self.invalidate();
        self
    }

    /// Sets the matrix regeneration policy.
    pub fn with_regeneration(mut self, regeneration: Regeneration) -> Self {
        self.config.regeneration = regeneration;
        self.invalidate();
        self
    }

    /// Returns the topology config.
    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Adds a link between two actors, registering actors which are not yet part of the topology.
    ///
    /// Link weights are not validated.
    pub fn add_link(&mut self, src: A, dst: A, bandwidth: f64, latency: f64) {
        let src_node = self.add_node(src);
        let dst_node = self.add_node(dst);
        if latency < 0. || bandwidth < 0. {
            warn!(
                "negative link weights between nodes {} and {}: latency {}, bandwidth {}",
                src_node, dst_node, latency, bandwidth
            );
        }
        self.graph
            .add_link(TopologicalLink::new(src_node, dst_node, latency, bandwidth));
        debug!(
            "added link {} -> {} with latency {} and bandwidth {}",
            src_node, dst_node, latency, bandwidth
        );
        self.invalidate();
        self.network_enabled = true;
    }

    /// Always fails with [`TopologyError::UnsupportedOperation`]: links cannot be removed.
    pub fn remove_link(&mut self, src: &A, dst: &A) -> Result<(), TopologyError> {
        debug!(
            "rejected removal of link between nodes {:?} and {:?}",
            self.registry.get(src),
            self.registry.get(dst)
        );
        Err(TopologyError::unsupported("remove_link"))
    }

    /// Returns the network delay from `src` to `dst`.
    ///
    /// Returns zero if the network is not enabled or either actor is unknown,
    /// and infinity if the actors are not connected.
    pub fn delay(&self, src: &A, dst: &A) -> f64 {
        match self.lookup(src, dst) {
            Some((src, dst)) => self.matrices().delays.delay(src, dst).unwrap_or(0.),
            None => 0.,
        }
    }

    /// Returns the bandwidth of the direct link from `src` to `dst`.
    ///
    /// Returns zero if the network is not enabled, either actor is unknown or there is no direct link.
    pub fn bandwidth(&self, src: &A, dst: &A) -> f64 {
        match self.lookup(src, dst) {
            Some((src, dst)) => self.matrices().bandwidths.bandwidth(src, dst).unwrap_or(0.),
            None => 0.,
        }
    }

    /// Checks whether network delays are simulated, i.e. at least one link was added.
    pub fn is_network_enabled(&self) -> bool {
        self.network_enabled
    }

    /// Returns the topology lifecycle state.
    pub fn state(&self) -> TopologyState {
        if self.network_enabled {
            TopologyState::Configured
        } else {
            TopologyState::Uninitialized
        }
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &TopologicalGraph {
        &self.graph
    }

    /// Returns the number of nodes (registered actors).
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Checks whether the actor is part of the topology.
    pub fn contains(&self, actor: &A) -> bool {
        self.registry.contains(actor)
    }

    /// Returns a copy of the bandwidth matrix indexed by node ids.
    pub fn bandwidth_matrix_snapshot(&self) -> Vec<Vec<f64>> {
        self.matrices().bandwidths.to_vec()
    }

    /// Returns a copy of the delay matrix indexed by node ids.
    pub fn delay_matrix_snapshot(&self) -> Vec<Vec<f64>> {
        self.matrices().delays.to_vec()
    }

    fn add_node(&mut self, actor: A) -> NodeId {
        if let Some(node) = self.registry.get(&actor) {
            return node;
        }
        let name = self.node_name.map(|node_name| node_name(&actor));
        let (node, _) = self.registry.resolve(actor);
        match name {
            Some(name) => {
                debug!("actor {} is mapped to node {}", name, node);
                self.graph.add_node(TopologicalNode::named(node, &name));
            }
            None => {
                debug!("new actor is mapped to node {}", node);
                self.graph.add_node(TopologicalNode::new(node));
            }
        }
        node
    }

    fn lookup(&self, src: &A, dst: &A) -> Option<(NodeId, NodeId)> {
        if !self.network_enabled {
            return None;
        }
        Some((self.registry.get(src)?, self.registry.get(dst)?))
    }

    fn invalidate(&mut self) {
        match self.config.regeneration {
            Regeneration::Eager => {
                *self.matrices.get_mut() = Matrices::generate(&self.graph, &self.config);
                self.stale.set(false);
            }
            Regeneration::Lazy => self.stale.set(true),
        }
    }

    fn matrices(&self) -> Ref<'_, Matrices> {
        if self.stale.get() {
            *self.matrices.borrow_mut() = Matrices::generate(&self.graph, &self.config);
            self.stale.set(false);
        }
        self.matrices.borrow()
    }
}

impl<A: Eq + Hash + Debug> Topology<A> {
    /// Names graph nodes after the `Debug` form of their actors, useful when printing the graph.
    ///
    /// Applies to actors added after this call.
    pub fn with_debug_node_names(mut self) -> Self {
        let node_name: fn(&A) -> String = |actor| format!("{:?}", actor);
        self.node_name = Some(node_name);
        self
    }
}

impl<A: Eq + Hash> Default for Topology<A> {
    fn default() -> Self {
        Self::new()
    }
}
