//! Topological graph: nodes and weighted links between them.

use std::fmt::Display;

use crate::error::TopologyError;

/// Dense node index, also used as a matrix coordinate.
pub type NodeId = usize;

/// A node in the topological graph.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologicalNode {
    /// Node index.
    pub id: NodeId,
    /// Optional human-readable node name.
    pub name: Option<String>,
}

impl TopologicalNode {
    /// Creates an unnamed node.
    pub fn new(id: NodeId) -> Self {
        Self { id, name: None }
    }

    /// Creates a named node.
    pub fn named(id: NodeId, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

/// A weighted link between two nodes.
///
/// The link is stored as `src -> dst`, whether it also connects `dst -> src` is decided by the matrix
/// generators.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TopologicalLink {
    /// Source node.
    pub src: NodeId,
    /// Destination node.
    pub dst: NodeId,
    /// Link latency.
    pub latency: f64,
    /// Link bandwidth.
    pub bandwidth: f64,
}

impl TopologicalLink {
    /// Creates a new link.
    pub fn new(src: NodeId, dst: NodeId, latency: f64, bandwidth: f64) -> Self {
        Self {
            src,
            dst,
            latency,
            bandwidth,
        }
    }
}

/// Append-only graph of nodes and links.
///
/// Duplicate links between the same pair of nodes are kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TopologicalGraph {
    nodes: Vec<TopologicalNode>,
    links: Vec<TopologicalLink>,
}

impl TopologicalGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Node ids must be dense, i.e. the new node id must equal the current node count.
    pub fn add_node(&mut self, node: TopologicalNode) {
        assert_eq!(
            node.id,
            self.nodes.len(),
            "Node ids must be allocated densely, expected {}",
            self.nodes.len()
        );
        self.nodes.push(node);
    }

    /// Adds a link between two existing nodes.
    pub fn add_link(&mut self, link: TopologicalLink) {
        self.check_node_exists(link.src);
        self.check_node_exists(link.dst);
        self.links.push(link);
    }

    /// Always fails: links cannot be removed from the graph.
    pub fn remove_link(&mut self, _src: NodeId, _dst: NodeId) -> Result<(), TopologyError> {
        Err(TopologyError::unsupported("remove_link"))
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of links, duplicates included.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns all nodes ordered by id.
    pub fn nodes(&self) -> &[TopologicalNode] {
        &self.nodes
    }

    /// Returns all links in insertion order.
    pub fn links(&self) -> &[TopologicalLink] {
        &self.links
    }

    fn check_node_exists(&self, node: NodeId) {
        assert!(node < self.nodes.len(), "Node {} does not exist", node)
    }
}

impl Display for TopologicalGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "topological graph: {} nodes, {} links", self.node_count(), self.link_count())?;
        writeln!(f, "nodes:")?;
        for node in &self.nodes {
            match &node.name {
                Some(name) => writeln!(f, "  {} ({})", node.id, name)?,
                None => writeln!(f, "  {}", node.id)?,
            }
        }
        writeln!(f, "links:")?;
        for link in &self.links {
            writeln!(
                f,
                "  {} -> {}: latency {}, bandwidth {}",
                link.src, link.dst, link.latency, link.bandwidth
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> TopologicalGraph {
        let mut graph = TopologicalGraph::new();
        graph.add_node(TopologicalNode::new(0));
        graph.add_node(TopologicalNode::named(1, "datacenter"));
        graph
    }

    #[test]
    fn duplicate_links_accumulate() {
        let mut graph = two_node_graph();
        graph.add_link(TopologicalLink::new(0, 1, 1., 10.));
        graph.add_link(TopologicalLink::new(0, 1, 2., 20.));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 2);
        assert_eq!(graph.links()[1].latency, 2.);
    }

    #[test]
    fn remove_link_is_unsupported() {
        let mut graph = two_node_graph();
        graph.add_link(TopologicalLink::new(0, 1, 1., 10.));
        assert_eq!(
            graph.remove_link(0, 1),
            Err(TopologyError::UnsupportedOperation {
                operation: "remove_link"
            })
        );
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    #[should_panic(expected = "Node 2 does not exist")]
    fn link_to_missing_node_panics() {
        let mut graph = two_node_graph();
        graph.add_link(TopologicalLink::new(0, 2, 1., 10.));
    }

    #[test]
    #[should_panic]
    fn sparse_node_ids_panic() {
        let mut graph = TopologicalGraph::new();
        graph.add_node(TopologicalNode::new(1));
    }

    #[test]
    fn display_lists_nodes_and_links() {
        let mut graph = two_node_graph();
        graph.add_link(TopologicalLink::new(0, 1, 1., 10.));
        let text = graph.to_string();
        assert!(text.contains("2 nodes, 1 links"));
        assert!(text.contains("1 (datacenter)"));
        assert!(text.contains("0 -> 1: latency 1, bandwidth 10"));
    }
}
