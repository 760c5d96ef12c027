//! Delay and bandwidth matrices derived from a topological graph.

use std::fmt::Display;

use crate::graph::{NodeId, TopologicalGraph};

fn write_matrix(f: &mut std::fmt::Formatter<'_>, title: &str, rows: &[Vec<f64>]) -> std::fmt::Result {
    writeln!(f, "{} ({}x{}):", title, rows.len(), rows.len())?;
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .map(|value| {
                if value.is_infinite() {
                    "-".to_string()
                } else {
                    format!("{}", value)
                }
            })
            .collect();
        writeln!(f, "  {}", line.join("\t"))?;
    }
    Ok(())
}

fn lookup(rows: &[Vec<f64>], src: NodeId, dst: NodeId) -> Option<f64> {
    rows.get(src).and_then(|row| row.get(dst)).copied()
}

// Delay matrix (Floyd–Warshall) ---------------------------------------------------------------------------------------

/// Shortest-path latencies between every pair of nodes.
///
/// Pairs without any connecting path have infinite delay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayMatrix {
    delays: Vec<Vec<f64>>,
}

impl DelayMatrix {
    /// Computes the matrix for the graph.
    ///
    /// If `directed` is false, each link also connects its destination back to its source.
    /// When several links connect the same pair, the last added one defines the direct latency.
    /// Links from a node to itself do not affect delays.
    pub fn new(graph: &TopologicalGraph, directed: bool) -> Self {
        let node_count = graph.node_count();
        let mut delays = vec![vec![f64::INFINITY; node_count]; node_count];
        #[allow(clippy::needless_range_loop)]
        for node in 0..node_count {
            delays[node][node] = 0.0;
        }

        for link in graph.links() {
            // delay from a node to itself is always zero
            if link.src == link.dst {
                continue;
            }
            delays[link.src][link.dst] = link.latency;
            if !directed {
                delays[link.dst][link.src] = link.latency;
            }
        }

        for k in 0..node_count {
            for i in 0..node_count {
                for j in 0..node_count {
                    if delays[i][k] < f64::INFINITY
                        && delays[k][j] < f64::INFINITY
                        && delays[i][k] + delays[k][j] < delays[i][j]
                    {
                        delays[i][j] = delays[i][k] + delays[k][j];
                    }
                }
            }
        }

        Self { delays }
    }

    /// Returns the delay from `src` to `dst`, or `None` if either node is outside the matrix.
    pub fn delay(&self, src: NodeId, dst: NodeId) -> Option<f64> {
        lookup(&self.delays, src, dst)
    }

    /// Returns the matrix dimension.
    pub fn size(&self) -> usize {
        self.delays.len()
    }

    /// Returns a copy of the matrix rows.
    pub fn to_vec(&self) -> Vec<Vec<f64>> {
        self.delays.clone()
    }
}

impl Display for DelayMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_matrix(f, "delay matrix", &self.delays)
    }
}

// Bandwidth matrix ----------------------------------------------------------------------------------------------------

/// Bandwidth of direct links between every pair of nodes.
///
/// Bandwidth is not composed along multi-hop paths: pairs without a direct link have zero bandwidth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandwidthMatrix {
    bandwidths: Vec<Vec<f64>>,
}

impl BandwidthMatrix {
    /// Computes the matrix for the graph.
    ///
    /// If `directed` is false, each link bandwidth is mirrored to the reverse direction.
    /// When several links connect the same pair, the last added one wins.
    pub fn new(graph: &TopologicalGraph, directed: bool) -> Self {
        let node_count = graph.node_count();
        let mut bandwidths = vec![vec![0.0; node_count]; node_count];
        for link in graph.links() {
            bandwidths[link.src][link.dst] = link.bandwidth;
            if !directed {
                bandwidths[link.dst][link.src] = link.bandwidth;
            }
        }
        Self { bandwidths }
    }

    /// Returns the bandwidth from `src` to `dst`, or `None` if either node is outside the matrix.
    pub fn bandwidth(&self, src: NodeId, dst: NodeId) -> Option<f64> {
        lookup(&self.bandwidths, src, dst)
    }

    /// Returns the matrix dimension.
    pub fn size(&self) -> usize {
        self.bandwidths.len()
    }

    /// Returns a copy of the matrix rows.
    pub fn to_vec(&self) -> Vec<Vec<f64>> {
        self.bandwidths.clone()
    }
}

impl Display for BandwidthMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_matrix(f, "bandwidth matrix", &self.bandwidths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{TopologicalLink, TopologicalNode};

    fn graph(node_count: usize, links: &[(NodeId, NodeId, f64, f64)]) -> TopologicalGraph {
        let mut graph = TopologicalGraph::new();
        for id in 0..node_count {
            graph.add_node(TopologicalNode::new(id));
        }
        for &(src, dst, latency, bandwidth) in links {
            graph.add_link(TopologicalLink::new(src, dst, latency, bandwidth));
        }
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = TopologicalGraph::new();
        assert_eq!(DelayMatrix::new(&graph, false).size(), 0);
        assert_eq!(BandwidthMatrix::new(&graph, false).size(), 0);
        assert_eq!(DelayMatrix::default().delay(0, 0), None);
    }

    #[test]
    fn delays_compose_over_paths() {
        let graph = graph(3, &[(0, 1, 10., 100.), (1, 2, 5., 50.)]);
        let delays = DelayMatrix::new(&graph, false);
        assert_eq!(delays.delay(0, 2), Some(15.));
        assert_eq!(delays.delay(2, 0), Some(15.));
        assert_eq!(delays.delay(1, 1), Some(0.));

        let bandwidths = BandwidthMatrix::new(&graph, false);
        assert_eq!(bandwidths.bandwidth(0, 2), Some(0.));
        assert_eq!(bandwidths.bandwidth(2, 1), Some(50.));
    }

    #[test]
    fn shorter_indirect_path_wins() {
        let graph = graph(3, &[(0, 2, 30., 1.), (0, 1, 10., 1.), (1, 2, 5., 1.)]);
        let delays = DelayMatrix::new(&graph, false);
        assert_eq!(delays.delay(0, 2), Some(15.));
    }

    #[test]
    fn directed_links() {
        let graph = graph(2, &[(0, 1, 3., 7.)]);
        let delays = DelayMatrix::new(&graph, true);
        assert_eq!(delays.delay(0, 1), Some(3.));
        assert_eq!(delays.delay(1, 0), Some(f64::INFINITY));

        let bandwidths = BandwidthMatrix::new(&graph, true);
        assert_eq!(bandwidths.bandwidth(0, 1), Some(7.));
        assert_eq!(bandwidths.bandwidth(1, 0), Some(0.));
    }

    #[test]
    fn last_duplicate_link_wins() {
        let graph = graph(2, &[(0, 1, 1., 10.), (1, 0, 4., 40.)]);
        let delays = DelayMatrix::new(&graph, false);
        assert_eq!(delays.delay(0, 1), Some(4.));
        let bandwidths = BandwidthMatrix::new(&graph, false);
        assert_eq!(bandwidths.bandwidth(0, 1), Some(40.));
    }

    #[test]
    fn self_links_keep_zero_diagonal() {
        let graph = graph(2, &[(0, 0, 3., 5.), (0, 1, 1., 10.), (1, 1, 2., 7.)]);
        let delays = DelayMatrix::new(&graph, false);
        assert_eq!(delays.delay(0, 0), Some(0.));
        assert_eq!(delays.delay(1, 1), Some(0.));
        assert_eq!(delays.delay(0, 1), Some(1.));

        let bandwidths = BandwidthMatrix::new(&graph, false);
        assert_eq!(bandwidths.bandwidth(0, 0), Some(5.));
        assert_eq!(bandwidths.bandwidth(1, 1), Some(7.));
    }

    #[test]
    fn cycles_keep_zero_diagonal() {
        let graph = graph(3, &[(0, 1, 1., 1.), (1, 2, 2., 1.), (2, 0, 3., 1.)]);
        for directed in [false, true] {
            let delays = DelayMatrix::new(&graph, directed);
            for node in 0..3 {
                assert_eq!(delays.delay(node, node), Some(0.));
            }
        }
    }

    #[test]
    fn disconnected_nodes() {
        let graph = graph(4, &[(0, 1, 1., 1.), (2, 3, 1., 1.)]);
        let delays = DelayMatrix::new(&graph, false);
        assert!(delays.delay(0, 3).unwrap().is_infinite());
        assert_eq!(delays.delay(0, 4), None);
        assert!(delays.to_string().contains("-"));
    }

    #[test]
    fn copies_are_detached() {
        let graph = graph(2, &[(0, 1, 1., 10.)]);
        let bandwidths = BandwidthMatrix::new(&graph, false);
        let mut copy = bandwidths.to_vec();
        copy[0][1] = 0.;
        assert_eq!(bandwidths.bandwidth(0, 1), Some(10.));
    }
}
