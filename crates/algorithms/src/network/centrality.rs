//! Betweenness centrality
//!
//! Counts, for every node, how often it appears as an interior node on the
//! shortest path of every ordered node pair, normalized by the number of
//! ordered pairs. Runs one Dijkstra per pair, roughly O(V³) on dense
//! graphs, so callers with large networks must bound or sample their
//! input; the kernel does no chunking or cancellation.

use super::{dijkstra::shortest_path, Network};
use kartos_core::{Error, Result};

/// Betweenness score per node, indexed by node id.
///
/// Scores are fractions in [0, 1]: the share of ordered pairs whose shortest
/// path passes through the node (endpoints excluded). Disconnected pairs
/// contribute nothing.
///
/// # Errors
/// `EmptyInput` for a network with no nodes.
pub fn betweenness_centrality(network: &Network) -> Result<Vec<f64>> {
    let n = network.node_count();
    if n == 0 {
        return Err(Error::EmptyInput);
    }

    let mut counts = vec![0.0_f64; n];
    let total_pairs = (n * (n - 1)) as f64;
    if total_pairs == 0.0 {
        return Ok(counts);
    }

    for s in 0..n {
        for t in 0..n {
            if s == t {
                continue;
            }
            let result = shortest_path(network, s, t)?;
            if result.path.len() > 2 {
                for &interior in &result.path[1..result.path.len() - 1] {
                    counts[interior] += 1.0;
                }
            }
        }
    }

    for c in counts.iter_mut() {
        *c /= total_pairs;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use geo_types::Coord;

    /// Path graph 0-1-2: every 0↔2 route passes through 1
    fn path_network() -> Network {
        let mut net = Network::new();
        for x in [0.0, 1.0, 2.0] {
            net.add_node(Coord { x, y: 0.0 });
        }
        net.add_edge(0, 1, 1.0).unwrap();
        net.add_edge(1, 2, 1.0).unwrap();
        net
    }

    #[test]
    fn test_middle_node_dominates() {
        let scores = betweenness_centrality(&path_network()).unwrap();

        // 6 ordered pairs; paths 0→2 and 2→0 pass through node 1
        assert!((scores[1] - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_complete_triangle_all_zero() {
        let mut net = Network::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)] {
            net.add_node(Coord { x, y });
        }
        net.add_edge(0, 1, 1.0).unwrap();
        net.add_edge(1, 2, 1.0).unwrap();
        net.add_edge(2, 0, 1.0).unwrap();

        let scores = betweenness_centrality(&net).unwrap();
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_network() {
        assert!(matches!(
            betweenness_centrality(&Network::new()),
            Err(Error::EmptyInput)
        ));
    }
}
