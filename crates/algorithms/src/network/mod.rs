//! Network analysis: graph construction, routing, reachability, centrality
//!
//! Graphs are undirected with non-negative edge weights; every edge is
//! stored symmetrically. Nodes carry coordinates so graphs can be built by
//! snapping line-segment endpoints together.

mod build;
mod centrality;
mod dijkstra;
mod tsp;

pub use build::build_network;
pub use centrality::betweenness_centrality;
pub use dijkstra::{isochrone, shortest_path, PathResult};
pub use tsp::greedy_tour;

use geo_types::Coord;
use kartos_core::{Error, Result};
use std::collections::HashMap;

/// Node identifier: index into the network's node table
pub type NodeId = usize;

/// Undirected weighted graph with embedded node coordinates.
///
/// Invariants: no self-loops, no negative weights, and every edge appears in
/// both adjacency maps with the same weight. `add_edge` enforces all three.
#[derive(Debug, Clone, Default)]
pub struct Network {
    coords: Vec<Coord<f64>>,
    adjacency: Vec<HashMap<NodeId, f64>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id
    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        self.coords.push(coord);
        self.adjacency.push(HashMap::new());
        self.coords.len() - 1
    }

    /// Add an undirected edge.
    ///
    /// A duplicate edge keeps the smaller weight.
    ///
    /// # Errors
    /// `InvalidParameter` for self-loops, negative/non-finite weights or
    /// unknown node ids.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<()> {
        if a == b {
            return Err(Error::invalid_parameter(
                "edge",
                format!("{a}-{b}"),
                "self-loops are not allowed",
            ));
        }
        if !(weight >= 0.0) {
            return Err(Error::invalid_parameter(
                "weight",
                weight,
                "must be non-negative",
            ));
        }
        let n = self.node_count();
        if a >= n || b >= n {
            return Err(Error::invalid_parameter(
                "edge",
                format!("{a}-{b}"),
                format!("node ids must be < {n}"),
            ));
        }

        let keep = self
            .adjacency[a]
            .get(&b)
            .map_or(weight, |existing| existing.min(weight));
        self.adjacency[a].insert(b, keep);
        self.adjacency[b].insert(a, keep);
        Ok(())
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|adj| adj.len()).sum::<usize>() / 2
    }

    /// Coordinate of a node
    pub fn coord(&self, id: NodeId) -> Option<Coord<f64>> {
        self.coords.get(id).copied()
    }

    /// Neighbors of a node with edge weights
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(&n, &w)| (n, w)))
    }

    pub(crate) fn check_node(&self, id: NodeId, name: &'static str) -> Result<()> {
        if id >= self.node_count() {
            return Err(Error::invalid_parameter(
                name,
                id,
                format!("node id must be < {}", self.node_count()),
            ));
        }
        Ok(())
    }
}
