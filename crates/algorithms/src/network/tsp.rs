//! Greedy travelling-salesman tour
//!
//! Nearest-unvisited-neighbor heuristic over node coordinates. This is NOT
//! an exact solver; tours can be arbitrarily far from optimal on adversarial
//! inputs, but the heuristic is fast and usually reasonable for visiting
//! dispersed stops.

use super::{Network, NodeId, PathResult};
use kartos_core::Result;

/// Visit every node starting from `start`, always moving to the nearest
/// unvisited node by planar Euclidean distance. With `round_trip` the
/// closing leg back to `start` is appended to the cost and path.
///
/// # Errors
/// `InvalidParameter` for an unknown start node.
pub fn greedy_tour(network: &Network, start: NodeId, round_trip: bool) -> Result<PathResult> {
    network.check_node(start, "start")?;

    let n = network.node_count();
    let mut visited = vec![false; n];
    let mut path = Vec::with_capacity(n + 1);
    let mut cost = 0.0;

    let mut current = start;
    visited[current] = true;
    path.push(current);

    for _ in 1..n {
        let here = network.coord(current).unwrap();
        let mut best: Option<(NodeId, f64)> = None;

        for id in 0..n {
            if visited[id] {
                continue;
            }
            let there = network.coord(id).unwrap();
            let dx = there.x - here.x;
            let dy = there.y - here.y;
            let d = (dx * dx + dy * dy).sqrt();
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }

        if let Some((next, d)) = best {
            visited[next] = true;
            path.push(next);
            cost += d;
            current = next;
        }
    }

    if round_trip && path.len() > 1 {
        let last = network.coord(current).unwrap();
        let first = network.coord(start).unwrap();
        let dx = first.x - last.x;
        let dy = first.y - last.y;
        cost += (dx * dx + dy * dy).sqrt();
        path.push(start);
    }

    Ok(PathResult { path, cost })
}
