//! Build a network from line geometries by endpoint snapping

use super::Network;
use geo_types::{Coord, LineString};
use kartos_core::{Error, Result};

/// Build an undirected network from line segments.
///
/// Walks every consecutive segment of every line. Each endpoint is snapped
/// to an existing node when one lies within `snap_radius` (linear scan,
/// first match wins); otherwise a new node is created. The segment's planar
/// Euclidean length becomes the edge weight, stored symmetrically.
/// Zero-length segments (both endpoints snapping to the same node) are
/// skipped, keeping the no-self-loop invariant.
///
/// # Errors
/// - `EmptyInput` when no lines are given
/// - `InvalidParameter` for a negative or non-finite snap radius
pub fn build_network(lines: &[LineString<f64>], snap_radius: f64) -> Result<Network> {
    if lines.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !(snap_radius >= 0.0) {
        return Err(Error::invalid_parameter(
            "snap_radius",
            snap_radius,
            "must be non-negative",
        ));
    }

    let mut net = Network::new();
    let radius_sq = snap_radius * snap_radius;

    let mut snap = |net: &mut Network, c: Coord<f64>| -> usize {
        for id in 0..net.node_count() {
            let n = net.coord(id).unwrap();
            let dx = n.x - c.x;
            let dy = n.y - c.y;
            if dx * dx + dy * dy <= radius_sq {
                return id;
            }
        }
        net.add_node(c)
    };

    for line in lines {
        for seg in line.0.windows(2) {
            let a = snap(&mut net, seg[0]);
            let b = snap(&mut net, seg[1]);
            if a == b {
                continue;
            }
            let dx = seg[1].x - seg[0].x;
            let dy = seg[1].y - seg[0].y;
            net.add_edge(a, b, (dx * dx + dy * dy).sqrt())?;
        }
    }

    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_snaps_shared_endpoints() {
        // Two lines meeting at (1, 0), second endpoint slightly off
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
            LineString::from(vec![(1.0, 1e-7), (2.0, 0.0)]),
        ];
        let net = build_network(&lines, 1e-6).unwrap();

        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn test_build_no_snap_creates_separate_nodes() {
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
            LineString::from(vec![(1.0, 0.5), (2.0, 0.5)]),
        ];
        let net = build_network(&lines, 0.01).unwrap();
        assert_eq!(net.node_count(), 4);
    }

    #[test]
    fn test_build_edge_weight_is_length() {
        let lines = vec![LineString::from(vec![(0.0, 0.0), (3.0, 4.0)])];
        let net = build_network(&lines, 0.0).unwrap();
        let (_, w) = net.neighbors(0).next().unwrap();
        assert!((w - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_skips_zero_length_segments() {
        let lines = vec![LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)])];
        let net = build_network(&lines, 0.0).unwrap();
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn test_build_empty() {
        assert!(matches!(build_network(&[], 0.1), Err(Error::EmptyInput)));
    }
}
