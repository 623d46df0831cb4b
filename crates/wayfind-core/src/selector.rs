//! Directional candidate selection.
//!
//! [`select`] is a pure function over a snapshot of the scope. No grid is
//! assumed: rows and columns are approximated from bounding boxes, so the
//! result stays reasonable on irregular layouts (variably sized cards,
//! wrapping groups) at the cost of the occasional odd jump on sparse ones.
//!
//! # Rules
//!
//! | Direction | Filter | Pick |
//! |-----------|--------|------|
//! | Right | vertical centers differ by less than the row tolerance | first after current in traversal order |
//! | Left | same | first before current, scanning backward |
//! | Down | `candidate.top > current.bottom` | smallest top-left distance |
//! | Up | `candidate.bottom < current.top` | smallest top-left distance |
//!
//! Distance ties go to the node met first in traversal order. There is no
//! wrap-around: when nothing passes the filter the result is `None`.

use tracing::debug;

use crate::geometry::{BoundingBox, GeometryProvider, NodeId, RegionId};
use crate::input::Direction;

/// One node of a scope as seen at decision time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    pub bounds: BoundingBox,
    pub visible: bool,
}

impl Candidate {
    pub fn new(node: NodeId, bounds: BoundingBox) -> Self {
        Self {
            node,
            bounds,
            visible: true,
        }
    }

    /// Builder: mark the candidate hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Read the live node sequence of `region` from the provider.
///
/// Nodes whose bounds can no longer be read are dropped, since they have
/// left the rendering layer between enumeration and measurement.
pub fn snapshot<G: GeometryProvider + ?Sized>(provider: &G, region: RegionId) -> Vec<Candidate> {
    provider
        .focusable_nodes(region)
        .into_iter()
        .filter_map(|node| {
            let bounds = provider.bounds(node)?;
            Some(Candidate {
                node,
                bounds,
                visible: provider.is_visible(node),
            })
        })
        .collect()
}

/// Pick the node that should receive focus when moving `direction` from
/// `current`.
///
/// Only visible candidates take part. If `current` is not among them (it was
/// hidden or removed), the first visible candidate is returned as a safe
/// default. Returns `None` when nothing qualifies; the caller leaves focus
/// where it is.
pub fn select(
    current: NodeId,
    direction: Direction,
    candidates: &[Candidate],
    row_tolerance: f64,
) -> Option<NodeId> {
    let visible: Vec<&Candidate> = candidates.iter().filter(|c| c.visible).collect();
    let first = visible.first()?;

    let Some(index) = visible.iter().position(|c| c.node == current) else {
        debug!(node = %current, "current node not among visible nodes, falling back to first");
        return Some(first.node);
    };
    let origin = visible[index].bounds;

    let found = match direction {
        Direction::Right => visible[index + 1..]
            .iter()
            .find(|c| same_row(&origin, &c.bounds, row_tolerance))
            .copied(),
        Direction::Left => visible[..index]
            .iter()
            .rev()
            .find(|c| same_row(&origin, &c.bounds, row_tolerance))
            .copied(),
        Direction::Down => nearest(&origin, visible.iter().copied(), |b| b.top > origin.bottom),
        Direction::Up => nearest(&origin, visible.iter().copied(), |b| b.bottom < origin.top),
    };
    found.map(|c| c.node)
}

fn same_row(origin: &BoundingBox, other: &BoundingBox, tolerance: f64) -> bool {
    (other.vertical_center() - origin.vertical_center()).abs() < tolerance
}

/// Nearest candidate by top-left distance among those passing `filter`.
/// A later candidate replaces the best only when strictly closer.
fn nearest<'a>(
    origin: &BoundingBox,
    candidates: impl Iterator<Item = &'a Candidate>,
    filter: impl Fn(&BoundingBox) -> bool,
) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, f64)> = None;
    for candidate in candidates.filter(|c| filter(&c.bounds)) {
        let distance = origin.origin_distance(&candidate.bounds);
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, x: f64, y: f64, w: f64, h: f64) -> Candidate {
        Candidate::new(NodeId(id), BoundingBox::from_xywh(x, y, w, h))
    }

    /// A(0,0) B(120,0) on row 0, C(0,100) below A.
    fn abc() -> Vec<Candidate> {
        vec![
            node(1, 0.0, 0.0, 100.0, 50.0),
            node(2, 120.0, 0.0, 100.0, 50.0),
            node(3, 0.0, 100.0, 100.0, 50.0),
        ]
    }

    #[test]
    fn down_picks_nearest_below() {
        assert_eq!(select(NodeId(1), Direction::Down, &abc(), 20.0), Some(NodeId(3)));
    }

    #[test]
    fn right_picks_same_row() {
        assert_eq!(select(NodeId(1), Direction::Right, &abc(), 20.0), Some(NodeId(2)));
    }

    #[test]
    fn left_from_first_in_row_is_none() {
        assert_eq!(select(NodeId(1), Direction::Left, &abc(), 20.0), None);
    }

    #[test]
    fn up_with_target_hidden_is_none() {
        let mut nodes = abc();
        nodes[0].visible = false;
        // B is still above C, so hide it too to leave nothing upward.
        nodes[1].visible = false;
        assert_eq!(select(NodeId(3), Direction::Up, &nodes, 20.0), None);
    }

    #[test]
    fn up_skips_hidden_nearest() {
        let mut nodes = abc();
        nodes[0].visible = false;
        assert_eq!(select(NodeId(3), Direction::Up, &nodes, 20.0), Some(NodeId(2)));
    }

    #[test]
    fn no_wrap_at_edges() {
        let nodes = abc();
        assert_eq!(select(NodeId(2), Direction::Right, &nodes, 20.0), None);
        assert_eq!(select(NodeId(1), Direction::Up, &nodes, 20.0), None);
        assert_eq!(select(NodeId(3), Direction::Down, &nodes, 20.0), None);
    }

    #[test]
    fn right_respects_traversal_order_over_distance() {
        // Node 4 sits far right but comes before the nearer node 5 in traversal order.
        let nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            node(4, 500.0, 0.0, 10.0, 10.0),
            node(5, 20.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.0), Some(NodeId(4)));
    }

    #[test]
    fn right_skips_nodes_outside_row_tolerance() {
        let nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            // Next in sequence but 30 units lower: outside tolerance.
            node(2, 20.0, 30.0, 10.0, 10.0),
            node(3, 40.0, 5.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.0), Some(NodeId(3)));
    }

    #[test]
    fn row_tolerance_is_strict() {
        let nodes = vec![node(1, 0.0, 0.0, 10.0, 10.0), node(2, 20.0, 20.0, 10.0, 10.0)];
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.0), None);
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.5), Some(NodeId(2)));
    }

    #[test]
    fn row_test_uses_vertical_centers() {
        // Tops differ by 30, but a taller neighbour shares the same center.
        let nodes = vec![node(1, 0.0, 30.0, 10.0, 10.0), node(2, 20.0, 0.0, 10.0, 70.0)];
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.0), Some(NodeId(2)));
    }

    #[test]
    fn left_scans_backward_from_current() {
        let nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            node(2, 20.0, 0.0, 10.0, 10.0),
            node(3, 40.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(3), Direction::Left, &nodes, 20.0), Some(NodeId(2)));
    }

    #[test]
    fn down_requires_top_strictly_below_bottom() {
        let nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            // Top touches the current bottom edge: not below.
            node(2, 0.0, 10.0, 10.0, 10.0),
            node(3, 50.0, 11.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(1), Direction::Down, &nodes, 20.0), Some(NodeId(3)));
    }

    #[test]
    fn down_picks_minimum_distance_not_sequence_order() {
        let nodes = vec![
            node(1, 100.0, 0.0, 10.0, 10.0),
            node(2, 0.0, 50.0, 10.0, 10.0),
            node(3, 90.0, 60.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(1), Direction::Down, &nodes, 20.0), Some(NodeId(3)));
    }

    #[test]
    fn distance_ties_go_to_first_in_sequence() {
        // Two nodes below, mirror images around the current origin.
        let nodes = vec![
            node(1, 100.0, 0.0, 10.0, 10.0),
            node(2, 130.0, 40.0, 10.0, 10.0),
            node(3, 70.0, 40.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(1), Direction::Down, &nodes, 20.0), Some(NodeId(2)));

        let swapped = vec![nodes[0], nodes[2], nodes[1]];
        assert_eq!(select(NodeId(1), Direction::Down, &swapped, 20.0), Some(NodeId(3)));
    }

    #[test]
    fn up_is_mirror_of_down() {
        let nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            node(2, 200.0, 0.0, 10.0, 10.0),
            node(3, 180.0, 100.0, 10.0, 10.0),
        ];
        assert_eq!(select(NodeId(3), Direction::Up, &nodes, 20.0), Some(NodeId(2)));
    }

    #[test]
    fn hidden_current_falls_back_to_first_visible() {
        let mut nodes = abc();
        nodes[0].visible = false;
        assert_eq!(select(NodeId(1), Direction::Down, &nodes, 20.0), Some(NodeId(2)));
    }

    #[test]
    fn unknown_current_falls_back_to_first_visible() {
        assert_eq!(select(NodeId(99), Direction::Left, &abc(), 20.0), Some(NodeId(1)));
    }

    #[test]
    fn empty_or_all_hidden_yields_none() {
        assert_eq!(select(NodeId(1), Direction::Down, &[], 20.0), None);
        let hidden: Vec<_> = abc().into_iter().map(Candidate::hidden).collect();
        assert_eq!(select(NodeId(1), Direction::Down, &hidden, 20.0), None);
    }

    #[test]
    fn hidden_nodes_do_not_block_row_scan() {
        let mut nodes = vec![
            node(1, 0.0, 0.0, 10.0, 10.0),
            node(2, 20.0, 0.0, 10.0, 10.0),
            node(3, 40.0, 0.0, 10.0, 10.0),
        ];
        nodes[1].visible = false;
        assert_eq!(select(NodeId(1), Direction::Right, &nodes, 20.0), Some(NodeId(3)));
    }
}
