use std::cell::Cell;

use crate::geometry::{BoundingBox, FocusHost, GeometryProvider, NodeId, RegionId, ScrollOptions};

/// A request the engine made of the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostRequest {
    Focus(NodeId),
    ScrollIntoView(NodeId, ScrollOptions),
}

/// A node in a [`TestHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct TestNode {
    pub id: NodeId,
    pub region: RegionId,
    pub bounds: BoundingBox,
    pub visible: bool,
    /// Non-focusable nodes sit inside a region's boundary but are never
    /// enumerated as focusable.
    pub focusable: bool,
}

/// A headless rendering layer for driving the engine without a terminal.
///
/// `TestHost` keeps nodes in insertion order (their traversal order), tracks
/// which node holds focus, records every focus and scroll request, and counts
/// geometry queries so tests can assert when live geometry was (or was not)
/// read.
///
/// # Example
///
/// ```
/// use wayfind_core::testing::TestHost;
/// use wayfind_core::{BoundingBox, NodeId, RegionId};
///
/// let region = RegionId(1);
/// let mut host = TestHost::new();
/// host.add(region, NodeId(1), BoundingBox::from_xywh(0.0, 0.0, 100.0, 50.0));
/// host.focus_external(NodeId(1));
/// assert_eq!(host.focused(), Some(NodeId(1)));
/// ```
#[derive(Debug, Default)]
pub struct TestHost {
    nodes: Vec<TestNode>,
    focused: Option<NodeId>,
    requests: Vec<HostRequest>,
    geometry_queries: Cell<usize>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visible, focusable node to `region`.
    pub fn add(&mut self, region: RegionId, id: NodeId, bounds: BoundingBox) -> &mut Self {
        self.nodes.push(TestNode {
            id,
            region,
            bounds,
            visible: true,
            focusable: true,
        });
        self
    }

    /// Append a node that is inside `region` but cannot take focus through
    /// enumeration.
    pub fn add_unfocusable(&mut self, region: RegionId, id: NodeId, bounds: BoundingBox) -> &mut Self {
        self.nodes.push(TestNode {
            id,
            region,
            bounds,
            visible: true,
            focusable: false,
        });
        self
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: BoundingBox) {
        if let Some(node) = self.node_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Remove a node. Returns `true` if it held focus, in which case focus
    /// now rests on nothing.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.nodes.retain(|n| n.id != id);
        if self.focused == Some(id) {
            self.focused = None;
            return true;
        }
        false
    }

    /// Move focus without going through the engine, as an outside control
    /// would.
    pub fn focus_external(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    /// Drop focus entirely.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    /// Drain the recorded requests.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Number of geometry reads since creation or the last reset.
    pub fn geometry_queries(&self) -> usize {
        self.geometry_queries.get()
    }

    pub fn reset_geometry_queries(&self) {
        self.geometry_queries.set(0);
    }

    fn node(&self, id: NodeId) -> Option<&TestNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TestNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    fn count_query(&self) {
        self.geometry_queries.set(self.geometry_queries.get() + 1);
    }
}

impl GeometryProvider for TestHost {
    fn focusable_nodes(&self, region: RegionId) -> Vec<NodeId> {
        self.count_query();
        self.nodes
            .iter()
            .filter(|n| n.region == region && n.focusable)
            .map(|n| n.id)
            .collect()
    }

    fn bounds(&self, node: NodeId) -> Option<BoundingBox> {
        self.count_query();
        self.node(node).map(|n| n.bounds)
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.count_query();
        self.node(node).is_some_and(|n| n.visible)
    }

    fn contains(&self, region: RegionId, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.region == region)
    }
}

impl FocusHost for TestHost {
    fn active_node(&self) -> Option<NodeId> {
        self.focused
    }

    fn request_focus(&mut self, node: NodeId) {
        self.requests.push(HostRequest::Focus(node));
        if self.node(node).is_some() {
            self.focused = Some(node);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        self.requests.push(HostRequest::ScrollIntoView(node, options));
    }
}
