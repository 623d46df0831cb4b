//! Geometry model and the collaborator traits the engine consumes.
//!
//! The engine never stores geometry. Every decision re-reads bounds and
//! visibility through a [`GeometryProvider`], because the rendering layer may
//! have scrolled, animated or relaid-out since the previous input.

use std::fmt;

/// Opaque identity of a focusable node in the rendering layer.
///
/// Identity is stable within one decision. It is not guaranteed to survive a
/// re-render, and a `NodeId` held across renders may name a node that no
/// longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a bounded region of the interface that a scope covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// Axis-aligned bounding box in viewport coordinates.
///
/// `y` grows downward, so `top <= bottom` and `left <= right` for any
/// well-formed box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BoundingBox {
    /// Create a box from its four edges.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Create a box from an origin and a size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Vertical midpoint, used to decide whether two nodes share a row.
    pub fn vertical_center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Euclidean distance between the top-left corners of two boxes.
    pub fn origin_distance(&self, other: &BoundingBox) -> f64 {
        (other.left - self.left).hypot(other.top - self.top)
    }

    /// Return a copy shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
            bottom: self.bottom + dy,
            right: self.right + dx,
        }
    }
}

/// Read-only view of the rendering layer's focusable nodes.
///
/// Implementations answer from the live layout. Callers must not cache the
/// answers across input events.
pub trait GeometryProvider {
    /// Focusable nodes inside `region`, in traversal order (top-to-bottom,
    /// left-to-right as authored). Invisible nodes may be included; the
    /// engine filters them itself.
    fn focusable_nodes(&self, region: RegionId) -> Vec<NodeId>;

    /// Current bounds of `node`, or `None` if it no longer exists.
    fn bounds(&self, node: NodeId) -> Option<BoundingBox>;

    /// Whether `node` is currently rendered.
    fn is_visible(&self, node: NodeId) -> bool;

    /// Whether `node` lies inside the boundary of `region`.
    ///
    /// The default treats the boundary as exactly the region's focusable
    /// nodes. Hosts where non-focusable elements can hold focus should
    /// override this.
    fn contains(&self, region: RegionId, node: NodeId) -> bool {
        self.focusable_nodes(region).contains(&node)
    }
}

/// Where a scrolled node should land along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    Start,
    #[default]
    Center,
    End,
    /// Scroll the minimum amount needed to make the node visible.
    Nearest,
}

/// Whether a scroll jumps or animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Options passed with every scroll-into-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub block: ScrollAlignment,
    /// Horizontal alignment.
    pub inline: ScrollAlignment,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollAlignment::Center,
            inline: ScrollAlignment::Center,
        }
    }
}

/// The mutable half of the rendering collaborator: who holds focus, and the
/// requests the engine can make.
pub trait FocusHost: GeometryProvider {
    /// The node currently holding input focus anywhere in the interface.
    ///
    /// `None` means focus rests on no node (e.g. the focused node was just
    /// removed).
    fn active_node(&self) -> Option<NodeId>;

    /// Ask the host to move input focus to `node`.
    fn request_focus(&mut self, node: NodeId);

    /// Ask the host to bring `node` into view.
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions);
}
