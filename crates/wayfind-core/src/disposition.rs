use crate::geometry::NodeId;

/// What the engine did with an event.
///
/// Hosts use [`prevents_default`](Disposition::prevents_default) to decide
/// whether the event may continue to its native handling (scrolling,
/// activation, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not a navigation input, or no scope is listening. Left to propagate.
    Ignored,
    /// Activation input. The focused node's own behavior must run untouched.
    PassThrough,
    /// Focus moved between two nodes of the scope.
    Moved { from: NodeId, to: NodeId },
    /// No candidate in the requested direction. Focus stays on `at`.
    Blocked { at: NodeId },
    /// Focus had left the scope and was brought back to this node.
    Restored(NodeId),
    /// A focus change inside the scope was recorded.
    Observed(NodeId),
    /// Directional input on a scope with nothing to focus.
    Inert,
}

impl Disposition {
    /// Whether the event should be kept from its native handling.
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Disposition::Moved { .. }
                | Disposition::Blocked { .. }
                | Disposition::Restored(_)
                | Disposition::Inert
        )
    }

    /// The node that ended up focused because of this event, if the engine
    /// moved focus.
    pub fn focus_target(&self) -> Option<NodeId> {
        match self {
            Disposition::Moved { to, .. } => Some(*to),
            Disposition::Restored(node) => Some(*node),
            _ => None,
        }
    }
}
