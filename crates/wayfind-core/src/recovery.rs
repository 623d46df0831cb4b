//! Last-known-focus tracking for drift recovery.

use crate::geometry::NodeId;
use crate::selector::Candidate;

/// Remembers the last node observed focused inside a scope, and picks where
/// focus should return when it drifts out.
///
/// The remembered node is a weak reference: identity only. It may name a
/// node that has since been removed, which
/// [`restoration_target`](RecoveryMonitor::restoration_target) accounts for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecoveryMonitor {
    last_focused: Option<NodeId>,
}

impl RecoveryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent node observed focused inside the scope.
    pub fn last_focused(&self) -> Option<NodeId> {
        self.last_focused
    }

    /// Record a node observed focused inside the scope.
    pub fn record(&mut self, node: NodeId) {
        self.last_focused = Some(node);
    }

    /// Forget the remembered node.
    pub fn clear(&mut self) {
        self.last_focused = None;
    }

    /// Where focus should go to re-enter the scope.
    ///
    /// The remembered node wins while it is still a visible member of the
    /// scope. Otherwise the first visible node is used. `None` means the
    /// scope has nothing to focus.
    pub fn restoration_target(&self, candidates: &[Candidate]) -> Option<NodeId> {
        let mut visible = candidates.iter().filter(|c| c.visible);
        if let Some(last) = self.last_focused {
            if visible.clone().any(|c| c.node == last) {
                return Some(last);
            }
        }
        visible.next().map(|c| c.node)
    }
}
