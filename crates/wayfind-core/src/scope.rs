//! Focus scopes and drift recovery.
//!
//! A [`FocusScope`] covers one region of the interface. It owns nothing in
//! the rendering layer: its node sequence is re-read on every decision, and
//! the only state it keeps is the last node observed focused inside it.
//!
//! # State machine
//!
//! ```text
//!            cold start / activation
//! Unfocused ─────────────────────────► Focused(node)
//!     ▲                                  │   ▲
//!     │ focused node removed             │   │ direction with candidate
//!     └──────────────────────────────────┘   │ (or blocked: unchanged)
//!     │                                      │
//!     └─────── recovery restores ────────────┘
//! ```

use tracing::{debug, trace};

use crate::config::NavConfig;
use crate::disposition::Disposition;
use crate::geometry::{FocusHost, GeometryProvider, NodeId, RegionId};
use crate::recovery::RecoveryMonitor;
use crate::selector::{self, Candidate};

/// Whether a scope currently holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// No node inside the scope holds focus.
    Unfocused,
    /// This node, inside the scope, holds focus.
    Focused(NodeId),
}

/// One bounded navigation region and its recovery bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusScope {
    region: RegionId,
    monitor: RecoveryMonitor,
}

impl FocusScope {
    pub fn new(region: RegionId) -> Self {
        Self {
            region,
            monitor: RecoveryMonitor::new(),
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    /// The last node observed focused inside this scope.
    pub fn last_focused(&self) -> Option<NodeId> {
        self.monitor.last_focused()
    }

    /// Live snapshot of the scope's node sequence.
    pub fn candidates<G: GeometryProvider + ?Sized>(&self, provider: &G) -> Vec<Candidate> {
        selector::snapshot(provider, self.region)
    }

    /// Whether `node` lies inside the scope's boundary.
    pub fn contains<G: GeometryProvider + ?Sized>(&self, provider: &G, node: NodeId) -> bool {
        provider.contains(self.region, node)
    }

    /// Derive the scope's state from where the host's focus is right now.
    pub fn state<H: FocusHost + ?Sized>(&self, host: &H) -> ScopeState {
        match host.active_node() {
            Some(node) if self.contains(host, node) => ScopeState::Focused(node),
            _ => ScopeState::Unfocused,
        }
    }

    /// Where focus should go to re-enter the scope.
    pub fn restoration_target<G: GeometryProvider + ?Sized>(&self, provider: &G) -> Option<NodeId> {
        self.monitor.restoration_target(&self.candidates(provider))
    }

    /// Record a node the engine just focused inside the scope.
    pub(crate) fn record(&mut self, node: NodeId) {
        self.monitor.record(node);
    }

    /// React to a focus-change notification from the host.
    ///
    /// A node inside the scope is recorded. Anything else means focus has
    /// escaped, and it is pulled back to the restoration target when drift
    /// recovery is enabled. The returned disposition tells the host whether to
    /// suppress the event that caused the drift.
    pub fn observe_focus<H: FocusHost + ?Sized>(
        &mut self,
        host: &mut H,
        focused: Option<NodeId>,
        config: &NavConfig,
    ) -> Disposition {
        if let Some(node) = focused.filter(|n| self.contains(&*host, *n)) {
            trace!(region = %self.region, node = %node, "focus observed inside scope");
            self.monitor.record(node);
            return Disposition::Observed(node);
        }
        if !config.restore_on_drift {
            return Disposition::Ignored;
        }
        match self.restore(host) {
            Some(target) => Disposition::Restored(target),
            None => Disposition::Ignored,
        }
    }

    /// Focus the restoration target, if the scope has one.
    pub fn restore<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> Option<NodeId> {
        let target = self.restoration_target(&*host)?;
        debug!(region = %self.region, node = %target, "restoring focus into scope");
        host.request_focus(target);
        self.monitor.record(target);
        Some(target)
    }

    /// Focus something inside the scope if nothing in it holds focus yet.
    ///
    /// A freshly created scope has no remembered node, so this lands on the
    /// first visible node. A scope coming back from suspension returns to
    /// where it was. Empty scopes are left alone.
    pub fn cold_start<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> Option<NodeId> {
        if let ScopeState::Focused(node) = self.state(&*host) {
            self.monitor.record(node);
            return None;
        }
        let target = self.restore(host);
        if target.is_none() {
            debug!(region = %self.region, "scope has no focusable nodes, staying inert");
        }
        target
    }

    /// Forget the remembered node. Called when the scope is torn down.
    pub(crate) fn clear(&mut self) {
        self.monitor.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::testing::{HostRequest, TestHost};

    const PAGE: RegionId = RegionId(1);
    const SIDEBAR: RegionId = RegionId(2);

    fn host() -> TestHost {
        let mut host = TestHost::new();
        host.add(PAGE, NodeId(1), BoundingBox::from_xywh(0.0, 0.0, 100.0, 50.0))
            .add(PAGE, NodeId(2), BoundingBox::from_xywh(120.0, 0.0, 100.0, 50.0))
            .add(PAGE, NodeId(3), BoundingBox::from_xywh(0.0, 100.0, 100.0, 50.0))
            .add(SIDEBAR, NodeId(10), BoundingBox::from_xywh(-200.0, 0.0, 100.0, 50.0));
        host
    }

    #[test]
    fn state_tracks_host_focus() {
        let mut host = host();
        let scope = FocusScope::new(PAGE);
        assert_eq!(scope.state(&host), ScopeState::Unfocused);
        host.focus_external(NodeId(2));
        assert_eq!(scope.state(&host), ScopeState::Focused(NodeId(2)));
        host.focus_external(NodeId(10));
        assert_eq!(scope.state(&host), ScopeState::Unfocused);
    }

    #[test]
    fn cold_start_focuses_first_visible() {
        let mut host = host();
        host.set_visible(NodeId(1), false);
        let mut scope = FocusScope::new(PAGE);
        assert_eq!(scope.cold_start(&mut host), Some(NodeId(2)));
        assert_eq!(host.focused(), Some(NodeId(2)));
        assert_eq!(scope.last_focused(), Some(NodeId(2)));
    }

    #[test]
    fn cold_start_keeps_existing_focus() {
        let mut host = host();
        host.focus_external(NodeId(3));
        let mut scope = FocusScope::new(PAGE);
        assert_eq!(scope.cold_start(&mut host), None);
        assert!(host.requests().is_empty());
        assert_eq!(scope.last_focused(), Some(NodeId(3)));
    }

    #[test]
    fn cold_start_on_empty_scope_is_noop() {
        let mut host = host();
        let mut scope = FocusScope::new(RegionId(99));
        assert_eq!(scope.cold_start(&mut host), None);
        assert!(host.requests().is_empty());
    }

    #[test]
    fn observe_inside_records() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        host.focus_external(NodeId(3));
        let d = scope.observe_focus(&mut host, Some(NodeId(3)), &NavConfig::default());
        assert_eq!(d, Disposition::Observed(NodeId(3)));
        assert_eq!(scope.last_focused(), Some(NodeId(3)));
        assert!(host.requests().is_empty());
    }

    #[test]
    fn observe_outside_restores_last_focused() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        scope.observe_focus(&mut host, Some(NodeId(2)), &NavConfig::default());
        host.focus_external(NodeId(10));
        let d = scope.observe_focus(&mut host, Some(NodeId(10)), &NavConfig::default());
        assert_eq!(d, Disposition::Restored(NodeId(2)));
        assert!(d.prevents_default());
        assert_eq!(host.focused(), Some(NodeId(2)));
        assert_eq!(scope.last_focused(), Some(NodeId(2)));
    }

    #[test]
    fn removal_of_focused_node_restores_to_first_visible() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        host.focus_external(NodeId(2));
        scope.observe_focus(&mut host, Some(NodeId(2)), &NavConfig::default());
        assert!(host.remove(NodeId(2)));
        let focused = host.focused();
        let d = scope.observe_focus(&mut host, focused, &NavConfig::default());
        assert_eq!(d, Disposition::Restored(NodeId(1)));
        assert_eq!(host.focused(), Some(NodeId(1)));
    }

    #[test]
    fn repeated_drift_restores_same_node() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        scope.observe_focus(&mut host, Some(NodeId(3)), &NavConfig::default());
        for _ in 0..3 {
            host.blur();
            let d = scope.observe_focus(&mut host, None, &NavConfig::default());
            assert_eq!(d, Disposition::Restored(NodeId(3)));
        }
        assert_eq!(
            host.requests(),
            &[HostRequest::Focus(NodeId(3)); 3][..]
        );
    }

    #[test]
    fn drift_recovery_can_be_disabled() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        let config = NavConfig {
            restore_on_drift: false,
            ..NavConfig::default()
        };
        host.focus_external(NodeId(10));
        assert_eq!(
            scope.observe_focus(&mut host, Some(NodeId(10)), &config),
            Disposition::Ignored
        );
        assert_eq!(host.focused(), Some(NodeId(10)));
    }

    #[test]
    fn drift_from_empty_scope_is_ignored() {
        let mut host = host();
        let mut scope = FocusScope::new(RegionId(99));
        let d = scope.observe_focus(&mut host, None, &NavConfig::default());
        assert_eq!(d, Disposition::Ignored);
        assert!(host.requests().is_empty());
    }

    #[test]
    fn unfocusable_node_inside_boundary_counts_as_inside() {
        let mut host = host();
        host.add_unfocusable(PAGE, NodeId(50), BoundingBox::default());
        let mut scope = FocusScope::new(PAGE);
        let d = scope.observe_focus(&mut host, Some(NodeId(50)), &NavConfig::default());
        assert_eq!(d, Disposition::Observed(NodeId(50)));
    }

    #[test]
    fn clear_forgets_last_focused() {
        let mut host = host();
        let mut scope = FocusScope::new(PAGE);
        scope.observe_focus(&mut host, Some(NodeId(3)), &NavConfig::default());
        scope.clear();
        assert_eq!(scope.last_focused(), None);
    }
}
