//! Input routing: the only place raw key events enter the engine.

use crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::config::NavConfig;
use crate::disposition::Disposition;
use crate::geometry::FocusHost;
use crate::input::{Direction, NavInput};
use crate::scope::{FocusScope, ScopeState};
use crate::selector;

/// Filters raw input down to the five navigation inputs and acts on them.
///
/// * Keys outside the keymap are [`Ignored`](Disposition::Ignored).
/// * Activation is [`PassThrough`](Disposition::PassThrough): no geometry is
///   read and focus is not touched, so the node's own behavior fires.
/// * Directions always prevent default handling. If focus is outside the
///   scope the event becomes a re-entry: focus is restored and the direction
///   is discarded. Otherwise geometry is read fresh, a candidate is selected,
///   and on success focus moves and the new node is scrolled into view.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    config: NavConfig,
}

impl InputRouter {
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Map a raw key event onto a navigation input.
    pub fn classify(&self, event: &KeyEvent) -> Option<NavInput> {
        self.config.keymap.classify(event)
    }

    /// Route a raw key event through `scope`.
    pub fn handle_key<H: FocusHost + ?Sized>(
        &self,
        scope: &mut FocusScope,
        host: &mut H,
        event: &KeyEvent,
    ) -> Disposition {
        match self.classify(event) {
            Some(input) => self.handle(scope, host, input),
            None => Disposition::Ignored,
        }
    }

    /// Route an already-classified input through `scope`.
    pub fn handle<H: FocusHost + ?Sized>(
        &self,
        scope: &mut FocusScope,
        host: &mut H,
        input: NavInput,
    ) -> Disposition {
        match input {
            NavInput::Activate => Disposition::PassThrough,
            NavInput::Move(direction) => self.navigate(scope, host, direction),
        }
    }

    fn navigate<H: FocusHost + ?Sized>(
        &self,
        scope: &mut FocusScope,
        host: &mut H,
        direction: Direction,
    ) -> Disposition {
        let current = match scope.state(&*host) {
            ScopeState::Focused(node) => node,
            ScopeState::Unfocused => {
                debug!(region = %scope.region(), %direction, "focus outside scope, re-entering");
                return match scope.restore(host) {
                    Some(node) => Disposition::Restored(node),
                    None => Disposition::Inert,
                };
            }
        };

        let candidates = scope.candidates(&*host);
        match selector::select(current, direction, &candidates, self.config.row_tolerance) {
            Some(next) => {
                debug!(from = %current, to = %next, %direction, "moving focus");
                host.request_focus(next);
                host.scroll_into_view(next, self.config.scroll);
                scope.record(next);
                Disposition::Moved {
                    from: current,
                    to: next,
                }
            }
            None if candidates.iter().any(|c| c.visible) => {
                trace!(at = %current, %direction, "no candidate, focus stays");
                Disposition::Blocked { at: current }
            }
            None => Disposition::Inert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, NodeId, RegionId, ScrollBehavior, ScrollOptions};
    use crate::testing::{HostRequest, TestHost};
    use crossterm::event::{KeyCode, KeyModifiers};

    const PAGE: RegionId = RegionId(1);
    const SIDEBAR: RegionId = RegionId(2);
    const A: NodeId = NodeId(1);
    const B: NodeId = NodeId(2);
    const C: NodeId = NodeId(3);
    const MENU: NodeId = NodeId(10);

    /// A and B share row 0, C sits below A. A sidebar entry lives outside
    /// the page scope.
    fn fixture() -> (InputRouter, FocusScope, TestHost) {
        let mut host = TestHost::new();
        host.add(PAGE, A, BoundingBox::from_xywh(0.0, 0.0, 100.0, 50.0))
            .add(PAGE, B, BoundingBox::from_xywh(120.0, 5.0, 100.0, 50.0))
            .add(PAGE, C, BoundingBox::from_xywh(0.0, 100.0, 100.0, 50.0))
            .add(SIDEBAR, MENU, BoundingBox::from_xywh(-200.0, 0.0, 100.0, 50.0));
        let mut scope = FocusScope::new(PAGE);
        scope.cold_start(&mut host);
        host.take_requests();
        (InputRouter::default(), scope, host)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn down_moves_to_nearest_below_and_scrolls() {
        let (router, mut scope, mut host) = fixture();
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Down));
        assert_eq!(d, Disposition::Moved { from: A, to: C });
        assert_eq!(host.focused(), Some(C));
        assert_eq!(scope.last_focused(), Some(C));
        assert_eq!(
            host.requests(),
            &[
                HostRequest::Focus(C),
                HostRequest::ScrollIntoView(C, ScrollOptions::default()),
            ]
        );
    }

    #[test]
    fn right_moves_along_row() {
        let (router, mut scope, mut host) = fixture();
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Right));
        assert_eq!(d, Disposition::Moved { from: A, to: B });
        assert!(d.prevents_default());
    }

    #[test]
    fn blocked_direction_keeps_focus_and_still_prevents_default() {
        let (router, mut scope, mut host) = fixture();
        for _ in 0..3 {
            let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Left));
            assert_eq!(d, Disposition::Blocked { at: A });
            assert!(d.prevents_default());
        }
        assert_eq!(host.focused(), Some(A));
        assert!(host.requests().is_empty());
    }

    #[test]
    fn up_with_only_candidate_hidden_stays_put() {
        let (router, mut scope, mut host) = fixture();
        router.handle_key(&mut scope, &mut host, &key(KeyCode::Down));
        host.set_visible(A, false);
        host.set_visible(B, false);
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Up));
        assert_eq!(d, Disposition::Blocked { at: C });
        assert_eq!(host.focused(), Some(C));
    }

    #[test]
    fn activation_passes_through_without_reading_geometry() {
        let (router, mut scope, mut host) = fixture();
        host.reset_geometry_queries();
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Enter));
        assert_eq!(d, Disposition::PassThrough);
        assert!(!d.prevents_default());
        assert_eq!(host.geometry_queries(), 0);
        assert!(host.requests().is_empty());
        assert_eq!(host.focused(), Some(A));
    }

    #[test]
    fn activation_passes_through_even_when_focus_is_outside() {
        let (router, mut scope, mut host) = fixture();
        host.focus_external(MENU);
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Enter));
        assert_eq!(d, Disposition::PassThrough);
        assert_eq!(host.focused(), Some(MENU));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let (router, mut scope, mut host) = fixture();
        host.reset_geometry_queries();
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Char('q')));
        assert_eq!(d, Disposition::Ignored);
        assert!(!d.prevents_default());
        assert_eq!(host.geometry_queries(), 0);
    }

    #[test]
    fn direction_with_focus_outside_scope_re_enters() {
        let (router, mut scope, mut host) = fixture();
        router.handle_key(&mut scope, &mut host, &key(KeyCode::Right));
        host.take_requests();
        host.focus_external(MENU);
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Down));
        // The direction is discarded; re-entry lands on the remembered node.
        assert_eq!(d, Disposition::Restored(B));
        assert!(d.prevents_default());
        assert_eq!(host.focused(), Some(B));
        assert_eq!(host.requests(), &[HostRequest::Focus(B)]);
    }

    #[test]
    fn re_entry_into_empty_scope_is_inert() {
        let mut host = TestHost::new();
        host.add(SIDEBAR, MENU, BoundingBox::from_xywh(0.0, 0.0, 10.0, 10.0));
        host.focus_external(MENU);
        let mut scope = FocusScope::new(PAGE);
        let d = InputRouter::default().handle_key(&mut scope, &mut host, &key(KeyCode::Down));
        assert_eq!(d, Disposition::Inert);
        assert!(d.prevents_default());
        assert_eq!(host.focused(), Some(MENU));
    }

    #[test]
    fn geometry_is_read_on_every_input() {
        let (router, mut scope, mut host) = fixture();
        router.handle_key(&mut scope, &mut host, &key(KeyCode::Down));
        // Relayout: B drops onto C's row. It precedes C in traversal order,
        // so Right finds nothing and Left reaches it.
        host.set_bounds(B, BoundingBox::from_xywh(120.0, 100.0, 100.0, 50.0));
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Right));
        assert_eq!(d, Disposition::Blocked { at: C });

        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Left));
        assert_eq!(d, Disposition::Moved { from: C, to: B });
    }

    #[test]
    fn focused_unfocusable_node_falls_back_to_first_visible() {
        let (router, mut scope, mut host) = fixture();
        host.add_unfocusable(PAGE, NodeId(50), BoundingBox::from_xywh(0.0, 300.0, 10.0, 10.0));
        host.focus_external(NodeId(50));
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Up));
        assert_eq!(d, Disposition::Moved { from: NodeId(50), to: A });
    }

    #[test]
    fn focused_node_inside_empty_scope_is_inert() {
        let mut host = TestHost::new();
        host.add_unfocusable(PAGE, NodeId(50), BoundingBox::default());
        host.focus_external(NodeId(50));
        let mut scope = FocusScope::new(PAGE);
        let d = InputRouter::default().handle_key(&mut scope, &mut host, &key(KeyCode::Left));
        assert_eq!(d, Disposition::Inert);
    }

    #[test]
    fn configured_scroll_options_are_forwarded() {
        let (_, mut scope, mut host) = fixture();
        let scroll = ScrollOptions {
            behavior: ScrollBehavior::Instant,
            ..ScrollOptions::default()
        };
        let router = InputRouter::new(NavConfig {
            scroll,
            ..NavConfig::default()
        });
        router.handle_key(&mut scope, &mut host, &key(KeyCode::Right));
        assert_eq!(host.requests()[1], HostRequest::ScrollIntoView(B, scroll));
    }

    #[test]
    fn vim_keys_navigate_when_configured() {
        let (_, mut scope, mut host) = fixture();
        let router = InputRouter::new(NavConfig {
            keymap: crate::keymap::NavKeyMap::with_vim_keys(),
            ..NavConfig::default()
        });
        let d = router.handle_key(&mut scope, &mut host, &key(KeyCode::Char('j')));
        assert_eq!(d, Disposition::Moved { from: A, to: C });
    }
}
