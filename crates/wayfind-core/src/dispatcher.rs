//! Scope lifecycle and event delivery.
//!
//! A [`Dispatcher`] stands in for the host's listener registry. Mounting a
//! scope installs its listeners, tearing it down removes them, and only the
//! most recently activated scope listens at any time. Earlier scopes are
//! suspended: they keep their remembered node but receive nothing until the
//! scope above them is torn down.
//!
//! Scopes never hand focus to one another across a shared boundary. A key
//! pressed while focus sits in a suspended scope's region is a re-entry into
//! the active scope, like any other drift.

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::config::NavConfig;
use crate::disposition::Disposition;
use crate::geometry::{FocusHost, NodeId, RegionId};
use crate::input::NavInput;
use crate::router::InputRouter;
use crate::scope::FocusScope;

/// Identity of a mounted scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

/// Owns mounted scopes and routes events to the active one.
#[derive(Debug, Default)]
pub struct Dispatcher {
    router: InputRouter,
    /// Mount order. The last entry is the active scope.
    mounted: Vec<(ScopeId, FocusScope)>,
    next_id: u64,
}

impl Dispatcher {
    pub fn new(config: NavConfig) -> Self {
        Self {
            router: InputRouter::new(config),
            mounted: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &NavConfig {
        self.router.config()
    }

    /// The scope currently receiving events.
    pub fn active(&self) -> Option<ScopeId> {
        self.mounted.last().map(|(id, _)| *id)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&FocusScope> {
        self.mounted
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, scope)| scope)
    }

    /// Number of mounted scopes, active or suspended.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Mount a scope over `region` and make it the active one.
    ///
    /// The previously active scope is suspended. With cold-start focus
    /// enabled, the first visible node of the new scope is focused unless
    /// something inside it already holds focus.
    pub fn activate<H: FocusHost + ?Sized>(&mut self, region: RegionId, host: &mut H) -> ScopeId {
        if let Some((id, scope)) = self.mounted.last() {
            debug!(scope = id.0, region = %scope.region(), "suspending scope");
        }
        let id = ScopeId(self.next_id);
        self.next_id += 1;

        let mut scope = FocusScope::new(region);
        debug!(scope = id.0, %region, "activating scope");
        if self.router.config().cold_start_focus {
            scope.cold_start(host);
        }
        self.mounted.push((id, scope));
        id
    }

    /// Tear a scope down. Returns `false` if `id` is not mounted.
    ///
    /// If the torn-down scope was active, the most recently mounted remaining
    /// scope resumes and focus is brought back into it.
    pub fn deactivate<H: FocusHost + ?Sized>(&mut self, id: ScopeId, host: &mut H) -> bool {
        let Some(pos) = self.mounted.iter().position(|(sid, _)| *sid == id) else {
            return false;
        };
        let was_active = pos + 1 == self.mounted.len();
        let (_, mut scope) = self.mounted.remove(pos);
        scope.clear();
        debug!(scope = id.0, region = %scope.region(), "scope torn down");

        if was_active {
            let cold_start = self.router.config().cold_start_focus;
            if let Some((next_id, next)) = self.mounted.last_mut() {
                debug!(scope = next_id.0, region = %next.region(), "resuming scope");
                if cold_start {
                    next.cold_start(host);
                }
            }
        }
        true
    }

    /// Bring the mounted scopes in line with `regions`, bottom to top.
    ///
    /// Scopes whose region is no longer declared are torn down; declared
    /// regions without a scope are activated in order. Scopes present in both
    /// are left alone.
    pub fn reconcile<H: FocusHost + ?Sized>(&mut self, regions: &[RegionId], host: &mut H) {
        let stale: Vec<ScopeId> = self
            .mounted
            .iter()
            .filter(|(_, scope)| !regions.contains(&scope.region()))
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            self.deactivate(id, host);
        }

        for region in regions {
            if !self.mounted.iter().any(|(_, scope)| scope.region() == *region) {
                self.activate(*region, host);
            }
        }
    }

    /// Deliver a raw key event to the active scope.
    pub fn handle_key<H: FocusHost + ?Sized>(&mut self, host: &mut H, event: &KeyEvent) -> Disposition {
        match self.mounted.last_mut() {
            Some((_, scope)) => self.router.handle_key(scope, host, event),
            None => Disposition::Ignored,
        }
    }

    /// Deliver a classified input to the active scope.
    pub fn handle<H: FocusHost + ?Sized>(&mut self, host: &mut H, input: NavInput) -> Disposition {
        match self.mounted.last_mut() {
            Some((_, scope)) => self.router.handle(scope, host, input),
            None => Disposition::Ignored,
        }
    }

    /// Deliver a focus-change notification to the active scope.
    pub fn focus_changed<H: FocusHost + ?Sized>(
        &mut self,
        host: &mut H,
        focused: Option<NodeId>,
    ) -> Disposition {
        match self.mounted.last_mut() {
            Some((_, scope)) => scope.observe_focus(host, focused, self.router.config()),
            None => Disposition::Ignored,
        }
    }

    /// Tear down every scope.
    pub fn shutdown(&mut self) {
        for (id, mut scope) in self.mounted.drain(..) {
            scope.clear();
            debug!(scope = id.0, region = %scope.region(), "scope released on shutdown");
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
