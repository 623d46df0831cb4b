//! Spatial focus navigation engine for **wayfind**.
//!
//! `wayfind-core` answers one question, over and over: given the focused
//! node and a directional input, which node should be focused next? It is
//! built for interfaces driven by a remote control, a game-pad d-pad or the
//! arrow keys, where nothing can be pointed at.
//!
//! The engine knows nothing about what a node is. It sees the interface
//! through two collaborator traits implemented by the rendering layer:
//! [`GeometryProvider`] for live bounds and visibility, and [`FocusHost`] for
//! the focus cursor and the focus/scroll requests the engine makes.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`selector::select`] | Pure directional candidate selection |
//! | [`RecoveryMonitor`] | Remembers the last focused node for drift recovery |
//! | [`FocusScope`] | One navigation region: state, cold start, recovery |
//! | [`InputRouter`] | Filters raw keys and routes them through a scope |
//! | [`Dispatcher`] | Scope lifecycle; delivers events to the active scope |
//! | [`NavConfig`] | Row tolerance, scroll options, key bindings |
//! | [`TestHost`](testing::TestHost) | Headless host for tests |
//!
//! # Event flow
//!
//! 1. **activate** -- [`Dispatcher::activate`] mounts a scope over a region
//!    and focuses its first visible node if nothing inside it is focused.
//! 2. **input** -- [`Dispatcher::handle_key`] filters the key. Activation
//!    passes straight through; a direction reads geometry, runs the selector,
//!    then focuses and scrolls to the winner.
//! 3. **focus change** -- the host reports every focus change through
//!    [`Dispatcher::focus_changed`]. Changes inside the scope are recorded;
//!    changes that leave it are corrected by restoring focus.
//! 4. **teardown** -- [`Dispatcher::deactivate`] releases the scope.
//!
//! # Quick example
//!
//! ```
//! use wayfind_core::testing::TestHost;
//! use wayfind_core::{BoundingBox, Direction, Disposition, Dispatcher, NodeId, RegionId};
//!
//! let page = RegionId(1);
//! let mut host = TestHost::new();
//! host.add(page, NodeId(1), BoundingBox::from_xywh(0.0, 0.0, 100.0, 50.0))
//!     .add(page, NodeId(2), BoundingBox::from_xywh(0.0, 80.0, 100.0, 50.0));
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.activate(page, &mut host);
//! assert_eq!(host.focused(), Some(NodeId(1)));
//!
//! let outcome = dispatcher.handle(&mut host, Direction::Down.into());
//! assert_eq!(outcome, Disposition::Moved { from: NodeId(1), to: NodeId(2) });
//! ```

pub mod config;
pub mod dispatcher;
pub mod disposition;
pub mod geometry;
pub mod input;
pub mod keymap;
pub mod recovery;
pub mod router;
pub mod scope;
pub mod selector;
pub mod testing;

pub use config::{ConfigError, NavConfig, DEFAULT_ROW_TOLERANCE};
pub use dispatcher::{Dispatcher, ScopeId};
pub use disposition::Disposition;
pub use geometry::{
    BoundingBox, FocusHost, GeometryProvider, NodeId, RegionId, ScrollAlignment, ScrollBehavior,
    ScrollOptions,
};
pub use input::{Direction, NavInput};
pub use keymap::{Binding, KeyCombination, NavKeyMap};
pub use recovery::RecoveryMonitor;
pub use router::InputRouter;
pub use scope::{FocusScope, ScopeState};
pub use selector::Candidate;
