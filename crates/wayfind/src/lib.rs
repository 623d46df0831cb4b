//! **wayfind** -- remote-control style spatial focus navigation for
//! [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! wayfind = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`wayfind_core`] are available at the crate root
//!   ([`Dispatcher`], [`FocusScope`], [`InputRouter`], [`NavConfig`],
//!   [`GeometryProvider`], [`FocusHost`], etc.).
//! * The [`widgets`] module re-exports everything from [`wayfind_widgets`]
//!   (the [`TileBoard`](widgets::TileBoard) and its helpers).
//! * [`runtime`] drives a board in a real terminal ([`Program`]) or headless
//!   ([`Session`]).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use wayfind::widgets::{SectionKind, TileBoard};
//! use wayfind::{Program, ProgramOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wayfind::ProgramError> {
//!     let mut board = TileBoard::new();
//!     board.add_sidebar_item("Home");
//!     let row = board.add_section("Recently Added", SectionKind::Row);
//!     for title in ["Dune", "Arrival", "Sicario"] {
//!         board.push_tile(row, title);
//!     }
//!     Program::new(board, ProgramOptions::default())?.run().await?;
//!     Ok(())
//! }
//! ```

pub use wayfind_core::*;
pub mod widgets {
    pub use wayfind_widgets::*;
}

pub mod runtime;
pub use runtime::{init_logging, Flow, Program, ProgramError, ProgramOptions, Session};

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
