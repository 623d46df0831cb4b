//! Rendering collaborators for the **wayfind** navigation engine, built on
//! [`ratatui`].
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`board`] | Sidebar plus carousel rows and wrapping grids of focusable tiles |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`label`] | Unicode-aware label width, truncation and centering |
//! | [`scroll`] | [`ScrollAxis`](scroll::ScrollAxis) offsets with smooth animation |

pub mod board;
pub mod label;
pub mod scroll;

pub use board::{BoardMetrics, BoardStyle, Section, SectionKind, Tile, TileBoard};
