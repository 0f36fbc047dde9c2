//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and timing rules.
//! It has **zero dependencies** on rendering, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Any [`RandomSource`] can be injected, including scripted sequences
//! - **Portable**: Driven by plain method calls; the clock lives outside the core
//!
//! # Module Structure
//!
//! - [`grid`]: 10x7 tile matrix with row injection and overflow detection
//! - [`selection`]: Chosen positions and their running sum
//! - [`resolver`]: Classifies a running sum against the target
//! - [`scoring`]: Match points and the combo chain
//! - [`generator`]: Random tiles and targets
//! - [`rng`]: Seeded LCG and scripted random sources
//! - [`session`]: Complete state and the toggle / tick / reset transitions
//!
//! # Game Rules
//!
//! - **Matching**: Select tiles whose values sum exactly to the target; they are cleared
//! - **Overshoot**: Going past the target drops the selection and the combo
//! - **Combo**: Each match is worth `sum * tiles * combo`, then the combo grows by one
//! - **Classic mode**: Every match pushes the rows up and injects a new bottom row
//! - **Timed mode**: A row is injected whenever the 10 second countdown runs out
//! - **Game over**: Injecting a row while the top row holds a tile
//!
//! # Example
//!
//! ```
//! use sumblocks_core::Session;
//! use sumblocks_types::{GameMode, Resolution, GRID_ROWS};
//!
//! let mut session = Session::new(12345, GameMode::Classic);
//!
//! // Toggling an empty cell is ignored.
//! assert_eq!(session.toggle(0, 0), Resolution::Ignored);
//!
//! // Bottom rows start filled.
//! let r = session.toggle(GRID_ROWS - 1, 0);
//! assert_ne!(r, Resolution::Ignored);
//! assert_eq!(session.state().score(), 0);
//! ```
//!
//! # Timing
//!
//! The core never reads a clock. In timed mode the caller invokes
//! [`Session::tick`](session::Session::tick) once per second.

pub mod generator;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use sumblocks_types as types;

// Re-export commonly used types for convenience
pub use generator::{TargetGenerator, TileGenerator};
pub use grid::{Grid, ShiftResult};
pub use resolver::{evaluate, MatchState};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scoring::{advance_combo, match_score, reset_combo};
pub use selection::Selection;
pub use session::{GameState, Session};
pub use snapshot::GameSnapshot;
