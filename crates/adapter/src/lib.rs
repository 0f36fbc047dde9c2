//! Adapter module - async shell around the deterministic core
//!
//! The core never reads a clock and never blocks. This crate supplies the two
//! outside facilities a live session needs and a wire format for observers:
//!
//! - [`clock`]: the cancellable one-second tick that drives timed mode
//! - [`runtime`]: the driver task that owns a session and serializes player
//!   commands against clock ticks
//! - [`protocol`]: line-delimited JSON messages for the headless binary
//!
//! # Clock Discipline
//!
//! After every transition the driver syncs the clock to the session: it runs
//! only while the mode is timed and the session is live. Game over, a switch
//! to classic mode, or a reset cancel it, so a tick from a superseded session
//! can never reach the state.
//!
//! # Environment Variables
//!
//! - `SUMBLOCKS_SEED`: RNG seed (default 1)
//! - `SUMBLOCKS_MODE`: "classic" or "timed" (default classic)
//! - `SUMBLOCKS_TICK_MS`: clock period in milliseconds (default 1000)
//! - `SUMBLOCKS_MAX_PENDING`: command queue depth (default 16)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Game: {"type":"reset","mode":"timed"}
//! Game -> Client: {"type":"observation","seq":1,"ts":1234567890,"mode":"timed","target":17,...}
//! Client -> Game: {"type":"toggle","row":9,"col":2}
//! Game -> Client: {"type":"observation","seq":2,...,"last_event":{"kind":"accumulating","sum":8}}
//! ```

pub mod clock;
pub mod protocol;
pub mod runtime;

pub use sumblocks_core as core;
pub use sumblocks_types as types;

pub use clock::TickClock;
pub use protocol::*;
pub use runtime::{DriverCommand, DriverConfig, SessionDriver};
