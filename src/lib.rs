//! Sumblocks (workspace facade crate).
//!
//! This package exposes `sumblocks::{core,adapter,types}` as one public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use sumblocks_adapter as adapter;
pub use sumblocks_core as core;
pub use sumblocks_types as types;
