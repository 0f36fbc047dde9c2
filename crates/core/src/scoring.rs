//! Scoring module - match points and combo chain
//!
//! A match is worth `sum * tiles * combo`, where `combo` is the multiplier before
//! the match increments it. The chain grows by one per match and drops back to
//! [`BASE_COMBO`] on an overshoot or a timed-mode timeout.

use crate::types::BASE_COMBO;

/// Points for one match.
///
/// # Examples
///
/// ```
/// use sumblocks_core::scoring::match_score;
///
/// // Two tiles (4 + 6) matching a target of 10 on a fresh chain.
/// assert_eq!(match_score(10, 2, 1), 20);
/// assert_eq!(match_score(10, 2, 3), 60);
/// ```
pub fn match_score(sum: u32, tiles: u32, combo: u32) -> u32 {
    sum.saturating_mul(tiles).saturating_mul(combo)
}

/// Combo multiplier after a successful match.
pub fn advance_combo(combo: u32) -> u32 {
    combo.saturating_add(1)
}

/// Combo multiplier after the chain breaks.
pub fn reset_combo() -> u32 {
    BASE_COMBO
}
