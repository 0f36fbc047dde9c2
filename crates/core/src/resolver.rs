//! Match resolver state classification.
//!
//! After every accepted toggle the running sum is compared to the target:
//! below it the selection keeps accumulating, equal is a match, above is an
//! overshoot. The session applies the side effects for each state.

use std::cmp::Ordering;

/// State of the selection relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Accumulating,
    Matched,
    Overshoot,
}

/// Classify a running sum against the target.
pub fn evaluate(sum: u32, target: u32) -> MatchState {
    match sum.cmp(&target) {
        Ordering::Less => MatchState::Accumulating,
        Ordering::Equal => MatchState::Matched,
        Ordering::Greater => MatchState::Overshoot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(0, 10), MatchState::Accumulating);
        assert_eq!(evaluate(9, 10), MatchState::Accumulating);
        assert_eq!(evaluate(10, 10), MatchState::Matched);
        assert_eq!(evaluate(12, 10), MatchState::Overshoot);
    }
}
