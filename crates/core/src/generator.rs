//! Tile and target generation.
//!
//! Both generators borrow the session's [`RandomSource`] per call instead of owning
//! one, so a single seeded stream drives the whole session.

use crate::rng::RandomSource;
use crate::types::{
    Tile, TileId, TileStyle, GRID_COLS, MAX_VALUE, MIN_VALUE, TARGET_MAX, TARGET_MIN,
};

/// Produces tiles with uniform values in `[MIN_VALUE, MAX_VALUE]` and uniform styles.
#[derive(Debug, Clone, Default)]
pub struct TileGenerator {
    next_id: u64,
}

impl TileGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Continue numbering after `last`, e.g. the highest id already on a grid.
    pub fn resuming_after(last: TileId) -> Self {
        Self { next_id: last.0 }
    }

    /// Draw one tile. The value is drawn before the style.
    pub fn generate<R: RandomSource>(&mut self, rng: &mut R) -> Tile {
        let value = rng.next_in_range(MIN_VALUE as u32, MAX_VALUE as u32) as u8;
        let style_index = rng.next_range(TileStyle::ALL.len() as u32) as usize;
        let style = TileStyle::ALL[style_index];

        self.next_id = self.next_id.wrapping_add(1);
        Tile::new(TileId(self.next_id), value, style)
    }

    /// Draw a full row, left to right.
    pub fn generate_row<R: RandomSource>(&mut self, rng: &mut R) -> [Tile; GRID_COLS] {
        std::array::from_fn(|_| self.generate(rng))
    }

    /// Number of tiles generated so far
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

/// Produces target sums in `[TARGET_MIN, TARGET_MAX]`.
///
/// Targets are independent of the grid and may be unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetGenerator;

impl TargetGenerator {
    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> u32 {
        rng.next_in_range(TARGET_MIN, TARGET_MAX)
    }
}
