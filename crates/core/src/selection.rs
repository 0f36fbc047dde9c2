//! Selection tracker
//!
//! Holds the distinct positions the player has chosen, in the order they were chosen.
//! Adjacency plays no role. Stack-only storage sized to the grid.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Position, GRID_CELLS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    positions: ArrayVec<Position, GRID_CELLS>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            positions: ArrayVec::new(),
        }
    }

    /// Add `pos` if absent, remove it if present.
    ///
    /// Returns false (and changes nothing) when the cell at `pos` is empty.
    pub fn toggle(&mut self, pos: Position, grid: &Grid) -> bool {
        if let Some(i) = self.positions.iter().position(|p| *p == pos) {
            self.positions.remove(i);
            return true;
        }
        if !grid.is_occupied(pos) {
            return false;
        }
        // Distinct in-bounds positions never exceed GRID_CELLS.
        self.positions.push(pos);
        true
    }

    /// Sum of the tile values at every selected position; 0 when empty.
    pub fn current_sum(&self, grid: &Grid) -> u32 {
        self.positions
            .iter()
            .filter_map(|p| grid.tile(*p))
            .map(|t| t.value as u32)
            .sum()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Follow the selected tiles after the grid shifted up one row.
    ///
    /// Only called after a successful shift, which guarantees row 0 was empty and
    /// therefore no selected position is in row 0.
    pub fn shift_up(&mut self) {
        let shifted: ArrayVec<Position, GRID_CELLS> =
            self.positions.iter().filter_map(|p| p.row_above()).collect();
        debug_assert_eq!(shifted.len(), self.positions.len());
        self.positions = shifted;
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}
