//! Grid module - manages the tile matrix
//!
//! The grid is a fixed 10x7 matrix where each cell is either empty or holds a tile.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row 0 is the top (loss boundary) and row 9 is the
//! bottom, where fresh rows are injected.
//!
//! Cleared cells stay empty; tiles never fall to fill gaps.

use crate::types::{Cell, Position, Tile, GRID_CELLS, GRID_COLS, GRID_ROWS, INITIAL_ROWS};

/// Outcome of a row injection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftResult {
    /// Rows moved up one and a fresh bottom row was injected
    Shifted,
    /// Row 0 was already occupied; the grid is unchanged
    Overflow,
}

/// The tile grid - 10 rows x 7 columns using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * GRID_COLS + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Create a grid with the bottom `INITIAL_ROWS` rows filled, drawing tiles
    /// row by row, left to right.
    pub fn initialized(mut next_tile: impl FnMut() -> Tile) -> Self {
        let mut grid = Self::new();
        let start = (GRID_ROWS - INITIAL_ROWS) * GRID_COLS;
        for cell in &mut grid.cells[start..] {
            *cell = Some(next_tile());
        }
        grid
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        Position::checked(row, col).map(|p| p.index())
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Tile at an in-bounds position, if the cell is occupied
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.cells[pos.index()].as_ref()
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells[pos.index()].is_some()
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * GRID_COLS;
        &self.cells[start..start + GRID_COLS]
    }

    /// True if any cell in row 0 holds a tile
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_some())
    }

    /// Empty every referenced cell. No compaction happens.
    pub fn clear<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Position>,
    {
        for pos in positions {
            self.cells[pos.index()] = None;
        }
    }

    /// Move every row up by one and inject `next_row()` as the new bottom row.
    ///
    /// If row 0 is occupied before the shift, nothing moves and `next_row` is not
    /// called: this is the overflow that ends a session.
    pub fn shift_up(&mut self, next_row: impl FnOnce() -> [Tile; GRID_COLS]) -> ShiftResult {
        if self.is_top_row_occupied() {
            return ShiftResult::Overflow;
        }

        // copy_within handles the overlapping ranges
        self.cells.copy_within(GRID_COLS.., 0);

        let bottom = (GRID_ROWS - 1) * GRID_COLS;
        for (cell, tile) in self.cells[bottom..].iter_mut().zip(next_row()) {
            *cell = Some(tile);
        }

        ShiftResult::Shifted
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write tile values into a fixed 2D grid (0 = empty).
    pub fn write_value_grid(&self, out: &mut [[u8; GRID_COLS]; GRID_ROWS]) {
        for (row_out, row_cells) in out.iter_mut().zip(self.cells.chunks_exact(GRID_COLS)) {
            for (v, cell) in row_out.iter_mut().zip(row_cells) {
                *v = cell.map_or(0, |t| t.value);
            }
        }
    }

    /// Copy into row-major 2D form
    pub fn to_rows(&self) -> [[Cell; GRID_COLS]; GRID_ROWS] {
        let mut out = [[None; GRID_COLS]; GRID_ROWS];
        for (row_out, row_cells) in out.iter_mut().zip(self.cells.chunks_exact(GRID_COLS)) {
            row_out.copy_from_slice(row_cells);
        }
        out
    }

    /// Build from row-major 2D form
    pub fn from_rows(rows: [[Cell; GRID_COLS]; GRID_ROWS]) -> Self {
        let mut grid = Self::new();
        for (chunk, row) in grid.cells.chunks_exact_mut(GRID_COLS).zip(rows.iter()) {
            chunk.copy_from_slice(row);
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
