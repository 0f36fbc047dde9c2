use arrayvec::ArrayVec;

use crate::types::{
    Cell, GameMode, Position, Resolution, BASE_COMBO, GRID_CELLS, GRID_COLS, GRID_ROWS,
    TIME_LIMIT_SECS,
};

/// Read-only copy of everything a presentation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_COLS]; GRID_ROWS],
    /// Selected positions in the order they were chosen
    pub selection: ArrayVec<Position, GRID_CELLS>,
    pub target: u32,
    pub current_sum: u32,
    pub score: u32,
    pub combo: u32,
    pub mode: GameMode,
    pub time_left: u32,
    pub game_over: bool,
    pub epoch: u32,
    pub last_resolution: Option<Resolution>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[None; GRID_COLS]; GRID_ROWS];
        self.selection.clear();
        self.target = 0;
        self.current_sum = 0;
        self.score = 0;
        self.combo = BASE_COMBO;
        self.mode = GameMode::Classic;
        self.time_left = TIME_LIMIT_SECS;
        self.game_over = false;
        self.epoch = 0;
        self.last_resolution = None;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Tile values per cell (0 = empty)
    pub fn value_grid(&self) -> [[u8; GRID_COLS]; GRID_ROWS] {
        self.grid
            .map(|row| row.map(|cell| cell.map_or(0, |t| t.value)))
    }

    /// Index of the highest non-empty row, if any
    pub fn top_filled_row(&self) -> Option<usize> {
        self.grid
            .iter()
            .position(|row| row.iter().any(|cell| cell.is_some()))
    }

    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        Position::checked(row, col).is_some_and(|p| self.selection.contains(&p))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_COLS]; GRID_ROWS],
            selection: ArrayVec::new(),
            target: 0,
            current_sum: 0,
            score: 0,
            combo: BASE_COMBO,
            mode: GameMode::Classic,
            time_left: TIME_LIMIT_SECS,
            game_over: false,
            epoch: 0,
            last_resolution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tile, TileId, TileStyle};

    #[test]
    fn default_snapshot_is_empty_and_playable() {
        let snap = GameSnapshot::default();
        assert!(snap.playable());
        assert_eq!(snap.top_filled_row(), None);
        assert_eq!(snap.value_grid(), [[0u8; GRID_COLS]; GRID_ROWS]);
    }

    #[test]
    fn value_grid_and_selection_queries() {
        let mut snap = GameSnapshot::default();
        snap.grid[7][2] = Some(Tile::new(TileId(1), 8, TileStyle::Violet));
        snap.selection.push(Position::checked(7, 2).unwrap());

        assert_eq!(snap.value_grid()[7][2], 8);
        assert_eq!(snap.top_filled_row(), Some(7));
        assert!(snap.is_selected(7, 2));
        assert!(!snap.is_selected(7, 3));
        assert!(!snap.is_selected(GRID_ROWS, 0));
    }

    #[test]
    fn clear_restores_default() {
        let mut snap = GameSnapshot::default();
        snap.grid[9][0] = Some(Tile::new(TileId(3), 4, TileStyle::Cyan));
        snap.selection.push(Position::checked(9, 0).unwrap());
        snap.score = 40;
        snap.combo = 3;
        snap.game_over = true;
        snap.last_resolution = Some(Resolution::Overshoot { sum: 30 });

        snap.clear();

        assert_eq!(snap, GameSnapshot::default());
    }
}
