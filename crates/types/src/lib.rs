//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, async driver, JSON protocol).
//!
//! # Grid Dimensions
//!
//! - **Rows**: 10 (indexed 0-9, row 0 is the top / loss boundary)
//! - **Columns**: 7 (indexed 0-6)
//! - **Initial rows**: the bottom 4 rows are filled when a session starts
//!
//! # Value Ranges
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_VALUE` | 1 | Smallest tile value |
//! | `MAX_VALUE` | 9 | Largest tile value |
//! | `TARGET_MIN` | 10 | Smallest target sum |
//! | `TARGET_MAX` | 25 | Largest target sum |
//!
//! # Timing
//!
//! - `TIME_LIMIT_SECS`: 10 - seconds before a timed-mode row injection
//! - `TICK_MS`: 1000 - period of the timed-mode clock
//!
//! # Examples
//!
//! ```
//! use sumblocks_types::{GameMode, Position, GRID_COLS, GRID_ROWS};
//!
//! let mode = GameMode::from_str("timed").unwrap();
//! assert_eq!(mode, GameMode::Timed);
//! assert_eq!(GameMode::from_str("time"), Some(GameMode::Timed));
//!
//! let pos = Position::checked(9, 6).unwrap();
//! assert_eq!(pos.index(), 9 * GRID_COLS + 6);
//! assert!(Position::checked(GRID_ROWS, 0).is_none());
//! ```

/// Grid height in rows (row 0 is the top)
pub const GRID_ROWS: usize = 10;

/// Grid width in columns
pub const GRID_COLS: usize = 7;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Number of bottom rows filled when a session starts
pub const INITIAL_ROWS: usize = 4;

/// Smallest tile value (inclusive)
pub const MIN_VALUE: u8 = 1;

/// Largest tile value (inclusive)
pub const MAX_VALUE: u8 = 9;

/// Smallest target sum (inclusive)
pub const TARGET_MIN: u32 = 10;

/// Largest target sum (inclusive)
pub const TARGET_MAX: u32 = 25;

/// Seconds on the timed-mode clock before a row is injected
pub const TIME_LIMIT_SECS: u32 = 10;

/// Timed-mode clock period in milliseconds
pub const TICK_MS: u64 = 1000;

/// Combo multiplier at session start and after a reset of the chain
pub const BASE_COMBO: u32 = 1;


/// A cell coordinate on the grid.
///
/// Constructed through [`Position::checked`], so a `Position` is always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Returns `None` when `(row, col)` lies outside the grid.
    pub fn checked(row: usize, col: usize) -> Option<Self> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        Some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major flat index (`row * GRID_COLS + col`)
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.row() * GRID_COLS + self.col()
    }

    /// The same column one row closer to the top, if any.
    pub fn row_above(&self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self { row, col: self.col })
    }
}

/// Game mode
///
/// - **Classic**: a row is injected after every successful match
/// - **Timed**: a row is injected whenever the countdown runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Classic,
    Timed,
}

impl GameMode {
    /// Parse mode from string (case-insensitive).
    ///
    /// Accepts "classic" and "timed" (or "time").
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timed" | "time" => Some(GameMode::Timed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Timed => "timed",
        }
    }
}

/// Cosmetic tile style
///
/// Has no effect on matching. The palette is fixed and drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileStyle {
    Rose,
    Blue,
    Emerald,
    Amber,
    Violet,
    Cyan,
    Orange,
}

impl TileStyle {
    pub const ALL: [Self; 7] = [
        Self::Rose,
        Self::Blue,
        Self::Emerald,
        Self::Amber,
        Self::Violet,
        Self::Cyan,
        Self::Orange,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rose" => Some(Self::Rose),
            "blue" => Some(Self::Blue),
            "emerald" => Some(Self::Emerald),
            "amber" => Some(Self::Amber),
            "violet" => Some(Self::Violet),
            "cyan" => Some(Self::Cyan),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rose => "rose",
            Self::Blue => "blue",
            Self::Emerald => "emerald",
            Self::Amber => "amber",
            Self::Violet => "violet",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
        }
    }
}

/// Opaque tile identifier, unique per generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// A numbered tile. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u8,
    pub style: TileStyle,
}

impl Tile {
    pub fn new(id: TileId, value: u8, style: TileStyle) -> Self {
        Self { id, value, style }
    }
}

/// A cell on the grid
///
/// - `None`: empty cell
/// - `Some(Tile)`: occupied cell
pub type Cell = Option<Tile>;

/// External stimuli that drive a session
///
/// Player intent and the timed-mode clock are the only two sources of mutation;
/// `Reset` starts a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Toggle the cell at `(row, col)` in or out of the selection
    Toggle { row: usize, col: usize },
    /// One period of the timed-mode clock elapsed
    Tick,
    /// Start a fresh session in the given mode
    Reset(GameMode),
}

/// Details of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    /// Sum of the matched tiles (equals the target that was active)
    pub sum: u32,
    /// Number of tiles cleared
    pub tiles: u32,
    /// Points awarded (`sum * tiles * combo`)
    pub points: u32,
    /// Combo multiplier used for this match (before increment)
    pub combo: u32,
    /// Whether a row was injected as part of this match (classic mode)
    pub row_injected: bool,
    /// Whether the row injection overflowed the grid
    pub game_over: bool,
}

/// Result of toggling a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Rejected: out of bounds, empty cell, or the session is over
    Ignored,
    /// Selection sum is still below the target
    Accumulating { sum: u32 },
    /// Selection sum hit the target exactly
    Matched(MatchReport),
    /// Selection sum went past the target; selection and combo were reset
    Overshoot { sum: u32 },
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Ignored => "ignored",
            Resolution::Accumulating { .. } => "accumulating",
            Resolution::Matched(_) => "matched",
            Resolution::Overshoot { .. } => "overshoot",
        }
    }
}

/// Result of one timed-mode clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Classic mode or finished session
    Ignored,
    /// The countdown was decremented
    Countdown { time_left: u32 },
    /// The countdown ran out and a row injection was attempted
    RowInjected { game_over: bool },
}

/// Result of applying a [`SessionEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Toggle(Resolution),
    Tick(TickOutcome),
    Reset(GameMode),
}
