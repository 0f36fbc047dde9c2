//! Session module - owns the complete game state
//!
//! This module ties together the grid, selection, generators, and scoring.
//! Every mutation goes through one of three transitions (toggle, tick, reset),
//! each of which either fully applies or is rejected as a no-op.

use crate::generator::{TargetGenerator, TileGenerator};
use crate::grid::{Grid, ShiftResult};
use crate::resolver::{evaluate, MatchState};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{advance_combo, match_score, reset_combo};
use crate::selection::Selection;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Observable game state
///
/// Score never decreases within a session; `game_over` is one-way until a reset.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    target: u32,
    score: u32,
    selection: Selection,
    game_over: bool,
    mode: GameMode,
    /// Seconds left on the timed-mode countdown (kept at the limit in classic mode).
    time_left: u32,
    combo: u32,
    /// Number of explicit resets since the session was created.
    epoch: u32,
    last_resolution: Option<Resolution>,
}

impl GameState {
    /// A live state around an explicit grid: no score, empty selection, fresh chain.
    pub fn new(grid: Grid, target: u32, mode: GameMode) -> Self {
        Self {
            grid,
            target,
            score: 0,
            selection: Selection::new(),
            game_over: false,
            mode,
            time_left: TIME_LIMIT_SECS,
            combo: BASE_COMBO,
            epoch: 0,
            last_resolution: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_sum(&self) -> u32 {
        self.selection.current_sum(&self.grid)
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn last_resolution(&self) -> Option<Resolution> {
        self.last_resolution
    }

    /// True while the timed-mode clock should be running.
    pub fn needs_clock(&self) -> bool {
        self.mode == GameMode::Timed && !self.game_over
    }
}

/// A game session: state plus the random source and generators that feed it.
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SimpleRng> {
    state: GameState,
    rng: R,
    tiles: TileGenerator,
    targets: TargetGenerator,
}

impl Session<SimpleRng> {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u32, mode: GameMode) -> Self {
        Self::with_rng(SimpleRng::new(seed), mode)
    }
}

impl<R: RandomSource> Session<R> {
    /// Start a session drawing all randomness from `rng`.
    ///
    /// The initial grid is drawn first (row by row), then the target.
    pub fn with_rng(mut rng: R, mode: GameMode) -> Self {
        let mut tiles = TileGenerator::new();
        let targets = TargetGenerator;
        let state = Self::fresh_state(&mut rng, &mut tiles, targets, mode, 0);
        Self {
            state,
            rng,
            tiles,
            targets,
        }
    }

    /// Wrap an explicit state, e.g. a hand-built grid.
    pub fn from_state(state: GameState, rng: R) -> Self {
        let last_id = state
            .grid
            .cells()
            .iter()
            .flatten()
            .map(|t| t.id)
            .max()
            .unwrap_or(TileId(0));
        Self {
            state,
            rng,
            tiles: TileGenerator::resuming_after(last_id),
            targets: TargetGenerator,
        }
    }

    fn fresh_state(
        rng: &mut R,
        tiles: &mut TileGenerator,
        targets: TargetGenerator,
        mode: GameMode,
        epoch: u32,
    ) -> GameState {
        let grid = Grid::initialized(|| tiles.generate(rng));
        let target = targets.generate(rng);
        let mut state = GameState::new(grid, target, mode);
        state.epoch = epoch;
        state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Apply one external stimulus.
    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::Toggle { row, col } => Transition::Toggle(self.toggle(row, col)),
            SessionEvent::Tick => Transition::Tick(self.tick()),
            SessionEvent::Reset(mode) => {
                self.reset(mode);
                Transition::Reset(mode)
            }
        }
    }

    /// Toggle `(row, col)` in or out of the selection and resolve the new sum.
    pub fn toggle(&mut self, row: usize, col: usize) -> Resolution {
        if self.state.game_over {
            return Resolution::Ignored;
        }
        let Some(pos) = Position::checked(row, col) else {
            return Resolution::Ignored;
        };
        if !self.state.selection.toggle(pos, &self.state.grid) {
            return Resolution::Ignored;
        }

        let sum = self.state.current_sum();
        let resolution = match evaluate(sum, self.state.target) {
            MatchState::Accumulating => Resolution::Accumulating { sum },
            MatchState::Matched => Resolution::Matched(self.resolve_match(sum)),
            MatchState::Overshoot => {
                log::debug!(
                    "overshoot: sum {} past target {}, combo reset",
                    sum,
                    self.state.target
                );
                self.state.selection.clear();
                self.state.combo = reset_combo();
                Resolution::Overshoot { sum }
            }
        };

        log::trace!("toggle ({}, {}): {}", row, col, resolution.as_str());
        self.state.last_resolution = Some(resolution);
        resolution
    }

    fn resolve_match(&mut self, sum: u32) -> MatchReport {
        let tiles = self.state.selection.len() as u32;
        let combo = self.state.combo;
        let points = match_score(sum, tiles, combo);

        self.state.grid.clear(self.state.selection.iter());
        self.state.selection.clear();
        self.state.score = self.state.score.saturating_add(points);
        self.state.combo = advance_combo(combo);
        self.state.target = self.targets.generate(&mut self.rng);
        self.state.time_left = TIME_LIMIT_SECS;

        let row_injected = self.state.mode == GameMode::Classic;
        let game_over = row_injected && self.inject_row() == ShiftResult::Overflow;

        log::debug!(
            "match: {} tiles for {} x{} = {} points, next target {}",
            tiles,
            sum,
            combo,
            points,
            self.state.target
        );

        MatchReport {
            sum,
            tiles,
            points,
            combo,
            row_injected,
            game_over,
        }
    }

    /// Advance the timed-mode countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.needs_clock() {
            return TickOutcome::Ignored;
        }

        if self.state.time_left > 1 {
            self.state.time_left -= 1;
            return TickOutcome::Countdown {
                time_left: self.state.time_left,
            };
        }

        let result = self.inject_row();
        self.state.time_left = TIME_LIMIT_SECS;
        self.state.combo = reset_combo();
        TickOutcome::RowInjected {
            game_over: result == ShiftResult::Overflow,
        }
    }

    /// Row injection shared by classic matches and timed-mode timeouts.
    ///
    /// An occupied top row ends the session and leaves the grid untouched.
    fn inject_row(&mut self) -> ShiftResult {
        let Self {
            state, rng, tiles, ..
        } = self;
        let result = state.grid.shift_up(|| tiles.generate_row(rng));
        match result {
            ShiftResult::Shifted => state.selection.shift_up(),
            ShiftResult::Overflow => {
                state.game_over = true;
                log::debug!("game over: top row occupied, final score {}", state.score);
            }
        }
        result
    }

    /// Start over in `mode` with a fresh grid and target.
    pub fn reset(&mut self, mode: GameMode) {
        let epoch = self.state.epoch.wrapping_add(1);
        self.state = Self::fresh_state(&mut self.rng, &mut self.tiles, self.targets, mode, epoch);
        log::debug!("session reset: mode {}, epoch {}", mode.as_str(), epoch);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let s = &self.state;
        out.grid = s.grid.to_rows();
        out.selection.clear();
        out.selection.extend(s.selection.iter());
        out.target = s.target;
        out.current_sum = s.current_sum();
        out.score = s.score;
        out.combo = s.combo;
        out.mode = s.mode;
        out.time_left = s.time_left;
        out.game_over = s.game_over;
        out.epoch = s.epoch;
        out.last_resolution = s.last_resolution;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session<SimpleRng> {
    fn default() -> Self {
        Self::new(1, GameMode::Classic)
    }
}
