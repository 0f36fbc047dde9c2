//! Session driver tests under paused tokio time.
//!
//! With a paused clock the runtime auto-advances to the next timer whenever every
//! task is idle, so `sleep` here lands deterministically between driver ticks.

use std::time::Duration;

use sumblocks::adapter::{DriverConfig, SessionDriver};
use sumblocks::core::{GameState, Grid, Session, SimpleRng};
use sumblocks::types::{
    GameMode, Resolution, Tile, TileId, TileStyle, GRID_COLS, GRID_ROWS, INITIAL_ROWS,
    TIME_LIMIT_SECS,
};

fn timed_config() -> DriverConfig {
    DriverConfig {
        mode: GameMode::Timed,
        ..DriverConfig::default()
    }
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn timed_session_counts_down_once_per_second() {
    let driver = SessionDriver::spawn(timed_config());

    sleep_ms(3_500).await;
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS - 3);

    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn timeout_injects_a_row_and_restarts_countdown() {
    let driver = SessionDriver::spawn(timed_config());

    sleep_ms(TIME_LIMIT_SECS as u64 * 1_000 + 500).await;

    let snap = driver.snapshot();
    assert_eq!(snap.time_left, TIME_LIMIT_SECS);
    assert_eq!(snap.combo, 1);
    assert!(!snap.game_over);
    assert_eq!(snap.top_filled_row(), Some(GRID_ROWS - INITIAL_ROWS - 1));

    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn classic_session_never_ticks() {
    let driver = SessionDriver::spawn(DriverConfig::default());
    let mut updates = driver.subscribe();
    updates.borrow_and_update();

    sleep_ms(60_000).await;

    assert!(!updates.has_changed().unwrap());
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS);
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn game_over_cancels_the_clock() {
    let mut grid = Grid::new();
    grid.set(0, 0, Some(Tile::new(TileId(1), 5, TileStyle::Rose)));
    let session = Session::from_state(
        GameState::new(grid, 12, GameMode::Timed),
        SimpleRng::new(5),
    );
    let driver = SessionDriver::spawn_session(session, &timed_config());

    sleep_ms(TIME_LIMIT_SECS as u64 * 1_000 + 500).await;
    let mut updates = driver.subscribe();
    let over = updates.borrow_and_update().clone();
    assert!(over.game_over);
    assert_eq!(over.top_filled_row(), Some(0));

    sleep_ms(60_000).await;

    assert!(!updates.has_changed().unwrap());
    let session = driver.shutdown().await.unwrap();
    assert!(session.state().game_over());
    assert!(!session.state().needs_clock());
}

#[tokio::test(start_paused = true)]
async fn reset_after_game_over_restarts_the_clock() {
    let mut grid = Grid::new();
    grid.set(0, 0, Some(Tile::new(TileId(1), 5, TileStyle::Rose)));
    let session = Session::from_state(
        GameState::new(grid, 12, GameMode::Timed),
        SimpleRng::new(5),
    );
    let driver = SessionDriver::spawn_session(session, &timed_config());

    sleep_ms(TIME_LIMIT_SECS as u64 * 1_000 + 500).await;
    assert!(driver.snapshot().game_over);

    driver.reset(GameMode::Timed).await.unwrap();
    sleep_ms(2_500).await;

    let snap = driver.snapshot();
    assert!(!snap.game_over);
    assert_eq!(snap.epoch, 1);
    assert_eq!(snap.time_left, TIME_LIMIT_SECS - 2);
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_from_classic_to_timed_starts_the_clock() {
    let driver = SessionDriver::spawn(DriverConfig::default());
    sleep_ms(1_300).await;
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS);

    driver.reset(GameMode::Timed).await.unwrap();
    sleep_ms(2_500).await;

    let snap = driver.snapshot();
    assert_eq!(snap.mode, GameMode::Timed);
    assert_eq!(snap.time_left, TIME_LIMIT_SECS - 2);
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_to_classic_stops_the_countdown() {
    let driver = SessionDriver::spawn(timed_config());
    sleep_ms(2_500).await;
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS - 2);

    driver.reset(GameMode::Classic).await.unwrap();
    sleep_ms(30_000).await;

    let snap = driver.snapshot();
    assert_eq!(snap.mode, GameMode::Classic);
    assert_eq!(snap.epoch, 1);
    assert_eq!(snap.time_left, TIME_LIMIT_SECS);
    assert_eq!(snap.top_filled_row(), Some(GRID_ROWS - INITIAL_ROWS));
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_restarts_a_full_period() {
    let driver = SessionDriver::spawn(timed_config());
    sleep_ms(4_500).await;
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS - 4);

    // The old schedule would tick at 5.0s; the new one first ticks at 5.5s.
    driver.reset(GameMode::Timed).await.unwrap();
    sleep_ms(700).await;
    assert_eq!(driver.snapshot().time_left, TIME_LIMIT_SECS);

    sleep_ms(1_500).await;
    let snap = driver.snapshot();
    assert_eq!(snap.time_left, TIME_LIMIT_SECS - 2);
    assert_eq!(snap.epoch, 1);
    driver.shutdown().await.unwrap();
}

#[tokio::test]
async fn toggle_replies_and_publishes() {
    let driver = SessionDriver::spawn(DriverConfig {
        seed: 424242,
        ..DriverConfig::default()
    });
    let mut updates = driver.subscribe();
    updates.borrow_and_update();

    // Empty top-left cell
    assert_eq!(driver.toggle(0, 0).await.unwrap(), Resolution::Ignored);
    assert!(!updates.has_changed().unwrap());

    // Every initial tile is below the smallest target.
    let bottom = GRID_ROWS - 1;
    let resolution = driver.toggle(bottom, GRID_COLS - 1).await.unwrap();
    assert!(matches!(resolution, Resolution::Accumulating { .. }));

    updates.changed().await.unwrap();
    let snap = updates.borrow_and_update().clone();
    assert!(snap.is_selected(bottom, GRID_COLS - 1));
    assert_eq!(snap.last_resolution, Some(resolution));

    let session = driver.shutdown().await.unwrap();
    assert_eq!(session.snapshot(), snap);
}

#[tokio::test]
async fn subscribers_see_the_driver_close() {
    let driver = SessionDriver::spawn(DriverConfig::default());
    let updates = driver.subscribe();
    driver.shutdown().await.unwrap();

    assert!(updates.has_changed().is_err());
}
