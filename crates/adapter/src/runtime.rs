//! Session driver runtime.
//!
//! One task owns the [`Session`] and the [`TickClock`]; player commands and clock
//! ticks are serialized through a single `select!` loop, so no two stimuli ever
//! interleave mid-transition. Snapshots are published on a watch channel after
//! every state change.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use sumblocks_core::{GameSnapshot, RandomSource, Session, SimpleRng};

use crate::clock::TickClock;
use crate::types::{GameMode, Resolution, TickOutcome, TICK_MS};

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub seed: u32,
    pub mode: GameMode,
    pub tick_ms: u64,
    pub max_pending_commands: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            mode: GameMode::Classic,
            tick_ms: TICK_MS,
            max_pending_commands: 16,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    ///
    /// - `SUMBLOCKS_SEED`: RNG seed (default 1)
    /// - `SUMBLOCKS_MODE`: "classic" or "timed" (default classic)
    /// - `SUMBLOCKS_TICK_MS`: clock period (default 1000)
    /// - `SUMBLOCKS_MAX_PENDING`: command queue depth (default 16)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DriverConfig::from_env`] with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mode = match lookup("SUMBLOCKS_MODE") {
            Some(s) => GameMode::from_str(s.trim()).unwrap_or_else(|| {
                log::warn!("ignoring invalid SUMBLOCKS_MODE={:?}", s);
                defaults.mode
            }),
            None => defaults.mode,
        };

        Self {
            seed: parse_var(&lookup, "SUMBLOCKS_SEED").unwrap_or(defaults.seed),
            mode,
            tick_ms: parse_var(&lookup, "SUMBLOCKS_TICK_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.tick_ms),
            max_pending_commands: parse_var(&lookup, "SUMBLOCKS_MAX_PENDING")
                .unwrap_or(defaults.max_pending_commands)
                .max(1),
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

/// Command delivered to the driver task.
#[derive(Debug)]
pub enum DriverCommand {
    Toggle {
        row: usize,
        col: usize,
        reply: Option<oneshot::Sender<Resolution>>,
    },
    Reset {
        mode: GameMode,
        reply: Option<oneshot::Sender<()>>,
    },
    Shutdown,
}

/// Running session driver.
pub struct SessionDriver<R: RandomSource = SimpleRng> {
    cmd_tx: mpsc::Sender<DriverCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<Session<R>>,
}

impl SessionDriver<SimpleRng> {
    /// Start a seeded session. Must be called from within a tokio runtime.
    pub fn spawn(config: DriverConfig) -> Self {
        let session = Session::new(config.seed, config.mode);
        Self::spawn_session(session, &config)
    }
}

impl<R> SessionDriver<R>
where
    R: RandomSource + Send + 'static,
{
    /// Drive an existing session.
    pub fn spawn_session(session: Session<R>, config: &DriverConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let clock = TickClock::new(config.tick_period());

        log::info!(
            "session driver started: mode {}, tick {:?}",
            session.state().mode().as_str(),
            clock.period()
        );
        let task = tokio::spawn(drive(session, clock, cmd_rx, snapshot_tx));

        Self {
            cmd_tx,
            snapshot_rx,
            task,
        }
    }

    /// Toggle `(row, col)`; resolves after the resulting snapshot is published.
    pub async fn toggle(&self, row: usize, col: usize) -> Result<Resolution> {
        let (reply, rx) = oneshot::channel();
        self.send(DriverCommand::Toggle {
            row,
            col,
            reply: Some(reply),
        })
        .await?;
        Ok(rx.await?)
    }

    /// Start a new session; resolves after the fresh snapshot is published.
    pub async fn reset(&self, mode: GameMode) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(DriverCommand::Reset {
            mode,
            reply: Some(reply),
        })
        .await?;
        Ok(rx.await?)
    }

    pub async fn send(&self, cmd: DriverCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("session driver stopped"))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the driver and hand back the session.
    pub async fn shutdown(self) -> Result<Session<R>> {
        // A closed channel means the task already finished.
        let _ = self.cmd_tx.send(DriverCommand::Shutdown).await;
        let session = self.task.await?;
        log::info!("session driver stopped");
        Ok(session)
    }
}

enum Reply {
    Toggle(oneshot::Sender<Resolution>, Resolution),
    Reset(oneshot::Sender<()>),
}

async fn drive<R: RandomSource>(
    mut session: Session<R>,
    mut clock: TickClock,
    mut cmd_rx: mpsc::Receiver<DriverCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
) -> Session<R> {
    clock.sync(session.state().needs_clock());

    loop {
        let mut reply = None;
        let changed = tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(DriverCommand::Toggle { row, col, reply: tx }) => {
                    let resolution = session.toggle(row, col);
                    reply = tx.map(|tx| Reply::Toggle(tx, resolution));
                    resolution != Resolution::Ignored
                }
                Some(DriverCommand::Reset { mode, reply: tx }) => {
                    // A reset always realigns the clock period with the new session.
                    clock.cancel();
                    session.reset(mode);
                    reply = tx.map(Reply::Reset);
                    true
                }
                Some(DriverCommand::Shutdown) | None => break,
            },
            _ = clock.tick() => {
                let outcome = session.tick();
                if let TickOutcome::RowInjected { game_over } = outcome {
                    log::debug!("timeout row injection (game over: {})", game_over);
                }
                outcome != TickOutcome::Ignored
            }
        };

        clock.sync(session.state().needs_clock());
        if changed {
            snapshot_tx.send_modify(|snap| session.snapshot_into(snap));
        }

        match reply {
            Some(Reply::Toggle(tx, resolution)) => {
                let _ = tx.send(resolution);
            }
            Some(Reply::Reset(tx)) => {
                let _ = tx.send(());
            }
            None => {}
        }
    }

    clock.cancel();
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_defaults_without_env() {
        let config = DriverConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn config_reads_values() {
        let config = DriverConfig::from_lookup(lookup(&[
            ("SUMBLOCKS_SEED", "42"),
            ("SUMBLOCKS_MODE", "Timed"),
            ("SUMBLOCKS_TICK_MS", "250"),
            ("SUMBLOCKS_MAX_PENDING", " 4 "),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.mode, GameMode::Timed);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.max_pending_commands, 4);
    }

    #[test]
    fn config_falls_back_on_invalid_values() {
        let config = DriverConfig::from_lookup(lookup(&[
            ("SUMBLOCKS_SEED", "many"),
            ("SUMBLOCKS_MODE", "zen"),
            ("SUMBLOCKS_TICK_MS", "0"),
            ("SUMBLOCKS_MAX_PENDING", "0"),
        ]));
        assert_eq!(config.seed, 1);
        assert_eq!(config.mode, GameMode::Classic);
        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.max_pending_commands, 1);
    }
}
