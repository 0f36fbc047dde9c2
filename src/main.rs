//! Headless sumblocks runner (default binary).
//!
//! Reads JSON commands from stdin, one per line, and writes an observation line to
//! stdout after every state change. Logs go to stderr.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};

use sumblocks::adapter::{
    build_observation, create_error, create_stopped_error, parse_message, ClientMessage,
    DriverConfig, ProtocolError, SessionDriver,
};
use sumblocks::core::GameSnapshot;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = DriverConfig::from_env();
    let driver = SessionDriver::spawn(config);
    let result = run(&driver).await;

    driver.shutdown().await?;
    result
}

async fn run(driver: &SessionDriver) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = driver.subscribe();
    let mut out = Output {
        stdout: tokio::io::stdout(),
        seq: 0,
    };

    let initial = updates.borrow_and_update().clone();
    out.observation(&initial).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let sent = match parse_message(&line) {
                    Ok(ClientMessage::Toggle { row, col }) => {
                        driver.toggle(row, col).await.map(drop)
                    }
                    Ok(ClientMessage::Reset { mode }) => driver.reset(mode.into()).await,
                    Ok(ClientMessage::Snapshot) => {
                        out.observation(&driver.snapshot()).await?;
                        Ok(())
                    }
                    Ok(ClientMessage::Quit) => break,
                    Err(e) => {
                        log::warn!("rejected line: {}", e);
                        out.error(&e).await?;
                        Ok(())
                    }
                };
                if let Err(e) = sent {
                    log::error!("{}", e);
                    out.stopped(&e.to_string()).await?;
                    break;
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = updates.borrow_and_update().clone();
                out.observation(&snap).await?;
            }
        }
    }

    Ok(())
}

struct Output {
    stdout: Stdout,
    seq: u64,
}

impl Output {
    async fn observation(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.seq += 1;
        let line = serde_json::to_string(&build_observation(self.seq, snap))?;
        self.write_line(&line).await
    }

    async fn error(&mut self, err: &ProtocolError) -> Result<()> {
        self.seq += 1;
        let msg = create_error(self.seq, err.code(), &err.to_string());
        let line = serde_json::to_string(&msg)?;
        self.write_line(&line).await
    }

    async fn stopped(&mut self, reason: &str) -> Result<()> {
        self.seq += 1;
        let line = serde_json::to_string(&create_stopped_error(self.seq, reason))?;
        self.write_line(&line).await
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }
}
