//! Protocol module - JSON message types for the line driver
//!
//! One JSON object per line in each direction. Every inbound message carries a
//! `type` tag; outbound messages carry `type`, `seq` (sequence number), and `ts`
//! (timestamp in ms).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sumblocks_core::GameSnapshot;

use crate::types::{GameMode, Resolution, Tile, TileStyle, GRID_COLS, GRID_ROWS};

// ============== Client -> Game Messages ==============

/// Mode name on the wire. `"time"` is accepted as an alias of `"timed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeName {
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "timed", alias = "time")]
    Timed,
}

impl From<ModeName> for GameMode {
    fn from(value: ModeName) -> Self {
        match value {
            ModeName::Classic => GameMode::Classic,
            ModeName::Timed => GameMode::Timed,
        }
    }
}

impl From<GameMode> for ModeName {
    fn from(value: GameMode) -> Self {
        match value {
            GameMode::Classic => ModeName::Classic,
            GameMode::Timed => ModeName::Timed,
        }
    }
}

/// Inbound message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "toggle")]
    Toggle { row: usize, col: usize },
    #[serde(rename = "reset")]
    Reset { mode: ModeName },
    #[serde(rename = "snapshot")]
    Snapshot,
    #[serde(rename = "quit")]
    Quit,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::Empty | ProtocolError::Malformed(_) => ErrorCode::InvalidMessage,
        }
    }
}

/// Parse one inbound line.
pub fn parse_message(line: &str) -> Result<ClientMessage, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "driver_stopped")]
    DriverStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleName {
    #[serde(rename = "rose")]
    Rose,
    #[serde(rename = "blue")]
    Blue,
    #[serde(rename = "emerald")]
    Emerald,
    #[serde(rename = "amber")]
    Amber,
    #[serde(rename = "violet")]
    Violet,
    #[serde(rename = "cyan")]
    Cyan,
    #[serde(rename = "orange")]
    Orange,
}

impl From<TileStyle> for StyleName {
    fn from(value: TileStyle) -> Self {
        match value {
            TileStyle::Rose => StyleName::Rose,
            TileStyle::Blue => StyleName::Blue,
            TileStyle::Emerald => StyleName::Emerald,
            TileStyle::Amber => StyleName::Amber,
            TileStyle::Violet => StyleName::Violet,
            TileStyle::Cyan => StyleName::Cyan,
            TileStyle::Orange => StyleName::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: u64,
    pub value: u8,
    pub style: StyleName,
}

impl From<Tile> for TileView {
    fn from(value: Tile) -> Self {
        Self {
            id: value.id.0,
            value: value.value,
            style: value.style.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionView {
    pub row: usize,
    pub col: usize,
}

/// Most recent toggle outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LastEvent {
    #[serde(rename = "ignored")]
    Ignored,
    #[serde(rename = "accumulating")]
    Accumulating { sum: u32 },
    #[serde(rename = "matched")]
    Matched {
        sum: u32,
        tiles: u32,
        points: u32,
        combo: u32,
        row_injected: bool,
        game_over: bool,
    },
    #[serde(rename = "overshoot")]
    Overshoot { sum: u32 },
}

impl From<Resolution> for LastEvent {
    fn from(value: Resolution) -> Self {
        match value {
            Resolution::Ignored => LastEvent::Ignored,
            Resolution::Accumulating { sum } => LastEvent::Accumulating { sum },
            Resolution::Matched(m) => LastEvent::Matched {
                sum: m.sum,
                tiles: m.tiles,
                points: m.points,
                combo: m.combo,
                row_injected: m.row_injected,
                game_over: m.game_over,
            },
            Resolution::Overshoot { sum } => LastEvent::Overshoot { sum },
        }
    }
}

/// Game state observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    pub game_over: bool,
    pub mode: ModeName,
    pub epoch: u32,
    pub target: u32,
    pub current_sum: u32,
    pub score: u32,
    pub combo: u32,
    pub time_left: u32,
    /// Row 0 first; `null` for empty cells
    pub grid: [[Option<TileView>; GRID_COLS]; GRID_ROWS],
    pub selection: Vec<PositionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LastEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Build an observation from a snapshot
pub fn build_observation(seq: u64, snap: &GameSnapshot) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snap.playable(),
        game_over: snap.game_over,
        mode: snap.mode.into(),
        epoch: snap.epoch,
        target: snap.target,
        current_sum: snap.current_sum,
        score: snap.score,
        combo: snap.combo,
        time_left: snap.time_left,
        grid: snap.grid.map(|row| row.map(|cell| cell.map(TileView::from))),
        selection: snap
            .selection
            .iter()
            .map(|p| PositionView {
                row: p.row(),
                col: p.col(),
            })
            .collect(),
        last_event: snap.last_resolution.map(LastEvent::from),
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Final message when the session driver is no longer accepting commands
pub fn create_stopped_error(seq: u64, reason: &str) -> ErrorMessage {
    create_error(seq, ErrorCode::DriverStopped, reason)
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumblocks_core::Session;

    #[test]
    fn test_parse_toggle() {
        let msg = parse_message(r#"{"type":"toggle","row":9,"col":3}"#).unwrap();
        assert_eq!(msg, ClientMessage::Toggle { row: 9, col: 3 });
    }

    #[test]
    fn test_parse_reset_accepts_time_alias() {
        let msg = parse_message(r#"{"type":"reset","mode":"time"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Reset {
                mode: ModeName::Timed
            }
        );
        assert_eq!(GameMode::from(ModeName::Timed), GameMode::Timed);
    }

    #[test]
    fn test_parse_unit_messages() {
        assert_eq!(
            parse_message(r#"{"type":"snapshot"}"#).unwrap(),
            ClientMessage::Snapshot
        );
        assert_eq!(parse_message(" {\"type\":\"quit\"} ").unwrap(), ClientMessage::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_message("   "), Err(ProtocolError::Empty)));
        let err = parse_message(r#"{"type":"toggle","row":-1,"col":0}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidMessage);
        assert!(parse_message(r#"{"type":"reset","mode":"zen"}"#).is_err());
        assert!(parse_message(r#"{"type":"explode"}"#).is_err());
    }

    #[test]
    fn test_observation_serialization() {
        let session = Session::new(3, GameMode::Timed);
        let obs = build_observation(7, &session.snapshot());
        let json = serde_json::to_value(&obs).unwrap();

        assert_eq!(json["type"], "observation");
        assert_eq!(json["seq"], 7);
        assert_eq!(json["mode"], "timed");
        assert_eq!(json["score"], 0);
        assert_eq!(json["grid"].as_array().unwrap().len(), GRID_ROWS);
        assert!(json["grid"][0][0].is_null());
        assert!(json["grid"][GRID_ROWS - 1][0]["value"].is_u64());
        assert!(json.get("last_event").is_none());
    }

    #[test]
    fn test_last_event_tagging() {
        let ev = LastEvent::from(Resolution::Overshoot { sum: 12 });
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"kind":"overshoot","sum":12}"#);
    }

    #[test]
    fn test_create_error() {
        let err = create_error(4, ErrorCode::InvalidMessage, "bad line");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "invalid_message");
        assert_eq!(json["message"], "bad line");
    }

    #[test]
    fn test_stopped_error() {
        let err = create_stopped_error(9, "session driver stopped");
        assert_eq!(err.code, ErrorCode::DriverStopped);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "driver_stopped");
        assert_eq!(json["seq"], 9);
    }

    #[test]
    fn test_last_event_kind_matches_resolution_name() {
        let report = crate::types::MatchReport {
            sum: 10,
            tiles: 2,
            points: 20,
            combo: 1,
            row_injected: true,
            game_over: false,
        };
        for r in [
            Resolution::Ignored,
            Resolution::Accumulating { sum: 4 },
            Resolution::Matched(report),
            Resolution::Overshoot { sum: 12 },
        ] {
            let json = serde_json::to_value(LastEvent::from(r)).unwrap();
            assert_eq!(json["kind"], r.as_str());
        }
    }
}
