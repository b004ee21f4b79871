//! Board persistence on top of a key-value store.
//!
//! # Responsibility
//! - Encode the committed board into a versioned JSON envelope.
//! - Load the persisted board, falling back to the default board.
//!
//! # Invariants
//! - Only `tasks`, `columns` and `columnOrder` are persisted; history never is.
//! - Read paths reject boards that fail `Board::validate()`.
//! - Loading never fails: every read problem degrades to the default board.

use super::kv_repo::{KeyValueStore, KvError};
use crate::model::board::{Board, BoardInvariantError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Envelope version written by this binary.
pub const BOARD_ENVELOPE_VERSION: u32 = 0;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    state: &'a Board,
    version: u32,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    state: Board,
    version: u32,
}

/// Reasons a persisted blob cannot become a board.
#[derive(Debug)]
pub enum BoardDecodeError {
    Json(serde_json::Error),
    UnsupportedVersion(u32),
    Invalid(BoardInvariantError),
}

impl Display for BoardDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed board blob: {err}"),
            Self::UnsupportedVersion(version) => write!(
                f,
                "board blob version {version} is not supported (expected {BOARD_ENVELOPE_VERSION})"
            ),
            Self::Invalid(err) => write!(f, "persisted board is inconsistent: {err}"),
        }
    }
}

impl Error for BoardDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnsupportedVersion(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Failure to write the board blob.
#[derive(Debug)]
pub enum BoardSaveError {
    Encode(serde_json::Error),
    Kv(KvError),
}

impl Display for BoardSaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "cannot encode board: {err}"),
            Self::Kv(err) => write!(f, "cannot store board: {err}"),
        }
    }
}

impl Error for BoardSaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<KvError> for BoardSaveError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Where the board returned by [`load_board`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSource {
    /// Decoded from the persisted slot.
    Persisted,
    /// Slot was empty.
    DefaultEmpty,
    /// Slot could not be read or decoded.
    DefaultRecovered,
}

/// Serializes a board into the persisted envelope.
pub fn encode_board(board: &Board) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeOut {
        state: board,
        version: BOARD_ENVELOPE_VERSION,
    })
}

/// Parses and validates a persisted envelope.
pub fn decode_board(raw: &str) -> Result<Board, BoardDecodeError> {
    let envelope: EnvelopeIn = serde_json::from_str(raw).map_err(BoardDecodeError::Json)?;
    if envelope.version != BOARD_ENVELOPE_VERSION {
        return Err(BoardDecodeError::UnsupportedVersion(envelope.version));
    }
    envelope
        .state
        .validate()
        .map_err(BoardDecodeError::Invalid)?;
    Ok(envelope.state)
}

/// Loads the board stored under `key`, or the default board.
pub fn load_board(kv: &impl KeyValueStore, key: &str) -> (Board, BoardSource) {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=board_load module=repo status=empty key={key}");
            return (Board::default_board(), BoardSource::DefaultEmpty);
        }
        Err(err) => {
            warn!(
                "event=board_load module=repo status=fallback key={key} error_code=kv_read_failed error={err}"
            );
            return (Board::default_board(), BoardSource::DefaultRecovered);
        }
    };

    match decode_board(&raw) {
        Ok(board) => {
            info!(
                "event=board_load module=repo status=ok key={key} columns={} tasks={}",
                board.columns.len(),
                board.tasks.len()
            );
            (board, BoardSource::Persisted)
        }
        Err(err) => {
            warn!(
                "event=board_load module=repo status=fallback key={key} error_code=board_decode_failed error={err}"
            );
            (Board::default_board(), BoardSource::DefaultRecovered)
        }
    }
}

/// Writes `board` under `key`, replacing the previous blob.
pub fn save_board(
    kv: &mut impl KeyValueStore,
    key: &str,
    board: &Board,
) -> Result<(), BoardSaveError> {
    let raw = encode_board(board).map_err(BoardSaveError::Encode)?;
    kv.set(key, &raw)?;
    Ok(())
}
