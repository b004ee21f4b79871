//! Core domain logic for the kanban board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardInvariantError};
pub use model::column::{Column, ColumnId};
pub use model::task::{Task, TaskId, TaskPatch};
pub use repo::board_repo::{decode_board, encode_board, load_board, save_board, BoardSource};
pub use repo::kv_repo::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use search::filter::{build_view, BoardView, ColumnView};
pub use service::board_service::{BoardService, ServiceError, ServiceResult};
pub use store::{
    DragLocation, DropResult, History, KanbanStore, StoreError, StoreErrorKind, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
