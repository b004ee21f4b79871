//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kanban_core` linkage.
//! - Print the layout of a persisted board for quick local inspection.
//!
//! Usage: `kanban_cli [db_path]` (falls back to `KANBAN_DB_PATH`).

use kanban_core::db::open_db;
use kanban_core::{BoardService, SqliteKeyValueStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    let Some(db_path) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("KANBAN_DB_PATH").ok())
        .filter(|path| !path.trim().is_empty())
    else {
        return ExitCode::SUCCESS;
    };

    match print_board(db_path.trim()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("kanban_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open {db_path}: {err}"))?;
    let kv = SqliteKeyValueStore::try_new(conn).map_err(|err| err.to_string())?;
    let service = BoardService::open(kv, StoreConfig::from_env());

    println!("board source={:?}", service.loaded_from());
    for column in service.view("").columns {
        println!("[{}] {} ({})", column.id, column.title, column.tasks.len());
        for task in column.tasks {
            println!("  - {} {}", task.id, task.title);
        }
    }
    Ok(())
}
