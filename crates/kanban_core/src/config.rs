//! Runtime configuration for the board store.
//!
//! # Invariants
//! - Defaults match the shipped UI: ten undo steps, `kanban-storage` slot.
//! - Invalid environment overrides are ignored, never fatal.

use log::warn;

/// Default number of snapshots kept per history direction.
pub const DEFAULT_MAX_HISTORY: usize = 10;
/// Default key-value slot holding the persisted board.
pub const DEFAULT_STORAGE_KEY: &str = "kanban-storage";
/// Environment variable overriding [`StoreConfig::max_history`].
pub const HISTORY_DEPTH_ENV: &str = "KANBAN_HISTORY_DEPTH";

/// Store and persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum entries in each of `past` and `future`.
    pub max_history: usize,
    /// Key under which the board blob is persisted.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds defaults, then applies `KANBAN_HISTORY_DEPTH` when it parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(HISTORY_DEPTH_ENV) {
            match parse_history_depth(&raw) {
                Some(depth) => config.max_history = depth,
                None => warn!(
                    "event=config_load module=config status=ignored key={HISTORY_DEPTH_ENV} value={}",
                    raw.trim()
                ),
            }
        }
        config
    }

    /// Returns a copy with a different history depth.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

fn parse_history_depth(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}
