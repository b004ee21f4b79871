//! Persistence layer: key-value blob storage and board encoding.
//!
//! # Responsibility
//! - Define the key-value contract the board service writes through.
//! - Isolate SQLite and JSON details from the store and service layers.
//!
//! # Invariants
//! - Storage errors are reported, never turned into panics.
//! - Persisted boards pass referential-integrity checks before use.

pub mod board_repo;
pub mod kv_repo;
