//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
