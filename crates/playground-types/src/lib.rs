//! Shared domain types for LLM Playground.
//!
//! This crate contains the core domain types used across the playground:
//! chat turns, inference request/stream types, configuration, and the
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod secret;
