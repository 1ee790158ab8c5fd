//! Infrastructure layer for LLM Playground.
//!
//! Contains implementations of the ports defined in `playground-core`:
//! the Hugging Face inference provider, secret backends (environment, OS
//! keychain, `secrets.toml`), config loading, and filesystem helpers.

pub mod config;
pub mod filesystem;
pub mod keychain;
pub mod llm;
pub mod secret;
