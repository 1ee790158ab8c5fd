//! Business logic and port definitions for LLM Playground.
//!
//! This crate owns the chat-session state machine (session store, response
//! streamer, chat service) and defines the "ports" that the infrastructure
//! layer implements: the inference provider and secret providers. It depends
//! only on `playground-types` -- never on `playground-infra` or any network
//! crate.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
