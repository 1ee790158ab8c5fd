//! Inference provider implementations.

pub mod huggingface;
