//! Inference provider abstraction.
//!
//! - `InferenceProvider`: object-safe trait for concrete provider backends
//! - `DynInferenceProvider`: shared handle used by the chat layer

pub mod provider;

#[cfg(test)]
pub(crate) mod testing;
