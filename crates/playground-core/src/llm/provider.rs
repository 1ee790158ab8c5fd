//! InferenceProvider trait definition.
//!
//! This is the core abstraction that hosted-inference backends implement.
//! The only operation is a streaming chat completion, so the trait is
//! object-safe as written and is shared behind an `Arc`.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::Stream;
use secrecy::SecretString;

use playground_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// A boxed, single-pass stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for hosted inference backends.
///
/// Implementations live in playground-infra (e.g., `HuggingFaceProvider`).
pub trait InferenceProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Open a streaming chat completion.
    ///
    /// The returned stream must be lazy: no network traffic happens until it
    /// is first polled, and exactly one request is made per call. The stream
    /// should emit `Connected` once the provider has accepted the request,
    /// then `TextDelta`s in arrival order, and finally `Done`.
    fn stream(&self, request: CompletionRequest, credential: &SecretString) -> EventStream;
}

/// Shared handle to a type-erased provider, for runtime provider selection.
pub type DynInferenceProvider = Arc<dyn InferenceProvider>;
