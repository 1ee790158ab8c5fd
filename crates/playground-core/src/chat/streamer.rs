//! Response Streamer: one inference request, one lazy fragment sequence.
//!
//! State machine for a single invocation:
//!
//! ```text
//! IDLE -> REQUESTING -> STREAMING -> COMPLETED
//!              |             |
//!              +-> FAILED <--+
//! ```
//!
//! `REQUESTING` is entered by [`ResponseStreamer::start`]. It moves to
//! `STREAMING` on the provider's stream-open acknowledgment or the first
//! fragment, and to `FAILED` on an authentication or connection error.
//! Terminal states are final; a streamer is never reused.

use std::fmt;
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, Span, debug, info, info_span, warn};

use playground_types::error::ChatError;
use playground_types::llm::{CompletionRequest, LlmError, Message, StopReason, StreamEvent, Usage};

use crate::llm::provider::{DynInferenceProvider, EventStream};

/// Lifecycle of one streamer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

impl StreamState {
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamState::Completed | StreamState::Failed)
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Idle => write!(f, "idle"),
            StreamState::Requesting => write!(f, "requesting"),
            StreamState::Streaming => write!(f, "streaming"),
            StreamState::Completed => write!(f, "completed"),
            StreamState::Failed => write!(f, "failed"),
        }
    }
}

/// The assistant's in-progress reply. Not a turn until committed.
#[derive(Debug, Clone, Default)]
pub struct StreamingDraft {
    text: String,
    fragments: usize,
}

impl StreamingDraft {
    fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.fragments += 1;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// What the provider reported about a finished (or failed) invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamStats {
    pub usage: Option<Usage>,
    pub stop_reason: Option<StopReason>,
    pub fragments: usize,
    pub elapsed: Duration,
}

/// Check a credential locally so bad tokens never reach the network.
///
/// Rejects blank tokens and tokens containing characters that cannot be
/// carried in an `Authorization` header.
pub fn validate_credential(credential: &SecretString) -> Result<(), ChatError> {
    let raw = credential.expose_secret();
    if raw.trim().is_empty() {
        return Err(ChatError::Authentication(
            "no inference token configured".to_string(),
        ));
    }
    if !raw.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ChatError::Authentication(
            "inference token contains whitespace or non-ASCII characters".to_string(),
        ));
    }
    Ok(())
}

/// Pull-based driver for a single streaming chat completion.
pub struct ResponseStreamer {
    provider: DynInferenceProvider,
    state: StreamState,
    inner: Option<EventStream>,
    draft: StreamingDraft,
    usage: Option<Usage>,
    stop_reason: Option<StopReason>,
    started_at: Option<Instant>,
    span: Span,
}

impl ResponseStreamer {
    pub fn new(provider: DynInferenceProvider) -> Self {
        Self {
            provider,
            state: StreamState::Idle,
            inner: None,
            draft: StreamingDraft::default(),
            usage: None,
            stop_reason: None,
            started_at: None,
            span: Span::none(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn draft(&self) -> &StreamingDraft {
        &self.draft
    }

    /// Begin the invocation: `IDLE -> REQUESTING`.
    ///
    /// Fails fast with [`ChatError::Authentication`] (and moves to `FAILED`)
    /// if the credential is unusable; the provider is not called in that case.
    /// The request itself is sent lazily on the first [`Self::next_fragment`].
    pub fn start(
        &mut self,
        model: &str,
        history: Vec<Message>,
        credential: &SecretString,
        max_tokens: u32,
    ) -> Result<(), ChatError> {
        if self.state != StreamState::Idle {
            return Err(ChatError::InvalidState(format!(
                "streamer cannot be started from state '{}'",
                self.state
            )));
        }

        self.state = StreamState::Requesting;
        self.started_at = Some(Instant::now());

        if let Err(err) = validate_credential(credential) {
            warn!(error = %err, "Rejecting inference request before sending");
            self.state = StreamState::Failed;
            return Err(err);
        }

        self.span = info_span!(
            "gen_ai.stream",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %model,
            gen_ai.request.max_tokens = max_tokens,
            gen_ai.request.messages = history.len(),
        );

        let request = CompletionRequest {
            model: model.to_string(),
            messages: history,
            max_tokens,
            stream: true,
        };

        debug!(parent: &self.span, "Opening inference stream");
        self.inner = Some(self.provider.stream(request, credential));
        Ok(())
    }

    /// Pull the next text fragment.
    ///
    /// - `Some(Ok(fragment))`: a fragment arrived; it is already in the draft.
    /// - `Some(Err(e))`: the invocation failed; the streamer is now `FAILED`.
    /// - `None`: the stream is finished (or was already terminal).
    pub async fn next_fragment(&mut self) -> Option<Result<String, ChatError>> {
        if self.state.is_terminal() {
            return None;
        }
        if self.state == StreamState::Idle {
            return Some(Err(ChatError::InvalidState(
                "streamer has not been started".to_string(),
            )));
        }

        loop {
            let span = self.span.clone();
            let item = match self.inner.as_mut() {
                Some(stream) => stream.next().instrument(span).await,
                None => None,
            };

            match item {
                Some(Ok(StreamEvent::Connected)) => self.enter_streaming(),
                Some(Ok(StreamEvent::TextDelta { text })) => {
                    if text.is_empty() {
                        continue;
                    }
                    self.enter_streaming();
                    self.draft.push(&text);
                    return Some(Ok(text));
                }
                Some(Ok(StreamEvent::MessageDelta { stop_reason })) => {
                    self.stop_reason = Some(stop_reason);
                }
                Some(Ok(StreamEvent::Usage(usage))) => self.usage = Some(usage),
                Some(Ok(StreamEvent::Done)) | None => {
                    self.complete();
                    return None;
                }
                Some(Err(err)) => return Some(Err(self.fail(err))),
            }
        }
    }

    /// Consume the streamer, handing back the draft and what was observed.
    pub fn into_parts(self) -> (StreamingDraft, StreamStats) {
        let stats = StreamStats {
            usage: self.usage,
            stop_reason: self.stop_reason,
            fragments: self.draft.fragment_count(),
            elapsed: self
                .started_at
                .map(|t| t.elapsed())
                .unwrap_or_default(),
        };
        (self.draft, stats)
    }

    fn enter_streaming(&mut self) {
        if self.state == StreamState::Requesting {
            debug!(parent: &self.span, "Inference stream open");
            self.state = StreamState::Streaming;
        }
    }

    fn complete(&mut self) {
        self.state = StreamState::Completed;
        self.inner = None;
        info!(
            parent: &self.span,
            fragments = self.draft.fragment_count(),
            chars = self.draft.text().len(),
            stop_reason = ?self.stop_reason,
            "Inference stream completed"
        );
    }

    fn fail(&mut self, err: LlmError) -> ChatError {
        let error = match (self.state, err) {
            (StreamState::Requesting, LlmError::AuthenticationFailed) => ChatError::Authentication(
                "inference token was rejected by the service".to_string(),
            ),
            (_, err) => ChatError::StreamFailure {
                message: err.to_string(),
                partial: self.draft.text().to_string(),
            },
        };

        warn!(
            parent: &self.span,
            state = %self.state,
            fragments = self.draft.fragment_count(),
            error = %error,
            "Inference stream failed"
        );

        self.state = StreamState::Failed;
        self.inner = None;
        error
    }
}
