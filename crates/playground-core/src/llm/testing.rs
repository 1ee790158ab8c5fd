//! Scripted provider used by the chat tests in place of a live endpoint.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::SecretString;

use playground_types::llm::{CompletionRequest, LlmError, StreamEvent};

use super::provider::{EventStream, InferenceProvider};

pub(crate) struct ScriptedProvider {
    script: Mutex<Option<Vec<Result<StreamEvent, LlmError>>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new(script: Vec<Result<StreamEvent, LlmError>>) -> Self {
        Self {
            script: Mutex::new(Some(script)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// `Connected`, one `TextDelta` per fragment, then `Done`.
    pub(crate) fn completing(fragments: &[&str]) -> Self {
        let mut script = vec![Ok(StreamEvent::Connected)];
        script.extend(fragments.iter().map(|f| {
            Ok(StreamEvent::TextDelta {
                text: (*f).to_string(),
            })
        }));
        script.push(Ok(StreamEvent::Done));
        Self::new(script)
    }

    /// `Connected`, one `TextDelta` per fragment, then a stream error.
    pub(crate) fn failing_after(fragments: &[&str], message: &str) -> Self {
        let mut script = vec![Ok(StreamEvent::Connected)];
        script.extend(fragments.iter().map(|f| {
            Ok(StreamEvent::TextDelta {
                text: (*f).to_string(),
            })
        }));
        script.push(Err(LlmError::Stream(message.to_string())));
        Self::new(script)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl InferenceProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn stream(&self, request: CompletionRequest, _credential: &SecretString) -> EventStream {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        let script = self.script.lock().unwrap().take().unwrap_or_default();
        Box::pin(futures_util::stream::iter(script))
    }
}

pub(crate) fn test_credential() -> SecretString {
    SecretString::from("hf_test_token_not_real")
}
