//! Chat service: one user message in, one streamed reply out.
//!
//! `ChatService::send` runs the per-turn pipeline:
//!
//! 1. validate and commit the user turn
//! 2. run one [`ResponseStreamer`] over the session history
//! 3. forward every fragment to the [`DisplaySink`]
//! 4. commit the assistant turn (or the partial, per [`PartialCommitPolicy`])

use secrecy::SecretString;
use tracing::{debug, info, warn};

use playground_types::chat::{MessageRole, Turn};
use playground_types::config::PartialCommitPolicy;
use playground_types::error::ChatError;

use super::display::DisplaySink;
use super::session::Session;
use super::streamer::{ResponseStreamer, StreamStats};
use crate::llm::provider::DynInferenceProvider;

/// Result of one [`ChatService::send`] that got as far as sending a request.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The stream ran to completion and the reply was committed.
    Completed { turn: Turn, stats: StreamStats },
    /// The stream failed. `committed` is the partial reply, if the policy
    /// kept one.
    Failed {
        error: ChatError,
        committed: Option<Turn>,
        stats: StreamStats,
    },
}

impl TurnOutcome {
    pub fn error(&self) -> Option<&ChatError> {
        match self {
            TurnOutcome::Completed { .. } => None,
            TurnOutcome::Failed { error, .. } => Some(error),
        }
    }

    /// The assistant turn this outcome added to the session, if any.
    pub fn committed(&self) -> Option<&Turn> {
        match self {
            TurnOutcome::Completed { turn, .. } => Some(turn),
            TurnOutcome::Failed { committed, .. } => committed.as_ref(),
        }
    }
}

/// Holds everything a turn needs besides the session itself.
pub struct ChatService {
    provider: DynInferenceProvider,
    credential: SecretString,
    model: String,
    max_tokens: u32,
    partial_commit: PartialCommitPolicy,
}

impl ChatService {
    pub fn new(
        provider: DynInferenceProvider,
        credential: SecretString,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            credential,
            model: model.into(),
            max_tokens,
            partial_commit: PartialCommitPolicy::default(),
        }
    }

    pub fn with_partial_commit(mut self, policy: PartialCommitPolicy) -> Self {
        self.partial_commit = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Switch the model used for subsequent turns. Existing turns are kept.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
        info!(model = %self.model, "Model switched");
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn partial_commit(&self) -> PartialCommitPolicy {
        self.partial_commit
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one chat turn.
    ///
    /// Returns `Err` only when the user turn itself is rejected (nothing is
    /// committed and the sink is not notified). Every other failure,
    /// authentication included, comes back as [`TurnOutcome::Failed`] with
    /// the user turn already committed.
    pub async fn send<S>(
        &self,
        session: &mut Session,
        text: &str,
        sink: &mut S,
    ) -> Result<TurnOutcome, ChatError>
    where
        S: DisplaySink + ?Sized,
    {
        session.commit(MessageRole::User, text)?;
        debug!(session_id = %session.id(), turns = session.len(), "User turn committed");

        let mut streamer = ResponseStreamer::new(self.provider.clone());
        sink.on_request_started();

        let mut failure = streamer
            .start(
                &self.model,
                session.history(),
                &self.credential,
                self.max_tokens,
            )
            .err();

        if failure.is_none() {
            while let Some(item) = streamer.next_fragment().await {
                match item {
                    Ok(fragment) => sink.on_fragment(&fragment),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
        }

        let (draft, stats) = streamer.into_parts();

        let outcome = match failure {
            None => {
                let turn = session
                    .commit(MessageRole::Assistant, draft.into_text())?
                    .clone();
                info!(
                    fragments = stats.fragments,
                    chars = turn.content().len(),
                    "Assistant turn committed"
                );
                TurnOutcome::Completed { turn, stats }
            }
            Some(error) => {
                let keep = matches!(error, ChatError::StreamFailure { .. })
                    && self.partial_commit == PartialCommitPolicy::Commit
                    && !draft.is_empty();

                let committed = if keep {
                    let turn = session
                        .commit(MessageRole::Assistant, draft.into_text())?
                        .clone();
                    warn!(chars = turn.content().len(), "Committed partial reply after stream failure");
                    Some(turn)
                } else {
                    None
                };

                TurnOutcome::Failed {
                    error,
                    committed,
                    stats,
                }
            }
        };

        sink.on_finished(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use playground_types::llm::{LlmError, Message};

    use crate::chat::display::NullSink;

    use crate::llm::testing::{ScriptedProvider, test_credential};

    #[derive(Default)]
    struct RecordingSink {
        started: usize,
        fragments: Vec<String>,
        finished: usize,
    }

    impl DisplaySink for RecordingSink {
        fn on_request_started(&mut self) {
            self.started += 1;
        }

        fn on_fragment(&mut self, fragment: &str) {
            self.fragments.push(fragment.to_string());
        }

        fn on_finished(&mut self, _outcome: &TurnOutcome) {
            self.finished += 1;
        }
    }

    fn service(provider: Arc<ScriptedProvider>) -> ChatService {
        ChatService::new(provider, test_credential(), "test-model", 500)
    }

    #[tokio::test]
    async fn test_completed_turn_commits_full_reply() {
        let provider = Arc::new(ScriptedProvider::completing(&["Hello", ", ", "world"]));
        let svc = service(provider);
        let mut session = Session::new();
        let mut sink = RecordingSink::default();

        let outcome = svc.send(&mut session, "Hi", &mut sink).await.unwrap();

        assert!(matches!(outcome, TurnOutcome::Completed { .. }));
        assert_eq!(session.len(), 2);
        assert_eq!(session.turns()[1].role(), MessageRole::Assistant);
        assert_eq!(session.turns()[1].content(), "Hello, world");
        assert_eq!(sink.fragments, vec!["Hello", ", ", "world"]);
        assert_eq!((sink.started, sink.finished), (1, 1));
    }

    #[tokio::test]
    async fn test_partial_committed_on_failure_by_default() {
        let provider = Arc::new(ScriptedProvider::failing_after(&["Partial"], "connection reset"));
        let svc = service(provider);
        let mut session = Session::new();

        let outcome = svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        match &outcome {
            TurnOutcome::Failed { error, committed, .. } => {
                assert!(matches!(error, ChatError::StreamFailure { .. }));
                assert_eq!(committed.as_ref().map(Turn::content), Some("Partial"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(session.len(), 2);
        assert_eq!(session.turns()[1].content(), "Partial");
    }

    #[tokio::test]
    async fn test_partial_discarded_with_discard_policy() {
        let provider = Arc::new(ScriptedProvider::failing_after(&["Partial"], "connection reset"));
        let svc = service(provider).with_partial_commit(PartialCommitPolicy::Discard);
        let mut session = Session::new();

        let outcome = svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        assert!(outcome.committed().is_none());
        assert_eq!(session.len(), 1);
        assert_eq!(session.turns()[0].content(), "Hi");
    }

    #[tokio::test]
    async fn test_failure_before_any_fragment_commits_nothing() {
        let provider = Arc::new(ScriptedProvider::failing_after(&[], "service unavailable"));
        let svc = service(provider);
        let mut session = Session::new();

        let outcome = svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        assert!(outcome.committed().is_none());
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_credential_reaches_no_provider() {
        let provider = Arc::new(ScriptedProvider::completing(&["never"]));
        let svc = ChatService::new(provider.clone(), SecretString::from(" "), "m", 500);
        let mut session = Session::new();
        let mut sink = RecordingSink::default();

        let outcome = svc.send(&mut session, "Hi", &mut sink).await.unwrap();

        assert!(matches!(
            outcome.error(),
            Some(ChatError::Authentication(_))
        ));
        assert!(sink.fragments.is_empty());
        assert_eq!(provider.calls(), 0);
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_auth_rejection_commits_only_user_turn() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(LlmError::AuthenticationFailed)]));
        let svc = service(provider);
        let mut session = Session::new();

        let outcome = svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        assert!(matches!(outcome.error(), Some(ChatError::Authentication(_))));
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_history_sent_is_exactly_the_user_turn() {
        let provider = Arc::new(ScriptedProvider::completing(&["Hello!"]));
        let svc = service(provider.clone());
        let mut session = Session::new();

        svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.messages, vec![Message::user("Hi")]);
        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, 500);
        // Committing the reply left the user turn untouched.
        assert_eq!(session.turns()[0].content(), "Hi");
        assert_eq!(session.turns()[0].role(), MessageRole::User);
    }

    #[tokio::test]
    async fn test_empty_user_message_rejected_without_side_effects() {
        let provider = Arc::new(ScriptedProvider::completing(&["never"]));
        let svc = service(provider.clone());
        let mut session = Session::new();
        let mut sink = RecordingSink::default();

        let err = svc.send(&mut session, "  \n", &mut sink).await.unwrap_err();

        assert!(matches!(err, ChatError::InvalidTurn(_)));
        assert!(session.is_empty());
        assert_eq!((sink.started, sink.finished), (0, 0));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_fragment_completion_commits_empty_reply() {
        let provider = Arc::new(ScriptedProvider::completing(&[]));
        let svc = service(provider);
        let mut session = Session::new();

        svc.send(&mut session, "Hi", &mut NullSink).await.unwrap();

        assert_eq!(session.len(), 2);
        assert_eq!(session.turns()[1].content(), "");
    }

    #[tokio::test]
    async fn test_set_model_applies_to_next_turn() {
        let provider = Arc::new(ScriptedProvider::completing(&["ok"]));
        let mut svc = service(provider.clone());
        svc.set_model("mistralai/Mistral-7B-Instruct-v0.1");
        let mut session = Session::new();

        svc.send(&mut session, "Hi", &mut RecordingSink::default()).await.unwrap();

        assert_eq!(
            provider.last_request().unwrap().model,
            "mistralai/Mistral-7B-Instruct-v0.1"
        );
    }
}
