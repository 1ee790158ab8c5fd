//! Hugging Face inference provider.
//!
//! The Hugging Face router speaks the OpenAI chat-completions protocol, so
//! [`HuggingFaceProvider`] is built on [`async_openai`] for request types and
//! SSE streaming. The credential is supplied per request, which means a
//! client is assembled for each stream.

pub mod config;
pub mod streaming;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionStreamOptions,
    CreateChatCompletionRequest,
};
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use playground_core::llm::provider::{EventStream, InferenceProvider};
use playground_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use self::config::{HuggingFaceConfig, huggingface_defaults};
use self::streaming::map_openai_stream;

/// Streaming chat provider for the Hugging Face inference router.
pub struct HuggingFaceProvider {
    provider_name: String,
    base_url: String,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Self {
        Self {
            provider_name: config.provider_name,
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self, credential: &SecretString) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(credential.expose_secret())
            .with_api_base(&self.base_url);
        Client::with_config(config)
    }
}

impl Default for HuggingFaceProvider {
    fn default() -> Self {
        Self::new(huggingface_defaults())
    }
}

/// Build a streaming [`CreateChatCompletionRequest`] from a [`CompletionRequest`].
///
/// Uses the legacy `max_tokens` field, which the Hugging Face router honors
/// for every hosted model.
#[allow(deprecated)]
pub fn build_request(request: &CompletionRequest) -> CreateChatCompletionRequest {
    let messages = request.messages.iter().map(to_openai_message).collect();

    CreateChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_tokens: Some(request.max_tokens),
        stream: Some(true),
        stream_options: Some(ChatCompletionStreamOptions {
            include_usage: Some(true),
            include_obfuscation: None,
        }),
        ..Default::default()
    }
}

#[allow(deprecated)]
fn to_openai_message(msg: &Message) -> ChatCompletionRequestMessage {
    match msg.role {
        MessageRole::User => {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                name: None,
            })
        }
        MessageRole::Assistant => {
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    msg.content.clone(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

impl InferenceProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn stream(&self, request: CompletionRequest, credential: &SecretString) -> EventStream {
        let oai_request = build_request(&request);
        let client = self.client(credential);

        Box::pin(async_stream::try_stream! {
            debug!(model = %oai_request.model, messages = oai_request.messages.len(), "POST chat/completions");

            let oai_stream = client
                .chat()
                .create_stream(oai_request)
                .await
                .map_err(map_openai_error)?;

            let mut inner = Box::pin(map_openai_stream(oai_stream));
            while let Some(event) = inner.next().await {
                yield event?;
            }
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
pub(crate) fn map_openai_error(err: OpenAIError) -> LlmError {
    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");
            let message = api_err.message.to_lowercase();

            if code == "invalid_api_key"
                || error_type == "authentication_error"
                || message.contains("invalid credentials")
                || message.contains("invalid username or password")
                || message.contains("invalid api key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else {
                LlmError::Provider {
                    message: api_err.message.clone(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited,
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::StreamError(stream_err) => classify_stream_error(&stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

/// SSE-level failures only expose the HTTP status through their message.
fn classify_stream_error(message: &str) -> LlmError {
    if message.contains("401") || message.contains("403") {
        LlmError::AuthenticationFailed
    } else if message.contains("429") {
        LlmError::RateLimited
    } else {
        LlmError::Stream(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            messages,
            max_tokens: 500,
            stream: true,
        }
    }

    #[test]
    fn test_default_provider() {
        let provider = HuggingFaceProvider::default();
        assert_eq!(provider.name(), "huggingface");
        assert_eq!(provider.base_url(), "https://router.huggingface.co/v1");
    }

    #[test]
    #[allow(deprecated)]
    fn test_build_request_shape() {
        let oai_req = build_request(&request(vec![
            Message::user("Hi"),
            Message::assistant("Hello!"),
            Message::user("How are you?"),
        ]));

        assert_eq!(oai_req.model, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            oai_req.messages[1],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert_eq!(oai_req.max_tokens, Some(500));
        assert_eq!(oai_req.stream, Some(true));
        assert_eq!(
            oai_req.stream_options.and_then(|o| o.include_usage),
            Some(true)
        );
    }

    #[test]
    fn test_build_request_single_message() {
        let oai_req = build_request(&request(vec![Message::user("Hi")]));
        assert_eq!(oai_req.messages.len(), 1);
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::ApiError;
        let api_err = ApiError {
            message: "Invalid credentials in Authorization header".to_string(),
            r#type: None,
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_api_other() {
        use async_openai::error::ApiError;
        let api_err = ApiError {
            message: "Model is overloaded".to_string(),
            r#type: Some("server_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::Provider { .. }));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_stream_error() {
        assert!(matches!(
            classify_stream_error("Invalid status code: 401 Unauthorized"),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            classify_stream_error("Invalid status code: 429 Too Many Requests"),
            LlmError::RateLimited
        ));
        assert!(matches!(
            classify_stream_error("connection closed before message completed"),
            LlmError::Stream(_)
        ));
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        // Building the stream must not touch the network; dropping it unpolled is fine.
        let provider = HuggingFaceProvider::new(HuggingFaceConfig {
            provider_name: "huggingface".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        });
        let stream = provider.stream(
            request(vec![Message::user("Hi")]),
            &SecretString::from("hf_test"),
        );
        drop(stream);
    }
}
