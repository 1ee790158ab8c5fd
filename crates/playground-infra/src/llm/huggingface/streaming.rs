//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! provider-agnostic [`StreamEvent`] enum defined in `playground-types`.

use futures_util::{Stream, StreamExt};

use async_openai::types::chat::{ChatCompletionResponseStream, FinishReason};

use playground_types::llm::{LlmError, StopReason, StreamEvent, Usage};

use super::map_openai_error;

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of [`StreamEvent`]s.
///
/// The returned stream emits events in this order:
/// 1. `Connected` -- once the first chunk has been received
/// 2. `TextDelta` -- for each non-empty content chunk
/// 3. `MessageDelta` -- with the stop reason when finish_reason appears
/// 4. `Usage` -- token usage, if the endpoint reports it
/// 5. `Done` -- at the end of the stream
///
/// `Connected` is deferred until the first chunk so that an HTTP error
/// status (which async-openai reports as the first stream item) surfaces
/// before the stream is considered open.
pub fn map_openai_stream(
    stream: ChatCompletionResponseStream,
) -> impl Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static {
    async_stream::try_stream! {
        let mut stream = stream;
        let mut connected = false;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(map_openai_error)?;

            if !connected {
                connected = true;
                yield StreamEvent::Connected;
            }

            // The final chunk carries usage with an empty choices array.
            if let Some(usage) = chunk.usage.as_ref() {
                yield StreamEvent::Usage(Usage {
                    input_tokens: usage.prompt_tokens,
                    output_tokens: usage.completion_tokens,
                });
            }

            for choice in chunk.choices {
                if let Some(text) = choice.delta.content {
                    if !text.is_empty() {
                        yield StreamEvent::TextDelta { text };
                    }
                }

                if let Some(finish_reason) = choice.finish_reason {
                    yield StreamEvent::MessageDelta {
                        stop_reason: map_finish_reason(finish_reason),
                    };
                }
            }
        }

        yield StreamEvent::Done;
    }
}

pub(crate) fn map_finish_reason(reason: FinishReason) -> StopReason {
    match reason {
        FinishReason::Stop => StopReason::EndTurn,
        FinishReason::Length => StopReason::MaxTokens,
        FinishReason::ContentFilter => StopReason::ContentFilter,
        // Tools are never offered, so treat these as a normal end.
        FinishReason::ToolCalls | FinishReason::FunctionCall => StopReason::EndTurn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason(FinishReason::Stop), StopReason::EndTurn);
        assert_eq!(map_finish_reason(FinishReason::Length), StopReason::MaxTokens);
        assert_eq!(
            map_finish_reason(FinishReason::ContentFilter),
            StopReason::ContentFilter
        );
    }
}
