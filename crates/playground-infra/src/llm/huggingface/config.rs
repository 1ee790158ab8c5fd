//! Connection settings for the Hugging Face inference router.

use playground_types::config::{DEFAULT_BASE_URL, PlaygroundConfig};

/// Where and how to reach the OpenAI-compatible endpoint.
///
/// Holds no credential; the token is supplied per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuggingFaceConfig {
    /// Human-readable provider name, used in tracing spans.
    pub provider_name: String,
    /// Base URL (e.g., "https://router.huggingface.co/v1").
    pub base_url: String,
}

/// Hugging Face router defaults.
///
/// Base URL: `https://router.huggingface.co/v1`
pub fn huggingface_defaults() -> HuggingFaceConfig {
    HuggingFaceConfig {
        provider_name: "huggingface".into(),
        base_url: DEFAULT_BASE_URL.into(),
    }
}

impl From<&PlaygroundConfig> for HuggingFaceConfig {
    fn from(config: &PlaygroundConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..huggingface_defaults()
        }
    }
}
