use crate::config::{GeneratorBackend, GeneratorSettings};
use crate::services::{HttpGenerator, SamplingParams, TemplateGenerator};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised when the text-generation backend cannot produce output
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Backend misconfigured: {0}")]
    Configuration(String),
}

/// Text-completion capability the icebreaker pipeline depends on.
///
/// Implementations are shared across concurrent requests, so any internal
/// state must be synchronized by the implementation itself.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging and health output
    fn name(&self) -> &str;

    /// Continue `prompt` with at most `max_new_tokens` new tokens.
    /// The returned text may or may not start with the prompt itself.
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GenerationFailure>;
}

/// Construct the configured backend
pub fn from_settings(settings: &GeneratorSettings) -> Result<Arc<dyn TextGenerator>, GenerationFailure> {
    match settings.backend {
        GeneratorBackend::Http => {
            let generator = HttpGenerator::new(
                settings.endpoint.clone(),
                settings.api_key.clone(),
                settings.model.clone(),
                SamplingParams {
                    temperature: settings.temperature,
                    top_p: settings.top_p,
                },
                Duration::from_secs(settings.request_timeout_secs),
            )?;
            Ok(Arc::new(generator))
        }
        GeneratorBackend::Template => Ok(Arc::new(TemplateGenerator::new(settings.echo_prompt))),
    }
}
