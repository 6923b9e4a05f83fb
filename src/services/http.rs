use crate::services::generator::{GenerationFailure, TextGenerator};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Client for a hosted text-generation endpoint
///
/// Speaks the Hugging Face text-generation protocol:
/// - `inputs` carries the prompt
/// - `parameters` carries the token budget and sampling settings
/// - the response is `[{"generated_text": ...}]` or a single object
pub struct HttpGenerator {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    sampling: SamplingParams,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerationPayload<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct GenerationOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct BackendError {
    error: String,
}

impl HttpGenerator {
    /// Create a new generator client
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        model: String,
        sampling: SamplingParams,
        timeout: Duration,
    ) -> Result<Self, GenerationFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationFailure::Configuration(e.to_string()))?;

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|k| !k.is_empty()),
            model,
            sampling,
            client,
        })
    }

    fn url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if base.contains("{model}") {
            base.replace("{model}", &self.model)
        } else {
            base.to_string()
        }
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GenerationFailure> {
        let payload = GenerationPayload {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens,
                temperature: self.sampling.temperature,
                top_p: self.sampling.top_p,
                do_sample: true,
                return_full_text: true,
            },
            options: GenerationOptions { wait_for_model: true },
        };

        let url = self.url();
        tracing::debug!("Requesting up to {} tokens from {}", max_new_tokens, url);

        let mut request = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let started = std::time::Instant::now();
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BackendError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);

            tracing::warn!("Generation backend returned {}: {}", status, message);

            return Err(if status == StatusCode::SERVICE_UNAVAILABLE {
                GenerationFailure::Unavailable(message)
            } else {
                GenerationFailure::Backend {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .map_err(|e| GenerationFailure::InvalidResponse(format!("Failed to parse generation: {}", e)))?;

        let text = match parsed {
            GenerationResponse::Batch(items) => items
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| GenerationFailure::InvalidResponse("Empty generation list".into()))?,
            GenerationResponse::Single(g) => g.generated_text,
        };

        tracing::info!(
            "Generated {} chars with {} in {} ms",
            text.len(),
            self.model,
            started.elapsed().as_millis()
        );

        Ok(text)
    }
}
