use crate::core::{
    extractor::{extract_icebreakers, scan, ScannedFields},
    profile::common_interests,
    prompt::{build_prompt, ACTIVITY_MARKER, TOPIC_MARKER},
};
use crate::models::{GenerationRequest, IcebreakerResult, MeetupContext, RawProfile};
use crate::services::{GenerationFailure, TextGenerator};
use std::sync::Arc;

pub const DEFAULT_MAX_NEW_TOKENS: u32 = 150;

const DEFAULT_ACTIVITY: &str = "Take turns sharing a fun fact about your hometown.";

/// Generated text shorter than this is not worth surfacing for diagnostics
const MIN_DIAGNOSTIC_LEN: usize = 20;

/// Icebreaker pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Normalize both profiles and find common interests
/// 2. Build the prompt
/// 3. Generate a continuation
/// 4. Strip the echoed prompt
/// 5. Scan the continuation and assemble a structured response, filling
///    gaps from the profiles
/// 6. Extract the final result from the structured response
#[derive(Clone)]
pub struct IcebreakerAssembler {
    generator: Arc<dyn TextGenerator>,
    max_new_tokens: u32,
}

impl IcebreakerAssembler {
    pub fn new(generator: Arc<dyn TextGenerator>, max_new_tokens: u32) -> Self {
        Self {
            generator,
            max_new_tokens,
        }
    }

    pub fn with_default_budget(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(generator, DEFAULT_MAX_NEW_TOKENS)
    }

    pub fn backend_name(&self) -> &str {
        self.generator.name()
    }

    pub fn max_new_tokens(&self) -> u32 {
        self.max_new_tokens
    }

    /// Top-level entry point: raw profiles in, icebreaker out
    pub async fn generate_icebreakers(
        &self,
        raw_a: &RawProfile,
        raw_b: &RawProfile,
        ctx: &MeetupContext,
    ) -> Result<IcebreakerResult, GenerationFailure> {
        let request = GenerationRequest::new(raw_a, raw_b, ctx.clone());
        self.generate(&request, self.max_new_tokens).await
    }

    /// Run the pipeline for an already-normalized request with an explicit budget.
    ///
    /// Fails only when the generator does; no partial result is produced.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        max_new_tokens: u32,
    ) -> Result<IcebreakerResult, GenerationFailure> {
        let common = common_interests(&request.user_a, &request.user_b);
        let prompt = build_prompt(&request.user_a, &request.user_b, &request.context);

        tracing::info!(
            "Generating icebreakers for {} and {} ({} common interests) via {}",
            request.user_a.name(),
            request.user_b.name(),
            common.len(),
            self.generator.name()
        );

        let generated = self.generator.generate(&prompt, max_new_tokens).await?;
        let continuation = strip_prompt_echo(&generated, &prompt);

        let structured = assemble_structured(continuation, request, &common);
        Ok(extract_icebreakers(&structured))
    }
}

/// Remove the prompt when the generator returned it as a literal prefix
pub fn strip_prompt_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated.strip_prefix(prompt).unwrap_or(generated).trim()
}

/// Build a response in the extractor's format from whatever the model
/// produced, substituting profile-based content for anything missing.
pub fn assemble_structured(continuation: &str, request: &GenerationRequest, common: &[String]) -> String {
    let fields = match scan(continuation) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("Scan of generated text failed, using profile templates: {}", e);
            ScannedFields::default()
        }
    };

    let mut structured = String::new();

    match fields.starters.as_slice() {
        [first, second, ..] => {
            structured.push_str(&format!("1. \"{}\"\n2. \"{}\"\n", first, second));
        }
        _ => {
            tracing::debug!("Model produced {} starters, using templates", fields.starters.len());
            structured.push_str(&format!(
                "1. \"What do you think about {} so far?\"\n",
                request.user_a.first_interest()
            ));
            structured.push_str(&format!(
                "2. \"If you could change one thing about {}, what would it be?\"\n",
                request.context.location
            ));
        }
    }

    let activity = fields.activity.as_deref().unwrap_or(DEFAULT_ACTIVITY);
    structured.push_str(&format!("{} \"{}\"\n", ACTIVITY_MARKER, activity));

    let topic = match (&fields.shared_topic, common.first()) {
        (Some(topic), _) => topic.clone(),
        (None, Some(interest)) => format!(
            "You both are interested in {} – discuss what aspects you enjoy most!",
            interest
        ),
        (None, None) => format!("Your experiences at {} and future plans.", request.user_a.campus()),
    };
    structured.push_str(&format!("{} \"{}\"", TOPIC_MARKER, topic));

    if fields.starters.is_empty() && continuation.chars().count() > MIN_DIAGNOSTIC_LEN {
        structured.push_str("\n\nGenerated suggestions: ");
        structured.push_str(continuation);
    }

    structured
}
