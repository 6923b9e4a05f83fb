use crate::models::IcebreakerResult;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Starters used when fewer than two can be recovered
pub static FALLBACK_STARTERS: [&str; 2] = [
    "What made you join CampusLink?",
    "What's something unexpected you've learned this semester?",
];

pub const FALLBACK_ACTIVITY: &str = "Take a selfie together to commemorate your first meetup!";
pub const FALLBACK_TOPIC: &str = "Your academic journey and future career plans.";

/// Straight and curly double quotes, as they appear inside character classes
const QUOTE_CLASS: &str = "\"“”";
const ACTIVITY_MARKERS: &str = "Mini-Activity|🎲";
const TOPIC_MARKERS: &str = "Shared Topic|🎙";

/// Internal failure while matching. Never leaves this module as an error:
/// `extract_icebreakers` turns it into the fallback record.
#[derive(Debug, Error)]
pub enum ExtractionFault {
    #[error("Extraction pattern unavailable: {0}")]
    Pattern(String),

    #[error("Pattern matched without capture group: {0}")]
    MissingCapture(&'static str),
}

/// Fields recovered from a text blob before fallbacks are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedFields {
    /// Every numbered quoted line, in order of appearance
    pub starters: Vec<String>,
    pub activity: Option<String>,
    pub shared_topic: Option<String>,
}

struct ExtractionPatterns {
    starter: Regex,
    activity: Regex,
    topic: Regex,
}

impl ExtractionPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            starter: Regex::new(&format!(r"\d+\.\s+[{q}](.+?)[{q}]", q = QUOTE_CLASS))?,
            activity: Regex::new(&marker_pattern(ACTIVITY_MARKERS))?,
            topic: Regex::new(&marker_pattern(TOPIC_MARKERS))?,
        })
    }
}

/// Marker, then the first colon or quote on that line, optional spaces and
/// one opening quote, then everything up to the next quote of any kind or
/// the end of the line.
fn marker_pattern(markers: &str) -> String {
    format!(
        r"(?:{m})[^\n]*?[:{q}][ \t]*[{q}]?([^{q}\n]+)",
        m = markers,
        q = QUOTE_CLASS
    )
}

fn patterns() -> Result<&'static ExtractionPatterns, ExtractionFault> {
    static PATTERNS: OnceLock<Result<ExtractionPatterns, regex::Error>> = OnceLock::new();

    PATTERNS
        .get_or_init(ExtractionPatterns::compile)
        .as_ref()
        .map_err(|e| ExtractionFault::Pattern(e.to_string()))
}

/// Scan a text blob for starters, activity and shared topic without applying
/// any fallback.
pub fn scan(text: &str) -> Result<ScannedFields, ExtractionFault> {
    let patterns = patterns()?;

    let mut starters = Vec::new();
    for caps in patterns.starter.captures_iter(text) {
        let starter = caps.get(1).ok_or(ExtractionFault::MissingCapture("starter"))?;
        let starter = clean_span(starter.as_str());
        if !starter.is_empty() {
            starters.push(starter);
        }
    }

    Ok(ScannedFields {
        starters,
        activity: marker_field(&patterns.activity, text, "activity")?,
        shared_topic: marker_field(&patterns.topic, text, "shared topic")?,
    })
}

fn marker_field(
    pattern: &Regex,
    text: &str,
    field: &'static str,
) -> Result<Option<String>, ExtractionFault> {
    let Some(caps) = pattern.captures(text) else {
        return Ok(None);
    };

    let span = caps.get(1).ok_or(ExtractionFault::MissingCapture(field))?;
    let value = clean_span(span.as_str());

    Ok(if value.is_empty() { None } else { Some(value) })
}

fn clean_span(span: &str) -> String {
    span.trim_matches(|c: char| c.is_whitespace() || QUOTE_CLASS.contains(c))
        .to_string()
}

/// Recover a structured icebreaker from free-form text.
///
/// Missing fields fall back individually; any fault while matching yields
/// the whole fallback record. `raw_response` is always `text`.
pub fn extract_icebreakers(text: &str) -> IcebreakerResult {
    match scan(text) {
        Ok(fields) => {
            tracing::debug!(
                "Scanned {} starters, activity found: {}, topic found: {}",
                fields.starters.len(),
                fields.activity.is_some(),
                fields.shared_topic.is_some()
            );
            fields.into_result(text)
        }
        Err(e) => {
            tracing::warn!("Extraction failed, returning fallback record: {}", e);
            fallback_record(text)
        }
    }
}

impl ScannedFields {
    fn into_result(self, text: &str) -> IcebreakerResult {
        let mut starters = self.starters.into_iter();
        let conversation_starters = match (starters.next(), starters.next()) {
            (Some(first), Some(second)) => [first, second],
            _ => fallback_starters(),
        };

        IcebreakerResult {
            conversation_starters,
            activity: self.activity.unwrap_or_else(|| FALLBACK_ACTIVITY.to_string()),
            shared_topic: self.shared_topic.unwrap_or_else(|| FALLBACK_TOPIC.to_string()),
            raw_response: text.to_string(),
        }
    }
}

fn fallback_starters() -> [String; 2] {
    FALLBACK_STARTERS.map(str::to_string)
}

/// The complete default result for `text`
pub fn fallback_record(text: &str) -> IcebreakerResult {
    IcebreakerResult {
        conversation_starters: fallback_starters(),
        activity: FALLBACK_ACTIVITY.to_string(),
        shared_topic: FALLBACK_TOPIC.to_string(),
        raw_response: text.to_string(),
    }
}
