use serde::{Deserialize, Serialize};

/// Profile as it arrives at the boundary; every field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
    #[serde(default)]
    pub personality: Option<String>,
}

/// Fully populated profile. Construct through `core::profile::normalize_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    name: String,
    campus: String,
    interests: Vec<String>,
    languages: Vec<String>,
    goals: Vec<String>,
    personality: String,
}

impl Profile {
    pub(crate) fn from_parts(
        name: String,
        campus: String,
        interests: Vec<String>,
        languages: Vec<String>,
        goals: Vec<String>,
        personality: String,
    ) -> Self {
        Self {
            name,
            campus,
            interests,
            languages,
            goals,
            personality,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn campus(&self) -> &str {
        &self.campus
    }

    /// Never empty
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// Never empty
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Never empty
    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn personality(&self) -> &str {
        &self.personality
    }

    pub fn first_interest(&self) -> &str {
        self.interests.first().map(String::as_str).unwrap_or_default()
    }
}

/// Where and when the two students meet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetupContext {
    #[serde(rename = "meetingDate")]
    pub meeting_date: String,
    pub location: String,
}

pub const DEFAULT_MEETING_DATE: &str = "Upcoming";
pub const DEFAULT_LOCATION: &str = "Campus";

impl MeetupContext {
    /// Build a context, substituting defaults for absent or blank values
    pub fn new(meeting_date: Option<String>, location: Option<String>) -> Self {
        Self {
            meeting_date: non_blank(meeting_date).unwrap_or_else(|| DEFAULT_MEETING_DATE.to_string()),
            location: non_blank(location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        }
    }
}

impl Default for MeetupContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One pipeline run's inputs: both normalized profiles and the meetup
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub user_a: Profile,
    pub user_b: Profile,
    pub context: MeetupContext,
}

/// The sole output contract of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcebreakerResult {
    #[serde(rename = "conversationStarters")]
    pub conversation_starters: [String; 2],
    pub activity: String,
    #[serde(rename = "sharedTopic")]
    pub shared_topic: String,
    #[serde(rename = "rawResponse")]
    pub raw_response: String,
}
