use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MeetupContext, RawProfile};

/// Request to generate icebreakers for a pair of students
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct IcebreakerRequest {
    #[serde(default)]
    #[serde(alias = "user_a", rename = "userA")]
    pub user_a: RawProfile,
    #[serde(default)]
    #[serde(alias = "user_b", rename = "userB")]
    pub user_b: RawProfile,
    #[serde(default)]
    #[serde(alias = "meeting_date", rename = "meetingDate")]
    pub meeting_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 1024))]
    #[serde(default)]
    #[serde(alias = "max_new_tokens", rename = "maxNewTokens")]
    pub max_new_tokens: Option<u32>,
}

impl IcebreakerRequest {
    pub fn context(&self) -> MeetupContext {
        MeetupContext::new(self.meeting_date.clone(), self.location.clone())
    }
}
