use crate::core::prompt::{ACTIVITY_MARKER, TOPIC_MARKER};
use crate::services::generator::{GenerationFailure, TextGenerator};
use async_trait::async_trait;
use rand::seq::SliceRandom;

static STARTERS: [&str; 10] = [
    "What's your favorite part about campus life?",
    "If you could start any club on campus, what would it be?",
    "What class has surprised you the most so far?",
    "What's one skill you hope to develop this year?",
    "How did you choose your major?",
    "What's the best advice you've received about college?",
    "What's something you wish you knew before starting college?",
    "What's been your favorite spot to study on campus?",
    "What are you most looking forward to this semester?",
    "What's one thing you want to accomplish before graduating?",
];

static ACTIVITIES: [&str; 6] = [
    "Compare your favorite study spots on campus.",
    "Share your favorite places to eat near campus.",
    "Exchange book or podcast recommendations.",
    "Show each other photos of your favorite places on campus.",
    "Plan to attend an upcoming campus event together.",
    "Take a selfie to commemorate your meetup!",
];

static TOPICS: [&str; 5] = [
    "Your academic interests and future career aspirations.",
    "Campus activities and student organizations.",
    "Your favorite classes and professors.",
    "Places you'd like to travel or study abroad.",
    "Your hobbies and how you pursue them on campus.",
];

/// Offline backend that answers from fixed template tables.
///
/// Used for local development and when no model endpoint is configured.
/// With `echo_prompt` set the prompt is returned as a prefix, the way a
/// full-text completion model answers.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator {
    echo_prompt: bool,
}

impl TemplateGenerator {
    pub fn new(echo_prompt: bool) -> Self {
        Self { echo_prompt }
    }

    fn compose(&self) -> String {
        let mut rng = rand::thread_rng();
        let starters: Vec<&str> = STARTERS.choose_multiple(&mut rng, 2).copied().collect();
        let activity = ACTIVITIES.choose(&mut rng).copied().unwrap_or(ACTIVITIES[0]);
        let topic = TOPICS.choose(&mut rng).copied().unwrap_or(TOPICS[0]);

        let mut body = String::new();
        for (i, starter) in starters.iter().enumerate() {
            body.push_str(&format!("{}. \"{}\"\n", i + 1, starter));
        }
        body.push_str(&format!("{} \"{}\"\n", ACTIVITY_MARKER, activity));
        body.push_str(&format!("{} \"{}\"\n", TOPIC_MARKER, topic));
        body
    }
}

#[async_trait]
impl TextGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, prompt: &str, _max_new_tokens: u32) -> Result<String, GenerationFailure> {
        let body = self.compose();
        if self.echo_prompt {
            Ok(format!("{}{}", prompt, body))
        } else {
            Ok(body)
        }
    }
}
