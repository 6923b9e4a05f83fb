use crate::models::{MeetupContext, Profile};

/// Marker that introduces the activity line in generated output
pub const ACTIVITY_MARKER: &str = "🎲 Mini-Activity:";
/// Marker that introduces the shared-topic line in generated output
pub const TOPIC_MARKER: &str = "🎙 Shared Topic:";

const ROLE_INSTRUCTION: &str = "You are a friendly AI assistant helping two university students prepare for a coffee meetup. \
Your job is to generate icebreakers and conversation tips to help them feel at ease and find shared topics.";

const CLOSING_INSTRUCTION: &str = "Only include topics or ideas that reflect their common interests, goals, or campus experience. \
Keep the tone light, helpful, and fun.";

/// Render the generation prompt for a pair of students.
///
/// The worked example at the end uses the same line syntax the extractor
/// recognizes, so it also anchors the model's output format.
pub fn build_prompt(a: &Profile, b: &Profile, ctx: &MeetupContext) -> String {
    let mut prompt = String::with_capacity(1536);

    prompt.push('\n');
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\n🎯 Output:\n");
    prompt.push_str("- 2 fun, casual conversation starters\n");
    prompt.push_str("- 1 light activity idea they can try during the meetup\n");
    prompt.push_str("- 1 shared interest, topic, or language to explore together\n\n");

    push_profile_block(&mut prompt, "Student A", a);
    push_profile_block(&mut prompt, "Student B", b);

    prompt.push_str("📅 Meetup Info:\n");
    prompt.push_str(&format!("- Date: {}\n", ctx.meeting_date));
    prompt.push_str(&format!("- Location: {}\n\n", ctx.location));

    prompt.push_str("🧊 Example Output Format:\n");
    prompt.push_str("1. \"What's the weirdest food you've tried since moving to campus?\"\n");
    prompt.push_str("2. \"If you could start a club together based on a shared interest, what would it be?\"\n");
    prompt.push_str(&format!("{} \"Swap your favorite go-to study playlist or song.\"\n", ACTIVITY_MARKER));
    prompt.push_str(&format!(
        "{} \"You both enjoy AI and Japanese – talk about how you're learning new languages!\"\n\n",
        TOPIC_MARKER
    ));

    prompt.push_str(CLOSING_INSTRUCTION);
    prompt.push('\n');

    prompt
}

fn push_profile_block(prompt: &mut String, label: &str, profile: &Profile) {
    prompt.push_str(&format!("🧑 {}:\n", label));
    prompt.push_str(&format!("- Name: {}\n", profile.name()));
    prompt.push_str(&format!("- Campus: {}\n", profile.campus()));
    prompt.push_str(&format!("- Interests: {}\n", profile.interests().join(", ")));
    prompt.push_str(&format!("- Languages: {}\n", profile.languages().join(", ")));
    prompt.push_str(&format!("- Goals: {}\n", profile.goals().join(", ")));
    prompt.push_str(&format!("- Personality: {}\n\n", profile.personality()));
}
