// Unit tests for Campus Icebreaker

use campus_icebreaker::core::{
    extractor::{extract_icebreakers, fallback_record, scan, FALLBACK_ACTIVITY, FALLBACK_STARTERS, FALLBACK_TOPIC},
    profile::{common_interests, normalize_profile},
    prompt::build_prompt,
};
use campus_icebreaker::models::{MeetupContext, RawProfile};

fn profile_with_interests(interests: &[&str]) -> RawProfile {
    RawProfile {
        interests: Some(interests.iter().map(|i| i.to_string()).collect()),
        ..Default::default()
    }
}

#[test]
fn test_extract_well_formed() {
    let text = "1. \"A\"\n2. \"B\"\n🎲 Mini-Activity: \"C\"\n🎙 Shared Topic: \"D\"";
    let result = extract_icebreakers(text);

    assert_eq!(result.conversation_starters, ["A".to_string(), "B".to_string()]);
    assert_eq!(result.activity, "C");
    assert_eq!(result.shared_topic, "D");
}

#[test]
fn test_extract_no_structure() {
    let result = extract_icebreakers("no structure here");

    assert_eq!(result.conversation_starters, FALLBACK_STARTERS.map(str::to_string));
    assert_eq!(result.activity, FALLBACK_ACTIVITY);
    assert_eq!(result.shared_topic, FALLBACK_TOPIC);
    assert_eq!(result.raw_response, "no structure here");
}

#[test]
fn test_extract_single_starter_uses_fallback_pair() {
    let result = extract_icebreakers("1. \"Just me\"");
    assert_eq!(result.conversation_starters, FALLBACK_STARTERS.map(str::to_string));
}

#[test]
fn test_extract_mixed_quotes_close_on_any_quote() {
    // Opening and closing quote kinds do not have to pair up
    let text = "1. \"Mixed one”\n2. “Mixed two\"\n🎲 Mini-Activity: “Swap songs\"";
    let result = extract_icebreakers(text);

    assert_eq!(result.conversation_starters, ["Mixed one".to_string(), "Mixed two".to_string()]);
    assert_eq!(result.activity, "Swap songs");
}

#[test]
fn test_extract_is_idempotent() {
    let text = "Here:\n1. \"A\"\n2. \"B\"\nShared Topic: \"Board games\"";
    let first = extract_icebreakers(text);
    let second = extract_icebreakers(text);

    assert_eq!(first, second);
    assert_eq!(first.shared_topic, "Board games");
}

#[test]
fn test_extract_empty_input() {
    assert_eq!(extract_icebreakers(""), fallback_record(""));
}

#[test]
fn test_scan_reports_all_starters() {
    let fields = scan("1. \"a\" 2. \"b\" 3. \"c\"").unwrap();
    assert_eq!(fields.starters, vec!["a", "b", "c"]);
    assert!(fields.activity.is_none());
}

#[test]
fn test_common_interests_example() {
    let a = normalize_profile(&profile_with_interests(&["AI", "Music"]));
    let b = normalize_profile(&profile_with_interests(&["music", "Sports"]));

    assert_eq!(common_interests(&a, &b), vec!["Music".to_string()]);
}

#[test]
fn test_prompt_example_round_trips_through_extractor() {
    let a = normalize_profile(&RawProfile::default());
    let b = normalize_profile(&RawProfile::default());
    let prompt = build_prompt(&a, &b, &MeetupContext::default());

    let result = extract_icebreakers(&prompt);
    assert_eq!(result.conversation_starters[0], "What's the weirdest food you've tried since moving to campus?");
    assert_eq!(result.activity, "Swap your favorite go-to study playlist or song.");
    assert_eq!(
        result.shared_topic,
        "You both enjoy AI and Japanese – talk about how you're learning new languages!"
    );
}
