use crate::models::{GenerationRequest, MeetupContext, Profile, RawProfile};

/// Values substituted for absent profile fields
#[derive(Debug, Clone, Copy)]
pub struct ProfileDefaults {
    pub name: &'static str,
    pub campus: &'static str,
    pub interests: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub goals: &'static [&'static str],
    pub personality: &'static str,
}

/// Defaults for the first participant of a meetup
pub static STUDENT_A_DEFAULTS: ProfileDefaults = ProfileDefaults {
    name: "Student A",
    campus: "University",
    interests: &["learning"],
    languages: &["English"],
    goals: &["Academic success"],
    personality: "Friendly",
};

/// Defaults for the second participant of a meetup
pub static STUDENT_B_DEFAULTS: ProfileDefaults = ProfileDefaults {
    name: "Student B",
    campus: "University",
    interests: &["meeting new people"],
    languages: &["English"],
    goals: &["Networking"],
    personality: "Curious",
};

/// Normalize a raw profile using the first-participant defaults
pub fn normalize_profile(raw: &RawProfile) -> Profile {
    normalize_with(raw, &STUDENT_A_DEFAULTS)
}

/// Normalize a raw profile, filling every absent or blank field from `defaults`
pub fn normalize_with(raw: &RawProfile, defaults: &ProfileDefaults) -> Profile {
    Profile::from_parts(
        text_or(raw.name.as_deref(), defaults.name),
        text_or(raw.campus.as_deref(), defaults.campus),
        list_or(raw.interests.as_deref(), defaults.interests),
        list_or(raw.languages.as_deref(), defaults.languages),
        list_or(raw.goals.as_deref(), defaults.goals),
        text_or(raw.personality.as_deref(), defaults.personality),
    )
}

/// Interests of `a` that `b` shares, compared case-insensitively.
/// Order and casing come from `a`.
pub fn common_interests(a: &Profile, b: &Profile) -> Vec<String> {
    let theirs: Vec<String> = b.interests().iter().map(|i| i.to_lowercase()).collect();

    a.interests()
        .iter()
        .filter(|interest| theirs.contains(&interest.to_lowercase()))
        .cloned()
        .collect()
}

impl GenerationRequest {
    /// Normalize both participants for a single pipeline run
    pub fn new(raw_a: &RawProfile, raw_b: &RawProfile, context: MeetupContext) -> Self {
        Self {
            user_a: normalize_with(raw_a, &STUDENT_A_DEFAULTS),
            user_b: normalize_with(raw_b, &STUDENT_B_DEFAULTS),
            context,
        }
    }
}

fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn list_or(values: Option<&[String]>, default: &[&str]) -> Vec<String> {
    let kept: Vec<String> = values
        .unwrap_or_default()
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    if kept.is_empty() {
        default.iter().map(|v| v.to_string()).collect()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_interests(interests: &[&str]) -> RawProfile {
        RawProfile {
            interests: Some(interests.iter().map(|i| i.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_profile_gets_defaults() {
        let profile = normalize_profile(&RawProfile::default());

        assert_eq!(profile.name(), "Student A");
        assert_eq!(profile.campus(), "University");
        assert_eq!(profile.interests(), ["learning"]);
        assert_eq!(profile.languages(), ["English"]);
        assert_eq!(profile.goals(), ["Academic success"]);
        assert_eq!(profile.personality(), "Friendly");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let raw = RawProfile {
            name: Some("  ".to_string()),
            interests: Some(vec!["".to_string(), " ".to_string()]),
            ..Default::default()
        };

        let profile = normalize_with(&raw, &STUDENT_B_DEFAULTS);
        assert_eq!(profile.name(), "Student B");
        assert_eq!(profile.interests(), ["meeting new people"]);
    }

    #[test]
    fn test_present_values_are_kept() {
        let raw = RawProfile {
            name: Some("Alex".to_string()),
            campus: Some("Central Campus".to_string()),
            languages: Some(vec!["English".to_string(), "Spanish".to_string()]),
            ..Default::default()
        };

        let profile = normalize_profile(&raw);
        assert_eq!(profile.name(), "Alex");
        assert_eq!(profile.campus(), "Central Campus");
        assert_eq!(profile.languages(), ["English", "Spanish"]);
    }

    #[test]
    fn test_common_interests_case_insensitive() {
        let a = normalize_profile(&raw_with_interests(&["AI", "Music"]));
        let b = normalize_profile(&raw_with_interests(&["music", "Sports"]));

        assert_eq!(common_interests(&a, &b), vec!["Music".to_string()]);
    }

    #[test]
    fn test_common_interests_keeps_first_profile_order() {
        let a = normalize_profile(&raw_with_interests(&["Travel", "Chess", "Art"]));
        let b = normalize_profile(&raw_with_interests(&["art", "TRAVEL"]));

        assert_eq!(common_interests(&a, &b), vec!["Travel".to_string(), "Art".to_string()]);
    }

    #[test]
    fn test_no_common_interests() {
        let a = normalize_profile(&raw_with_interests(&["AI"]));
        let b = normalize_profile(&raw_with_interests(&["Sports"]));

        assert!(common_interests(&a, &b).is_empty());
    }

    #[test]
    fn test_request_uses_per_participant_defaults() {
        let req = GenerationRequest::new(&RawProfile::default(), &RawProfile::default(), MeetupContext::default());

        assert_eq!(req.user_a.personality(), "Friendly");
        assert_eq!(req.user_b.personality(), "Curious");
        assert_eq!(req.user_b.goals(), ["Networking"]);
    }
}
