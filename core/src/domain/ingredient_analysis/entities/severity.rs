use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Substrings in an ingredient name that mark it as a high dietary concern.
pub const HIGH_CONCERN_KEYWORDS: [&str; 5] = ["salt", "sodium", "sugar", "glucose", "hfcs"];

/// Substrings that mark a moderate concern when no high-concern keyword matched.
pub const MEDIUM_CONCERN_KEYWORDS: [&str; 4] = ["oil", "fat", "flour", "milk powder"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Canonicalizes a one-word tag from the model.
    ///
    /// Matching is case-insensitive; "moderate" is accepted as Medium and
    /// anything unrecognized falls back to Medium.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" | "moderate" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Medium,
        }
    }

    /// Infers severity from the ingredient name alone using the fixed lexicon.
    pub fn infer_from_name(name: &str) -> Self {
        let name = name.to_lowercase();

        if HIGH_CONCERN_KEYWORDS.iter().any(|k| name.contains(k)) {
            Severity::High
        } else if MEDIUM_CONCERN_KEYWORDS.iter().any(|k| name.contains(k)) {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_is_case_insensitive() {
        assert_eq!(Severity::from_tag("low"), Severity::Low);
        assert_eq!(Severity::from_tag("LOW"), Severity::Low);
        assert_eq!(Severity::from_tag("Low"), Severity::Low);
        assert_eq!(Severity::from_tag(" High "), Severity::High);
        assert_eq!(Severity::from_tag("MEDIUM"), Severity::Medium);
    }

    #[test]
    fn test_from_tag_maps_moderate_and_unknown_to_medium() {
        assert_eq!(Severity::from_tag("Moderate"), Severity::Medium);
        assert_eq!(Severity::from_tag("extreme"), Severity::Medium);
        assert_eq!(Severity::from_tag(""), Severity::Medium);
    }

    #[test]
    fn test_infer_from_name_lexicon() {
        assert_eq!(Severity::infer_from_name("Salt"), Severity::High);
        assert_eq!(Severity::infer_from_name("sugar"), Severity::High);
        assert_eq!(Severity::infer_from_name("Sodium benzoate"), Severity::High);
        assert_eq!(Severity::infer_from_name("HFCS"), Severity::High);
        assert_eq!(Severity::infer_from_name("palm oil"), Severity::Medium);
        assert_eq!(Severity::infer_from_name("Wheat Flour"), Severity::Medium);
        assert_eq!(
            Severity::infer_from_name("skimmed milk powder"),
            Severity::Medium
        );
        assert_eq!(Severity::infer_from_name("water"), Severity::Low);
    }

    #[test]
    fn test_high_keyword_wins_over_medium() {
        assert_eq!(Severity::infer_from_name("salted oil blend"), Severity::High);
    }

    #[test]
    fn test_serializes_as_capitalized_word() {
        assert_eq!(
            serde_json::to_string(&Severity::Medium).unwrap(),
            "\"Medium\""
        );
    }
}
