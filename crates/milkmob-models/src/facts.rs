//! Interpreted analysis facts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Milk variety derived from the analysis response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MilkType {
    Chocolate,
    Strawberry,
    Regular,
    #[default]
    Unknown,
}

impl MilkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilkType::Chocolate => "chocolate",
            MilkType::Strawberry => "strawberry",
            MilkType::Regular => "regular",
            MilkType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MilkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the notable milk moment was located in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    /// A "got milk"-style spoken phrase with a timestamp
    AudioPhrase,
    /// A drinking/sipping action with a timestamp
    VisualDrinking,
    /// Milk visibly shown on screen with a timestamp
    VisualDisplay,
    /// No timestamp found in the response; fixed fallback used
    #[default]
    Default,
}

impl MomentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentKind::AudioPhrase => "audio_phrase",
            MomentKind::VisualDrinking => "visual_drinking",
            MomentKind::VisualDisplay => "visual_display",
            MomentKind::Default => "default",
        }
    }
}

/// Categorical facts interpreted from one free-text analysis response.
///
/// Always fully populated: every field has a defined default so the
/// interpreter can return a value for arbitrary input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisFacts {
    /// Whether the response affirms milk is present
    pub milk_present: bool,
    /// Milk variety, first keyword match wins
    pub milk_type: MilkType,
    /// Activity category (e.g. "fitness", "dancing"), "general" when unmatched
    pub activity: String,
    /// Location category (e.g. "gym", "kitchen"), "unknown" when unmatched
    pub location: String,
    /// Mood category (e.g. "funny", "chill"), "casual" when unmatched
    pub mood: String,
    /// Estimated timestamp of the key milk moment, seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notable_moment_seconds: Option<f64>,
    /// How the moment was found
    pub moment_kind: MomentKind,
}

impl Default for AnalysisFacts {
    fn default() -> Self {
        Self {
            milk_present: false,
            milk_type: MilkType::Unknown,
            activity: "general".to_string(),
            location: "unknown".to_string(),
            mood: "casual".to_string(),
            notable_moment_seconds: None,
            moment_kind: MomentKind::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fully_populated() {
        let facts = AnalysisFacts::default();
        assert!(!facts.milk_present);
        assert_eq!(facts.milk_type, MilkType::Unknown);
        assert_eq!(facts.activity, "general");
        assert_eq!(facts.location, "unknown");
        assert_eq!(facts.mood, "casual");
        assert!(facts.notable_moment_seconds.is_none());
        assert_eq!(facts.moment_kind, MomentKind::Default);
    }

    #[test]
    fn test_facts_serde_round_trip() {
        let facts = AnalysisFacts {
            milk_present: true,
            milk_type: MilkType::Chocolate,
            activity: "fitness".into(),
            location: "gym".into(),
            mood: "funny".into(),
            notable_moment_seconds: Some(3.0),
            moment_kind: MomentKind::VisualDrinking,
        };
        let json = serde_json::to_string(&facts).unwrap();
        let back: AnalysisFacts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, facts);
    }
}
