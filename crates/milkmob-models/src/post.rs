//! Social post metadata models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Simulated social-media post metadata attached to a video submission.
///
/// Loaded once per submission from a sidecar JSON file and immutable
/// thereafter. Older metadata generations omit the engagement fields, so
/// everything beyond the core display strings is defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SocialPost {
    /// Poster handle (e.g. "@queen_b_milk")
    pub username: String,

    /// Display name of the poster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Post caption
    #[serde(default)]
    pub caption: String,

    /// Hashtags as written, including the leading '#'
    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Like count
    #[serde(default)]
    pub likes: u64,

    /// View count
    #[serde(default)]
    pub views: u64,

    /// Engagement rate percentage
    #[serde(default)]
    pub engagement_rate: f64,

    /// Where the post was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Creator style descriptor (e.g. "Wellness influencer")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_style: Option<String>,

    /// Originating platform (e.g. "instagram")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Post timestamp as written by the generator (ISO 8601 string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Generator-side flag; the gate re-derives eligibility from hashtags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_campaign: Option<bool>,
}

impl SocialPost {
    /// Check whether a hashtag appears on the post (case-insensitive).
    pub fn has_hashtag(&self, tag: &str) -> bool {
        self.hashtags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_metadata() {
        // First-generation sidecars only carry the core fields.
        let json = r##"{
            "username": "@swiftie_milk_lover",
            "caption": "Shaking it off! #gotmilk #milkmob",
            "hashtags": ["#gotmilk", "#milkmob", "#shakeitoff"],
            "likes": 15234,
            "timestamp": "2025-06-18T08:30:00Z",
            "is_campaign": true
        }"##;

        let post: SocialPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.username, "@swiftie_milk_lover");
        assert_eq!(post.hashtags.len(), 3);
        assert_eq!(post.views, 0);
        assert!(post.full_name.is_none());
    }

    #[test]
    fn test_parse_extended_metadata() {
        let json = r##"{
            "username": "@hydration_queen",
            "full_name": "Sarah Waters",
            "caption": "Morning hydration routine!",
            "hashtags": ["#gotmilk", "#milkmob", "#water"],
            "likes": 1234,
            "views": 5678,
            "engagement_rate": 8.2,
            "creative_style": "Wellness influencer",
            "location": "Los Angeles, CA"
        }"##;

        let post: SocialPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.full_name.as_deref(), Some("Sarah Waters"));
        assert_eq!(post.views, 5678);
        assert!((post.engagement_rate - 8.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_has_hashtag_case_insensitive() {
        let post = SocialPost {
            username: "@x".into(),
            full_name: None,
            caption: String::new(),
            hashtags: vec!["#GotMilk".into()],
            likes: 0,
            views: 0,
            engagement_rate: 0.0,
            location: None,
            creative_style: None,
            platform: None,
            timestamp: None,
            is_campaign: None,
        };
        assert!(post.has_hashtag("#gotmilk"));
        assert!(!post.has_hashtag("#milkmob"));
    }
}
