//! Hashtag eligibility gate.
//!
//! The cheap pre-filter that decides whether a submission is worth a paid
//! analysis run. Deterministic and side-effect free.

use milkmob_models::{QuarantineReason, SocialPost};

/// The two marker tags that make a post campaign-eligible. Either one is
/// sufficient.
pub const CAMPAIGN_HASHTAGS: [&str; 2] = ["#gotmilk", "#milkmob"];

/// Outcome of the eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Eligible,
    Ineligible(QuarantineReason),
}

impl GateDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, GateDecision::Eligible)
    }
}

/// Check whether a post qualifies for campaign processing.
///
/// Absent metadata and missing campaign tags are distinct quarantine
/// reasons so the dashboard can explain each rejection.
pub fn check_eligibility(post: Option<&SocialPost>) -> GateDecision {
    let Some(post) = post else {
        return GateDecision::Ineligible(QuarantineReason::MissingMetadata);
    };

    if CAMPAIGN_HASHTAGS.iter().any(|tag| post.has_hashtag(tag)) {
        GateDecision::Eligible
    } else {
        GateDecision::Ineligible(QuarantineReason::NoCampaignTags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_tags(tags: &[&str]) -> SocialPost {
        SocialPost {
            username: "@tester".into(),
            full_name: None,
            caption: String::new(),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
            likes: 0,
            views: 0,
            engagement_rate: 0.0,
            location: None,
            creative_style: None,
            platform: None,
            timestamp: None,
            is_campaign: None,
        }
    }

    #[test]
    fn test_absent_metadata_quarantines() {
        assert_eq!(
            check_eligibility(None),
            GateDecision::Ineligible(QuarantineReason::MissingMetadata)
        );
    }

    #[test]
    fn test_either_campaign_tag_is_sufficient() {
        let gotmilk = post_with_tags(&["#gotmilk", "#morningroutine"]);
        assert!(check_eligibility(Some(&gotmilk)).is_eligible());

        let milkmob = post_with_tags(&["#milkmob"]);
        assert!(check_eligibility(Some(&milkmob)).is_eligible());

        let both = post_with_tags(&["#gotmilk", "#milkmob"]);
        assert!(check_eligibility(Some(&both)).is_eligible());
    }

    #[test]
    fn test_off_campaign_tags_quarantine() {
        let post = post_with_tags(&["#breakfast"]);
        assert_eq!(
            check_eligibility(Some(&post)),
            GateDecision::Ineligible(QuarantineReason::NoCampaignTags)
        );

        let empty = post_with_tags(&[]);
        assert_eq!(
            check_eligibility(Some(&empty)),
            GateDecision::Ineligible(QuarantineReason::NoCampaignTags)
        );
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let post = post_with_tags(&["#GotMilk"]);
        assert!(check_eligibility(Some(&post)).is_eligible());
    }
}
