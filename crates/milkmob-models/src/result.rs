//! Terminal processing results.
//!
//! A submission ends in exactly one of two shapes: approved (content judged
//! on-campaign) or quarantined (content judged ineligible or milk-negative).
//! Infrastructure failures are surfaced as errors instead and produce no
//! result record.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::facts::{AnalysisFacts, MilkType};

/// Why a submission was quarantined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuarantineReason {
    /// No sidecar metadata file was found for the video
    MissingMetadata,
    /// Metadata present but neither campaign hashtag on the post
    NoCampaignTags,
    /// The AI analysis did not find milk in the video
    AiDetectionFailed,
}

impl QuarantineReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuarantineReason::MissingMetadata => "missing_metadata",
            QuarantineReason::NoCampaignTags => "no_campaign_tags",
            QuarantineReason::AiDetectionFailed => "ai_detection_failed",
        }
    }

    /// User-facing remediation hint shown alongside the quarantine notice.
    pub fn suggestion(&self) -> &'static str {
        match self {
            QuarantineReason::MissingMetadata => {
                "Add a _metadata.json sidecar file next to the video"
            }
            QuarantineReason::NoCampaignTags => {
                "Repost with #gotmilk or #milkmob in the caption"
            }
            QuarantineReason::AiDetectionFailed => {
                "Re-shoot with the milk clearly visible on camera"
            }
        }
    }
}

impl std::fmt::Display for QuarantineReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Community labels attached to an approved video.
///
/// Two orthogonal taxonomies: a behavior-based mob derived from the
/// activity/location/mood facts, and a product-based mob derived from the
/// milk type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MobAssignment {
    /// Behavior-based mob name (e.g. "Gym Warriors")
    pub name: String,
    /// Short description of the mob
    pub description: String,
    /// Product-based mob name (e.g. "Chocolate Champions")
    pub milk_mob: String,
}

/// An approved campaign video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApprovedVideo {
    /// Video identifier on the external service
    pub video_id: String,
    /// Original filename of the submission
    pub filename: String,
    /// Detection confidence, 0-100
    pub confidence: f64,
    /// Milk variety
    pub milk_type: MilkType,
    /// Assigned community labels
    pub mob: MobAssignment,
    /// Full interpreted facts
    pub facts: AnalysisFacts,
    /// When the pipeline finished this submission
    pub processed_at: DateTime<Utc>,
}

/// A quarantined submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuarantinedVideo {
    /// Original filename of the submission
    pub filename: String,
    /// Why it was quarantined
    pub reason: QuarantineReason,
    /// Reason-specific payload (e.g. the hashtags seen, or the beverage guess)
    pub details: String,
    /// When the pipeline finished this submission
    pub processed_at: DateTime<Utc>,
}

/// Terminal record of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessingResult {
    Approved(ApprovedVideo),
    Quarantined(QuarantinedVideo),
}

impl ProcessingResult {
    pub fn approved(
        video_id: impl Into<String>,
        filename: impl Into<String>,
        confidence: f64,
        mob: MobAssignment,
        facts: AnalysisFacts,
    ) -> Self {
        ProcessingResult::Approved(ApprovedVideo {
            video_id: video_id.into(),
            filename: filename.into(),
            confidence,
            milk_type: facts.milk_type,
            mob,
            facts,
            processed_at: Utc::now(),
        })
    }

    pub fn quarantined(
        filename: impl Into<String>,
        reason: QuarantineReason,
        details: impl Into<String>,
    ) -> Self {
        ProcessingResult::Quarantined(QuarantinedVideo {
            filename: filename.into(),
            reason,
            details: details.into(),
            processed_at: Utc::now(),
        })
    }

    pub fn filename(&self) -> &str {
        match self {
            ProcessingResult::Approved(a) => &a.filename,
            ProcessingResult::Quarantined(q) => &q.filename,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ProcessingResult::Approved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_is_exactly_one_shape() {
        let ok = ProcessingResult::approved(
            "vid-1",
            "clip.mp4",
            92.5,
            MobAssignment {
                name: "Milk Enthusiasts".into(),
                description: "Pure milk appreciation".into(),
                milk_mob: "Classic Crew".into(),
            },
            AnalysisFacts::default(),
        );
        assert!(ok.is_approved());
        assert_eq!(ok.filename(), "clip.mp4");

        let bad = ProcessingResult::quarantined(
            "water.mp4",
            QuarantineReason::AiDetectionFailed,
            "appears to show water",
        );
        assert!(!bad.is_approved());
        assert_eq!(bad.filename(), "water.mp4");
    }

    #[test]
    fn test_result_json_round_trip() {
        let result = ProcessingResult::approved(
            "vid-42",
            "Video3_ChocolateMilk.mp4",
            87.0,
            MobAssignment {
                name: "Gym Warriors".into(),
                description: "Post-workout milk drinkers".into(),
                milk_mob: "Chocolate Champions".into(),
            },
            AnalysisFacts {
                milk_present: true,
                milk_type: MilkType::Chocolate,
                activity: "fitness".into(),
                location: "gym".into(),
                mood: "energetic".into(),
                notable_moment_seconds: Some(3.0),
                moment_kind: crate::facts::MomentKind::VisualDrinking,
            },
        );

        let json = serde_json::to_string(&result).unwrap();
        let back: ProcessingResult = serde_json::from_str(&json).unwrap();
        match back {
            ProcessingResult::Approved(a) => {
                assert_eq!(a.video_id, "vid-42");
                assert_eq!(a.milk_type, MilkType::Chocolate);
                assert_eq!(a.mob.name, "Gym Warriors");
                assert_eq!(a.facts.notable_moment_seconds, Some(3.0));
            }
            _ => panic!("expected approved"),
        }
    }

    #[test]
    fn test_quarantine_reason_wire_format() {
        let json = serde_json::to_string(&QuarantineReason::NoCampaignTags).unwrap();
        assert_eq!(json, "\"no_campaign_tags\"");
    }
}
