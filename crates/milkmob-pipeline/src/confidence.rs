//! Confidence resolution.
//!
//! The binary milk decision comes from the analysis text; the numeric
//! confidence comes from re-querying the relevance-search endpoint. The
//! two can disagree, so the relevance score is treated as ground truth
//! when the video surfaces in the results, with fixed fallback constants
//! otherwise.

use tracing::{debug, warn};

use milkmob_ai_client::{SearchOptions, VideoUnderstanding};
use milkmob_models::AnalysisFacts;

use crate::config::PipelineConfig;

/// Which detection path produced the facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// The free-text analysis call succeeded
    Full,
    /// Analysis failed; only the degraded relevance search ran
    SearchFallback,
}

/// Resolve a confidence score (0-100) for a milk-positive decision.
///
/// Never fails: a search error or a miss degrades to the configured
/// fallback constant for the mode that produced the facts.
pub async fn resolve_confidence(
    service: &dyn VideoUnderstanding,
    config: &PipelineConfig,
    facts: &AnalysisFacts,
    video_id: &str,
    mode: AnalysisMode,
) -> f64 {
    if !facts.milk_present {
        return 0.0;
    }

    let options = SearchOptions {
        threshold: config.search_threshold,
        ..SearchOptions::default()
    };

    match service.search(&config.search_query, &options).await {
        Ok(hits) => {
            if let Some(hit) = hits.iter().find(|h| h.video_id == video_id) {
                let score = normalize_score(hit.score);
                debug!(video_id, score, "Confidence from relevance search");
                return score;
            }
            warn!(video_id, "Video missing from relevance results, using fallback confidence");
        }
        Err(e) => {
            warn!(video_id, error = %e, "Relevance search failed, using fallback confidence");
        }
    }

    match mode {
        AnalysisMode::Full => config.confidence_full_fallback,
        AnalysisMode::SearchFallback => config.confidence_search_fallback,
    }
}

/// Normalize a relevance score to 0-100.
///
/// Deployments disagree on the scale: some report a 0-1 fraction, others
/// a 0-100 percentage.
pub fn normalize_score(score: f64) -> f64 {
    let scaled = if score <= 1.0 { score * 100.0 } else { score };
    scaled.clamp(0.0, 100.0)
}
