//! Pipeline configuration.

use std::time::Duration;

/// Default free-text analysis prompt sent to the service for each video.
pub const DEFAULT_ANALYSIS_PROMPT: &str = r#"Analyze this video for a milk marketing campaign and answer each question in plain text:

1. Is anyone drinking, pouring, or holding milk? Answer yes or no.
2. What type of milk is shown: chocolate, strawberry, 2%, or regular?
3. What activity is happening (for example exercising, dancing, cooking, relaxing)?
4. Where does it take place (for example gym, kitchen, bedroom, studio, outdoors)?
5. What is the overall mood (for example funny, artistic, chill, energetic)?
6. At what timestamp in seconds is the first sip or the clearest milk moment?

If milk is not present, name the beverage that is shown instead."#;

/// Default relevance-search query used for confidence scoring and for the
/// degraded detection path.
pub const DEFAULT_SEARCH_QUERY: &str = "milk dairy glass bottle drinking pouring white liquid";

/// Try to load a custom analysis prompt from a file.
fn load_prompt_from_file() -> Option<String> {
    let prompt_path = std::env::var("PROMPT_FILE").ok()?;
    std::fs::read_to_string(&prompt_path).ok()
}

/// Pipeline configuration.
///
/// Polling is a bounded attempt count with a fixed sleep between checks,
/// not a wall-clock deadline. The confidence fallback constants are
/// configuration, not derived values.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum status checks before an indexing task is treated as timed out
    pub poll_max_attempts: u32,
    /// Fixed delay between status checks
    pub poll_interval: Duration,
    /// Free-text analysis prompt
    pub prompt: String,
    /// Sampling temperature for the analysis call
    pub analysis_temperature: f32,
    /// Relevance-search query for confidence scoring
    pub search_query: String,
    /// Minimum relevance threshold passed to search
    pub search_threshold: f64,
    /// Confidence used when analysis succeeded but search missed the video
    pub confidence_full_fallback: f64,
    /// Confidence used when only the degraded search path detected milk
    pub confidence_search_fallback: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_max_attempts: 24,
            poll_interval: Duration::from_secs(5),
            prompt: DEFAULT_ANALYSIS_PROMPT.to_string(),
            analysis_temperature: 0.2,
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            search_threshold: 0.5,
            confidence_full_fallback: 85.0,
            confidence_search_fallback: 70.0,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_max_attempts: std::env::var("PIPELINE_POLL_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.poll_max_attempts),
            poll_interval: Duration::from_secs(
                std::env::var("PIPELINE_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            prompt: load_prompt_from_file().unwrap_or(defaults.prompt),
            analysis_temperature: std::env::var("PIPELINE_ANALYSIS_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.analysis_temperature),
            search_query: std::env::var("PIPELINE_SEARCH_QUERY")
                .unwrap_or(defaults.search_query),
            search_threshold: std::env::var("PIPELINE_SEARCH_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.search_threshold),
            confidence_full_fallback: std::env::var("PIPELINE_CONFIDENCE_FULL_FALLBACK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.confidence_full_fallback),
            confidence_search_fallback: std::env::var("PIPELINE_CONFIDENCE_SEARCH_FALLBACK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.confidence_search_fallback),
        }
    }
}
