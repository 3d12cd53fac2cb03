//! Service request/response types.

use serde::{Deserialize, Serialize};
use milkmob_models::TaskStatus;

/// Response to task creation.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreated {
    pub task_id: String,
}

/// Task status snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: TaskStatus,
    /// Populated once the task reaches `ready`
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Free-text analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub video_id: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Free-text analysis response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    /// The model's natural-language answer
    pub data: String,
}

/// Index search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub index_id: String,
    pub query_text: String,
    pub search_options: Vec<String>,
    pub threshold: f64,
    /// Restrict search to specific videos when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_ids: Option<Vec<String>>,
}

/// Index search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<SearchHit>,
}

/// One relevance-scored search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub video_id: String,
    /// Relevance score; some deployments report 0-1, others 0-100
    pub score: f64,
}

/// Search tuning knobs passed through to the service.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search modalities (e.g. "visual", "audio")
    pub modalities: Vec<String>,
    /// Minimum relevance threshold
    pub threshold: f64,
    /// Restrict search to specific videos
    pub video_ids: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            modalities: vec!["visual".to_string(), "audio".to_string()],
            threshold: 0.5,
            video_ids: None,
        }
    }
}

impl SearchOptions {
    /// Scope the search to a single video.
    pub fn for_video(video_id: impl Into<String>) -> Self {
        Self {
            video_ids: Some(vec![video_id.into()]),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_decoding() {
        let json = r#"{"data": [{"video_id": "v1", "score": 84.2}, {"video_id": "v2", "score": 0.91}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].video_id, "v1");
    }

    #[test]
    fn test_search_request_omits_empty_scope() {
        let request = SearchRequest {
            index_id: "idx".into(),
            query_text: "milk".into(),
            search_options: vec!["visual".into()],
            threshold: 0.5,
            video_ids: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("video_ids"));
    }
}
