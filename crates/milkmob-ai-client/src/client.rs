//! Service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use milkmob_models::AnalysisTask;

use crate::error::{AiClientError, AiClientResult};
use crate::service::VideoUnderstanding;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, SearchHit, SearchOptions, SearchRequest, SearchResponse,
    TaskCreated, TaskStatusResponse,
};

/// Configuration for the analysis client.
#[derive(Debug, Clone)]
pub struct AnalysisClientConfig {
    /// Base URL of the service
    pub base_url: String,
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Campaign index the videos live in
    pub index_id: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max transport retries for idempotent calls
    pub max_retries: u32,
}

impl AnalysisClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AiClientResult<Self> {
        let api_key = std::env::var("TWELVE_LABS_API_KEY")
            .map_err(|_| AiClientError::Config("TWELVE_LABS_API_KEY not set".into()))?;
        let index_id = std::env::var("CAMPAIGN_INDEX_ID")
            .map_err(|_| AiClientError::Config("CAMPAIGN_INDEX_ID not set".into()))?;

        Ok(Self {
            base_url: std::env::var("TWELVE_LABS_API_URL")
                .unwrap_or_else(|_| "https://api.twelvelabs.io/v1.3".to_string()),
            api_key,
            index_id,
            timeout: Duration::from_secs(
                std::env::var("ANALYSIS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            max_retries: std::env::var("ANALYSIS_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }
}

/// HTTP client for the hosted video-understanding service.
pub struct HttpAnalysisClient {
    http: Client,
    config: AnalysisClientConfig,
}

impl HttpAnalysisClient {
    /// Create a new client.
    pub fn new(config: AnalysisClientConfig) -> AiClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiClientError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiClientResult<Self> {
        Self::new(AnalysisClientConfig::from_env()?)
    }

    pub fn index_id(&self) -> &str {
        &self.config.index_id
    }

    /// Turn a non-success response into a `RequestFailed` with the body text.
    async fn check_status(response: reqwest::Response) -> AiClientResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AiClientError::RequestFailed(format!(
            "service returned {}: {}",
            status, body
        )))
    }

    /// Execute an idempotent operation with bounded transport retry.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> AiClientResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AiClientResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "Request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(AiClientError::RequestFailed("Unknown error".to_string())))
    }
}

#[async_trait]
impl VideoUnderstanding for HttpAnalysisClient {
    async fn create_index_task(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> AiClientResult<AnalysisTask> {
        let url = format!("{}/tasks", self.config.base_url);
        debug!(filename, "Creating indexing task");

        // Multipart bodies are not replayable, so uploads are attempt-once.
        let form = Form::new()
            .text("index_id", self.config.index_id.clone())
            .part(
                "video_file",
                Part::bytes(bytes).file_name(filename.to_string()),
            );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(AiClientError::Network)?;

        let created: TaskCreated = Self::check_status(response).await?.json().await?;
        Ok(AnalysisTask::new(created.task_id))
    }

    async fn task_status(&self, task_id: &str) -> AiClientResult<AnalysisTask> {
        let url = format!("{}/tasks/{}", self.config.base_url, task_id);

        let status: TaskStatusResponse = self
            .with_retry(|| async {
                let response = self
                    .http
                    .get(&url)
                    .header("x-api-key", &self.config.api_key)
                    .send()
                    .await
                    .map_err(AiClientError::Network)?;
                let parsed = Self::check_status(response).await?.json().await?;
                Ok(parsed)
            })
            .await?;

        Ok(AnalysisTask {
            task_id: status.task_id,
            status: status.status,
            video_id: status.video_id,
        })
    }

    async fn analyze(
        &self,
        video_id: &str,
        prompt: &str,
        temperature: f32,
    ) -> AiClientResult<String> {
        let url = format!("{}/analyze", self.config.base_url);
        debug!(video_id, "Running free-text analysis");

        let request = AnalyzeRequest {
            video_id: video_id.to_string(),
            prompt: prompt.to_string(),
            temperature,
        };

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(AiClientError::Network)?;

        let analysis: AnalyzeResponse = Self::check_status(response).await?.json().await?;
        Ok(analysis.data)
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> AiClientResult<Vec<SearchHit>> {
        let url = format!("{}/search", self.config.base_url);

        let request = SearchRequest {
            index_id: self.config.index_id.clone(),
            query_text: query.to_string(),
            search_options: options.modalities.clone(),
            threshold: options.threshold,
            video_ids: options.video_ids.clone(),
        };

        let response: SearchResponse = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(&url)
                    .header("x-api-key", &self.config.api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(AiClientError::Network)?;
                let parsed = Self::check_status(response).await?.json().await?;
                Ok(parsed)
            })
            .await?;

        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milkmob_models::TaskStatus;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> AnalysisClientConfig {
        AnalysisClientConfig {
            base_url,
            api_key: "test-key".into(),
            index_id: "idx-1".into(),
            timeout: Duration::from_secs(5),
            max_retries: 0,
        }
    }

    #[tokio::test]
    async fn test_task_status_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/task-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "task-1",
                "status": "ready",
                "video_id": "vid-9"
            })))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(test_config(server.uri())).unwrap();
        let task = client.task_status("task-1").await.unwrap();
        assert_eq!(task.status, TaskStatus::Ready);
        assert_eq!(task.video_id.as_deref(), Some("vid-9"));
    }

    #[tokio::test]
    async fn test_analyze_returns_free_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": "Yes, there is milk in this video."
            })))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(test_config(server.uri())).unwrap();
        let text = client.analyze("vid-9", "Is there milk?", 0.2).await.unwrap();
        assert!(text.contains("milk"));
    }

    #[tokio::test]
    async fn test_search_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"video_id": "vid-9", "score": 84.2},
                    {"video_id": "vid-3", "score": 61.0}
                ]
            })))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(test_config(server.uri())).unwrap();
        let hits = client
            .search("milk dairy", &SearchOptions::default())
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].video_id, "vid-9");
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_in_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(test_config(server.uri())).unwrap();
        let err = client.analyze("vid-9", "prompt", 0.2).await.unwrap_err();
        assert!(err.is_rate_limited());
    }
}
