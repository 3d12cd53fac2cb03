//! Service trait consumed by the pipeline.

use async_trait::async_trait;

use milkmob_models::AnalysisTask;

use crate::error::AiClientResult;
use crate::types::{SearchHit, SearchOptions};

/// The four operations the pipeline needs from the hosted
/// video-understanding service.
///
/// The orchestrator is written against this trait so tests can substitute
/// an in-memory fake and avoid both the network and real polling delays.
#[async_trait]
pub trait VideoUnderstanding: Send + Sync {
    /// Submit video bytes for indexing; returns a pollable task handle.
    async fn create_index_task(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> AiClientResult<AnalysisTask>;

    /// Fetch the current status of an indexing task.
    async fn task_status(&self, task_id: &str) -> AiClientResult<AnalysisTask>;

    /// Run a free-text analysis prompt against an indexed video.
    async fn analyze(
        &self,
        video_id: &str,
        prompt: &str,
        temperature: f32,
    ) -> AiClientResult<String>;

    /// Keyword/semantic search over the index, relevance-scored.
    async fn search(&self, query: &str, options: &SearchOptions) -> AiClientResult<Vec<SearchHit>>;
}
