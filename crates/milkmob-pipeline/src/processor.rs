//! Pipeline orchestration.
//!
//! Runs one submission at a time through gate, upload, poll, analyze,
//! resolve, and classify, ending in exactly one terminal shape. Content
//! judgments become quarantine results; infrastructure failures become
//! errors and the submission is abandoned without a result record.

use std::sync::Arc;

use milkmob_ai_client::{SearchOptions, VideoUnderstanding};
use milkmob_models::{
    AnalysisFacts, ProcessingResult, QuarantineReason, TaskStatus, VideoSource, VideoSubmission,
};

use crate::confidence::{resolve_confidence, AnalysisMode};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::gate::{check_eligibility, GateDecision};
use crate::interpreter::{guess_beverage, interpret};
use crate::logging::SubmissionLogger;
use crate::mobs::classify;
use crate::session::PipelineSession;

/// Per-submission pipeline coordinator.
pub struct VideoProcessor {
    service: Arc<dyn VideoUnderstanding>,
    config: PipelineConfig,
}

impl VideoProcessor {
    pub fn new(service: Arc<dyn VideoUnderstanding>, config: PipelineConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one submission to its terminal result and record it in the
    /// caller's session.
    pub async fn process_into(
        &self,
        submission: &VideoSubmission,
        session: &mut PipelineSession,
    ) -> PipelineResult<()> {
        let result = self.process(submission).await?;
        session.record(result);
        Ok(())
    }

    /// Run one submission to its terminal result.
    pub async fn process(&self, submission: &VideoSubmission) -> PipelineResult<ProcessingResult> {
        let log = SubmissionLogger::new(&submission.filename);
        log.log_start();

        // Eligibility gate: failures are content judgments, not errors.
        if let GateDecision::Ineligible(reason) = check_eligibility(submission.post.as_ref()) {
            let details = match reason {
                QuarantineReason::MissingMetadata => {
                    "no sidecar metadata file accompanied this video".to_string()
                }
                _ => {
                    let tags = submission
                        .post
                        .as_ref()
                        .map(|p| p.hashtags.join(" "))
                        .unwrap_or_default();
                    format!("hashtags seen: {}", tags)
                }
            };
            log.log_quarantine(reason.as_str(), &details);
            return Ok(ProcessingResult::quarantined(
                &submission.filename,
                reason,
                details,
            ));
        }
        log.log_stage("gate", "Campaign hashtags present, submitting for analysis");

        // Upload is attempt-once; a failure here is infrastructure.
        let bytes = self.read_bytes(submission).await?;
        let task = self
            .service
            .create_index_task(&submission.filename, bytes)
            .await
            .map_err(|e| PipelineError::UploadFailed(e.to_string()))?;
        log.log_stage("upload", &format!("Indexing task {} created", task.task_id));

        let video_id = self.poll_until_ready(&task.task_id, &log).await?;
        log.log_stage("polling", &format!("Video indexed as {}", video_id));

        let (facts, mode, response_text) = self.analyze_with_fallback(&video_id, &log).await?;

        if !facts.milk_present {
            let details = match response_text.as_deref().and_then(guess_beverage) {
                Some(beverage) => format!("appears to show {} instead of milk", beverage),
                None => "no milk detected by the analysis".to_string(),
            };
            log.log_quarantine(QuarantineReason::AiDetectionFailed.as_str(), &details);
            return Ok(ProcessingResult::quarantined(
                &submission.filename,
                QuarantineReason::AiDetectionFailed,
                details,
            ));
        }

        let confidence =
            resolve_confidence(self.service.as_ref(), &self.config, &facts, &video_id, mode).await;
        let mob = classify(&facts);
        log.log_approved(&mob.name, confidence);

        Ok(ProcessingResult::approved(
            video_id,
            &submission.filename,
            confidence,
            mob,
            facts,
        ))
    }

    async fn read_bytes(&self, submission: &VideoSubmission) -> PipelineResult<Vec<u8>> {
        match &submission.source {
            VideoSource::Path(path) => Ok(tokio::fs::read(path).await?),
            VideoSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Poll the indexing task up to the configured attempt ceiling with a
    /// fixed sleep between checks.
    async fn poll_until_ready(
        &self,
        task_id: &str,
        log: &SubmissionLogger,
    ) -> PipelineResult<String> {
        let max_attempts = self.config.poll_max_attempts;

        for attempt in 1..=max_attempts {
            let task = self
                .service
                .task_status(task_id)
                .await
                .map_err(|e| PipelineError::ProcessingFailed(format!("status check failed: {e}")))?;

            match task.status {
                TaskStatus::Ready => {
                    return task.video_id.ok_or_else(|| {
                        PipelineError::processing_failed("task ready but no video id returned")
                    });
                }
                TaskStatus::Failed => {
                    return Err(PipelineError::processing_failed(format!(
                        "indexing task {} failed on the service side",
                        task_id
                    )));
                }
                status => {
                    log.log_stage(
                        "polling",
                        &format!("Status {} (check {}/{})", status, attempt, max_attempts),
                    );
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.config.poll_interval).await;
            }
        }

        Err(PipelineError::Timeout {
            attempts: max_attempts,
        })
    }

    /// Run the free-text analysis, degrading to a video-scoped relevance
    /// search when the analysis call fails.
    async fn analyze_with_fallback(
        &self,
        video_id: &str,
        log: &SubmissionLogger,
    ) -> PipelineResult<(AnalysisFacts, AnalysisMode, Option<String>)> {
        match self
            .service
            .analyze(video_id, &self.config.prompt, self.config.analysis_temperature)
            .await
        {
            Ok(text) => Ok((interpret(&text), AnalysisMode::Full, Some(text))),
            Err(analysis_err) => {
                log.log_warning(&format!(
                    "Analysis call failed, degrading to relevance search: {}",
                    analysis_err
                ));

                let options = SearchOptions {
                    threshold: self.config.search_threshold,
                    ..SearchOptions::for_video(video_id)
                };
                let hits = self
                    .service
                    .search(&self.config.search_query, &options)
                    .await
                    .map_err(|search_err| {
                        PipelineError::AnalysisFailed(format!(
                            "analysis failed ({analysis_err}) and fallback search failed ({search_err})"
                        ))
                    })?;

                let milk_present = hits.iter().any(|h| h.video_id == video_id);
                let facts = AnalysisFacts {
                    milk_present,
                    ..AnalysisFacts::default()
                };
                Ok((facts, AnalysisMode::SearchFallback, None))
            }
        }
    }
}
