//! Structured submission logging utilities.
//!
//! Consistent, structured logging for pipeline runs with a per-run
//! identifier and the submission filename attached to every event.

use tracing::{error, info, warn};
use uuid::Uuid;

/// Logger for one submission's trip through the pipeline.
#[derive(Debug, Clone)]
pub struct SubmissionLogger {
    run_id: Uuid,
    filename: String,
}

impl SubmissionLogger {
    pub fn new(filename: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            filename: filename.to_string(),
        }
    }

    pub fn log_start(&self) {
        info!(
            run_id = %self.run_id,
            filename = %self.filename,
            "Pipeline run started"
        );
    }

    pub fn log_stage(&self, stage: &str, message: &str) {
        info!(
            run_id = %self.run_id,
            filename = %self.filename,
            stage = %stage,
            "{}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            filename = %self.filename,
            "{}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            filename = %self.filename,
            "{}", message
        );
    }

    pub fn log_quarantine(&self, reason: &str, details: &str) {
        info!(
            run_id = %self.run_id,
            filename = %self.filename,
            reason = %reason,
            "Submission quarantined: {}", details
        );
    }

    pub fn log_approved(&self, mob: &str, confidence: f64) {
        info!(
            run_id = %self.run_id,
            filename = %self.filename,
            mob = %mob,
            confidence,
            "Submission approved"
        );
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}
