//! Caller-owned result sink for one processing session.

use serde::Serialize;

use milkmob_models::export;
use milkmob_models::ProcessingResult;

/// Accumulated results for one user session.
///
/// Owned by the caller and passed into orchestrator calls; nothing here is
/// global. Results live in memory only; use the export methods to persist.
#[derive(Debug, Default)]
pub struct PipelineSession {
    results: Vec<ProcessingResult>,
}

/// Aggregate counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub total: usize,
    pub approved: usize,
    pub quarantined: usize,
    /// Mean confidence over approved videos, absent when none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
}

impl PipelineSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a terminal result.
    pub fn record(&mut self, result: ProcessingResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ProcessingResult] {
        &self.results
    }

    pub fn approved_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_approved()).count()
    }

    pub fn quarantined_count(&self) -> usize {
        self.results.len() - self.approved_count()
    }

    /// Mean confidence over approved videos.
    pub fn average_confidence(&self) -> Option<f64> {
        let confidences: Vec<f64> = self
            .results
            .iter()
            .filter_map(|r| match r {
                ProcessingResult::Approved(a) => Some(a.confidence),
                ProcessingResult::Quarantined(_) => None,
            })
            .collect();

        if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total: self.results.len(),
            approved: self.approved_count(),
            quarantined: self.quarantined_count(),
            average_confidence: self.average_confidence(),
        }
    }

    /// Export all results as a JSON array.
    pub fn export_json(&self) -> serde_json::Result<String> {
        export::to_json(&self.results)
    }

    /// Export all results as CSV.
    pub fn export_csv(&self) -> String {
        export::to_csv(&self.results)
    }
}
