//! Campaign video intake and classification pipeline.
//!
//! One submission at a time: load sidecar metadata, gate on campaign
//! hashtags, upload to the video-understanding service, poll the indexing
//! task to completion, interpret the free-text analysis, resolve a
//! confidence score, classify into mobs, and record the terminal result
//! in a caller-owned session.

pub mod config;
pub mod confidence;
pub mod error;
pub mod gate;
pub mod interpreter;
pub mod logging;
pub mod mobs;
pub mod processor;
pub mod session;

pub use config::PipelineConfig;
pub use confidence::{resolve_confidence, AnalysisMode};
pub use error::{PipelineError, PipelineResult};
pub use gate::{check_eligibility, GateDecision, CAMPAIGN_HASHTAGS};
pub use interpreter::interpret;
pub use mobs::classify;
pub use processor::VideoProcessor;
pub use session::{PipelineSession, SessionSummary};
