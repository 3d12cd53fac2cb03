//! Shared data models for the Got Milk campaign backend.
//!
//! This crate provides Serde-serializable types for:
//! - Social post metadata attached to video submissions
//! - Indexing task handles and their lifecycle states
//! - Interpreted analysis facts (milk presence, type, vibe)
//! - Terminal processing results (approved or quarantined)
//! - Result export for offline reporting

pub mod export;
pub mod facts;
pub mod post;
pub mod result;
pub mod submission;
pub mod task;

// Re-export common types
pub use facts::{AnalysisFacts, MilkType, MomentKind};
pub use post::SocialPost;
pub use result::{
    ApprovedVideo, MobAssignment, ProcessingResult, QuarantineReason, QuarantinedVideo,
};
pub use submission::{VideoSource, VideoSubmission};
pub use task::{AnalysisTask, TaskStatus};
