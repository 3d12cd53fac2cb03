//! Client for the hosted video-understanding service.
//!
//! The service exposes four operations the pipeline consumes: create an
//! indexing task from video bytes, poll task status, run a free-text
//! analysis prompt against an indexed video, and search the index with a
//! relevance-scored query. The `VideoUnderstanding` trait is the seam the
//! orchestrator is written against; `HttpAnalysisClient` is the production
//! implementation.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::{AnalysisClientConfig, HttpAnalysisClient};
pub use error::{AiClientError, AiClientResult};
pub use service::VideoUnderstanding;
pub use types::{SearchHit, SearchOptions};
