//! Sidecar metadata store.
//!
//! Each campaign video `X.mp4` may carry a JSON sidecar `X_metadata.json`
//! with the simulated social post that "shared" it. A missing sidecar is a
//! valid state the pipeline turns into a quarantine, not an error.

pub mod error;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use store::{sidecar_path, MetadataStore};
