//! Video submission models.

use std::path::PathBuf;

use crate::post::SocialPost;

/// Where the video bytes come from.
///
/// Exactly one source per submission: either a file on disk (test fixture
/// directories) or bytes handed over by a direct upload.
#[derive(Debug, Clone)]
pub enum VideoSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A video artifact plus its originating context.
///
/// Read-only through the pipeline; only the terminal `ProcessingResult`
/// outlives the run.
#[derive(Debug, Clone)]
pub struct VideoSubmission {
    /// Unique within one processing run
    pub filename: String,
    /// Video bytes source
    pub source: VideoSource,
    /// Sidecar post metadata; absence is meaningful (quarantine trigger)
    pub post: Option<SocialPost>,
}

impl VideoSubmission {
    /// Create a submission backed by a file on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            filename,
            source: VideoSource::Path(path),
            post: None,
        }
    }

    /// Create a submission from uploaded bytes.
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            source: VideoSource::Bytes(bytes),
            post: None,
        }
    }

    /// Attach post metadata.
    pub fn with_post(mut self, post: SocialPost) -> Self {
        self.post = Some(post);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_path() {
        let sub = VideoSubmission::from_path("test_videos/choco/Video3_ChocolateMilk.mp4");
        assert_eq!(sub.filename, "Video3_ChocolateMilk.mp4");
        assert!(sub.post.is_none());
        assert!(matches!(sub.source, VideoSource::Path(_)));
    }

    #[test]
    fn test_from_bytes() {
        let sub = VideoSubmission::from_bytes("upload.mp4", vec![0u8; 16]);
        assert_eq!(sub.filename, "upload.mp4");
        assert!(matches!(sub.source, VideoSource::Bytes(ref b) if b.len() == 16));
    }
}
