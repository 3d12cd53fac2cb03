//! Sidecar file I/O and submission scanning.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use milkmob_models::{SocialPost, VideoSubmission};

use crate::error::{MetadataError, MetadataResult};

/// Suffix appended to a video's stem to form its sidecar filename.
const SIDECAR_SUFFIX: &str = "_metadata.json";

/// Sidecar path for a video: `dir/X.mp4` maps to `dir/X_metadata.json`.
pub fn sidecar_path(video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    video_path.with_file_name(format!("{stem}{SIDECAR_SUFFIX}"))
}

/// File-based store for social post sidecars.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    /// Create a store rooted at a videos directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the sidecar for a video, if one exists.
    ///
    /// `Ok(None)` means no sidecar file; a present but unparseable sidecar
    /// is an error, not a missing-metadata state.
    pub async fn load_for(&self, video_path: &Path) -> MetadataResult<Option<SocialPost>> {
        let path = sidecar_path(video_path);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(sidecar = %path.display(), "No sidecar metadata");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let post = serde_json::from_slice(&bytes)
            .map_err(|source| MetadataError::Malformed { path, source })?;
        Ok(Some(post))
    }

    /// Write a sidecar for a video.
    pub async fn save_for(&self, video_path: &Path, post: &SocialPost) -> MetadataResult<()> {
        let path = sidecar_path(video_path);
        let json = serde_json::to_vec_pretty(post)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    /// Scan the root directory for video submissions.
    ///
    /// Walks subdirectories, pairs each `.mp4` with its sidecar when one is
    /// present, and returns submissions sorted by filename. Malformed
    /// sidecars are logged and treated as absent so one bad file does not
    /// stop a batch run.
    pub async fn scan(&self) -> MetadataResult<Vec<VideoSubmission>> {
        let mut submissions = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) != Some("mp4") {
                    continue;
                }

                let mut submission = VideoSubmission::from_path(&path);
                match self.load_for(&path).await {
                    Ok(Some(post)) => submission = submission.with_post(post),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(video = %path.display(), error = %e, "Skipping malformed sidecar");
                    }
                }
                submissions.push(submission);
            }
        }

        submissions.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(hashtags: &[&str]) -> SocialPost {
        SocialPost {
            username: "@tester".into(),
            full_name: None,
            caption: "test caption".into(),
            hashtags: hashtags.iter().map(|t| t.to_string()).collect(),
            likes: 10,
            views: 100,
            engagement_rate: 5.0,
            location: None,
            creative_style: None,
            platform: Some("instagram".into()),
            timestamp: None,
            is_campaign: None,
        }
    }

    #[test]
    fn test_sidecar_path_mapping() {
        let path = sidecar_path(Path::new("test_videos/choco/Video3.mp4"));
        assert_eq!(path, Path::new("test_videos/choco/Video3_metadata.json"));
    }

    #[tokio::test]
    async fn test_load_missing_sidecar_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let loaded = store.load_for(&dir.path().join("nope.mp4")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let video = dir.path().join("clip.mp4");

        store.save_for(&video, &post(&["#gotmilk"])).await.unwrap();
        let loaded = store.load_for(&video).await.unwrap().unwrap();
        assert_eq!(loaded.username, "@tester");
        assert_eq!(loaded.hashtags, vec!["#gotmilk"]);
    }

    #[tokio::test]
    async fn test_malformed_sidecar_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let video = dir.path().join("bad.mp4");
        tokio::fs::write(sidecar_path(&video), b"{not json")
            .await
            .unwrap();

        let err = store.load_for(&video).await.unwrap_err();
        assert!(matches!(err, MetadataError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_scan_pairs_videos_with_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("choco");
        tokio::fs::create_dir(&sub).await.unwrap();

        let store = MetadataStore::new(dir.path());
        let with_meta = sub.join("a_video.mp4");
        let without_meta = dir.path().join("b_video.mp4");
        tokio::fs::write(&with_meta, b"").await.unwrap();
        tokio::fs::write(&without_meta, b"").await.unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), b"ignored")
            .await
            .unwrap();
        store.save_for(&with_meta, &post(&["#milkmob"])).await.unwrap();

        let submissions = store.scan().await.unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].filename, "a_video.mp4");
        assert!(submissions[0].post.is_some());
        assert_eq!(submissions[1].filename, "b_video.mp4");
        assert!(submissions[1].post.is_none());
    }
}
