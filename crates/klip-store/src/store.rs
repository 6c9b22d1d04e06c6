//! JSON-document project store.
//!
//! One file holds every project. Each mutation reads the full document,
//! changes it in memory and rewrites the file via a temp-file rename, all
//! under an internal mutex so interleaved writers cannot lose updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Descriptive metadata for one rendered clip file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipInfo {
    pub title: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A source video and the clips rendered from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipProject {
    pub id: String,
    pub source_video_id: String,
    /// Output filenames, in render order
    #[serde(default)]
    pub clips: Vec<String>,
    /// Per-filename metadata
    #[serde(default)]
    pub clip_metadata: HashMap<String, ClipInfo>,
    pub created_at: DateTime<Utc>,
}

/// Whole store document: projects keyed by id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    projects: HashMap<String, ClipProject>,
}

/// File-backed project store.
///
/// Clone-cheap handles are not provided; share it behind an `Arc` when more
/// than one component writes.
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProjectStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Create a new project for a source video and persist it.
    pub async fn create_project(&self, source_video_id: &str) -> StoreResult<ClipProject> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let project = ClipProject {
            id: Uuid::new_v4().to_string(),
            source_video_id: source_video_id.to_string(),
            clips: Vec::new(),
            clip_metadata: HashMap::new(),
            created_at: Utc::now(),
        };
        doc.projects.insert(project.id.clone(), project.clone());

        self.save(&doc).await?;
        debug!(project_id = %project.id, source = %source_video_id, "Created project");
        Ok(project)
    }

    /// Record a rendered clip under a project.
    pub async fn add_clip_to_project(
        &self,
        project_id: &str,
        filename: &str,
        info: ClipInfo,
    ) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let project = doc
            .projects
            .get_mut(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;

        if !project.clips.iter().any(|c| c == filename) {
            project.clips.push(filename.to_string());
        }
        project.clip_metadata.insert(filename.to_string(), info);

        self.save(&doc).await?;
        debug!(project_id = %project_id, filename = %filename, "Added clip to project");
        Ok(())
    }

    /// All projects, unordered.
    pub async fn get_projects(&self) -> StoreResult<Vec<ClipProject>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc.projects.into_values().collect())
    }

    /// One project by id.
    pub async fn get_project(&self, project_id: &str) -> StoreResult<ClipProject> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        doc.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))
    }

    /// Remove a project. Removing an unknown id is an error.
    pub async fn delete_project(&self, project_id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        if doc.projects.remove(project_id).is_none() {
            return Err(StoreError::ProjectNotFound(project_id.to_string()));
        }

        self.save(&doc).await?;
        debug!(project_id = %project_id, "Deleted project");
        Ok(())
    }

    /// Read the full document; a missing file is an empty store.
    async fn load(&self) -> StoreResult<StoreDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the full document. Writes go to a sibling temp file first so
    /// a crash mid-write never truncates the live document.
    async fn save(&self, doc: &StoreDocument) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn info(title: &str) -> ClipInfo {
        ClipInfo {
            title: title.to_string(),
            start_time: 688.0,
            end_time: 720.0,
            hook_text: None,
            description: None,
            reason: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_project() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects.json"));

        let project = store.create_project("video123").await.unwrap();
        let fetched = store.get_project(&project.id).await.unwrap();
        assert_eq!(fetched.source_video_id, "video123");
        assert!(fetched.clips.is_empty());
    }

    #[tokio::test]
    async fn test_add_clip_persists_across_handles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");

        let project_id = {
            let store = ProjectStore::new(&path);
            let project = store.create_project("video123").await.unwrap();
            store
                .add_clip_to_project(&project.id, "My_Clip_abcd1234.mp4", info("My Clip"))
                .await
                .unwrap();
            project.id
        };

        // A fresh handle reads the same document
        let store = ProjectStore::new(&path);
        let project = store.get_project(&project_id).await.unwrap();
        assert_eq!(project.clips, vec!["My_Clip_abcd1234.mp4"]);
        assert_eq!(
            project.clip_metadata["My_Clip_abcd1234.mp4"].title,
            "My Clip"
        );
    }

    #[tokio::test]
    async fn test_add_clip_unknown_project() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects.json"));

        let err = store
            .add_clip_to_project("nope", "clip.mp4", info("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_filename_updates_metadata_once() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects.json"));
        let project = store.create_project("v").await.unwrap();

        store
            .add_clip_to_project(&project.id, "clip.mp4", info("first"))
            .await
            .unwrap();
        store
            .add_clip_to_project(&project.id, "clip.mp4", info("second"))
            .await
            .unwrap();

        let project = store.get_project(&project.id).await.unwrap();
        assert_eq!(project.clips.len(), 1);
        assert_eq!(project.clip_metadata["clip.mp4"].title, "second");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects.json"));
        let project = store.create_project("v").await.unwrap();

        store.delete_project(&project.id).await.unwrap();
        assert!(matches!(
            store.get_project(&project.id).await.unwrap_err(),
            StoreError::ProjectNotFound(_)
        ));
        assert!(matches!(
            store.delete_project(&project.id).await.unwrap_err(),
            StoreError::ProjectNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("nonexistent.json"));
        assert!(store.get_projects().await.unwrap().is_empty());
    }
}
