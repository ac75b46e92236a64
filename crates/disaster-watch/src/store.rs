//! Persistence of lookup results

use crate::error::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

const FILE_PREFIX: &str = "disaster_data";

/// Writes each successful lookup to its own JSON file
///
/// Files are named `disaster_data-<UTC timestamp>-<short id>.json` and are
/// written to a temporary name first, then renamed into place, so readers
/// never observe a partial file.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory receiving the result files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `body` and return the path of the new file
    pub async fn save(&self, body: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;

        let file_name = Self::file_name();
        let path = self.dir.join(&file_name);
        let tmp_path = self.dir.join(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, body).await?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        info!(path = %path.display(), bytes = body.len(), "Result saved");
        Ok(path)
    }

    fn file_name() -> String {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let id = Uuid::new_v4().simple().to_string();
        format!("{FILE_PREFIX}-{timestamp}-{}.json", &id[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("out"));

        let body = br#"{"dates":[],"locations":[],"commentary":[],"sources":[]}"#;
        let path = store.save(body).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), body);
        assert_eq!(path.parent().unwrap(), store.dir());
    }

    #[tokio::test]
    async fn test_each_save_gets_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        let first = store.save(b"{}").await.unwrap();
        let second = store.save(b"{}").await.unwrap();
        assert_ne!(first, second);

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names.len(), 2);
        for name in names {
            assert!(name.starts_with("disaster_data-"));
            assert!(name.ends_with(".json"));
        }
    }
}
