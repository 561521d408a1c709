use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::{entities::UserProfile, ports::ProfileStore, value_objects::PROFILE_STORAGE_KEY},
};

/// Persists the profile as `<dir>/labeliq_profile.json`.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", PROFILE_STORAGE_KEY))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", PROFILE_STORAGE_KEY))
    }
}

fn storage_error(path: &Path, e: impl std::fmt::Display) -> CoreError {
    tracing::error!("profile storage failure at {}: {}", path.display(), e);
    CoreError::ProfileStorage(e.to_string())
}

impl ProfileStore for FileProfileStore {
    async fn load(&self) -> Result<Option<UserProfile>, CoreError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&path, e)),
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::error!(
                    "ignoring unreadable profile at {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, profile: UserProfile) -> Result<(), CoreError> {
        let path = self.path();
        let body = serde_json::to_vec_pretty(&profile).map_err(|e| storage_error(&path, e))?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error(&self.dir, e))?;

        let temp = self.temp_path();
        fs::write(&temp, body)
            .await
            .map_err(|e| storage_error(&temp, e))?;
        fs::rename(&temp, &path)
            .await
            .map_err(|e| storage_error(&path, e))?;

        tracing::debug!("profile saved to {}", path.display());
        Ok(())
    }
}
