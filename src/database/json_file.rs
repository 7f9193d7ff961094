use super::{IdStrategy, UserStore};
use crate::models::{NewUser, User, UserRecord};
use crate::utils::error::AppError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// User collection stored as a single JSON array on disk.
///
/// Every call re-reads the file; nothing is cached between requests. Only the
/// top level is checked (it must be an array); entries pass through as stored.
/// Appends hold `write_lock` across read, id allocation and write, and the
/// new collection is written to a sibling temp file and renamed into place.
/// The lock only covers this process: two servers pointed at the same file
/// can still lose writes.
pub struct JsonFileStore {
    path: PathBuf,
    id_strategy: IdStrategy,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, id_strategy: IdStrategy) -> Self {
        Self {
            path: path.into(),
            id_strategy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_collection(&self) -> Result<Vec<UserRecord>, AppError> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| AppError::StorageRead(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_slice(&raw)
            .map_err(|e| AppError::StorageRead(format!("{}: {}", self.path.display(), e)))
    }

    async fn write_collection(&self, users: &[UserRecord]) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(users)
            .map_err(|e| AppError::StorageWrite(format!("serialize: {}", e)))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, &body)
            .await
            .map_err(|e| AppError::StorageWrite(format!("{}: {}", temp_path.display(), e)))?;

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AppError::StorageWrite(format!("{}: {}", self.path.display(), e)));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("users.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        self.read_collection().await
    }

    async fn append(&self, new_user: NewUser) -> Result<User, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.read_collection().await?;
        let user = new_user.into_user(self.id_strategy.next_id(&users)?);
        users.push(UserRecord::from(user.clone()));

        self.write_collection(&users).await?;
        log::debug!("💾 Persisted {} users to {}", users.len(), self.path.display());

        Ok(user)
    }
}
