pub mod json_file;

pub use json_file::JsonFileStore;

use crate::models::{NewUser, User, UserRecord};
use crate::utils::error::AppError;
use async_trait::async_trait;

/// Persistence for the user collection.
///
/// Handlers only talk to this trait, so the backing store can change
/// (locking strategy, atomic writes, an embedded database) without touching them.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Loads the whole collection in stored order, unrecognized entries included.
    async fn list(&self) -> Result<Vec<UserRecord>, AppError>;

    /// Allocates an id for `new_user`, appends it and persists the collection.
    async fn append(&self, new_user: NewUser) -> Result<User, AppError>;

    /// First user whose id matches, scanning the full collection.
    async fn get_by_id(&self, id: u64) -> Result<Option<User>, AppError> {
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .filter_map(UserRecord::into_user)
            .find(|user| user.id == id))
    }
}

/// How `append` picks the id of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `count of existing entries + 1`, unrecognized entries included
    #[default]
    CollectionLength,
    /// `highest existing id + 1`; never reuses an id after records are removed by hand.
    /// Entries without an integer id are ignored.
    HighestPlusOne,
}

impl IdStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "length" | "count" => Some(Self::CollectionLength),
            "max" | "highest" => Some(Self::HighestPlusOne),
            _ => None,
        }
    }

    /// Fails with `StorageWrite` when the next id does not fit in a `u64`.
    pub fn next_id(&self, users: &[UserRecord]) -> Result<u64, AppError> {
        let last = match self {
            Self::CollectionLength => users.len() as u64,
            Self::HighestPlusOne => users.iter().filter_map(UserRecord::id).max().unwrap_or(0),
        };

        last.checked_add(1)
            .ok_or_else(|| AppError::StorageWrite(format!("no id available after {}", last)))
    }
}
