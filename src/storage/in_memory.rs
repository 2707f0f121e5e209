//! In-memory storage implementation.
//!
//! Records are held as JSON values behind a tokio `RwLock`, the same shape a
//! document store would hand back. Every read decodes and re-validates the stored
//! JSON; a tampered record (see [`InMemoryStorage::insert_raw_joke`]) shows up as
//! [`StorageError::DataCorruption`].
//!
//! # Performance Characteristics
//!
//! * insert/get/save/delete of a joke: O(log n)
//! * list/count by author: O(n) over all jokes
//! * delete user: O(n) for the cascade over jokes

use crate::error::DomainError;
use crate::model::value_objects::{JokeId, UserId};
use crate::model::{Joke, User};
use crate::storage::records::{JOKE, JokeRecord, USER, UserRecord};
use crate::storage::{RecordVersion, StorageError, StorageProvider, Versioned};
use log::{debug, info, trace, warn};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    // Ordered so listings come back in id order
    jokes: BTreeMap<i64, Value>,
    users: HashMap<String, Value>,
    last_joke_id: Option<JokeId>,
}

impl Tables {
    /// Next free id above everything handed out or stored so far.
    fn next_joke_id(&self) -> JokeId {
        let mut id = self
            .last_joke_id
            .map(|id| id.next())
            .unwrap_or_else(JokeId::first);
        while self.jokes.contains_key(&id.value()) {
            id = id.next();
        }
        id
    }

    fn raise_last_joke_id(&mut self, id: JokeId) {
        self.last_joke_id = Some(self.last_joke_id.map_or(id, |last| last.max(id)));
    }
}

/// Thread-safe in-memory storage.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<Tables>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStorageStats {
        let tables = self.data.read().await;
        InMemoryStorageStats {
            joke_count: tables.jokes.len(),
            user_count: tables.users.len(),
        }
    }

    /// Clear all data (useful for testing).
    pub async fn clear(&self) {
        let mut tables = self.data.write().await;
        *tables = Tables::default();
    }

    /// Store raw JSON as joke `id` without any validation.
    ///
    /// Stands in for writes made outside the domain (migrations, manual fixes) when
    /// testing how corrupted records are reported. A positive `id` still counts towards
    /// id allocation, so later inserts never reuse it.
    pub async fn insert_raw_joke(&self, id: i64, data: Value) {
        let mut tables = self.data.write().await;
        if let Ok(id) = JokeId::new(id) {
            tables.raise_last_joke_id(id);
        }
        tables.jokes.insert(id, data);
    }

    /// Store raw JSON as user `id` without any validation.
    pub async fn insert_raw_user(&self, id: impl Into<String>, data: Value) {
        let mut tables = self.data.write().await;
        tables.users.insert(id.into(), data);
    }

    fn version_of(data: &Value) -> RecordVersion {
        RecordVersion::from_content(data.to_string().as_bytes())
    }

    fn author_of(data: &Value) -> Option<&str> {
        data.get("authorId").and_then(Value::as_str)
    }

    fn encode_joke(joke: &Joke) -> Result<Value, StorageError> {
        Ok(serde_json::to_value(JokeRecord::from_joke(joke)?)?)
    }

    fn decode_joke(id: i64, data: &Value) -> Result<Versioned<Joke>, StorageError> {
        let record: JokeRecord = serde_json::from_value(data.clone())
            .map_err(|e| StorageError::corrupted(JOKE, Some(id.to_string()), e))?;
        if record.id != id {
            let error = StorageError::corrupted(
                JOKE,
                Some(id.to_string()),
                format!("record claims id {}", record.id),
            );
            warn!("{}", error);
            return Err(error);
        }
        let joke = record.into_joke().inspect_err(|e| warn!("{}", e))?;
        Ok(Versioned::new(joke, Self::version_of(data)))
    }

    fn decode_user(id: &str, data: &Value) -> Result<Versioned<User>, StorageError> {
        let record: UserRecord = serde_json::from_value(data.clone())
            .map_err(|e| StorageError::corrupted(USER, Some(id.to_string()), e))?;
        if record.id != id {
            let error = StorageError::corrupted(
                USER,
                Some(id.to_string()),
                format!("record claims id '{}'", record.id),
            );
            warn!("{}", error);
            return Err(error);
        }
        let user = User::try_from(record).inspect_err(|e| warn!("{}", e))?;
        Ok(Versioned::new(user, Self::version_of(data)))
    }

    fn conflict(
        resource_type: &str,
        id: impl ToString,
        expected: &RecordVersion,
        actual: &RecordVersion,
    ) -> StorageError {
        let error = StorageError::ConcurrentModification {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            expected_version: expected.to_string(),
            actual_version: actual.to_string(),
        };
        debug!("{}", error);
        error
    }
}

impl StorageProvider for InMemoryStorage {
    async fn insert_joke(&self, mut joke: Joke) -> Result<Versioned<Joke>, StorageError> {
        let mut tables = self.data.write().await;

        let id = match joke.id() {
            Some(id) => {
                if tables.jokes.contains_key(&id.value()) {
                    return Err(StorageError::already_exists(JOKE, id));
                }
                id
            }
            None => {
                let id = tables.next_joke_id();
                joke.assign_id(id)?;
                id
            }
        };

        let data = Self::encode_joke(&joke)?;
        let version = Self::version_of(&data);
        tables.jokes.insert(id.value(), data);
        tables.raise_last_joke_id(id);

        debug!("Inserted joke {} by {}", id, joke.author_id());
        Ok(Versioned::new(joke, version))
    }

    async fn get_joke(&self, id: JokeId) -> Result<Option<Versioned<Joke>>, StorageError> {
        let tables = self.data.read().await;
        trace!("Loading joke {}", id);
        tables
            .jokes
            .get(&id.value())
            .map(|data| Self::decode_joke(id.value(), data))
            .transpose()
    }

    async fn save_joke(
        &self,
        joke: &Joke,
        expected: &RecordVersion,
    ) -> Result<Versioned<Joke>, StorageError> {
        let record = JokeRecord::from_joke(joke)?;
        let mut tables = self.data.write().await;

        let current = tables
            .jokes
            .get(&record.id)
            .ok_or_else(|| StorageError::not_found(JOKE, record.id))?;

        let actual = Self::version_of(current);
        if &actual != expected {
            return Err(Self::conflict(JOKE, record.id, expected, &actual));
        }

        let stored_author = Self::author_of(current).unwrap_or_default().to_string();
        if stored_author != record.author_id {
            warn!(
                "Refusing to move joke {} from {} to {}",
                record.id, stored_author, record.author_id
            );
            return Err(DomainError::AuthorMismatch {
                expected: stored_author,
                actual: record.author_id,
            }
            .into());
        }

        let id = record.id;
        let data = serde_json::to_value(record)?;
        let version = Self::version_of(&data);
        tables.jokes.insert(id, data);

        trace!("Saved joke {} at version {}", id, version);
        Ok(Versioned::new(joke.clone(), version))
    }

    async fn delete_joke(&self, id: JokeId) -> Result<bool, StorageError> {
        let mut tables = self.data.write().await;
        let existed = tables.jokes.remove(&id.value()).is_some();
        if existed {
            debug!("Deleted joke {}", id);
        }
        Ok(existed)
    }

    async fn list_jokes_by_author(
        &self,
        author: &UserId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Versioned<Joke>>, StorageError> {
        let tables = self.data.read().await;
        tables
            .jokes
            .iter()
            .filter(|(_, data)| Self::author_of(data) == Some(author.as_str()))
            .skip(offset)
            .take(limit)
            .map(|(id, data)| Self::decode_joke(*id, data))
            .collect()
    }

    async fn count_jokes_by_author(&self, author: &UserId) -> Result<usize, StorageError> {
        let tables = self.data.read().await;
        Ok(tables
            .jokes
            .values()
            .filter(|data| Self::author_of(data) == Some(author.as_str()))
            .count())
    }

    async fn insert_user(&self, user: &User) -> Result<Versioned<User>, StorageError> {
        let mut tables = self.data.write().await;
        let id = user.id().as_str();
        if tables.users.contains_key(id) {
            return Err(StorageError::already_exists(USER, id));
        }

        let data = serde_json::to_value(UserRecord::from(user))?;
        let version = Self::version_of(&data);
        tables.users.insert(id.to_string(), data);

        debug!("Inserted user {}", id);
        Ok(Versioned::new(user.clone(), version))
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<Versioned<User>>, StorageError> {
        let tables = self.data.read().await;
        tables
            .users
            .get(id.as_str())
            .map(|data| Self::decode_user(id.as_str(), data))
            .transpose()
    }

    async fn save_user(
        &self,
        user: &User,
        expected: &RecordVersion,
    ) -> Result<Versioned<User>, StorageError> {
        let mut tables = self.data.write().await;
        let id = user.id().as_str();

        let current = tables
            .users
            .get(id)
            .ok_or_else(|| StorageError::not_found(USER, id))?;

        let actual = Self::version_of(current);
        if &actual != expected {
            return Err(Self::conflict(USER, id, expected, &actual));
        }

        let data = serde_json::to_value(UserRecord::from(user))?;
        let version = Self::version_of(&data);
        tables.users.insert(id.to_string(), data);

        trace!("Saved user {} at version {}", id, version);
        Ok(Versioned::new(user.clone(), version))
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, StorageError> {
        let mut tables = self.data.write().await;
        let existed = tables.users.remove(id.as_str()).is_some();

        let before = tables.jokes.len();
        tables
            .jokes
            .retain(|_, data| Self::author_of(data) != Some(id.as_str()));
        let removed = before - tables.jokes.len();

        if existed {
            info!("Deleted user {} and {} of their jokes", id, removed);
        }
        Ok(existed)
    }
}

/// Statistics about the current state of in-memory storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStorageStats {
    /// Number of stored jokes
    pub joke_count: usize,
    /// Number of stored users
    pub user_count: usize,
}
