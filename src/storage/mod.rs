//! Persistence boundary for jokes and users.
//!
//! The storage layer converts aggregates to raw records on write and re-validates
//! them on read (see [`records`]). It also serializes concurrent writers: every load
//! returns a [`RecordVersion`], and every save must present the version it read.
//!
//! The storage layer is NOT responsible for:
//! - deciding who may change what (the aggregates do that)
//! - turning user input into value objects (the service layer does that)
//!
//! # Example Usage
//!
//! ```rust
//! use jokebox::model::Joke;
//! use jokebox::model::value_objects::{AnswerText, QuestionText, UserId};
//! use jokebox::storage::{InMemoryStorage, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//! let joke = Joke::create(
//!     None,
//!     UserId::new("alice")?,
//!     QuestionText::new("What's orange and sounds like a parrot?")?,
//!     AnswerText::new("A carrot.")?,
//! )?;
//!
//! // Inserting allocates the id
//! let stored = storage.insert_joke(joke).await?;
//! let id = stored.value().id().expect("inserted jokes have an id");
//!
//! // Saving requires the version that was read
//! let (mut joke, version) = stored.into_parts();
//! joke.increment_likes()?;
//! storage.save_joke(&joke, &version).await?;
//!
//! assert_eq!(storage.get_joke(id).await?.unwrap().value().likes(), 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod records;
pub mod version;

pub use errors::StorageError;
pub use in_memory::{InMemoryStorage, InMemoryStorageStats};
pub use records::{JokeRecord, UserRecord};
pub use version::{RecordVersion, VersionError, Versioned};

use crate::model::value_objects::{JokeId, UserId};
use crate::model::{Joke, User};
use std::future::Future;

/// Storage backend for the Joke and User aggregates.
///
/// # Design Principles
///
/// - **Re-validation on load**: implementations rebuild aggregates through their
///   constructors and report failures as [`StorageError::DataCorruption`]
/// - **Optimistic concurrency**: saves carry the [`RecordVersion`] that was read and
///   fail with [`StorageError::ConcurrentModification`] if it is stale
/// - **Fixed authorship**: saving a joke under a different author than the stored one
///   fails with [`StorageError::Rejected`]
/// - **Async first**: all operations return futures
pub trait StorageProvider: Send + Sync {
    /// Store a new joke, allocating its id if it has none.
    fn insert_joke(
        &self,
        joke: Joke,
    ) -> impl Future<Output = Result<Versioned<Joke>, StorageError>> + Send;

    /// Load a joke by id.
    fn get_joke(
        &self,
        id: JokeId,
    ) -> impl Future<Output = Result<Option<Versioned<Joke>>, StorageError>> + Send;

    /// Replace a stored joke if it is still at `expected`.
    fn save_joke(
        &self,
        joke: &Joke,
        expected: &RecordVersion,
    ) -> impl Future<Output = Result<Versioned<Joke>, StorageError>> + Send;

    /// Remove a joke. Returns whether it existed.
    fn delete_joke(&self, id: JokeId) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Jokes by one author in id order, with pagination.
    fn list_jokes_by_author(
        &self,
        author: &UserId,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Versioned<Joke>>, StorageError>> + Send;

    /// Number of jokes by one author.
    fn count_jokes_by_author(
        &self,
        author: &UserId,
    ) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Store a new user; fails if the id is taken.
    fn insert_user(
        &self,
        user: &User,
    ) -> impl Future<Output = Result<Versioned<User>, StorageError>> + Send;

    /// Load a user by id.
    fn get_user(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Option<Versioned<User>>, StorageError>> + Send;

    /// Replace a stored user if it is still at `expected`.
    fn save_user(
        &self,
        user: &User,
        expected: &RecordVersion,
    ) -> impl Future<Output = Result<Versioned<User>, StorageError>> + Send;

    /// Remove a user and every joke they wrote. Returns whether the user existed.
    fn delete_user(&self, id: &UserId) -> impl Future<Output = Result<bool, StorageError>> + Send;
}
