//! Domain core of a joke-sharing backend.
//!
//! Provides validated value objects, the `Joke` and `User` aggregates that own
//! every cross-field and authorization rule, a persistence boundary with optimistic
//! concurrency, and an application service tying them together.
//!
//! # Core Components
//!
//! - [`model`] - Value objects and aggregates; pure, synchronous, no I/O
//! - [`storage`] - The [`StorageProvider`] trait and an in-memory backend
//! - [`JokeService`] - Entry point for untrusted input
//! - [`error`] - Error types with their response classification
//!
//! # Quick Start
//!
//! ```rust
//! use jokebox::JokeService;
//! use jokebox::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = JokeService::new(InMemoryStorage::new());
//! service.register_user("alice", "Alice", None, "alice@example.com").await?;
//! let joke = service.create_joke("alice", "Knock knock", "Who's there?").await?;
//! assert_eq!(joke.likes(), 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod service;
pub mod storage;

// Re-export commonly used types for convenience
pub use error::{DomainError, ErrorKind, JokeboxError, JokeboxResult, ValidationError};
pub use model::value_objects::{
    AnswerText, AvatarUrl, DisplayName, EmailAddress, JokeId, QuestionText, UserId,
};
pub use model::{Joke, MAX_LIKES, User};
pub use service::{JokePage, JokeService, JokeServiceConfig};
pub use storage::{InMemoryStorage, RecordVersion, StorageError, StorageProvider, Versioned};
