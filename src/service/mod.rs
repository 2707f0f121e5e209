//! Application service over the joke and user aggregates.
//!
//! [`JokeService`] is the entry point for untrusted input. It turns raw strings and
//! numbers into value objects, calls the aggregate operations that enforce the domain
//! rules, and persists the result through a [`StorageProvider`].
//!
//! Every mutation follows the same cycle: load the record with its version, apply the
//! change to the aggregate, save with the version that was read. If another writer got
//! there first the cycle is repeated, up to
//! [`JokeServiceConfig::max_conflict_retries`] times.
//!
//! # Example Usage
//!
//! ```rust
//! use jokebox::service::JokeService;
//! use jokebox::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = JokeService::new(InMemoryStorage::new());
//!
//! service
//!     .register_user("alice", "Alice", None, "alice@example.com")
//!     .await?;
//! let joke = service
//!     .create_joke("alice", "Why did the scarecrow win an award?", "He was outstanding in his field.")
//!     .await?;
//!
//! let id = joke.id().expect("stored jokes have an id").value();
//! let liked = service.like_joke(id).await?;
//! assert_eq!(liked.likes(), 1);
//!
//! // Only the author may edit
//! let denied = service.edit_joke("bob", id, "Q", "A").await;
//! assert_eq!(denied.unwrap_err().status_code(), 403);
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use config::JokeServiceConfig;

use crate::error::{ErrorKind, JokeboxError, JokeboxResult};
use crate::model::value_objects::{
    AnswerText, AvatarUrl, DisplayName, EmailAddress, JokeId, QuestionText, UserId,
};
use crate::model::{Joke, User};
use crate::storage::records::{JOKE, USER};
use crate::storage::{StorageProvider, Versioned};
use log::{debug, info, trace, warn};

/// One page of an author's jokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokePage {
    pub items: Vec<Joke>,
    /// Number of jokes by the author across all pages
    pub total: usize,
    pub offset: usize,
    /// Page size actually applied after defaults and capping
    pub limit: usize,
}

impl JokePage {
    /// Whether jokes exist beyond this page.
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}

/// Joke and user operations on top of a pluggable storage backend.
#[derive(Debug, Clone)]
pub struct JokeService<S: StorageProvider> {
    storage: S,
    config: JokeServiceConfig,
}

impl<S: StorageProvider> JokeService<S> {
    /// Create a service with the default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, JokeServiceConfig::default())
    }

    pub fn with_config(storage: S, config: JokeServiceConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &JokeServiceConfig {
        &self.config
    }

    // ---- users ----

    /// Register a new user.
    ///
    /// A supplied avatar must be a well-formed http(s) URL.
    pub async fn register_user(
        &self,
        id: &str,
        display_name: &str,
        avatar_url: Option<&str>,
        email: &str,
    ) -> JokeboxResult<User> {
        let user = User::new(
            UserId::new(id)?,
            DisplayName::new(display_name)?,
            AvatarUrl::parse_optional_well_formed(avatar_url)?,
            EmailAddress::new(email)?,
        );

        let stored = self.storage.insert_user(&user).await?;
        info!("Registered user {}", user.id());
        Ok(stored.into_value())
    }

    pub async fn get_user(&self, id: &str) -> JokeboxResult<User> {
        let id = UserId::new(id)?;
        Ok(self.load_user(&id).await?.into_value())
    }

    /// Update display name, avatar and (optionally) email in one step.
    ///
    /// Nothing is written when the values are unchanged.
    pub async fn update_profile(
        &self,
        id: &str,
        display_name: &str,
        avatar_url: Option<&str>,
        email: Option<&str>,
    ) -> JokeboxResult<User> {
        let id = UserId::new(id)?;
        self.mutate_user(&id, |user| {
            Ok(user.update_profile(display_name, avatar_url, email)?)
        })
        .await
    }

    pub async fn change_email(&self, id: &str, email: &str) -> JokeboxResult<User> {
        let id = UserId::new(id)?;
        self.mutate_user(&id, |user| Ok(user.change_email(email)?))
            .await
    }

    /// Set the avatar, or clear it with `None`.
    pub async fn set_avatar(&self, id: &str, avatar_url: Option<&str>) -> JokeboxResult<User> {
        let id = UserId::new(id)?;
        self.mutate_user(&id, |user| Ok(user.set_avatar(avatar_url)?))
            .await
    }

    /// Delete a user together with all of their jokes.
    pub async fn delete_user(&self, id: &str) -> JokeboxResult<()> {
        let id = UserId::new(id)?;
        if !self.storage.delete_user(&id).await? {
            return Err(JokeboxError::not_found(USER, id));
        }
        Ok(())
    }

    // ---- jokes ----

    /// Create a joke by an existing user.
    pub async fn create_joke(
        &self,
        author: &str,
        question: &str,
        answer: &str,
    ) -> JokeboxResult<Joke> {
        let author = UserId::new(author)?;
        let question = QuestionText::new(question)?;
        let answer = AnswerText::new(answer)?;

        // A missing author is reported ahead of rule failures
        self.load_user(&author).await?;
        let joke = Joke::create(None, author, question, answer)?;

        let stored = self.storage.insert_joke(joke).await?.into_value();
        if let Some(id) = stored.id() {
            info!("Created joke {} by {}", id, stored.author_id());
        }
        Ok(stored)
    }

    pub async fn get_joke(&self, id: i64) -> JokeboxResult<Joke> {
        let id = JokeId::new(id)?;
        Ok(self.load_joke(id).await?.into_value())
    }

    /// Add one like.
    pub async fn like_joke(&self, id: i64) -> JokeboxResult<Joke> {
        let id = JokeId::new(id)?;
        self.mutate_joke(id, |joke| {
            let likes = joke.increment_likes()?;
            trace!("Joke {} now has {} likes", id, likes);
            Ok(())
        })
        .await
    }

    /// Remove one like.
    pub async fn unlike_joke(&self, id: i64) -> JokeboxResult<Joke> {
        let id = JokeId::new(id)?;
        self.mutate_joke(id, |joke| {
            let likes = joke.decrement_likes()?;
            trace!("Joke {} now has {} likes", id, likes);
            Ok(())
        })
        .await
    }

    /// Replace question and answer on behalf of `editor`, who must be the author.
    pub async fn edit_joke(
        &self,
        editor: &str,
        id: i64,
        question: &str,
        answer: &str,
    ) -> JokeboxResult<Joke> {
        let editor = UserId::new(editor)?;
        let id = JokeId::new(id)?;
        let question = QuestionText::new(question)?;
        let answer = AnswerText::new(answer)?;

        self.mutate_joke(id, |joke| {
            joke.update(&editor, question.clone(), answer.clone())?;
            Ok(())
        })
        .await
        .inspect_err(|e| {
            if e.kind() == ErrorKind::Authorization {
                warn!("User {} attempted to edit joke {}", editor, id);
            }
        })
    }

    /// Delete a joke on behalf of `actor`, who must be the author.
    pub async fn delete_joke(&self, actor: &str, id: i64) -> JokeboxResult<()> {
        let actor = UserId::new(actor)?;
        let id = JokeId::new(id)?;

        let joke = self.load_joke(id).await?.into_value();
        joke.ensure_can_delete(&actor).inspect_err(|_| {
            warn!("User {} attempted to delete joke {}", actor, id);
        })?;

        if !self.storage.delete_joke(id).await? {
            return Err(JokeboxError::not_found(JOKE, id));
        }
        info!("Deleted joke {}", id);
        Ok(())
    }

    /// List an author's jokes in id order.
    ///
    /// `limit` defaults and is capped according to the service configuration.
    pub async fn list_jokes_by_author(
        &self,
        author: &str,
        offset: usize,
        limit: Option<usize>,
    ) -> JokeboxResult<JokePage> {
        let author = UserId::new(author)?;
        let limit = self.config.page_size(limit);

        let total = self.storage.count_jokes_by_author(&author).await?;
        let items = self
            .storage
            .list_jokes_by_author(&author, offset, limit)
            .await?
            .into_iter()
            .map(Versioned::into_value)
            .collect();

        Ok(JokePage {
            items,
            total,
            offset,
            limit,
        })
    }

    // ---- helpers ----

    async fn load_joke(&self, id: JokeId) -> JokeboxResult<Versioned<Joke>> {
        self.storage
            .get_joke(id)
            .await?
            .ok_or_else(|| JokeboxError::not_found(JOKE, id))
    }

    async fn load_user(&self, id: &UserId) -> JokeboxResult<Versioned<User>> {
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| JokeboxError::not_found(USER, id))
    }

    /// Load, apply and save a joke, retrying on concurrent modification.
    async fn mutate_joke<F>(&self, id: JokeId, mut apply: F) -> JokeboxResult<Joke>
    where
        F: FnMut(&mut Joke) -> JokeboxResult<()> + Send,
    {
        let mut attempt = 0;
        loop {
            let (mut joke, version) = self.load_joke(id).await?.into_parts();
            apply(&mut joke)?;

            match self.storage.save_joke(&joke, &version).await {
                Ok(saved) => return Ok(saved.into_value()),
                Err(e) if e.is_conflict() && attempt < self.config.max_conflict_retries => {
                    attempt += 1;
                    debug!(
                        "Retrying joke {} after concurrent modification ({}/{})",
                        id, attempt, self.config.max_conflict_retries
                    );
                }
                Err(e) => {
                    if e.is_conflict() {
                        warn!("Giving up on joke {} after {} retries", id, attempt);
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Load, apply and save a user, retrying on concurrent modification.
    ///
    /// `apply` reports whether it changed anything; unchanged users are not written.
    async fn mutate_user<F>(&self, id: &UserId, mut apply: F) -> JokeboxResult<User>
    where
        F: FnMut(&mut User) -> JokeboxResult<bool> + Send,
    {
        let mut attempt = 0;
        loop {
            let (mut user, version) = self.load_user(id).await?.into_parts();
            if !apply(&mut user)? {
                trace!("User {} unchanged", id);
                return Ok(user);
            }

            match self.storage.save_user(&user, &version).await {
                Ok(saved) => return Ok(saved.into_value()),
                Err(e) if e.is_conflict() && attempt < self.config.max_conflict_retries => {
                    attempt += 1;
                    debug!(
                        "Retrying user {} after concurrent modification ({}/{})",
                        id, attempt, self.config.max_conflict_retries
                    );
                }
                Err(e) => {
                    if e.is_conflict() {
                        warn!("Giving up on user {} after {} retries", id, attempt);
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
