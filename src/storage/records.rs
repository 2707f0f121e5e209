//! Raw storage records and their conversion to and from aggregates.
//!
//! Writing extracts raw primitives from the validated types. Reading re-runs every
//! constructor and aggregate rule; any failure is reported as
//! [`StorageError::DataCorruption`] rather than a validation error.

use crate::model::value_objects::{
    AnswerText, AvatarUrl, DisplayName, EmailAddress, JokeId, QuestionText, UserId,
};
use crate::model::{Joke, User};
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const JOKE: &str = "Joke";
pub(crate) const USER: &str = "User";

/// Stored form of a [`Joke`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeRecord {
    pub id: i64,
    pub author_id: String,
    pub question: String,
    pub answer: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JokeRecord {
    /// Extract the raw values of a joke that already has an id.
    pub fn from_joke(joke: &Joke) -> Result<Self, StorageError> {
        let id = joke
            .id()
            .ok_or_else(|| StorageError::internal("cannot store a joke without an id"))?;

        Ok(Self {
            id: id.value(),
            author_id: joke.author_id().as_str().to_string(),
            question: joke.question().as_str().to_string(),
            answer: joke.answer().as_str().to_string(),
            likes: i64::from(joke.likes()),
            created_at: joke.created_at(),
            updated_at: joke.updated_at(),
        })
    }

    /// Re-validate the record into a [`Joke`].
    pub fn into_joke(self) -> Result<Joke, StorageError> {
        let key = Some(self.id.to_string());
        let corrupted = |details: String| StorageError::corrupted(JOKE, key.clone(), details);

        let id = JokeId::new(self.id).map_err(|e| corrupted(e.to_string()))?;
        let author = UserId::new(&self.author_id).map_err(|e| corrupted(e.to_string()))?;
        let question = QuestionText::new(&self.question).map_err(|e| corrupted(e.to_string()))?;
        let answer = AnswerText::new(&self.answer).map_err(|e| corrupted(e.to_string()))?;

        Joke::restore(
            id,
            author,
            question,
            answer,
            self.likes,
            self.created_at,
            self.updated_at,
        )
        .map_err(|e| corrupted(e.to_string()))
    }
}

/// Stored form of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            display_name: user.display_name().as_str().to_string(),
            avatar_url: user.avatar_url().map(|url| url.as_str().to_string()),
            email: user.email().as_str().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = StorageError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let key = Some(record.id.clone());
        let corrupted = |details: String| StorageError::corrupted(USER, key.clone(), details);

        let id = UserId::new(&record.id).map_err(|e| corrupted(e.to_string()))?;
        let display_name =
            DisplayName::new(&record.display_name).map_err(|e| corrupted(e.to_string()))?;
        // Stored avatars only had their length checked on the way in
        let avatar_url = AvatarUrl::parse_optional(record.avatar_url.as_deref())
            .map_err(|e| corrupted(e.to_string()))?;
        let email = EmailAddress::new(&record.email).map_err(|e| corrupted(e.to_string()))?;

        User::restore(
            id,
            display_name,
            avatar_url,
            email,
            record.created_at,
            record.updated_at,
        )
        .map_err(|e| corrupted(e.to_string()))
    }
}

impl TryFrom<JokeRecord> for Joke {
    type Error = StorageError;

    fn try_from(record: JokeRecord) -> Result<Self, Self::Error> {
        record.into_joke()
    }
}
