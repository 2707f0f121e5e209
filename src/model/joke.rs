//! The Joke aggregate.
//!
//! A joke is a question/answer pair attributed to one author. The aggregate is the
//! only place that decides whether a joke may be created, liked, unliked or edited;
//! callers hand it validated value objects and the acting user's id.
//!
//! Every mutator checks its rules before touching any field, so a failed call leaves
//! the joke exactly as it was.

use crate::error::{DomainError, DomainResult};
use crate::model::audit::AuditStamps;
use crate::model::value_objects::{AnswerText, JokeId, QuestionText, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upper bound on the like counter of a single joke.
pub const MAX_LIKES: u32 = 1_000_000;

/// A joke and its like counter.
///
/// ## Invariants
///
/// - question and answer differ (exact, case-sensitive comparison)
/// - `0 <= likes <= MAX_LIKES`
/// - the author never changes after construction
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::Joke;
/// use jokebox::model::value_objects::{AnswerText, QuestionText, UserId};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let author = UserId::new("alice")?;
///     let mut joke = Joke::create(
///         None,
///         author.clone(),
///         QuestionText::new("Why don't skeletons fight each other?")?,
///         AnswerText::new("They don't have the guts.")?,
///     )?;
///
///     joke.increment_likes()?;
///     assert_eq!(joke.likes(), 1);
///     assert!(joke.updated_at().is_some());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    id: Option<JokeId>,
    author_id: UserId,
    question: QuestionText,
    answer: AnswerText,
    likes: u32,
    #[serde(flatten)]
    stamps: AuditStamps,
}

impl Joke {
    /// Create a new joke with no likes.
    ///
    /// `id` is `None` for a joke that has not been saved yet.
    ///
    /// # Errors
    ///
    /// [`DomainError::QuestionAndAnswerCannotMatch`] if both texts are identical.
    pub fn create(
        id: Option<JokeId>,
        author_id: UserId,
        question: QuestionText,
        answer: AnswerText,
    ) -> DomainResult<Self> {
        Self::ensure_distinct(&question, &answer)?;
        Ok(Self {
            id,
            author_id,
            question,
            answer,
            likes: 0,
            stamps: AuditStamps::new_for_creation(),
        })
    }

    /// Rebuild a joke read back from storage, re-checking every aggregate rule.
    pub fn restore(
        id: JokeId,
        author_id: UserId,
        question: QuestionText,
        answer: AnswerText,
        likes: i64,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        Self::ensure_distinct(&question, &answer)?;
        let likes = u32::try_from(likes)
            .ok()
            .filter(|count| *count <= MAX_LIKES)
            .ok_or(DomainError::LikesOutOfRange {
                likes,
                max: MAX_LIKES,
            })?;
        let stamps = AuditStamps::restore(created_at, updated_at)?;

        Ok(Self {
            id: Some(id),
            author_id,
            question,
            answer,
            likes,
            stamps,
        })
    }

    /// Attach the id allocated by storage on first save.
    pub fn assign_id(&mut self, id: JokeId) -> DomainResult<()> {
        if let Some(existing) = self.id {
            return Err(DomainError::IdAlreadyAssigned {
                id: existing.value(),
            });
        }
        self.id = Some(id);
        Ok(())
    }

    /// Add one like and return the new count.
    pub fn increment_likes(&mut self) -> DomainResult<u32> {
        if self.likes >= MAX_LIKES {
            return Err(DomainError::MaximumLikeOfJokeReached { max: MAX_LIKES });
        }
        self.likes += 1;
        self.stamps.touch();
        Ok(self.likes)
    }

    /// Remove one like and return the new count.
    pub fn decrement_likes(&mut self) -> DomainResult<u32> {
        if self.likes == 0 {
            return Err(DomainError::MinimumLikeOfJokeReached);
        }
        self.likes -= 1;
        self.stamps.touch();
        Ok(self.likes)
    }

    /// Replace question and answer on behalf of `editor`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UpdateNotAllowed`] unless `editor` is the author
    /// - [`DomainError::QuestionAndAnswerCannotMatch`] if the new texts are identical
    pub fn update(
        &mut self,
        editor: &UserId,
        question: QuestionText,
        answer: AnswerText,
    ) -> DomainResult<()> {
        if !self.is_authored_by(editor) {
            return Err(DomainError::UpdateNotAllowed {
                editor: editor.to_string(),
            });
        }
        Self::ensure_distinct(&question, &answer)?;

        self.question = question;
        self.answer = answer;
        self.stamps.touch();
        Ok(())
    }

    /// Check that `actor` may delete this joke.
    ///
    /// Deletion itself happens outside the aggregate.
    pub fn ensure_can_delete(&self, actor: &UserId) -> DomainResult<()> {
        if !self.is_authored_by(actor) {
            return Err(DomainError::DeleteNotAllowed {
                actor: actor.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author_id == user
    }

    pub fn id(&self) -> Option<JokeId> {
        self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn question(&self) -> &QuestionText {
        &self.question
    }

    pub fn answer(&self) -> &AnswerText {
        &self.answer
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.stamps.created_at()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.stamps.updated_at()
    }

    fn ensure_distinct(question: &QuestionText, answer: &AnswerText) -> DomainResult<()> {
        if question.as_str() == answer.as_str() {
            return Err(DomainError::QuestionAndAnswerCannotMatch);
        }
        Ok(())
    }
}
