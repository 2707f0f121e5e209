//! Error types for jokebox operations.
//!
//! Failures are split by the rule that produced them:
//!
//! - [`ValidationError`] - a single value failed its shape rule (empty, too long, malformed)
//! - [`DomainError`] - an aggregate rule spanning fields, lifecycle or caller identity was broken
//! - [`JokeboxError`] - everything a service call can return, including storage failures
//!
//! Every variant of the first two carries a fixed message key (see
//! [`ValidationError::message_key`]) for presentation layers, and an [`ErrorKind`] that
//! transport layers map to a response status.

use crate::storage::StorageError;

/// Broad classification of a failure, used to pick a client-facing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value failed its static shape rule.
    Structural,
    /// A cross-field or lifecycle rule was violated.
    DomainRule,
    /// An actor tried to alter state it does not own.
    Authorization,
    /// The stored state moved on since it was read.
    Conflict,
    /// The addressed aggregate does not exist.
    NotFound,
    /// Stored data no longer satisfies the rules it was written under.
    DataCorruption,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// HTTP status a transport layer should answer with for this kind of failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Structural => 400,
            ErrorKind::DomainRule => 409,
            ErrorKind::Authorization => 403,
            ErrorKind::Conflict => 409,
            ErrorKind::NotFound => 404,
            ErrorKind::DataCorruption | ErrorKind::Internal => 500,
        }
    }

    /// Whether the failure was caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Structural validation failures raised by value object constructors.
///
/// These are surfaced at construction time, so an aggregate can never hold a value
/// that produced one of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Joke identifiers start at 1
    #[error("Joke id must be a positive integer, got {value}")]
    NonPositiveJokeId { value: i64 },

    #[error("User id is required")]
    UserIdRequired,

    #[error("User id must be at most {max} characters, got {actual}")]
    UserIdTooLong { max: usize, actual: usize },

    /// Identity keys are restricted to a safe character set
    #[error("User id contains invalid character '{character}'")]
    UserIdInvalidCharacter { character: char },

    #[error("Question is required")]
    QuestionRequired,

    #[error("Question must be at most {max} characters, got {actual}")]
    QuestionTooLong { max: usize, actual: usize },

    #[error("Answer is required")]
    AnswerRequired,

    #[error("Answer must be at most {max} characters, got {actual}")]
    AnswerTooLong { max: usize, actual: usize },

    #[error("Display name is required")]
    DisplayNameRequired,

    #[error("Display name must be at most {max} characters, got {actual}")]
    DisplayNameTooLong { max: usize, actual: usize },

    #[error("Email is required")]
    EmailRequired,

    #[error("Email must be at most {max} characters, got {actual}")]
    EmailTooLong { max: usize, actual: usize },

    #[error("Email must not contain whitespace")]
    EmailContainsWhitespace,

    #[error("Email '{value}' is not a valid address")]
    InvalidEmailFormat { value: String },

    #[error("Avatar URL is required")]
    AvatarUrlRequired,

    #[error("Avatar URL must be at most {max} characters, got {actual}")]
    AvatarUrlTooLong { max: usize, actual: usize },

    #[error("Avatar URL '{value}' is not a valid http(s) URL")]
    InvalidAvatarUrl { value: String },
}

impl ValidationError {
    /// Stable key identifying the violated rule, for client-side message lookup.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveJokeId { .. } => "JokeIdMustBePositive",
            ValidationError::UserIdRequired => "UserIdRequired",
            ValidationError::UserIdTooLong { .. } => "UserIdTooLong",
            ValidationError::UserIdInvalidCharacter { .. } => "UserIdInvalidCharacter",
            ValidationError::QuestionRequired => "QuestionRequired",
            ValidationError::QuestionTooLong { .. } => "QuestionTooLong",
            ValidationError::AnswerRequired => "AnswerRequired",
            ValidationError::AnswerTooLong { .. } => "AnswerTooLong",
            ValidationError::DisplayNameRequired => "DisplayNameRequired",
            ValidationError::DisplayNameTooLong { .. } => "DisplayNameTooLong",
            ValidationError::EmailRequired => "EmailRequired",
            ValidationError::EmailTooLong { .. } => "EmailTooLong",
            ValidationError::EmailContainsWhitespace => "EmailContainsWhitespace",
            ValidationError::InvalidEmailFormat { .. } => "EmailInvalidFormat",
            ValidationError::AvatarUrlRequired => "AvatarUrlRequired",
            ValidationError::AvatarUrlTooLong { .. } => "AvatarUrlTooLong",
            ValidationError::InvalidAvatarUrl { .. } => "AvatarUrlInvalidFormat",
        }
    }

    /// Every validation failure is structural.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}

/// Violations of rules enforced by the [`Joke`](crate::model::Joke) and
/// [`User`](crate::model::User) aggregates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Question and answer cannot be the same")]
    QuestionAndAnswerCannotMatch,

    #[error("Joke already has the maximum of {max} likes")]
    MaximumLikeOfJokeReached { max: u32 },

    #[error("Joke has no likes to remove")]
    MinimumLikeOfJokeReached,

    #[error("Like count {likes} is outside 0..={max}")]
    LikesOutOfRange { likes: i64, max: u32 },

    /// Only the author may edit a joke
    #[error("User '{editor}' is not allowed to update this joke")]
    UpdateNotAllowed { editor: String },

    /// Only the author may delete a joke
    #[error("User '{actor}' is not allowed to delete this joke")]
    DeleteNotAllowed { actor: String },

    /// A joke cannot be moved to another author
    #[error("Joke belongs to '{expected}', not '{actual}'")]
    AuthorMismatch { expected: String, actual: String },

    #[error("Joke already has id {id}")]
    IdAlreadyAssigned { id: i64 },

    #[error("Last update cannot precede creation")]
    UpdatedBeforeCreated,
}

impl DomainError {
    /// Stable key identifying the violated rule, for client-side message lookup.
    pub fn message_key(&self) -> &'static str {
        match self {
            DomainError::QuestionAndAnswerCannotMatch => "QuestionAndAnswerCannotMatch",
            DomainError::MaximumLikeOfJokeReached { .. } => "MaximumLikeOfJokeReached",
            DomainError::MinimumLikeOfJokeReached => "MinimumLikeOfJokeReached",
            DomainError::LikesOutOfRange { .. } => "LikesOutOfRange",
            DomainError::UpdateNotAllowed { .. } => "UpdateNotAllowed",
            DomainError::DeleteNotAllowed { .. } => "DeleteNotAllowed",
            DomainError::AuthorMismatch { .. } => "AuthorMismatch",
            DomainError::IdAlreadyAssigned { .. } => "IdAlreadyAssigned",
            DomainError::UpdatedBeforeCreated => "UpdatedBeforeCreated",
        }
    }

    /// Authorization failures are kept apart from other rule violations.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::UpdateNotAllowed { .. } | DomainError::DeleteNotAllowed { .. } => {
                ErrorKind::Authorization
            }
            _ => ErrorKind::DomainRule,
        }
    }

    /// Whether a non-owning actor attempted the operation.
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }
}

/// Error type returned by [`JokeService`](crate::service::JokeService) operations.
#[derive(Debug, thiserror::Error)]
pub enum JokeboxError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Domain rule violated: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{resource_type} with id {id} not found")]
    NotFound { resource_type: String, id: String },
}

impl JokeboxError {
    /// Create a not found error.
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Classification used to choose a response status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JokeboxError::Validation(e) => e.kind(),
            JokeboxError::Domain(e) => e.kind(),
            JokeboxError::Storage(e) => e.kind(),
            JokeboxError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

// Result type aliases for convenience
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type DomainResult<T> = Result<T, DomainError>;
pub type JokeboxResult<T> = Result<T, JokeboxError>;
