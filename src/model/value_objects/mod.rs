//! Value objects for jokebox domain primitives.
//!
//! Each value object enforces its invariant in its constructor, so an invalid
//! identifier or text cannot exist in memory.
//!
//! ## Design Principles
//!
//! - **Immutable**: no setters; a different value means a new instance
//! - **Self-validating**: one fallible constructor per type
//! - **Boundary-friendly**: the raw value is readable through a single accessor and
//!   deserialization re-runs the constructor
//!
//! ## Usage Pattern
//!
//! ```rust
//! use jokebox::model::value_objects::{AnswerText, QuestionText};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let question = QuestionText::new("Why did the scarecrow win an award?")?;
//!     let answer = AnswerText::new("He was outstanding in his field.")?;
//!
//!     println!("{question} {answer}");
//!     Ok(())
//! }
//! ```

mod answer_text;
mod avatar_url;
mod display_name;
mod email_address;
mod joke_id;
mod question_text;
mod text;
mod user_id;

pub use answer_text::{AnswerText, MAX_ANSWER_LENGTH};
pub use avatar_url::{AvatarUrl, MAX_AVATAR_URL_LENGTH};
pub use display_name::{DisplayName, MAX_DISPLAY_NAME_LENGTH};
pub use email_address::{EmailAddress, MAX_EMAIL_LENGTH};
pub use joke_id::JokeId;
pub use question_text::{MAX_QUESTION_LENGTH, QuestionText};
pub use user_id::{MAX_USER_ID_LENGTH, UserId};
