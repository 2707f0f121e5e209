//! Domain model: validated value objects and the Joke and User aggregates.
//!
//! Nothing in this module performs I/O, logs, or blocks. Every rule violation is
//! returned to the caller as a [`ValidationError`](crate::error::ValidationError) or
//! [`DomainError`](crate::error::DomainError).

pub mod audit;
pub mod joke;
pub mod user;
pub mod value_objects;

pub use audit::AuditStamps;
pub use joke::{Joke, MAX_LIKES};
pub use user::User;
