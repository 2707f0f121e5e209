//! Unit tests for the domain model
//!
//! These tests exercise value objects and aggregates directly, without storage.
//!
//! ## Organization
//!
//! - [`value_objects`] - Construction rules of the validated scalars
//! - [`joke`] - The Joke aggregate
//! - [`user`] - The User aggregate
//! - [`properties`] - Property-based tests of the domain rules

pub mod joke;
pub mod value_objects;
