//! Joke Aggregate Tests

use crate::assert_message_key;
use crate::common::JokeBuilder;
use chrono::{Duration, Utc};
use jokebox::error::{DomainError, ErrorKind};
use jokebox::model::value_objects::{AnswerText, JokeId, QuestionText, UserId};
use jokebox::{Joke, MAX_LIKES};

#[test]
fn test_new_joke_starts_clean() {
    let joke = JokeBuilder::new().build().unwrap();
    assert_eq!(joke.id(), None);
    assert_eq!(joke.likes(), 0);
    assert_eq!(joke.updated_at(), None);
    assert_eq!(joke.author_id().as_str(), "alice");
}

#[test]
fn test_identical_texts_are_rejected() {
    let result = JokeBuilder::new()
        .with_question("Same")
        .with_answer("Same")
        .build();
    assert_message_key!(result, "QuestionAndAnswerCannotMatch");

    // Comparison is exact: case differences are allowed
    assert!(
        JokeBuilder::new()
            .with_question("Same")
            .with_answer("same")
            .build()
            .is_ok()
    );

    // Comparison happens after trimming
    let result = JokeBuilder::new()
        .with_question("Same ")
        .with_answer(" Same")
        .build();
    assert_message_key!(result, "QuestionAndAnswerCannotMatch");
}

#[test]
fn test_likes_stay_in_range() {
    let mut joke = JokeBuilder::new().with_likes(2).build().unwrap();
    assert_eq!(joke.likes(), 2);

    assert_eq!(joke.decrement_likes(), Ok(1));
    assert_eq!(joke.decrement_likes(), Ok(0));
    assert_eq!(
        joke.decrement_likes(),
        Err(DomainError::MinimumLikeOfJokeReached)
    );
    assert_eq!(joke.likes(), 0);
}

#[test]
fn test_increment_at_maximum_fails() {
    let mut joke = Joke::restore(
        JokeId::new(1).unwrap(),
        UserId::new("alice").unwrap(),
        QuestionText::new("Q").unwrap(),
        AnswerText::new("A").unwrap(),
        i64::from(MAX_LIKES),
        Utc::now(),
        None,
    )
    .unwrap();

    assert_eq!(
        joke.increment_likes(),
        Err(DomainError::MaximumLikeOfJokeReached { max: MAX_LIKES })
    );
    assert_eq!(joke.likes(), MAX_LIKES);
    assert_eq!(joke.updated_at(), None);
}

#[test]
fn test_like_changes_advance_updated_at() {
    let mut joke = JokeBuilder::new().build().unwrap();
    joke.increment_likes().unwrap();
    let first = joke.updated_at().unwrap();
    joke.decrement_likes().unwrap();
    let second = joke.updated_at().unwrap();

    assert!(first >= joke.created_at());
    assert!(second >= first);
}

#[test]
fn test_only_the_author_may_update() {
    let mut joke = JokeBuilder::new().by("alice").build().unwrap();
    let before = joke.clone();

    let result = joke.update(
        &UserId::new("bob").unwrap(),
        QuestionText::new("New question").unwrap(),
        AnswerText::new("New answer").unwrap(),
    );

    let error = result.unwrap_err();
    assert!(matches!(error, DomainError::UpdateNotAllowed { ref editor } if editor == "bob"));
    assert_eq!(error.kind(), ErrorKind::Authorization);
    assert_eq!(error.kind().status_code(), 403);
    assert_eq!(joke, before);
}

#[test]
fn test_author_update_replaces_texts() {
    let author = UserId::new("alice").unwrap();
    let mut joke = JokeBuilder::new().build().unwrap();

    joke.update(
        &author,
        QuestionText::new("New question").unwrap(),
        AnswerText::new("New answer").unwrap(),
    )
    .unwrap();

    assert_eq!(joke.question().as_str(), "New question");
    assert_eq!(joke.answer().as_str(), "New answer");
    assert!(joke.updated_at().is_some());

    // Authorization is checked before the texts
    let result = joke.update(
        &UserId::new("bob").unwrap(),
        QuestionText::new("Same").unwrap(),
        AnswerText::new("Same").unwrap(),
    );
    assert!(matches!(result, Err(DomainError::UpdateNotAllowed { .. })));

    let result = joke.update(
        &author,
        QuestionText::new("Same").unwrap(),
        AnswerText::new("Same").unwrap(),
    );
    assert_eq!(result, Err(DomainError::QuestionAndAnswerCannotMatch));
    assert_eq!(joke.question().as_str(), "New question");
}

#[test]
fn test_delete_permission() {
    let joke = JokeBuilder::new().by("alice").build().unwrap();
    assert!(joke.ensure_can_delete(&UserId::new("alice").unwrap()).is_ok());

    let error = joke
        .ensure_can_delete(&UserId::new("bob").unwrap())
        .unwrap_err();
    assert!(error.is_authorization());
    assert_eq!(error.message_key(), "DeleteNotAllowed");
}

#[test]
fn test_id_is_assigned_once() {
    let mut joke = JokeBuilder::new().build().unwrap();
    joke.assign_id(JokeId::new(7).unwrap()).unwrap();
    assert_eq!(joke.id().map(|id| id.value()), Some(7));

    assert_eq!(
        joke.assign_id(JokeId::new(8).unwrap()),
        Err(DomainError::IdAlreadyAssigned { id: 7 })
    );
}

#[test]
fn test_restore_rechecks_rules() {
    let restore = |likes: i64, updated_offset: Option<i64>| {
        let created = Utc::now();
        Joke::restore(
            JokeId::new(1).unwrap(),
            UserId::new("alice").unwrap(),
            QuestionText::new("Q").unwrap(),
            AnswerText::new("A").unwrap(),
            likes,
            created,
            updated_offset.map(|secs| created + Duration::seconds(secs)),
        )
    };

    assert!(restore(3, Some(10)).is_ok());
    assert!(matches!(
        restore(-1, None),
        Err(DomainError::LikesOutOfRange { likes: -1, .. })
    ));
    assert!(matches!(
        restore(i64::from(MAX_LIKES) + 1, None),
        Err(DomainError::LikesOutOfRange { .. })
    ));
    assert_eq!(
        restore(0, Some(-10)),
        Err(DomainError::UpdatedBeforeCreated)
    );
}

#[test]
fn test_serializes_in_camel_case() {
    let mut joke = JokeBuilder::new().with_id(3).build().unwrap();
    joke.increment_likes().unwrap();

    let json = serde_json::to_value(&joke).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["authorId"], "alice");
    assert_eq!(json["likes"], 1);
    assert!(json["createdAt"].is_string());
    assert!(json["updatedAt"].is_string());
}
