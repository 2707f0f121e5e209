//! Value Object Tests
//!
//! Boundary checks for every validated scalar and the error classification they
//! report.

use jokebox::error::{ErrorKind, ValidationError};
use jokebox::model::value_objects::{
    AnswerText, AvatarUrl, DisplayName, EmailAddress, JokeId, MAX_ANSWER_LENGTH,
    MAX_AVATAR_URL_LENGTH, MAX_DISPLAY_NAME_LENGTH, MAX_EMAIL_LENGTH, MAX_QUESTION_LENGTH,
    MAX_USER_ID_LENGTH, QuestionText, UserId,
};

#[test]
fn test_joke_id_bounds() {
    assert_eq!(JokeId::new(1).unwrap().value(), 1);
    assert_eq!(JokeId::new(i64::MAX).unwrap().value(), i64::MAX);

    for bad in [0, -1, i64::MIN] {
        assert_eq!(
            JokeId::new(bad),
            Err(ValidationError::NonPositiveJokeId { value: bad })
        );
    }
}

#[test]
fn test_joke_id_serde_rejects_non_positive() {
    let id: JokeId = serde_json::from_str("42").unwrap();
    assert_eq!(id.value(), 42);
    assert!(serde_json::from_str::<JokeId>("0").is_err());
}

#[test]
fn test_user_id_rules() {
    assert_eq!(UserId::new("  alice  ").unwrap().as_str(), "alice");
    assert!(UserId::new("auth0|5f7c8ec7c33c6c004bbafe82").is_ok());
    assert!(UserId::new("alice@example.com").is_ok());

    assert_eq!(UserId::new(""), Err(ValidationError::UserIdRequired));
    assert_eq!(UserId::new(" \t "), Err(ValidationError::UserIdRequired));
    assert_eq!(
        UserId::new("alice bob"),
        Err(ValidationError::UserIdInvalidCharacter { character: ' ' })
    );

    let at_limit = "a".repeat(MAX_USER_ID_LENGTH);
    assert!(UserId::new(&at_limit).is_ok());
    let over = "a".repeat(MAX_USER_ID_LENGTH + 1);
    assert_eq!(
        UserId::new(&over),
        Err(ValidationError::UserIdTooLong {
            max: MAX_USER_ID_LENGTH,
            actual: MAX_USER_ID_LENGTH + 1
        })
    );
}

#[test]
fn test_question_and_answer_limits() {
    assert!(QuestionText::new("q".repeat(MAX_QUESTION_LENGTH)).is_ok());
    assert!(matches!(
        QuestionText::new("q".repeat(MAX_QUESTION_LENGTH + 1)),
        Err(ValidationError::QuestionTooLong { max: 200, actual: 201 })
    ));
    assert_eq!(QuestionText::new("   "), Err(ValidationError::QuestionRequired));

    assert!(AnswerText::new("a".repeat(MAX_ANSWER_LENGTH)).is_ok());
    assert!(matches!(
        AnswerText::new("a".repeat(MAX_ANSWER_LENGTH + 1)),
        Err(ValidationError::AnswerTooLong { max: 500, actual: 501 })
    ));
    assert_eq!(AnswerText::new(""), Err(ValidationError::AnswerRequired));
}

#[test]
fn test_text_is_trimmed_and_counted_in_characters() {
    let question = QuestionText::new("  Why?  ").unwrap();
    assert_eq!(question.as_str(), "Why?");

    // 200 multi-byte characters are within the limit
    let accented = "é".repeat(MAX_QUESTION_LENGTH);
    assert!(QuestionText::new(&accented).is_ok());
}

#[test]
fn test_display_name_limits() {
    assert_eq!(DisplayName::new(" Alice ").unwrap().as_str(), "Alice");
    assert!(DisplayName::new("n".repeat(MAX_DISPLAY_NAME_LENGTH)).is_ok());
    assert!(matches!(
        DisplayName::new("n".repeat(MAX_DISPLAY_NAME_LENGTH + 1)),
        Err(ValidationError::DisplayNameTooLong { .. })
    ));
    assert_eq!(DisplayName::new(""), Err(ValidationError::DisplayNameRequired));
}

#[test]
fn test_email_rules_in_order() {
    let email = EmailAddress::new(" bjensen@example.com ").unwrap();
    assert_eq!(email.as_str(), "bjensen@example.com");
    assert_eq!(email.domain(), "example.com");

    assert_eq!(EmailAddress::new("  "), Err(ValidationError::EmailRequired));

    let local = "x".repeat(MAX_EMAIL_LENGTH);
    assert!(matches!(
        EmailAddress::new(format!("{local}@example.com")),
        Err(ValidationError::EmailTooLong { .. })
    ));

    assert_eq!(
        EmailAddress::new("b jensen@example.com"),
        Err(ValidationError::EmailContainsWhitespace)
    );

    for bad in ["bjensen", "bjensen@", "@example.com", "a@b@example.com", "a@example"] {
        assert!(
            matches!(
                EmailAddress::new(bad),
                Err(ValidationError::InvalidEmailFormat { .. })
            ),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_avatar_url_length_and_format() {
    // Length-only construction accepts relative paths
    assert!(AvatarUrl::new("avatars/alice.png").is_ok());

    let too_long = format!("https://cdn.example.com/{}", "a".repeat(MAX_AVATAR_URL_LENGTH));
    assert!(matches!(
        AvatarUrl::new(&too_long),
        Err(ValidationError::AvatarUrlTooLong { max: 2048, .. })
    ));

    assert!(AvatarUrl::new_well_formed("https://cdn.example.com/a.png").is_ok());
    for bad in ["avatars/alice.png", "ftp://example.com/a.png", "https://"] {
        assert!(
            matches!(
                AvatarUrl::new_well_formed(bad),
                Err(ValidationError::InvalidAvatarUrl { .. })
            ),
            "{bad} should be rejected"
        );
    }

    assert_eq!(AvatarUrl::parse_optional(None), Ok(None));
    assert_eq!(AvatarUrl::parse_optional(Some("  ")), Ok(None));
}

#[test]
fn test_validation_errors_are_structural() {
    let errors = [
        JokeId::new(0).unwrap_err(),
        UserId::new("").unwrap_err(),
        QuestionText::new("").unwrap_err(),
        EmailAddress::new("nope").unwrap_err(),
    ];

    for error in errors {
        assert_eq!(error.kind(), ErrorKind::Structural);
        assert_eq!(error.kind().status_code(), 400);
    }

    assert_eq!(
        EmailAddress::new("nope").unwrap_err().message_key(),
        "EmailInvalidFormat"
    );
}
