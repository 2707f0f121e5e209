//! Fluent builders for aggregates in a known-valid default state.
//!
//! Each setter takes raw input so tests can push a single field out of bounds and
//! observe which rule fires.

use jokebox::error::JokeboxResult;
use jokebox::model::value_objects::{
    AnswerText, AvatarUrl, DisplayName, EmailAddress, JokeId, QuestionText, UserId,
};
use jokebox::{Joke, User};

/// Builder for [`Joke`] values.
#[derive(Debug, Clone)]
pub struct JokeBuilder {
    id: Option<i64>,
    author: String,
    question: String,
    answer: String,
    likes: u32,
}

impl JokeBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            author: "alice".to_string(),
            question: "Why don't skeletons fight each other?".to_string(),
            answer: "They don't have the guts.".to_string(),
            likes: 0,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn by(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn with_question(mut self, question: &str) -> Self {
        self.question = question.to_string();
        self
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = answer.to_string();
        self
    }

    /// Like the joke this many times after creating it.
    pub fn with_likes(mut self, likes: u32) -> Self {
        self.likes = likes;
        self
    }

    pub fn build(self) -> JokeboxResult<Joke> {
        let id = self.id.map(JokeId::new).transpose()?;
        let mut joke = Joke::create(
            id,
            UserId::new(&self.author)?,
            QuestionText::new(&self.question)?,
            AnswerText::new(&self.answer)?,
        )?;
        for _ in 0..self.likes {
            joke.increment_likes()?;
        }
        Ok(joke)
    }
}

impl Default for JokeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`User`] values.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: String,
    display_name: String,
    avatar_url: Option<String>,
    email: String,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            id: "alice".to_string(),
            display_name: "Alice".to_string(),
            avatar_url: None,
            email: "alice@example.com".to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn with_avatar(mut self, url: &str) -> Self {
        self.avatar_url = Some(url.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn build(self) -> JokeboxResult<User> {
        Ok(User::new(
            UserId::new(&self.id)?,
            DisplayName::new(&self.display_name)?,
            AvatarUrl::parse_optional(self.avatar_url.as_deref())?,
            EmailAddress::new(&self.email)?,
        ))
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
