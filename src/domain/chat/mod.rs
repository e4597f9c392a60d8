//! Chat domain module.
//!
//! A transcript of questions put to the assistant. A failed request is
//! recorded with an explicit placeholder, never a made-up answer.

use crate::domain::foundation::{Timestamp, ValidationError};

const MAX_QUERY_LEN: usize = 2000;

/// Placeholder shown when the assistant could not be reached.
pub const CONNECTION_PLACEHOLDER: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// A validated question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery(String);

impl ChatQuery {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(ValidationError::empty_field("query"));
        }
        if text.chars().count() > MAX_QUERY_LEN {
            return Err(ValidationError::too_long("query", MAX_QUERY_LEN));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What came back for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAnswer {
    Answered(String),
    Unavailable { error: String },
}

impl ChatAnswer {
    /// Text to show in the conversation.
    pub fn display_text(&self) -> &str {
        match self {
            ChatAnswer::Answered(text) => text,
            ChatAnswer::Unavailable { .. } => CONNECTION_PLACEHOLDER,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, ChatAnswer::Answered(_))
    }
}

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub query: ChatQuery,
    pub answer: ChatAnswer,
    pub asked_at: Timestamp,
}

/// Conversation history for the current view.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    exchanges: Vec<ChatExchange>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, query: ChatQuery, answer: ChatAnswer) -> &ChatExchange {
        self.exchanges.push(ChatExchange {
            query,
            answer,
            asked_at: Timestamp::now(),
        });
        &self.exchanges[self.exchanges.len() - 1]
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}
