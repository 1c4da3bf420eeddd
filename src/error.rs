//! Error types shared across the crate

use thiserror::Error;

/// Errors raised by the projection engine
///
/// Validation always happens before any value is computed, so an error
/// never comes with a partial series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ProjectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ProjectionError::InvalidInput(message.into())
    }
}

/// Errors talking to the chat-completion service
///
/// A well-formed error payload from the service is not a `ChatError`; it is
/// decoded into `ChatOutcome::Failure`.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no API key configured (set GROQ_API_KEY)")]
    MissingApiKey,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("invalid chat base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors from the conversation log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored timestamp '{0}' is not RFC 3339")]
    BadTimestamp(String),
}

/// Errors from the ask flow
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    History(#[from] HistoryError),
}
