//! Error types for article input handling.

use thiserror::Error;

/// Input validation error, raised before any model call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleError {
    /// The topic is empty or whitespace only.
    #[error("Please enter a topic.")]
    BlankTopic,
    /// Target length must be positive.
    #[error("target word count must be > 0")]
    InvalidTargetWords,
    /// Reading level is not one of the offered choices.
    #[error("unknown reading level: {0}")]
    UnknownReadingLevel(String),
}

/// Convenience result alias for article input handling.
pub type ArticleResult<T> = Result<T, ArticleError>;
