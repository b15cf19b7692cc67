//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::TopicKey;
use quiz_core::scorer::ScoreError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions found for topic '{topic}'")]
    ContentNotFound { topic: TopicKey },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by a running `LiveSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session state lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Score(#[from] ScoreError),
}
