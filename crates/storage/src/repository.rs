use async_trait::async_trait;
use quiz_core::model::{Question, Topic, TopicKey};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonQuestionStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read-only source of question pools, keyed by topic.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch the full question pool for a topic, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the topic has no backing content,
    /// or other storage errors if the content cannot be read or parsed.
    async fn load_questions(&self, topic: &TopicKey) -> Result<Vec<Question>, StorageError>;
}

/// Source of the navigable topic list.
#[async_trait]
pub trait TopicCatalogStore: Send + Sync {
    /// List topics in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read or parsed.
    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryQuestionStore {
    topics: Arc<Mutex<Vec<Topic>>>,
    questions: Arc<Mutex<HashMap<TopicKey, Vec<Question>>>>,
}

impl InMemoryQuestionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a topic and its question pool.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn insert(&self, topic: Topic, questions: Vec<Question>) -> Result<(), StorageError> {
        let mut pools = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut topics = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        pools.insert(topic.id.clone(), questions);
        match topics.iter_mut().find(|t| t.id == topic.id) {
            Some(existing) => *existing = topic,
            None => topics.push(topic),
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn load_questions(&self, topic: &TopicKey) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(topic).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl TopicCatalogStore for InMemoryQuestionStore {
    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Question and catalog stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionStore>,
    pub topics: Arc<dyn TopicCatalogStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(store: InMemoryQuestionStore) -> Self {
        let questions: Arc<dyn QuestionStore> = Arc::new(store.clone());
        let topics: Arc<dyn TopicCatalogStore> = Arc::new(store);
        Self { questions, topics }
    }

    /// Content directory laid out as `topics.json` + `questions/<topic>.json`.
    #[must_use]
    pub fn json_dir(root: impl AsRef<Path>) -> Self {
        let store = JsonQuestionStore::new(root.as_ref());
        let questions: Arc<dyn QuestionStore> = Arc::new(store.clone());
        let topics: Arc<dyn TopicCatalogStore> = Arc::new(store);
        Self { questions, topics }
    }
}
