//! Question bank stored as JSON files on disk.
//!
//! Layout:
//!
//! ```text
//! <root>/topics.json              [{ "id": "...", "title": "..." }, ...]
//! <root>/questions/<topic>.json   [{ "question", "options", "answer", "explanation"? }, ...]
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{Question, Topic, TopicKey};

use crate::repository::{QuestionStore, StorageError, TopicCatalogStore};

const TOPICS_FILE: &str = "topics.json";
const QUESTIONS_DIR: &str = "questions";

#[derive(Debug, Clone)]
pub struct JsonQuestionStore {
    root: PathBuf,
}

impl JsonQuestionStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the question file for `topic`, or `None` if the key cannot name
    /// a file inside the questions directory.
    #[must_use]
    pub fn question_path(&self, topic: &TopicKey) -> Option<PathBuf> {
        let key = topic.as_str();
        let unsafe_key = key.starts_with('.')
            || key.contains(['/', '\\', '\0'])
            || Path::new(key).is_absolute();
        if unsafe_key {
            return None;
        }
        Some(self.root.join(QUESTIONS_DIR).join(format!("{key}.json")))
    }

    /// Topic keys that have a question file, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the questions directory cannot be listed.
    pub async fn topic_keys(&self) -> Result<Vec<TopicKey>, StorageError> {
        let dir = self.root.join(QUESTIONS_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir, &e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&dir, &e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| TopicKey::new(stem).ok())
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> StorageError {
    StorageError::Io(format!("{}: {err}", path.display()))
}

async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, &e)),
    }
}

#[async_trait]
impl QuestionStore for JsonQuestionStore {
    async fn load_questions(&self, topic: &TopicKey) -> Result<Vec<Question>, StorageError> {
        let Some(path) = self.question_path(topic) else {
            tracing::warn!(topic = %topic, "rejected topic key that does not name a file");
            return Err(StorageError::NotFound);
        };

        let Some(bytes) = read_optional(&path).await? else {
            return Err(StorageError::NotFound);
        };

        let questions: Vec<Question> = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))?;
        tracing::debug!(topic = %topic, count = questions.len(), "loaded question pool");
        Ok(questions)
    }
}

#[async_trait]
impl TopicCatalogStore for JsonQuestionStore {
    /// Reads `topics.json`; without one, every question file becomes a topic
    /// titled by its key.
    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let path = self.root.join(TOPICS_FILE);
        match read_optional(&path).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display()))),
            None => {
                let keys = self.topic_keys().await?;
                Ok(keys
                    .into_iter()
                    .map(|key| {
                        let title = key.to_string();
                        Topic::new(key, title)
                    })
                    .collect())
            }
        }
    }
}
