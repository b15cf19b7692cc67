use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::model::{Question, QuizSettings, TopicCatalog, TopicKey};
use quiz_core::sampler;
use quiz_core::{Clock, QuizSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::{QuestionStore, StorageError, TopicCatalogStore};

use crate::error::QuizError;
use crate::sessions::LiveSession;

/// Loads topic pools, draws question sets, and starts sessions.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    settings: QuizSettings,
    questions: Arc<dyn QuestionStore>,
    topics: Arc<dyn TopicCatalogStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionStore>,
        topics: Arc<dyn TopicCatalogStore>,
    ) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            questions,
            topics,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use a seeded random source so draws are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Full question pool for a topic, in stored order.
    ///
    /// Any retrieval failure is reported as `ContentNotFound`; failures other
    /// than a missing topic are logged first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ContentNotFound` when the topic has no readable content.
    pub async fn load_questions(&self, topic: &TopicKey) -> Result<Vec<Question>, QuizError> {
        match self.questions.load_questions(topic).await {
            Ok(pool) => Ok(pool),
            Err(StorageError::NotFound) => Err(QuizError::ContentNotFound {
                topic: topic.clone(),
            }),
            Err(err) => {
                tracing::error!(topic = %topic, error = %err, "failed to load question pool");
                Err(QuizError::ContentNotFound {
                    topic: topic.clone(),
                })
            }
        }
    }

    /// Draw a session question set from `pool` using the configured settings.
    #[must_use]
    pub fn draw(&self, pool: &[Question]) -> Vec<Question> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        sampler::draw(pool, &self.settings, &mut *rng)
    }

    /// Load, draw, and start an attempt for `topic`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ContentNotFound` when the topic is missing or its pool is empty.
    pub async fn start_session(&self, topic: &TopicKey) -> Result<QuizSession, QuizError> {
        let pool = self.load_questions(topic).await?;
        let drawn = self.draw(&pool);

        let session = QuizSession::start(drawn, &self.settings, self.clock.now()).map_err(|_| {
            QuizError::ContentNotFound {
                topic: topic.clone(),
            }
        })?;

        tracing::info!(
            topic = %topic,
            pool = pool.len(),
            drawn = session.total_questions(),
            time_limit_secs = session.time_limit_secs(),
            "session started"
        );
        Ok(session)
    }

    /// Like `start_session`, with the countdown running. Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ContentNotFound` when the topic is missing or its pool is empty.
    pub async fn start_live(&self, topic: &TopicKey) -> Result<LiveSession, QuizError> {
        let session = self.start_session(topic).await?;
        Ok(LiveSession::start(topic.clone(), session, self.clock))
    }

    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the catalog cannot be read.
    pub async fn catalog(&self) -> Result<TopicCatalog, QuizError> {
        let topics = self.topics.list_topics().await?;
        Ok(TopicCatalog::new(topics))
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{SelectionMode, Topic};
    use quiz_core::time::fixed_clock;
    use storage::repository::{InMemoryQuestionStore, Storage};

    fn key(raw: &str) -> TopicKey {
        TopicKey::new(raw).unwrap()
    }

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("Q{i}"), vec!["A".into(), "B".into()], "A", None).unwrap())
            .collect()
    }

    fn service_with(topics: &[(&str, usize)]) -> QuizService {
        let store = InMemoryQuestionStore::new();
        for (id, n) in topics {
            store.insert(Topic::new(key(id), *id), pool(*n)).unwrap();
        }
        let storage = Storage::in_memory(store);
        QuizService::new(fixed_clock(), storage.questions, storage.topics).with_seed(11)
    }

    #[tokio::test]
    async fn small_pool_gives_whole_pool() {
        let service = service_with(&[("small", 3)]);
        let session = service.start_session(&key("small")).await.unwrap();
        assert_eq!(session.total_questions(), 3);
        assert_eq!(session.remaining_seconds(), 1200);
    }

    #[tokio::test]
    async fn large_pool_is_capped_at_sample_size() {
        let service = service_with(&[("large", 45)]);
        let session = service.start_session(&key("large")).await.unwrap();
        assert_eq!(session.total_questions(), 20);
    }

    #[tokio::test]
    async fn missing_topic_is_content_not_found() {
        let service = service_with(&[]);
        let err = service.start_session(&key("ghost")).await.unwrap_err();
        assert!(matches!(err, QuizError::ContentNotFound { topic } if topic == key("ghost")));
    }

    #[tokio::test]
    async fn empty_pool_is_content_not_found() {
        let service = service_with(&[("empty", 0)]);
        let err = service.start_session(&key("empty")).await.unwrap_err();
        assert!(matches!(err, QuizError::ContentNotFound { .. }));
    }

    #[tokio::test]
    async fn seeded_services_draw_identically() {
        let a = service_with(&[("t", 30)]);
        let b = service_with(&[("t", 30)]);
        let sa = a.start_session(&key("t")).await.unwrap();
        let sb = b.start_session(&key("t")).await.unwrap();
        assert_eq!(sa.questions(), sb.questions());
    }

    #[tokio::test]
    async fn in_order_settings_keep_stored_order() {
        let settings = QuizSettings::new(2, 60, SelectionMode::InOrder).unwrap();
        let service = service_with(&[("t", 5)]).with_settings(settings);
        let session = service.start_session(&key("t")).await.unwrap();
        let texts: Vec<_> = session.questions().iter().map(Question::text).collect();
        assert_eq!(texts, vec!["Q0", "Q1"]);
        assert_eq!(session.remaining_seconds(), 60);
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl QuestionStore for BrokenStore {
        async fn load_questions(&self, _topic: &TopicKey) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Serialization("expected value at line 1".to_string()))
        }
    }

    #[tokio::test]
    async fn unreadable_content_is_content_not_found() {
        let topics = Storage::in_memory(InMemoryQuestionStore::new()).topics;
        let service = QuizService::new(fixed_clock(), Arc::new(BrokenStore), topics);

        let err = service.load_questions(&key("broken")).await.unwrap_err();
        assert!(matches!(err, QuizError::ContentNotFound { topic } if topic == key("broken")));
    }

    #[tokio::test]
    async fn catalog_lists_topics() {
        let service = service_with(&[("b", 1), ("a", 1)]);
        let catalog = service.catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.topics()[0].id, key("b"));
    }
}
