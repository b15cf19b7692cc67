//! Transport-agnostic handler for `GET /api/questions/{slug}`.

use std::sync::Arc;

use quiz_core::model::TopicKey;
use serde_json::{Value, json};

use crate::error::QuizError;
use crate::quiz_service::QuizService;

/// Status code and JSON body of an endpoint call.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: Value,
}

impl EndpointResponse {
    fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Serves a freshly drawn question set for a topic.
#[derive(Clone, Debug)]
pub struct QuestionsEndpoint {
    service: Arc<QuizService>,
}

impl QuestionsEndpoint {
    #[must_use]
    pub fn new(service: Arc<QuizService>) -> Self {
        Self { service }
    }

    /// `200` with the drawn questions, `400` for a blank slug, `404` when the
    /// topic has no readable content.
    pub async fn get(&self, slug: &str) -> EndpointResponse {
        let Ok(topic) = TopicKey::new(slug) else {
            return EndpointResponse::message(400, "Slug parameter is missing.");
        };

        let pool = match self.service.load_questions(&topic).await {
            Ok(pool) => pool,
            Err(QuizError::ContentNotFound { .. } | QuizError::Storage(_)) => {
                return EndpointResponse::message(404, format!("Sorular bulunamadı: '{topic}'."));
            }
        };

        let drawn = self.service.draw(&pool);
        match serde_json::to_value(&drawn) {
            Ok(body) => EndpointResponse { status: 200, body },
            Err(err) => {
                tracing::error!(topic = %topic, error = %err, "failed to serialize questions");
                EndpointResponse::message(500, "Questions could not be serialized.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, Topic};
    use quiz_core::time::fixed_clock;
    use storage::repository::{InMemoryQuestionStore, Storage};

    fn endpoint(pool_size: usize) -> QuestionsEndpoint {
        let store = InMemoryQuestionStore::new();
        let pool = (0..pool_size)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    vec!["A".into(), "B".into()],
                    "B",
                    Some(format!("because {i}")),
                )
                .unwrap()
            })
            .collect();
        store
            .insert(Topic::new(TopicKey::new("5018").unwrap(), "5018"), pool)
            .unwrap();
        let storage = Storage::in_memory(store);
        let service = QuizService::new(fixed_clock(), storage.questions, storage.topics).with_seed(3);
        QuestionsEndpoint::new(Arc::new(service))
    }

    #[tokio::test]
    async fn blank_slug_is_bad_request() {
        let response = endpoint(1).get("  ").await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["message"], "Slug parameter is missing.");
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let response = endpoint(1).get("9999").await;
        assert_eq!(response.status, 404);
        assert_eq!(response.body["message"], "Sorular bulunamadı: '9999'.");
    }

    #[tokio::test]
    async fn returns_at_most_twenty_questions_in_content_shape() {
        let response = endpoint(32).get("5018").await;
        assert!(response.is_success());

        let items = response.body.as_array().unwrap();
        assert_eq!(items.len(), 20);
        let first = &items[0];
        assert_eq!(first["answer"], "B");
        assert_eq!(first["options"].as_array().unwrap().len(), 2);
        assert!(first["question"].as_str().unwrap().starts_with('Q'));
        assert!(first["explanation"].as_str().unwrap().starts_with("because"));
    }

    #[tokio::test]
    async fn empty_topic_returns_empty_array() {
        let response = endpoint(0).get("5018").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!([]));
    }
}
