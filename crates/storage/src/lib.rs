#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonQuestionStore;
pub use repository::{
    InMemoryQuestionStore, QuestionStore, Storage, StorageError, TopicCatalogStore,
};
