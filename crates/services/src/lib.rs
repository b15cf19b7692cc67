#![forbid(unsafe_code)]

pub mod endpoint;
pub mod error;
pub mod quiz_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use endpoint::{EndpointResponse, QuestionsEndpoint};
pub use error::{QuizError, SessionError};
pub use quiz_service::QuizService;
pub use sessions::{LiveSession, SessionSnapshot};
