mod answer;
mod ids;
mod question;
mod settings;
mod topic;

pub use ids::{TopicKey, TopicKeyError};

pub use answer::{AnswerRecord, AnswerSheet};
pub use question::{Question, QuestionError, QuestionRecord};
pub use settings::{
    DEFAULT_SAMPLE_SIZE, DEFAULT_TIME_LIMIT_SECS, QuizSettings, SelectionMode, SettingsError,
};
pub use topic::{FALLBACK_TITLE, Topic, TopicCatalog};
