#![forbid(unsafe_code)]

pub mod model;
pub mod sampler;
pub mod scorer;
pub mod session;
pub mod time;

pub use sampler::RandomIndex;
pub use scorer::{QuestionOutcome, ScoreError, ScoreReport};
pub use session::{
    AnswerOutcome, IgnoreReason, QuizSession, SessionError, SessionProgress, SessionStatus,
    SubmitReason, TickOutcome,
};
pub use time::Clock;
