use thiserror::Error;

use crate::session::QuizSession;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("session has not been submitted")]
    NotSubmitted,
}

/// How a single question ended up after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Unanswered,
    Correct,
    Incorrect,
}

/// Aggregate results of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub total: usize,
    /// `round(score / total * 100)`; `None` for an empty question set.
    pub percentage: Option<u32>,
    pub timed_out: bool,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    /// Score a submitted session.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NotSubmitted` while the session is still active.
    pub fn from_session(session: &QuizSession) -> Result<Self, ScoreError> {
        if !session.is_submitted() {
            return Err(ScoreError::NotSubmitted);
        }

        let answers = session.answers();
        let total = session.total_questions();
        let score = answers.correct_count();
        let answered = answers.len();

        let outcomes = (0..total)
            .map(|index| match answers.get(index) {
                None => QuestionOutcome::Unanswered,
                Some(record) if record.is_correct => QuestionOutcome::Correct,
                Some(_) => QuestionOutcome::Incorrect,
            })
            .collect();

        Ok(Self {
            score,
            answered,
            unanswered: total.saturating_sub(answered),
            total,
            percentage: rounded_percent(score, total),
            timed_out: session.timed_out(),
            outcomes,
        })
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.answered - self.score
    }
}

/// `part / whole * 100`, rounded half up. `None` when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> Option<u32> {
    if whole == 0 {
        return None;
    }
    let part = u64::try_from(part).ok()?;
    let whole = u64::try_from(whole).ok()?;
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).ok()
}
