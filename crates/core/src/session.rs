use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{AnswerRecord, AnswerSheet, Question, QuizSettings};
use crate::scorer::rounded_percent;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
}

//
// ─── STATUS & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Why a session stopped accepting answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    Manual,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Submitted(SubmitReason),
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running with this many seconds left.
    Counting { remaining_seconds: u32 },
    /// This tick hit zero and submitted the session.
    TimedOut,
    /// The session was already submitted; nothing changed.
    Inactive,
}

/// Why an answer was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Submitted,
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { is_correct: bool },
    Revised { is_correct: bool, previous: String },
    Ignored(IgnoreReason),
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, AnswerOutcome::Ignored(_))
    }
}

/// Answer progress of an attempt, for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub percent: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed attempt at a drawn question set.
///
/// `Active` until submitted manually or by the countdown reaching zero; after
/// that the answers are frozen until `restart`. The session never ticks itself:
/// the owner calls `tick` once per second.
#[derive(Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: AnswerSheet,
    time_limit_secs: u32,
    remaining_seconds: u32,
    status: SessionStatus,
    attempt: u32,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start an attempt over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn start(
        questions: Vec<Question>,
        settings: &QuizSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let time_limit_secs = settings.time_limit_secs();
        Ok(Self {
            questions,
            answers: AnswerSheet::new(),
            time_limit_secs,
            remaining_seconds: time_limit_secs,
            status: SessionStatus::Active,
            attempt: 1,
            started_at,
            submitted_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        !self.is_active()
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.status == SessionStatus::Submitted(SubmitReason::TimedOut)
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Seconds consumed by the countdown in this attempt.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.time_limit_secs - self.remaining_seconds
    }

    /// 1 for the first attempt, incremented by every restart.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        SessionProgress {
            total,
            answered,
            unanswered: total.saturating_sub(answered),
            percent: rounded_percent(answered, total).unwrap_or(0),
        }
    }

    /// Record (or revise) the answer for `index`.
    ///
    /// Answers after submission and answers for indices outside the question
    /// set are ignored without touching the sheet.
    pub fn record_answer(&mut self, index: usize, selected: impl Into<String>) -> AnswerOutcome {
        if self.is_submitted() {
            return AnswerOutcome::Ignored(IgnoreReason::Submitted);
        }
        let Some(question) = self.questions.get(index) else {
            return AnswerOutcome::Ignored(IgnoreReason::OutOfRange {
                index,
                len: self.questions.len(),
            });
        };

        let selected_option = selected.into();
        let is_correct = question.is_correct(&selected_option);
        let previous = self.answers.upsert(AnswerRecord {
            question_index: index,
            selected_option,
            is_correct,
        });

        match previous {
            Some(previous) => AnswerOutcome::Revised {
                is_correct,
                previous: previous.selected_option,
            },
            None => AnswerOutcome::Recorded { is_correct },
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero submits the session as timed out.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.is_submitted() {
            return TickOutcome::Inactive;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.status = SessionStatus::Submitted(SubmitReason::TimedOut);
            self.submitted_at = Some(now);
            return TickOutcome::TimedOut;
        }

        TickOutcome::Counting {
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Submit manually. Returns false if the session was already submitted.
    pub fn submit(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.status = SessionStatus::Submitted(SubmitReason::Manual);
        self.submitted_at = Some(now);
        true
    }

    /// Begin a fresh attempt over the same question set.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.answers.clear();
        self.remaining_seconds = self.time_limit_secs;
        self.status = SessionStatus::Active;
        self.attempt = self.attempt.saturating_add(1);
        self.started_at = now;
        self.submitted_at = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("answers_len", &self.answers.len())
            .field("remaining_seconds", &self.remaining_seconds)
            .field("status", &self.status)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectionMode;
    use crate::time::fixed_now;

    fn question(n: usize) -> Question {
        Question::new(
            format!("Q{n}"),
            vec!["right".into(), "wrong".into()],
            "right",
            None,
        )
        .unwrap()
    }

    fn session(n: usize) -> QuizSession {
        let questions = (0..n).map(question).collect();
        QuizSession::start(questions, &QuizSettings::default(), fixed_now()).unwrap()
    }

    fn short_session(n: usize, limit: u32) -> QuizSession {
        let settings = QuizSettings::new(20, limit, SelectionMode::Shuffled).unwrap();
        let questions = (0..n).map(question).collect();
        QuizSession::start(questions, &settings, fixed_now()).unwrap()
    }

    #[test]
    fn start_initializes_active_state() {
        let s = session(3);
        assert!(s.is_active());
        assert!(!s.is_submitted());
        assert!(!s.timed_out());
        assert_eq!(s.remaining_seconds(), 1200);
        assert!(s.answers().is_empty());
        assert_eq!(s.attempt(), 1);
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = QuizSession::start(Vec::new(), &QuizSettings::default(), fixed_now())
            .unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn re_answering_replaces_previous_record() {
        let mut s = session(2);
        assert_eq!(
            s.record_answer(0, "wrong"),
            AnswerOutcome::Recorded { is_correct: false }
        );
        assert_eq!(
            s.record_answer(0, "right"),
            AnswerOutcome::Revised {
                is_correct: true,
                previous: "wrong".into()
            }
        );
        assert_eq!(s.answers().len(), 1);
        let record = s.answer_for(0).unwrap();
        assert_eq!(record.selected_option, "right");
        assert!(record.is_correct);
    }

    #[test]
    fn out_of_range_answer_is_ignored() {
        let mut s = session(2);
        let outcome = s.record_answer(5, "right");
        assert_eq!(
            outcome,
            AnswerOutcome::Ignored(IgnoreReason::OutOfRange { index: 5, len: 2 })
        );
        assert!(!outcome.is_applied());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn answers_are_locked_after_submit() {
        let mut s = session(3);
        s.record_answer(0, "right");
        assert!(s.submit(fixed_now()));
        let frozen = s.answers().clone();

        for (i, option) in [(0, "wrong"), (1, "right"), (2, "wrong"), (9, "right")] {
            assert_eq!(
                s.record_answer(i, option),
                AnswerOutcome::Ignored(IgnoreReason::Submitted)
            );
        }
        assert_eq!(s.answers(), &frozen);
    }

    #[test]
    fn ticks_decrease_by_one_and_stop_after_submit() {
        let mut s = session(1);
        let mut last = s.remaining_seconds();
        for _ in 0..10 {
            match s.tick(fixed_now()) {
                TickOutcome::Counting { remaining_seconds } => {
                    assert_eq!(remaining_seconds, last - 1);
                    last = remaining_seconds;
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(s.submit(fixed_now()));
        assert_eq!(s.tick(fixed_now()), TickOutcome::Inactive);
        assert_eq!(s.remaining_seconds(), last);
        assert_eq!(s.elapsed_seconds(), 10);
    }

    #[test]
    fn reaching_zero_times_out_and_submits() {
        let mut s = short_session(2, 3);
        s.record_answer(0, "right");
        assert_eq!(
            s.tick(fixed_now()),
            TickOutcome::Counting {
                remaining_seconds: 2
            }
        );
        assert_eq!(
            s.tick(fixed_now()),
            TickOutcome::Counting {
                remaining_seconds: 1
            }
        );
        assert_eq!(s.tick(fixed_now()), TickOutcome::TimedOut);
        assert!(s.is_submitted());
        assert!(s.timed_out());
        assert_eq!(s.remaining_seconds(), 0);
        assert_eq!(s.status(), SessionStatus::Submitted(SubmitReason::TimedOut));

        assert_eq!(s.tick(fixed_now()), TickOutcome::Inactive);
        assert_eq!(s.remaining_seconds(), 0);
    }

    #[test]
    fn manual_submit_is_allowed_with_unanswered_questions() {
        let mut s = session(4);
        assert!(s.submit(fixed_now()));
        assert!(!s.timed_out());
        assert_eq!(s.status(), SessionStatus::Submitted(SubmitReason::Manual));
        assert!(!s.submit(fixed_now()));
    }

    #[test]
    fn restart_resets_everything_but_questions() {
        let mut s = short_session(3, 2);
        s.record_answer(0, "right");
        s.tick(fixed_now());
        s.tick(fixed_now());
        assert!(s.timed_out());
        let questions = s.questions().to_vec();

        s.restart(fixed_now());

        assert!(s.answers().is_empty());
        assert_eq!(s.remaining_seconds(), 2);
        assert!(!s.is_submitted());
        assert!(!s.timed_out());
        assert_eq!(s.submitted_at(), None);
        assert_eq!(s.attempt(), 2);
        assert_eq!(s.questions(), questions.as_slice());
    }

    #[test]
    fn restart_uses_default_limit() {
        let mut s = session(1);
        s.submit(fixed_now());
        s.restart(fixed_now());
        assert_eq!(s.remaining_seconds(), 1200);
    }

    #[test]
    fn progress_tracks_answered_share() {
        let mut s = session(3);
        s.record_answer(0, "right");
        s.record_answer(1, "wrong");
        let p = s.progress();
        assert_eq!(p.total, 3);
        assert_eq!(p.answered, 2);
        assert_eq!(p.unanswered, 1);
        assert_eq!(p.percent, 67);
    }
}
