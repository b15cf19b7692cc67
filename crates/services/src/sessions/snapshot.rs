use quiz_core::{QuizSession, SessionStatus};

/// Point-in-time view of a live session, published after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub remaining_seconds: u32,
    pub status: SessionStatus,
    pub answered: usize,
    pub total: usize,
    pub attempt: u32,
}

impl SessionSnapshot {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        Self {
            remaining_seconds: session.remaining_seconds(),
            status: session.status(),
            answered: session.answers().len(),
            total: session.total_questions(),
            attempt: session.attempt(),
        }
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.status != SessionStatus::Active
    }
}
