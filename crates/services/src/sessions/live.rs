use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use quiz_core::model::TopicKey;
use quiz_core::time::whole_seconds_between;
use quiz_core::{AnswerOutcome, Clock, IgnoreReason, QuizSession, ScoreReport};
use tokio::sync::watch;

use super::countdown::{CountdownHandle, Shared, SharedSession, TICK_PERIOD};
use super::snapshot::SessionSnapshot;
use crate::error::SessionError;

/// A quiz session with a running countdown.
///
/// The countdown starts with the session, and stops on submit, on timeout, and
/// when the `LiveSession` is dropped. Restarting retires the old countdown
/// before starting a new one, so a late tick can never reach the new attempt.
pub struct LiveSession {
    topic: TopicKey,
    clock: Clock,
    shared: SharedSession,
    snapshots: Arc<watch::Sender<SessionSnapshot>>,
    countdown: Option<CountdownHandle>,
}

impl LiveSession {
    /// Wrap `session` and start its countdown. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(topic: TopicKey, session: QuizSession, clock: Clock) -> Self {
        Self::start_every(TICK_PERIOD, topic, session, clock)
    }

    pub(crate) fn start_every(
        period: Duration,
        topic: TopicKey,
        session: QuizSession,
        clock: Clock,
    ) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::of(&session));
        let snapshots = Arc::new(tx);
        let shared = Arc::new(Mutex::new(Shared {
            session,
            generation: 0,
        }));
        let countdown =
            CountdownHandle::spawn_every(period, Arc::clone(&shared), 0, clock, Arc::clone(&snapshots));

        Self {
            topic,
            clock,
            shared,
            snapshots,
            countdown: Some(countdown),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &TopicKey {
        &self.topic
    }

    /// Receive a snapshot after every tick, answer, submit, and restart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Shared>, SessionError> {
        self.shared.lock().map_err(|_| SessionError::Poisoned)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        Ok(SessionSnapshot::of(&self.lock()?.session))
    }

    /// Read the underlying session without holding on to the lock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn with_session<T>(&self, read: impl FnOnce(&QuizSession) -> T) -> Result<T, SessionError> {
        Ok(read(&self.lock()?.session))
    }

    /// Returns true while the countdown task for the current attempt is alive.
    #[must_use]
    pub fn is_counting(&self) -> bool {
        self.countdown.as_ref().is_some_and(CountdownHandle::is_running)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn record_answer(
        &self,
        index: usize,
        selected: impl Into<String>,
    ) -> Result<AnswerOutcome, SessionError> {
        let outcome = {
            let mut guard = self.lock()?;
            let outcome = guard.session.record_answer(index, selected);
            if outcome.is_applied() {
                self.snapshots.send_replace(SessionSnapshot::of(&guard.session));
            }
            outcome
        };

        match &outcome {
            AnswerOutcome::Ignored(IgnoreReason::OutOfRange { index, len }) => {
                tracing::warn!(topic = %self.topic, index, len, "answer for unknown question ignored");
            }
            AnswerOutcome::Ignored(IgnoreReason::Submitted) => {
                tracing::debug!(topic = %self.topic, index, "answer after submission ignored");
            }
            AnswerOutcome::Recorded { is_correct } | AnswerOutcome::Revised { is_correct, .. } => {
                tracing::debug!(topic = %self.topic, index, is_correct, "answer recorded");
            }
        }
        Ok(outcome)
    }

    /// Submit manually and stop the countdown. Returns false if already submitted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn submit(&mut self) -> Result<bool, SessionError> {
        let (submitted, snapshot, elapsed_secs, wall_secs) = {
            let mut guard = self.lock()?;
            let submitted = guard.session.submit(self.clock.now());
            let session = &guard.session;
            let snapshot = SessionSnapshot::of(session);
            // Publish before releasing the lock so a tick in flight cannot land after it.
            if submitted {
                self.snapshots.send_replace(snapshot);
            }
            let wall_secs = session
                .submitted_at()
                .map_or(0, |at| whole_seconds_between(session.started_at(), at));
            (submitted, snapshot, session.elapsed_seconds(), wall_secs)
        };
        if let Some(countdown) = self.countdown.take() {
            countdown.stop();
        }
        if submitted {
            tracing::info!(
                topic = %self.topic,
                answered = snapshot.answered,
                total = snapshot.total,
                remaining_seconds = snapshot.remaining_seconds,
                elapsed_secs,
                wall_secs,
                "session submitted"
            );
        }
        Ok(submitted)
    }

    /// Start a new attempt over the same questions with a fresh countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if let Some(countdown) = self.countdown.take() {
            countdown.stop();
        }
        let (generation, snapshot) = {
            let mut guard = self.lock()?;
            guard.generation = guard.generation.wrapping_add(1);
            guard.session.restart(self.clock.now());
            let snapshot = SessionSnapshot::of(&guard.session);
            self.snapshots.send_replace(snapshot);
            (guard.generation, snapshot)
        };

        tracing::info!(topic = %self.topic, attempt = snapshot.attempt, "session restarted");
        self.countdown = Some(CountdownHandle::spawn(
            Arc::clone(&self.shared),
            generation,
            self.clock,
            Arc::clone(&self.snapshots),
        ));
        Ok(())
    }

    /// Score the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Score` if the session is still active, or
    /// `SessionError::Poisoned` if the session lock is poisoned.
    pub fn report(&self) -> Result<ScoreReport, SessionError> {
        let guard = self.lock()?;
        Ok(ScoreReport::from_session(&guard.session)?)
    }
}

impl fmt::Debug for LiveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSession")
            .field("topic", &self.topic)
            .field("counting", &self.is_counting())
            .finish_non_exhaustive()
    }
}
