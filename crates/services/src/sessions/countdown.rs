use std::sync::{Arc, Mutex};
use std::time::Duration;

use quiz_core::{Clock, QuizSession, TickOutcome};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::snapshot::SessionSnapshot;

pub(crate) const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Session state shared between the owner and its countdown task.
///
/// `generation` changes on every restart; a countdown only ticks while its own
/// generation is current.
pub(crate) struct Shared {
    pub(crate) session: QuizSession,
    pub(crate) generation: u64,
}

pub(crate) type SharedSession = Arc<Mutex<Shared>>;

/// Handle to the once-per-second countdown of one attempt.
///
/// Dropping the handle aborts the task.
pub(crate) struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Spawn a countdown for `generation`. Must be called inside a tokio runtime.
    pub(crate) fn spawn(
        shared: SharedSession,
        generation: u64,
        clock: Clock,
        snapshots: Arc<watch::Sender<SessionSnapshot>>,
    ) -> Self {
        Self::spawn_every(TICK_PERIOD, shared, generation, clock, snapshots)
    }

    pub(crate) fn spawn_every(
        period: Duration,
        shared: SharedSession,
        generation: u64,
        clock: Clock,
        snapshots: Arc<watch::Sender<SessionSnapshot>>,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let (outcome, snapshot) = {
                    let Ok(mut guard) = shared.lock() else {
                        tracing::error!("session lock poisoned; stopping countdown");
                        return;
                    };
                    if guard.generation != generation {
                        tracing::debug!(generation, "dropping tick from retired countdown");
                        return;
                    }
                    let outcome = guard.session.tick(clock.now());
                    let snapshot = SessionSnapshot::of(&guard.session);
                    // Published under the lock: observers see changes in the order they were made.
                    if outcome != TickOutcome::Inactive {
                        snapshots.send_replace(snapshot);
                    }
                    (outcome, snapshot)
                };

                match outcome {
                    TickOutcome::Counting { .. } => {}
                    TickOutcome::TimedOut => {
                        tracing::info!(
                            answered = snapshot.answered,
                            total = snapshot.total,
                            "time is up; session submitted"
                        );
                        return;
                    }
                    TickOutcome::Inactive => return,
                }
            }
        });

        Self { task }
    }

    pub(crate) fn stop(&self) {
        self.task.abort();
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuizSettings, SelectionMode};
    use quiz_core::time::fixed_clock;

    fn shared(limit: u32, generation: u64) -> SharedSession {
        let settings = QuizSettings::new(20, limit, SelectionMode::InOrder).unwrap();
        let q = Question::new("Q", vec!["a".into(), "b".into()], "a", None).unwrap();
        let session = QuizSession::start(vec![q], &settings, fixed_clock().now()).unwrap();
        Arc::new(Mutex::new(Shared {
            session,
            generation,
        }))
    }

    fn channel(shared: &SharedSession) -> Arc<watch::Sender<SessionSnapshot>> {
        let snapshot = SessionSnapshot::of(&shared.lock().unwrap().session);
        Arc::new(watch::channel(snapshot).0)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let shared = shared(60, 0);
        let tx = channel(&shared);
        let handle = CountdownHandle::spawn(shared.clone(), 0, fixed_clock(), tx.clone());

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        assert_eq!(shared.lock().unwrap().session.remaining_seconds(), 57);
        assert_eq!(tx.borrow().remaining_seconds, 57);
        assert!(handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn retired_generation_never_ticks() {
        let shared = shared(60, 1);
        let tx = channel(&shared);
        let handle = CountdownHandle::spawn(shared.clone(), 0, fixed_clock(), tx);

        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert_eq!(shared.lock().unwrap().session.remaining_seconds(), 60);
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn finishes_after_timeout() {
        let shared = shared(2, 0);
        let tx = channel(&shared);
        let handle = CountdownHandle::spawn(shared.clone(), 0, fixed_clock(), tx.clone());

        tokio::time::sleep(Duration::from_millis(5_500)).await;

        let guard = shared.lock().unwrap();
        assert!(guard.session.timed_out());
        assert_eq!(guard.session.remaining_seconds(), 0);
        assert!(tx.borrow().is_submitted());
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticking() {
        let shared = shared(60, 0);
        let tx = channel(&shared);
        let handle = CountdownHandle::spawn(shared.clone(), 0, fixed_clock(), tx);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(shared.lock().unwrap().session.remaining_seconds(), 59);
    }
}
