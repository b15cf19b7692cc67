//! Draws the question set for a session from a topic's pool.

use rand::Rng;

use crate::model::{Question, QuizSettings, SelectionMode};

/// Source of uniform random indices for shuffling.
///
/// Every `rand::Rng` is a source, so a seeded `StdRng` gives deterministic draws.
pub trait RandomIndex {
    /// Returns an index uniformly distributed in `0..=upper`.
    fn index_through(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    fn index_through(&mut self, upper: usize) -> usize {
        self.random_range(0..=upper)
    }
}

/// Returns a uniformly shuffled copy of `items` (Fisher–Yates).
///
/// `items` itself is left untouched.
pub fn shuffled<T: Clone, R: RandomIndex + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.index_through(i).min(i);
        out.swap(i, j);
    }
    out
}

/// Uniform random subset of `min(count, pool.len())` questions.
///
/// An empty pool yields an empty set; callers treat that as "no content".
pub fn sample<R: RandomIndex + ?Sized>(
    pool: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut drawn = shuffled(pool, rng);
    drawn.truncate(count);
    drawn
}

/// Draw a session question set according to `settings`.
pub fn draw<R: RandomIndex + ?Sized>(
    pool: &[Question],
    settings: &QuizSettings,
    rng: &mut R,
) -> Vec<Question> {
    let count = usize::try_from(settings.sample_size()).unwrap_or(usize::MAX);
    match settings.selection() {
        SelectionMode::Shuffled => sample(pool, count, rng),
        SelectionMode::InOrder => pool.iter().take(count).cloned().collect(),
    }
}
