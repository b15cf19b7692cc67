use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of questions drawn per session.
pub const DEFAULT_SAMPLE_SIZE: u32 = 20;

/// Default session length: 20 minutes.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 20 * 60;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("sample size must be > 0")]
    InvalidSampleSize,

    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// How the session question set is drawn from a topic's pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Uniform random subset (Fisher–Yates, then take the first N).
    #[default]
    Shuffled,
    /// First N questions in stored order.
    InOrder,
}

/// Configuration for quiz sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    sample_size: u32,
    time_limit_secs: u32,
    selection: SelectionMode,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            selection: SelectionMode::Shuffled,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the sample size or time limit is zero.
    pub fn new(
        sample_size: u32,
        time_limit_secs: u32,
        selection: SelectionMode,
    ) -> Result<Self, SettingsError> {
        if sample_size == 0 {
            return Err(SettingsError::InvalidSampleSize);
        }
        if time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        Ok(Self {
            sample_size,
            time_limit_secs,
            selection,
        })
    }

    #[must_use]
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn selection(&self) -> SelectionMode {
        self.selection
    }
}
