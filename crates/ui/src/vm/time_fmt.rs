/// Countdown label as `MM:SS`; minutes keep growing past 99.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

/// Visual emphasis of the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerUrgency {
    Calm,
    Warning,
    Critical,
}

impl TimerUrgency {
    pub const WARNING_AT_SECS: u32 = 600;
    pub const CRITICAL_AT_SECS: u32 = 300;

    #[must_use]
    pub fn for_remaining(seconds: u32) -> Self {
        if seconds <= Self::CRITICAL_AT_SECS {
            Self::Critical
        } else if seconds <= Self::WARNING_AT_SECS {
            Self::Warning
        } else {
            Self::Calm
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Calm => "timer timer-calm",
            Self::Warning => "timer timer-warning",
            Self::Critical => "timer timer-critical",
        }
    }
}
