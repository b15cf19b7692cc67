use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a topic in the question bank (e.g. `anayasa`, `657`).
///
/// Keys are opaque: the only rule is that they are not blank. Whether a key has
/// backing content is decided by the question store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicKey(String);

impl TopicKey {
    /// Creates a new `TopicKey`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TopicKeyError` if the key is empty after trimming.
    pub fn new(raw: impl Into<String>) -> Result<Self, TopicKeyError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicKeyError);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicKey({})", self.0)
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TopicKey {
    type Error = TopicKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicKey> for String {
    fn from(value: TopicKey) -> Self {
        value.0
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error returned when a topic key is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicKeyError;

impl fmt::Display for TopicKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("topic key cannot be empty")
    }
}

impl std::error::Error for TopicKeyError {}

impl FromStr for TopicKey {
    type Err = TopicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
