use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The user's current choice for one question of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_option: String,
    pub is_correct: bool,
}

/// Answers of a session, keyed by question index.
///
/// There is at most one record per index; answering again replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    records: BTreeMap<usize, AnswerRecord>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for `record.question_index`.
    ///
    /// Returns the previous record for that index, if any.
    pub fn upsert(&mut self, record: AnswerRecord) -> Option<AnswerRecord> {
        self.records.insert(record.question_index, record)
    }

    #[must_use]
    pub fn get(&self, question_index: usize) -> Option<&AnswerRecord> {
        self.records.get(&question_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records marked correct.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.records.values().filter(|r| r.is_correct).count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
