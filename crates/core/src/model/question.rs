use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option {option:?} appears more than once")]
    DuplicateOption { option: String },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question from the question bank.
///
/// The correct option is always one of `options`; this is checked when the
/// question is built or deserialized, so a `Question` in hand is always scorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option: String,
    explanation: Option<String>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, fewer than two options are
    /// given, an option is blank or repeated, or `correct_option` is not an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_option = correct_option.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        for (index, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if !options.contains(&correct_option) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: correct_option,
            });
        }

        let explanation = explanation.filter(|e| !e.trim().is_empty());

        Ok(Self {
            text,
            options,
            correct_option,
            explanation,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Returns true if `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

/// Wire shape of a question as stored in the content files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(
            record.question,
            record.options,
            record.answer,
            record.explanation,
        )
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            question: question.text,
            options: question.options,
            answer: question.correct_option,
            explanation: question.explanation,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
