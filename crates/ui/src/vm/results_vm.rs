use quiz_core::{QuestionOutcome, QuizSession, ScoreError, ScoreReport};

use crate::vm::quiz_vm::option_letter;

/// How an option is drawn on the results page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    /// The correct option, whether or not it was picked.
    Correct,
    /// Picked, but wrong.
    Wrong,
    Neutral,
}

impl OptionMark {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Correct => "option option-correct",
            Self::Wrong => "option option-wrong",
            Self::Neutral => "option",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultOptionVm {
    pub letter: String,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub number: usize,
    pub text: String,
    pub outcome: QuestionOutcome,
    pub options: Vec<ResultOptionVm>,
    pub explanation: Option<String>,
}

impl ResultItemVm {
    #[must_use]
    pub fn outcome_label(&self) -> &'static str {
        match self.outcome {
            QuestionOutcome::Correct => "Correct",
            QuestionOutcome::Incorrect => "Incorrect",
            QuestionOutcome::Unanswered => "Unanswered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub incorrect: usize,
    pub percentage_label: String,
    pub timed_out: bool,
    pub items: Vec<ResultItemVm>,
}

impl ResultsVm {
    /// # Errors
    ///
    /// Returns `ScoreError::NotSubmitted` while the session is still active.
    pub fn from_session(session: &QuizSession) -> Result<Self, ScoreError> {
        let report = ScoreReport::from_session(session)?;

        let items = session
            .questions()
            .iter()
            .zip(&report.outcomes)
            .enumerate()
            .map(|(index, (question, outcome))| {
                let chosen = session
                    .answer_for(index)
                    .map(|record| record.selected_option.as_str());
                ResultItemVm {
                    number: index + 1,
                    text: question.text().to_string(),
                    outcome: *outcome,
                    options: question
                        .options()
                        .iter()
                        .enumerate()
                        .map(|(i, option)| ResultOptionVm {
                            letter: option_letter(i),
                            text: option.clone(),
                            mark: if question.is_correct(option) {
                                OptionMark::Correct
                            } else if chosen == Some(option.as_str()) {
                                OptionMark::Wrong
                            } else {
                                OptionMark::Neutral
                            },
                        })
                        .collect(),
                    explanation: question.explanation().map(str::to_string),
                }
            })
            .collect();

        Ok(Self {
            score: report.score,
            total: report.total,
            answered: report.answered,
            unanswered: report.unanswered,
            incorrect: report.incorrect(),
            percentage_label: report
                .percentage
                .map_or_else(|| "-".to_string(), |p| format!("{p}%")),
            timed_out: report.timed_out,
            items,
        })
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.timed_out {
            "Time is up"
        } else {
            "Quiz submitted"
        }
    }
}
