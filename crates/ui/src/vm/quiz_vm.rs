use quiz_core::QuizSession;

use crate::vm::time_fmt::{TimerUrgency, format_countdown};

/// Letter shown in front of an option: `A`, `B`, ... then numbers past `Z`.
#[must_use]
pub fn option_letter(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => (index + 1).to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: String,
    pub text: String,
    pub selected: bool,
}

impl OptionVm {
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        if self.selected {
            "option option-selected"
        } else {
            "option"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub answered: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        if self.answered {
            "question answered"
        } else {
            "question"
        }
    }
}

/// Everything the quiz page renders while an attempt is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub remaining_label: String,
    pub urgency: TimerUrgency,
    pub answered: usize,
    pub unanswered: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub attempt: u32,
    pub submitted: bool,
    pub questions: Vec<QuestionVm>,
}

impl QuizVm {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let progress = session.progress();
        let remaining = session.remaining_seconds();

        let questions = session
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = session
                    .answer_for(index)
                    .map(|record| record.selected_option.as_str());
                QuestionVm {
                    index,
                    number: index + 1,
                    text: question.text().to_string(),
                    options: question
                        .options()
                        .iter()
                        .enumerate()
                        .map(|(i, option)| OptionVm {
                            letter: option_letter(i),
                            text: option.clone(),
                            selected: chosen == Some(option.as_str()),
                        })
                        .collect(),
                    answered: chosen.is_some(),
                }
            })
            .collect();

        Self {
            remaining_label: format_countdown(remaining),
            urgency: TimerUrgency::for_remaining(remaining),
            answered: progress.answered,
            unanswered: progress.unanswered,
            total: progress.total,
            progress_percent: progress.percent,
            attempt: session.attempt(),
            submitted: session.is_submitted(),
            questions,
        }
    }
}
