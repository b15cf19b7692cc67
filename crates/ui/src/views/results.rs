use dioxus::prelude::*;

use crate::vm::{ResultItemVm, ResultsVm};

#[component]
pub fn ResultsPanel(results: ResultsVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        section { class: "results",
            h3 { "{results.headline()}" }

            dl { class: "summary",
                dt { "Score" }
                dd { "{results.score} / {results.total}" }

                dt { "Percentage" }
                dd { "{results.percentage_label}" }

                dt { "Answered" }
                dd { "{results.answered}" }

                dt { "Incorrect" }
                dd { "{results.incorrect}" }

                dt { "Unanswered" }
                dd { "{results.unanswered}" }
            }

            button {
                id: "quiz-restart",
                class: "btn btn-primary",
                onclick: move |_| on_restart.call(()),
                "Try again"
            }

            ol { class: "result-items",
                for item in results.items {
                    ResultItem { key: "{item.number}", item }
                }
            }
        }
    }
}

#[component]
fn ResultItem(item: ResultItemVm) -> Element {
    rsx! {
        li { class: "result-item",
            p { class: "question-text",
                "{item.number}. {item.text}"
                span { class: "outcome", " ({item.outcome_label()})" }
            }
            ul { class: "options",
                for option in item.options {
                    li { class: "{option.mark.css_class()}",
                        "{option.letter}. {option.text}"
                    }
                }
            }
            if let Some(explanation) = item.explanation {
                p { class: "explanation", "{explanation}" }
            }
        }
    }
}
