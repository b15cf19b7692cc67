use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{FALLBACK_TITLE, TopicKey};
use services::{LiveSession, QuizError, SessionSnapshot};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::results::ResultsPanel;
use crate::vm::{QuestionVm, QuizVm, ResultsVm};

enum Stage {
    Loading,
    Running(QuizVm),
    Finished(ResultsVm),
    Failed(ViewError),
}

#[component]
pub fn QuizView(topic: String) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz_service();

    let mut live = use_signal(|| None::<LiveSession>);
    let mut snapshot = use_signal(|| None::<SessionSnapshot>);
    let mut title = use_signal(|| FALLBACK_TITLE.to_string());
    let mut error = use_signal(|| None::<ViewError>);

    // Owns the attempt for as long as the page is mounted; dropping the
    // session on unmount stops its countdown.
    use_future(move || {
        let quiz = quiz.clone();
        let topic = topic.clone();
        async move {
            let Ok(key) = TopicKey::new(topic) else {
                error.set(Some(ViewError::EmptySession));
                return;
            };
            if let Ok(catalog) = quiz.catalog().await {
                title.set(catalog.title_for(&key).to_string());
            }

            match quiz.start_live(&key).await {
                Ok(session) => {
                    let mut rx = session.subscribe();
                    live.set(Some(session));
                    loop {
                        let current = *rx.borrow_and_update();
                        snapshot.set(Some(current));
                        if rx.changed().await.is_err() {
                            break;
                        }
                    }
                }
                Err(QuizError::ContentNotFound { .. }) => error.set(Some(ViewError::EmptySession)),
                Err(_) => error.set(Some(ViewError::Unknown)),
            }
        }
    });

    let mut select = move |index: usize, option: String| {
        let outcome = live
            .read()
            .as_ref()
            .map(|session| session.record_answer(index, option));
        if let Some(Err(_)) = outcome {
            error.set(Some(ViewError::Unknown));
        }
    };

    let submit = move |_: MouseEvent| {
        let outcome = live.write().as_mut().map(LiveSession::submit);
        if let Some(Err(_)) = outcome {
            error.set(Some(ViewError::Unknown));
        }
    };

    let restart = move |()| {
        let outcome = live.write().as_mut().map(LiveSession::restart);
        if let Some(Err(_)) = outcome {
            error.set(Some(ViewError::Unknown));
        }
    };

    // Snapshots only schedule re-renders; the stage is read from the session.
    let _ = snapshot.read();
    let stage = if let Some(err) = error() {
        Stage::Failed(err)
    } else {
        live.read().as_ref().map_or(Stage::Loading, stage_of)
    };

    rsx! {
        div { class: "page quiz",
            h2 { "{title}" }

            match stage {
                Stage::Loading => rsx! {
                    p { "Loading..." }
                },
                Stage::Running(vm) => rsx! {
                    QuizBoard {
                        vm,
                        on_select: move |(index, option): (usize, String)| select(index, option),
                        on_submit: submit,
                    }
                },
                Stage::Finished(results) => rsx! {
                    ResultsPanel { results, on_restart: restart }
                    Link { to: Route::Home {}, "Back to topics" }
                },
                Stage::Failed(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to topics" }
                },
            }
        }
    }
}

fn stage_of(session: &LiveSession) -> Stage {
    match session.with_session(QuizVm::from_session) {
        Ok(vm) if vm.submitted => match session.with_session(ResultsVm::from_session) {
            Ok(Ok(results)) => Stage::Finished(results),
            _ => Stage::Failed(ViewError::Unknown),
        },
        Ok(vm) => Stage::Running(vm),
        Err(_) => Stage::Failed(ViewError::Unknown),
    }
}

#[component]
fn QuizBoard(
    vm: QuizVm,
    on_select: EventHandler<(usize, String)>,
    on_submit: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        header { class: "quiz-header",
            span { class: "{vm.urgency.css_class()}", "{vm.remaining_label}" }
            span { class: "progress-label", "{vm.answered} / {vm.total} answered" }
            if vm.attempt > 1 {
                span { class: "attempt", "Attempt {vm.attempt}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {vm.progress_percent}%" }
            }
        }

        ol { class: "questions",
            for question in vm.questions {
                QuestionCard { key: "{question.index}", question, on_select }
            }
        }

        if vm.unanswered > 0 {
            p { class: "warning", "{vm.unanswered} questions unanswered" }
        }

        button {
            id: "quiz-submit",
            class: "btn btn-primary",
            onclick: move |evt| on_submit.call(evt),
            "Submit"
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_select: EventHandler<(usize, String)>) -> Element {
    let index = question.index;

    rsx! {
        li { class: "{question.css_class()}",
            p { class: "question-text", "{question.number}. {question.text}" }
            ul { class: "options",
                for option in question.options.iter() {
                    li {
                        button {
                            class: "{option.css_class()}",
                            onclick: {
                                let text = option.text.clone();
                                move |_| on_select.call((index, text.clone()))
                            },
                            "{option.letter}. {option.text}"
                        }
                    }
                }
            }
        }
    }
}
