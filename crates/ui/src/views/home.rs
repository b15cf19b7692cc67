use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::TopicCatalog;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    catalog: TopicCatalog,
    sample_size: u32,
    minutes: u32,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz_service();

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            let catalog = quiz.catalog().await.map_err(|_| ViewError::Unknown)?;
            let settings = quiz.settings();
            Ok::<_, ViewError>(HomeData {
                catalog,
                sample_size: settings.sample_size(),
                minutes: settings.time_limit_secs() / 60,
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Topics" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "hint",
                        "Each quiz draws up to {data.sample_size} questions. You have {data.minutes} minutes."
                    }
                    if data.catalog.is_empty() {
                        p { "No topics yet." }
                    } else {
                        ul { class: "topic-list",
                            for topic in data.catalog.topics().iter().cloned() {
                                li { key: "{topic.id}",
                                    Link { to: Route::Quiz { topic: topic.id.to_string() },
                                        "{topic.title}"
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
