use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

/// Window and document title.
pub const APP_TITLE: &str = "AFAD Quiz App";

pub const APP_DESCRIPTION: &str = "AFAD Görevde Yükselme Sınavı Hazırlık Uygulaması";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "{APP_TITLE}" }
        document::Meta { name: "description", content: APP_DESCRIPTION }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "The quiz stopped unexpectedly" }
                        p { "Restart the app to try again. Answers from the current attempt are lost." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
