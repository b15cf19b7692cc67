use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::app::APP_TITLE;
use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:topic", QuizView)] Quiz { topic: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "{APP_TITLE}" }
            ul {
                li { Link { to: Route::Home {}, "Topics" } }
            }
        }
    }
}
