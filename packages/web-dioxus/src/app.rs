//! Root application component

use dioxus::prelude::*;

use crate::auth::AuthProvider;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "TechMatch | Study Abroad and Career Consulting" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Script { src: "https://cdn.tailwindcss.com" }

        // Auth context provider wraps the entire app
        AuthProvider {
            Router::<Route> {}
        }
    }
}
