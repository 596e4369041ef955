use dioxus::prelude::*;

use crate::components::LoadingSpinner;
#[cfg(feature = "server")]
use crate::graphql::{server_client, GET_TESTIMONIALS};
use crate::types::Testimonial;

fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
}

#[component]
pub fn Testimonials() -> Element {
    let testimonials = use_server_future(fetch_testimonials)?;

    let body = match testimonials.value().as_ref() {
        None => rsx! { LoadingSpinner {} },
        Some(Err(e)) => rsx! {
            p { class: "text-center text-red-400", "Failed to load testimonials: {e}" }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "grid gap-6 md:grid-cols-2 lg:grid-cols-3",
                for t in list.iter() {
                    figure {
                        key: "{t.id}",
                        class: "flex flex-col rounded-2xl border border-white/10 bg-white/5 p-6",
                        div { class: "mb-3 text-orange-400", "aria-label": "{t.rating} out of 5", {stars(t.rating)} }
                        blockquote { class: "mb-4 flex-1 text-gray-300", "\u{201C}{t.text}\u{201D}" }
                        figcaption {
                            div { class: "font-semibold", "{t.name}" }
                            div { class: "text-sm text-gray-400", "{t.role}, {t.company}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "mx-auto max-w-7xl px-4 py-16 sm:px-6",
            header {
                class: "mb-12 text-center",
                h1 { class: "mb-4 text-4xl font-bold", "What Our Students Say" }
                p { class: "text-gray-300", "Stories from students and partners we have worked with." }
            }
            {body}
        }
    }
}

#[server]
async fn fetch_testimonials() -> Result<Vec<Testimonial>, ServerFnError> {
    #[derive(serde::Deserialize)]
    struct Response {
        testimonials: Vec<Testimonial>,
    }

    let response: Response = server_client()
        .query(GET_TESTIMONIALS, None::<()>)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.testimonials)
}
