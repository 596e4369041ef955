//! College directory

use dioxus::prelude::*;

use crate::components::{LoadingSpinner, INPUT_CLASS};
#[cfg(feature = "server")]
use crate::graphql::{server_client, GET_COLLEGES, GET_COLLEGE_SECTIONS};
use crate::routes::Route;
use crate::types::{College, CollegeList, CollegeSection, CollegeSectionTab};

#[component]
pub fn Admissions() -> Element {
    let sections = use_server_future(fetch_college_sections)?;
    let mut section = use_signal(CollegeSection::default);
    let mut search = use_signal(String::new);

    // Re-runs whenever the tab or the search text changes
    let colleges = use_server_future(move || fetch_colleges(section(), search()))?;

    let tabs = match sections.value().as_ref() {
        Some(Ok(tabs)) => tabs.clone(),
        _ => Vec::new(),
    };

    let results = match colleges.value().as_ref() {
        None => rsx! { LoadingSpinner {} },
        Some(Err(e)) => rsx! {
            p { class: "text-center text-red-400", "Failed to load colleges: {e}" }
        },
        Some(Ok(list)) if list.colleges.is_empty() => rsx! {
            p { class: "py-12 text-center text-gray-400", "No colleges match your search." }
        },
        Some(Ok(list)) => rsx! {
            p { class: "mb-4 text-sm text-gray-400", "{list.total} colleges" }
            div {
                class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                for college in list.colleges.iter().cloned() {
                    CollegeCard { key: "{college.id}", college }
                }
            }
        },
    };

    rsx! {
        div {
            class: "mx-auto max-w-7xl px-4 py-16 sm:px-6",
            header {
                class: "mb-10 text-center",
                h1 { class: "mb-4 text-4xl font-bold", "Admissions" }
                p { class: "text-gray-300", "Explore colleges and universities we work with across India." }
            }

            div {
                class: "mb-6 flex flex-wrap justify-center gap-2",
                for tab in tabs {
                    button {
                        key: "{tab.label}",
                        class: if section() == tab.section {
                            "rounded-full bg-orange-500 px-4 py-2 text-sm font-semibold text-white"
                        } else {
                            "rounded-full border border-white/20 px-4 py-2 text-sm text-gray-300 hover:border-orange-500"
                        },
                        onclick: move |_| section.set(tab.section),
                        "{tab.label}"
                    }
                }
            }

            div {
                class: "mx-auto mb-10 max-w-xl",
                input {
                    r#type: "search",
                    class: INPUT_CLASS,
                    placeholder: "Search by name, city or category...",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                }
            }

            {results}

            div {
                class: "mt-12 text-center",
                Link {
                    to: Route::Booking {},
                    class: "rounded-lg bg-orange-500 px-6 py-3 font-semibold text-white hover:bg-orange-600",
                    "Talk to a counsellor"
                }
            }
        }
    }
}

#[component]
fn CollegeCard(college: College) -> Element {
    rsx! {
        article {
            class: "overflow-hidden rounded-2xl border border-white/10 bg-white/5",
            img { class: "h-40 w-full object-cover", src: "{college.image}", alt: "{college.name}" }
            div {
                class: "space-y-2 p-5",
                span {
                    class: "inline-block rounded-full bg-orange-500/20 px-3 py-1 text-xs text-orange-300",
                    "{college.category}"
                }
                h3 { class: "text-lg font-semibold", "{college.name}" }
                p { class: "text-sm text-gray-400", "{college.city}, {college.region}" }
                p { class: "text-sm text-gray-300", "{college.description}" }
                a {
                    class: "inline-block text-sm text-orange-400 hover:underline",
                    href: "{college.website}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Visit website \u{2192}"
                }
            }
        }
    }
}

#[server]
async fn fetch_college_sections() -> Result<Vec<CollegeSectionTab>, ServerFnError> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        college_sections: Vec<CollegeSectionTab>,
    }

    let response: Response = server_client()
        .query(GET_COLLEGE_SECTIONS, None::<()>)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.college_sections)
}

#[server]
async fn fetch_colleges(section: CollegeSection, query: String) -> Result<CollegeList, ServerFnError> {
    #[derive(serde::Serialize)]
    struct Variables {
        section: CollegeSection,
        query: Option<String>,
    }

    #[derive(serde::Deserialize)]
    struct Response {
        colleges: CollegeList,
    }

    let query = Some(query).filter(|q| !q.trim().is_empty());
    let response: Response = server_client()
        .query(GET_COLLEGES, Some(Variables { section, query }))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.colleges)
}
