use dioxus::prelude::*;

use crate::components::LoadingSpinner;
#[cfg(feature = "server")]
use crate::graphql::{server_client, GET_CLIENTS};
use crate::types::Clients as ClientsData;

#[component]
pub fn Clients() -> Element {
    let clients = use_server_future(fetch_clients)?;

    let body = match clients.value().as_ref() {
        None => rsx! { LoadingSpinner {} },
        Some(Err(e)) => rsx! {
            p { class: "text-center text-red-400", "Failed to load clients: {e}" }
        },
        Some(Ok(data)) => rsx! {
            section {
                class: "mb-16 grid gap-6 md:grid-cols-3",
                for category in data.categories.iter() {
                    div {
                        key: "{category.name}",
                        class: "rounded-2xl border border-white/10 bg-white/5 p-6",
                        h2 { class: "mb-3 text-xl font-semibold", "{category.name}" }
                        div {
                            class: "flex flex-wrap gap-2",
                            for sector in category.sectors.iter() {
                                span {
                                    key: "{sector}",
                                    class: "rounded-full bg-white/10 px-3 py-1 text-xs text-gray-300",
                                    "{sector}"
                                }
                            }
                        }
                    }
                }
            }
            section {
                h2 { class: "mb-6 text-2xl font-bold", "Case Studies" }
                div {
                    class: "grid gap-6 md:grid-cols-2",
                    for study in data.case_studies.iter() {
                        article {
                            key: "{study.title}",
                            class: "rounded-2xl border border-white/10 bg-white/5 p-6",
                            span {
                                class: "mb-3 inline-block rounded-full bg-orange-500/20 px-3 py-1 text-xs text-orange-300",
                                "{study.badge}"
                            }
                            h3 { class: "text-lg font-semibold", "{study.title}" }
                            p { class: "mb-4 text-sm text-gray-400", "{study.company}" }
                            dl {
                                class: "space-y-2 text-sm",
                                dt { class: "font-semibold text-gray-200", "Challenge" }
                                dd { class: "text-gray-400", "{study.challenge}" }
                                dt { class: "font-semibold text-gray-200", "Solution" }
                                dd { class: "text-gray-400", "{study.solution}" }
                                dt { class: "font-semibold text-gray-200", "Result" }
                                dd { class: "text-green-400", "{study.result}" }
                            }
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
                h1 { class: "mb-4 text-4xl font-bold", "Our Clients" }
                p { class: "text-gray-300", "Institutions and businesses that trust TechMatch." }
            }
            {body}
        }
    }
}

#[server]
async fn fetch_clients() -> Result<ClientsData, ServerFnError> {
    #[derive(serde::Deserialize)]
    struct Response {
        clients: ClientsData,
    }

    let response: Response = server_client()
        .query(GET_CLIENTS, None::<()>)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.clients)
}
