//! Service list and detail pages

use dioxus::prelude::*;

use crate::components::LoadingSpinner;
#[cfg(feature = "server")]
use crate::graphql::{server_client, GET_SERVICE, GET_SERVICES};
use crate::routes::Route;
use crate::types::Service;

#[component]
pub fn ServiceCard(service: Service) -> Element {
    rsx! {
        Link {
            to: Route::ServiceDetail { id: service.id.clone() },
            class: "block rounded-2xl border border-white/10 bg-white/5 p-6 transition hover:-translate-y-1 hover:border-orange-500",
            div { class: "mb-3 text-4xl", "{service.icon}" }
            h3 { class: "mb-1 text-xl font-semibold", "{service.title}" }
            p { class: "mb-3 text-sm text-orange-400", "{service.tagline}" }
            p { class: "mb-4 text-sm text-gray-400", "{service.summary}" }
            ul {
                class: "space-y-1 text-sm text-gray-300",
                for feature in service.features.iter() {
                    li { key: "{feature}", "\u{2713} {feature}" }
                }
            }
        }
    }
}

#[component]
pub fn Services() -> Element {
    let services = use_server_future(fetch_services)?;

    let body = match services.value().as_ref() {
        None => rsx! { LoadingSpinner {} },
        Some(Err(e)) => rsx! {
            p { class: "text-center text-red-400", "Failed to load services: {e}" }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "grid gap-6 md:grid-cols-3",
                for service in list.iter().cloned() {
                    ServiceCard { key: "{service.id}", service }
                }
            }
        },
    };

    rsx! {
        div {
            class: "mx-auto max-w-7xl px-4 py-16 sm:px-6",
            header {
                class: "mb-12 text-center",
                h1 { class: "mb-4 text-4xl font-bold", "Our Services" }
                p { class: "text-gray-300", "Admissions, counselling and project work under one roof." }
            }
            {body}
        }
    }
}

#[component]
pub fn ServiceDetail(id: String) -> Element {
    let service = use_server_future(move || fetch_service(id.clone()))?;

    let service = match service.value().as_ref() {
        None => return rsx! { LoadingSpinner {} },
        Some(Err(e)) => {
            return rsx! {
                p { class: "py-16 text-center text-red-400", "Failed to load service: {e}" }
            }
        }
        Some(Ok(None)) => {
            return rsx! {
                div {
                    class: "py-24 text-center",
                    h1 { class: "mb-4 text-3xl font-bold", "Service not found" }
                    Link { to: Route::Services {}, class: "text-orange-400 hover:underline", "Back to services" }
                }
            }
        }
        Some(Ok(Some(service))) => service.clone(),
    };

    rsx! {
        div {
            class: "mx-auto max-w-6xl px-4 py-16 sm:px-6",
            Link { to: Route::Services {}, class: "text-sm text-gray-400 hover:text-orange-400", "\u{2190} All services" }

            header {
                class: "mt-6 mb-12",
                div { class: "mb-3 text-5xl", "{service.icon}" }
                h1 { class: "mb-2 text-4xl font-bold", style: "color: {service.color}", "{service.title}" }
                p { class: "text-lg text-gray-300", "{service.tagline}" }
                p { class: "mt-6 max-w-3xl text-gray-400", "{service.overview}" }
            }

            if !service.stats.is_empty() {
                section {
                    class: "mb-12 grid grid-cols-2 gap-6 md:grid-cols-4",
                    for stat in service.stats.iter() {
                        div {
                            key: "{stat.label}",
                            class: "rounded-2xl bg-white/5 p-6 text-center",
                            div { class: "text-3xl font-bold text-orange-500", "{stat.number}" }
                            div { class: "mt-1 text-sm text-gray-400", "{stat.label}" }
                        }
                    }
                }
            }

            section {
                class: "mb-12 grid gap-6 md:grid-cols-2",
                for section in service.sections.iter() {
                    article {
                        key: "{section.title}",
                        class: "rounded-2xl border border-white/10 bg-white/5 p-6",
                        h2 { class: "mb-2 text-xl font-semibold", "{section.title}" }
                        p { class: "mb-4 text-sm text-gray-400", "{section.description}" }
                        ul {
                            class: "space-y-1 text-sm text-gray-300",
                            for benefit in section.benefits.iter() {
                                li { key: "{benefit}", "\u{2713} {benefit}" }
                            }
                        }
                    }
                }
            }

            if !service.process.is_empty() {
                section {
                    h2 { class: "mb-6 text-2xl font-bold", "How it works" }
                    ol {
                        class: "space-y-4",
                        for step in service.process.iter() {
                            li {
                                key: "{step.step}",
                                class: "flex gap-4",
                                span {
                                    class: "flex h-10 w-10 shrink-0 items-center justify-center rounded-full bg-orange-500 font-bold",
                                    "{step.step}"
                                }
                                div {
                                    h3 { class: "font-semibold", "{step.title}" }
                                    p { class: "text-sm text-gray-400", "{step.description}" }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "mt-12 text-center",
                Link {
                    to: Route::Booking {},
                    class: "rounded-lg bg-orange-500 px-6 py-3 font-semibold text-white hover:bg-orange-600",
                    "Book a Consultation"
                }
            }
        }
    }
}

#[server]
pub async fn fetch_services() -> Result<Vec<Service>, ServerFnError> {
    #[derive(serde::Deserialize)]
    struct Response {
        services: Vec<Service>,
    }

    let response: Response = server_client()
        .query(GET_SERVICES, None::<()>)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.services)
}

#[server]
async fn fetch_service(id: String) -> Result<Option<Service>, ServerFnError> {
    #[derive(serde::Serialize)]
    struct Variables {
        id: String,
    }

    #[derive(serde::Deserialize)]
    struct Response {
        service: Option<Service>,
    }

    let response: Response = server_client()
        .query(GET_SERVICE, Some(Variables { id }))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.service)
}
