//! Home page component

use dioxus::prelude::*;

use super::{fetch_services, ServiceCard};
use crate::components::{Carousel, LoadingSpinner, PromoModal};
use crate::routes::Route;

const FEATURES: [(&str, &str, &str); 6] = [
    ("\u{1F393}", "Admissions Guidance", "Shortlisting, applications and follow-up for colleges in India and abroad."),
    ("\u{1F9ED}", "Career Counselling", "One-on-one planning sessions, SOP reviews and interview preparation."),
    ("\u{1F91D}", "Trusted Partners", "Verified college links and partner-backed programs."),
    ("\u{26A1}", "Fast Turnaround", "Same-day triage for every enquiry we receive."),
    ("\u{1F512}", "Secure Accounts", "Phone-linked sign-in with optional two-step verification."),
    ("\u{1F4C8}", "Freelance Projects", "Digital marketing, branding and infrastructure work for partners."),
];

const STATS: [(&str, &str); 4] = [
    ("150+", "Projects Completed"),
    ("50+", "Partner Institutions"),
    ("15+", "Years Experience"),
    ("98%", "Success Rate"),
];

/// Home page - carousel, hero, service overview
#[component]
pub fn Home() -> Element {
    let services = use_server_future(fetch_services)?;
    let promo_open = use_signal(|| true);

    let services_view = match services.value().as_ref() {
        None => rsx! { LoadingSpinner {} },
        Some(Err(_)) => rsx! {
            p { class: "text-center text-gray-400", "Services are unavailable right now." }
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
            class: "min-h-screen",

            PromoModal { open: promo_open }

            Carousel {}

            // Hero Section
            section {
                class: "mx-auto max-w-4xl px-4 py-16 text-center",
                h1 {
                    class: "mb-4 text-4xl font-bold sm:text-5xl",
                    "Your Path to the "
                    span { class: "text-orange-500", "Right College" }
                }
                p {
                    class: "mb-8 text-lg text-gray-300",
                    "TechMatch guides students from shortlisting to admission with honest counselling and verified college information."
                }
                div {
                    class: "flex flex-wrap justify-center gap-4",
                    Link {
                        to: Route::SignIn {},
                        class: "rounded-lg bg-orange-500 px-6 py-3 font-semibold text-white hover:bg-orange-600",
                        "Get Started"
                    }
                    Link {
                        to: Route::Services {},
                        class: "rounded-lg border border-white/30 px-6 py-3 font-semibold text-white hover:border-orange-500",
                        "Explore Services"
                    }
                }
            }

            // Features
            section {
                class: "mx-auto max-w-7xl px-4 py-12 sm:px-6",
                h2 { class: "mb-8 text-center text-3xl font-bold", "Why Choose TechMatch?" }
                div {
                    class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                    for (icon, title, text) in FEATURES {
                        div {
                            key: "{title}",
                            class: "rounded-2xl border border-white/10 bg-white/5 p-6",
                            div { class: "mb-3 text-3xl", "{icon}" }
                            h3 { class: "mb-2 text-lg font-semibold", "{title}" }
                            p { class: "text-sm text-gray-400", "{text}" }
                        }
                    }
                }
            }

            // Services preview
            section {
                class: "mx-auto max-w-7xl px-4 py-12 sm:px-6",
                h2 { class: "mb-8 text-center text-3xl font-bold", "Our Services" }
                {services_view}
            }

            // Stats
            section {
                class: "mx-auto grid max-w-5xl grid-cols-2 gap-6 px-4 py-12 md:grid-cols-4",
                for (number, label) in STATS {
                    div {
                        key: "{label}",
                        class: "text-center",
                        div { class: "text-4xl font-bold text-orange-500", "{number}" }
                        div { class: "mt-1 text-sm text-gray-400", "{label}" }
                    }
                }
            }

            // CTA
            section {
                class: "mx-auto max-w-4xl px-4 py-16 text-center",
                h2 { class: "mb-4 text-3xl font-bold", "Ready to take the next step?" }
                Link {
                    to: Route::Booking {},
                    class: "rounded-lg bg-orange-500 px-6 py-3 font-semibold text-white hover:bg-orange-600",
                    "Book a Consultation"
                }
            }
        }
    }
}
