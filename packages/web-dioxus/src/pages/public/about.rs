use dioxus::prelude::*;

use crate::routes::Route;

const VALUES: [(&str, &str, &str); 3] = [
    ("\u{1F3AF}", "Student-first outcomes", "Personalized roadmaps and measurable progress, not generic recommendations."),
    ("\u{1F91D}", "Trusted partners", "Verified college links, partner programs and industry-aligned opportunities."),
    ("\u{1F6E0}", "Project delivery", "Digital marketing, infrastructure and branding work delivered on schedule."),
];

#[component]
pub fn About() -> Element {
    rsx! {
        div {
            class: "mx-auto max-w-6xl px-4 py-16 sm:px-6",
            header {
                class: "mb-16 grid items-center gap-10 md:grid-cols-2",
                div {
                    h1 {
                        class: "mb-6 text-4xl font-bold sm:text-5xl",
                        "About "
                        span { class: "text-orange-500", "TECH MATCH" }
                        " Solutions"
                    }
                    p {
                        class: "mb-6 text-lg text-gray-300",
                        "We guide students from shortlisting to admission, domestic and international, with honest counselling, verified college information and partner-backed programs."
                    }
                    ul {
                        class: "mb-8 space-y-2 text-gray-300",
                        li { b { "Admissions" } ": domestic and international" }
                        li { b { "Counselling" } ": 1-on-1 planning, SOP and interview prep" }
                        li { b { "Projects" } ": digital marketing, infra, branding and campaign support" }
                    }
                    div {
                        class: "flex gap-4",
                        Link {
                            to: Route::Services {},
                            class: "rounded-lg bg-orange-500 px-6 py-3 font-semibold text-white hover:bg-orange-600",
                            "Our Services"
                        }
                        Link {
                            to: Route::Contact {},
                            class: "rounded-lg border border-white/30 px-6 py-3 font-semibold text-white hover:border-orange-500",
                            "Contact Us"
                        }
                    }
                }
                img {
                    class: "rounded-3xl object-cover",
                    src: "/assets/about-hero.jpg",
                    alt: "Students and counsellors collaborating in an office",
                }
            }

            section {
                class: "mb-16",
                h2 { class: "mb-4 text-3xl font-bold", "Our mission" }
                p {
                    class: "mb-8 max-w-3xl text-gray-300",
                    "To make admissions transparent and effective: connecting students with programs that fit their goals, and helping partners scale through targeted project work."
                }
                div {
                    class: "grid gap-6 md:grid-cols-3",
                    for (icon, title, text) in VALUES {
                        article {
                            key: "{title}",
                            class: "rounded-2xl border border-white/10 bg-white/5 p-6",
                            div { class: "mb-3 text-3xl", "{icon}" }
                            h3 { class: "mb-2 text-lg font-semibold", "{title}" }
                            p { class: "text-sm text-gray-400", "{text}" }
                        }
                    }
                }
            }

            section {
                class: "rounded-3xl bg-orange-500/10 p-10 text-center",
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
