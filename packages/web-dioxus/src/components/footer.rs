use dioxus::prelude::*;

use crate::routes::Route;
use crate::types::ContactInfo;

#[component]
pub fn Footer(contact: Option<ContactInfo>) -> Element {
    rsx! {
        footer {
            class: "border-t border-white/10 bg-black/80 text-gray-400",
            div {
                class: "mx-auto grid max-w-7xl gap-8 px-4 py-12 sm:px-6 md:grid-cols-3",
                div {
                    h3 { class: "mb-3 text-lg font-semibold text-white", "TechMatch" }
                    p { class: "text-sm",
                        "Admissions guidance, career counselling and freelance placements for students across India."
                    }
                }
                div {
                    h4 { class: "mb-3 font-semibold text-white", "Quick Links" }
                    ul { class: "space-y-2 text-sm",
                        li { Link { to: Route::About {}, class: "hover:text-orange-400", "About Us" } }
                        li { Link { to: Route::Services {}, class: "hover:text-orange-400", "Services" } }
                        li { Link { to: Route::Admissions {}, class: "hover:text-orange-400", "Admissions" } }
                        li { Link { to: Route::Booking {}, class: "hover:text-orange-400", "Book a Consultation" } }
                    }
                }
                div {
                    h4 { class: "mb-3 font-semibold text-white", "Contact Info" }
                    if let Some(contact) = contact {
                        ul { class: "space-y-2 text-sm",
                            li { a { href: "mailto:{contact.email}", class: "hover:text-orange-400", "{contact.email}" } }
                            li { a { href: "tel:{contact.phone}", class: "hover:text-orange-400", "{contact.phone}" } }
                            li { "{contact.address}" }
                        }
                    }
                }
            }
            p {
                class: "border-t border-white/10 py-4 text-center text-xs",
                "\u{00A9} TechMatch. All rights reserved."
            }
        }
    }
}
