//! Partner announcement shown over the home page

use dioxus::prelude::*;

use crate::state::{modal_should_close, DismissAttempt};

const PARTNER_URL: &str = "https://firebird.ac.in";
const PARTNER_NAME: &str = "FIREBIRD \u{2014} Institute of Research in Management";
const PARTNER_PROGRAMS: &str =
    "PGDM \u{00B7} Global MBA \u{00B7} PGP \u{2014} The Business School that speaks industry languages";
const PARTNER_IMAGE: &str =
    "https://www.firebird.ac.in/wp-content/uploads/2023/06/landscape-student-pic-1.jpg";

#[component]
pub fn PromoModal(open: Signal<bool>) -> Element {
    let mut open = open;
    let mut attempt = move |kind: DismissAttempt| {
        if modal_should_close(kind) {
            open.set(false);
        }
    };

    if !open() {
        return rsx! {};
    }

    let short_name = PARTNER_NAME.split(" \u{2014} ").next().unwrap_or(PARTNER_NAME);

    rsx! {
        div {
            class: "fixed inset-0 z-40 flex items-center justify-center bg-black/70 p-4",
            role: "dialog",
            "aria-modal": "true",
            "aria-labelledby": "promo-title",
            tabindex: "-1",
            onmounted: move |e| async move {
                let _ = e.set_focus(true).await;
            },
            onclick: move |_| attempt(DismissAttempt::OverlayClick),
            onkeydown: move |e| {
                if e.key() == Key::Escape {
                    attempt(DismissAttempt::EscapeKey);
                } else {
                    attempt(DismissAttempt::OtherKey);
                }
            },
            div {
                class: "relative w-full max-w-lg overflow-hidden rounded-2xl bg-white text-gray-900 shadow-2xl",
                onclick: move |e| e.stop_propagation(),
                button {
                    class: "absolute right-3 top-3 rounded-full bg-white/80 px-2 text-xl",
                    "aria-label": "Close",
                    onclick: move |_| attempt(DismissAttempt::CloseButton),
                    "\u{00D7}"
                }
                img { class: "h-48 w-full object-cover", src: PARTNER_IMAGE, alt: "{PARTNER_NAME}" }
                div {
                    class: "space-y-3 p-6",
                    h2 { id: "promo-title", class: "text-xl font-bold", "{PARTNER_NAME}" }
                    p { class: "text-sm font-semibold text-slate-900", "{PARTNER_PROGRAMS}" }
                    p { class: "text-sm text-gray-600",
                        "Explore our exclusive industry-linked programs and research collaborations. Learn how TECH MATCH and {short_name} work together to prepare students for industry-ready careers."
                    }
                    div { class: "flex gap-3 pt-2",
                        a {
                            class: "rounded-lg bg-orange-500 px-4 py-2 text-sm font-semibold text-white hover:bg-orange-600",
                            href: PARTNER_URL,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "Learn More"
                        }
                        button {
                            class: "rounded-lg border border-gray-300 px-4 py-2 text-sm hover:bg-gray-100",
                            onclick: move |_| attempt(DismissAttempt::CloseButton),
                            "Close"
                        }
                    }
                }
            }
        }
    }
}
