use dioxus::prelude::*;

/// Floating "message us" button
#[component]
pub fn WhatsAppButton(url: String) -> Element {
    let mut hovered = use_signal(|| false);

    rsx! {
        a {
            class: "fixed bottom-6 right-6 z-40 flex items-center gap-3",
            href: "{url}",
            target: "_blank",
            rel: "noopener noreferrer",
            "aria-label": "Contact us on WhatsApp",
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            if hovered() {
                span {
                    class: "rounded-lg bg-white px-3 py-1.5 text-sm text-gray-900 shadow",
                    "Message us on WhatsApp"
                }
            }
            span {
                class: "flex h-14 w-14 items-center justify-center rounded-full bg-green-500 text-2xl text-white shadow-lg transition-transform hover:scale-110",
                "\u{1F4AC}"
            }
        }
    }
}
