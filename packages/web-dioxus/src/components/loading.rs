//! Loading components

use dioxus::prelude::*;

/// Section loading spinner
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center py-16",
            div {
                class: "flex space-x-2",
                div { class: "w-3 h-3 bg-orange-500 rounded-full animate-bounce" }
                div { class: "w-3 h-3 bg-orange-500 rounded-full animate-bounce", style: "animation-delay: 0.1s" }
                div { class: "w-3 h-3 bg-orange-500 rounded-full animate-bounce", style: "animation-delay: 0.2s" }
            }
            p { class: "mt-4 text-sm text-gray-400", "Loading..." }
        }
    }
}

/// Inline indicator for pending buttons
#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        span {
            class: "inline-flex space-x-1",
            span { class: "w-2 h-2 bg-white rounded-full animate-bounce" }
            span { class: "w-2 h-2 bg-white rounded-full animate-bounce", style: "animation-delay: 0.1s" }
            span { class: "w-2 h-2 bg-white rounded-full animate-bounce", style: "animation-delay: 0.2s" }
        }
    }
}

/// Red banner for a failed request
#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div {
            class: "rounded-lg border border-red-500/40 bg-red-500/10 px-4 py-3 text-sm text-red-300",
            "{message}"
        }
    }
}

/// Green banner for a completed action
#[component]
pub fn SuccessBanner(message: String) -> Element {
    rsx! {
        div {
            class: "rounded-lg border border-green-500/40 bg-green-500/10 px-4 py-3 text-sm text-green-300",
            "{message}"
        }
    }
}
