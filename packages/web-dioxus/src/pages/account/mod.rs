//! Sign-in, sign-up and account pages

mod auth_complete;
mod password_reset;
mod security;
mod sign_in;
mod sign_up;

pub use auth_complete::*;
pub use password_reset::*;
pub use security::*;
pub use sign_in::*;
pub use sign_up::*;

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum Method {
    Email,
    Phone,
}

/// Email | Phone switch at the top of the auth cards
#[component]
fn MethodSwitch(method: Signal<Method>) -> Element {
    let mut method = method;
    let tab = |active: bool| {
        if active {
            "flex-1 rounded-lg bg-orange-500 py-2 text-sm font-semibold text-white"
        } else {
            "flex-1 rounded-lg py-2 text-sm text-gray-300 hover:text-white"
        }
    };

    rsx! {
        div {
            class: "flex gap-2 rounded-xl bg-white/5 p-1",
            button {
                r#type: "button",
                class: tab(method() == Method::Email),
                onclick: move |_| method.set(Method::Email),
                "Email"
            }
            button {
                r#type: "button",
                class: tab(method() == Method::Phone),
                onclick: move |_| method.set(Method::Phone),
                "Phone"
            }
        }
    }
}

/// Centered card shared by the auth pages
#[component]
fn AuthCard(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div {
            class: "flex min-h-[80vh] items-center justify-center px-4 py-16",
            div {
                class: "w-full max-w-md space-y-6 rounded-2xl border border-white/10 bg-black/60 p-8 backdrop-blur",
                div {
                    class: "text-center",
                    h1 { class: "text-3xl font-bold", "{title}" }
                    p { class: "mt-2 text-sm text-gray-400", "{subtitle}" }
                }
                {children}
            }
        }
    }
}
