//! Sign-up page

use dioxus::prelude::*;

use super::{AuthCard, Method, MethodSwitch};
use crate::auth::{error_text, sign_up_with_email, use_auth};
use crate::components::{
    sleep_ms, ErrorBanner, GoogleButton, LoadingDots, PhoneLinkForm, PhoneOtpForm, SuccessBanner,
    BUTTON_CLASS, INPUT_CLASS,
};
use crate::routes::Route;
use crate::types::{AuthStep, NextStep};

pub const TERMS_REQUIRED: &str = "You must accept the Terms of Service.";

/// Client-side checks before the form goes to the API
pub fn sign_up_error(display_name: &str, email: &str, password: &str, accepted_tos: bool) -> Option<&'static str> {
    if !accepted_tos {
        Some(TERMS_REQUIRED)
    } else if display_name.trim().is_empty() {
        Some("Please enter your name")
    } else if email.trim().is_empty() {
        Some("Please enter your email")
    } else if password.len() < 6 {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

#[component]
pub fn SignUp() -> Element {
    let mut auth = use_auth();
    let navigator = use_navigator();

    let method = use_signal(|| Method::Email);
    let mut display_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut accepted_tos = use_signal(|| false);
    let mut linking = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    if auth.is_authenticated() && !linking() {
        return rsx! {
            Redirect { to: Route::Home {} }
        };
    }

    let mut finish = move |step: AuthStep| {
        let Some(user) = step.user else {
            error.set(Some(
                step.message.unwrap_or_else(|| "Sign-up did not complete".to_string()),
            ));
            return;
        };
        success.set(step.message);
        // Stay on the page for the phone step even though a session exists
        if step.next_step == NextStep::LinkPhone {
            linking.set(true);
            auth.signed_in(user);
        } else {
            auth.signed_in(user);
            spawn(async move {
                sleep_ms(2_000).await;
                navigator.push(Route::Home {});
            });
        }
    };

    let handle_email = move |e: FormEvent| {
        e.prevent_default();
        if let Some(problem) = sign_up_error(&display_name(), &email(), &password(), accepted_tos()) {
            error.set(Some(problem.to_string()));
            return;
        }

        spawn(async move {
            is_pending.set(true);
            error.set(None);
            success.set(None);

            let phone_number = Some(phone().trim().replace(' ', "")).filter(|p| !p.is_empty());
            match sign_up_with_email(
                display_name().trim().to_string(),
                email().trim().to_string(),
                password(),
                phone_number,
                accepted_tos(),
            )
            .await
            {
                Ok(step) => finish(step),
                Err(e) => error.set(Some(error_text(&e))),
            }

            is_pending.set(false);
        });
    };

    if linking() {
        return rsx! {
            AuthCard { title: "Link your phone", subtitle: "Used to recover your account",
                if let Some(message) = success() {
                    SuccessBanner { message }
                }
                PhoneLinkForm {
                    on_linked: move |user| {
                        auth.signed_in(user);
                        spawn(async move {
                            sleep_ms(1_200).await;
                            navigator.push(Route::Home {});
                        });
                    },
                }
                button {
                    class: "w-full text-center text-sm text-gray-400 hover:text-white",
                    onclick: move |_| { navigator.push(Route::Home {}); },
                    "Skip for now"
                }
            }
        };
    }

    rsx! {
        AuthCard { title: "Create your account", subtitle: "Join TechMatch to book sessions and track admissions",
            MethodSwitch { method }

            if let Some(message) = success() {
                SuccessBanner { message }
            }
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            label {
                class: "flex items-start gap-2 text-sm text-gray-300",
                input {
                    r#type: "checkbox",
                    class: "mt-1",
                    checked: accepted_tos(),
                    onchange: move |e| accepted_tos.set(e.checked()),
                }
                "I accept the Terms of Service and Privacy Policy"
            }

            if method() == Method::Email {
                form {
                    class: "space-y-4",
                    onsubmit: handle_email,
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Full name",
                        autocomplete: "name",
                        value: "{display_name}",
                        oninput: move |e| display_name.set(e.value()),
                    }
                    input {
                        r#type: "email",
                        class: INPUT_CLASS,
                        placeholder: "Email address",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    input {
                        r#type: "password",
                        class: INPUT_CLASS,
                        placeholder: "Password (6+ characters)",
                        autocomplete: "new-password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    input {
                        r#type: "tel",
                        class: INPUT_CLASS,
                        placeholder: "Phone with country code (optional)",
                        value: "{phone}",
                        oninput: move |e| phone.set(e.value()),
                    }
                    button {
                        r#type: "submit",
                        class: BUTTON_CLASS,
                        disabled: is_pending(),
                        if is_pending() { LoadingDots {} } else { "Create Account" }
                    }
                }
            } else if accepted_tos() {
                PhoneOtpForm { on_step: move |step| finish(step) }
            } else {
                p { class: "text-center text-sm text-gray-400", "{TERMS_REQUIRED}" }
            }

            div { class: "text-center text-xs uppercase text-gray-500", "or" }
            GoogleButton { label: "Sign up with Google" }

            p {
                class: "text-center text-sm text-gray-400",
                "Already have an account? "
                Link { to: Route::SignIn {}, class: "text-orange-400 hover:underline", "Sign in" }
            }
        }
    }
}
