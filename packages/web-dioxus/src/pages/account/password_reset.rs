//! Password reset request

use dioxus::prelude::*;

use super::AuthCard;
use crate::auth::{error_text, send_password_reset};
use crate::components::{ErrorBanner, LoadingDots, SuccessBanner, BUTTON_CLASS, INPUT_CLASS};
use crate::routes::Route;

#[component]
pub fn PasswordReset() -> Element {
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut sent = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() {
            error.set(Some("Please enter your email".to_string()));
            return;
        }

        spawn(async move {
            is_pending.set(true);
            error.set(None);

            match send_password_reset(address).await {
                Ok(result) if result.success => sent.set(Some(result.message.unwrap_or_else(|| {
                    "If an account exists for that email, a reset link is on its way.".to_string()
                }))),
                Ok(result) => error.set(Some(
                    result
                        .message
                        .unwrap_or_else(|| "Could not send the reset email".to_string()),
                )),
                Err(e) => error.set(Some(error_text(&e))),
            }

            is_pending.set(false);
        });
    };

    rsx! {
        AuthCard { title: "Reset your password", subtitle: "We will email you a reset link",
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if let Some(message) = sent() {
                SuccessBanner { message }
            } else {
                form {
                    class: "space-y-4",
                    onsubmit: handle_submit,
                    input {
                        r#type: "email",
                        class: INPUT_CLASS,
                        placeholder: "Email address",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    button {
                        r#type: "submit",
                        class: BUTTON_CLASS,
                        disabled: is_pending(),
                        if is_pending() { LoadingDots {} } else { "Send reset link" }
                    }
                }
            }

            p {
                class: "text-center text-sm text-gray-400",
                Link { to: Route::SignIn {}, class: "text-orange-400 hover:underline", "Back to sign in" }
            }
        }
    }
}
