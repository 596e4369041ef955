//! Sign-in page

use dioxus::prelude::*;

use super::{AuthCard, Method, MethodSwitch};
use crate::auth::{error_text, sign_in_with_email, use_auth};
use crate::components::{
    ErrorBanner, GoogleButton, LoadingDots, MfaChallengeForm, PhoneOtpForm, BUTTON_CLASS, INPUT_CLASS,
};
use crate::routes::Route;
use crate::types::{AuthStep, MfaChallenge};

#[component]
pub fn SignIn() -> Element {
    let mut auth = use_auth();
    let navigator = use_navigator();

    let method = use_signal(|| Method::Email);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut mfa = use_signal(|| None::<MfaChallenge>);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    // Redirect if already authenticated
    if auth.is_authenticated() {
        return rsx! {
            Redirect { to: Route::Home {} }
        };
    }

    let mut handle_step = move |step: AuthStep| match (step.user, step.mfa) {
        (Some(user), _) => {
            auth.signed_in(user);
            navigator.push(Route::Home {});
        }
        (None, Some(challenge)) => mfa.set(Some(challenge)),
        (None, None) => error.set(Some(
            step.message.unwrap_or_else(|| "Sign-in did not complete".to_string()),
        )),
    };

    let handle_email = move |e: FormEvent| {
        e.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() || password().is_empty() {
            error.set(Some("Please enter your email and password".to_string()));
            return;
        }

        spawn(async move {
            is_pending.set(true);
            error.set(None);

            match sign_in_with_email(address, password()).await {
                Ok(step) => handle_step(step),
                Err(e) => error.set(Some(error_text(&e))),
            }

            is_pending.set(false);
        });
    };

    if let Some(challenge) = mfa() {
        return rsx! {
            AuthCard { title: "Two-step verification", subtitle: "One more step to finish signing in",
                MfaChallengeForm {
                    challenge,
                    on_signed_in: move |user| {
                        auth.signed_in(user);
                        navigator.push(Route::Home {});
                    },
                }
            }
        };
    }

    rsx! {
        AuthCard { title: "Welcome back", subtitle: "Sign in to your TechMatch account",
            MethodSwitch { method }

            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if method() == Method::Email {
                form {
                    class: "space-y-4",
                    onsubmit: handle_email,
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
                        placeholder: "Password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    div {
                        class: "text-right",
                        Link { to: Route::PasswordReset {}, class: "text-sm text-orange-400 hover:underline", "Forgot password?" }
                    }
                    button {
                        r#type: "submit",
                        class: BUTTON_CLASS,
                        disabled: is_pending(),
                        if is_pending() { LoadingDots {} } else { "Sign In" }
                    }
                }
            } else {
                PhoneOtpForm { on_step: move |step| handle_step(step) }
            }

            div { class: "text-center text-xs uppercase text-gray-500", "or" }
            GoogleButton { label: "Continue with Google" }

            p {
                class: "text-center text-sm text-gray-400",
                "New to TechMatch? "
                Link { to: Route::SignUp {}, class: "text-orange-400 hover:underline", "Create an account" }
            }
        }
    }
}
