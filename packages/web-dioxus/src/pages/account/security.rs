//! Account security: email verification and SMS second factors

use dioxus::prelude::*;

use super::AuthCard;
use crate::auth::{
    complete_mfa_enrollment, error_text, fetch_viewer, resend_email_verification,
    start_mfa_enrollment, use_auth,
};
use crate::components::{
    code_input_error, phone_input_error, recaptcha_token, ErrorBanner, LoadingDots,
    LoadingSpinner, RecaptchaSlot, SuccessBanner, BUTTON_CLASS, INPUT_CLASS,
};
use crate::routes::Route;
use crate::types::Viewer;

#[component]
pub fn AccountSecurity() -> Element {
    let auth = use_auth();
    let mut viewer = use_server_future(fetch_viewer)?;

    if !auth.is_authenticated() && !auth.loading.cloned() {
        return rsx! {
            Redirect { to: Route::SignIn {} }
        };
    }

    let body = match viewer.value().cloned() {
        Some(Ok(Some(account))) => rsx! {
            EmailStatus { account: account.clone() }
            SecondFactors { account, on_enrolled: move |_| viewer.restart() }
        },
        Some(Ok(None)) => rsx! {
            p { class: "text-center text-gray-400", "Please sign in first." }
        },
        Some(Err(e)) => rsx! {
            ErrorBanner { message: error_text(&e) }
        },
        None => rsx! {
            LoadingSpinner {}
        },
    };

    rsx! {
        AuthCard { title: "Account security", subtitle: "Verification and two-step sign-in",
            {body}
        }
    }
}

#[component]
fn EmailStatus(account: Viewer) -> Element {
    let mut notice = use_signal(|| None::<Result<String, String>>);
    let mut is_pending = use_signal(|| false);

    let Some(email) = account.email.clone() else {
        return rsx! {
            p { class: "text-sm text-gray-400", "No email address on this account." }
        };
    };

    let resend = move |_| {
        spawn(async move {
            is_pending.set(true);
            let outcome = match resend_email_verification().await {
                Ok(true) => Ok("Verification email sent. Check your inbox.".to_string()),
                Ok(false) => Err("Could not send the verification email".to_string()),
                Err(e) => Err(error_text(&e)),
            };
            notice.set(Some(outcome));
            is_pending.set(false);
        });
    };

    rsx! {
        section {
            class: "space-y-3 rounded-xl border border-white/10 p-4",
            h2 { class: "font-semibold", "Email" }
            p { class: "text-sm text-gray-300", "{email}" }
            if account.email_verified {
                span { class: "text-sm text-green-400", "Verified" }
            } else {
                span { class: "text-sm text-yellow-400", "Not verified" }
                button {
                    class: BUTTON_CLASS,
                    disabled: is_pending(),
                    onclick: resend,
                    if is_pending() { LoadingDots {} } else { "Resend verification email" }
                }
            }
            {match notice() {
                Some(Ok(message)) => rsx! { SuccessBanner { message } },
                Some(Err(message)) => rsx! { ErrorBanner { message } },
                None => rsx! {},
            }}
        }
    }
}

#[component]
fn SecondFactors(account: Viewer, on_enrolled: EventHandler<()>) -> Element {
    let mut phone = use_signal(String::new);
    let mut label = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut verification = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    let start = move |_| {
        let number = phone().trim().replace(' ', "");
        if let Some(problem) = phone_input_error(&number) {
            error.set(Some(problem.to_string()));
            return;
        }
        spawn(async move {
            is_pending.set(true);
            error.set(None);
            let token = match recaptcha_token("recaptcha-enroll").await {
                Ok(token) => token,
                Err(problem) => {
                    error.set(Some(problem));
                    is_pending.set(false);
                    return;
                }
            };
            match start_mfa_enrollment(number, token).await {
                Ok(sent) => {
                    success.set(Some(sent.message));
                    verification.set(Some(sent.verification_id));
                }
                Err(e) => error.set(Some(error_text(&e))),
            }
            is_pending.set(false);
        });
    };

    let finish = move |_| {
        let Some(verification_id) = verification() else {
            return;
        };
        let value = code().trim().to_string();
        if let Some(problem) = code_input_error(&value) {
            error.set(Some(problem.to_string()));
            return;
        }
        spawn(async move {
            is_pending.set(true);
            error.set(None);
            match complete_mfa_enrollment(verification_id, value, Some(label())).await {
                Ok(_) => {
                    verification.set(None);
                    code.set(String::new());
                    success.set(Some("Two-step verification is on.".to_string()));
                    on_enrolled.call(());
                }
                Err(e) => error.set(Some(error_text(&e))),
            }
            is_pending.set(false);
        });
    };

    rsx! {
        section {
            class: "space-y-3 rounded-xl border border-white/10 p-4",
            h2 { class: "font-semibold", "Two-step verification" }

            if account.mfa_factors.is_empty() {
                p { class: "text-sm text-gray-400", "No second factor enrolled." }
            } else {
                ul {
                    class: "space-y-1 text-sm text-gray-300",
                    for factor in account.mfa_factors.iter() {
                        li {
                            key: "{factor.enrollment_id}",
                            {factor.display_name.clone().unwrap_or_else(|| "Phone".to_string())}
                            if let Some(hint) = factor.phone_hint.clone() {
                                span { class: "ml-2 text-gray-500", "{hint}" }
                            }
                        }
                    }
                }
            }

            if let Some(message) = success() {
                SuccessBanner { message }
            }
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if verification().is_none() {
                input {
                    r#type: "tel",
                    class: INPUT_CLASS,
                    placeholder: "+91 98765 43210",
                    value: "{phone}",
                    oninput: move |e| phone.set(e.value()),
                }
                input {
                    class: INPUT_CLASS,
                    placeholder: "Label, e.g. My phone (optional)",
                    value: "{label}",
                    oninput: move |e| label.set(e.value()),
                }
                button {
                    class: BUTTON_CLASS,
                    disabled: is_pending(),
                    onclick: start,
                    if is_pending() { LoadingDots {} } else { "Add phone factor" }
                }
                RecaptchaSlot { id: "recaptcha-enroll" }
            } else {
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    autocomplete: "one-time-code",
                    class: INPUT_CLASS,
                    placeholder: "123456",
                    value: "{code}",
                    oninput: move |e| code.set(e.value()),
                }
                button {
                    class: BUTTON_CLASS,
                    disabled: is_pending(),
                    onclick: finish,
                    if is_pending() { LoadingDots {} } else { "Confirm" }
                }
            }
        }
    }
}
