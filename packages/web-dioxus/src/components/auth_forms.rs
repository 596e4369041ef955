//! Code-based auth steps shared by the sign-in, sign-up and Google pages

use dioxus::prelude::*;

use super::{recaptcha_token, ErrorBanner, LoadingDots, RecaptchaSlot, SuccessBanner};
use crate::auth::{
    confirm_phone_link, confirm_phone_otp, error_text, finalize_mfa_sign_in, google_start_url,
    send_phone_link_otp, send_phone_otp, start_mfa_sign_in,
};
use crate::types::{AuthStep, AuthUser, MfaChallenge};

pub const INPUT_CLASS: &str = "w-full rounded-lg border border-white/15 bg-white/5 px-4 py-3 text-white placeholder-gray-500 focus:border-orange-500 focus:outline-none";
pub const BUTTON_CLASS: &str = "w-full rounded-lg bg-orange-500 px-4 py-3 font-semibold text-white hover:bg-orange-600 disabled:opacity-50";

/// Quick check before asking the API to text a number
pub fn phone_input_error(phone: &str) -> Option<&'static str> {
    let phone = phone.trim();
    if phone.is_empty() {
        Some("Please enter your phone number")
    } else if !phone.starts_with('+') {
        Some("Please enter phone number with country code (e.g., +91...)")
    } else {
        None
    }
}

pub fn code_input_error(code: &str) -> Option<&'static str> {
    if code.trim().is_empty() {
        Some("Please enter the verification code")
    } else {
        None
    }
}

/// Two-step phone code form; the owner decides what sending and confirming do
#[component]
fn CodeForm(
    phone_label: String,
    send_label: String,
    verification: Signal<Option<String>>,
    on_send: EventHandler<String>,
    on_confirm: EventHandler<(String, String)>,
    pending: bool,
    error: Option<String>,
    message: Option<String>,
) -> Element {
    let mut phone = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut local_error = use_signal(|| None::<&'static str>);

    let shown_error = local_error().map(str::to_string).or(error);

    rsx! {
        div {
            class: "space-y-4",
            if let Some(message) = message {
                SuccessBanner { message }
            }
            if let Some(message) = shown_error {
                ErrorBanner { message }
            }

            {match verification() {
                None => rsx! {
                    label { class: "block text-sm text-gray-300", "{phone_label}" }
                    input {
                        r#type: "tel",
                        class: INPUT_CLASS,
                        placeholder: "+91 98765 43210",
                        value: "{phone}",
                        oninput: move |e| phone.set(e.value()),
                    }
                    button {
                        class: BUTTON_CLASS,
                        disabled: pending,
                        onclick: move |_| {
                            let value = phone().trim().replace(' ', "");
                            local_error.set(phone_input_error(&value));
                            if local_error().is_none() {
                                on_send.call(value);
                            }
                        },
                        if pending { LoadingDots {} } else { "{send_label}" }
                    }
                },
                Some(verification_id) => rsx! {
                    label { class: "block text-sm text-gray-300", "Verification code" }
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
                        disabled: pending,
                        onclick: move |_| {
                            let value = code().trim().to_string();
                            local_error.set(code_input_error(&value));
                            if local_error().is_none() {
                                on_confirm.call((verification_id.clone(), value));
                            }
                        },
                        if pending { LoadingDots {} } else { "Verify" }
                    }
                },
            }}
        }
    }
}

/// Sign in (or up) with a texted code
#[component]
pub fn PhoneOtpForm(on_step: EventHandler<AuthStep>) -> Element {
    let mut verification = use_signal(|| None::<String>);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut message = use_signal(|| None::<String>);

    rsx! {
        CodeForm {
            phone_label: "Phone number",
            send_label: "Send OTP",
            verification,
            pending: pending(),
            error: error(),
            message: message(),
            on_send: move |phone: String| {
                spawn(async move {
                    pending.set(true);
                    error.set(None);
                    let token = match recaptcha_token("recaptcha-phone-otp").await {
                        Ok(token) => token,
                        Err(problem) => {
                            error.set(Some(problem));
                            pending.set(false);
                            return;
                        }
                    };
                    match send_phone_otp(phone, token).await {
                        Ok(sent) => {
                            message.set(Some(sent.message));
                            verification.set(Some(sent.verification_id));
                        }
                        Err(e) => error.set(Some(error_text(&e))),
                    }
                    pending.set(false);
                });
            },
            on_confirm: move |(verification_id, code): (String, String)| {
                spawn(async move {
                    pending.set(true);
                    error.set(None);
                    match confirm_phone_otp(verification_id, code).await {
                        Ok(step) => on_step.call(step),
                        Err(e) => error.set(Some(error_text(&e))),
                    }
                    pending.set(false);
                });
            },
        }
        RecaptchaSlot { id: "recaptcha-phone-otp" }
    }
}

/// Attach a phone to the signed-in account
#[component]
pub fn PhoneLinkForm(on_linked: EventHandler<AuthUser>) -> Element {
    let mut verification = use_signal(|| None::<String>);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut message = use_signal(|| None::<String>);

    rsx! {
        CodeForm {
            phone_label: "Link a phone number for account recovery",
            send_label: "Send code",
            verification,
            pending: pending(),
            error: error(),
            message: message(),
            on_send: move |phone: String| {
                spawn(async move {
                    pending.set(true);
                    error.set(None);
                    let token = match recaptcha_token("recaptcha-phone-link").await {
                        Ok(token) => token,
                        Err(problem) => {
                            error.set(Some(problem));
                            pending.set(false);
                            return;
                        }
                    };
                    match send_phone_link_otp(phone, token).await {
                        Ok(sent) => {
                            message.set(Some(sent.message));
                            verification.set(Some(sent.verification_id));
                        }
                        Err(e) => error.set(Some(error_text(&e))),
                    }
                    pending.set(false);
                });
            },
            on_confirm: move |(verification_id, code): (String, String)| {
                spawn(async move {
                    pending.set(true);
                    error.set(None);
                    match confirm_phone_link(verification_id, code).await {
                        Ok(AuthStep { user: Some(user), .. }) => {
                            message.set(Some("Phone linked successfully. Redirecting...".to_string()));
                            on_linked.call(user);
                        }
                        Ok(_) => error.set(Some("Phone could not be linked".to_string())),
                        Err(e) => error.set(Some(error_text(&e))),
                    }
                    pending.set(false);
                });
            },
        }
        RecaptchaSlot { id: "recaptcha-phone-link" }
    }
}

/// Second-factor step after a password or Google sign-in
#[component]
pub fn MfaChallengeForm(challenge: MfaChallenge, on_signed_in: EventHandler<AuthUser>) -> Element {
    let mut verification = use_signal(|| None::<String>);
    let mut code = use_signal(String::new);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut message = use_signal(|| None::<String>);

    let Some(factor) = challenge.factors.first().cloned() else {
        return rsx! {
            ErrorBanner { message: "No second factor is enrolled on this account." }
        };
    };
    let hint = factor
        .phone_hint
        .clone()
        .unwrap_or_else(|| "your phone".to_string());

    let pending_credential = challenge.pending_credential.clone();
    let send_credential = pending_credential.clone();
    let send = move |_| {
        let pending_credential = send_credential.clone();
        let enrollment_id = factor.enrollment_id.clone();
        spawn(async move {
            pending.set(true);
            error.set(None);
            let token = match recaptcha_token("recaptcha-mfa").await {
                Ok(token) => token,
                Err(problem) => {
                    error.set(Some(problem));
                    pending.set(false);
                    return;
                }
            };
            match start_mfa_sign_in(pending_credential, enrollment_id, token).await {
                Ok(sent) => {
                    message.set(Some(sent.message));
                    verification.set(Some(sent.verification_id));
                }
                Err(e) => error.set(Some(error_text(&e))),
            }
            pending.set(false);
        });
    };

    let verify = move |_| {
        let Some(verification_id) = verification() else {
            error.set(Some("Please request OTP first".to_string()));
            return;
        };
        let value = code().trim().to_string();
        if let Some(problem) = code_input_error(&value) {
            error.set(Some(problem.to_string()));
            return;
        }
        let pending_credential = pending_credential.clone();
        spawn(async move {
            pending.set(true);
            error.set(None);
            match finalize_mfa_sign_in(pending_credential, verification_id, value).await {
                Ok(AuthStep { user: Some(user), .. }) => on_signed_in.call(user),
                Ok(_) => error.set(Some("Verification did not complete".to_string())),
                Err(e) => error.set(Some(error_text(&e))),
            }
            pending.set(false);
        });
    };

    rsx! {
        div {
            class: "space-y-4",
            p { class: "text-sm text-gray-300",
                "This account uses two-step verification. We will text a code to {hint}."
            }
            if let Some(message) = message() {
                SuccessBanner { message }
            }
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            if verification().is_none() {
                button {
                    class: BUTTON_CLASS,
                    disabled: pending(),
                    onclick: send,
                    if pending() { LoadingDots {} } else { "Send code" }
                }
                RecaptchaSlot { id: "recaptcha-mfa" }
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
                    disabled: pending(),
                    onclick: verify,
                    if pending() { LoadingDots {} } else { "Verify" }
                }
            }
        }
    }
}

/// Full-page redirect into the API's Google flow
#[component]
pub fn GoogleButton(label: String) -> Element {
    let url = use_server_future(google_start_url)?;
    let href = match url.value().as_ref() {
        Some(Ok(url)) => url.clone(),
        _ => "#".to_string(),
    };

    rsx! {
        a {
            class: "flex w-full items-center justify-center gap-3 rounded-lg border border-white/20 bg-white px-4 py-3 font-semibold text-gray-900 hover:bg-gray-100",
            href: "{href}",
            span { class: "text-lg font-bold text-blue-600", "G" }
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_needs_country_code() {
        assert_eq!(phone_input_error(""), Some("Please enter your phone number"));
        assert_eq!(
            phone_input_error("9876543210"),
            Some("Please enter phone number with country code (e.g., +91...)")
        );
        assert_eq!(phone_input_error(" +919876543210 "), None);
    }

    #[test]
    fn code_must_not_be_blank() {
        assert!(code_input_error("  ").is_some());
        assert!(code_input_error("123456").is_none());
    }
}
