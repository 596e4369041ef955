//! Consultation booking

use dioxus::prelude::*;

use super::FormField;
use crate::auth::error_text;
use crate::components::{ErrorBanner, LoadingDots, SuccessBanner, BUTTON_CLASS, INPUT_CLASS};
#[cfg(feature = "server")]
use crate::graphql::{server_client, SUBMIT_BOOKING};
use crate::types::InquiryResult;

const DURATIONS: [&str; 3] = ["30 minutes", "45 minutes", "60 minutes"];

#[component]
pub fn Booking() -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut duration = use_signal(|| DURATIONS[0].to_string());
    let mut preferred = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut result = use_signal(|| None::<InquiryResult>);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        spawn(async move {
            is_pending.set(true);
            error.set(None);

            let request = BookingRequest {
                name: name(),
                email: email(),
                phone: phone(),
                session_duration: duration(),
                preferred_date_time: preferred(),
                message: message(),
            };
            match submit_booking(request).await {
                Ok(outcome) => {
                    if outcome.success {
                        message.set(String::new());
                        preferred.set(String::new());
                    }
                    result.set(Some(outcome));
                }
                Err(e) => error.set(Some(error_text(&e))),
            }

            is_pending.set(false);
        });
    };

    let field_error = move |field: &'static str| {
        result
            .read()
            .as_ref()
            .and_then(|r| r.error_for(field).map(str::to_string))
    };

    let outcome = result();

    rsx! {
        div {
            class: "mx-auto grid max-w-6xl gap-12 px-4 py-16 sm:px-6 md:grid-cols-2",
            section {
                h1 { class: "mb-4 text-4xl font-bold", "Lock in your consultation with TechMatch" }
                p { class: "mb-8 text-gray-300", "Pick a session length and a time that suits you. We confirm every booking by email." }
                h3 { class: "mb-3 text-lg font-semibold", "What you\u{2019}ll get" }
                ul {
                    class: "space-y-3 text-gray-300",
                    li { b { "Same-day triage" } ": we read every request the day it arrives." }
                    li { b { "Secure by default" } ": your details go only to our counsellors." }
                    li { b { "Outcome-first" } ": every session ends with a written next step." }
                }
            }

            form {
                class: "space-y-4 rounded-2xl border border-white/10 bg-white/5 p-6",
                onsubmit: handle_submit,

                h2 { class: "text-2xl font-bold", "Tell us what you need" }

                if let Some(outcome) = outcome.as_ref().filter(|o| o.success) {
                    SuccessBanner { message: outcome.message.clone().unwrap_or_else(|| "Booking received.".to_string()) }
                }
                if let Some(outcome) = outcome.as_ref().filter(|o| !o.success && o.errors.is_empty()) {
                    ErrorBanner { message: outcome.message.clone().unwrap_or_else(|| "Booking failed. Please try again.".to_string()) }
                }
                if let Some(message) = error() {
                    ErrorBanner { message }
                }

                FormField { label: "Full Name *", error: field_error("name"),
                    input { class: INPUT_CLASS, value: "{name}", oninput: move |e| name.set(e.value()) }
                }
                FormField { label: "Work Email *", error: field_error("email"),
                    input { r#type: "email", class: INPUT_CLASS, value: "{email}", oninput: move |e| email.set(e.value()) }
                }
                FormField { label: "Phone Number", error: field_error("phone"),
                    input { r#type: "tel", class: INPUT_CLASS, placeholder: "+91 98765 43210", value: "{phone}", oninput: move |e| phone.set(e.value()) }
                }
                FormField { label: "Session Duration", error: field_error("sessionDuration"),
                    select {
                        class: INPUT_CLASS,
                        value: "{duration}",
                        onchange: move |e| duration.set(e.value()),
                        for option in DURATIONS {
                            option { key: "{option}", value: "{option}", "{option}" }
                        }
                    }
                }
                FormField { label: "Preferred Date & Time", error: field_error("preferredDateTime"),
                    input { r#type: "datetime-local", class: INPUT_CLASS, value: "{preferred}", oninput: move |e| preferred.set(e.value()) }
                }
                FormField { label: "Tell us about your project or questions *", error: field_error("message"),
                    textarea {
                        class: INPUT_CLASS,
                        rows: "5",
                        placeholder: "Goals, questions, context, or anything we should prepare...",
                        value: "{message}",
                        oninput: move |e| message.set(e.value()),
                    }
                }
                if let Some(problem) = field_error("submit") {
                    ErrorBanner { message: problem }
                }

                button {
                    r#type: "submit",
                    class: BUTTON_CLASS,
                    disabled: is_pending(),
                    if is_pending() { LoadingDots {} } else { "Book Consultation" }
                }
            }
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub session_duration: String,
    pub preferred_date_time: String,
    pub message: String,
}

#[server]
async fn submit_booking(request: BookingRequest) -> Result<InquiryResult, ServerFnError> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Input {
        name: String,
        email: String,
        phone: Option<String>,
        session_duration: Option<String>,
        preferred_date_time: Option<String>,
        message: String,
    }

    #[derive(serde::Serialize)]
    struct Variables {
        input: Input,
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        submit_booking: InquiryResult,
    }

    let present = |s: String| Some(s).filter(|s| !s.trim().is_empty());
    let input = Input {
        name: request.name,
        email: request.email,
        phone: present(request.phone),
        session_duration: present(request.session_duration),
        preferred_date_time: present(request.preferred_date_time),
        message: request.message,
    };
    let response: Response = server_client()
        .mutate(SUBMIT_BOOKING, Some(Variables { input }))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.submit_booking)
}
