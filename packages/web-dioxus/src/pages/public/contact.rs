//! Contact page and the site-wide contact details

use dioxus::prelude::*;

use crate::auth::error_text;
use crate::components::{ErrorBanner, LoadingDots, SuccessBanner, BUTTON_CLASS, INPUT_CLASS};
#[cfg(feature = "server")]
use crate::graphql::{server_client, GET_CONTACT_INFO, SUBMIT_CONTACT};
use crate::types::{ContactInfo, InquiryResult};

#[component]
pub fn Contact() -> Element {
    let info = use_server_future(fetch_contact_info)?;

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut subject = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut result = use_signal(|| None::<InquiryResult>);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        spawn(async move {
            is_pending.set(true);
            error.set(None);

            match submit_contact(name(), email(), phone(), subject(), message()).await {
                Ok(outcome) => {
                    if outcome.success {
                        name.set(String::new());
                        email.set(String::new());
                        phone.set(String::new());
                        subject.set(String::new());
                        message.set(String::new());
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

    let info = info.value().as_ref().and_then(|r| r.as_ref().ok().cloned());
    let outcome = result();

    rsx! {
        div {
            class: "mx-auto grid max-w-6xl gap-12 px-4 py-16 sm:px-6 md:grid-cols-2",
            section {
                h1 { class: "mb-4 text-4xl font-bold", "Get in Touch" }
                p { class: "mb-8 text-gray-300", "Questions about admissions, counselling or a project? Send us a note and we will reply within a working day." }
                if let Some(info) = info {
                    ul {
                        class: "space-y-4 text-gray-300",
                        li { "\u{2709} " a { href: "mailto:{info.email}", class: "hover:text-orange-400", "{info.email}" } }
                        li { "\u{260E} " a { href: "tel:{info.phone}", class: "hover:text-orange-400", "{info.phone}" } }
                        li { "\u{1F4CD} {info.address}" }
                        li {
                            a {
                                href: "{info.whatsapp_url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "inline-block rounded-lg bg-green-500 px-4 py-2 font-semibold text-white hover:bg-green-600",
                                "Chat on WhatsApp"
                            }
                        }
                    }
                }
            }

            form {
                class: "space-y-4 rounded-2xl border border-white/10 bg-white/5 p-6",
                onsubmit: handle_submit,

                if let Some(outcome) = outcome.as_ref().filter(|o| o.success) {
                    SuccessBanner { message: outcome.message.clone().unwrap_or_else(|| "Thanks! We will be in touch soon.".to_string()) }
                }
                if let Some(outcome) = outcome.as_ref().filter(|o| !o.success && o.errors.is_empty()) {
                    ErrorBanner { message: outcome.message.clone().unwrap_or_else(|| "Something went wrong. Please try again.".to_string()) }
                    if let Some(mailto) = outcome.fallback_mailto.clone() {
                        a {
                            href: "{mailto}",
                            class: "block text-sm text-orange-400 hover:underline",
                            "Send it from your email app instead"
                        }
                    }
                }
                if let Some(message) = error() {
                    ErrorBanner { message }
                }

                FormField { label: "Name *", error: field_error("name"),
                    input { class: INPUT_CLASS, value: "{name}", oninput: move |e| name.set(e.value()) }
                }
                FormField { label: "Email *", error: field_error("email"),
                    input { r#type: "email", class: INPUT_CLASS, value: "{email}", oninput: move |e| email.set(e.value()) }
                }
                FormField { label: "Phone", error: field_error("phone"),
                    input { r#type: "tel", class: INPUT_CLASS, value: "{phone}", oninput: move |e| phone.set(e.value()) }
                }
                FormField { label: "Subject *", error: field_error("subject"),
                    input { class: INPUT_CLASS, value: "{subject}", oninput: move |e| subject.set(e.value()) }
                }
                FormField { label: "Message *", error: field_error("message"),
                    textarea { class: INPUT_CLASS, rows: "5", value: "{message}", oninput: move |e| message.set(e.value()) }
                }
                if let Some(problem) = field_error("submit") {
                    ErrorBanner { message: problem }
                }

                button {
                    r#type: "submit",
                    class: BUTTON_CLASS,
                    disabled: is_pending(),
                    if is_pending() { LoadingDots {} } else { "Send Message" }
                }
            }
        }
    }
}

/// Label, input and its server-side error
#[component]
pub fn FormField(label: String, error: Option<String>, children: Element) -> Element {
    rsx! {
        div {
            label { class: "mb-1 block text-sm text-gray-300", "{label}" }
            {children}
            if let Some(error) = error {
                p { class: "mt-1 text-xs text-red-400", "{error}" }
            }
        }
    }
}

#[server]
pub async fn fetch_contact_info() -> Result<ContactInfo, ServerFnError> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        contact_info: ContactInfo,
    }

    let response: Response = server_client()
        .query(GET_CONTACT_INFO, None::<()>)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.contact_info)
}

#[server]
async fn submit_contact(
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
) -> Result<InquiryResult, ServerFnError> {
    #[derive(serde::Serialize)]
    struct Input {
        name: String,
        email: String,
        phone: Option<String>,
        subject: String,
        message: String,
    }

    #[derive(serde::Serialize)]
    struct Variables {
        input: Input,
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        submit_contact: InquiryResult,
    }

    let input = Input {
        name,
        email,
        phone: Some(phone).filter(|p| !p.trim().is_empty()),
        subject,
        message,
    };
    let response: Response = server_client()
        .mutate(SUBMIT_CONTACT, Some(Variables { input }))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.submit_contact)
}
