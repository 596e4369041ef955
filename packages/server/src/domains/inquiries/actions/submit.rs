use anyhow::{bail, Result};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domains::auth::models::hash_identifier;
use crate::domains::inquiries::models::{BookingForm, ContactForm, FormFieldError};
use crate::kernel::ServerDeps;

pub const CONTACT_FAILED_MESSAGE: &str =
    "Failed to send message. Please try again or use email option below.";
pub const BOOKING_FAILED_MESSAGE: &str =
    "Unable to submit right now. Please try again or reach us via Contact.";

/// Outcome of a form submission
#[derive(Debug, Clone, Default)]
pub struct InquiryOutcome {
    pub success: bool,
    pub errors: Vec<FormFieldError>,
    pub fallback_mailto: Option<String>,
    pub message: Option<String>,
}

impl InquiryOutcome {
    fn invalid(errors: Vec<FormFieldError>) -> Self {
        Self {
            errors,
            ..Default::default()
        }
    }

    fn submit_error(message: &str) -> Self {
        Self::invalid(vec![FormFieldError::new("submit", message)])
    }
}

/// Webhooks must be https
fn webhook_url(configured: Option<&str>, env_var: &str) -> Result<String> {
    match configured {
        Some(url) if url.starts_with("https://") => Ok(url.to_string()),
        _ => bail!("Invalid webhook URL. Please configure {} (https).", env_var),
    }
}

pub async fn submit_contact(form: ContactForm, deps: &ServerDeps) -> Result<InquiryOutcome> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(InquiryOutcome::invalid(errors));
    }

    let url = match webhook_url(deps.site.contact_webhook_url.as_deref(), "CONTACT_WEBHOOK_URL") {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Contact webhook not configured");
            return Ok(InquiryOutcome::submit_error(&e.to_string()));
        }
    };

    match deps.webhooks.post_json(&url, &form.payload(Utc::now())).await {
        Ok(()) => {
            info!(email_hash = %hash_identifier(&form.email), "Contact form delivered");
            Ok(InquiryOutcome {
                success: true,
                message: Some(format!(
                    "Thank you! We'll get back to you at {} soon.",
                    form.email.trim()
                )),
                ..Default::default()
            })
        }
        Err(e) => {
            error!(error = %e, "Contact form delivery failed");
            Ok(InquiryOutcome {
                fallback_mailto: Some(form.mailto(&deps.site.contact_email)),
                ..InquiryOutcome::submit_error(CONTACT_FAILED_MESSAGE)
            })
        }
    }
}

pub async fn submit_booking(form: BookingForm, deps: &ServerDeps) -> Result<InquiryOutcome> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(InquiryOutcome::invalid(errors));
    }

    let url = match webhook_url(deps.site.booking_webhook_url.as_deref(), "BOOKING_WEBHOOK_URL") {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Booking webhook not configured");
            return Ok(InquiryOutcome::submit_error(&e.to_string()));
        }
    };

    match deps.webhooks.post_json(&url, &form.payload()).await {
        Ok(()) => {
            info!(email_hash = %hash_identifier(&form.email), "Booking request delivered");
            Ok(InquiryOutcome {
                success: true,
                message: Some(format!(
                    "Booking request received. We'll confirm at {}.",
                    form.email.trim()
                )),
                ..Default::default()
            })
        }
        Err(e) => {
            error!(error = %e, "Booking delivery failed");
            Ok(InquiryOutcome::submit_error(BOOKING_FAILED_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_url_requires_https() {
        assert!(webhook_url(Some("https://hooks.example.com/contact"), "X").is_ok());
        assert!(webhook_url(Some("http://hooks.example.com/contact"), "X").is_err());
        let err = webhook_url(None, "CONTACT_WEBHOOK_URL").unwrap_err();
        assert!(err.to_string().contains("CONTACT_WEBHOOK_URL"));
    }
}
