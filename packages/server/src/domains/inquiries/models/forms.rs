use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::common::is_valid_email;

/// Shortest accepted message body
pub const MIN_MESSAGE_LENGTH: usize = 10;

pub const DEFAULT_SESSION_DURATION: &str = "30 minutes";

/// Validation problem on one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldError {
    pub field: String,
    pub message: String,
}

impl FormFieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn check_email(email: &str, errors: &mut Vec<FormFieldError>) {
    if email.trim().is_empty() {
        errors.push(FormFieldError::new("email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FormFieldError::new("email", "Invalid email format"));
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Vec<FormFieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FormFieldError::new("name", "Name is required"));
        }
        check_email(&self.email, &mut errors);
        if self.subject.trim().is_empty() {
            errors.push(FormFieldError::new("subject", "Subject is required"));
        }
        if self.message.trim().is_empty() {
            errors.push(FormFieldError::new("message", "Message is required"));
        } else if self.message.chars().count() < MIN_MESSAGE_LENGTH {
            errors.push(FormFieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        }

        errors
    }

    /// Webhook body
    pub fn payload(&self, submitted_at: DateTime<Utc>) -> Value {
        json!({
            "user_name": self.name,
            "user_email": self.email,
            "user_phone": self.phone.clone().unwrap_or_default(),
            "subject": self.subject,
            "message": self.message,
            "submitted_at": submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "source": "techmatch-website-contact",
        })
    }

    /// mailto: link carrying the form, for when the webhook is down
    pub fn mailto(&self, to: &str) -> String {
        let subject = if self.subject.is_empty() {
            "Contact from TechMatch Website"
        } else {
            &self.subject
        };

        let or_missing = |value: &str| {
            if value.is_empty() {
                "(not provided)".to_string()
            } else {
                value.to_string()
            }
        };
        let message = if self.message.is_empty() {
            "(no message)".to_string()
        } else {
            self.message.clone()
        };

        let body = [
            format!("Name: {}", or_missing(&self.name)),
            format!("Email: {}", or_missing(&self.email)),
            format!("Phone: {}", or_missing(self.phone.as_deref().unwrap_or_default())),
            String::new(),
            "Message:".to_string(),
            message,
        ]
        .join("\n");

        format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(subject),
            urlencoding::encode(&body)
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub session_duration: String,
    pub preferred_date_time: Option<String>,
    pub message: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: None,
            session_duration: DEFAULT_SESSION_DURATION.to_string(),
            preferred_date_time: None,
            message: String::new(),
        }
    }
}

impl BookingForm {
    pub fn validate(&self) -> Vec<FormFieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FormFieldError::new("name", "Name is required"));
        }
        check_email(&self.email, &mut errors);
        if self.message.trim().is_empty() || self.message.chars().count() < MIN_MESSAGE_LENGTH {
            errors.push(FormFieldError::new(
                "message",
                "Add a brief project summary (10+ characters)",
            ));
        }

        errors
    }

    /// Webhook body
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone.clone().unwrap_or_default(),
            "sessionDuration": self.session_duration,
            "preferredDateTime": self.preferred_date_time.clone().unwrap_or_default(),
            "message": self.message,
        })
    }
}

/// wa.me chat link with a prefilled message
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contact() -> ContactForm {
        ContactForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            subject: "Admissions".to_string(),
            message: "Need help shortlisting colleges".to_string(),
        }
    }

    fn fields(errors: &[FormFieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_contact_has_no_errors() {
        assert!(contact().validate().is_empty());
    }

    #[test]
    fn test_empty_contact_reports_each_field() {
        let errors = ContactForm::default().validate();
        assert_eq!(fields(&errors), vec!["name", "email", "subject", "message"]);
        assert_eq!(errors[1].message, "Email is required");
    }

    #[test]
    fn test_contact_email_and_message_rules() {
        let form = ContactForm {
            email: "asha@example".to_string(),
            message: "Hi there".to_string(),
            ..contact()
        };
        let errors = form.validate();
        assert_eq!(errors[0], FormFieldError::new("email", "Invalid email format"));
        assert_eq!(
            errors[1],
            FormFieldError::new("message", "Message must be at least 10 characters")
        );
    }

    #[test]
    fn test_booking_message_rule() {
        let form = BookingForm {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            message: "short".to_string(),
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(fields(&errors), vec!["message"]);
        assert_eq!(errors[0].message, "Add a brief project summary (10+ characters)");
    }

    #[test]
    fn test_contact_payload() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
        let payload = contact().payload(at);

        assert_eq!(payload["user_name"], "Asha");
        assert_eq!(payload["user_phone"], "");
        assert_eq!(payload["submitted_at"], "2025-03-01T10:30:00.000Z");
        assert_eq!(payload["source"], "techmatch-website-contact");
    }

    #[test]
    fn test_booking_payload_defaults() {
        let form = BookingForm {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: Some("+919876543210".to_string()),
            message: "Career planning for my son".to_string(),
            ..Default::default()
        };
        let payload = form.payload();

        assert_eq!(payload["sessionDuration"], "30 minutes");
        assert_eq!(payload["preferredDateTime"], "");
        assert_eq!(payload["phone"], "+919876543210");
    }

    #[test]
    fn test_mailto_placeholders() {
        let form = ContactForm {
            name: "Asha".to_string(),
            ..Default::default()
        };
        let link = form.mailto("techmatch2k25@gmail.com");

        assert!(link.starts_with(
            "mailto:techmatch2k25@gmail.com?subject=Contact%20from%20TechMatch%20Website&body="
        ));
        let body = urlencoding::decode(link.split("&body=").nth(1).unwrap()).unwrap();
        assert_eq!(
            body,
            "Name: Asha\nEmail: (not provided)\nPhone: (not provided)\n\nMessage:\n(no message)"
        );
    }

    #[test]
    fn test_whatsapp_url() {
        assert_eq!(
            whatsapp_url("+91 93924 23955", "Hi TechMatch!"),
            "https://wa.me/919392423955?text=Hi%20TechMatch%21"
        );
    }
}
