use juniper::{GraphQLInputObject, GraphQLObject};

use crate::common::non_blank;
use crate::domains::inquiries::actions::InquiryOutcome;
use crate::domains::inquiries::models::{
    BookingForm, ContactForm, FormFieldError, DEFAULT_SESSION_DURATION,
};

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl From<ContactFormInput> for ContactForm {
    fn from(input: ContactFormInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: non_blank(input.phone.as_deref()),
            subject: input.subject,
            message: input.message,
        }
    }
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct BookingFormInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Defaults to "30 minutes"
    pub session_duration: Option<String>,
    pub preferred_date_time: Option<String>,
    pub message: String,
}

impl From<BookingFormInput> for BookingForm {
    fn from(input: BookingFormInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: non_blank(input.phone.as_deref()),
            session_duration: non_blank(input.session_duration.as_deref())
                .unwrap_or_else(|| DEFAULT_SESSION_DURATION.to_string()),
            preferred_date_time: non_blank(input.preferred_date_time.as_deref()),
            message: input.message,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct FieldErrorData {
    /// Form field name, or "submit" for delivery problems
    pub field: String,
    pub message: String,
}

impl From<FormFieldError> for FieldErrorData {
    fn from(error: FormFieldError) -> Self {
        Self {
            field: error.field,
            message: error.message,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct InquiryResult {
    pub success: bool,
    pub errors: Vec<FieldErrorData>,
    /// Prefilled email link offered when delivery failed
    pub fallback_mailto: Option<String>,
    pub message: Option<String>,
}

impl From<InquiryOutcome> for InquiryResult {
    fn from(outcome: InquiryOutcome) -> Self {
        Self {
            success: outcome.success,
            errors: outcome.errors.into_iter().map(Into::into).collect(),
            fallback_mailto: outcome.fallback_mailto,
            message: outcome.message,
        }
    }
}
