pub mod submit;

pub use submit::{submit_booking, submit_contact, InquiryOutcome};
