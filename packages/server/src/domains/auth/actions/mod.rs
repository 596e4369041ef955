// Auth actions - entry points called by the GraphQL edges and REST routes

pub mod email;
pub mod google;
pub mod mfa;
pub mod phone;
pub mod recovery;
pub mod session;

pub use email::{sign_in_with_email, sign_up_with_email};
pub use google::sign_in_with_google;
pub use mfa::{complete_mfa_enrollment, finalize_mfa_sign_in, start_mfa_enrollment, start_mfa_sign_in};
pub use phone::{confirm_phone_link, confirm_phone_otp, send_phone_otp, send_phone_otp_for_linking};
pub use recovery::{resend_email_verification, send_password_reset};
pub use session::{current_credential, establish_session, sign_out, viewer};
