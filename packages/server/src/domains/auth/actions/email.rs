//! Email and password sign-up / sign-in

use anyhow::{bail, Result};
use identity::SignInResponse;
use tracing::{error, info};

use super::session::{establish_session, record_profile};
use crate::common::{is_e164_phone, is_valid_email, non_blank};
use crate::domains::auth::data::SignUpInput;
use crate::domains::auth::models::{hash_identifier, AuthOutcome, NextStep, UserProfile};
use crate::kernel::ServerDeps;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const SIGN_UP_MESSAGE: &str =
    "Account created. Please check your email to verify your address.";
pub const UNVERIFIED_EMAIL_MESSAGE: &str =
    "Please verify your email address. A verification mail was sent when you signed up.";

pub async fn sign_up_with_email(input: SignUpInput, deps: &ServerDeps) -> Result<AuthOutcome> {
    if !input.accepted_tos {
        bail!("You must accept the Terms of Service.");
    }
    let email = input.email.trim().to_string();
    if !is_valid_email(&email) {
        bail!("Please enter a valid email address.");
    }
    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!("Password should be at least 6 characters.");
    }
    let phone_number = non_blank(input.phone_number.as_deref());
    if let Some(phone) = &phone_number {
        if !is_e164_phone(phone) {
            bail!("Please enter a phone number with country code (e.g., +919876543210).");
        }
    }

    let tokens = deps.identity.sign_up(&email, &input.password).await?;
    info!(email_hash = %hash_identifier(&email), "Account created");

    if let Some(name) = non_blank(Some(input.display_name.as_str())) {
        deps.identity
            .update_profile(&tokens.id_token, Some(&name), None)
            .await?;
    }

    if let Err(e) = deps.identity.send_email_verification(&tokens.id_token).await {
        error!(error = %e, "Failed to send verification email");
    }

    let account = deps.identity.lookup(&tokens.id_token).await?;
    let profile = UserProfile::from_account(&account).with_sign_up(input.accepted_tos);
    let token = establish_session(&tokens, &account, profile, deps).await?;

    let next_step = if phone_number.is_some() {
        NextStep::LinkPhone
    } else {
        NextStep::Done
    };

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step,
        message: Some(SIGN_UP_MESSAGE.to_string()),
    })
}

/// Password sign-in. Accounts with an unverified email get their profile
/// refreshed but no session.
pub async fn sign_in_with_email(
    email: String,
    password: String,
    deps: &ServerDeps,
) -> Result<AuthOutcome> {
    let email = email.trim().to_string();
    if email.is_empty() || password.is_empty() {
        bail!("Please enter your email and password.");
    }

    let signed_in = match deps.identity.sign_in_with_password(&email, &password).await? {
        SignInResponse::MfaRequired(challenge) => {
            info!(email_hash = %hash_identifier(&email), "Second factor required");
            return Ok(AuthOutcome::MfaRequired(challenge));
        }
        SignInResponse::Complete(signed_in) => signed_in,
    };

    let account = deps.identity.lookup(&signed_in.tokens.id_token).await?;
    let profile = UserProfile::from_account(&account);
    if !account.email_verified {
        // The password was right, so the visit still counts
        record_profile(&profile, &signed_in.tokens.id_token, deps).await;
        info!(uid = %account.local_id, "Sign-in refused, email not verified");
        bail!(UNVERIFIED_EMAIL_MESSAGE);
    }

    let token = establish_session(&signed_in.tokens, &account, profile, deps).await?;

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step: NextStep::Done,
        message: None,
    })
}
