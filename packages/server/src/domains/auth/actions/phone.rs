//! SMS one-time passcode sign-in and phone linking

use anyhow::{bail, Result};
use tracing::info;

use super::session::{current_credential, establish_session, issue_token, record_profile, store_tokens};
use crate::common::is_e164_phone;
use crate::domains::auth::models::{hash_identifier, AuthOutcome, NextStep, UserProfile};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

pub const INVALID_PHONE_MESSAGE: &str =
    "Please enter a phone number with country code (e.g., +919876543210).";

fn require_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        bail!("Please enter the verification code.");
    }
    Ok(())
}

/// Send a sign-in code. Returns the verification id.
pub async fn send_phone_otp(
    phone_number: String,
    recaptcha_token: Option<String>,
    deps: &ServerDeps,
) -> Result<String> {
    let phone_number = phone_number.trim().to_string();
    if !is_e164_phone(&phone_number) {
        bail!(INVALID_PHONE_MESSAGE);
    }

    let verification_id = deps
        .identity
        .send_verification_code(&phone_number, recaptcha_token.as_deref())
        .await?;

    info!(phone_hash = %hash_identifier(&phone_number), "Verification code sent");
    Ok(verification_id)
}

/// Sign in (or create the account) with the SMS code
pub async fn confirm_phone_otp(
    verification_id: String,
    code: String,
    deps: &ServerDeps,
) -> Result<AuthOutcome> {
    require_code(&code)?;

    let signed_in = deps
        .identity
        .sign_in_with_phone(&verification_id, code.trim())
        .await?;
    let account = deps.identity.lookup(&signed_in.tokens.id_token).await?;
    let token = establish_session(
        &signed_in.tokens,
        &account,
        UserProfile::from_account(&account),
        deps,
    )
    .await?;

    let message = if signed_in.is_new_user {
        "Phone verified and account created."
    } else {
        "Phone verified."
    };

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step: NextStep::Done,
        message: Some(message.to_string()),
    })
}

/// Send a code for linking a phone to the signed-in account
pub async fn send_phone_otp_for_linking(
    user: &AuthUser,
    phone_number: String,
    recaptcha_token: Option<String>,
    deps: &ServerDeps,
) -> Result<String> {
    current_credential(user, deps).await?;
    send_phone_otp(phone_number, recaptcha_token, deps).await
}

/// Link the verified phone to the signed-in account and re-issue the JWT
/// with the phone claim.
pub async fn confirm_phone_link(
    user: &AuthUser,
    verification_id: String,
    code: String,
    deps: &ServerDeps,
) -> Result<AuthOutcome> {
    require_code(&code)?;

    let credential = current_credential(user, deps).await?;
    let linked = deps
        .identity
        .link_phone(&credential.id_token, &verification_id, code.trim())
        .await?;
    let session_id = store_tokens(user, &credential, &linked.tokens, deps).await?;

    let account = deps.identity.lookup(&linked.tokens.id_token).await?;
    record_profile(
        &UserProfile::from_account(&account),
        &linked.tokens.id_token,
        deps,
    )
    .await;

    let token = issue_token(&account, &session_id, deps)?;
    info!(uid = %account.local_id, "Phone linked");

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step: NextStep::Done,
        message: Some("Phone linked successfully.".to_string()),
    })
}
