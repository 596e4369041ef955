//! Phone second factor: enrollment and sign-in completion

use anyhow::{bail, Result};
use identity::AccountInfo;
use tracing::info;

use super::phone::INVALID_PHONE_MESSAGE;
use super::session::{current_credential, establish_session, store_tokens};
use crate::common::{is_e164_phone, non_blank};
use crate::domains::auth::models::{hash_identifier, AuthOutcome, NextStep, UserProfile};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

pub async fn start_mfa_enrollment(
    user: &AuthUser,
    phone_number: String,
    recaptcha_token: Option<String>,
    deps: &ServerDeps,
) -> Result<String> {
    let phone_number = phone_number.trim().to_string();
    if !is_e164_phone(&phone_number) {
        bail!(INVALID_PHONE_MESSAGE);
    }

    let credential = current_credential(user, deps).await?;
    let verification_id = deps
        .identity
        .start_mfa_enrollment(
            &credential.id_token,
            &phone_number,
            recaptcha_token.as_deref(),
        )
        .await?;

    info!(
        uid = %user.uid,
        phone_hash = %hash_identifier(&phone_number),
        "Second factor enrollment started"
    );
    Ok(verification_id)
}

/// Enroll the verified phone. Returns the account with its factors.
pub async fn complete_mfa_enrollment(
    user: &AuthUser,
    verification_id: String,
    code: String,
    display_name: Option<String>,
    deps: &ServerDeps,
) -> Result<AccountInfo> {
    if code.trim().is_empty() {
        bail!("Please enter the verification code.");
    }

    let credential = current_credential(user, deps).await?;
    let display_name = non_blank(display_name.as_deref());
    let tokens = deps
        .identity
        .finalize_mfa_enrollment(
            &credential.id_token,
            &verification_id,
            code.trim(),
            display_name.as_deref(),
        )
        .await?;
    store_tokens(user, &credential, &tokens, deps).await?;

    info!(uid = %user.uid, "Second factor enrolled");
    deps.identity.lookup(&tokens.id_token).await
}

pub async fn start_mfa_sign_in(
    pending_credential: String,
    enrollment_id: String,
    recaptcha_token: Option<String>,
    deps: &ServerDeps,
) -> Result<String> {
    deps.identity
        .start_mfa_sign_in(
            &pending_credential,
            &enrollment_id,
            recaptcha_token.as_deref(),
        )
        .await
}

/// Verify the second factor and issue the session the first factor did not
pub async fn finalize_mfa_sign_in(
    pending_credential: String,
    verification_id: String,
    code: String,
    deps: &ServerDeps,
) -> Result<AuthOutcome> {
    if code.trim().is_empty() {
        bail!("Please enter the verification code.");
    }

    let tokens = deps
        .identity
        .finalize_mfa_sign_in(&pending_credential, &verification_id, code.trim())
        .await?;
    let account = deps.identity.lookup(&tokens.id_token).await?;
    let token = establish_session(&tokens, &account, UserProfile::from_account(&account), deps)
        .await?;

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step: NextStep::Done,
        message: None,
    })
}
