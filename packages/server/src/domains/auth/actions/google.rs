use anyhow::Result;
use identity::{IdpCredential, SignInResponse};
use tracing::info;

use super::session::establish_session;
use crate::domains::auth::models::{AuthOutcome, NextStep, UserProfile};
use crate::kernel::ServerDeps;

pub const LINK_PHONE_MESSAGE: &str =
    "Google sign-in successful. Please link your phone number for account recovery.";

/// Google sign-in from either the client-side token or the redirect flow.
/// Accounts without a phone are asked to link one.
pub async fn sign_in_with_google(
    credential: IdpCredential,
    deps: &ServerDeps,
) -> Result<AuthOutcome> {
    let signed_in = match deps
        .identity
        .sign_in_with_idp(&credential, &deps.web_app_url)
        .await?
    {
        SignInResponse::MfaRequired(challenge) => {
            info!("Second factor required for Google sign-in");
            return Ok(AuthOutcome::MfaRequired(challenge));
        }
        SignInResponse::Complete(signed_in) => signed_in,
    };

    let account = deps.identity.lookup(&signed_in.tokens.id_token).await?;
    let token = establish_session(
        &signed_in.tokens,
        &account,
        UserProfile::from_account(&account),
        deps,
    )
    .await?;

    if signed_in.is_new_user {
        info!(uid = %account.local_id, "New account from Google sign-in");
    }

    let (next_step, message) = if account.phone_number.is_none() {
        (NextStep::LinkPhone, Some(LINK_PHONE_MESSAGE.to_string()))
    } else {
        (NextStep::Done, None)
    };

    Ok(AuthOutcome::SignedIn {
        token,
        account,
        next_step,
        message,
    })
}
