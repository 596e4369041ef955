//! Session bookkeeping shared by every sign-in flow.

use anyhow::Result;
use identity::{AccountInfo, AuthTokens};
use tracing::{debug, error, info, warn};

use crate::common::AuthError;
use crate::domains::auth::jwt::TokenSubject;
use crate::domains::auth::models::UserProfile;
use crate::domains::auth::session::{PlatformCredential, SessionId};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// Merge the profile document. Failures are logged and swallowed.
pub async fn record_profile(profile: &UserProfile, id_token: &str, deps: &ServerDeps) {
    match deps
        .profiles
        .save_profile(&profile.uid, &profile.to_fields(), id_token)
        .await
    {
        Ok(()) => debug!(uid = %profile.uid, "Profile saved"),
        Err(e) => error!(uid = %profile.uid, error = %e, "Failed to save user profile"),
    }
}

/// Sign a JWT for an account bound to a session
pub fn issue_token(account: &AccountInfo, session_id: &str, deps: &ServerDeps) -> Result<String> {
    deps.jwt_service.create_token(&TokenSubject {
        uid: account.local_id.clone(),
        session_id: session_id.to_string(),
        email: account.email.clone(),
        phone_number: account.phone_number.clone(),
        email_verified: account.email_verified,
    })
}

/// Keep the platform credential, write the profile and issue a JWT
pub async fn establish_session(
    tokens: &AuthTokens,
    account: &AccountInfo,
    profile: UserProfile,
    deps: &ServerDeps,
) -> Result<String> {
    let credential = PlatformCredential::from_tokens(&account.local_id, tokens);
    let session_id = deps.credentials.create(credential).await;

    record_profile(&profile, &tokens.id_token, deps).await;

    let token = issue_token(account, &session_id, deps)?;
    info!(uid = %account.local_id, "Session established");
    Ok(token)
}

/// Platform credential of the caller's session, refreshed when close to
/// expiry
pub async fn current_credential(
    user: &AuthUser,
    deps: &ServerDeps,
) -> Result<PlatformCredential, AuthError> {
    let credential = deps
        .credentials
        .get(&user.session_id)
        .await
        .ok_or(AuthError::InvalidToken)?;

    if credential.uid != user.uid {
        warn!(uid = %user.uid, "Session does not belong to token subject");
        return Err(AuthError::InvalidToken);
    }

    if !credential.needs_refresh() {
        return Ok(credential);
    }

    match deps.identity.refresh(&credential.refresh_token).await {
        Ok(tokens) => {
            let refreshed = credential.with_tokens(&tokens);
            deps.credentials
                .replace(&user.session_id, refreshed.clone())
                .await;
            debug!(uid = %user.uid, "Platform credential refreshed");
            Ok(refreshed)
        }
        Err(e) => {
            warn!(uid = %user.uid, error = %e, "Credential refresh failed, dropping session");
            deps.credentials.delete(&user.session_id).await;
            Err(AuthError::InvalidToken)
        }
    }
}

/// Store newer platform tokens for the caller's session
pub async fn store_tokens(
    user: &AuthUser,
    credential: &PlatformCredential,
    tokens: &AuthTokens,
    deps: &ServerDeps,
) -> Result<SessionId, AuthError> {
    let updated = credential.with_tokens(tokens);
    if !deps.credentials.replace(&user.session_id, updated).await {
        return Err(AuthError::InvalidToken);
    }
    Ok(user.session_id.clone())
}

/// Account behind the caller's session
pub async fn viewer(user: &AuthUser, deps: &ServerDeps) -> Result<AccountInfo> {
    let credential = current_credential(user, deps).await?;
    deps.identity.lookup(&credential.id_token).await
}

pub async fn sign_out(user: &AuthUser, deps: &ServerDeps) -> Result<bool> {
    deps.credentials.delete(&user.session_id).await;
    info!(uid = %user.uid, "Signed out");
    Ok(true)
}
