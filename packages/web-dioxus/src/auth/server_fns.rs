//! Server functions for authentication
//!
//! These run on the server and own the session: the API's JWT is stored in
//! the `tower-sessions` session and never reaches the browser.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{ActionResult, AuthPayload, AuthStep, AuthUser, Verification, Viewer};
#[cfg(feature = "server")]
use crate::graphql::*;

/// Text to show for a failed server function
pub fn error_text(e: &ServerFnError) -> String {
    match e {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Email
// ============================================================================

#[server]
pub async fn sign_up_with_email(
    display_name: String,
    email: String,
    password: String,
    phone_number: Option<String>,
    accepted_tos: bool,
) -> Result<AuthStep, ServerFnError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Input {
        display_name: String,
        email: String,
        password: String,
        phone_number: Option<String>,
        accepted_tos: bool,
    }

    #[derive(Serialize)]
    struct Variables {
        input: Input,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        sign_up_with_email: AuthPayload,
    }

    let input = Input {
        display_name,
        email,
        password,
        phone_number: phone_number.filter(|p| !p.trim().is_empty()),
        accepted_tos,
    };

    let result: Response = server_client()
        .mutate(SIGN_UP_WITH_EMAIL, Some(Variables { input }))
        .await
        .map_err(api_error)?;

    establish(result.sign_up_with_email).await
}

#[server]
pub async fn sign_in_with_email(email: String, password: String) -> Result<AuthStep, ServerFnError> {
    #[derive(Serialize)]
    struct Variables {
        email: String,
        password: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        sign_in_with_email: AuthPayload,
    }

    let result: Response = server_client()
        .mutate(SIGN_IN_WITH_EMAIL, Some(Variables { email, password }))
        .await
        .map_err(api_error)?;

    establish(result.sign_in_with_email).await
}

/// Finish a Google redirect sign-in with the token the API handed back
#[server]
pub async fn complete_google_sign_in(token: String) -> Result<AuthUser, ServerFnError> {
    let user = user_from_token(&token, None)?;
    set_session(&token, &user).await?;
    Ok(user)
}

/// Where the Google button sends the browser
#[server]
pub async fn google_start_url() -> Result<String, ServerFnError> {
    Ok(format!("{}/auth/google/start", api_public_base()))
}

// ============================================================================
// Phone
// ============================================================================

#[cfg(feature = "server")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneVariables {
    phone_number: String,
    recaptcha_token: Option<String>,
}

#[cfg(feature = "server")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeVariables {
    verification_id: String,
    code: String,
}

/// Site key for the invisible widget; unset disables captcha
#[server]
pub async fn recaptcha_site_key() -> Result<Option<String>, ServerFnError> {
    Ok(std::env::var("RECAPTCHA_SITE_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty()))
}

#[server]
pub async fn send_phone_otp(
    phone_number: String,
    recaptcha_token: Option<String>,
) -> Result<Verification, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        send_phone_otp: Verification,
    }

    let variables = PhoneVariables {
        phone_number,
        recaptcha_token,
    };
    let result: Response = server_client()
        .mutate(SEND_PHONE_OTP, Some(variables))
        .await
        .map_err(api_error)?;

    Ok(result.send_phone_otp)
}

#[server]
pub async fn confirm_phone_otp(verification_id: String, code: String) -> Result<AuthStep, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        confirm_phone_otp: AuthPayload,
    }

    let variables = CodeVariables { verification_id, code };
    let result: Response = server_client()
        .mutate(CONFIRM_PHONE_OTP, Some(variables))
        .await
        .map_err(api_error)?;

    establish(result.confirm_phone_otp).await
}

#[server]
pub async fn send_phone_link_otp(
    phone_number: String,
    recaptcha_token: Option<String>,
) -> Result<Verification, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        send_phone_otp_for_linking: Verification,
    }

    let variables = PhoneVariables {
        phone_number,
        recaptcha_token,
    };
    let result: Response = authed_client()
        .await?
        .mutate(SEND_PHONE_OTP_FOR_LINKING, Some(variables))
        .await
        .map_err(api_error)?;

    Ok(result.send_phone_otp_for_linking)
}

#[server]
pub async fn confirm_phone_link(verification_id: String, code: String) -> Result<AuthStep, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        confirm_phone_link: AuthPayload,
    }

    let variables = CodeVariables { verification_id, code };
    let result: Response = authed_client()
        .await?
        .mutate(CONFIRM_PHONE_LINK, Some(variables))
        .await
        .map_err(api_error)?;

    // The API reissues the JWT so the phone claim is current
    establish(result.confirm_phone_link).await
}

// ============================================================================
// Multi-factor
// ============================================================================

#[server]
pub async fn start_mfa_sign_in(
    pending_credential: String,
    enrollment_id: String,
    recaptcha_token: Option<String>,
) -> Result<Verification, ServerFnError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Variables {
        pending_credential: String,
        enrollment_id: String,
        recaptcha_token: Option<String>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        start_mfa_sign_in: Verification,
    }

    let variables = Variables {
        pending_credential,
        enrollment_id,
        recaptcha_token,
    };
    let result: Response = server_client()
        .mutate(START_MFA_SIGN_IN, Some(variables))
        .await
        .map_err(api_error)?;

    Ok(result.start_mfa_sign_in)
}

#[server]
pub async fn finalize_mfa_sign_in(
    pending_credential: String,
    verification_id: String,
    code: String,
) -> Result<AuthStep, ServerFnError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Variables {
        pending_credential: String,
        verification_id: String,
        code: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        finalize_mfa_sign_in: AuthPayload,
    }

    let variables = Variables {
        pending_credential,
        verification_id,
        code,
    };
    let result: Response = server_client()
        .mutate(FINALIZE_MFA_SIGN_IN, Some(variables))
        .await
        .map_err(api_error)?;

    establish(result.finalize_mfa_sign_in).await
}

#[server]
pub async fn start_mfa_enrollment(
    phone_number: String,
    recaptcha_token: Option<String>,
) -> Result<Verification, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        start_mfa_enrollment: Verification,
    }

    let variables = PhoneVariables {
        phone_number,
        recaptcha_token,
    };
    let result: Response = authed_client()
        .await?
        .mutate(START_MFA_ENROLLMENT, Some(variables))
        .await
        .map_err(api_error)?;

    Ok(result.start_mfa_enrollment)
}

#[server]
pub async fn complete_mfa_enrollment(
    verification_id: String,
    code: String,
    display_name: Option<String>,
) -> Result<Viewer, ServerFnError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Variables {
        verification_id: String,
        code: String,
        display_name: Option<String>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        complete_mfa_enrollment: Viewer,
    }

    let variables = Variables {
        verification_id,
        code,
        display_name: display_name.filter(|n| !n.trim().is_empty()),
    };
    let result: Response = authed_client()
        .await?
        .mutate(COMPLETE_MFA_ENROLLMENT, Some(variables))
        .await
        .map_err(api_error)?;

    Ok(result.complete_mfa_enrollment)
}

/// Fresh account details for the security page
#[server]
pub async fn fetch_viewer() -> Result<Option<Viewer>, ServerFnError> {
    #[derive(Deserialize)]
    struct Response {
        viewer: Option<Viewer>,
    }

    let Some(token) = session_token().await? else {
        return Ok(None);
    };

    let result: Response = server_client()
        .with_token(token)
        .query(GET_VIEWER, None::<()>)
        .await
        .map_err(api_error)?;

    Ok(result.viewer)
}

// ============================================================================
// Recovery
// ============================================================================

#[server]
pub async fn send_password_reset(email: String) -> Result<ActionResult, ServerFnError> {
    #[derive(Serialize)]
    struct Variables {
        email: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        send_password_reset: ActionResult,
    }

    let result: Response = server_client()
        .mutate(SEND_PASSWORD_RESET, Some(Variables { email }))
        .await
        .map_err(api_error)?;

    Ok(result.send_password_reset)
}

#[server]
pub async fn resend_email_verification() -> Result<bool, ServerFnError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        resend_email_verification: bool,
    }

    let result: Response = authed_client()
        .await?
        .mutate(RESEND_EMAIL_VERIFICATION, None::<()>)
        .await
        .map_err(api_error)?;

    Ok(result.resend_email_verification)
}

// ============================================================================
// Session
// ============================================================================

/// Get the current authenticated user from the session
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    get_session_user().await
}

/// Logout - revoke the API session, then clear ours
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Some(token) = session_token().await? {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            #[allow(dead_code)]
            sign_out: bool,
        }

        let revoked: Result<Response, _> = server_client()
            .with_token(token)
            .mutate(SIGN_OUT, None::<()>)
            .await;
        if let Err(e) = revoked {
            tracing::warn!(error = %e, "API sign-out failed; clearing local session anyway");
        }
    }

    clear_session().await
}

// ============================================================================
// Token decoding (shared with tests)
// ============================================================================

#[cfg(any(feature = "server", test))]
#[derive(Deserialize)]
struct JwtClaims {
    uid: String,
    email: Option<String>,
    phone_number: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

#[cfg(any(feature = "server", test))]
/// Build the session user from the JWT payload, taking the display name from
/// the account details when the API sent them
fn user_from_token(token: &str, viewer: Option<&Viewer>) -> Result<AuthUser, ServerFnError> {
    // The API verifies the signature on every call; here we only read claims
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ServerFnError::new("Invalid JWT format"));
    }

    use base64::Engine;
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| ServerFnError::new(format!("Failed to decode JWT: {}", e)))?;

    let claims: JwtClaims = serde_json::from_slice(&payload)
        .map_err(|e| ServerFnError::new(format!("Failed to parse JWT claims: {}", e)))?;

    Ok(AuthUser {
        uid: claims.uid,
        email: claims.email,
        phone_number: claims.phone_number,
        email_verified: claims.email_verified,
        display_name: viewer.and_then(|v| v.display_name.clone()),
    })
}

#[cfg(any(feature = "server", test))]
/// Split an API payload into the session part and the page part
fn split_payload(payload: AuthPayload) -> Result<(Option<(String, AuthUser)>, AuthStep), ServerFnError> {
    let session = match payload.token {
        Some(token) => {
            let user = user_from_token(&token, payload.user.as_ref())?;
            Some((token, user))
        }
        None => None,
    };

    let step = AuthStep {
        next_step: payload.next_step,
        message: payload.message,
        user: session.as_ref().map(|(_, user)| user.clone()),
        mfa: payload.mfa,
    };

    Ok((session, step))
}

// ============================================================================
// Server-only helpers (not exposed as server functions)
// ============================================================================

#[cfg(feature = "server")]
fn api_error(e: ClientError) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

#[cfg(feature = "server")]
async fn establish(payload: AuthPayload) -> Result<AuthStep, ServerFnError> {
    let (session, step) = split_payload(payload)?;
    if let Some((token, user)) = session {
        set_session(&token, &user).await?;
    }
    Ok(step)
}

#[cfg(feature = "server")]
async fn authed_client() -> Result<GraphQLClient, ServerFnError> {
    let token = session_token()
        .await?
        .ok_or_else(|| ServerFnError::new("Please sign in first."))?;
    Ok(server_client().with_token(token))
}

#[cfg(feature = "server")]
async fn current_session() -> Result<tower_sessions::Session, ServerFnError> {
    dioxus::fullstack::extract()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to get session: {}", e)))
}

#[cfg(feature = "server")]
async fn set_session(token: &str, user: &AuthUser) -> Result<(), ServerFnError> {
    let session = current_session().await?;

    session
        .insert("token", token)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to set session: {}", e)))?;
    session
        .insert("user", user)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to set session: {}", e)))?;

    Ok(())
}

#[cfg(feature = "server")]
async fn session_token() -> Result<Option<String>, ServerFnError> {
    current_session()
        .await?
        .get("token")
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to get token from session: {}", e)))
}

#[cfg(feature = "server")]
async fn get_session_user() -> Result<Option<AuthUser>, ServerFnError> {
    current_session()
        .await?
        .get("user")
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to get user from session: {}", e)))
}

#[cfg(feature = "server")]
async fn clear_session() -> Result<(), ServerFnError> {
    current_session()
        .await?
        .flush()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to clear session: {}", e)))
}
