//! Google redirect sign-in.
//!
//! GET /auth/google/start     -> Google consent screen
//! GET /auth/google/callback  -> {WEB_APP_URL}/auth/complete?token=..&next=..
//!
//! Failures land on the same page with `?error=<code>`.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use identity::IdpCredential;
use serde::Deserialize;
use tracing::{error, warn};
use url::Url;

use crate::domains::auth::actions::sign_in_with_google;
use crate::domains::auth::models::AuthOutcome;
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Redirect into the web app's completion page
fn complete_redirect(web_app_url: &str, params: &[(&str, &str)]) -> Response {
    let base = format!("{}/auth/complete", web_app_url.trim_end_matches('/'));
    match Url::parse_with_params(&base, params) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => {
            error!(error = %e, "Invalid WEB_APP_URL");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid web app URL").into_response()
        }
    }
}

fn error_redirect(web_app_url: &str, code: &str) -> Response {
    complete_redirect(web_app_url, &[("error", code)])
}

pub async fn google_start(Extension(state): Extension<AxumAppState>) -> Response {
    let web_app_url = &state.server_deps.web_app_url;
    let Some(google) = state.google_oauth.as_ref() else {
        return error_redirect(web_app_url, "oauth_not_configured");
    };

    match google.authorization_url().await {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build Google authorization URL");
            error_redirect(web_app_url, "oauth_not_configured")
        }
    }
}

pub async fn google_callback(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> Response {
    let deps = &state.server_deps;
    let web_app_url = deps.web_app_url.as_str();

    if let Some(err) = query.error {
        warn!(error = %err, "Google consent was not granted");
        return error_redirect(web_app_url, &err);
    }

    let Some(google) = state.google_oauth.as_ref() else {
        return error_redirect(web_app_url, "oauth_not_configured");
    };

    let state_ok = match query.state.as_deref() {
        Some(s) => google.take_state(s).await,
        None => false,
    };
    if !state_ok {
        warn!("Google callback with unknown or expired state");
        return error_redirect(web_app_url, "invalid_state");
    }

    let Some(code) = query.code else {
        return error_redirect(web_app_url, "missing_code");
    };

    let id_token = match google.exchange_code(&code).await {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Google code exchange failed");
            return error_redirect(web_app_url, "token_exchange_failed");
        }
    };

    match sign_in_with_google(IdpCredential::GoogleIdToken(id_token), deps).await {
        Ok(AuthOutcome::SignedIn {
            token, next_step, ..
        }) => complete_redirect(web_app_url, &[("token", &token), ("next", next_step.as_str())]),
        Ok(AuthOutcome::MfaRequired(challenge)) => {
            let enrollment_id = challenge
                .factors
                .first()
                .map(|f| f.enrollment_id.as_str())
                .unwrap_or_default();
            complete_redirect(
                web_app_url,
                &[
                    ("next", "MFA_REQUIRED"),
                    ("pending", challenge.pending_credential.as_str()),
                    ("enrollment", enrollment_id),
                ],
            )
        }
        Err(e) => {
            error!(error = %e, "Google sign-in failed");
            error_redirect(web_app_url, "sign_in_failed")
        }
    }
}
