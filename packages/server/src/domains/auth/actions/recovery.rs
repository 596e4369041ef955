use anyhow::{bail, Result};
use tracing::info;

use super::session::current_credential;
use crate::common::is_valid_email;
use crate::domains::auth::models::hash_identifier;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

pub const PASSWORD_RESET_MESSAGE: &str =
    "Password reset email sent. Check your inbox (and spam).";

pub async fn send_password_reset(email: String, deps: &ServerDeps) -> Result<String> {
    let email = email.trim().to_string();
    if !is_valid_email(&email) {
        bail!("Please enter a valid email address.");
    }

    deps.identity.send_password_reset(&email).await?;
    info!(email_hash = %hash_identifier(&email), "Password reset email sent");

    Ok(PASSWORD_RESET_MESSAGE.to_string())
}

pub async fn resend_email_verification(user: &AuthUser, deps: &ServerDeps) -> Result<bool> {
    let credential = current_credential(user, deps).await?;
    deps.identity
        .send_email_verification(&credential.id_token)
        .await?;
    Ok(true)
}
