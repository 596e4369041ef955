// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Auth flows, profile shaping and form handling live in domain actions that
// call through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityProvider)

use anyhow::Result;
use async_trait::async_trait;
use identity::{AccountInfo, AuthTokens, IdpCredential, SignInResponse, SignedIn};
use serde_json::{Map, Value};

// =============================================================================
// Identity Provider Trait (Infrastructure - hosted accounts, phone, MFA)
// =============================================================================

/// Hosted identity platform operations.
///
/// Errors carry the platform's user-facing message as their display text, so
/// callers can surface `e.to_string()` directly.
#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignInResponse>;

    async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
        request_uri: &str,
    ) -> Result<SignInResponse>;

    /// Send an SMS code, returning the verification id
    async fn send_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String>;

    async fn sign_in_with_phone(&self, verification_id: &str, code: &str) -> Result<SignedIn>;

    async fn link_phone(&self, id_token: &str, verification_id: &str, code: &str)
        -> Result<SignedIn>;

    async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<()>;

    async fn send_email_verification(&self, id_token: &str) -> Result<()>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;

    async fn lookup(&self, id_token: &str) -> Result<AccountInfo>;

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens>;

    async fn start_mfa_enrollment(
        &self,
        id_token: &str,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String>;

    async fn finalize_mfa_enrollment(
        &self,
        id_token: &str,
        verification_id: &str,
        code: &str,
        display_name: Option<&str>,
    ) -> Result<AuthTokens>;

    async fn start_mfa_sign_in(
        &self,
        pending_credential: &str,
        enrollment_id: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String>;

    async fn finalize_mfa_sign_in(
        &self,
        pending_credential: &str,
        verification_id: &str,
        code: &str,
    ) -> Result<AuthTokens>;
}

// =============================================================================
// Profile Store Trait (Infrastructure - user profile documents)
// =============================================================================

#[async_trait]
pub trait BaseProfileStore: Send + Sync {
    /// Merge `fields` into the profile for `uid`
    async fn save_profile(&self, uid: &str, fields: &Map<String, Value>, id_token: &str)
        -> Result<()>;
}

// =============================================================================
// Webhook Trait (Infrastructure - form delivery)
// =============================================================================

#[async_trait]
pub trait BaseWebhookClient: Send + Sync {
    /// POST a JSON payload. Non-2xx responses are errors.
    async fn post_json(&self, url: &str, payload: &Value) -> Result<()>;
}
