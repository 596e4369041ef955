//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions. All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use identity::{AccountInfo, AuthTokens, IdentityService, IdpCredential, SignInResponse, SignedIn};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::SiteSettings;
use crate::domains::admissions::CollegeDirectory;
use crate::domains::auth::{CredentialStore, JwtService};
use crate::domains::content::ContentCatalog;
use crate::kernel::{BaseIdentityProvider, BaseProfileStore, BaseWebhookClient};

/// Collection holding one profile document per account uid
pub const PROFILE_COLLECTION: &str = "users";

// =============================================================================
// IdentityService Adapter (implements BaseIdentityProvider trait)
// =============================================================================

/// Wrapper around IdentityService that implements BaseIdentityProvider trait
pub struct IdentityAdapter(pub Arc<IdentityService>);

impl IdentityAdapter {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseIdentityProvider for IdentityAdapter {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens> {
        Ok(self.0.sign_up(email, password).await?)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignInResponse> {
        Ok(self.0.sign_in_with_password(email, password).await?)
    }

    async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
        request_uri: &str,
    ) -> Result<SignInResponse> {
        Ok(self.0.sign_in_with_idp(credential, request_uri).await?)
    }

    async fn send_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String> {
        Ok(self
            .0
            .send_verification_code(phone_number, recaptcha_token)
            .await?)
    }

    async fn sign_in_with_phone(&self, verification_id: &str, code: &str) -> Result<SignedIn> {
        Ok(self.0.sign_in_with_phone(verification_id, code).await?)
    }

    async fn link_phone(
        &self,
        id_token: &str,
        verification_id: &str,
        code: &str,
    ) -> Result<SignedIn> {
        Ok(self.0.link_phone(id_token, verification_id, code).await?)
    }

    async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<()> {
        Ok(self
            .0
            .update_profile(id_token, display_name, photo_url)
            .await?)
    }

    async fn send_email_verification(&self, id_token: &str) -> Result<()> {
        Ok(self.0.send_email_verification(id_token).await?)
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        Ok(self.0.send_password_reset(email).await?)
    }

    async fn lookup(&self, id_token: &str) -> Result<AccountInfo> {
        Ok(self.0.lookup(id_token).await?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        Ok(self.0.refresh(refresh_token).await?)
    }

    async fn start_mfa_enrollment(
        &self,
        id_token: &str,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String> {
        Ok(self
            .0
            .start_mfa_enrollment(id_token, phone_number, recaptcha_token)
            .await?)
    }

    async fn finalize_mfa_enrollment(
        &self,
        id_token: &str,
        verification_id: &str,
        code: &str,
        display_name: Option<&str>,
    ) -> Result<AuthTokens> {
        Ok(self
            .0
            .finalize_mfa_enrollment(id_token, verification_id, code, display_name)
            .await?)
    }

    async fn start_mfa_sign_in(
        &self,
        pending_credential: &str,
        enrollment_id: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String> {
        Ok(self
            .0
            .start_mfa_sign_in(pending_credential, enrollment_id, recaptcha_token)
            .await?)
    }

    async fn finalize_mfa_sign_in(
        &self,
        pending_credential: &str,
        verification_id: &str,
        code: &str,
    ) -> Result<AuthTokens> {
        Ok(self
            .0
            .finalize_mfa_sign_in(pending_credential, verification_id, code)
            .await?)
    }
}

// =============================================================================
// Document store Adapter (implements BaseProfileStore trait)
// =============================================================================

/// Profiles kept in the identity platform's document store
pub struct DocumentProfileStore(pub Arc<IdentityService>);

impl DocumentProfileStore {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseProfileStore for DocumentProfileStore {
    async fn save_profile(
        &self,
        uid: &str,
        fields: &Map<String, Value>,
        id_token: &str,
    ) -> Result<()> {
        Ok(self
            .0
            .set_document(PROFILE_COLLECTION, uid, fields, id_token)
            .await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub profiles: Arc<dyn BaseProfileStore>,
    pub webhooks: Arc<dyn BaseWebhookClient>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// Platform credentials keyed by session id
    pub credentials: Arc<CredentialStore>,
    pub content: Arc<ContentCatalog>,
    pub colleges: Arc<CollegeDirectory>,
    pub site: SiteSettings,
    /// Front-end origin, also the request URI for federated sign-in
    pub web_app_url: String,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Arc<dyn BaseIdentityProvider>,
        profiles: Arc<dyn BaseProfileStore>,
        webhooks: Arc<dyn BaseWebhookClient>,
        jwt_service: Arc<JwtService>,
        credentials: Arc<CredentialStore>,
        content: Arc<ContentCatalog>,
        colleges: Arc<CollegeDirectory>,
        site: SiteSettings,
        web_app_url: String,
    ) -> Self {
        Self {
            identity,
            profiles,
            webhooks,
            jwt_service,
            credentials,
            content,
            colleges,
            site,
            web_app_url,
        }
    }
}
