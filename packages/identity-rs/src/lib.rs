// Client for the hosted identity platform: account REST API, secure token
// endpoint and the document store used for user profiles.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

mod accounts;
pub mod documents;
mod error;
mod mfa;
pub mod models;

pub use error::{IdentityError, PlatformErrorCode};
pub use models::*;

pub const DEFAULT_ACCOUNTS_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_DOCUMENTS_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, Clone)]
pub struct IdentityOptions {
    pub api_key: String,
    pub project_id: String,
    pub accounts_url: String,
    pub token_url: String,
    pub documents_url: String,
}

impl IdentityOptions {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            documents_url: DEFAULT_DOCUMENTS_URL.to_string(),
        }
    }

    /// Point every endpoint at one host (emulator, mock server).
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            accounts_url: base_url.clone(),
            token_url: base_url.clone(),
            documents_url: base_url,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentityService {
    options: IdentityOptions,
    client: Client,
}

impl IdentityService {
    pub fn new(options: IdentityOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    pub fn options(&self) -> &IdentityOptions {
        &self.options
    }

    /// POST a JSON body to `{accounts_url}/{version}/{method}?key=...`.
    async fn post_accounts<B, R>(&self, version: &str, method: &str, body: &B) -> Result<R, IdentityError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!(
            "{}/{}/{}",
            self.options.accounts_url.trim_end_matches('/'),
            version,
            method
        );
        debug!(method, "identity platform request");

        let response = self
            .client
            .post(url)
            .query(&[("key", self.options.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        decode_response(response).await
    }
}

/// Decode a 2xx JSON body or map the platform error envelope.
pub(crate) async fn decode_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R, IdentityError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(IdentityError::from_error_body(status.as_u16(), &body));
    }

    response
        .json::<R>()
        .await
        .map_err(|e| IdentityError::UnexpectedResponse(e.to_string()))
}
