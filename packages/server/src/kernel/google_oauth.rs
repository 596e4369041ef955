//! Google authorization-code flow for the redirect sign-in routes.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

use crate::config::GoogleOAuthConfig;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// How long a consent redirect may take before its state is rejected
const STATE_TTL_MINUTES: i64 = 10;

#[derive(Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    auth_url: String,
    token_url: String,
    client: Client,
    pending_states: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            config,
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            client: Client::new(),
            pending_states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Override the Google endpoints (tests)
    pub fn with_endpoints(self, auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            ..self
        }
    }

    /// Consent screen URL carrying a fresh single-use state
    pub async fn authorization_url(&self) -> Result<String> {
        let state = Uuid::new_v4().to_string();
        {
            let mut states = self.pending_states.write().await;
            let now = Utc::now();
            states.retain(|_, issued| now.signed_duration_since(*issued) < state_ttl());
            states.insert(state.clone(), now);
        }

        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("prompt", "select_account"),
                ("state", state.as_str()),
            ],
        )
        .context("Invalid Google authorization URL")?;

        Ok(url.into())
    }

    /// Consume a state issued by `authorization_url`. Unknown or stale
    /// states return false.
    pub async fn take_state(&self, state: &str) -> bool {
        let mut states = self.pending_states.write().await;
        match states.remove(state) {
            Some(issued) => Utc::now().signed_duration_since(issued) < state_ttl(),
            None => false,
        }
    }

    /// Exchange an authorization code for the Google ID token
    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .context("Google token request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Google token endpoint returned {}: {}", status, body);
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .context("Failed to parse Google token response")?;

        tokens
            .id_token
            .context("Google token response did not include an id_token")
    }
}

fn state_ttl() -> Duration {
    Duration::minutes(STATE_TTL_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn test_config() -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_url: "http://localhost:8080/auth/google/callback".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authorization_url_carries_single_use_state() {
        let client = GoogleOAuthClient::new(test_config());
        let url = Url::parse(&client.authorization_url().await.unwrap()).unwrap();

        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["response_type"], "code");

        let state = params["state"].clone();
        assert!(client.take_state(&state).await);
        assert!(!client.take_state(&state).await, "state must be single use");
    }

    #[tokio::test]
    async fn test_unknown_state_rejected() {
        let client = GoogleOAuthClient::new(test_config());
        assert!(!client.take_state("forged").await);
    }

    #[tokio::test]
    async fn test_exchange_code_returns_id_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
            ]))
            .with_status(200)
            .with_body(json!({"access_token": "at", "id_token": "google-id-token"}).to_string())
            .create_async()
            .await;

        let client = GoogleOAuthClient::new(test_config())
            .with_endpoints(format!("{}/auth", server.url()), format!("{}/token", server.url()));

        let id_token = client.exchange_code("auth-code").await.unwrap();
        mock.assert_async().await;
        assert_eq!(id_token, "google-id-token");
    }

    #[tokio::test]
    async fn test_exchange_code_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(json!({"error": "invalid_grant"}).to_string())
            .create_async()
            .await;

        let client = GoogleOAuthClient::new(test_config())
            .with_endpoints(format!("{}/auth", server.url()), format!("{}/token", server.url()));

        assert!(client.exchange_code("stale").await.is_err());
    }
}
