//! HTTP delivery for form submissions.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use super::BaseWebhookClient;

#[derive(Debug, Clone, Default)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl BaseWebhookClient for WebhookClient {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .context("Webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Webhook rejected submission");
            bail!("Webhook returned {}", status);
        }

        debug!(status = %status, "Webhook accepted submission");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_posts_payload_as_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/webhook/contact-form")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"user_name": "Asha"})))
            .with_status(200)
            .create_async()
            .await;

        let client = WebhookClient::new();
        let url = format!("{}/webhook/contact-form", server.url());
        client.post_json(&url, &json!({"user_name": "Asha"})).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/webhook/contact-form")
            .with_status(500)
            .with_body("workflow inactive")
            .create_async()
            .await;

        let client = WebhookClient::new();
        let url = format!("{}/webhook/contact-form", server.url());
        let err = client.post_json(&url, &json!({})).await.unwrap_err();

        assert!(err.to_string().contains("500"));
    }
}
