use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub identity_api_key: String,
    pub identity_project_id: String,
    /// Endpoint overrides for the identity platform (emulator, tests)
    pub identity_base_url: Option<String>,
    pub identity_token_url: Option<String>,
    pub identity_documents_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub allowed_origins: Vec<String>,
    pub web_app_url: String,
    pub google_oauth: Option<GoogleOAuthConfig>,
    pub site: SiteSettings,
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

/// Public contact details and form delivery targets
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub contact_webhook_url: Option<String>,
    pub booking_webhook_url: Option<String>,
    pub whatsapp_number: String,
    pub whatsapp_message: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            contact_webhook_url: None,
            booking_webhook_url: None,
            whatsapp_number: "919392423955".to_string(),
            whatsapp_message: "Hi TechMatch! I would like to inquire about your services."
                .to_string(),
            contact_email: "techmatch2k25@gmail.com".to_string(),
            contact_phone: "+91 63033 19981".to_string(),
            contact_address:
                "#227, #228, 4th Floor, Skanda Mall, Ballari Chowrasta, Kurnool - 518003"
                    .to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = SiteSettings::default();
        let contact_webhook_url = env::var("CONTACT_WEBHOOK_URL").ok();
        let booking_webhook_url = env::var("BOOKING_WEBHOOK_URL")
            .ok()
            .or_else(|| contact_webhook_url.clone());

        let site = SiteSettings {
            contact_webhook_url,
            booking_webhook_url,
            whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
            whatsapp_message: env::var("WHATSAPP_MESSAGE").unwrap_or(defaults.whatsapp_message),
            contact_email: env::var("CONTACT_EMAIL").unwrap_or(defaults.contact_email),
            contact_phone: env::var("CONTACT_PHONE").unwrap_or(defaults.contact_phone),
            contact_address: env::var("CONTACT_ADDRESS").unwrap_or(defaults.contact_address),
        };

        let web_app_url =
            env::var("WEB_APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let google_oauth = match (
            env::var("GOOGLE_CLIENT_ID").ok(),
            env::var("GOOGLE_CLIENT_SECRET").ok(),
        ) {
            (Some(client_id), Some(client_secret)) => Some(GoogleOAuthConfig {
                client_id,
                client_secret,
                redirect_url: env::var("GOOGLE_REDIRECT_URL").unwrap_or_else(|_| {
                    "http://localhost:8080/auth/google/callback".to_string()
                }),
            }),
            _ => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            identity_api_key: env::var("IDENTITY_API_KEY")
                .context("IDENTITY_API_KEY must be set")?,
            identity_project_id: env::var("IDENTITY_PROJECT_ID")
                .context("IDENTITY_PROJECT_ID must be set")?,
            identity_base_url: env::var("IDENTITY_BASE_URL").ok(),
            identity_token_url: env::var("IDENTITY_TOKEN_URL").ok(),
            identity_documents_url: env::var("IDENTITY_DOCUMENTS_URL").ok(),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "techmatch".to_string()),
            allowed_origins: parse_origins(env::var("ALLOWED_ORIGINS").ok().as_deref()),
            web_app_url,
            google_oauth,
            site,
        })
    }
}

/// Split a comma-separated origin list. Empty means any origin.
fn parse_origins(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
