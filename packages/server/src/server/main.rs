// Main entry point for the TechMatch API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use identity::{IdentityOptions, IdentityService};
use server_core::domains::admissions::CollegeDirectory;
use server_core::domains::auth::{CredentialStore, JwtService};
use server_core::domains::content::ContentCatalog;
use server_core::kernel::{
    DocumentProfileStore, GoogleOAuthClient, IdentityAdapter, ServerDeps, WebhookClient,
};
use server_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired sessions are swept from the credential store
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,identity=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting TechMatch API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Identity platform, with optional endpoint overrides for the emulator
    let mut options = IdentityOptions::new(&config.identity_api_key, &config.identity_project_id);
    if let Some(base_url) = &config.identity_base_url {
        options = options.with_base_url(base_url);
    }
    if let Some(token_url) = &config.identity_token_url {
        options.token_url = token_url.clone();
    }
    if let Some(documents_url) = &config.identity_documents_url {
        options.documents_url = documents_url.clone();
    }
    let identity = Arc::new(IdentityService::new(options));

    // Bundled content; a malformed file stops startup
    let content = ContentCatalog::load().context("Failed to load site content")?;
    let colleges = CollegeDirectory::load().context("Failed to load college directory")?;
    tracing::info!(
        services = content.services().len(),
        colleges = colleges.all().len(),
        "Content loaded"
    );

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let credentials = Arc::new(CredentialStore::new());

    let server_deps = Arc::new(ServerDeps::new(
        Arc::new(IdentityAdapter::new(identity.clone())),
        Arc::new(DocumentProfileStore::new(identity)),
        Arc::new(WebhookClient::new()),
        jwt_service,
        credentials.clone(),
        Arc::new(content),
        Arc::new(colleges),
        config.site.clone(),
        config.web_app_url.clone(),
    ));

    let google_oauth = match config.google_oauth.clone() {
        Some(google) => Some(Arc::new(GoogleOAuthClient::new(google))),
        None => {
            tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set, Google redirect sign-in disabled");
            None
        }
    };

    if config.site.contact_webhook_url.is_none() {
        tracing::warn!("CONTACT_WEBHOOK_URL not set, contact submissions will be refused");
    }

    // Sweep expired sessions in the background
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = credentials.cleanup_expired().await;
            if removed > 0 {
                tracing::info!(removed, "Expired sessions removed");
            }
        }
    });

    let app = build_app(server_deps, google_oauth, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
