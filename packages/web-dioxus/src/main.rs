//! TechMatch - Dioxus Fullstack Web Application
//!
//! Server-rendered site that talks to the TechMatch GraphQL API. The API
//! token for a signed-in visitor stays in the server-side session.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web,server
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web,server
//! ```

#![allow(non_snake_case)]

mod app;
mod auth;
mod components;
mod graphql;
mod hexfield;
mod pages;
mod routes;
mod state;
mod types;

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use dioxus::prelude::*;
    use tower_sessions::{MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("web=info,info")),
        )
        .init();

    // Holds the API token and the signed-in user per visitor
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(std::env::var("SESSION_SECURE").is_ok_and(|v| v == "true"));

    let address = dioxus::cli_config::fullstack_address_or_localhost();
    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), app::App)
        .layer(session_layer);

    tracing::info!("TechMatch web listening on http://{}", address);
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(app::App);
}
