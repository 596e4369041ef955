use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    active_sessions: usize,
    services: usize,
    colleges: usize,
    google_sign_in: bool,
}

/// Health check endpoint
///
/// The server holds no external connections, so it is healthy whenever it
/// answers; the counts help spot a bad content deploy.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.server_deps;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            active_sessions: deps.credentials.len().await,
            services: deps.content.services().len(),
            colleges: deps.colleges.all().len(),
            google_sign_in: state.google_oauth.is_some(),
        }),
    )
}
