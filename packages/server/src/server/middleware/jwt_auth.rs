use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domains::auth::{Claims, JwtService};

/// Authenticated caller, decoded from our JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    /// Key of the platform credential in the CredentialStore
    pub session_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.uid,
            session_id: claims.sid,
            email: claims.email,
            phone_number: claims.phone_number,
            email_verified: claims.email_verified,
        }
    }
}

/// Attaches an `AuthUser` when the request carries a valid token.
///
/// Anonymous and badly-signed requests pass through untouched; resolvers that
/// need a caller ask the GraphQL context for one.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match caller(request.headers(), &jwt_service) {
        Some(user) => {
            debug!(uid = %user.uid, "Authenticated request");
            request.extensions_mut().insert(user);
        }
        None => debug!("Anonymous request"),
    }

    next.run(request).await
}

/// `Authorization: Bearer <jwt>`; a bare token is accepted too
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

fn caller(headers: &HeaderMap, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    jwt_service.verify_token(token).ok().map(AuthUser::from)
}
