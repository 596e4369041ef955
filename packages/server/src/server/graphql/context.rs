use std::sync::Arc;

use crate::common::AuthError;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared dependencies plus the caller decoded by the JWT middleware
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self { deps, auth_user }
    }

    /// Caller of a resolver that needs a session
    pub fn require_auth(&self) -> Result<&AuthUser, AuthError> {
        self.auth_user
            .as_ref()
            .ok_or(AuthError::AuthenticationRequired)
    }
}
