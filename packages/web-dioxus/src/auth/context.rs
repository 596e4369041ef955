//! Signed-in user shared through the component tree

use dioxus::prelude::*;

use super::server_fns::{get_current_user, logout};
use crate::types::AuthUser;

/// Who is signed in, as far as the browser knows
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: Signal<Option<AuthUser>>,
    /// True until the session has been asked once
    pub loading: Signal<bool>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Re-read the session user from the server
    pub async fn refresh(&mut self) {
        let user = get_current_user().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load session user: {}", e);
            None
        });
        self.user.set(user);
        self.loading.set(false);
    }

    /// Adopt a user a server function just signed in
    pub fn signed_in(&mut self, user: AuthUser) {
        self.user.set(Some(user));
        self.loading.set(false);
    }

    /// Revoke the API session and forget the user locally either way
    pub async fn sign_out(&mut self) {
        if let Err(e) = logout().await {
            tracing::warn!("Logout failed: {}", e);
        }
        self.user.set(None);
    }
}

#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth = use_context_provider(|| AuthContext {
        user: Signal::new(None),
        loading: Signal::new(true),
    });

    use_effect(move || {
        spawn(async move {
            auth.refresh().await;
        });
    });

    children
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
