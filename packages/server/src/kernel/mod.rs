//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod google_oauth;
pub mod test_dependencies;
pub mod traits;
pub mod webhook_client;

pub use deps::{DocumentProfileStore, IdentityAdapter, ServerDeps, PROFILE_COLLECTION};
pub use google_oauth::GoogleOAuthClient;
pub use traits::*;
pub use webhook_client::WebhookClient;
