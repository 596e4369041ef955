//! Test harness wiring the schema to in-memory mocks.
//!
//! No network or containers: the identity platform, profile store and
//! webhooks are mocks from `server_core::kernel::test_dependencies`, so each
//! test gets a fresh, isolated world.

use std::sync::Arc;

use server_core::config::SiteSettings;
use server_core::domains::admissions::CollegeDirectory;
use server_core::domains::auth::{CredentialStore, JwtService};
use server_core::domains::content::ContentCatalog;
use server_core::kernel::test_dependencies::{
    MockAccount, MockIdentityProvider, MockProfileStore, MockWebhookClient,
};
use server_core::kernel::ServerDeps;
use server_core::server::graphql::GraphQLContext;
use server_core::server::middleware::AuthUser;
use test_context::AsyncTestContext;

use super::GraphQLClient;

pub const STUDENT_UID: &str = "student-1";
pub const STUDENT_EMAIL: &str = "student@example.com";
pub const STUDENT_PASSWORD: &str = "secret123";
pub const CONTACT_WEBHOOK: &str = "https://hooks.example.com/contact";
pub const BOOKING_WEBHOOK: &str = "https://hooks.example.com/booking";
pub const WEB_APP_URL: &str = "http://localhost:3000";

/// Test harness holding the mocks behind ServerDeps.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.graphql();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub identity: Arc<MockIdentityProvider>,
    pub profiles: Arc<MockProfileStore>,
    pub webhooks: Arc<MockWebhookClient>,
    pub deps: Arc<ServerDeps>,
}

#[async_trait::async_trait]
impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        let identity = MockIdentityProvider::new().with_account(MockAccount::email_password(
            STUDENT_UID,
            STUDENT_EMAIL,
            STUDENT_PASSWORD,
        ));
        Self::with_mocks(identity, MockProfileStore::new(), MockWebhookClient::new())
    }

    async fn teardown(self) {
        // Mocks are dropped with the harness
    }
}

impl TestHarness {
    /// Harness with the default site settings and both webhooks configured
    pub fn with_mocks(
        identity: MockIdentityProvider,
        profiles: MockProfileStore,
        webhooks: MockWebhookClient,
    ) -> Self {
        let site = SiteSettings {
            contact_webhook_url: Some(CONTACT_WEBHOOK.to_string()),
            booking_webhook_url: Some(BOOKING_WEBHOOK.to_string()),
            ..SiteSettings::default()
        };
        Self::with_site(identity, profiles, webhooks, site)
    }

    pub fn with_site(
        identity: MockIdentityProvider,
        profiles: MockProfileStore,
        webhooks: MockWebhookClient,
        site: SiteSettings,
    ) -> Self {
        // Initialize tracing subscriber to respect RUST_LOG environment variable.
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let identity = Arc::new(identity);
        let profiles = Arc::new(profiles);
        let webhooks = Arc::new(webhooks);

        let deps = Arc::new(ServerDeps::new(
            identity.clone(),
            profiles.clone(),
            webhooks.clone(),
            Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string())),
            Arc::new(CredentialStore::new()),
            Arc::new(ContentCatalog::load().expect("bundled content is valid")),
            Arc::new(CollegeDirectory::load().expect("bundled colleges are valid")),
            site,
            WEB_APP_URL.to_string(),
        ));

        Self {
            identity,
            profiles,
            webhooks,
            deps,
        }
    }

    /// Anonymous GraphQL client.
    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::with_context(GraphQLContext::new(self.deps.clone(), None))
    }

    /// GraphQL client acting as the holder of `token`, decoded the way the
    /// JWT middleware does.
    pub fn graphql_as(&self, token: &str) -> GraphQLClient {
        GraphQLClient::with_context(GraphQLContext::new(
            self.deps.clone(),
            Some(self.auth_user(token)),
        ))
    }

    pub fn auth_user(&self, token: &str) -> AuthUser {
        let claims = self
            .deps
            .jwt_service
            .verify_token(token)
            .expect("token issued by this harness");

        AuthUser {
            uid: claims.uid,
            session_id: claims.sid,
            email: claims.email,
            phone_number: claims.phone_number,
            email_verified: claims.email_verified,
        }
    }

    /// Sign the seeded student in and return their JWT
    pub async fn sign_in_student(&self) -> String {
        let result = self
            .graphql()
            .query(&format!(
                r#"mutation {{ signInWithEmail(email: "{}", password: "{}") {{ token }} }}"#,
                STUDENT_EMAIL, STUDENT_PASSWORD
            ))
            .await;

        result["signInWithEmail"]["token"]
            .as_str()
            .expect("sign-in returns a token")
            .to_string()
    }
}
