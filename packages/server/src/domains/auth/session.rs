use chrono::{DateTime, Duration, Utc};
use identity::AuthTokens;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session id (random UUID), carried in the JWT `sid` claim
pub type SessionId = String;

/// Sessions are dropped this long after sign-in
const SESSION_TTL_HOURS: i64 = 24;

/// Credentials this close to expiry are refreshed before use
const REFRESH_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when the platform reports one we cannot represent
const FALLBACK_TOKEN_SECS: i64 = 3600;

/// When tokens issued at `now` and valid for `expires_in` seconds run out
fn token_expiry(now: DateTime<Utc>, expires_in: u64) -> DateTime<Utc> {
    let lifetime = i64::try_from(expires_in)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime));

    lifetime.unwrap_or_else(|| now + Duration::seconds(FALLBACK_TOKEN_SECS))
}

/// Identity platform credential held for a signed-in session
#[derive(Clone, Debug)]
pub struct PlatformCredential {
    pub uid: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PlatformCredential {
    pub fn from_tokens(uid: &str, tokens: &AuthTokens) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.to_string(),
            id_token: tokens.id_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: token_expiry(now, tokens.expires_in),
            created_at: now,
        }
    }

    /// Same session with newer tokens
    pub fn with_tokens(&self, tokens: &AuthTokens) -> Self {
        Self {
            id_token: tokens.id_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: token_expiry(Utc::now(), tokens.expires_in),
            ..self.clone()
        }
    }

    pub fn needs_refresh(&self) -> bool {
        Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS) >= self.expires_at
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at).num_hours() >= SESSION_TTL_HOURS
    }
}

/// In-memory credential store
///
/// Sessions expire after 24 hours
pub struct CredentialStore {
    sessions: Arc<RwLock<HashMap<SessionId, PlatformCredential>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a credential under a new session id
    pub async fn create(&self, credential: PlatformCredential) -> SessionId {
        let session_id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), credential);
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Option<PlatformCredential> {
        let sessions = self.sessions.read().await;
        let credential = sessions.get(session_id)?;

        if credential.is_expired(Utc::now()) {
            return None;
        }

        Some(credential.clone())
    }

    /// Replace the credential of an existing session. Returns false if the
    /// session is gone.
    pub async fn replace(&self, session_id: &str, credential: PlatformCredential) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(existing) => {
                *existing = credential;
                true
            }
            None => false,
        }
    }

    /// Delete session (sign out)
    pub async fn delete(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
    }

    /// Clean up expired sessions (run periodically)
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();

        sessions.retain(|_, credential| !credential.is_expired(now));

        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expires_in: u64) -> AuthTokens {
        AuthTokens {
            id_token: "id-token".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_in,
            local_id: Some("uid-1".to_string()),
        }
    }

    #[test]
    fn test_unrepresentable_lifetime_uses_fallback() {
        let credential = PlatformCredential::from_tokens("uid-1", &tokens(100_000_000_000_000_000));
        let lifetime = credential.expires_at - credential.created_at;
        assert_eq!(lifetime, Duration::seconds(FALLBACK_TOKEN_SECS));

        let refreshed = credential.with_tokens(&tokens(u64::MAX));
        assert!(refreshed.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_session_creation() {
        let store = CredentialStore::new();
        let credential = PlatformCredential::from_tokens("uid-1", &tokens(3600));

        let session_id = store.create(credential).await;
        assert!(!session_id.is_empty());

        let retrieved = store.get(&session_id).await.unwrap();
        assert_eq!(retrieved.uid, "uid-1");
        assert_eq!(retrieved.id_token, "id-token");
    }

    #[tokio::test]
    async fn test_session_expiration() {
        let store = CredentialStore::new();
        let mut credential = PlatformCredential::from_tokens("uid-1", &tokens(3600));
        credential.created_at = Utc::now() - Duration::hours(25);

        let session_id = store.create(credential).await;
        assert!(store.get(&session_id).await.is_none(), "Expired session should return None");

        assert_eq!(store.cleanup_expired().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_replace_keeps_session_id() {
        let store = CredentialStore::new();
        let credential = PlatformCredential::from_tokens("uid-1", &tokens(3600));
        let session_id = store.create(credential.clone()).await;

        let mut newer = tokens(3600);
        newer.id_token = "id-token-2".to_string();
        assert!(store.replace(&session_id, credential.with_tokens(&newer)).await);

        let retrieved = store.get(&session_id).await.unwrap();
        assert_eq!(retrieved.id_token, "id-token-2");
        assert_eq!(retrieved.created_at, credential.created_at);
    }

    #[tokio::test]
    async fn test_replace_missing_session() {
        let store = CredentialStore::new();
        let credential = PlatformCredential::from_tokens("uid-1", &tokens(3600));
        assert!(!store.replace("missing", credential).await);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = CredentialStore::new();
        let session_id = store
            .create(PlatformCredential::from_tokens("uid-1", &tokens(3600)))
            .await;

        store.delete(&session_id).await;
        assert!(store.get(&session_id).await.is_none());
    }

    #[test]
    fn test_needs_refresh_near_expiry() {
        assert!(PlatformCredential::from_tokens("uid-1", &tokens(30)).needs_refresh());
        assert!(!PlatformCredential::from_tokens("uid-1", &tokens(3600)).needs_refresh());
    }
}
