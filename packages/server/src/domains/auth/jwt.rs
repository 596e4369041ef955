use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued token stays valid
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Token body. `sub` and `uid` are both the account uid; `sid` points at the
/// platform credential held server-side.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub uid: String,
    pub sid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub jti: String,
}

/// Who a token is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub uid: String,
    pub session_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
}

/// HS256 tokens bound to one issuer
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer,
        }
    }

    pub fn create_token(&self, subject: &TokenSubject) -> Result<String> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: subject.uid.clone(),
            uid: subject.uid.clone(),
            sid: subject.session_id.clone(),
            email: subject.email.clone(),
            phone_number: subject.phone_number.clone(),
            email_verified: subject.email_verified,
            exp: (issued_at + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Claims of a token signed by us, for our issuer, and not yet expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> TokenSubject {
        TokenSubject {
            uid: "uid-1".to_string(),
            session_id: "sid-1".to_string(),
            email: Some("student@example.com".to_string()),
            phone_number: None,
            email_verified: true,
        }
    }

    fn service(secret: &str, issuer: &str) -> JwtService {
        JwtService::new(secret, issuer.to_string())
    }

    #[test]
    fn claims_survive_a_round_trip() {
        let jwt = service("secret", "techmatch");
        let claims = jwt.verify_token(&jwt.create_token(&subject()).unwrap()).unwrap();

        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.uid, "uid-1");
        assert_eq!(claims.sid, "sid-1");
        assert_eq!(claims.email.as_deref(), Some("student@example.com"));
        assert!(claims.phone_number.is_none());
        assert!(claims.email_verified);
        assert_eq!(claims.iss, "techmatch");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(service("secret", "techmatch").verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn secret_and_issuer_must_both_match() {
        let token = service("secret", "techmatch").create_token(&subject()).unwrap();

        assert!(service("other-secret", "techmatch").verify_token(&token).is_err());
        assert!(service("secret", "someone-else").verify_token(&token).is_err());
    }

    #[test]
    fn tokens_last_a_day() {
        let jwt = service("secret", "techmatch");
        let claims = jwt.verify_token(&jwt.create_token(&subject()).unwrap()).unwrap();

        let remaining = claims.exp - Utc::now().timestamp();
        assert!(remaining > (TOKEN_LIFETIME_HOURS - 1) * 3600);
        assert!(remaining <= TOKEN_LIFETIME_HOURS * 3600);
    }

    #[test]
    fn every_token_has_its_own_id() {
        let jwt = service("secret", "techmatch");
        let first = jwt.verify_token(&jwt.create_token(&subject()).unwrap()).unwrap();
        let second = jwt.verify_token(&jwt.create_token(&subject()).unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }
}
