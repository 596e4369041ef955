use serde::{Deserialize, Serialize};

use crate::IdentityError;

/// Default token lifetime when the platform omits `expiresIn`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Platform credential returned by every successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub id_token: String,
    pub refresh_token: String,
    /// Seconds until `id_token` expires
    pub expires_in: u64,
    /// Account uid. Absent from MFA finalize responses.
    pub local_id: Option<String>,
}

/// A completed sign-in with the account fields the platform echoes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub tokens: AuthTokens,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    pub is_new_user: bool,
}

/// Second factor enrolled on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaFactor {
    #[serde(rename = "mfaEnrollmentId")]
    pub enrollment_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Masked phone number, e.g. `+*******1234`
    #[serde(default)]
    pub phone_info: Option<String>,
    #[serde(default)]
    pub enrolled_at: Option<String>,
}

/// Returned instead of tokens when the account has a second factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaChallenge {
    pub pending_credential: String,
    pub factors: Vec<MfaFactor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInResponse {
    Complete(SignedIn),
    MfaRequired(MfaChallenge),
}

/// Linked sign-in provider (password, google.com, phone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub provider_id: String,
    #[serde(default, rename = "rawId")]
    pub uid: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Account record from `accounts:lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, rename = "providerUserInfo")]
    pub providers: Vec<ProviderInfo>,
    #[serde(default, rename = "mfaInfo")]
    pub mfa: Vec<MfaFactor>,
}

/// Identity provider credential for `accounts:signInWithIdp`.
#[derive(Debug, Clone)]
pub enum IdpCredential {
    GoogleIdToken(String),
    GoogleAccessToken(String),
}

impl IdpCredential {
    pub fn provider_id(&self) -> &'static str {
        match self {
            Self::GoogleIdToken(_) | Self::GoogleAccessToken(_) => "google.com",
        }
    }

    /// Form-encoded `postBody` expected by the platform.
    pub fn post_body(&self) -> String {
        match self {
            Self::GoogleIdToken(token) => {
                format!("id_token={}&providerId={}", token, self.provider_id())
            }
            Self::GoogleAccessToken(token) => {
                format!("access_token={}&providerId={}", token, self.provider_id())
            }
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSignInResponse {
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub local_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_new_user: Option<bool>,
    #[serde(default)]
    pub mfa_pending_credential: Option<String>,
    #[serde(default)]
    pub mfa_info: Vec<MfaFactor>,
}

impl RawSignInResponse {
    pub(crate) fn into_tokens(self) -> Result<AuthTokens, IdentityError> {
        let id_token = self
            .id_token
            .ok_or_else(|| IdentityError::UnexpectedResponse("missing idToken".to_string()))?;
        let refresh_token = self
            .refresh_token
            .ok_or_else(|| IdentityError::UnexpectedResponse("missing refreshToken".to_string()))?;

        Ok(AuthTokens {
            id_token,
            refresh_token,
            expires_in: parse_expires_in(self.expires_in.as_deref()),
            local_id: self.local_id,
        })
    }

    pub(crate) fn into_signed_in(self) -> Result<SignedIn, IdentityError> {
        let email = self.email.clone();
        let display_name = self.display_name.clone();
        let photo_url = self.photo_url.clone();
        let phone_number = self.phone_number.clone();
        let is_new_user = self.is_new_user.unwrap_or(false);

        Ok(SignedIn {
            tokens: self.into_tokens()?,
            email,
            display_name,
            photo_url,
            phone_number,
            is_new_user,
        })
    }

    pub(crate) fn into_sign_in(self) -> Result<SignInResponse, IdentityError> {
        if let Some(pending_credential) = self.mfa_pending_credential {
            return Ok(SignInResponse::MfaRequired(MfaChallenge {
                pending_credential,
                factors: self.mfa_info,
            }));
        }

        self.into_signed_in().map(SignInResponse::Complete)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionInfoResponse {
    pub session_info: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MfaEnrollmentStartResponse {
    pub phone_session_info: SessionInfoResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MfaSignInStartResponse {
    pub phone_response_info: SessionInfoResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub users: Vec<AccountInfo>,
}

/// Token endpoint response (snake_case, unlike the accounts API).
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<RefreshResponse> for AuthTokens {
    fn from(response: RefreshResponse) -> Self {
        AuthTokens {
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_in: parse_expires_in(Some(&response.expires_in)),
            local_id: response.user_id,
        }
    }
}

/// Platform ID tokens never outlive a day; anything longer is treated as garbage
const MAX_EXPIRES_IN: u64 = 24 * 60 * 60;

fn parse_expires_in(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs <= MAX_EXPIRES_IN)
        .unwrap_or(DEFAULT_EXPIRES_IN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mfa_pending_credential_wins_over_tokens() {
        let raw: RawSignInResponse = serde_json::from_str(
            r#"{
                "mfaPendingCredential": "pending-123",
                "mfaInfo": [{"mfaEnrollmentId": "enr-1", "phoneInfo": "+*******1234"}]
            }"#,
        )
        .unwrap();

        match raw.into_sign_in().unwrap() {
            SignInResponse::MfaRequired(challenge) => {
                assert_eq!(challenge.pending_credential, "pending-123");
                assert_eq!(challenge.factors[0].enrollment_id, "enr-1");
                assert_eq!(challenge.factors[0].phone_info.as_deref(), Some("+*******1234"));
            }
            other => panic!("expected MFA challenge, got {:?}", other),
        }
    }

    #[test]
    fn missing_id_token_is_unexpected() {
        let raw: RawSignInResponse =
            serde_json::from_str(r#"{"refreshToken": "r", "localId": "u"}"#).unwrap();
        assert!(matches!(
            raw.into_tokens(),
            Err(IdentityError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn expires_in_defaults_when_unparseable() {
        assert_eq!(parse_expires_in(Some("1800")), 1800);
        assert_eq!(parse_expires_in(Some("soon")), DEFAULT_EXPIRES_IN);
        assert_eq!(parse_expires_in(None), DEFAULT_EXPIRES_IN);
    }

    #[test]
    fn absurd_expires_in_falls_back_to_default() {
        assert_eq!(parse_expires_in(Some("86400")), 86_400);
        assert_eq!(parse_expires_in(Some("100000000000000000")), DEFAULT_EXPIRES_IN);
        assert_eq!(parse_expires_in(Some("18446744073709551615")), DEFAULT_EXPIRES_IN);
    }

    #[test]
    fn google_post_body() {
        let credential = IdpCredential::GoogleIdToken("abc.def.ghi".to_string());
        assert_eq!(credential.post_body(), "id_token=abc.def.ghi&providerId=google.com");
    }

    #[test]
    fn lookup_account_parses_providers() {
        let account: AccountInfo = serde_json::from_str(
            r#"{
                "localId": "uid-1",
                "email": "student@example.com",
                "emailVerified": true,
                "providerUserInfo": [
                    {"providerId": "password", "rawId": "student@example.com", "email": "student@example.com"},
                    {"providerId": "phone", "rawId": "+919876543210", "phoneNumber": "+919876543210"}
                ]
            }"#,
        )
        .unwrap();

        assert!(account.email_verified);
        assert_eq!(account.providers.len(), 2);
        assert_eq!(account.providers[1].phone_number.as_deref(), Some("+919876543210"));
        assert!(account.mfa.is_empty());
    }
}
