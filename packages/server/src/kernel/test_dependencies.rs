// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use identity::{
    AccountInfo, AuthTokens, IdentityError, IdpCredential, MfaChallenge, MfaFactor, ProviderInfo,
    SignInResponse, SignedIn,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseIdentityProvider, BaseProfileStore, BaseWebhookClient};

/// The only SMS code the mock platform accepts
pub const MOCK_OTP_CODE: &str = "123456";

fn platform_error(code: &str) -> anyhow::Error {
    let body = format!(r#"{{"error":{{"message":"{}"}}}}"#, code);
    IdentityError::from_error_body(400, &body).into()
}

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// An account held by the mock platform
#[derive(Debug, Clone, Default)]
pub struct MockAccount {
    pub uid: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    pub providers: Vec<String>,
    pub mfa: Vec<MfaFactor>,
}

impl MockAccount {
    pub fn email_password(uid: &str, email: &str, password: &str) -> Self {
        Self {
            uid: uid.to_string(),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            email_verified: true,
            providers: vec!["password".to_string()],
            ..Default::default()
        }
    }

    pub fn unverified(mut self) -> Self {
        self.email_verified = false;
        self
    }

    pub fn with_phone(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self.providers.push("phone".to_string());
        self
    }

    pub fn with_second_factor(mut self, enrollment_id: &str, phone_hint: &str) -> Self {
        self.mfa.push(MfaFactor {
            enrollment_id: enrollment_id.to_string(),
            display_name: Some("Phone".to_string()),
            phone_info: Some(phone_hint.to_string()),
            enrolled_at: None,
        });
        self
    }

    fn to_account_info(&self) -> AccountInfo {
        let providers = self
            .providers
            .iter()
            .map(|provider_id| ProviderInfo {
                provider_id: provider_id.clone(),
                uid: Some(self.uid.clone()),
                email: self.email.clone(),
                display_name: self.display_name.clone(),
                photo_url: self.photo_url.clone(),
                phone_number: if provider_id == "phone" {
                    self.phone_number.clone()
                } else {
                    None
                },
            })
            .collect();

        AccountInfo {
            local_id: self.uid.clone(),
            email: self.email.clone(),
            email_verified: self.email_verified,
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
            phone_number: self.phone_number.clone(),
            providers,
            mfa: self.mfa.clone(),
        }
    }
}

#[derive(Default)]
struct MockPlatformState {
    accounts: Vec<MockAccount>,
    /// id token -> uid
    id_tokens: HashMap<String, String>,
    token_counter: u32,
    sent_codes: Vec<String>,
    verification_emails: Vec<String>,
    password_resets: Vec<String>,
    refresh_count: u32,
}

impl MockPlatformState {
    fn account_by_token(&mut self, id_token: &str) -> Result<&mut MockAccount> {
        let uid = self
            .id_tokens
            .get(id_token)
            .cloned()
            .ok_or_else(|| platform_error("INVALID_ID_TOKEN"))?;
        self.accounts
            .iter_mut()
            .find(|a| a.uid == uid)
            .ok_or_else(|| platform_error("USER_NOT_FOUND"))
    }

    fn issue_tokens(&mut self, uid: &str, expires_in: u64) -> AuthTokens {
        self.token_counter += 1;
        let id_token = format!("id-{}-{}", uid, self.token_counter);
        self.id_tokens.insert(id_token.clone(), uid.to_string());

        AuthTokens {
            id_token,
            refresh_token: format!("refresh-{}", uid),
            expires_in,
            local_id: Some(uid.to_string()),
        }
    }

    fn next_uid(&self) -> String {
        format!("uid-{}", self.accounts.len() + 1)
    }
}

pub struct MockIdentityProvider {
    state: Arc<Mutex<MockPlatformState>>,
    token_lifetime: u64,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockPlatformState::default())),
            token_lifetime: 3600,
        }
    }

    pub fn with_account(self, account: MockAccount) -> Self {
        self.state.lock().unwrap().accounts.push(account);
        self
    }

    /// Seconds until issued id tokens expire
    pub fn with_token_lifetime(mut self, seconds: u64) -> Self {
        self.token_lifetime = seconds;
        self
    }

    /// Phone numbers that received an SMS code
    pub fn sent_codes(&self) -> Vec<String> {
        self.state.lock().unwrap().sent_codes.clone()
    }

    /// Emails that were sent a verification link
    pub fn verification_emails(&self) -> Vec<String> {
        self.state.lock().unwrap().verification_emails.clone()
    }

    pub fn password_resets(&self) -> Vec<String> {
        self.state.lock().unwrap().password_resets.clone()
    }

    pub fn refresh_count(&self) -> u32 {
        self.state.lock().unwrap().refresh_count
    }

    pub fn account(&self, uid: &str) -> Option<MockAccount> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.uid == uid)
            .cloned()
    }

    fn signed_in(account: &MockAccount, tokens: AuthTokens, is_new_user: bool) -> SignedIn {
        SignedIn {
            tokens,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            photo_url: account.photo_url.clone(),
            phone_number: account.phone_number.clone(),
            is_new_user,
        }
    }

    fn complete_or_challenge(
        state: &mut MockPlatformState,
        account: MockAccount,
        is_new_user: bool,
        expires_in: u64,
    ) -> SignInResponse {
        if !account.mfa.is_empty() {
            return SignInResponse::MfaRequired(MfaChallenge {
                pending_credential: format!("pending-{}", account.uid),
                factors: account.mfa.clone(),
            });
        }

        let tokens = state.issue_tokens(&account.uid, expires_in);
        SignInResponse::Complete(Self::signed_in(&account, tokens, is_new_user))
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens> {
        let mut state = self.state.lock().unwrap();
        if state.accounts.iter().any(|a| a.email.as_deref() == Some(email)) {
            return Err(platform_error("EMAIL_EXISTS"));
        }
        if password.len() < 6 {
            return Err(platform_error("WEAK_PASSWORD : Password should be at least 6 characters"));
        }

        let uid = state.next_uid();
        state
            .accounts
            .push(MockAccount::email_password(&uid, email, password).unverified());
        Ok(state.issue_tokens(&uid, self.token_lifetime))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignInResponse> {
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .iter()
            .find(|a| a.email.as_deref() == Some(email) && a.password.as_deref() == Some(password))
            .cloned()
            .ok_or_else(|| platform_error("INVALID_LOGIN_CREDENTIALS"))?;

        Ok(Self::complete_or_challenge(
            &mut state,
            account,
            false,
            self.token_lifetime,
        ))
    }

    /// The Google token is treated as the account email
    async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
        _request_uri: &str,
    ) -> Result<SignInResponse> {
        let email = match credential {
            IdpCredential::GoogleIdToken(token) | IdpCredential::GoogleAccessToken(token) => {
                token.clone()
            }
        };

        let mut state = self.state.lock().unwrap();
        let existing = state
            .accounts
            .iter()
            .find(|a| a.email.as_deref() == Some(email.as_str()))
            .cloned();

        let (account, is_new_user) = match existing {
            Some(account) => (account, false),
            None => {
                let account = MockAccount {
                    uid: state.next_uid(),
                    email: Some(email.clone()),
                    email_verified: true,
                    display_name: Some("Google User".to_string()),
                    providers: vec![credential.provider_id().to_string()],
                    ..Default::default()
                };
                state.accounts.push(account.clone());
                (account, true)
            }
        };

        Ok(Self::complete_or_challenge(
            &mut state,
            account,
            is_new_user,
            self.token_lifetime,
        ))
    }

    async fn send_verification_code(
        &self,
        phone_number: &str,
        _recaptcha_token: Option<&str>,
    ) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .sent_codes
            .push(phone_number.to_string());
        Ok(format!("verification:{}", phone_number))
    }

    async fn sign_in_with_phone(&self, verification_id: &str, code: &str) -> Result<SignedIn> {
        if code != MOCK_OTP_CODE {
            return Err(platform_error("INVALID_CODE"));
        }
        let phone_number = verification_id
            .strip_prefix("verification:")
            .ok_or_else(|| platform_error("INVALID_SESSION_INFO"))?
            .to_string();

        let mut state = self.state.lock().unwrap();
        let existing = state
            .accounts
            .iter()
            .find(|a| a.phone_number.as_deref() == Some(phone_number.as_str()))
            .cloned();

        let (account, is_new_user) = match existing {
            Some(account) => (account, false),
            None => {
                let account = MockAccount {
                    uid: state.next_uid(),
                    phone_number: Some(phone_number),
                    providers: vec!["phone".to_string()],
                    ..Default::default()
                };
                state.accounts.push(account.clone());
                (account, true)
            }
        };

        let tokens = state.issue_tokens(&account.uid, self.token_lifetime);
        Ok(Self::signed_in(&account, tokens, is_new_user))
    }

    async fn link_phone(
        &self,
        id_token: &str,
        verification_id: &str,
        code: &str,
    ) -> Result<SignedIn> {
        if code != MOCK_OTP_CODE {
            return Err(platform_error("INVALID_CODE"));
        }
        let phone_number = verification_id
            .strip_prefix("verification:")
            .ok_or_else(|| platform_error("INVALID_SESSION_INFO"))?
            .to_string();

        let mut state = self.state.lock().unwrap();
        let uid = state.account_by_token(id_token)?.uid.clone();
        if state
            .accounts
            .iter()
            .any(|a| a.uid != uid && a.phone_number.as_deref() == Some(phone_number.as_str()))
        {
            return Err(platform_error("PHONE_NUMBER_EXISTS"));
        }

        let account = state.account_by_token(id_token)?;
        account.phone_number = Some(phone_number);
        if !account.providers.iter().any(|p| p == "phone") {
            account.providers.push("phone".to_string());
        }
        let account = account.clone();

        let tokens = state.issue_tokens(&uid, self.token_lifetime);
        Ok(Self::signed_in(&account, tokens, false))
    }

    async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let account = state.account_by_token(id_token)?;
        if let Some(name) = display_name {
            account.display_name = Some(name.to_string());
        }
        if let Some(url) = photo_url {
            account.photo_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn send_email_verification(&self, id_token: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let email = state
            .account_by_token(id_token)?
            .email
            .clone()
            .ok_or_else(|| platform_error("EMAIL_NOT_FOUND"))?;
        state.verification_emails.push(email);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.accounts.iter().any(|a| a.email.as_deref() == Some(email)) {
            return Err(platform_error("EMAIL_NOT_FOUND"));
        }
        state.password_resets.push(email.to_string());
        Ok(())
    }

    async fn lookup(&self, id_token: &str) -> Result<AccountInfo> {
        let mut state = self.state.lock().unwrap();
        Ok(state.account_by_token(id_token)?.to_account_info())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let uid = refresh_token
            .strip_prefix("refresh-")
            .ok_or_else(|| platform_error("INVALID_REFRESH_TOKEN"))?
            .to_string();

        let mut state = self.state.lock().unwrap();
        state.refresh_count += 1;
        Ok(state.issue_tokens(&uid, 3600))
    }

    async fn start_mfa_enrollment(
        &self,
        id_token: &str,
        phone_number: &str,
        _recaptcha_token: Option<&str>,
    ) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.account_by_token(id_token)?;
        state.sent_codes.push(phone_number.to_string());
        Ok(format!("enroll:{}", phone_number))
    }

    async fn finalize_mfa_enrollment(
        &self,
        id_token: &str,
        verification_id: &str,
        code: &str,
        display_name: Option<&str>,
    ) -> Result<AuthTokens> {
        if code != MOCK_OTP_CODE {
            return Err(platform_error("INVALID_CODE"));
        }
        let phone_number = verification_id
            .strip_prefix("enroll:")
            .ok_or_else(|| platform_error("INVALID_SESSION_INFO"))?
            .to_string();

        let mut state = self.state.lock().unwrap();
        let account = state.account_by_token(id_token)?;
        let enrollment_id = format!("enrollment-{}", account.mfa.len() + 1);
        let hint = format!("+*******{}", &phone_number[phone_number.len().saturating_sub(4)..]);
        account.mfa.push(MfaFactor {
            enrollment_id,
            display_name: display_name.map(str::to_string),
            phone_info: Some(hint),
            enrolled_at: None,
        });
        let uid = account.uid.clone();

        let mut tokens = state.issue_tokens(&uid, self.token_lifetime);
        tokens.local_id = None;
        Ok(tokens)
    }

    async fn start_mfa_sign_in(
        &self,
        pending_credential: &str,
        enrollment_id: &str,
        _recaptcha_token: Option<&str>,
    ) -> Result<String> {
        let uid = pending_credential
            .strip_prefix("pending-")
            .ok_or_else(|| platform_error("INVALID_MFA_PENDING_CREDENTIAL"))?;
        Ok(format!("mfa:{}:{}", uid, enrollment_id))
    }

    async fn finalize_mfa_sign_in(
        &self,
        pending_credential: &str,
        verification_id: &str,
        code: &str,
    ) -> Result<AuthTokens> {
        if code != MOCK_OTP_CODE {
            return Err(platform_error("INVALID_CODE"));
        }
        let uid = pending_credential
            .strip_prefix("pending-")
            .ok_or_else(|| platform_error("INVALID_MFA_PENDING_CREDENTIAL"))?;
        if !verification_id.starts_with(&format!("mfa:{}:", uid)) {
            return Err(platform_error("INVALID_SESSION_INFO"));
        }

        let mut state = self.state.lock().unwrap();
        let mut tokens = state.issue_tokens(uid, self.token_lifetime);
        tokens.local_id = None;
        Ok(tokens)
    }
}

// =============================================================================
// Mock Profile Store
// =============================================================================

pub struct MockProfileStore {
    profiles: Arc<Mutex<HashMap<String, Map<String, Value>>>>,
    writes: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
    fail_writes: bool,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_writes: false,
        }
    }

    /// Every save returns an error
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn profile(&self, uid: &str) -> Option<Map<String, Value>> {
        self.profiles.lock().unwrap().get(uid).cloned()
    }

    /// All (uid, fields) writes in order
    pub fn writes(&self) -> Vec<(String, Map<String, Value>)> {
        self.writes.lock().unwrap().clone()
    }
}

impl Default for MockProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseProfileStore for MockProfileStore {
    async fn save_profile(
        &self,
        uid: &str,
        fields: &Map<String, Value>,
        _id_token: &str,
    ) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("profile store unavailable"));
        }

        self.writes
            .lock()
            .unwrap()
            .push((uid.to_string(), fields.clone()));

        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.entry(uid.to_string()).or_default();
        for (key, value) in fields {
            profile.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

// =============================================================================
// Mock Webhook Client
// =============================================================================

pub struct MockWebhookClient {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
    fail: bool,
}

impl MockWebhookClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Every post is rejected like a non-2xx response
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockWebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWebhookClient for MockWebhookClient {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));

        if self.fail {
            return Err(anyhow!("Webhook returned 500 Internal Server Error"));
        }
        Ok(())
    }
}
