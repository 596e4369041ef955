//! Account endpoints: email/password, IdP, phone, profile, lookup, refresh.

use serde_json::{json, Value};

use crate::models::{
    AccountInfo, AuthTokens, IdpCredential, LookupResponse, RawSignInResponse, RefreshResponse,
    SessionInfoResponse, SignInResponse, SignedIn,
};
use crate::{decode_response, IdentityError, IdentityService};

impl IdentityService {
    /// Create an email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let raw: RawSignInResponse = self.post_accounts("v1", "accounts:signUp", &body).await?;
        raw.into_tokens()
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResponse, IdentityError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let raw: RawSignInResponse = self
            .post_accounts("v1", "accounts:signInWithPassword", &body)
            .await?;
        raw.into_sign_in()
    }

    /// Sign in with a federated credential. `request_uri` is the URI the
    /// credential was issued for.
    pub async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
        request_uri: &str,
    ) -> Result<SignInResponse, IdentityError> {
        let body = json!({
            "postBody": credential.post_body(),
            "requestUri": request_uri,
            "returnSecureToken": true,
            "returnIdpCredential": true,
        });

        let raw: RawSignInResponse = self
            .post_accounts("v1", "accounts:signInWithIdp", &body)
            .await?;
        raw.into_sign_in()
    }

    /// Send an SMS code. Returns the session info that identifies this
    /// verification in the confirm call.
    pub async fn send_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String, IdentityError> {
        let mut body = json!({ "phoneNumber": phone_number });
        if let Some(token) = recaptcha_token {
            body["recaptchaToken"] = Value::String(token.to_string());
        }

        let response: SessionInfoResponse = self
            .post_accounts("v1", "accounts:sendVerificationCode", &body)
            .await?;
        Ok(response.session_info)
    }

    /// Confirm an SMS code, creating the phone account if needed.
    pub async fn sign_in_with_phone(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<SignedIn, IdentityError> {
        let body = json!({
            "sessionInfo": session_info,
            "code": code,
        });

        let raw: RawSignInResponse = self
            .post_accounts("v1", "accounts:signInWithPhoneNumber", &body)
            .await?;
        raw.into_signed_in()
    }

    /// Confirm an SMS code and attach the phone to the account owning `id_token`.
    pub async fn link_phone(
        &self,
        id_token: &str,
        session_info: &str,
        code: &str,
    ) -> Result<SignedIn, IdentityError> {
        let body = json!({
            "idToken": id_token,
            "sessionInfo": session_info,
            "code": code,
        });

        let raw: RawSignInResponse = self
            .post_accounts("v1", "accounts:signInWithPhoneNumber", &body)
            .await?;
        raw.into_signed_in()
    }

    pub async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<(), IdentityError> {
        let mut body = json!({
            "idToken": id_token,
            "returnSecureToken": false,
        });
        if let Some(name) = display_name {
            body["displayName"] = Value::String(name.to_string());
        }
        if let Some(url) = photo_url {
            body["photoUrl"] = Value::String(url.to_string());
        }

        let _: Value = self.post_accounts("v1", "accounts:update", &body).await?;
        Ok(())
    }

    pub async fn send_email_verification(&self, id_token: &str) -> Result<(), IdentityError> {
        let body = json!({
            "requestType": "VERIFY_EMAIL",
            "idToken": id_token,
        });

        let _: Value = self.post_accounts("v1", "accounts:sendOobCode", &body).await?;
        Ok(())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let body = json!({
            "requestType": "PASSWORD_RESET",
            "email": email,
        });

        let _: Value = self.post_accounts("v1", "accounts:sendOobCode", &body).await?;
        Ok(())
    }

    pub async fn lookup(&self, id_token: &str) -> Result<AccountInfo, IdentityError> {
        let body = json!({ "idToken": id_token });

        let response: LookupResponse = self.post_accounts("v1", "accounts:lookup", &body).await?;
        response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::UnexpectedResponse("lookup returned no users".to_string()))
    }

    /// Exchange a refresh token for a fresh id token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, IdentityError> {
        let url = format!("{}/v1/token", self.options.token_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .query(&[("key", self.options.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let refreshed: RefreshResponse = decode_response(response).await?;
        Ok(refreshed.into())
    }
}
