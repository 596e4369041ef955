//! Phone second-factor enrollment and sign-in (v2 endpoints).

use serde_json::{json, Value};

use crate::models::{
    AuthTokens, MfaEnrollmentStartResponse, MfaSignInStartResponse, RawSignInResponse,
};
use crate::{IdentityError, IdentityService};

impl IdentityService {
    /// Send an enrollment code to `phone_number` for the signed-in account.
    pub async fn start_mfa_enrollment(
        &self,
        id_token: &str,
        phone_number: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String, IdentityError> {
        let mut phone_info = json!({ "phoneNumber": phone_number });
        if let Some(token) = recaptcha_token {
            phone_info["recaptchaToken"] = Value::String(token.to_string());
        }
        let body = json!({
            "idToken": id_token,
            "phoneEnrollmentInfo": phone_info,
        });

        let response: MfaEnrollmentStartResponse = self
            .post_accounts("v2", "accounts/mfaEnrollment:start", &body)
            .await?;
        Ok(response.phone_session_info.session_info)
    }

    pub async fn finalize_mfa_enrollment(
        &self,
        id_token: &str,
        session_info: &str,
        code: &str,
        display_name: Option<&str>,
    ) -> Result<AuthTokens, IdentityError> {
        let mut body = json!({
            "idToken": id_token,
            "phoneVerificationInfo": {
                "sessionInfo": session_info,
                "code": code,
            },
        });
        if let Some(name) = display_name {
            body["displayName"] = Value::String(name.to_string());
        }

        let raw: RawSignInResponse = self
            .post_accounts("v2", "accounts/mfaEnrollment:finalize", &body)
            .await?;
        raw.into_tokens()
    }

    /// Send the second-factor code for a pending sign-in.
    pub async fn start_mfa_sign_in(
        &self,
        pending_credential: &str,
        enrollment_id: &str,
        recaptcha_token: Option<&str>,
    ) -> Result<String, IdentityError> {
        let mut sign_in_info = json!({});
        if let Some(token) = recaptcha_token {
            sign_in_info["recaptchaToken"] = Value::String(token.to_string());
        }
        let body = json!({
            "mfaPendingCredential": pending_credential,
            "mfaEnrollmentId": enrollment_id,
            "phoneSignInInfo": sign_in_info,
        });

        let response: MfaSignInStartResponse = self
            .post_accounts("v2", "accounts/mfaSignIn:start", &body)
            .await?;
        Ok(response.phone_response_info.session_info)
    }

    pub async fn finalize_mfa_sign_in(
        &self,
        pending_credential: &str,
        session_info: &str,
        code: &str,
    ) -> Result<AuthTokens, IdentityError> {
        let body = json!({
            "mfaPendingCredential": pending_credential,
            "phoneVerificationInfo": {
                "sessionInfo": session_info,
                "code": code,
            },
        });

        let raw: RawSignInResponse = self
            .post_accounts("v2", "accounts/mfaSignIn:finalize", &body)
            .await?;
        raw.into_tokens()
    }
}
