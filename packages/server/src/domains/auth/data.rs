use identity::{AccountInfo, MfaChallenge, MfaFactor};
use juniper::{GraphQLInputObject, GraphQLObject};

use crate::domains::auth::models::{AuthOutcome, NextStep};

/// Sign-up form fields
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SignUpInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
    /// Optional phone to link after sign-up (E.164)
    pub phone_number: Option<String>,
    pub accepted_tos: bool,
}

/// A second factor as shown to the user
#[derive(Debug, Clone, GraphQLObject)]
pub struct MfaFactorData {
    pub enrollment_id: String,
    pub display_name: Option<String>,
    /// Masked phone number
    pub phone_hint: Option<String>,
}

impl From<MfaFactor> for MfaFactorData {
    fn from(factor: MfaFactor) -> Self {
        Self {
            enrollment_id: factor.enrollment_id,
            display_name: factor.display_name,
            phone_hint: factor.phone_info,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "Second factor required before a session is issued")]
pub struct MfaChallengeData {
    pub pending_credential: String,
    pub factors: Vec<MfaFactorData>,
}

impl From<MfaChallenge> for MfaChallengeData {
    fn from(challenge: MfaChallenge) -> Self {
        Self {
            pending_credential: challenge.pending_credential,
            factors: challenge.factors.into_iter().map(Into::into).collect(),
        }
    }
}

/// The signed-in account
#[derive(Debug, Clone, GraphQLObject)]
pub struct ViewerData {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    /// Linked sign-in providers (password, google.com, phone)
    pub providers: Vec<String>,
    pub mfa_factors: Vec<MfaFactorData>,
}

impl From<AccountInfo> for ViewerData {
    fn from(account: AccountInfo) -> Self {
        Self {
            uid: account.local_id,
            email: account.email,
            email_verified: account.email_verified,
            display_name: account.display_name,
            photo_url: account.photo_url,
            phone_number: account.phone_number,
            providers: account
                .providers
                .into_iter()
                .map(|p| p.provider_id)
                .collect(),
            mfa_factors: account.mfa.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of every sign-in and sign-up mutation
#[derive(Debug, Clone, GraphQLObject)]
pub struct AuthPayload {
    /// Session JWT; absent while a second factor is pending
    pub token: Option<String>,
    pub next_step: NextStep,
    pub message: Option<String>,
    pub user: Option<ViewerData>,
    pub mfa: Option<MfaChallengeData>,
}

impl From<AuthOutcome> for AuthPayload {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::SignedIn {
                token,
                account,
                next_step,
                message,
            } => Self {
                token: Some(token),
                next_step,
                message,
                user: Some(account.into()),
                mfa: None,
            },
            AuthOutcome::MfaRequired(challenge) => Self {
                token: None,
                next_step: NextStep::MfaRequired,
                message: Some("Multi-factor verification required.".to_string()),
                user: None,
                mfa: Some(challenge.into()),
            },
        }
    }
}

/// A code was sent; pass `verification_id` back with the code
#[derive(Debug, Clone, GraphQLObject)]
pub struct VerificationData {
    pub verification_id: String,
    pub message: String,
}

impl VerificationData {
    pub fn sent(verification_id: String) -> Self {
        Self {
            verification_id,
            message: "OTP sent. Please enter the code.".to_string(),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
}
