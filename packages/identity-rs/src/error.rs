use serde::Deserialize;
use thiserror::Error;

/// Error codes returned by the identity platform in `error.message`.
///
/// Messages look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be
/// at least 6 characters`; only the part before ` : ` is the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformErrorCode {
    EmailExists,
    EmailNotFound,
    InvalidPassword,
    InvalidLoginCredentials,
    InvalidEmail,
    UserDisabled,
    UserNotFound,
    WeakPassword,
    TooManyAttempts,
    InvalidCode,
    InvalidSessionInfo,
    SessionExpired,
    InvalidPhoneNumber,
    MissingPhoneNumber,
    PhoneNumberExists,
    CaptchaCheckFailed,
    CredentialTooOld,
    InvalidIdToken,
    TokenExpired,
    InvalidRefreshToken,
    InvalidMfaPendingCredential,
    OperationNotAllowed,
    QuotaExceeded,
    Unknown(String),
}

impl PlatformErrorCode {
    pub fn parse(message: &str) -> Self {
        let code = message.split(" : ").next().unwrap_or(message).trim();

        match code {
            "EMAIL_EXISTS" => Self::EmailExists,
            "EMAIL_NOT_FOUND" => Self::EmailNotFound,
            "INVALID_PASSWORD" => Self::InvalidPassword,
            "INVALID_LOGIN_CREDENTIALS" => Self::InvalidLoginCredentials,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "USER_DISABLED" => Self::UserDisabled,
            "USER_NOT_FOUND" => Self::UserNotFound,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "INVALID_CODE" => Self::InvalidCode,
            "INVALID_SESSION_INFO" => Self::InvalidSessionInfo,
            "SESSION_EXPIRED" | "CODE_EXPIRED" => Self::SessionExpired,
            "INVALID_PHONE_NUMBER" => Self::InvalidPhoneNumber,
            "MISSING_PHONE_NUMBER" => Self::MissingPhoneNumber,
            "PHONE_NUMBER_EXISTS" => Self::PhoneNumberExists,
            "CAPTCHA_CHECK_FAILED" | "MISSING_RECAPTCHA_TOKEN" => Self::CaptchaCheckFailed,
            "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => Self::CredentialTooOld,
            "INVALID_ID_TOKEN" => Self::InvalidIdToken,
            "TOKEN_EXPIRED" => Self::TokenExpired,
            "INVALID_REFRESH_TOKEN" => Self::InvalidRefreshToken,
            "INVALID_MFA_PENDING_CREDENTIAL" => Self::InvalidMfaPendingCredential,
            "OPERATION_NOT_ALLOWED" => Self::OperationNotAllowed,
            "QUOTA_EXCEEDED" => Self::QuotaExceeded,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Message suitable for showing to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmailExists => "An account with this email already exists.".to_string(),
            Self::EmailNotFound | Self::InvalidPassword | Self::InvalidLoginCredentials => {
                "Incorrect email or password.".to_string()
            }
            Self::InvalidEmail => "Please enter a valid email address.".to_string(),
            Self::UserDisabled => "This account has been disabled.".to_string(),
            Self::UserNotFound => "No account was found for these details.".to_string(),
            Self::WeakPassword => "Password should be at least 6 characters.".to_string(),
            Self::TooManyAttempts => {
                "Too many attempts. Please wait a moment and try again.".to_string()
            }
            Self::InvalidCode => "The verification code is incorrect.".to_string(),
            Self::InvalidSessionInfo | Self::SessionExpired => {
                "The verification code has expired. Please request a new one.".to_string()
            }
            Self::InvalidPhoneNumber | Self::MissingPhoneNumber => {
                "Please enter a phone number with country code (e.g., +919876543210).".to_string()
            }
            Self::PhoneNumberExists => {
                "This phone number is already linked to another account.".to_string()
            }
            Self::CaptchaCheckFailed => "Captcha verification failed. Please retry.".to_string(),
            Self::CredentialTooOld => "Please sign in again to continue.".to_string(),
            Self::InvalidIdToken | Self::TokenExpired | Self::InvalidRefreshToken => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::InvalidMfaPendingCredential => {
                "The multi-factor sign-in has expired. Please sign in again.".to_string()
            }
            Self::OperationNotAllowed => {
                "This sign-in method is not enabled for this site.".to_string()
            }
            Self::QuotaExceeded => "Service is busy. Please try again later.".to_string(),
            Self::Unknown(code) => format!("Authentication failed ({})", code),
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Request to identity platform failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{}", .code.user_message())]
    Platform {
        status: u16,
        code: PlatformErrorCode,
        message: String,
    },

    #[error("Unexpected response from identity platform: {0}")]
    UnexpectedResponse(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityError {
    /// Build an error from a non-2xx response body.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::Platform {
                status,
                code: PlatformErrorCode::parse(&envelope.error.message),
                message: envelope.error.message,
            },
            Err(_) => Self::UnexpectedResponse(format!("HTTP {}: {}", status, body)),
        }
    }

    pub fn code(&self) -> Option<&PlatformErrorCode> {
        match self {
            Self::Platform { code, .. } => Some(code),
            _ => None,
        }
    }
}
