use identity::{AccountInfo, MfaChallenge};

/// What the client should do after an auth call
#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum NextStep {
    /// Signed in, nothing left to do
    Done,
    /// Signed in; ask for a phone number to link
    LinkPhone,
    /// No session yet; the second factor must be verified
    MfaRequired,
}

impl NextStep {
    /// GraphQL enum name, also used in redirect query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "DONE",
            Self::LinkPhone => "LINK_PHONE",
            Self::MfaRequired => "MFA_REQUIRED",
        }
    }
}

/// Result of a sign-in or sign-up flow
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    SignedIn {
        token: String,
        account: AccountInfo,
        next_step: NextStep,
        message: Option<String>,
    },
    MfaRequired(MfaChallenge),
}

impl AuthOutcome {
    pub fn next_step(&self) -> NextStep {
        match self {
            Self::SignedIn { next_step, .. } => *next_step,
            Self::MfaRequired(_) => NextStep::MfaRequired,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::SignedIn { token, .. } => Some(token),
            Self::MfaRequired(_) => None,
        }
    }
}
