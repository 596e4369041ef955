//! GraphQL mutation definitions

/// Selection shared by every mutation returning an `AuthPayload`
macro_rules! auth_payload {
    () => {
        r#"
      token
      nextStep
      message
      user {
        uid
        email
        emailVerified
        displayName
        photoUrl
        phoneNumber
        providers
        mfaFactors { enrollmentId displayName phoneHint }
      }
      mfa {
        pendingCredential
        factors { enrollmentId displayName phoneHint }
      }
"#
    };
}

// ============================================================================
// EMAIL AND GOOGLE
// ============================================================================

pub const SIGN_UP_WITH_EMAIL: &str = concat!(
    r#"
  mutation SignUpWithEmail($input: SignUpInput!) {
    signUpWithEmail(input: $input) {"#,
    auth_payload!(),
    r#"    }
  }
"#
);

pub const SIGN_IN_WITH_EMAIL: &str = concat!(
    r#"
  mutation SignInWithEmail($email: String!, $password: String!) {
    signInWithEmail(email: $email, password: $password) {"#,
    auth_payload!(),
    r#"    }
  }
"#
);

// ============================================================================
// PHONE
// ============================================================================

pub const SEND_PHONE_OTP: &str = r#"
  mutation SendPhoneOtp($phoneNumber: String!, $recaptchaToken: String) {
    sendPhoneOtp(phoneNumber: $phoneNumber, recaptchaToken: $recaptchaToken) {
      verificationId
      message
    }
  }
"#;

pub const CONFIRM_PHONE_OTP: &str = concat!(
    r#"
  mutation ConfirmPhoneOtp($verificationId: String!, $code: String!) {
    confirmPhoneOtp(verificationId: $verificationId, code: $code) {"#,
    auth_payload!(),
    r#"    }
  }
"#
);

pub const SEND_PHONE_OTP_FOR_LINKING: &str = r#"
  mutation SendPhoneOtpForLinking($phoneNumber: String!, $recaptchaToken: String) {
    sendPhoneOtpForLinking(phoneNumber: $phoneNumber, recaptchaToken: $recaptchaToken) {
      verificationId
      message
    }
  }
"#;

pub const CONFIRM_PHONE_LINK: &str = concat!(
    r#"
  mutation ConfirmPhoneLink($verificationId: String!, $code: String!) {
    confirmPhoneLink(verificationId: $verificationId, code: $code) {"#,
    auth_payload!(),
    r#"    }
  }
"#
);

// ============================================================================
// MULTI-FACTOR
// ============================================================================

pub const START_MFA_ENROLLMENT: &str = r#"
  mutation StartMfaEnrollment($phoneNumber: String!, $recaptchaToken: String) {
    startMfaEnrollment(phoneNumber: $phoneNumber, recaptchaToken: $recaptchaToken) {
      verificationId
      message
    }
  }
"#;

pub const COMPLETE_MFA_ENROLLMENT: &str = r#"
  mutation CompleteMfaEnrollment($verificationId: String!, $code: String!, $displayName: String) {
    completeMfaEnrollment(verificationId: $verificationId, code: $code, displayName: $displayName) {
      uid
      email
      emailVerified
      displayName
      photoUrl
      phoneNumber
      providers
      mfaFactors { enrollmentId displayName phoneHint }
    }
  }
"#;

pub const START_MFA_SIGN_IN: &str = r#"
  mutation StartMfaSignIn($pendingCredential: String!, $enrollmentId: String!, $recaptchaToken: String) {
    startMfaSignIn(pendingCredential: $pendingCredential, enrollmentId: $enrollmentId, recaptchaToken: $recaptchaToken) {
      verificationId
      message
    }
  }
"#;

pub const FINALIZE_MFA_SIGN_IN: &str = concat!(
    r#"
  mutation FinalizeMfaSignIn($pendingCredential: String!, $verificationId: String!, $code: String!) {
    finalizeMfaSignIn(pendingCredential: $pendingCredential, verificationId: $verificationId, code: $code) {"#,
    auth_payload!(),
    r#"    }
  }
"#
);

// ============================================================================
// RECOVERY AND SESSION
// ============================================================================

pub const SEND_PASSWORD_RESET: &str = r#"
  mutation SendPasswordReset($email: String!) {
    sendPasswordReset(email: $email) {
      success
      message
    }
  }
"#;

pub const RESEND_EMAIL_VERIFICATION: &str = r#"
  mutation ResendEmailVerification {
    resendEmailVerification
  }
"#;

pub const SIGN_OUT: &str = r#"
  mutation SignOut {
    signOut
  }
"#;

// ============================================================================
// INQUIRIES
// ============================================================================

pub const SUBMIT_CONTACT: &str = r#"
  mutation SubmitContact($input: ContactFormInput!) {
    submitContact(input: $input) {
      success
      errors { field message }
      fallbackMailto
      message
    }
  }
"#;

pub const SUBMIT_BOOKING: &str = r#"
  mutation SubmitBooking($input: BookingFormInput!) {
    submitBooking(input: $input) {
      success
      errors { field message }
      fallbackMailto
      message
    }
  }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_payload_selection_is_spliced_in() {
        assert!(SIGN_IN_WITH_EMAIL.contains("signInWithEmail(email: $email, password: $password) {"));
        assert!(SIGN_IN_WITH_EMAIL.contains("pendingCredential"));
        assert_eq!(
            FINALIZE_MFA_SIGN_IN.matches('{').count(),
            FINALIZE_MFA_SIGN_IN.matches('}').count()
        );
    }
}
