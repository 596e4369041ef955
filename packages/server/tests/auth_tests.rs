//! Integration tests for the auth flows.
//!
//! Covers:
//! - Email sign-up and sign-in, including the unverified-email refusal
//! - Google sign-in followed by phone linking
//! - Phone OTP sign-in
//! - Second factor enrollment and sign-in
//! - Session refresh, sign-out and protected operations

mod common;

use common::{TestHarness, STUDENT_EMAIL, STUDENT_PASSWORD, STUDENT_UID};
use serde_json::json;
use server_core::domains::auth::actions::email::{SIGN_UP_MESSAGE, UNVERIFIED_EMAIL_MESSAGE};
use server_core::domains::auth::actions::google::LINK_PHONE_MESSAGE;
use server_core::domains::auth::actions::recovery::PASSWORD_RESET_MESSAGE;
use server_core::kernel::test_dependencies::{
    MockAccount, MockIdentityProvider, MockProfileStore, MockWebhookClient, MOCK_OTP_CODE,
};
use test_context::test_context;

const AUTH_FIELDS: &str = "token nextStep message user { uid email phoneNumber providers } mfa { pendingCredential factors { enrollmentId phoneHint } }";

fn sign_up_mutation(email: &str, phone: Option<&str>, accepted_tos: bool) -> String {
    let phone = phone
        .map(|p| format!(r#", phoneNumber: "{}""#, p))
        .unwrap_or_default();
    format!(
        r#"mutation {{ signUpWithEmail(input: {{ displayName: "Asha Rao", email: "{}", password: "longenough"{}, acceptedTos: {} }}) {{ {} }} }}"#,
        email, phone, accepted_tos, AUTH_FIELDS
    )
}

fn sign_in_mutation(email: &str, password: &str) -> String {
    format!(
        r#"mutation {{ signInWithEmail(email: "{}", password: "{}") {{ {} }} }}"#,
        email, password, AUTH_FIELDS
    )
}

// ============================================================================
// Email sign-up
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_up_issues_session_and_writes_student_profile(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_up_mutation("new@example.com", Some("+919876543210"), true))
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.get("signUpWithEmail.nextStep"), json!("LINK_PHONE"));
    assert_eq!(result.get("signUpWithEmail.message"), json!(SIGN_UP_MESSAGE));
    assert!(result.get("signUpWithEmail.token").is_string());

    let uid = result.get("signUpWithEmail.user.uid");
    let uid = uid.as_str().unwrap();
    let profile = ctx.profiles.profile(uid).expect("profile saved");
    assert_eq!(profile["role"], json!("student"));
    assert_eq!(profile["acceptedTOS"], json!(true));
    assert_eq!(profile["displayName"], json!("Asha Rao"));
    assert_eq!(profile["email"], json!("new@example.com"));

    assert_eq!(ctx.identity.verification_emails(), vec!["new@example.com"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_up_without_phone_is_done(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_up_mutation("nophone@example.com", None, true))
        .await;

    assert_eq!(result.get("signUpWithEmail.nextStep"), json!("DONE"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_up_requires_terms_acceptance(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_up_mutation("terms@example.com", None, false))
        .await;

    assert_eq!(result.error(), "You must accept the Terms of Service.");
    assert!(ctx.profiles.writes().is_empty());
    assert!(ctx.identity.verification_emails().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_up_rejects_phone_without_country_code(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_up_mutation("phone@example.com", Some("9876543210"), true))
        .await;

    assert_eq!(
        result.error(),
        "Please enter a phone number with country code (e.g., +919876543210)."
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_up_with_existing_email_reports_platform_message(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_up_mutation(STUDENT_EMAIL, None, true))
        .await;

    assert_eq!(result.error(), "An account with this email already exists.");
}

// ============================================================================
// Email sign-in
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_in_records_last_seen_without_sign_up_fields(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_in_mutation(STUDENT_EMAIL, STUDENT_PASSWORD))
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.get("signInWithEmail.nextStep"), json!("DONE"));
    assert_eq!(result.get("signInWithEmail.user.uid"), json!(STUDENT_UID));

    let profile = ctx.profiles.profile(STUDENT_UID).expect("profile saved");
    assert!(profile["lastSeen"].is_string());
    assert!(!profile.contains_key("role"));
    assert!(!profile.contains_key("acceptedTOS"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_in_with_wrong_password_fails(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(&sign_in_mutation(STUDENT_EMAIL, "wrong-password"))
        .await;

    assert_eq!(result.error(), "Incorrect email or password.");
    assert_eq!(ctx.deps.credentials.len().await, 0);
}

#[tokio::test]
async fn unverified_email_gets_profile_but_no_session() {
    let identity = MockIdentityProvider::new().with_account(
        MockAccount::email_password("late-1", "late@example.com", "secret123").unverified(),
    );
    let ctx = TestHarness::with_mocks(identity, MockProfileStore::new(), MockWebhookClient::new());

    let result = ctx
        .graphql()
        .execute(&sign_in_mutation("late@example.com", "secret123"))
        .await;

    assert_eq!(result.error(), UNVERIFIED_EMAIL_MESSAGE);
    assert_eq!(ctx.deps.credentials.len().await, 0);

    let writes = ctx.profiles.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "late-1");
    assert_eq!(writes[0].1["email"], json!("late@example.com"));
    assert!(writes[0].1["lastSeen"].is_string());
}

#[tokio::test]
async fn profile_store_outage_does_not_block_sign_in() {
    let identity = MockIdentityProvider::new().with_account(MockAccount::email_password(
        STUDENT_UID,
        STUDENT_EMAIL,
        STUDENT_PASSWORD,
    ));
    let ctx = TestHarness::with_mocks(identity, MockProfileStore::failing(), MockWebhookClient::new());

    let result = ctx
        .graphql()
        .execute(&sign_in_mutation(STUDENT_EMAIL, STUDENT_PASSWORD))
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert!(result.get("signInWithEmail.token").is_string());
}

// ============================================================================
// Viewer, refresh and sign-out
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn viewer_is_null_for_anonymous_callers(ctx: &TestHarness) {
    let data = ctx.graphql().query("{ viewer { uid } }").await;
    assert!(data["viewer"].is_null());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn viewer_returns_signed_in_account(ctx: &TestHarness) {
    let token = ctx.sign_in_student().await;

    let data = ctx
        .graphql_as(&token)
        .query("{ viewer { uid email emailVerified providers } }")
        .await;

    assert_eq!(data["viewer"]["uid"], json!(STUDENT_UID));
    assert_eq!(data["viewer"]["email"], json!(STUDENT_EMAIL));
    assert_eq!(data["viewer"]["emailVerified"], json!(true));
    assert_eq!(data["viewer"]["providers"], json!(["password"]));
}

#[tokio::test]
async fn expiring_platform_credential_is_refreshed_once() {
    let identity = MockIdentityProvider::new()
        .with_account(MockAccount::email_password(
            STUDENT_UID,
            STUDENT_EMAIL,
            STUDENT_PASSWORD,
        ))
        .with_token_lifetime(30);
    let ctx = TestHarness::with_mocks(identity, MockProfileStore::new(), MockWebhookClient::new());
    let token = ctx.sign_in_student().await;

    let client = ctx.graphql_as(&token);
    let first = client.query("{ viewer { uid } }").await;
    let second = client.query("{ viewer { uid } }").await;

    assert_eq!(first["viewer"]["uid"], json!(STUDENT_UID));
    assert_eq!(second["viewer"]["uid"], json!(STUDENT_UID));
    assert_eq!(ctx.identity.refresh_count(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sign_out_ends_the_session(ctx: &TestHarness) {
    let token = ctx.sign_in_student().await;
    let client = ctx.graphql_as(&token);

    let data = client.query("mutation { signOut }").await;
    assert_eq!(data["signOut"], json!(true));

    let data = client.query("{ viewer { uid } }").await;
    assert!(data["viewer"].is_null());

    let result = client.execute("mutation { resendEmailVerification }").await;
    assert_eq!(
        result.error(),
        "Invalid or expired session. Please sign in again."
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn protected_mutations_require_a_token(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(r#"mutation { sendPhoneOtpForLinking(phoneNumber: "+919876543210") { verificationId } }"#)
        .await;

    assert_eq!(result.error(), "Authentication required");
    assert!(ctx.identity.sent_codes().is_empty());
}

// ============================================================================
// Recovery
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn password_reset_sends_email(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(&format!(
            r#"mutation {{ sendPasswordReset(email: "{}") {{ success message }} }}"#,
            STUDENT_EMAIL
        ))
        .await;

    assert_eq!(data["sendPasswordReset"]["success"], json!(true));
    assert_eq!(
        data["sendPasswordReset"]["message"],
        json!(PASSWORD_RESET_MESSAGE)
    );
    assert_eq!(ctx.identity.password_resets(), vec![STUDENT_EMAIL]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn password_reset_validates_email(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(r#"mutation { sendPasswordReset(email: "not-an-email") { success } }"#)
        .await;

    assert_eq!(result.error(), "Please enter a valid email address.");
    assert!(ctx.identity.password_resets().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn verification_email_can_be_resent(ctx: &TestHarness) {
    let token = ctx.sign_in_student().await;

    let data = ctx
        .graphql_as(&token)
        .query("mutation { resendEmailVerification }")
        .await;

    assert_eq!(data["resendEmailVerification"], json!(true));
    assert_eq!(ctx.identity.verification_emails(), vec![STUDENT_EMAIL]);
}

// ============================================================================
// Google and phone linking
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn google_sign_in_asks_to_link_phone_then_links_it(ctx: &TestHarness) {
    // The mock platform treats the Google token as the account email
    let result = ctx
        .graphql()
        .execute(&format!(
            r#"mutation {{ signInWithGoogle(idToken: "g-user@example.com") {{ {} }} }}"#,
            AUTH_FIELDS
        ))
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.get("signInWithGoogle.nextStep"), json!("LINK_PHONE"));
    assert_eq!(result.get("signInWithGoogle.message"), json!(LINK_PHONE_MESSAGE));
    let token = result.get("signInWithGoogle.token");
    let client = ctx.graphql_as(token.as_str().unwrap());

    let data = client
        .query(r#"mutation { sendPhoneOtpForLinking(phoneNumber: "+919876543210") { verificationId message } }"#)
        .await;
    let verification_id = data["sendPhoneOtpForLinking"]["verificationId"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(ctx.identity.sent_codes(), vec!["+919876543210"]);

    let result = client
        .execute_with_vars(
            &format!(
                "mutation($vid: String!, $code: String!) {{ confirmPhoneLink(verificationId: $vid, code: $code) {{ {} }} }}",
                AUTH_FIELDS
            ),
            vars!("vid" => verification_id, "code" => MOCK_OTP_CODE),
        )
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.get("confirmPhoneLink.nextStep"), json!("DONE"));
    assert_eq!(
        result.get("confirmPhoneLink.message"),
        json!("Phone linked successfully.")
    );
    assert_eq!(
        result.get("confirmPhoneLink.user.phoneNumber"),
        json!("+919876543210")
    );

    // The refreshed JWT carries the linked phone
    let new_token = result.get("confirmPhoneLink.token");
    let user = ctx.auth_user(new_token.as_str().unwrap());
    assert_eq!(user.phone_number.as_deref(), Some("+919876543210"));

    let uid = result.get("confirmPhoneLink.user.uid");
    let profile = ctx.profiles.profile(uid.as_str().unwrap()).unwrap();
    assert_eq!(profile["phoneNumber"], json!("+919876543210"));
}

#[tokio::test]
async fn linking_a_phone_owned_by_another_account_fails() {
    let identity = MockIdentityProvider::new()
        .with_account(MockAccount::email_password(
            STUDENT_UID,
            STUDENT_EMAIL,
            STUDENT_PASSWORD,
        ))
        .with_account(
            MockAccount::email_password("other-1", "other@example.com", "secret123")
                .with_phone("+919876543210"),
        );
    let ctx = TestHarness::with_mocks(identity, MockProfileStore::new(), MockWebhookClient::new());
    let token = ctx.sign_in_student().await;

    let result = ctx
        .graphql_as(&token)
        .execute_with_vars(
            "mutation($vid: String!, $code: String!) { confirmPhoneLink(verificationId: $vid, code: $code) { token } }",
            vars!("vid" => "verification:+919876543210", "code" => MOCK_OTP_CODE),
        )
        .await;

    assert_eq!(
        result.error(),
        "This phone number is already linked to another account."
    );
}

// ============================================================================
// Phone OTP sign-in
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn phone_otp_requires_country_code(ctx: &TestHarness) {
    let result = ctx
        .graphql()
        .execute(r#"mutation { sendPhoneOtp(phoneNumber: "09876543210") { verificationId } }"#)
        .await;

    assert_eq!(
        result.error(),
        "Please enter a phone number with country code (e.g., +919876543210)."
    );
    assert!(ctx.identity.sent_codes().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn phone_otp_creates_account_on_first_sign_in(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(r#"mutation { sendPhoneOtp(phoneNumber: "+919000000001") { verificationId message } }"#)
        .await;
    assert_eq!(
        data["sendPhoneOtp"]["message"],
        json!("OTP sent. Please enter the code.")
    );
    let verification_id = data["sendPhoneOtp"]["verificationId"]
        .as_str()
        .unwrap()
        .to_string();

    let query = format!(
        "mutation($vid: String!, $code: String!) {{ confirmPhoneOtp(verificationId: $vid, code: $code) {{ {} }} }}",
        AUTH_FIELDS
    );

    let wrong = ctx
        .graphql()
        .execute_with_vars(&query, vars!("vid" => verification_id.clone(), "code" => "000000"))
        .await;
    assert_eq!(wrong.error(), "The verification code is incorrect.");

    let result = ctx
        .graphql()
        .execute_with_vars(&query, vars!("vid" => verification_id.clone(), "code" => MOCK_OTP_CODE))
        .await;
    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(
        result.get("confirmPhoneOtp.message"),
        json!("Phone verified and account created.")
    );
    assert_eq!(
        result.get("confirmPhoneOtp.user.phoneNumber"),
        json!("+919000000001")
    );

    let again = ctx
        .graphql()
        .execute_with_vars(&query, vars!("vid" => verification_id, "code" => MOCK_OTP_CODE))
        .await;
    assert_eq!(again.get("confirmPhoneOtp.message"), json!("Phone verified."));
}

// ============================================================================
// Second factor
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn enrolled_second_factor_is_required_on_next_sign_in(ctx: &TestHarness) {
    let token = ctx.sign_in_student().await;
    let client = ctx.graphql_as(&token);

    let data = client
        .query(r#"mutation { startMfaEnrollment(phoneNumber: "+919876543210") { verificationId message } }"#)
        .await;
    assert_eq!(
        data["startMfaEnrollment"]["message"],
        json!("Code sent. Enter verification code.")
    );
    let verification_id = data["startMfaEnrollment"]["verificationId"]
        .as_str()
        .unwrap()
        .to_string();

    let data = client
        .query_with_vars(
            r#"mutation($vid: String!, $code: String!) { completeMfaEnrollment(verificationId: $vid, code: $code, displayName: "My phone") { uid mfaFactors { enrollmentId displayName phoneHint } } }"#,
            vars!("vid" => verification_id, "code" => MOCK_OTP_CODE),
        )
        .await;
    let factors = &data["completeMfaEnrollment"]["mfaFactors"];
    assert_eq!(factors[0]["displayName"], json!("My phone"));
    assert_eq!(factors[0]["phoneHint"], json!("+*******3210"));
    let enrollment_id = factors[0]["enrollmentId"].as_str().unwrap().to_string();

    // First factor alone no longer yields a session
    let result = ctx
        .graphql()
        .execute(&sign_in_mutation(STUDENT_EMAIL, STUDENT_PASSWORD))
        .await;
    assert_eq!(result.get("signInWithEmail.nextStep"), json!("MFA_REQUIRED"));
    assert!(result.get("signInWithEmail.token").is_null());
    assert_eq!(
        result.get("signInWithEmail.mfa.factors")[0]["enrollmentId"],
        json!(enrollment_id)
    );
    let pending = result.get("signInWithEmail.mfa.pendingCredential");
    let pending = pending.as_str().unwrap().to_string();

    let data = ctx
        .graphql()
        .query_with_vars(
            "mutation($pending: String!, $enrollment: String!) { startMfaSignIn(pendingCredential: $pending, enrollmentId: $enrollment) { verificationId } }",
            vars!("pending" => pending.clone(), "enrollment" => enrollment_id),
        )
        .await;
    let mfa_verification = data["startMfaSignIn"]["verificationId"]
        .as_str()
        .unwrap()
        .to_string();

    let result = ctx
        .graphql()
        .execute_with_vars(
            &format!(
                "mutation($pending: String!, $vid: String!, $code: String!) {{ finalizeMfaSignIn(pendingCredential: $pending, verificationId: $vid, code: $code) {{ {} }} }}",
                AUTH_FIELDS
            ),
            vars!("pending" => pending, "vid" => mfa_verification, "code" => MOCK_OTP_CODE),
        )
        .await;

    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.get("finalizeMfaSignIn.nextStep"), json!("DONE"));
    assert_eq!(result.get("finalizeMfaSignIn.user.uid"), json!(STUDENT_UID));
    assert!(result.get("finalizeMfaSignIn.token").is_string());
}

#[tokio::test]
async fn wrong_second_factor_code_issues_no_session() {
    let identity = MockIdentityProvider::new().with_account(
        MockAccount::email_password(STUDENT_UID, STUDENT_EMAIL, STUDENT_PASSWORD)
            .with_second_factor("enrollment-1", "+*******3210"),
    );
    let ctx = TestHarness::with_mocks(identity, MockProfileStore::new(), MockWebhookClient::new());

    let result = ctx
        .graphql()
        .execute_with_vars(
            "mutation($pending: String!, $vid: String!, $code: String!) { finalizeMfaSignIn(pendingCredential: $pending, verificationId: $vid, code: $code) { token } }",
            vars!(
                "pending" => format!("pending-{}", STUDENT_UID),
                "vid" => format!("mfa:{}:enrollment-1", STUDENT_UID),
                "code" => "999999",
            ),
        )
        .await;

    assert_eq!(result.error(), "The verification code is incorrect.");
    assert_eq!(ctx.deps.credentials.len().await, 0);
}
