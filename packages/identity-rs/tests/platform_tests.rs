// Integration tests for the identity client against a mock platform

use identity::{
    IdentityError, IdentityOptions, IdentityService, IdpCredential, PlatformErrorCode,
    SignInResponse,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn create_test_service(server: &Server) -> IdentityService {
    IdentityService::new(IdentityOptions::new("test-key", "techmatch-test").with_base_url(server.url()))
}

fn path(pattern: &str) -> Matcher {
    Matcher::Regex(format!("^{}", regex_escape(pattern)))
}

fn regex_escape(value: &str) -> String {
    value
        .chars()
        .flat_map(|c| match c {
            '(' | ')' | '.' | '?' | '+' | '*' | '[' | ']' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}

#[tokio::test]
async fn test_sign_up_returns_tokens() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock("POST", path("/v1/accounts:signUp"))
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "email": "student@example.com",
            "returnSecureToken": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "idToken": "id-1",
                "refreshToken": "refresh-1",
                "expiresIn": "3600",
                "localId": "uid-1"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tokens = service
        .sign_up("student@example.com", "secret123")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tokens.id_token, "id-1");
    assert_eq!(tokens.refresh_token, "refresh-1");
    assert_eq!(tokens.expires_in, 3600);
    assert_eq!(tokens.local_id.as_deref(), Some("uid-1"));
}

#[tokio::test]
async fn test_sign_up_existing_email_maps_platform_error() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:signUp"))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": {"code": 400, "message": "EMAIL_EXISTS"}}).to_string())
        .create_async()
        .await;

    let err = service
        .sign_up("student@example.com", "secret123")
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(&PlatformErrorCode::EmailExists));
    assert_eq!(err.to_string(), "An account with this email already exists.");
}

#[tokio::test]
async fn test_weak_password_detail_is_stripped_from_code() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:signUp"))
        .with_status(400)
        .with_body(
            json!({"error": {"message": "WEAK_PASSWORD : Password should be at least 6 characters"}})
                .to_string(),
        )
        .create_async()
        .await;

    let err = service.sign_up("student@example.com", "123").await.unwrap_err();
    match err {
        IdentityError::Platform { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, PlatformErrorCode::WeakPassword);
        }
        other => panic!("expected platform error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_password_sign_in_with_second_factor_returns_challenge() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:signInWithPassword"))
        .with_status(200)
        .with_body(
            json!({
                "localId": "uid-1",
                "email": "student@example.com",
                "mfaPendingCredential": "pending-abc",
                "mfaInfo": [{
                    "mfaEnrollmentId": "enrollment-1",
                    "displayName": "Work phone",
                    "phoneInfo": "+*******3210"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = service
        .sign_in_with_password("student@example.com", "secret123")
        .await
        .unwrap();

    match response {
        SignInResponse::MfaRequired(challenge) => {
            assert_eq!(challenge.pending_credential, "pending-abc");
            assert_eq!(challenge.factors.len(), 1);
            assert_eq!(challenge.factors[0].display_name.as_deref(), Some("Work phone"));
        }
        other => panic!("expected MFA challenge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_google_sign_in_posts_id_token() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock("POST", path("/v1/accounts:signInWithIdp"))
        .match_body(Matcher::PartialJson(json!({
            "postBody": "id_token=google-token&providerId=google.com",
            "requestUri": "http://localhost:3000"
        })))
        .with_status(200)
        .with_body(
            json!({
                "idToken": "id-g",
                "refreshToken": "refresh-g",
                "expiresIn": "3600",
                "localId": "uid-g",
                "email": "student@gmail.com",
                "displayName": "Asha",
                "isNewUser": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let credential = IdpCredential::GoogleIdToken("google-token".to_string());
    let response = service
        .sign_in_with_idp(&credential, "http://localhost:3000")
        .await
        .unwrap();

    mock.assert_async().await;
    match response {
        SignInResponse::Complete(signed_in) => {
            assert!(signed_in.is_new_user);
            assert_eq!(signed_in.display_name.as_deref(), Some("Asha"));
            assert_eq!(signed_in.phone_number, None);
        }
        other => panic!("expected completed sign-in, got {:?}", other),
    }
}

#[tokio::test]
async fn test_phone_verification_round() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let send = server
        .mock("POST", path("/v1/accounts:sendVerificationCode"))
        .match_body(Matcher::PartialJson(json!({
            "phoneNumber": "+919876543210",
            "recaptchaToken": "captcha"
        })))
        .with_status(200)
        .with_body(json!({"sessionInfo": "session-1"}).to_string())
        .create_async()
        .await;

    let confirm = server
        .mock("POST", path("/v1/accounts:signInWithPhoneNumber"))
        .match_body(Matcher::PartialJson(json!({
            "sessionInfo": "session-1",
            "code": "123456"
        })))
        .with_status(200)
        .with_body(
            json!({
                "idToken": "id-p",
                "refreshToken": "refresh-p",
                "expiresIn": "3600",
                "localId": "uid-p",
                "phoneNumber": "+919876543210"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let session_info = service
        .send_verification_code("+919876543210", Some("captcha"))
        .await
        .unwrap();
    assert_eq!(session_info, "session-1");

    let signed_in = service.sign_in_with_phone(&session_info, "123456").await.unwrap();
    send.assert_async().await;
    confirm.assert_async().await;
    assert_eq!(signed_in.phone_number.as_deref(), Some("+919876543210"));
    assert_eq!(signed_in.tokens.local_id.as_deref(), Some("uid-p"));
}

#[tokio::test]
async fn test_link_phone_sends_id_token() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock("POST", path("/v1/accounts:signInWithPhoneNumber"))
        .match_body(Matcher::PartialJson(json!({
            "idToken": "id-1",
            "sessionInfo": "session-1",
            "code": "654321"
        })))
        .with_status(200)
        .with_body(
            json!({
                "idToken": "id-2",
                "refreshToken": "refresh-2",
                "expiresIn": "3600",
                "localId": "uid-1",
                "phoneNumber": "+919876543210"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let linked = service.link_phone("id-1", "session-1", "654321").await.unwrap();
    mock.assert_async().await;
    assert_eq!(linked.tokens.id_token, "id-2");
}

#[tokio::test]
async fn test_invalid_code_maps_user_message() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:signInWithPhoneNumber"))
        .with_status(400)
        .with_body(json!({"error": {"message": "INVALID_CODE"}}).to_string())
        .create_async()
        .await;

    let err = service.sign_in_with_phone("session-1", "000000").await.unwrap_err();
    assert_eq!(err.to_string(), "The verification code is incorrect.");
}

#[tokio::test]
async fn test_lookup_returns_first_user() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:lookup"))
        .with_status(200)
        .with_body(
            json!({
                "users": [{
                    "localId": "uid-1",
                    "email": "student@example.com",
                    "emailVerified": false,
                    "providerUserInfo": [{"providerId": "password", "rawId": "student@example.com"}]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let account = service.lookup("id-1").await.unwrap();
    assert_eq!(account.local_id, "uid-1");
    assert!(!account.email_verified);
    assert_eq!(account.providers[0].provider_id, "password");
}

#[tokio::test]
async fn test_lookup_without_users_is_unexpected() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("POST", path("/v1/accounts:lookup"))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let err = service.lookup("id-1").await.unwrap_err();
    assert!(matches!(err, IdentityError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_password_reset_request_type() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock("POST", path("/v1/accounts:sendOobCode"))
        .match_body(Matcher::PartialJson(json!({
            "requestType": "PASSWORD_RESET",
            "email": "student@example.com"
        })))
        .with_status(200)
        .with_body(json!({"email": "student@example.com"}).to_string())
        .create_async()
        .await;

    service.send_password_reset("student@example.com").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_uses_form_encoded_token_endpoint() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock("POST", path("/v1/token"))
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "refresh-1".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "id_token": "id-new",
                "refresh_token": "refresh-new",
                "expires_in": "3600",
                "user_id": "uid-1"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tokens = service.refresh("refresh-1").await.unwrap();
    mock.assert_async().await;
    assert_eq!(tokens.id_token, "id-new");
    assert_eq!(tokens.local_id.as_deref(), Some("uid-1"));
}

#[tokio::test]
async fn test_mfa_enrollment_start_and_finalize() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let start = server
        .mock("POST", path("/v2/accounts/mfaEnrollment:start"))
        .match_body(Matcher::PartialJson(json!({
            "idToken": "id-1",
            "phoneEnrollmentInfo": {"phoneNumber": "+919876543210"}
        })))
        .with_status(200)
        .with_body(json!({"phoneSessionInfo": {"sessionInfo": "enroll-session"}}).to_string())
        .create_async()
        .await;

    let finalize = server
        .mock("POST", path("/v2/accounts/mfaEnrollment:finalize"))
        .match_body(Matcher::PartialJson(json!({
            "phoneVerificationInfo": {"sessionInfo": "enroll-session", "code": "111111"},
            "displayName": "My phone"
        })))
        .with_status(200)
        .with_body(json!({"idToken": "id-mfa", "refreshToken": "refresh-mfa"}).to_string())
        .create_async()
        .await;

    let session_info = service
        .start_mfa_enrollment("id-1", "+919876543210", None)
        .await
        .unwrap();
    let tokens = service
        .finalize_mfa_enrollment("id-1", &session_info, "111111", Some("My phone"))
        .await
        .unwrap();

    start.assert_async().await;
    finalize.assert_async().await;
    assert_eq!(tokens.id_token, "id-mfa");
    assert_eq!(tokens.local_id, None);
}

#[tokio::test]
async fn test_mfa_sign_in_start_and_finalize() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _start = server
        .mock("POST", path("/v2/accounts/mfaSignIn:start"))
        .match_body(Matcher::PartialJson(json!({
            "mfaPendingCredential": "pending-abc",
            "mfaEnrollmentId": "enrollment-1"
        })))
        .with_status(200)
        .with_body(json!({"phoneResponseInfo": {"sessionInfo": "mfa-session"}}).to_string())
        .create_async()
        .await;

    let _finalize = server
        .mock("POST", path("/v2/accounts/mfaSignIn:finalize"))
        .with_status(200)
        .with_body(json!({"idToken": "id-2fa", "refreshToken": "refresh-2fa"}).to_string())
        .create_async()
        .await;

    let session_info = service
        .start_mfa_sign_in("pending-abc", "enrollment-1", None)
        .await
        .unwrap();
    assert_eq!(session_info, "mfa-session");

    let tokens = service
        .finalize_mfa_sign_in("pending-abc", &session_info, "222222")
        .await
        .unwrap();
    assert_eq!(tokens.id_token, "id-2fa");
}

#[tokio::test]
async fn test_set_document_merges_listed_fields() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let mock = server
        .mock(
            "PATCH",
            path("/v1/projects/techmatch-test/databases/(default)/documents/users/uid-1"),
        )
        .match_header("authorization", "Bearer id-1")
        // Repeated keys, so match the raw query rather than decoded pairs
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex(r"(^|&)updateMask\.fieldPaths=uid(&|$)".into()),
            Matcher::Regex(r"(^|&)updateMask\.fieldPaths=acceptedTOS(&|$)".into()),
        ]))
        .match_body(Matcher::Json(json!({
            "fields": {
                "uid": {"stringValue": "uid-1"},
                "acceptedTOS": {"booleanValue": true}
            }
        })))
        .with_status(200)
        .with_body(json!({"name": "projects/techmatch-test/databases/(default)/documents/users/uid-1"}).to_string())
        .create_async()
        .await;

    let fields = json!({"uid": "uid-1", "acceptedTOS": true});
    service
        .set_document("users", "uid-1", fields.as_object().unwrap(), "id-1")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_missing_document_is_none() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("GET", path("/v1/projects/techmatch-test/databases/(default)/documents/users/nobody"))
        .with_status(404)
        .with_body(json!({"error": {"code": 404, "message": "NOT_FOUND"}}).to_string())
        .create_async()
        .await;

    let document = service.get_document("users", "nobody", "id-1").await.unwrap();
    assert!(document.is_none());
}

#[tokio::test]
async fn test_get_document_decodes_fields() {
    let mut server = Server::new_async().await;
    let service = create_test_service(&server);

    let _mock = server
        .mock("GET", path("/v1/projects/techmatch-test/databases/(default)/documents/users/uid-1"))
        .with_status(200)
        .with_body(
            json!({
                "name": "projects/techmatch-test/databases/(default)/documents/users/uid-1",
                "fields": {
                    "role": {"stringValue": "student"},
                    "acceptedTOS": {"booleanValue": true}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let document = service
        .get_document("users", "uid-1", "id-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(document["role"], json!("student"));
    assert_eq!(document["acceptedTOS"], json!(true));
}
