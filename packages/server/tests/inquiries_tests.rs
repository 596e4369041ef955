//! Integration tests for the contact and booking forms.

mod common;

use common::{TestHarness, BOOKING_WEBHOOK, CONTACT_WEBHOOK};
use serde_json::json;
use server_core::config::SiteSettings;
use server_core::domains::inquiries::actions::submit::{BOOKING_FAILED_MESSAGE, CONTACT_FAILED_MESSAGE};
use server_core::kernel::test_dependencies::{
    MockIdentityProvider, MockProfileStore, MockWebhookClient,
};
use test_context::test_context;

const RESULT_FIELDS: &str = "success message fallbackMailto errors { field message }";

fn contact_mutation(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        r#"mutation {{ submitContact(input: {{ name: "{}", email: "{}", phone: "+91 90000 00000", subject: "{}", message: "{}" }}) {{ {} }} }}"#,
        name, email, subject, message, RESULT_FIELDS
    )
}

fn booking_mutation(name: &str, message: &str) -> String {
    format!(
        r#"mutation {{ submitBooking(input: {{ name: "{}", email: "parent@example.com", preferredDateTime: "2026-11-02T10:30", message: "{}" }}) {{ {} }} }}"#,
        name, message, RESULT_FIELDS
    )
}

// ============================================================================
// Contact
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn valid_contact_is_posted_to_webhook(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(&contact_mutation(
            "Asha",
            "asha@example.com",
            "Admissions",
            "Need help shortlisting colleges",
        ))
        .await;

    assert_eq!(data["submitContact"]["success"], json!(true));
    assert_eq!(data["submitContact"]["errors"], json!([]));

    let calls = ctx.webhooks.calls();
    assert_eq!(calls.len(), 1);
    let (url, payload) = &calls[0];
    assert_eq!(url, CONTACT_WEBHOOK);
    assert_eq!(payload["user_name"], json!("Asha"));
    assert_eq!(payload["user_email"], json!("asha@example.com"));
    assert_eq!(payload["source"], json!("techmatch-website-contact"));
    assert!(payload["submitted_at"].as_str().unwrap().ends_with('Z'));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_contact_reports_field_errors_without_posting(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(&contact_mutation("", "asha@", "", "short"))
        .await;

    assert_eq!(data["submitContact"]["success"], json!(false));
    let fields: Vec<&str> = data["submitContact"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "subject", "message"]);
    assert!(ctx.webhooks.calls().is_empty());
}

#[tokio::test]
async fn failed_contact_delivery_offers_mailto_fallback() {
    let ctx = TestHarness::with_mocks(
        MockIdentityProvider::new(),
        MockProfileStore::new(),
        MockWebhookClient::failing(),
    );

    let data = ctx
        .graphql()
        .query(&contact_mutation(
            "Asha",
            "asha@example.com",
            "Admissions",
            "Need help shortlisting colleges",
        ))
        .await;

    let result = &data["submitContact"];
    assert_eq!(result["success"], json!(false));
    assert_eq!(result["errors"][0]["field"], json!("submit"));
    assert_eq!(result["errors"][0]["message"], json!(CONTACT_FAILED_MESSAGE));
    let mailto = result["fallbackMailto"].as_str().unwrap();
    assert!(mailto.starts_with("mailto:techmatch2k25@gmail.com?subject=Admissions"));
}

#[tokio::test]
async fn plain_http_webhook_is_refused() {
    let site = SiteSettings {
        contact_webhook_url: Some("http://hooks.example.com/contact".to_string()),
        booking_webhook_url: None,
        ..SiteSettings::default()
    };
    let ctx = TestHarness::with_site(
        MockIdentityProvider::new(),
        MockProfileStore::new(),
        MockWebhookClient::new(),
        site,
    );

    let data = ctx
        .graphql()
        .query(&contact_mutation(
            "Asha",
            "asha@example.com",
            "Admissions",
            "Need help shortlisting colleges",
        ))
        .await;
    assert_eq!(
        data["submitContact"]["errors"][0]["message"],
        json!("Invalid webhook URL. Please configure CONTACT_WEBHOOK_URL (https).")
    );

    let data = ctx
        .graphql()
        .query(&booking_mutation("Ravi", "Career planning for my son"))
        .await;
    assert_eq!(
        data["submitBooking"]["errors"][0]["message"],
        json!("Invalid webhook URL. Please configure BOOKING_WEBHOOK_URL (https).")
    );
    assert!(ctx.webhooks.calls().is_empty());
}

// ============================================================================
// Booking
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn booking_defaults_session_duration(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(&booking_mutation("Ravi", "Career planning for my son"))
        .await;

    assert_eq!(data["submitBooking"]["success"], json!(true));

    let calls = ctx.webhooks.calls();
    let (url, payload) = &calls[0];
    assert_eq!(url, BOOKING_WEBHOOK);
    assert_eq!(payload["sessionDuration"], json!("30 minutes"));
    assert_eq!(payload["preferredDateTime"], json!("2026-11-02T10:30"));
    assert_eq!(payload["phone"], json!(""));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn booking_needs_a_project_summary(ctx: &TestHarness) {
    let data = ctx.graphql().query(&booking_mutation("Ravi", "short")).await;

    assert_eq!(data["submitBooking"]["success"], json!(false));
    assert_eq!(
        data["submitBooking"]["errors"][0]["message"],
        json!("Add a brief project summary (10+ characters)")
    );
    assert!(ctx.webhooks.calls().is_empty());
}

#[tokio::test]
async fn failed_booking_delivery_points_to_contact() {
    let ctx = TestHarness::with_mocks(
        MockIdentityProvider::new(),
        MockProfileStore::new(),
        MockWebhookClient::failing(),
    );

    let data = ctx
        .graphql()
        .query(&booking_mutation("Ravi", "Career planning for my son"))
        .await;

    assert_eq!(data["submitBooking"]["success"], json!(false));
    assert_eq!(
        data["submitBooking"]["errors"][0]["message"],
        json!(BOOKING_FAILED_MESSAGE)
    );
    assert!(data["submitBooking"]["fallbackMailto"].is_null());
}
