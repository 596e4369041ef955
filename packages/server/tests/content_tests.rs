//! Integration tests for the public content and admissions queries.

mod common;

use common::TestHarness;
use serde_json::json;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn services_include_their_detail_pages(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query("{ services { id title features color overview process { step title } } }")
        .await;

    let services = data["services"].as_array().unwrap();
    let ids: Vec<&str> = services.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["admissions", "counselling", "freelance"]);

    for service in services {
        assert!(!service["overview"].as_str().unwrap().is_empty());
        assert!(!service["features"].as_array().unwrap().is_empty());
        assert_eq!(service["process"][0]["step"], json!(1));
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_service_is_null(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(r#"{ known: service(id: "counselling") { id } missing: service(id: "catering") { id } }"#)
        .await;

    assert_eq!(data["known"]["id"], json!("counselling"));
    assert!(data["missing"].is_null());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn testimonials_are_rated_within_five_stars(ctx: &TestHarness) {
    let data = ctx.graphql().query("{ testimonials { name rating } }").await;

    let testimonials = data["testimonials"].as_array().unwrap();
    assert_eq!(testimonials.len(), 6);
    assert!(testimonials
        .iter()
        .all(|t| (1..=5).contains(&t["rating"].as_i64().unwrap())));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn contact_info_builds_whatsapp_link(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query("{ contactInfo { email phone whatsappNumber whatsappUrl } }")
        .await;

    let info = &data["contactInfo"];
    assert_eq!(info["email"], json!("techmatch2k25@gmail.com"));
    assert!(info["whatsappUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/919392423955?text=Hi%20TechMatch"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn all_section_lists_every_college(ctx: &TestHarness) {
    let data = ctx.graphql().query("{ colleges { total colleges { id image } } }").await;

    assert_eq!(data["colleges"]["total"], json!(25));
    let colleges = data["colleges"]["colleges"].as_array().unwrap();
    assert!(colleges
        .iter()
        .all(|c| c["image"].as_str().unwrap().starts_with("https://")));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn telangana_section_and_search_combine(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query("{ colleges(section: UNIVERSITIES_IN_TELANGANA) { total } }")
        .await;
    assert_eq!(data["colleges"]["total"], json!(9));

    let data = ctx
        .graphql()
        .query(r#"{ colleges(section: NORTH_UNIVERSITIES, query: "  DELHI ") { total colleges { name } } }"#)
        .await;
    let names: Vec<&str> = data["colleges"]["colleges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["IIT Delhi", "Delhi University"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_without_matches_is_empty(ctx: &TestHarness) {
    let data = ctx
        .graphql()
        .query(r#"{ colleges(query: "zzz-no-such-college") { total colleges { id } } }"#)
        .await;

    assert_eq!(data["colleges"]["total"], json!(0));
    assert_eq!(data["colleges"]["colleges"], json!([]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn college_sections_start_with_all(ctx: &TestHarness) {
    let data = ctx.graphql().query("{ collegeSections { section label } }").await;

    let sections = data["collegeSections"].as_array().unwrap();
    assert_eq!(sections.len(), 6);
    assert_eq!(sections[0]["section"], json!("ALL"));
    assert_eq!(sections[3]["label"], json!("Universities in Telangana"));
}
