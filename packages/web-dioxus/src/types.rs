//! Type definitions for GraphQL API responses

use serde::{Deserialize, Serialize};

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSection {
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub tagline: String,
    pub summary: String,
    pub features: Vec<String>,
    pub color: String,
    pub overview: String,
    pub sections: Vec<DetailSection>,
    pub stats: Vec<Stat>,
    pub process: Vec<ProcessStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub company: String,
    pub text: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCategory {
    pub name: String,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub company: String,
    pub challenge: String,
    pub solution: String,
    pub result: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clients {
    pub categories: Vec<ClientCategory>,
    pub case_studies: Vec<CaseStudy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub whatsapp_number: String,
    pub whatsapp_url: String,
}

// ============================================================================
// Admissions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollegeSection {
    #[default]
    All,
    CollegesInBangalore,
    UniversitiesInBangalore,
    UniversitiesInTelangana,
    UniversitiesInChennai,
    NorthUniversities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeSectionTab {
    pub section: CollegeSection,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub category: String,
    pub city: String,
    pub description: String,
    pub image: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeList {
    pub total: i32,
    pub colleges: Vec<College>,
}

// ============================================================================
// Inquiries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResult {
    pub success: bool,
    pub errors: Vec<FieldError>,
    pub fallback_mailto: Option<String>,
    pub message: Option<String>,
}

impl InquiryResult {
    /// Message for a field, if the server rejected it
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextStep {
    Done,
    LinkPhone,
    MfaRequired,
}

impl NextStep {
    /// Wire name, as it appears in redirect query strings
    pub fn as_str(self) -> &'static str {
        match self {
            NextStep::Done => "DONE",
            NextStep::LinkPhone => "LINK_PHONE",
            NextStep::MfaRequired => "MFA_REQUIRED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaFactor {
    pub enrollment_id: String,
    pub display_name: Option<String>,
    pub phone_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaChallenge {
    pub pending_credential: String,
    pub factors: Vec<MfaFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    pub providers: Vec<String>,
    pub mfa_factors: Vec<MfaFactor>,
}

/// Raw `AuthPayload` as the API returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: Option<String>,
    pub next_step: NextStep,
    pub message: Option<String>,
    pub user: Option<Viewer>,
    pub mfa: Option<MfaChallenge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verification_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
}

/// Signed-in user as kept in the web session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Name for the navbar greeting
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .or_else(|| self.phone_number.clone())
            .unwrap_or_else(|| "Account".to_string())
    }
}

/// What a page should do after an auth server function; the JWT itself stays
/// in the server-side session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStep {
    pub next_step: NextStep,
    pub message: Option<String>,
    pub user: Option<AuthUser>,
    pub mfa: Option<MfaChallenge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_payload_parses_mfa_challenge() {
        let payload: AuthPayload = serde_json::from_value(serde_json::json!({
            "token": null,
            "nextStep": "MFA_REQUIRED",
            "message": null,
            "user": null,
            "mfa": {
                "pendingCredential": "pending-1",
                "factors": [{ "enrollmentId": "f1", "displayName": null, "phoneHint": "+91******55" }]
            }
        }))
        .unwrap();

        assert_eq!(payload.next_step, NextStep::MfaRequired);
        assert_eq!(payload.next_step.as_str(), "MFA_REQUIRED");
        let mfa = payload.mfa.unwrap();
        assert_eq!(mfa.factors[0].enrollment_id, "f1");
    }

    #[test]
    fn college_section_uses_graphql_enum_names() {
        let json = serde_json::to_string(&CollegeSection::UniversitiesInTelangana).unwrap();
        assert_eq!(json, "\"UNIVERSITIES_IN_TELANGANA\"");
    }

    #[test]
    fn inquiry_result_finds_field_errors() {
        let result = InquiryResult {
            success: false,
            errors: vec![FieldError {
                field: "email".into(),
                message: "Please enter a valid email".into(),
            }],
            fallback_mailto: None,
            message: None,
        };

        assert_eq!(result.error_for("email"), Some("Please enter a valid email"));
        assert_eq!(result.error_for("name"), None);
    }

    #[test]
    fn user_label_prefers_display_name() {
        let mut user = AuthUser {
            uid: "u1".into(),
            email: Some("a@b.com".into()),
            phone_number: None,
            email_verified: true,
            display_name: Some("Asha".into()),
        };
        assert_eq!(user.label(), "Asha");
        user.display_name = None;
        assert_eq!(user.label(), "a@b.com");
    }
}
