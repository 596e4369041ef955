use chrono::{DateTime, SecondsFormat, Utc};
use identity::{AccountInfo, ProviderInfo};
use serde_json::{json, Map, Value};

/// Role written for accounts created through the sign-up form
pub const DEFAULT_ROLE: &str = "student";

/// Denormalized profile document kept at `users/{uid}`
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub providers: Vec<ProviderInfo>,
    pub last_seen: DateTime<Utc>,
    pub sign_up: Option<SignUpFields>,
}

/// Extra fields written once, when the account is created from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpFields {
    pub role: String,
    pub accepted_tos: bool,
}

impl UserProfile {
    pub fn from_account(account: &AccountInfo) -> Self {
        Self {
            uid: account.local_id.clone(),
            email: account.email.clone(),
            phone_number: account.phone_number.clone(),
            display_name: account.display_name.clone(),
            photo_url: account.photo_url.clone(),
            providers: account.providers.clone(),
            last_seen: Utc::now(),
            sign_up: None,
        }
    }

    pub fn with_sign_up(mut self, accepted_tos: bool) -> Self {
        self.sign_up = Some(SignUpFields {
            role: DEFAULT_ROLE.to_string(),
            accepted_tos,
        });
        self
    }

    /// Top-level fields to merge into the document. Missing values are
    /// written as null so stale data is cleared.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("uid".into(), json!(self.uid));
        fields.insert("email".into(), json!(self.email));
        fields.insert("phoneNumber".into(), json!(self.phone_number));
        fields.insert("displayName".into(), json!(self.display_name));
        fields.insert("photoURL".into(), json!(self.photo_url));
        fields.insert(
            "providerData".into(),
            Value::Array(self.providers.iter().map(provider_fields).collect()),
        );
        fields.insert(
            "lastSeen".into(),
            json!(self.last_seen.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        if let Some(sign_up) = &self.sign_up {
            fields.insert("role".into(), json!(sign_up.role));
            fields.insert("acceptedTOS".into(), json!(sign_up.accepted_tos));
        }

        fields
    }
}

fn provider_fields(provider: &ProviderInfo) -> Value {
    json!({
        "providerId": provider.provider_id,
        "uid": provider.uid,
        "email": provider.email,
        "displayName": provider.display_name,
        "photoURL": provider.photo_url,
        "phoneNumber": provider.phone_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountInfo {
        AccountInfo {
            local_id: "uid-1".to_string(),
            email: Some("student@example.com".to_string()),
            email_verified: true,
            display_name: Some("Asha".to_string()),
            providers: vec![ProviderInfo {
                provider_id: "password".to_string(),
                uid: Some("student@example.com".to_string()),
                email: Some("student@example.com".to_string()),
                display_name: None,
                photo_url: None,
                phone_number: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_fields_include_nulls_for_missing_values() {
        let fields = UserProfile::from_account(&account()).to_fields();

        assert_eq!(fields["uid"], json!("uid-1"));
        assert_eq!(fields["email"], json!("student@example.com"));
        assert_eq!(fields["phoneNumber"], Value::Null);
        assert_eq!(fields["photoURL"], Value::Null);
        assert_eq!(fields["providerData"][0]["providerId"], json!("password"));
        assert!(fields["lastSeen"].as_str().unwrap().ends_with('Z'));
        assert!(!fields.contains_key("role"));
    }

    #[test]
    fn test_sign_up_fields() {
        let fields = UserProfile::from_account(&account())
            .with_sign_up(true)
            .to_fields();

        assert_eq!(fields["role"], json!("student"));
        assert_eq!(fields["acceptedTOS"], json!(true));
    }
}
