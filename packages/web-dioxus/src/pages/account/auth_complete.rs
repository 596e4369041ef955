//! Landing page for the API's Google redirect

use dioxus::prelude::*;

use super::AuthCard;
use crate::auth::{complete_google_sign_in, error_text, use_auth};
use crate::components::{ErrorBanner, LoadingSpinner, MfaChallengeForm, PhoneLinkForm, SuccessBanner};
use crate::routes::Route;
use crate::types::{MfaChallenge, MfaFactor, NextStep};

/// Readable text for the `?error=` codes the API redirects with
pub fn describe_google_error(code: &str) -> String {
    match code {
        "oauth_not_configured" => "Google sign-in is not available right now.".to_string(),
        "invalid_state" => "The sign-in link expired. Please try again.".to_string(),
        "missing_code" | "token_exchange_failed" => {
            "Google did not complete the sign-in. Please try again.".to_string()
        }
        "sign_in_failed" => "We could not sign you in with Google.".to_string(),
        "access_denied" => "Google sign-in was cancelled.".to_string(),
        other => format!("Google sign-in failed ({other})."),
    }
}

#[component]
pub fn AuthComplete(
    token: String,
    next: String,
    error: String,
    pending: String,
    enrollment: String,
) -> Element {
    let mut auth = use_auth();
    let navigator = use_navigator();
    let mut failure = use_signal(|| None::<String>);
    let mut linking = use_signal(|| false);

    let needs_phone = next == NextStep::LinkPhone.as_str();
    let session_token = token.clone();
    use_effect(move || {
        if session_token.is_empty() {
            return;
        }
        let token = session_token.clone();
        spawn(async move {
            match complete_google_sign_in(token).await {
                Ok(user) => {
                    auth.signed_in(user);
                    if needs_phone {
                        linking.set(true);
                    } else {
                        navigator.replace(Route::Home {});
                    }
                }
                Err(e) => failure.set(Some(error_text(&e))),
            }
        });
    });

    if !error.is_empty() {
        return rsx! {
            AuthCard { title: "Sign-in failed", subtitle: "Google sign-in",
                ErrorBanner { message: describe_google_error(&error) }
                Link { to: Route::SignIn {}, class: "block text-center text-orange-400 hover:underline", "Back to sign in" }
            }
        };
    }

    if next == NextStep::MfaRequired.as_str() && !pending.is_empty() {
        let challenge = MfaChallenge {
            pending_credential: pending,
            factors: vec![MfaFactor {
                enrollment_id: enrollment,
                display_name: None,
                phone_hint: None,
            }],
        };
        return rsx! {
            AuthCard { title: "Two-step verification", subtitle: "One more step to finish signing in",
                MfaChallengeForm {
                    challenge,
                    on_signed_in: move |user| {
                        auth.signed_in(user);
                        navigator.replace(Route::Home {});
                    },
                }
            }
        };
    }

    let body = if let Some(message) = failure() {
        rsx! {
            ErrorBanner { message }
            Link { to: Route::SignIn {}, class: "block text-center text-orange-400 hover:underline", "Back to sign in" }
        }
    } else if linking() {
        rsx! {
            SuccessBanner { message: "Google sign-in successful. Please link your phone number for account recovery." }
            PhoneLinkForm {
                on_linked: move |user| {
                    auth.signed_in(user);
                    navigator.replace(Route::Home {});
                },
            }
        }
    } else if token.is_empty() {
        rsx! {
            ErrorBanner { message: "Nothing to complete here." }
            Link { to: Route::SignIn {}, class: "block text-center text-orange-400 hover:underline", "Back to sign in" }
        }
    } else {
        rsx! {
            LoadingSpinner {}
        }
    };

    rsx! {
        AuthCard { title: "Signing you in", subtitle: "Google sign-in",
            {body}
        }
    }
}
