//! Invisible reCAPTCHA gate in front of every request that texts a code
//!
//! The widget script is injected on first use and rendered into a slot the
//! calling form owns. No site key configured means the API runs against an
//! emulator or test project and no token is sent.

use dioxus::prelude::*;
use serde::Deserialize;

use crate::auth::{error_text, recaptcha_site_key};

pub const CAPTCHA_FAILED: &str = "Captcha verification failed. Please try again.";

const RENDER_SCRIPT: &str = r#"
const siteKey = await dioxus.recv();
const slotId = await dioxus.recv();
try {
    if (!window.grecaptcha || !window.grecaptcha.render) {
        await new Promise((resolve, reject) => {
            window.__onRecaptchaLoad = resolve;
            const script = document.createElement("script");
            script.src = "https://www.google.com/recaptcha/api.js?onload=__onRecaptchaLoad&render=explicit";
            script.async = true;
            script.onerror = () => reject("script failed to load");
            document.head.appendChild(script);
        });
    }
    const token = await new Promise((resolve, reject) => {
        const holder = document.getElementById(slotId);
        if (!holder) {
            reject("missing slot " + slotId);
            return;
        }
        holder.innerHTML = "";
        const target = document.createElement("div");
        holder.appendChild(target);
        const widget = grecaptcha.render(target, {
            sitekey: siteKey,
            size: "invisible",
            callback: resolve,
            "expired-callback": () => reject("expired"),
            "error-callback": () => reject("error"),
        });
        grecaptcha.execute(widget);
    });
    dioxus.send({ ok: token });
} catch (e) {
    dioxus.send({ err: String(e) });
}
"#;

/// What the widget script reports back
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum CaptchaOutcome {
    Ok(String),
    Err(String),
}

impl CaptchaOutcome {
    fn into_token(self) -> Result<String, String> {
        match self {
            CaptchaOutcome::Ok(token) if !token.is_empty() => Ok(token),
            CaptchaOutcome::Ok(_) => Err(CAPTCHA_FAILED.to_string()),
            CaptchaOutcome::Err(reason) => {
                tracing::warn!(reason = %reason, "reCAPTCHA did not produce a token");
                Err(CAPTCHA_FAILED.to_string())
            }
        }
    }
}

/// Container the widget renders into; ids must be unique per page
#[component]
pub fn RecaptchaSlot(id: &'static str) -> Element {
    rsx! {
        div { id, class: "recaptcha-slot" }
    }
}

/// Solve the invisible challenge in `slot_id`, or `None` when captcha is off
pub async fn recaptcha_token(slot_id: &str) -> Result<Option<String>, String> {
    let Some(site_key) = recaptcha_site_key().await.map_err(|e| error_text(&e))? else {
        return Ok(None);
    };

    let mut eval = document::eval(RENDER_SCRIPT);
    eval.send(site_key).map_err(|_| CAPTCHA_FAILED.to_string())?;
    eval.send(slot_id.to_string())
        .map_err(|_| CAPTCHA_FAILED.to_string())?;

    let outcome: CaptchaOutcome = eval.recv().await.map_err(|e| {
        tracing::warn!(error = ?e, "reCAPTCHA script failed");
        CAPTCHA_FAILED.to_string()
    })?;

    outcome.into_token().map(Some)
}
