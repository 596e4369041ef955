//! Logo video shown before the site on a browser session's first visit

use dioxus::prelude::*;

use super::sleep_ms;
use crate::state::{IntroEvent, IntroPhase, INTRO_ERROR_GRACE_MS, INTRO_FALLBACK_MS};
#[cfg(feature = "web")]
use crate::state::INTRO_SEEN_KEY;

const INTRO_VIDEO: &str = "/assets/intro.mp4";

/// Whether this browser session already watched the intro
pub fn intro_seen() -> bool {
    #[cfg(feature = "web")]
    {
        web_sys::window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item(INTRO_SEEN_KEY).ok().flatten())
            .is_some_and(|v| v == "true")
    }

    #[cfg(not(feature = "web"))]
    {
        true
    }
}

fn mark_intro_seen() {
    #[cfg(feature = "web")]
    if let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten()) {
        if storage.set_item(INTRO_SEEN_KEY, "true").is_err() {
            tracing::warn!("Could not record intro as seen");
        }
    }
}

#[component]
pub fn IntroSplash(on_complete: EventHandler<()>) -> Element {
    let mut phase = use_signal(IntroPhase::default);

    let mut send = move |event: IntroEvent| {
        let next = phase.peek().on(event);
        phase.set(next);
    };

    // Give up on a video that never loads
    use_future(move || async move {
        sleep_ms(INTRO_FALLBACK_MS).await;
        send(IntroEvent::FallbackElapsed);
    });

    use_effect(move || {
        if phase().is_done() {
            mark_intro_seen();
            on_complete.call(());
        }
    });

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-black",
            if phase().is_loading() {
                div {
                    class: "absolute inset-0 flex items-center justify-center text-gray-400",
                    "Loading..."
                }
            }
            video {
                class: "h-full w-full object-contain",
                src: INTRO_VIDEO,
                autoplay: true,
                muted: true,
                playsinline: true,
                preload: "auto",
                oncanplay: move |_| send(IntroEvent::CanPlay),
                onplay: move |_| send(IntroEvent::CanPlay),
                onended: move |_| send(IntroEvent::Ended),
                onerror: move |_| {
                    tracing::warn!("Intro video failed to load");
                    send(IntroEvent::VideoError);
                    spawn(async move {
                        sleep_ms(INTRO_ERROR_GRACE_MS).await;
                        send(IntroEvent::ErrorGraceElapsed);
                    });
                },
            }
            button {
                class: "absolute bottom-8 right-8 rounded-lg border border-white/40 px-4 py-2 text-sm text-white hover:bg-white/10",
                onclick: move |_| send(IntroEvent::Skip),
                "Skip Intro"
            }
        }
    }
}
