//! UI state machines shared by layout components
//!
//! Kept free of Dioxus types so the timing rules can be unit tested.

/// `sessionStorage` key marking the intro as seen for this browser session
pub const INTRO_SEEN_KEY: &str = "techmatch_intro_seen";

/// Grace period after the intro video fails before moving on
pub const INTRO_ERROR_GRACE_MS: u32 = 2_000;

/// Give up on the intro video if it has not loaded by then
pub const INTRO_FALLBACK_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IntroPhase {
    #[default]
    Loading,
    Playing,
    /// Video failed; waiting out the grace period
    Failed,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEvent {
    CanPlay,
    Skip,
    Ended,
    VideoError,
    ErrorGraceElapsed,
    FallbackElapsed,
}

impl IntroPhase {
    pub fn on(self, event: IntroEvent) -> IntroPhase {
        use IntroEvent::*;
        use IntroPhase::*;

        match (self, event) {
            (Done, _) => Done,
            (_, Skip) | (_, Ended) => Done,
            (Loading, CanPlay) => Playing,
            (Loading | Playing, VideoError) => Failed,
            (Failed, ErrorGraceElapsed) => Done,
            // The fallback only fires for a video that never became playable
            (Loading, FallbackElapsed) => Done,
            (phase, _) => phase,
        }
    }

    pub fn is_done(self) -> bool {
        self == IntroPhase::Done
    }

    pub fn is_loading(self) -> bool {
        self == IntroPhase::Loading
    }
}

/// Interval between automatic carousel advances
pub const CAROUSEL_INTERVAL_MS: u32 = 4_000;

/// Next slide: the first item moves to the back
pub fn rotate_next<T>(items: &mut [T]) {
    if !items.is_empty() {
        items.rotate_left(1);
    }
}

/// Previous slide: the last item moves to the front
pub fn rotate_prev<T>(items: &mut [T]) {
    if !items.is_empty() {
        items.rotate_right(1);
    }
}

/// What can try to dismiss the promo modal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissAttempt {
    CloseButton,
    EscapeKey,
    OverlayClick,
    OtherKey,
}

pub fn modal_should_close(attempt: DismissAttempt) -> bool {
    matches!(attempt, DismissAttempt::CloseButton | DismissAttempt::EscapeKey)
}
