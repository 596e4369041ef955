//! Reusable UI components

mod auth_forms;
mod carousel;
mod footer;
mod hex_background;
mod intro;
mod layout;
mod loading;
mod navbar;
mod promo_modal;
mod recaptcha;
mod timer;
mod whatsapp;

pub use auth_forms::*;
pub use carousel::*;
pub use footer::*;
pub use hex_background::*;
pub use intro::*;
pub use layout::*;
pub use loading::*;
pub use navbar::*;
pub use promo_modal::*;
pub use recaptcha::*;
pub use timer::*;
pub use whatsapp::*;
