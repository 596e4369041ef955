//! Chrome around every page

use dioxus::prelude::*;

use super::{intro_seen, Footer, HexagonBackground, IntroSplash, Navbar, PointerInput, WhatsAppButton};
use crate::pages::public::fetch_contact_info;
use crate::routes::Route;

#[component]
pub fn SiteLayout() -> Element {
    let mut pointer = use_signal(PointerInput::default);
    let mut show_intro = use_signal(|| false);
    let contact = use_server_future(fetch_contact_info)?;

    // sessionStorage only exists after hydration
    use_effect(move || {
        if !intro_seen() {
            show_intro.set(true);
        }
    });

    let contact = contact.value().as_ref().and_then(|r| r.as_ref().ok().cloned());
    let whatsapp_url = contact.as_ref().map(|c| c.whatsapp_url.clone());

    rsx! {
        div {
            class: "relative min-h-screen text-white",
            onmousemove: move |e| {
                let point = e.client_coordinates();
                pointer.set(PointerInput::At { x: point.x, y: point.y });
            },
            onmouseleave: move |_| pointer.set(PointerInput::Left),

            HexagonBackground { pointer }

            if show_intro() {
                IntroSplash { on_complete: move |_| show_intro.set(false) }
            } else {
                Navbar {}
                main {
                    class: "relative",
                    Outlet::<Route> {}
                }
                Footer { contact }
                if let Some(url) = whatsapp_url {
                    WhatsAppButton { url }
                }
            }
        }
    }
}
