use dioxus::prelude::*;

use super::sleep_ms;
use crate::state::{rotate_next, rotate_prev, CAROUSEL_INTERVAL_MS};

const SLIDES: [&str; 6] = [
    "https://images.unsplash.com/photo-1552664730-d307ca884978?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1552664730-d307ca884978?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=800&h=600&fit=crop",
];

/// Image strip that advances every few seconds
#[component]
pub fn Carousel() -> Element {
    // (slide id, image) so keys survive rotation
    let mut items = use_signal(|| SLIDES.iter().copied().enumerate().collect::<Vec<_>>());

    use_future(move || async move {
        loop {
            sleep_ms(CAROUSEL_INTERVAL_MS).await;
            rotate_next(&mut items.write());
        }
    });

    rsx! {
        section {
            class: "relative mx-auto max-w-7xl overflow-hidden px-4 py-8 sm:px-6",
            div {
                class: "flex gap-4 transition-transform duration-700",
                for (i, (id, image)) in items().into_iter().enumerate() {
                    div {
                        key: "{id}",
                        class: if i == 0 {
                            "h-72 w-2/3 shrink-0 overflow-hidden rounded-2xl ring-2 ring-orange-500"
                        } else {
                            "h-72 w-1/4 shrink-0 overflow-hidden rounded-2xl opacity-60"
                        },
                        img { class: "h-full w-full object-cover", src: "{image}", alt: "" }
                    }
                }
            }
            div {
                class: "mt-4 flex justify-center gap-4",
                button {
                    class: "rounded-full border border-white/30 px-4 py-2 text-white hover:border-orange-500",
                    "aria-label": "Previous slide",
                    onclick: move |_| rotate_prev(&mut items.write()),
                    "\u{2190}"
                }
                button {
                    class: "rounded-full border border-white/30 px-4 py-2 text-white hover:border-orange-500",
                    "aria-label": "Next slide",
                    onclick: move |_| rotate_next(&mut items.write()),
                    "\u{2192}"
                }
            }
        }
    }
}
