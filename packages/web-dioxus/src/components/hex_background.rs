//! Animated hexagon canvas fixed behind the page

use dioxus::prelude::*;

const CANVAS_ID: &str = "hexfield";

/// Latest pointer state reported by the layout
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum PointerInput {
    #[default]
    Idle,
    At { x: f64, y: f64 },
    Left,
}

#[component]
pub fn HexagonBackground(pointer: ReadOnlySignal<PointerInput>) -> Element {
    #[cfg(feature = "web")]
    use_future(move || crate::hexfield::canvas::run(CANVAS_ID, pointer));

    #[cfg(not(feature = "web"))]
    let _ = pointer;

    rsx! {
        canvas {
            id: CANVAS_ID,
            class: "fixed inset-0 -z-10 w-full h-full pointer-events-none bg-black",
            "aria-hidden": "true",
        }
    }
}
