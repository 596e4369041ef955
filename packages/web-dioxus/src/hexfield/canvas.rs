//! Browser painter for [`HexField`].

use dioxus::prelude::*;
use js_sys::Promise;
use rand::{rngs::StdRng, SeedableRng};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::{frame_delta, HexField, CONNECTION_STROKE};
use crate::components::PointerInput;

/// Resolves with the timestamp of the next animation frame
async fn next_frame(window: &Window) -> Result<f64, JsValue> {
    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = window.request_animation_frame(&resolve) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    let stamp = JsFuture::from(promise).await?;
    Ok(stamp.as_f64().unwrap_or_default())
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or_default();
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or_default();
    (width, height)
}

fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) {
    let dpr = window.device_pixel_ratio().max(1.0);
    let (width, height) = viewport(window);
    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
        tracing::warn!("Canvas transform rejected: {:?}", e);
    }
}

fn paint(ctx: &CanvasRenderingContext2d, field: &HexField) {
    let (width, height) = field.size();

    ctx.save();
    ctx.set_global_alpha(0.7);
    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.restore();

    ctx.save();
    let _ = ctx.translate(0.5, 0.5);

    ctx.set_stroke_style_str(CONNECTION_STROKE);
    ctx.set_line_width(1.0);
    for (a, b) in field.segments() {
        ctx.begin_path();
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.stroke();
    }

    ctx.set_line_width(1.2);
    for node in field.nodes() {
        ctx.set_stroke_style_str(node.color);
        let outline = node.outline(field.radius());
        ctx.begin_path();
        ctx.move_to(outline[0].x, outline[0].y);
        for vertex in &outline[1..] {
            ctx.line_to(vertex.x, vertex.y);
        }
        ctx.close_path();
        ctx.stroke();
    }

    ctx.restore();
}

/// Animate the canvas with the given element id until the page goes away
pub async fn run(canvas_id: &'static str, pointer: ReadOnlySignal<PointerInput>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = window
        .document()
        .and_then(|doc| doc.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        tracing::warn!("Background canvas not found");
        return;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        tracing::warn!("2d canvas context unavailable");
        return;
    };
    let Some(performance) = window.performance() else {
        return;
    };

    let mut rng = StdRng::seed_from_u64(performance.now().to_bits());
    let (width, height) = viewport(&window);
    let mut field = HexField::new(width, height, &mut rng);
    fit_canvas(&window, &canvas, &ctx);

    let mut last = performance.now();
    loop {
        let now = match next_frame(&window).await {
            Ok(now) => now,
            Err(e) => {
                tracing::warn!("Animation frame request failed: {:?}", e);
                return;
            }
        };

        let viewport = viewport(&window);
        if viewport != field.size() {
            field.resize(viewport.0, viewport.1, &mut rng);
            fit_canvas(&window, &canvas, &ctx);
        }

        match *pointer.peek() {
            PointerInput::At { x, y } => field.pointer_move(x, y),
            PointerInput::Left => field.pointer_leave(),
            PointerInput::Idle => {}
        }

        field.step(now, frame_delta(last, now));
        last = now;

        paint(&ctx, &field);
    }
}
