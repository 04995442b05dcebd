use anyhow::{anyhow, Context, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use wheel_core::{SpinResult, WheelConfig};

use crate::constants::{CONFIG_ATTRIBUTE, SPIN_COMPLETE_EVENT};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{} is not a <canvas>", id))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected 2d context type"))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        if canvas.width() != w_px.max(1) || canvas.height() != h_px.max(1) {
            canvas.set_width(w_px.max(1));
            canvas.set_height(h_px.max(1));
        }
    }
}

/// Key presses only reach a canvas that can take focus.
pub fn ensure_focusable(canvas: &web::HtmlCanvasElement) {
    if !canvas.has_attribute("tabindex") {
        _ = canvas.set_attribute("tabindex", "0");
    }
}

/// Config from the canvas' `data-wheel-config` JSON, if the page set one.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> Result<Option<WheelConfig>> {
    let Some(raw) = canvas.get_attribute(CONFIG_ATTRIBUTE) else {
        return Ok(None);
    };
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} attribute", CONFIG_ATTRIBUTE))?;
    Ok(Some(config))
}

/// Fire `wheel:spin-complete` on the canvas with the result as `detail`.
pub fn dispatch_spin_complete(canvas: &web::HtmlCanvasElement, result: &SpinResult) -> Result<()> {
    let json = serde_json::to_string(result)?;
    let detail = js_sys::JSON::parse(&json).map_err(js_error)?;
    let init = web::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    let event = web::CustomEvent::new_with_event_init_dict(SPIN_COMPLETE_EVENT, &init)
        .map_err(js_error)?;
    canvas.dispatch_event(&event).map_err(js_error)?;
    Ok(())
}

pub fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}
