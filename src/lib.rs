#![cfg(target_arch = "wasm32")]
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use wheel_core::{Segment, SpinEngine, SpinState, WheelConfig};

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod layout;
mod overlay;
mod render;

use frame::WheelView;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("wheel-web loaded");
    Ok(())
}

/// A wheel mounted on a canvas. Dropping (or `free()`ing) it destroys it.
#[wasm_bindgen]
pub struct WheelHandle {
    view: Rc<WheelView>,
}

#[wasm_bindgen]
impl WheelHandle {
    /// Spin as if tapped. Returns whether a new spin started.
    pub fn spin(&self) -> bool {
        self.view.spin().is_started()
    }

    /// Stop animating and detach from the page. Safe to call twice.
    pub fn destroy(&self) {
        self.view.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.view.engine.borrow().rotation()
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.view.engine.borrow().state() {
            SpinState::Idle => "idle",
            SpinState::Dragging => "dragging",
            SpinState::Spinning => "spinning",
            SpinState::Complete => "complete",
        }
        .to_string()
    }
}

impl Drop for WheelHandle {
    fn drop(&mut self) {
        self.view.destroy();
    }
}

/// Mount a wheel on `<canvas id=canvas_id>` (default `wheel-canvas`).
///
/// The canvas' `data-wheel-config` attribute, when present, holds the wheel
/// as JSON; otherwise a demo wheel is shown.
#[wasm_bindgen]
pub fn mount(canvas_id: Option<String>) -> Result<WheelHandle, JsValue> {
    mount_inner(canvas_id.as_deref().unwrap_or(constants::DEFAULT_CANVAS_ID))
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn mount_inner(canvas_id: &str) -> anyhow::Result<WheelHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let ctx = dom::context_2d(&canvas)?;

    let config = match dom::read_config(&canvas)? {
        Some(config) => config,
        None => {
            log::info!(
                "[config] no {} on #{}, using demo wheel",
                constants::CONFIG_ATTRIBUTE,
                canvas_id
            );
            demo_config()
        }
    };
    let engine = SpinEngine::new(config)?;

    dom::sync_canvas_backing_size(&canvas);
    let view = WheelView::new(engine, canvas, ctx);
    events::wire_all(&view);
    frame::start_loop(&view);
    log::info!(
        "[mount] #{} with {} segments",
        canvas_id,
        view.engine.borrow().geometry().count()
    );
    Ok(WheelHandle { view })
}

fn demo_config() -> WheelConfig {
    let prizes = [
        ("ten-off", "10% off", "TEN", 3.0),
        ("free-shipping", "Free shipping", "SHIP", 3.0),
        ("try-again", "Try again", "", 4.0),
        ("twenty-off", "20% off", "TWENTY", 1.0),
        ("mystery", "Mystery gift", "GIFT", 0.5),
        ("five-off", "5% off", "FIVE", 3.0),
    ];
    WheelConfig::new(
        prizes
            .iter()
            .map(|(id, label, value, w)| Segment::new(*id, *label, *value).with_weight(*w))
            .collect(),
    )
}
