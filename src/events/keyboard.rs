use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::events::listen;
use crate::frame::WheelView;
use crate::input::is_spin_key;

/// Space or Enter on the focused canvas spins.
pub fn wire_keydown(view: &Rc<WheelView>) {
    dom::ensure_focusable(&view.canvas);
    let canvas = view.canvas.clone();
    listen(view, &canvas, "keydown", |view, ev| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        if is_spin_key(&ev.key()) {
            ev.prevent_default();
            let outcome = view.spin();
            log::debug!("[key] {:?} -> {:?}", ev.key(), outcome);
        }
    });
}
