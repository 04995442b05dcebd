use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use wheel_core::CenterAngle;

use crate::constants::TAP_SLOP_PX;
use crate::events::listen;
use crate::frame::WheelView;
use crate::input::{self, GestureEnd};

pub fn wire_pointer_handlers(view: &Rc<WheelView>) {
    let canvas = view.canvas.clone();
    listen(view, &canvas, "pointerdown", |view, ev| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            on_pointerdown(view, ev);
        }
    });
    listen(view, &canvas, "pointermove", |view, ev| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            on_pointermove(view, ev);
        }
    });
    listen(view, &canvas, "pointerup", |view, ev| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            on_pointerup(view, ev);
        }
    });
    listen(view, &canvas, "pointercancel", |view, _| {
        view.gesture.borrow_mut().cancel();
        view.engine.borrow_mut().cancel_drag();
    });
}

fn on_pointerdown(view: &WheelView, ev: &web::PointerEvent) {
    if !ev.is_primary() || ev.button() != 0 {
        return;
    }
    let pos = input::pointer_canvas_px(ev, &view.canvas);
    view.gesture.borrow_mut().press(pos);
    {
        let mut engine = view.engine.borrow_mut();
        // the canvas may have been resized since the last press
        let cx = view.canvas.width() as f64 / 2.0;
        let cy = view.canvas.height() as f64 / 2.0;
        engine.set_angle_source(CenterAngle::new(cx, cy));
        engine.begin_drag(pos.x as f64, pos.y as f64);
    }
    _ = view.canvas.set_pointer_capture(ev.pointer_id());
    ev.prevent_default();
}

fn on_pointermove(view: &WheelView, ev: &web::PointerEvent) {
    if !ev.is_primary() || !view.gesture.borrow().is_pressed() {
        return;
    }
    let pos = input::pointer_canvas_px(ev, &view.canvas);
    let dragging = {
        let mut gesture = view.gesture.borrow_mut();
        let was_dragging = gesture.is_dragging();
        let dragging = gesture.track(pos, TAP_SLOP_PX);
        if dragging && !was_dragging {
            log::debug!("[mouse] press became a drag");
        }
        dragging
    };
    if dragging {
        view.engine
            .borrow_mut()
            .update_drag(pos.x as f64, pos.y as f64);
    }
}

fn on_pointerup(view: &WheelView, ev: &web::PointerEvent) {
    if !ev.is_primary() {
        return;
    }
    let end = view.gesture.borrow_mut().release();
    match end {
        GestureEnd::Tap => {
            view.engine.borrow_mut().cancel_drag();
            view.spin();
        }
        GestureEnd::Drag => {
            let velocity = view.engine.borrow_mut().end_drag();
            log::info!("[mouse] drag released at {:.2}°/frame", velocity);
        }
        GestureEnd::None => {}
    }
    _ = view.canvas.release_pointer_capture(ev.pointer_id());
    ev.prevent_default();
}
