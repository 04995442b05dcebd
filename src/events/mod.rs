pub mod keyboard;
pub mod pointer;

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::WheelView;

/// A DOM listener the view can detach on destroy.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn detach(&self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Register `handler` for `kind` on `target`, handing it the view while the
/// view is still alive.
pub fn listen(
    view: &Rc<WheelView>,
    target: &web::EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(&WheelView, web::Event) + 'static,
) {
    let weak = Rc::downgrade(view);
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Some(view) = weak.upgrade() {
            if view.is_alive() {
                handler(&view, ev);
            }
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    {
        log::warn!("[events] could not listen for {}: {:?}", kind, e);
        return;
    }
    view.listeners.borrow_mut().push(Listener {
        target: target.clone(),
        kind,
        closure,
    });
}

pub fn wire_all(view: &Rc<WheelView>) {
    pointer::wire_pointer_handlers(view);
    keyboard::wire_keydown(view);
    wire_resize(view);
}

fn wire_resize(view: &Rc<WheelView>) {
    let Some(window) = web::window() else {
        return;
    };
    listen(view, &window, "resize", |view, _| {
        dom::sync_canvas_backing_size(&view.canvas);
    });
}
