use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use wheel_core::{SpinEngine, SpinOutcome, SpinResult};

use crate::dom;
use crate::events::Listener;
use crate::input::PointerGesture;
use crate::layout::decay_kick;
use crate::overlay;
use crate::render::{self, WheelScene};

/// One mounted wheel: the engine plus everything the page wiring shares.
///
/// Listener and frame closures hold a `Weak` back to this, so dropping the
/// owning handle frees them.
pub struct WheelView {
    pub engine: RefCell<SpinEngine>,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub gesture: RefCell<PointerGesture>,
    // filled by engine observers, drained after the engine borrow ends
    pub completed: Rc<RefCell<Vec<SpinResult>>>,
    pub kick: Rc<Cell<f64>>,
    pub listeners: RefCell<Vec<Listener>>,
    last_instant: Cell<Instant>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    alive: Cell<bool>,
}

impl WheelView {
    pub fn new(
        mut engine: SpinEngine,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
    ) -> Rc<Self> {
        let completed: Rc<RefCell<Vec<SpinResult>>> = Rc::new(RefCell::new(Vec::new()));
        let kick = Rc::new(Cell::new(0.0_f64));
        {
            let completed = completed.clone();
            engine.on_spin_complete(move |r| completed.borrow_mut().push(r.clone()));
        }
        {
            let kick = kick.clone();
            engine.on_frame(move |f| {
                if f.peg_bump {
                    kick.set(kick.get().max(f.deflection));
                }
            });
        }
        Rc::new(Self {
            engine: RefCell::new(engine),
            canvas,
            ctx,
            gesture: RefCell::new(PointerGesture::default()),
            completed,
            kick,
            listeners: RefCell::new(Vec::new()),
            last_instant: Cell::new(Instant::now()),
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
            alive: Cell::new(true),
        })
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Tap-to-spin from any input path.
    pub fn spin(&self) -> SpinOutcome {
        if !self.is_alive() {
            return SpinOutcome::TornDown;
        }
        let outcome = self.engine.borrow_mut().spin();
        match outcome {
            SpinOutcome::Started { index, .. } => {
                log::info!("[spin] started, segment {} promised", index);
                if let Some(doc) = dom::window_document() {
                    overlay::hide(&doc);
                }
            }
            other => log::debug!("[spin] not started: {:?}", other),
        }
        outcome
    }

    pub fn frame(&self) {
        if !self.is_alive() {
            return;
        }
        let now = Instant::now();
        let dt = now - self.last_instant.get();
        self.last_instant.set(now);

        self.engine.borrow_mut().tick();
        self.kick.set(decay_kick(self.kick.get(), dt.as_secs_f64()));

        {
            let engine = self.engine.borrow();
            let scene = WheelScene {
                segments: &engine.config().segments,
                geometry: engine.geometry(),
                rotation: engine.rotation(),
                kick: self.kick.get(),
            };
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            if let Err(e) = render::draw(&self.ctx, w, h, &scene) {
                log::error!("render error: {:?}", e);
            }
        }

        // page listeners may call back into the handle
        let finished: Vec<SpinResult> = self.completed.borrow_mut().drain(..).collect();
        for result in &finished {
            if let Some(doc) = dom::window_document() {
                overlay::show_result(&doc, result);
            }
            if let Err(e) = dom::dispatch_spin_complete(&self.canvas, result) {
                log::error!("[result] dispatch failed: {:#}", e);
            }
        }
    }

    fn request_frame(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Stop the loop and detach from the page. Idempotent; closures are
    /// freed later, with the view itself.
    pub fn destroy(&self) {
        if !self.alive.replace(false) {
            return;
        }
        self.engine.borrow_mut().teardown();
        self.completed.borrow_mut().clear();
        if let (Some(window), Some(id)) = (web::window(), self.raf_id.take()) {
            _ = window.cancel_animation_frame(id);
        }
        for l in self.listeners.borrow().iter() {
            l.detach();
        }
        log::info!("[mount] wheel destroyed");
    }
}

pub fn start_loop(view: &Rc<WheelView>) {
    let weak: Weak<WheelView> = Rc::downgrade(view);
    let closure = Closure::wrap(Box::new(move || {
        let Some(view) = weak.upgrade() else {
            return;
        };
        view.raf_id.set(None);
        view.frame();
        if view.is_alive() {
            view.request_frame();
        }
    }) as Box<dyn FnMut()>);
    *view.tick.borrow_mut() = Some(closure);
    view.request_frame();
}
