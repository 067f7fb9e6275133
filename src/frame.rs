use crate::render::PointsRenderer;
use field_core::{FieldController, FrameOutcome, FrameScheduler};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = RefCell<Option<Closure<dyn FnMut()>>>;

/// `requestAnimationFrame` wrapper that remembers the pending request id.
struct RafScheduler {
    tick: Weak<TickSlot>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let (Some(window), Some(tick)) = (web::window(), self.tick.upgrade()) else {
            return;
        };
        let slot = tick.borrow();
        let Some(closure) = slot.as_ref() else {
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// Owns the frame callback. Dropping it cancels the pending frame before the
/// closure is released.
pub struct FrameLoop {
    tick: Rc<TickSlot>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}

pub fn start_loop(controller: Rc<RefCell<FieldController<PointsRenderer>>>) -> FrameLoop {
    let tick: Rc<TickSlot> = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let mut scheduler = RafScheduler {
        tick: Rc::downgrade(&tick),
        pending: pending.clone(),
    };
    let controller_tick = controller.clone();
    let pending_tick = pending.clone();
    let tick_weak = Rc::downgrade(&tick);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        let mut sched = RafScheduler {
            tick: tick_weak.clone(),
            pending: pending_tick.clone(),
        };
        match controller_tick.borrow_mut().frame(&mut sched) {
            FrameOutcome::Failed(e) => log::error!("render error: {}", e),
            FrameOutcome::Stopped => log::debug!("[frame] loop stopped"),
            FrameOutcome::Drawn | FrameOutcome::Skipped => {}
        }
    }) as Box<dyn FnMut()>));

    if !controller.borrow_mut().start(&mut scheduler) {
        log::debug!("[frame] controller inactive; loop not started");
    }
    FrameLoop { tick, pending }
}
