use crate::dom;
use crate::render::PointsRenderer;
use field_core::{FieldController, PointerOffset};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    // web-sys truncates clientX/clientY to integers
    #[wasm_bindgen(extends = web::MouseEvent)]
    type PreciseMouseEvent;

    #[wasm_bindgen(method, getter, js_name = clientX)]
    fn client_x(this: &PreciseMouseEvent) -> f64;

    #[wasm_bindgen(method, getter, js_name = clientY)]
    fn client_y(this: &PreciseMouseEvent) -> f64;
}

/// Pointer-move and resize listeners of one mounted field. Dropping the value
/// unregisters them and releases the closures.
pub struct Listeners {
    document: web::Document,
    window: web::Window,
    pointer_move: Closure<dyn FnMut(web::MouseEvent)>,
    resize: Closure<dyn FnMut()>,
    // Catches size changes the window never hears about, like a hidden
    // container being revealed
    observer: Option<web::ResizeObserver>,
}

pub fn wire_listeners(
    document: &web::Document,
    container: &web::HtmlElement,
    controller: Rc<RefCell<FieldController<PointsRenderer>>>,
) -> anyhow::Result<Listeners> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    let ctl_pointer = controller.clone();
    let pointer_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (w, h) = dom::window_inner_size();
        let ev: &PreciseMouseEvent = ev.unchecked_ref();
        let offset = PointerOffset::from_client(ev.client_x() as f32, ev.client_y() as f32, w, h);
        ctl_pointer.borrow_mut().on_pointer_move(offset);
    }) as Box<dyn FnMut(web::MouseEvent)>);
    document
        .add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let host = container.clone();
    let resize = Closure::wrap(Box::new(move || {
        let viewport = dom::viewport_of(&host);
        if controller.borrow_mut().on_resize(viewport) {
            log::debug!("[events] resize {}x{}", viewport.width, viewport.height);
        }
    }) as Box<dyn FnMut()>);
    if let Err(e) =
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
    {
        _ = document.remove_event_listener_with_callback(
            "pointermove",
            pointer_move.as_ref().unchecked_ref(),
        );
        return Err(anyhow::anyhow!("{:?}", e));
    }

    let observer = match web::ResizeObserver::new(resize.as_ref().unchecked_ref()) {
        Ok(o) => {
            o.observe(container);
            Some(o)
        }
        Err(e) => {
            log::warn!("[events] ResizeObserver unavailable: {:?}", e);
            None
        }
    };

    Ok(Listeners {
        document: document.clone(),
        window,
        pointer_move,
        resize,
        observer,
    })
}

impl Drop for Listeners {
    fn drop(&mut self) {
        if let Some(o) = self.observer.take() {
            o.disconnect();
        }
        _ = self.document.remove_event_listener_with_callback(
            "pointermove",
            self.pointer_move.as_ref().unchecked_ref(),
        );
        _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}
