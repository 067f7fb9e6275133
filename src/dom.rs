use field_core::ViewportSize;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn find_container(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Current client size of `container` plus the device pixel ratio.
pub fn viewport_of(container: &web::HtmlElement) -> ViewportSize {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    ViewportSize::new(
        container.client_width().max(0) as u32,
        container.client_height().max(0) as u32,
        dpr,
    )
}

/// `innerWidth` / `innerHeight` of the window, in CSS pixels.
pub fn window_inner_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

/// Canvas inserted into a hosting element. Dropping it takes the canvas off
/// the page.
pub struct MountedCanvas(web::HtmlCanvasElement);

impl MountedCanvas {
    #[inline]
    pub fn element(&self) -> &web::HtmlCanvasElement {
        &self.0
    }
}

impl Drop for MountedCanvas {
    fn drop(&mut self) {
        self.0.remove();
    }
}

/// Create the rendering surface element and insert it into `container`.
pub fn append_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<MountedCanvas> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.style().set_property("display", "block");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(MountedCanvas(canvas))
}

/// Run `f` once the document has been parsed: right away, or on
/// `DOMContentLoaded` while the page is still loading.
pub fn when_document_ready(
    document: &web::Document,
    f: impl FnOnce() + 'static,
) -> Result<(), wasm_bindgen::JsValue> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let on_ready = wasm_bindgen::closure::Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}
