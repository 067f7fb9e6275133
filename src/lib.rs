#![cfg(target_arch = "wasm32")]
use field_core::{DriverState, FieldConfig, FieldController, FieldError, DEFAULT_CONTAINER_ID};
use fnv::{FnvHashMap, FnvHashSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod dom;
mod events;
mod frame;
mod render;

use render::PointsRenderer;

/// Everything kept alive for one mounted hosting element.
struct Mounted {
    controller: Rc<RefCell<FieldController<PointsRenderer>>>,
    frame_loop: frame::FrameLoop,
    listeners: events::Listeners,
}

impl Mounted {
    /// Dropping the last controller reference releases the renderer, which
    /// takes its canvas off the page.
    fn teardown(self) {
        self.controller.borrow_mut().stop();
        self.frame_loop.cancel();
        drop(self.listeners);
        drop(self.frame_loop);
    }
}

thread_local! {
    static MOUNTED: RefCell<FnvHashMap<String, Mounted>> = RefCell::new(FnvHashMap::default());
    // Mounts still waiting on the GPU device
    static PENDING: RefCell<FnvHashSet<String>> = RefCell::new(FnvHashSet::default());
}

/// JS-side handle to a mounted particle field.
#[wasm_bindgen]
pub struct FieldHandle {
    container_id: String,
}

#[wasm_bindgen]
impl FieldHandle {
    #[wasm_bindgen(getter)]
    pub fn container_id(&self) -> String {
        self.container_id.clone()
    }

    /// Stop the frame loop, unregister listeners and remove the canvas.
    pub fn stop(&self) {
        PENDING.with(|p| p.borrow_mut().remove(&self.container_id));
        let mounted = MOUNTED.with(|m| m.borrow_mut().remove(&self.container_id));
        if let Some(m) = mounted {
            m.teardown();
            log::info!("[field] #{} stopped", self.container_id);
        }
    }

    pub fn is_running(&self) -> bool {
        MOUNTED.with(|m| {
            m.borrow()
                .get(&self.container_id)
                .map(|m| m.controller.borrow().driver().state() == DriverState::Running)
                .unwrap_or(false)
        })
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("parallax-field starting");

    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    dom::when_document_ready(&document, || {
        mount(DEFAULT_CONTAINER_ID);
    })
}

/// Mount a particle field into the element with id `container_id`. A missing
/// element leaves the page untouched; mounting the same id twice is ignored.
#[wasm_bindgen]
pub fn mount(container_id: &str) -> FieldHandle {
    let id = container_id.to_owned();
    let busy = MOUNTED.with(|m| m.borrow().contains_key(&id))
        || !PENDING.with(|p| p.borrow_mut().insert(id.clone()));
    if busy {
        log::debug!("[field] #{} already mounted", id);
    } else {
        let id_task = id.clone();
        spawn_local(async move {
            if let Err(e) = mount_field(&id_task).await {
                log::error!("init error: {:?}", e);
            }
            PENDING.with(|p| p.borrow_mut().remove(&id_task));
        });
    }
    FieldHandle { container_id: id }
}

async fn mount_field(container_id: &str) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = dom::find_container(&document, container_id);
    let viewport = container.as_ref().map(dom::viewport_of);

    let config = FieldConfig::default();
    let mut rng = StdRng::from_entropy();
    let surface_doc = document.clone();
    let surface_host = container.clone();
    let controller = FieldController::initialize(viewport, &config, &mut rng, |vp, options| async move {
        let Some(host) = surface_host else {
            return Err(FieldError::BackendUnavailable("hosting element vanished".into()));
        };
        let canvas = match dom::append_canvas(&surface_doc, &host) {
            Ok(c) => c,
            Err(e) => return Err(FieldError::BackendUnavailable(format!("{:#}", e))),
        };
        PointsRenderer::new(canvas, vp, options)
            .await
            .map_err(|e| FieldError::BackendUnavailable(format!("{:#}", e)))
    })
    .await?;

    let Some(container) = container.filter(|_| controller.is_active()) else {
        log::debug!("[field] #{} not found; particle field disabled", container_id);
        return Ok(());
    };
    let controller = Rc::new(RefCell::new(controller));

    // stop() may have been called while the device was being requested
    if !PENDING.with(|p| p.borrow().contains(container_id)) {
        return Ok(());
    }

    // on failure the controller drops here, taking its canvas with it
    let listeners = events::wire_listeners(&document, &container, controller.clone())?;
    let frame_loop = frame::start_loop(controller.clone());
    MOUNTED.with(|m| {
        m.borrow_mut().insert(
            container_id.to_owned(),
            Mounted {
                controller,
                frame_loop,
                listeners,
            },
        )
    });
    log::info!("[field] #{} mounted", container_id);
    Ok(())
}

