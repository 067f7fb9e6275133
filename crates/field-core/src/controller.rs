use crate::backend::{FrameScheduler, Rasterizer};
use crate::camera::PerspectiveCamera;
use crate::config::{FieldConfig, RasterizerOptions};
use crate::driver::{AnimationDriver, CancelToken, FrameOutcome, FrameParams};
use crate::error::FieldResult;
use crate::field::{ParticleField, Scene};
use crate::pointer::PointerOffset;
use crate::viewport::ViewportSize;
use rand::Rng;
use std::future::Future;

/// Scene, camera and rasterizer of one successfully initialised instance.
pub struct ParticleScene<R> {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
}

impl<R: Rasterizer> ParticleScene<R> {
    /// Size `renderer` to `viewport`, scatter the field and upload it once.
    ///
    /// A collapsed viewport leaves the output size alone and starts the camera
    /// square; the first non-empty resize fixes both.
    pub fn new<G: Rng>(
        viewport: ViewportSize,
        mut renderer: R,
        config: &FieldConfig,
        rng: &mut G,
    ) -> FieldResult<Self> {
        let aspect = if viewport.is_empty() {
            1.0
        } else {
            viewport.aspect()
        };
        let camera = PerspectiveCamera::new(&config.camera, aspect);
        renderer.set_pixel_ratio(viewport.pixel_ratio);
        if !viewport.is_empty() {
            renderer.set_size(viewport.width, viewport.height);
        }

        let particles =
            ParticleField::scatter(rng, config.particle_count, config.half_extent, config.material);
        renderer.upload(&particles)?;
        log::info!(
            "[field] {} points, viewport {}x{} @{}x",
            particles.len(),
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        Ok(Self {
            scene: Scene::new(particles),
            camera,
            renderer,
        })
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.scene.particles
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Match camera aspect and output size to `viewport`. Zero-area sizes are
    /// ignored. Returns whether anything was applied.
    pub fn resize(&mut self, viewport: ViewportSize) -> bool {
        if viewport.is_empty() {
            log::debug!(
                "[field] ignoring resize to {}x{}",
                viewport.width,
                viewport.height
            );
            return false;
        }
        self.camera.set_aspect(viewport.aspect());
        self.renderer.set_pixel_ratio(viewport.pixel_ratio);
        self.renderer.set_size(viewport.width, viewport.height);
        true
    }

    /// Advance one frame: rotate, ease, re-aim, draw.
    pub fn advance_frame(&mut self, pointer: PointerOffset, params: &FrameParams) -> FieldResult<()> {
        self.scene.particles.rotate_y(params.rotation_step);
        self.camera
            .ease_toward_pointer(pointer, params.parallax_gain, params.easing);
        self.camera.look_at(self.scene.position);
        self.camera.update_matrices();
        self.renderer.render(&self.scene, &self.camera)
    }
}

/// Owns everything one mounted field instance needs.
///
/// A controller built without a viewport is degraded: it never draws, never
/// starts its driver, and ignores resize signals.
pub struct FieldController<R> {
    scene: Option<ParticleScene<R>>,
    pointer: PointerOffset,
    driver: AnimationDriver,
}

impl<R: Rasterizer> FieldController<R> {
    /// Build an instance for `viewport`. With no viewport the renderer
    /// factory is never called and a degraded controller is returned.
    pub async fn initialize<G, F, Fut>(
        viewport: Option<ViewportSize>,
        config: &FieldConfig,
        rng: &mut G,
        create_renderer: F,
    ) -> FieldResult<Self>
    where
        G: Rng,
        F: FnOnce(ViewportSize, RasterizerOptions) -> Fut,
        Fut: Future<Output = FieldResult<R>>,
    {
        let Some(viewport) = viewport else {
            log::debug!("[field] no hosting viewport; staying inactive");
            return Ok(Self::degraded(config));
        };
        let renderer = create_renderer(viewport, config.rasterizer_options()).await?;
        let scene = ParticleScene::new(viewport, renderer, config, rng)?;
        Ok(Self::with_scene(scene, config))
    }

    pub fn with_scene(scene: ParticleScene<R>, config: &FieldConfig) -> Self {
        Self {
            scene: Some(scene),
            pointer: PointerOffset::default(),
            driver: AnimationDriver::new(FrameParams::from(config)),
        }
    }

    pub fn degraded(config: &FieldConfig) -> Self {
        Self {
            scene: None,
            pointer: PointerOffset::default(),
            driver: AnimationDriver::new(FrameParams::from(config)),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.scene.is_some()
    }

    #[inline]
    pub fn scene(&self) -> Option<&ParticleScene<R>> {
        self.scene.as_ref()
    }

    #[inline]
    pub fn scene_mut(&mut self) -> Option<&mut ParticleScene<R>> {
        self.scene.as_mut()
    }

    #[inline]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.driver.cancel_token()
    }

    #[inline]
    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, offset: PointerOffset) {
        self.pointer = offset;
    }

    pub fn on_resize(&mut self, viewport: ViewportSize) -> bool {
        match self.scene.as_mut() {
            Some(scene) => scene.resize(viewport),
            None => false,
        }
    }

    /// Start the frame loop. A degraded controller never starts.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if !self.is_active() {
            return false;
        }
        self.driver.start(scheduler)
    }

    pub fn frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> FrameOutcome {
        self.driver.tick(scheduler, self.scene.as_mut(), self.pointer)
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }
}
