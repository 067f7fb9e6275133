// Test doubles shared by the host-side integration tests.

#![allow(dead_code)]
use field_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::ready;

/// Rasterizer that records what it was asked to do.
#[derive(Default)]
pub struct RecordingRasterizer {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
    pub set_size_calls: usize,
    /// Device-pixel size of the output, updated by `set_size` like a surface
    /// backing store.
    pub backing: (u32, u32),
    pub reconfigures: usize,
    pub uploaded_floats: usize,
    pub uploads: usize,
    pub renders: usize,
    pub last_rotation: f64,
    pub last_camera_z: f32,
    pub fail_renders: bool,
}

impl Rasterizer for RecordingRasterizer {
    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.set_size_calls += 1;
        let backing = ViewportSize::new(width, height, self.pixel_ratio).physical_size();
        if backing != self.backing {
            self.backing = backing;
            self.reconfigures += 1;
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn upload(&mut self, field: &ParticleField) -> FieldResult<()> {
        self.uploads += 1;
        self.uploaded_floats = field.flat_positions().len();
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> FieldResult<()> {
        if self.fail_renders {
            return Err(FieldError::Render("surface lost".into()));
        }
        self.renders += 1;
        self.last_rotation = scene.particles.rotation_y();
        self.last_camera_z = camera.position.z;
        Ok(())
    }
}

/// Frame scheduler that only counts requests.
#[derive(Default)]
pub struct CountingScheduler {
    pub requested: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn viewport(width: u32, height: u32) -> ViewportSize {
    ViewportSize::new(width, height, 1.0)
}

pub fn mounted(width: u32, height: u32) -> FieldController<RecordingRasterizer> {
    let config = FieldConfig::default();
    pollster::block_on(FieldController::initialize(
        Some(viewport(width, height)),
        &config,
        &mut rng(7),
        |_, _| ready(Ok(RecordingRasterizer::default())),
    ))
    .unwrap()
}
