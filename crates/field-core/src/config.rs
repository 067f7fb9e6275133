use crate::constants::*;
use crate::field::PointMaterial;

/// Perspective camera parameters applied at initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the origin along +Z.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: CAMERA_FOV_Y_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
        }
    }
}

/// Everything one mounted field instance is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub half_extent: f32,
    pub material: PointMaterial,
    pub camera: CameraConfig,
    pub rotation_step: f64,
    pub parallax_gain: f32,
    pub easing: f32,
    pub antialias: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            half_extent: FIELD_HALF_EXTENT,
            material: PointMaterial::default(),
            camera: CameraConfig::default(),
            rotation_step: ROTATION_STEP_RAD,
            parallax_gain: PARALLAX_GAIN,
            easing: CAMERA_EASING,
            antialias: true,
        }
    }
}

impl FieldConfig {
    /// Options handed to the rasterizer factory.
    pub fn rasterizer_options(&self) -> RasterizerOptions {
        RasterizerOptions {
            sample_count: if self.antialias { MSAA_SAMPLES } else { 1 },
            transparent: true,
        }
    }
}

/// Construction options for a [`crate::Rasterizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterizerOptions {
    /// Multisample count; 1 disables antialiasing.
    pub sample_count: u32,
    /// Clear to fully transparent so the page shows through.
    pub transparent: bool,
}
