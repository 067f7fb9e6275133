// Shared tuning constants for the particle field and parallax camera.

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const FIELD_HALF_EXTENT: f32 = 500.0; // positions span [-500, 500] on every axis

// Point material
pub const POINT_SIZE: f32 = 0.8; // world-space size, attenuated by view depth
pub const POINT_OPACITY: f32 = 0.6;
pub const POINT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 300.0; // initial eye z, looking at the origin

// Per-frame animation steps (fixed-step, not scaled by elapsed time)
pub const ROTATION_STEP_RAD: f64 = 0.00015;
pub const PARALLAX_GAIN: f32 = 0.0005; // pointer pixels -> world units
pub const CAMERA_EASING: f32 = 0.02; // fraction of remaining distance covered per frame

// Rasterizer
pub const MSAA_SAMPLES: u32 = 4;

// Hosting element looked up when the module starts
pub const DEFAULT_CONTAINER_ID: &str = "canvas-container";
