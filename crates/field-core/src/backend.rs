use crate::camera::PerspectiveCamera;
use crate::error::FieldResult;
use crate::field::{ParticleField, Scene};

/// Draw target bound to a hosting viewport.
///
/// Sizes are in CSS pixels; implementations scale by the pixel ratio when
/// sizing their backing store.
pub trait Rasterizer {
    /// Record the ratio only; it takes effect on the next `set_size`.
    fn set_pixel_ratio(&mut self, ratio: f64);
    /// Resize the output buffer. Must be cheap when the size is unchanged.
    fn set_size(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    /// Upload the static point geometry. Called once, before the first frame.
    fn upload(&mut self, field: &ParticleField) -> FieldResult<()>;
    /// Draw `scene` as seen from `camera`, synchronously.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> FieldResult<()>;
}

/// "Run the frame callback again before the next repaint".
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
