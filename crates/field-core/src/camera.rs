use crate::config::CameraConfig;
use crate::pointer::PointerOffset;
use glam::{Mat4, Vec3};

/// Perspective camera with a lazily refreshed projection.
///
/// Changing the aspect only marks the projection dirty; the matrix is rebuilt
/// by [`PerspectiveCamera::update_matrices`] before the next frame is drawn.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    aspect: f32,
    target: Vec3,
    view: Mat4,
    projection: Mat4,
    projection_dirty: bool,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut cam = Self {
            fov_y_deg: config.fov_y_deg,
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.distance),
            aspect,
            target: Vec3::ZERO,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        };
        cam.look_at(Vec3::ZERO);
        cam.update_matrices();
        cam
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection_dirty = true;
    }

    #[inline]
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Re-aim at `target` from the current position.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.view = Mat4::look_at_rh(self.position, target, Vec3::Y);
    }

    /// Rebuild the projection if the aspect changed since the last call.
    pub fn update_matrices(&mut self) {
        if self.projection_dirty {
            self.projection = Mat4::perspective_rh(
                self.fov_y_deg.to_radians(),
                self.aspect,
                self.near,
                self.far,
            );
            self.projection_dirty = false;
        }
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Move a fixed fraction of the way toward the pointer-derived parallax
    /// target. Only x and y are eased; z keeps its initial distance.
    pub fn ease_toward_pointer(&mut self, pointer: PointerOffset, gain: f32, easing: f32) {
        let target = parallax_target(pointer, gain);
        self.position.x += (target.x - self.position.x) * easing;
        self.position.y += (target.y - self.position.y) * easing;
    }
}

/// Camera x/y the easing converges to for a given pointer offset. Screen y
/// grows downward, so it is negated.
#[inline]
pub fn parallax_target(pointer: PointerOffset, gain: f32) -> glam::Vec2 {
    glam::Vec2::new(pointer.dx * gain, -pointer.dy * gain)
}
