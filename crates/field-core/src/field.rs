use crate::constants::*;
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Blending {
    Normal,
    #[default]
    Additive,
}

/// Appearance shared by every point of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMaterial {
    pub size: f32,
    pub opacity: f32,
    pub color: [f32; 3],
    pub blending: Blending,
    pub size_attenuation: bool,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            size: POINT_SIZE,
            opacity: POINT_OPACITY,
            color: POINT_COLOR,
            blending: Blending::Additive,
            size_attenuation: true,
        }
    }
}

/// A static point cloud plus a single rotation about the vertical axis.
///
/// Positions are fixed once generated; animation only ever changes
/// `rotation_y`, which is applied as a model transform at draw time.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    material: PointMaterial,
    rotation_y: f64,
}

impl ParticleField {
    /// Scatter `count` points uniformly inside `[-half_extent, half_extent]³`.
    pub fn scatter<R: Rng>(
        rng: &mut R,
        count: usize,
        half_extent: f32,
        material: PointMaterial,
    ) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half_extent..=half_extent),
                    rng.gen_range(-half_extent..=half_extent),
                    rng.gen_range(-half_extent..=half_extent),
                )
            })
            .collect();
        Self::from_positions(positions, material)
    }

    pub fn from_positions(positions: Vec<Vec3>, material: PointMaterial) -> Self {
        Self {
            positions,
            material,
            rotation_y: 0.0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` array of `3 * len()` floats.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    /// Cumulative rotation about Y, wrapped to `[0, 2π)`.
    #[inline]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn rotate_y(&mut self, delta: f64) {
        self.rotation_y = (self.rotation_y + delta).rem_euclid(TAU);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y as f32)
    }
}

/// Retained scene: a single point cloud anchored at the origin.
#[derive(Clone, Debug)]
pub struct Scene {
    pub position: Vec3,
    pub particles: ParticleField,
}

impl Scene {
    pub fn new(particles: ParticleField) -> Self {
        Self {
            position: Vec3::ZERO,
            particles,
        }
    }
}
