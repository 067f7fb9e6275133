// Host-side tests for particle field generation and rotation.

mod common;

use common::rng;
use field_core::*;
use std::f64::consts::TAU;

#[test]
fn scatter_has_fixed_cardinality_and_bounds() {
    for seed in [0u64, 1, 42, 9_001] {
        let field = ParticleField::scatter(
            &mut rng(seed),
            PARTICLE_COUNT,
            FIELD_HALF_EXTENT,
            PointMaterial::default(),
        );
        assert_eq!(field.len(), 2000);
        for p in field.positions() {
            for c in p.to_array() {
                assert!((-500.0..=500.0).contains(&c), "coordinate {c} out of range");
            }
        }
    }
}

#[test]
fn scatter_spreads_over_the_whole_cube() {
    let field = ParticleField::scatter(&mut rng(3), 2000, 500.0, PointMaterial::default());
    let (mut min, mut max) = (glam::Vec3::splat(f32::MAX), glam::Vec3::splat(f32::MIN));
    for p in field.positions() {
        min = min.min(*p);
        max = max.max(*p);
    }
    // 2000 uniform samples per axis land well inside the last 5% of each edge
    assert!(min.max_element() < -450.0);
    assert!(max.min_element() > 450.0);
}

#[test]
fn same_seed_gives_same_field() {
    let a = ParticleField::scatter(&mut rng(11), 64, 500.0, PointMaterial::default());
    let b = ParticleField::scatter(&mut rng(11), 64, 500.0, PointMaterial::default());
    assert_eq!(a.positions(), b.positions());
}

#[test]
fn flat_positions_are_xyz_triples() {
    let field = ParticleField::from_positions(
        vec![glam::Vec3::new(1.0, 2.0, 3.0), glam::Vec3::new(-4.0, 5.0, -6.0)],
        PointMaterial::default(),
    );
    assert_eq!(field.flat_positions(), &[1.0, 2.0, 3.0, -4.0, 5.0, -6.0]);
}

#[test]
fn default_material_matches_field_look() {
    let m = PointMaterial::default();
    assert_eq!(m.size, 0.8);
    assert_eq!(m.opacity, 0.6);
    assert_eq!(m.color, [1.0, 1.0, 1.0]);
    assert_eq!(m.blending, Blending::Additive);
    assert!(m.size_attenuation);
}

#[test]
fn rotation_accumulates_per_step_and_wraps() {
    let mut field = ParticleField::from_positions(vec![glam::Vec3::X], PointMaterial::default());
    for _ in 0..1000 {
        field.rotate_y(ROTATION_STEP_RAD);
    }
    assert!((field.rotation_y() - 1000.0 * 0.00015).abs() < 1e-12);

    field.rotate_y(TAU);
    assert!((field.rotation_y() - 0.15).abs() < 1e-9);
}

#[test]
fn rotation_never_touches_positions() {
    let mut field = ParticleField::scatter(&mut rng(5), 16, 500.0, PointMaterial::default());
    let before = field.positions().to_vec();
    field.rotate_y(1.0);
    assert_eq!(field.positions(), before.as_slice());

    let rotated = field.model_matrix().transform_point3(glam::Vec3::X);
    assert!((rotated - glam::Vec3::new(1.0f32.cos(), 0.0, -1.0f32.sin())).length() < 1e-5);
}

#[test]
fn scene_is_anchored_at_origin() {
    let scene = Scene::new(ParticleField::from_positions(vec![], PointMaterial::default()));
    assert_eq!(scene.position, glam::Vec3::ZERO);
    assert!(scene.particles.is_empty());
}
