// Host-side tests for tuning constants and the defaults built from them.

use field_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Easing must move toward the target without overshooting
    assert!(CAMERA_EASING > 0.0 && CAMERA_EASING <= 1.0);
    assert!(PARALLAX_GAIN > 0.0);
    assert!(ROTATION_STEP_RAD > 0.0 && ROTATION_STEP_RAD < std::f64::consts::PI);

    // The whole field sits inside the far plane as seen from the start position
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_DISTANCE > CAMERA_NEAR);
    assert!(FIELD_HALF_EXTENT > 0.0);

    assert!(POINT_OPACITY > 0.0 && POINT_OPACITY <= 1.0);
    assert!(POINT_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
}

#[test]
fn default_config_uses_the_constants() {
    let c = FieldConfig::default();
    assert_eq!(c.particle_count, PARTICLE_COUNT);
    assert_eq!(c.half_extent, FIELD_HALF_EXTENT);
    assert_eq!(c.camera, CameraConfig::default());
    assert_eq!(c.camera.fov_y_deg, CAMERA_FOV_Y_DEG);
    assert_eq!(c.rotation_step, ROTATION_STEP_RAD);
    assert_eq!(c.parallax_gain, PARALLAX_GAIN);
    assert_eq!(c.easing, CAMERA_EASING);

    let frame = FrameParams::from(&c);
    assert_eq!(frame.rotation_step, c.rotation_step);
    assert_eq!(frame.parallax_gain, c.parallax_gain);
    assert_eq!(frame.easing, c.easing);
}

#[test]
fn antialias_toggles_multisampling() {
    let mut c = FieldConfig::default();
    assert_eq!(c.rasterizer_options().sample_count, MSAA_SAMPLES);
    assert!(c.rasterizer_options().transparent);
    c.antialias = false;
    assert_eq!(c.rasterizer_options().sample_count, 1);
}

#[test]
fn shader_declares_both_entry_points() {
    assert!(POINTS_WGSL.contains("fn vs_points"));
    assert!(POINTS_WGSL.contains("fn fs_points"));
}
