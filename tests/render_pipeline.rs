mod common;

use common::{eye_half, level_context, lit_pixels, test_pipeline, test_pipeline_with_seed, TEST_DT};
use glam::Vec2;
use pretty_assertions::assert_eq;

use stereoflyer::{Aircraft, FrameContext, HeadTransform, TerrainConfig};

#[test]
fn full_frame_covers_display() {
    let mut pipeline = test_pipeline();
    let frame = pipeline.render_frame(&level_context()).unwrap();

    // Terrain sky fill plus HUD must leave no transparent pixels.
    assert_eq!(
        lit_pixels(frame),
        (frame.width() * frame.height()) as usize
    );
}

#[test]
fn stereo_halves_show_parallax() {
    let mut pipeline = test_pipeline();
    let frame = pipeline.render_frame(&level_context()).unwrap();

    let left = eye_half(frame, false);
    let right = eye_half(frame, true);
    assert_eq!(left.len(), right.len());
    assert_ne!(left, right, "left and right eyes rendered identical images");
}

#[test]
fn same_seed_renders_identical_frames() {
    let mut a = test_pipeline_with_seed(7);
    let mut b = test_pipeline_with_seed(7);

    let frame_a = a.render_frame(&level_context()).unwrap().data().to_vec();
    let frame_b = b.render_frame(&level_context()).unwrap().data().to_vec();
    assert_eq!(frame_a, frame_b);
}

#[test]
fn different_seeds_render_different_terrain() {
    let mut a = test_pipeline_with_seed(7);
    let mut b = test_pipeline_with_seed(8);

    let frame_a = a.render_frame(&level_context()).unwrap().data().to_vec();
    let frame_b = b.render_frame(&level_context()).unwrap().data().to_vec();
    assert_ne!(frame_a, frame_b);
}

#[test]
fn ambient_color_tracks_altitude() {
    let mut pipeline = test_pipeline();

    let mut low = level_context();
    low.aircraft.position.z = -250.0;
    pipeline.render_frame(&low).unwrap();
    let low_color = pipeline.terrain().hud_color();
    common::assert_color_in_gamut(low_color);

    let mut high = level_context();
    high.aircraft.position.z = -5000.0;
    pipeline.render_frame(&high).unwrap();
    let high_color = pipeline.terrain().hud_color();
    common::assert_color_in_gamut(high_color);

    let sky = glam::Vec4::from_array(TerrainConfig::default().fog.sky_color);
    assert!(
        high_color.distance(sky) < low_color.distance(sky),
        "ambient colour should approach the sky colour with altitude"
    );
}

#[test]
fn hud_inherits_terrain_ambient_color() {
    let mut pipeline = test_pipeline();
    pipeline.render_frame(&level_context()).unwrap();
    assert_eq!(pipeline.hud().hud_color(), pipeline.terrain().hud_color());
}

#[test]
fn head_motion_changes_the_view() {
    let mut pipeline = test_pipeline();
    let straight = pipeline
        .render_frame(&level_context())
        .unwrap()
        .data()
        .to_vec();

    let turned = FrameContext::new(
        TEST_DT,
        level_context().aircraft,
        HeadTransform::from_yaw_pitch_roll(0.6, -0.1, 0.0),
    );
    let looked = pipeline.render_frame(&turned).unwrap().data().to_vec();

    assert_ne!(straight, looked);
}

#[test]
fn resize_changes_frame_dimensions() {
    let mut pipeline = test_pipeline();
    pipeline.resize(Vec2::new(384.0, 192.0)).unwrap();

    let frame = pipeline.render_frame(&level_context()).unwrap();
    assert_eq!(frame.width(), 384);
    assert_eq!(frame.height(), 192);
}

#[test]
fn shutdown_then_setup_recovers() {
    let mut pipeline = test_pipeline();
    pipeline.render_frame(&level_context()).unwrap();

    pipeline.shutdown();
    assert!(pipeline.render_frame(&level_context()).is_err());

    pipeline.setup().unwrap();
    pipeline.render_frame(&level_context()).unwrap();
    assert_eq!(pipeline.frames(), 2);
}

#[test]
fn scripted_flight_keeps_rendering() {
    let mut pipeline = test_pipeline();
    let mut aircraft = Aircraft::default();
    aircraft.controls.aileron = 0.25;
    aircraft.controls.elevator = -0.1;

    for i in 0..30 {
        aircraft.step(TEST_DT).unwrap();
        let head = HeadTransform::from_yaw_pitch_roll((i as f32) * 0.01, 0.0, 0.0);
        let ctx = FrameContext::new(TEST_DT, aircraft.state.clone(), head);
        pipeline.render_frame(&ctx).unwrap();
    }

    assert_eq!(pipeline.frames(), 30);
    assert!(aircraft.state.validate().is_ok());
}
