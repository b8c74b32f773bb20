use glam::{Vec2, Vec4};
use tiny_skia::Pixmap;

use stereoflyer::{
    AircraftState, FrameContext, HeadTransform, RenderConfig, StereoConfig, StereoPipeline,
    TerrainConfig,
};

pub const TEST_DT: f64 = 1.0 / 30.0;

/// A small pipeline that keeps test frames cheap to rasterize.
pub fn test_pipeline() -> StereoPipeline {
    test_pipeline_with_seed(42)
}

pub fn test_pipeline_with_seed(seed: u64) -> StereoPipeline {
    let config = RenderConfig {
        screen_dims: Vec2::new(256.0, 128.0),
        ..Default::default()
    };
    let terrain = TerrainConfig {
        seed,
        grid_radius: 10,
        ..Default::default()
    };
    StereoPipeline::new(config, StereoConfig::default(), terrain)
        .expect("test pipeline must build")
}

pub fn level_context() -> FrameContext {
    FrameContext::new(TEST_DT, AircraftState::default(), HeadTransform::default())
}

/// Count pixels with any opacity.
pub fn lit_pixels(pixmap: &Pixmap) -> usize {
    pixmap.data().chunks(4).filter(|px| px[3] > 0).count()
}

/// Extract one half of a side-by-side frame as raw bytes.
pub fn eye_half(pixmap: &Pixmap, right: bool) -> Vec<u8> {
    let width = pixmap.width() as usize;
    let half = width / 2;
    let offset = if right { half } else { 0 };

    let mut out = Vec::with_capacity(half * pixmap.height() as usize * 4);
    for row in 0..pixmap.height() as usize {
        let start = (row * width + offset) * 4;
        out.extend_from_slice(&pixmap.data()[start..start + half * 4]);
    }
    out
}

#[track_caller]
pub fn assert_color_in_gamut(color: Vec4) {
    for (i, c) in color.to_array().iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(c) && c.is_finite(),
            "colour component {} out of gamut: {}",
            i,
            c
        );
    }
}
