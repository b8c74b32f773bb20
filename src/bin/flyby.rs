use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use stereoflyer::{
    Aircraft, FrameContext, HeadTransform, RenderConfig, SimError, StereoConfig, StereoPipeline,
    TerrainConfig,
};

const FRAME_DT: f64 = 1.0 / 30.0;

fn main() -> Result<(), SimError> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let frames: u32 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".into()));
    let terrain_config = match args.next() {
        Some(path) => TerrainConfig::from_yaml(Path::new(&path))?,
        None => TerrainConfig::default(),
    };

    fs::create_dir_all(&out_dir)?;

    let mut pipeline = StereoPipeline::new(
        RenderConfig::default(),
        StereoConfig::default(),
        terrain_config,
    )?;
    let mut aircraft = Aircraft::default();

    info!("Rendering {} frames to {}", frames, out_dir.display());

    let mut time = 0.0f64;
    for frame in 0..frames {
        // Scripted flight: fly straight, then bank right while the head
        // sweeps slowly left and right.
        aircraft.controls.aileron = if time > 2.0 { 0.2 } else { 0.0 };
        aircraft.controls.elevator = -0.05;
        aircraft.step(FRAME_DT)?;

        let head_yaw = (time * 0.4).sin() as f32 * 0.5;
        let head = HeadTransform::from_yaw_pitch_roll(head_yaw, 0.0, 0.0);

        let ctx = FrameContext::new(FRAME_DT, aircraft.state.clone(), head);
        pipeline.render_frame(&ctx)?;
        pipeline.save_png(&out_dir.join(format!("frame_{:04}.png", frame)))?;

        time += FRAME_DT;
    }

    info!(
        "Done: {} frames, final altitude {:.0} m, heading {:.0} deg",
        pipeline.frames(),
        aircraft.state.altitude(),
        aircraft.state.heading_deg()
    );
    Ok(())
}
