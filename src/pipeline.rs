use glam::Vec2;
use log::info;
use std::path::Path;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::rendering::{EyeRenderer, FrameContext, HudRenderer, RenderConfig, RenderSurface, TerrainRenderer};
use crate::stereo::{Eye, EyeSide, StereoConfig, StereoRig, Viewport};
use crate::terrain::TerrainConfig;
use crate::utils::errors::SimError;

/// The frame-loop orchestrator: owns the stereo rig, the composed surface and
/// both renderers, and sequences update, per-eye draw and finish for every
/// frame.
pub struct StereoPipeline {
    config: RenderConfig,
    surface: RenderSurface,
    rig: StereoRig,
    eye_buffer: Pixmap,
    terrain: TerrainRenderer,
    hud: HudRenderer,
    active: bool,
    frames: u64,
}

impl StereoPipeline {
    pub fn new(
        config: RenderConfig,
        stereo: StereoConfig,
        terrain: TerrainConfig,
    ) -> Result<Self, SimError> {
        let surface = RenderSurface::new(config.screen_dims)?;
        let rig = StereoRig::new(stereo, config.screen_dims)?;
        let eye_buffer = Self::make_eye_buffer(&rig)?;

        let mut pipeline = Self {
            config,
            surface,
            rig,
            eye_buffer,
            terrain: TerrainRenderer::new(terrain)?,
            hud: HudRenderer::new(),
            active: false,
            frames: 0,
        };
        pipeline.setup()?;
        Ok(pipeline)
    }

    fn make_eye_buffer(rig: &StereoRig) -> Result<Pixmap, SimError> {
        let vp = rig.eye(EyeSide::Left).viewport;
        Pixmap::new(vp.width, vp.height).ok_or_else(|| {
            SimError::RenderError(format!(
                "Invalid eye buffer dimensions: {}x{}",
                vp.width, vp.height
            ))
        })
    }

    /// Bring both renderers up against the surface. Called by new(); may be
    /// called again after shutdown().
    pub fn setup(&mut self) -> Result<(), SimError> {
        self.terrain.setup(&self.surface)?;
        self.hud.setup(&self.surface)?;
        self.active = true;
        info!(
            "Stereo pipeline up: display {}x{}",
            self.config.screen_dims.x, self.config.screen_dims.y
        );
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.terrain.shutdown(&self.surface);
        self.hud.shutdown(&self.surface);
        self.active = false;
    }

    pub fn resize(&mut self, dims: Vec2) -> Result<(), SimError> {
        self.surface.resize(dims)?;
        self.rig.resize(dims);
        self.eye_buffer = Self::make_eye_buffer(&self.rig)?;
        self.terrain.resize(dims);
        self.hud.resize(dims);
        self.config.screen_dims = dims;
        Ok(())
    }

    /// Render one stereo frame: update both renderers, draw terrain then HUD
    /// for each eye, compose and finish. Returns the side-by-side pixmap.
    pub fn render_frame(&mut self, ctx: &FrameContext) -> Result<&Pixmap, SimError> {
        if !self.active {
            return Err(SimError::RenderError(
                "Pipeline rendered after shutdown".into(),
            ));
        }

        self.terrain.update(ctx)?;
        // Terrain owns the ambient colour; the HUD is tinted by it.
        self.hud.set_hud_color(self.terrain.hud_color());
        self.hud.update(ctx)?;

        self.surface.clear(self.config.background);

        let eyes: [Eye; 2] = [
            *self.rig.eye(EyeSide::Left),
            *self.rig.eye(EyeSide::Right),
        ];
        for eye in &eyes {
            self.terrain.draw_eye(&mut self.eye_buffer, eye)?;
            self.hud.draw_eye(&mut self.eye_buffer, eye)?;
            self.surface.pixmap_mut().draw_pixmap(
                eye.viewport.x as i32,
                eye.viewport.y as i32,
                self.eye_buffer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        let dims = self.surface.dims();
        let full = Viewport::full(dims.x as u32, dims.y as u32);
        self.terrain.finish_frame(full)?;
        self.hud.finish_frame(full)?;
        self.frames += 1;

        Ok(self.surface.pixmap())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SimError> {
        self.surface
            .pixmap()
            .save_png(path)
            .map_err(|e| SimError::RenderError(format!("Failed to write PNG: {}", e)))
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    pub fn terrain(&self) -> &TerrainRenderer {
        &self.terrain
    }

    pub fn hud(&self) -> &HudRenderer {
        &self.hud
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
