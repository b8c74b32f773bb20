use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, info};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::rendering::renderer::EyeRenderer;
use crate::rendering::types::{to_color, FrameContext, RenderSurface};
use crate::stereo::{Eye, Viewport};
use crate::terrain::{Heightfield, Patch, TerrainConfig};
use crate::utils::errors::SimError;
use crate::utils::math::{attitude_to_render, ned_to_render, view_from_pose};

/// Simulated day length driving the ambient light cycle, seconds.
const DAY_LENGTH_S: f64 = 600.0;

/// Clip-space w below which a terrain corner counts as behind the eye.
const NEAR_W: f32 = 0.1;

/// Altitude above terrain at which the ambient colour is fully sky, metres.
const AMBIENT_BLEND_CEILING_M: f32 = 1500.0;

/// Draws the procedural terrain for each eye and reports the ambient/fog
/// colour the HUD is tinted with.
pub struct TerrainRenderer {
    field: Heightfield,
    ready: bool,
    updated: bool,
    time_s: f64,
    frames: u64,
    camera: Vec3,
    world_view: Mat4,
    patch: Option<Patch>,
    hud_color: Vec4,
}

impl TerrainRenderer {
    pub fn new(config: TerrainConfig) -> Result<Self, SimError> {
        let fog = Vec4::from_array(config.fog.color);
        Ok(Self {
            field: Heightfield::new(config)?,
            ready: false,
            updated: false,
            time_s: 0.0,
            frames: 0,
            camera: Vec3::ZERO,
            world_view: Mat4::IDENTITY,
            patch: None,
            hud_color: fog,
        })
    }

    /// Current ambient/fog colour; the orchestrator feeds this to the HUD.
    pub fn hud_color(&self) -> Vec4 {
        self.hud_color
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ambient light factor over the simulated day, in [0.7, 1.0].
    fn daylight(&self) -> f32 {
        let phase = (self.time_s / DAY_LENGTH_S) * std::f64::consts::TAU;
        (0.85 + 0.15 * phase.cos()) as f32
    }

    fn lit(&self, color: Vec4) -> Vec4 {
        let d = self.daylight();
        Vec4::new(color.x * d, color.y * d, color.z * d, color.w)
    }

    fn refresh_patch(&mut self, sample_center: Vec2) {
        let config = self.field.config();
        let cell = config.cell_size_m;
        let radius = config.grid_radius;
        let expected = Vec2::new(
            (sample_center.x / cell).floor() * cell - radius as f32 * cell,
            (sample_center.y / cell).floor() * cell - radius as f32 * cell,
        );

        if self.patch.as_ref().map(|p| p.origin) != Some(expected) {
            debug!(
                "Resampling terrain patch at origin ({:.0}, {:.0})",
                expected.x, expected.y
            );
            self.patch = Some(self.field.sample_patch(sample_center, radius));
        }
    }

    fn refresh_ambient(&mut self, sample_center: Vec2) {
        let fog = &self.field.config().fog;
        let ground = self.field.height_at(sample_center);
        let above = (self.camera.y - ground).max(0.0);
        let t = (above / AMBIENT_BLEND_CEILING_M).clamp(0.0, 1.0);
        let base = Vec4::from_array(fog.color).lerp(Vec4::from_array(fog.sky_color), t);
        self.hud_color = self.lit(base);
    }

    fn project(vp: &Mat4, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = *vp * world.extend(1.0);
        if clip.w < NEAR_W {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(Vec2::new(
            (ndc_x * 0.5 + 0.5) * width,
            (1.0 - (ndc_y * 0.5 + 0.5)) * height,
        ))
    }
}

impl EyeRenderer for TerrainRenderer {
    fn setup(&mut self, surface: &RenderSurface) -> Result<(), SimError> {
        let dims = surface.dims();
        info!(
            "Terrain renderer ready: seed {}, surface {}x{}",
            self.field.config().seed,
            dims.x,
            dims.y
        );
        self.ready = true;
        Ok(())
    }

    fn shutdown(&mut self, _surface: &RenderSurface) {
        self.ready = false;
        self.updated = false;
        self.patch = None;
    }

    fn resize(&mut self, dims: Vec2) {
        debug!("Terrain renderer resized to {}x{}", dims.x, dims.y);
    }

    fn update(&mut self, ctx: &FrameContext) -> Result<(), SimError> {
        if !self.ready {
            return Err(SimError::RenderError(
                "Terrain renderer updated before setup".into(),
            ));
        }

        self.time_s += ctx.dt.max(0.0);
        self.camera = ned_to_render(&ctx.aircraft.position);
        let rotation = attitude_to_render(&ctx.aircraft.attitude);
        self.world_view = ctx.head.view() * view_from_pose(self.camera, rotation);

        let sample_center = Vec2::new(self.camera.x, self.camera.z);
        self.refresh_patch(sample_center);
        self.refresh_ambient(sample_center);
        self.updated = true;
        Ok(())
    }

    fn draw_eye(&mut self, target: &mut Pixmap, eye: &Eye) -> Result<(), SimError> {
        if !self.updated {
            return Err(SimError::RenderError(
                "Terrain renderer drawn before update".into(),
            ));
        }
        let patch = self.patch.as_ref().ok_or_else(|| {
            SimError::RenderError("Terrain renderer has no sampled patch".into())
        })?;

        let width = target.width() as f32;
        let height = target.height() as f32;
        let fog_config = self.field.config().fog.clone();

        target.fill(to_color(self.lit(Vec4::from_array(fog_config.sky_color))));

        let vp = eye.view_projection(self.world_view);
        let fog_color = self.lit(Vec4::from_array(fog_config.color));

        // Painter's algorithm: fill cells far to near so nearer terrain
        // overwrites what it occludes.
        let n = patch.cells_per_side;
        let mut order: Vec<(usize, usize, f32)> = Vec::with_capacity(n * n);
        for iy in 0..n {
            for ix in 0..n {
                let c = patch.cell_center(ix, iy);
                let mid = Vec3::new(c.x, patch.corner_height(ix, iy), c.y);
                order.push((ix, iy, mid.distance(self.camera)));
            }
        }
        order.sort_by(|a, b| b.2.total_cmp(&a.2));

        let mut paint = Paint::default();
        paint.anti_alias = false;

        for (ix, iy, dist) in order {
            let corners = [
                (ix, iy),
                (ix + 1, iy),
                (ix + 1, iy + 1),
                (ix, iy + 1),
            ];

            let mut screen = [Vec2::ZERO; 4];
            let mut visible = true;
            for (i, (cx, cy)) in corners.iter().enumerate() {
                let w2 = patch.corner_world(*cx, *cy);
                let world = Vec3::new(w2.x, patch.corner_height(*cx, *cy), w2.y);
                match Self::project(&vp, world, width, height) {
                    Some(p) => screen[i] = p,
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if !visible {
                continue;
            }

            // Reject quads entirely outside the eye's pixel rect.
            let all_left = screen.iter().all(|p| p.x < 0.0);
            let all_right = screen.iter().all(|p| p.x > width);
            let all_above = screen.iter().all(|p| p.y < 0.0);
            let all_below = screen.iter().all(|p| p.y > height);
            if all_left || all_right || all_above || all_below {
                continue;
            }

            let fog = 1.0 - (-fog_config.density * dist).exp();
            let color = self
                .lit(patch.cell_color(ix, iy))
                .lerp(fog_color, fog.clamp(0.0, 1.0));
            paint.set_color(to_color(color));

            let mut pb = PathBuilder::new();
            pb.move_to(screen[0].x, screen[0].y);
            pb.line_to(screen[1].x, screen[1].y);
            pb.line_to(screen[2].x, screen[2].y);
            pb.line_to(screen[3].x, screen[3].y);
            pb.close();
            if let Some(path) = pb.finish() {
                target.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }

        Ok(())
    }

    fn finish_frame(&mut self, _viewport: Viewport) -> Result<(), SimError> {
        if !self.ready {
            return Err(SimError::RenderError(
                "Terrain renderer finished before setup".into(),
            ));
        }
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::AircraftState;
    use crate::stereo::{HeadTransform, StereoConfig, StereoRig};

    fn setup_renderer() -> (TerrainRenderer, RenderSurface) {
        let surface = RenderSurface::new(Vec2::new(256.0, 128.0)).unwrap();
        let mut renderer = TerrainRenderer::new(TerrainConfig::default()).unwrap();
        renderer.setup(&surface).unwrap();
        (renderer, surface)
    }

    fn context() -> FrameContext {
        FrameContext::new(1.0 / 30.0, AircraftState::default(), HeadTransform::default())
    }

    #[test]
    fn test_update_before_setup_errors() {
        let mut renderer = TerrainRenderer::new(TerrainConfig::default()).unwrap();
        assert!(renderer.update(&context()).is_err());
    }

    #[test]
    fn test_draw_before_update_errors() {
        let (mut renderer, _surface) = setup_renderer();
        let rig = StereoRig::new(StereoConfig::default(), Vec2::new(256.0, 128.0)).unwrap();
        let mut target = Pixmap::new(128, 128).unwrap();
        assert!(renderer
            .draw_eye(&mut target, rig.eyes()[0])
            .is_err());
    }

    #[test]
    fn test_ambient_color_rises_toward_sky() {
        let (mut renderer, _surface) = setup_renderer();
        let mut ctx = context();

        ctx.aircraft.position.z = -200.0;
        renderer.update(&ctx).unwrap();
        let low = renderer.hud_color();

        ctx.aircraft.position.z = -4000.0;
        renderer.update(&ctx).unwrap();
        let high = renderer.hud_color();

        let sky = Vec4::from_array(TerrainConfig::default().fog.sky_color);
        assert!(high.distance(sky) < low.distance(sky));
        for c in [low, high] {
            assert!(c.to_array().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_draw_covers_target() {
        let (mut renderer, _surface) = setup_renderer();
        renderer.update(&context()).unwrap();

        let rig = StereoRig::new(StereoConfig::default(), Vec2::new(256.0, 128.0)).unwrap();
        let mut target = Pixmap::new(128, 128).unwrap();
        renderer.draw_eye(&mut target, rig.eyes()[0]).unwrap();

        let lit = target.data().chunks(4).filter(|px| px[3] > 0).count();
        assert_eq!(lit, 128 * 128, "sky fill must cover every pixel");
    }

    #[test]
    fn test_shutdown_resets_lifecycle() {
        let (mut renderer, surface) = setup_renderer();
        renderer.update(&context()).unwrap();
        renderer.shutdown(&surface);
        assert!(renderer.update(&context()).is_err());
    }
}
