use glam::{Vec2, Vec4};
use log::{debug, info};
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::rendering::digits::{digit_width, draw_number};
use crate::rendering::renderer::EyeRenderer;
use crate::rendering::types::{to_color, FrameContext, RenderSurface};
use crate::stereo::{Eye, EyeSide, Viewport};
use crate::utils::errors::SimError;
use crate::utils::math::{flight_path_angle, heading_from_velocity, rad_to_deg};

/// Horizontal pixel shift per eye that places the HUD at an apparent depth
/// in front of the camera instead of at infinity.
const EYE_DEPTH_SHIFT_PX: f32 = 4.0;

/// Heads-up display: attitude ladder, heading tape, altitude and airspeed
/// readouts, all stroked in a single tint colour.
pub struct HudRenderer {
    ready: bool,
    updated: bool,
    frames: u64,
    hud_color: Vec4,
    // Display state derived in update()
    roll_deg: f32,
    pitch_deg: f32,
    heading_deg: f32,
    altitude_m: f32,
    airspeed_ms: f32,
    head_yaw_deg: f32,
    head_pitch_deg: f32,
    // Flight-path marker offset from the boresight, degrees
    fpm_dx_deg: f32,
    fpm_dy_deg: f32,
}

impl HudRenderer {
    pub fn new() -> Self {
        Self {
            ready: false,
            updated: false,
            frames: 0,
            hud_color: Vec4::new(0.35, 1.0, 0.45, 0.9),
            roll_deg: 0.0,
            pitch_deg: 0.0,
            heading_deg: 0.0,
            altitude_m: 0.0,
            airspeed_ms: 0.0,
            head_yaw_deg: 0.0,
            head_pitch_deg: 0.0,
            fpm_dx_deg: 0.0,
            fpm_dy_deg: 0.0,
        }
    }

    /// Set the overlay tint. Takes effect on the next draw.
    pub fn set_hud_color(&mut self, color: Vec4) {
        self.hud_color = color.clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn hud_color(&self) -> Vec4 {
        self.hud_color
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_color(self.hud_color));
        paint.anti_alias = true;
        paint
    }

    fn draw_attitude(&self, target: &mut Pixmap, center: Vec2, height: f32) {
        let paint = self.paint();
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };

        let ppd = height / 60.0;
        let display_pitch = self.pitch_deg + self.head_pitch_deg;
        let horizon_y = center.y + display_pitch * ppd;
        let rotation = Transform::identity().post_rotate_at(-self.roll_deg, center.x, center.y);

        let mut pb = PathBuilder::new();

        // Horizon line with a gap around the boresight
        let half = height * 0.55;
        let gap = height * 0.08;
        pb.move_to(center.x - half, horizon_y);
        pb.line_to(center.x - gap, horizon_y);
        pb.move_to(center.x + gap, horizon_y);
        pb.line_to(center.x + half, horizon_y);

        // Pitch ladder every 10 degrees, with end ticks toward the horizon
        for step in [-30.0f32, -20.0, -10.0, 10.0, 20.0, 30.0] {
            let y = horizon_y - step * ppd;
            let bar = height * 0.16;
            let tick = height * 0.03 * step.signum();
            pb.move_to(center.x - bar, y);
            pb.line_to(center.x - gap, y);
            pb.move_to(center.x + gap, y);
            pb.line_to(center.x + bar, y);
            pb.move_to(center.x - bar, y);
            pb.line_to(center.x - bar, y + tick);
            pb.move_to(center.x + bar, y);
            pb.line_to(center.x + bar, y + tick);
        }

        if let Some(path) = pb.finish() {
            target.stroke_path(&path, &paint, &stroke, rotation, None);
        }

        // Flight-path marker: a ringed dot with stub wings at the velocity
        // vector, clamped to the attitude area.
        let limit = height * 0.3;
        let fx = center.x + (self.fpm_dx_deg * ppd).clamp(-limit, limit);
        let fy = center.y + (self.fpm_dy_deg * ppd).clamp(-limit, limit);
        let r = gap * 0.3;
        let mut pb = PathBuilder::new();
        pb.push_circle(fx, fy, r);
        pb.move_to(fx - r * 2.2, fy);
        pb.line_to(fx - r, fy);
        pb.move_to(fx + r, fy);
        pb.line_to(fx + r * 2.2, fy);
        pb.move_to(fx, fy - r);
        pb.line_to(fx, fy - r * 1.8);
        if let Some(path) = pb.finish() {
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        // Boresight stays screen-fixed
        let mut pb = PathBuilder::new();
        pb.move_to(center.x - gap, center.y);
        pb.line_to(center.x - gap * 0.3, center.y);
        pb.move_to(center.x + gap * 0.3, center.y);
        pb.line_to(center.x + gap, center.y);
        pb.move_to(center.x, center.y - gap * 0.4);
        pb.line_to(center.x, center.y);
        if let Some(path) = pb.finish() {
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn draw_heading_tape(&self, target: &mut Pixmap, center_x: f32, width: f32, height: f32) {
        let paint = self.paint();
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };

        let tape_y = height * 0.08;
        let ppd = (width * 0.8) / 90.0;
        let display_heading = self.heading_deg + self.head_yaw_deg;

        let mut pb = PathBuilder::new();
        let mut tick = (display_heading / 10.0).floor() as i32 * 10 - 50;
        while tick <= display_heading as i32 + 50 {
            let diff = (tick as f32 - display_heading + 540.0).rem_euclid(360.0) - 180.0;
            if diff.abs() <= 45.0 {
                let x = center_x + diff * ppd;
                let len = if tick.rem_euclid(30) == 0 {
                    height * 0.035
                } else {
                    height * 0.02
                };
                pb.move_to(x, tape_y);
                pb.line_to(x, tape_y + len);
            }
            tick += 10;
        }

        // Centre caret under the tape
        let caret = height * 0.02;
        pb.move_to(center_x - caret, tape_y + height * 0.055 + caret);
        pb.line_to(center_x, tape_y + height * 0.055);
        pb.line_to(center_x + caret, tape_y + height * 0.055 + caret);

        if let Some(path) = pb.finish() {
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        let glyph_h = height * 0.045;
        let heading = self.display_heading_rounded();
        let num_w = 3.0 * (digit_width(glyph_h) + glyph_h * 0.25);
        draw_number(
            target,
            heading,
            center_x + num_w / 2.0,
            tape_y + height * 0.09,
            glyph_h,
            &paint,
            &stroke,
        );
    }

    fn display_heading_rounded(&self) -> i64 {
        ((self.heading_deg + self.head_yaw_deg).rem_euclid(360.0)).round() as i64 % 360
    }

    fn draw_readout(
        &self,
        target: &mut Pixmap,
        value: i64,
        anchor_x: f32,
        center_y: f32,
        height: f32,
        right_align: bool,
    ) {
        let paint = self.paint();
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };

        let glyph_h = height * 0.05;
        let box_w = 4.5 * (digit_width(glyph_h) + glyph_h * 0.25);
        let box_h = glyph_h * 1.8;
        let left = if right_align {
            anchor_x - box_w
        } else {
            anchor_x
        };

        if let Some(rect) = Rect::from_xywh(left, center_y - box_h / 2.0, box_w, box_h) {
            let path = PathBuilder::from_rect(rect);
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        draw_number(
            target,
            value,
            left + box_w - glyph_h * 0.4,
            center_y - glyph_h / 2.0,
            glyph_h,
            &paint,
            &stroke,
        );
    }
}

impl Default for HudRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl EyeRenderer for HudRenderer {
    fn setup(&mut self, surface: &RenderSurface) -> Result<(), SimError> {
        let dims = surface.dims();
        info!("HUD renderer ready: surface {}x{}", dims.x, dims.y);
        self.ready = true;
        Ok(())
    }

    fn shutdown(&mut self, _surface: &RenderSurface) {
        self.ready = false;
        self.updated = false;
    }

    fn resize(&mut self, dims: Vec2) {
        debug!("HUD renderer resized to {}x{}", dims.x, dims.y);
    }

    fn update(&mut self, ctx: &FrameContext) -> Result<(), SimError> {
        if !self.ready {
            return Err(SimError::RenderError(
                "HUD renderer updated before setup".into(),
            ));
        }
        ctx.aircraft.validate()?;

        self.roll_deg = rad_to_deg(ctx.aircraft.roll()) as f32;
        self.pitch_deg = rad_to_deg(ctx.aircraft.pitch()) as f32;
        self.heading_deg = ctx.aircraft.heading_deg() as f32;
        self.altitude_m = ctx.aircraft.altitude() as f32;
        self.airspeed_ms = ctx.aircraft.airspeed() as f32;
        self.head_yaw_deg = ctx.head.yaw().to_degrees();
        self.head_pitch_deg = ctx.head.pitch().to_degrees();

        // Flight-path marker: where the velocity vector points relative to
        // the nose.
        if ctx.aircraft.airspeed() > 1.0 {
            let track_deg = rad_to_deg(heading_from_velocity(&ctx.aircraft.velocity)) as f32;
            let fpa_deg = rad_to_deg(flight_path_angle(&ctx.aircraft.velocity)) as f32;
            self.fpm_dx_deg =
                (track_deg - self.heading_deg + 540.0).rem_euclid(360.0) - 180.0;
            self.fpm_dy_deg = self.pitch_deg - fpa_deg;
        } else {
            self.fpm_dx_deg = 0.0;
            self.fpm_dy_deg = 0.0;
        }

        self.updated = true;
        Ok(())
    }

    fn draw_eye(&mut self, target: &mut Pixmap, eye: &Eye) -> Result<(), SimError> {
        if !self.updated {
            return Err(SimError::RenderError(
                "HUD renderer drawn before update".into(),
            ));
        }

        let width = target.width() as f32;
        let height = target.height() as f32;
        let shift = match eye.side {
            EyeSide::Left => EYE_DEPTH_SHIFT_PX,
            EyeSide::Right => -EYE_DEPTH_SHIFT_PX,
        };
        let center = Vec2::new(width / 2.0 + shift, height / 2.0);

        self.draw_attitude(target, center, height);
        self.draw_heading_tape(target, center.x, width, height);
        // Airspeed boxed on the left, altitude on the right
        self.draw_readout(
            target,
            self.airspeed_ms.round() as i64,
            width * 0.06 + shift,
            height / 2.0,
            height,
            false,
        );
        self.draw_readout(
            target,
            self.altitude_m.round() as i64,
            width * 0.94 + shift,
            height / 2.0,
            height,
            true,
        );

        Ok(())
    }

    fn finish_frame(&mut self, _viewport: Viewport) -> Result<(), SimError> {
        if !self.ready {
            return Err(SimError::RenderError(
                "HUD renderer finished before setup".into(),
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
    use glam::Vec2;

    fn setup_hud() -> (HudRenderer, RenderSurface) {
        let surface = RenderSurface::new(Vec2::new(256.0, 128.0)).unwrap();
        let mut hud = HudRenderer::new();
        hud.setup(&surface).unwrap();
        (hud, surface)
    }

    fn context() -> FrameContext {
        FrameContext::new(1.0 / 30.0, AircraftState::default(), HeadTransform::default())
    }

    fn lit_pixels(pixmap: &Pixmap) -> usize {
        pixmap.data().chunks(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn test_lifecycle_gating() {
        let mut hud = HudRenderer::new();
        assert!(hud.update(&context()).is_err());

        let (mut hud, surface) = setup_hud();
        let rig = StereoRig::new(StereoConfig::default(), Vec2::new(256.0, 128.0)).unwrap();
        let mut target = Pixmap::new(128, 128).unwrap();
        assert!(hud.draw_eye(&mut target, rig.eyes()[0]).is_err());

        hud.update(&context()).unwrap();
        assert!(hud.draw_eye(&mut target, rig.eyes()[0]).is_ok());
        hud.shutdown(&surface);
        assert!(hud.update(&context()).is_err());
    }

    #[test]
    fn test_hud_draws_in_tint_color() {
        let (mut hud, _surface) = setup_hud();
        hud.set_hud_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        hud.update(&context()).unwrap();

        let rig = StereoRig::new(StereoConfig::default(), Vec2::new(256.0, 128.0)).unwrap();
        let mut target = Pixmap::new(128, 128).unwrap();
        hud.draw_eye(&mut target, rig.eyes()[0]).unwrap();

        assert!(lit_pixels(&target) > 50);
        // Premultiplied pixels: everything drawn must be pure red.
        for px in target.data().chunks(4) {
            if px[3] > 0 {
                assert_eq!(px[1], 0, "green leaked into a red-tinted HUD");
                assert_eq!(px[2], 0, "blue leaked into a red-tinted HUD");
            }
        }
    }

    #[test]
    fn test_tint_is_clamped() {
        let mut hud = HudRenderer::new();
        hud.set_hud_color(Vec4::new(2.0, -1.0, 0.5, 3.0));
        assert_eq!(hud.hud_color(), Vec4::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_eyes_differ_by_depth_shift() {
        let (mut hud, _surface) = setup_hud();
        hud.update(&context()).unwrap();

        let rig = StereoRig::new(StereoConfig::default(), Vec2::new(256.0, 128.0)).unwrap();
        let mut left = Pixmap::new(128, 128).unwrap();
        let mut right = Pixmap::new(128, 128).unwrap();
        hud.draw_eye(&mut left, rig.eyes()[0]).unwrap();
        hud.draw_eye(&mut right, rig.eyes()[1]).unwrap();

        assert_ne!(left.data(), right.data());
    }

    #[test]
    fn test_finish_frame_counts() {
        let (mut hud, _surface) = setup_hud();
        hud.update(&context()).unwrap();
        let vp = Viewport::full(128, 128);
        hud.finish_frame(vp).unwrap();
        hud.finish_frame(vp).unwrap();
        assert_eq!(hud.frames(), 2);
    }
}
