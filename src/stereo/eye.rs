use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::stereo::{EyeSide, Viewport};
use crate::utils::constants::{
    DEFAULT_FAR_M, DEFAULT_FOV_Y_DEG, DEFAULT_IPD_M, DEFAULT_NEAR_M,
};
use crate::utils::errors::SimError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StereoConfig {
    pub ipd_m: f32,
    pub fov_y_deg: f32,
    pub near_m: f32,
    pub far_m: f32,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            ipd_m: DEFAULT_IPD_M,
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            near_m: DEFAULT_NEAR_M,
            far_m: DEFAULT_FAR_M,
        }
    }
}

impl StereoConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(0.0..0.2).contains(&self.ipd_m) {
            return Err(SimError::InvalidConfig(format!(
                "Interpupillary distance out of range: {}",
                self.ipd_m
            )));
        }
        if !(10.0..=160.0).contains(&self.fov_y_deg) {
            return Err(SimError::InvalidConfig(format!(
                "Vertical FOV out of range: {}",
                self.fov_y_deg
            )));
        }
        if self.near_m <= 0.0 || self.far_m <= self.near_m {
            return Err(SimError::InvalidConfig(format!(
                "Invalid clip planes: near {} far {}",
                self.near_m, self.far_m
            )));
        }
        Ok(())
    }
}

/// One eye of the stereo pair: the view offset from the head, the perspective
/// projection and the destination viewport.
#[derive(Debug, Clone, Copy)]
pub struct Eye {
    pub side: EyeSide,
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Viewport,
}

impl Eye {
    /// Combined projection * eye-view matrix for a given head/world view.
    pub fn view_projection(&self, world_view: Mat4) -> Mat4 {
        self.projection * self.view * world_view
    }
}

/// Builds and owns the per-eye parameters for a side-by-side stereo display.
pub struct StereoRig {
    config: StereoConfig,
    display_dims: Vec2,
    left: Eye,
    right: Eye,
}

impl StereoRig {
    pub fn new(config: StereoConfig, display_dims: Vec2) -> Result<Self, SimError> {
        config.validate()?;
        let left = Self::build_eye(&config, display_dims, EyeSide::Left);
        let right = Self::build_eye(&config, display_dims, EyeSide::Right);
        Ok(Self {
            config,
            display_dims,
            left,
            right,
        })
    }

    fn build_eye(config: &StereoConfig, display_dims: Vec2, side: EyeSide) -> Eye {
        let viewport = Viewport::half(display_dims.x as u32, display_dims.y as u32, side);
        let half_ipd = config.ipd_m / 2.0;
        let offset = match side {
            EyeSide::Left => -half_ipd,
            EyeSide::Right => half_ipd,
        };

        // Camera shifts by +offset, so the view translates by -offset.
        let view = Mat4::from_translation(Vec3::new(-offset, 0.0, 0.0));
        let projection = Mat4::perspective_rh(
            config.fov_y_deg.to_radians(),
            viewport.aspect(),
            config.near_m,
            config.far_m,
        );

        Eye {
            side,
            view,
            projection,
            viewport,
        }
    }

    pub fn resize(&mut self, display_dims: Vec2) {
        self.display_dims = display_dims;
        self.left = Self::build_eye(&self.config, display_dims, EyeSide::Left);
        self.right = Self::build_eye(&self.config, display_dims, EyeSide::Right);
    }

    pub fn eyes(&self) -> [&Eye; 2] {
        [&self.left, &self.right]
    }

    pub fn eye(&self, side: EyeSide) -> &Eye {
        match side {
            EyeSide::Left => &self.left,
            EyeSide::Right => &self.right,
        }
    }

    pub fn config(&self) -> &StereoConfig {
        &self.config
    }

    pub fn display_dims(&self) -> Vec2 {
        self.display_dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> StereoRig {
        StereoRig::new(StereoConfig::default(), Vec2::new(1024.0, 512.0)).unwrap()
    }

    #[test]
    fn test_eye_offsets_are_symmetric() {
        let rig = rig();
        let left = rig.eye(EyeSide::Left).view.w_axis;
        let right = rig.eye(EyeSide::Right).view.w_axis;

        assert_relative_eq!(left.x, -right.x, epsilon = 1e-6);
        assert_relative_eq!(left.x, DEFAULT_IPD_M / 2.0, epsilon = 1e-6);
        assert_relative_eq!(left.y, 0.0);
        assert_relative_eq!(left.z, 0.0);
    }

    #[test]
    fn test_viewports_tile_display() {
        let rig = rig();
        let left = rig.eye(EyeSide::Left).viewport;
        let right = rig.eye(EyeSide::Right).viewport;

        assert_eq!(left.x + left.width, right.x);
        assert_eq!(left.width + right.width, 1024);
    }

    #[test]
    fn test_resize_rebuilds_projection() {
        let mut rig = rig();
        let before = rig.eye(EyeSide::Left).projection;
        rig.resize(Vec2::new(2048.0, 512.0));
        let after = rig.eye(EyeSide::Left).projection;

        assert_ne!(before, after);
        assert_eq!(rig.eye(EyeSide::Right).viewport.width, 1024);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StereoConfig {
            near_m: 10.0,
            far_m: 1.0,
            ..Default::default()
        };
        assert!(StereoRig::new(config, Vec2::new(1024.0, 512.0)).is_err());
    }
}
