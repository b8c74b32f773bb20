use glam::{Vec2, Vec4};
use tiny_skia::{Color, Pixmap};

use crate::aircraft::AircraftState;
use crate::stereo::HeadTransform;
use crate::utils::errors::SimError;

/// Convert an RGBA vector in [0, 1] to a tiny-skia colour.
pub fn to_color(v: Vec4) -> Color {
    Color::from_rgba(
        v.x.clamp(0.0, 1.0),
        v.y.clamp(0.0, 1.0),
        v.z.clamp(0.0, 1.0),
        v.w.clamp(0.0, 1.0),
    )
    .unwrap_or(Color::WHITE)
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Full side-by-side display size in pixels.
    pub screen_dims: Vec2,
    pub background: Vec4,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_dims: Vec2::new(1280.0, 640.0),
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// The CPU render target handed to renderer setup/shutdown: the composed
/// side-by-side pixmap both eyes end up in.
pub struct RenderSurface {
    pixmap: Pixmap,
}

impl RenderSurface {
    pub fn new(dims: Vec2) -> Result<Self, SimError> {
        let pixmap = Pixmap::new(dims.x as u32, dims.y as u32).ok_or_else(|| {
            SimError::RenderError(format!("Invalid surface dimensions: {}x{}", dims.x, dims.y))
        })?;
        Ok(Self { pixmap })
    }

    pub fn resize(&mut self, dims: Vec2) -> Result<(), SimError> {
        *self = Self::new(dims)?;
        Ok(())
    }

    pub fn dims(&self) -> Vec2 {
        Vec2::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    pub fn clear(&mut self, color: Vec4) {
        self.pixmap.fill(to_color(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

/// Everything the renderers consume for one frame.
#[derive(Debug, Clone)]
pub struct FrameContext {
    pub dt: f64,
    pub aircraft: AircraftState,
    pub head: HeadTransform,
}

impl FrameContext {
    pub fn new(dt: f64, aircraft: AircraftState, head: HeadTransform) -> Self {
        Self { dt, aircraft, head }
    }
}
