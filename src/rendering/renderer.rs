use glam::Vec2;
use tiny_skia::Pixmap;

use crate::rendering::types::{FrameContext, RenderSurface};
use crate::stereo::{Eye, Viewport};
use crate::utils::errors::SimError;

/// The per-eye renderer contract. A frame is driven as
/// update -> draw_eye (once per eye) -> finish_frame, bracketed by setup and
/// shutdown against the surface, with resize delivered whenever the display
/// dimensions change.
pub trait EyeRenderer {
    /// Acquire per-surface resources. Must be called before any per-frame
    /// operation.
    fn setup(&mut self, surface: &RenderSurface) -> Result<(), SimError>;

    /// Release per-surface resources. Safe to call repeatedly.
    fn shutdown(&mut self, surface: &RenderSurface);

    /// The display changed size; per-eye buffers follow via the next draw.
    fn resize(&mut self, dims: Vec2);

    /// Absorb this frame's simulation state.
    fn update(&mut self, ctx: &FrameContext) -> Result<(), SimError>;

    /// Draw this renderer's content for one eye into an eye-sized target.
    fn draw_eye(&mut self, target: &mut Pixmap, eye: &Eye) -> Result<(), SimError>;

    /// Per-frame bookkeeping after both eyes have been drawn.
    fn finish_frame(&mut self, viewport: Viewport) -> Result<(), SimError>;
}
