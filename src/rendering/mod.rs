mod digits;
mod hud;
mod renderer;
mod terrain_renderer;
mod types;

pub use hud::HudRenderer;
pub use renderer::EyeRenderer;
pub use terrain_renderer::TerrainRenderer;
pub use types::{to_color, FrameContext, RenderConfig, RenderSurface};
