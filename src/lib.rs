pub mod aircraft;
pub mod pipeline;
pub mod rendering;
pub mod stereo;
pub mod terrain;
pub mod utils;

pub use aircraft::{Aircraft, AircraftControls, AircraftState, KinematicDynamics};
pub use pipeline::StereoPipeline;
pub use rendering::{EyeRenderer, FrameContext, HudRenderer, RenderConfig, TerrainRenderer};
pub use stereo::{Eye, EyeSide, HeadTransform, StereoConfig, StereoRig, Viewport};
pub use terrain::{Heightfield, TerrainConfig};
pub use utils::errors::SimError;
