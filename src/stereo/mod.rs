mod eye;
mod head;
mod viewport;

pub use eye::{Eye, StereoConfig, StereoRig};
pub use head::HeadTransform;
pub use viewport::{EyeSide, Viewport};
