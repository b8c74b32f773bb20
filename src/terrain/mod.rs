mod config;
mod heightfield;
mod noise;

pub use config::{BiomeBand, FogConfig, NoiseParams, TerrainConfig};
pub use heightfield::{Heightfield, Patch};
pub use noise::NoiseGenerator;
