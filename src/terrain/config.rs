use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::errors::SimError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseParams {
    pub scale: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    /// Multiplier applied to `scale` for the moisture field.
    pub moisture_scale: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 1800.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            moisture_scale: 2.5,
        }
    }
}

/// One height band of the biome table. Bands are matched in order against
/// the normalized height in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeBand {
    pub name: String,
    pub max_height: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FogConfig {
    /// Exponential fog density per metre of view distance.
    pub density: f32,
    pub color: [f32; 4],
    pub sky_color: [f32; 4],
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            density: 4.5e-4,
            color: [0.72, 0.78, 0.84, 1.0],
            sky_color: [0.45, 0.65, 0.92, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    pub seed: u64,
    /// Edge length of one terrain cell, metres.
    pub cell_size_m: f32,
    /// Cells rendered in each direction around the aircraft.
    pub grid_radius: u32,
    pub min_height_m: f32,
    pub max_height_m: f32,
    /// Normalized heights at or below this level are flattened to water.
    pub water_level: f32,
    pub noise: NoiseParams,
    pub biomes: Vec<BiomeBand>,
    pub fog: FogConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cell_size_m: 90.0,
            grid_radius: 28,
            min_height_m: -40.0,
            max_height_m: 900.0,
            water_level: 0.35,
            noise: NoiseParams::default(),
            biomes: vec![
                BiomeBand {
                    name: "water".into(),
                    max_height: 0.35,
                    color: [0.13, 0.30, 0.52, 1.0],
                },
                BiomeBand {
                    name: "sand".into(),
                    max_height: 0.40,
                    color: [0.76, 0.70, 0.50, 1.0],
                },
                BiomeBand {
                    name: "grass".into(),
                    max_height: 0.58,
                    color: [0.33, 0.51, 0.25, 1.0],
                },
                BiomeBand {
                    name: "forest".into(),
                    max_height: 0.74,
                    color: [0.18, 0.35, 0.16, 1.0],
                },
                BiomeBand {
                    name: "rock".into(),
                    max_height: 0.88,
                    color: [0.48, 0.44, 0.42, 1.0],
                },
                BiomeBand {
                    name: "snow".into(),
                    max_height: 1.0,
                    color: [0.92, 0.93, 0.95, 1.0],
                },
            ],
            fog: FogConfig::default(),
        }
    }
}

impl TerrainConfig {
    pub fn from_yaml(path: &Path) -> Result<Self, SimError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.cell_size_m <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "Cell size must be positive: {}",
                self.cell_size_m
            )));
        }
        if self.grid_radius == 0 {
            return Err(SimError::InvalidConfig("Grid radius must be > 0".into()));
        }
        if self.max_height_m <= self.min_height_m {
            return Err(SimError::InvalidConfig(format!(
                "Height range is empty: {} .. {}",
                self.min_height_m, self.max_height_m
            )));
        }
        if self.biomes.is_empty() {
            return Err(SimError::InvalidConfig("Biome table is empty".into()));
        }
        let mut last = 0.0f32;
        for band in &self.biomes {
            if band.max_height < last {
                return Err(SimError::InvalidConfig(format!(
                    "Biome band '{}' is out of order",
                    band.name
                )));
            }
            last = band.max_height;
        }
        Ok(())
    }
}
