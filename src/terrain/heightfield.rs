use glam::{Vec2, Vec4};
use rand::Rng;
use rayon::prelude::*;

use crate::terrain::config::{BiomeBand, TerrainConfig};
use crate::terrain::noise::NoiseGenerator;
use crate::utils::errors::SimError;
use crate::utils::rng::RngManager;

/// Procedural terrain sampled on demand: an octaved height field, a moisture
/// field for shading, and a biome table mapping normalized height to colour.
pub struct Heightfield {
    config: TerrainConfig,
    height_noise: NoiseGenerator,
    moisture_noise: NoiseGenerator,
}

impl Heightfield {
    pub fn new(config: TerrainConfig) -> Result<Self, SimError> {
        config.validate()?;
        let rng = RngManager::new(config.seed);
        let height_seed = rng.get_rng("terrain_height").gen::<u64>();
        let moisture_seed = rng.get_rng("terrain_moisture").gen::<u64>();

        Ok(Self {
            config,
            height_noise: NoiseGenerator::new(height_seed),
            moisture_noise: NoiseGenerator::new(moisture_seed),
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Height mapped to [0, 1], with everything at or below the water level
    /// flattened to it.
    pub fn normalized_height(&self, pos: Vec2) -> f32 {
        let n = &self.config.noise;
        let raw = self
            .height_noise
            .get_noise(pos, n.scale, n.octaves, n.persistence, n.lacunarity);
        let normalized = (raw + 1.0) / 2.0;
        normalized.max(self.config.water_level).min(1.0)
    }

    /// Terrain elevation in metres at a world XY position.
    pub fn height_at(&self, pos: Vec2) -> f32 {
        let span = self.config.max_height_m - self.config.min_height_m;
        self.config.min_height_m + self.normalized_height(pos) * span
    }

    pub fn moisture_at(&self, pos: Vec2) -> f32 {
        let n = &self.config.noise;
        let raw = self.moisture_noise.get_noise(
            pos,
            n.scale * n.moisture_scale,
            n.octaves.saturating_sub(1).max(1),
            n.persistence,
            n.lacunarity,
        );
        (raw + 1.0) / 2.0
    }

    pub fn biome_at(&self, pos: Vec2) -> &BiomeBand {
        let height = self.normalized_height(pos);
        self.config
            .biomes
            .iter()
            .find(|band| height <= band.max_height)
            .unwrap_or_else(|| self.config.biomes.last().unwrap())
    }

    /// Biome colour with moisture shading applied. Water keeps its colour.
    pub fn color_at(&self, pos: Vec2) -> Vec4 {
        let band = self.biome_at(pos);
        let color = Vec4::from_array(band.color);
        if self.normalized_height(pos) <= self.config.water_level {
            return color;
        }
        let shade = 1.0 - 0.22 * self.moisture_at(pos);
        Vec4::new(color.x * shade, color.y * shade, color.z * shade, color.w)
    }

    /// Sample a square patch of cells centred on a world position. The patch
    /// origin snaps to the cell grid so a moving centre produces stable
    /// samples. Corner heights are sampled row-parallel.
    pub fn sample_patch(&self, center: Vec2, radius_cells: u32) -> Patch {
        let cell = self.config.cell_size_m;
        let cells = (radius_cells * 2) as usize;
        let corners = cells + 1;

        let origin = Vec2::new(
            (center.x / cell).floor() * cell - radius_cells as f32 * cell,
            (center.y / cell).floor() * cell - radius_cells as f32 * cell,
        );

        let mut heights = vec![0.0f32; corners * corners];
        heights
            .par_chunks_mut(corners)
            .enumerate()
            .for_each(|(iy, row)| {
                for (ix, h) in row.iter_mut().enumerate() {
                    let pos = origin + Vec2::new(ix as f32 * cell, iy as f32 * cell);
                    *h = self.height_at(pos);
                }
            });

        let mut colors = vec![Vec4::ZERO; cells * cells];
        colors
            .par_chunks_mut(cells)
            .enumerate()
            .for_each(|(iy, row)| {
                for (ix, c) in row.iter_mut().enumerate() {
                    let pos = origin
                        + Vec2::new((ix as f32 + 0.5) * cell, (iy as f32 + 0.5) * cell);
                    *c = self.color_at(pos);
                }
            });

        Patch {
            origin,
            cell_size: cell,
            cells_per_side: cells,
            heights,
            colors,
        }
    }
}

/// A sampled square of terrain: corner heights on a (n+1)x(n+1) grid and one
/// colour per cell.
#[derive(Debug, Clone)]
pub struct Patch {
    pub origin: Vec2,
    pub cell_size: f32,
    pub cells_per_side: usize,
    heights: Vec<f32>,
    colors: Vec<Vec4>,
}

impl Patch {
    pub fn corner_height(&self, ix: usize, iy: usize) -> f32 {
        self.heights[iy * (self.cells_per_side + 1) + ix]
    }

    pub fn corner_world(&self, ix: usize, iy: usize) -> Vec2 {
        self.origin + Vec2::new(ix as f32 * self.cell_size, iy as f32 * self.cell_size)
    }

    pub fn cell_color(&self, ix: usize, iy: usize) -> Vec4 {
        self.colors[iy * self.cells_per_side + ix]
    }

    pub fn cell_center(&self, ix: usize, iy: usize) -> Vec2 {
        self.origin
            + Vec2::new(
                (ix as f32 + 0.5) * self.cell_size,
                (iy as f32 + 0.5) * self.cell_size,
            )
    }
}
