use glam::Vec2;
use noise::{NoiseFn, OpenSimplex};

pub struct NoiseGenerator {
    noise: OpenSimplex,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            noise: OpenSimplex::new(seed as u32),
        }
    }

    // Generate noise with multiple octaves for more natural terrain
    pub fn get_noise(
        &self,
        pos: Vec2,
        scale: f32,
        octaves: u32,
        persistence: f32,
        lacunarity: f32,
    ) -> f32 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut noise_value = 0.0;
        let mut weight = 0.0;

        for _ in 0..octaves {
            let sample_x = pos.x as f64 * frequency as f64 / scale as f64;
            let sample_y = pos.y as f64 * frequency as f64 / scale as f64;

            let noise_val = self.noise.get([sample_x, sample_y]) as f32;
            noise_value += noise_val * amplitude;

            weight += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        // Normalize the result
        noise_value / weight
    }
}
