//! # Terrain Generation
//!
//! Fills a world from a fractal noise heightmap.
//!
//! Each column samples one noise value `n` and derives two terrain curves from
//! it, `h = n * 20 + mid_z` and `h2 = n * 7 + mid_z`. Cells below the higher
//! curve become solid; cells strictly between the curves are dirt, the rest
//! stone. Two post passes follow: void cells resting on a solid block are
//! turned into ramps where a neighbour allows it, and every solid block has its
//! hidden flag computed.
//!
//! Generation writes silently. Meshes are rebuilt wholesale afterwards.

use cgmath::Point3;
use log::info;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use super::block::substance::Substance;
use super::block::Block;
use super::world::{Propagation, World};

/// Tunables of the terrain noise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Seed of the Perlin source.
    pub seed: u32,
    /// World units per noise unit.
    pub scale: f64,
    /// Number of noise layers summed.
    pub octaves: usize,
    /// Frequency multiplier between layers.
    pub lacunarity: f64,
    /// Amplitude multiplier between layers.
    pub persistence: f64,
    /// Amplitude of the stone curve.
    pub amplitude: f64,
    /// Amplitude of the dirt curve.
    pub dirt_amplitude: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        TerrainParams {
            seed: 0,
            scale: 100.0,
            octaves: 5,
            lacunarity: 2.01,
            persistence: 0.65,
            amplitude: 20.0,
            dirt_amplitude: 7.0,
        }
    }
}

/// Generates terrain from any 2D noise source.
pub struct TerrainGenerator<N> {
    noise: N,
    scale: f64,
    amplitude: f64,
    dirt_amplitude: f64,
}

impl TerrainGenerator<Fbm<Perlin>> {
    /// A generator sampling fractal Perlin noise configured by `params`.
    pub fn from_params(params: &TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves)
            .set_lacunarity(params.lacunarity)
            .set_persistence(params.persistence);

        TerrainGenerator {
            noise,
            scale: params.scale,
            amplitude: params.amplitude,
            dirt_amplitude: params.dirt_amplitude,
        }
    }
}

impl<N: NoiseFn<f64, 2>> TerrainGenerator<N> {
    /// A generator sampling `noise` with the default scale and amplitudes.
    pub fn with_noise(noise: N) -> Self {
        let params = TerrainParams::default();
        TerrainGenerator {
            noise,
            scale: params.scale,
            amplitude: params.amplitude,
            dirt_amplitude: params.dirt_amplitude,
        }
    }

    /// The two terrain curves `(h, h2)` of column `(x, y)`.
    pub fn heights(&self, x: i32, y: i32, mid_z: f64) -> (f64, f64) {
        let n = self
            .noise
            .get([x as f64 / self.scale, y as f64 / self.scale]);
        (n * self.amplitude + mid_z, n * self.dirt_amplitude + mid_z)
    }

    /// Fills `world` with terrain. Existing contents below the surface are
    /// overwritten; nothing above it is cleared.
    pub fn generate(&self, world: &mut World) {
        let start = Instant::now();
        let mid_z = world.midpoint().z as f64;
        let depth = world.depth() as i32;

        for (x, y) in world.columns().collect::<Vec<_>>() {
            let (h, h2) = self.heights(x, y, mid_z);
            let top = (h.max(h2).floor() as i32).clamp(0, depth);

            for z in 0..top {
                let zf = z as f64;
                let substance = if h < zf && zf < h2 {
                    Substance::Dirt
                } else {
                    Substance::Stone
                };
                world.set_block_with(
                    Point3::new(x, y, z),
                    Block::solid(substance),
                    Propagation::Silent,
                );
            }
        }

        let positions: Vec<_> = world.positions().collect();

        let mut ramps = 0;
        for &position in &positions {
            let view = world.get_block(position);
            if view.is_void()
                && view.down().is_block()
                && world.make_ramp_with(position, Propagation::Silent)
            {
                ramps += 1;
            }
        }

        for &position in &positions {
            if world.get_block(position).is_block() {
                world.update_hidden_with(position, Propagation::Silent);
            }
        }

        info!(
            "Generated {}x{}x{} terrain with {} ramps in {:?}",
            world.width(),
            world.height(),
            world.depth(),
            ramps,
            start.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::form::FormKind;
    use noise::Constant;

    #[test]
    fn flat_noise_gives_flat_stone() {
        let mut world = World::new(8, 8, 10);
        TerrainGenerator::with_noise(Constant::new(0.0)).generate(&mut world);

        for (x, y) in world.columns().collect::<Vec<_>>() {
            for z in world.zlevels() {
                let view = world.get_block(Point3::new(x, y, z));
                if z < 5 {
                    assert!(view.is_block(), "({x}, {y}, {z}) should be solid");
                    assert_eq!(view.substance(), Substance::Stone);
                } else {
                    assert!(view.is_void(), "({x}, {y}, {z}) should be void");
                }
            }
        }
    }

    #[test]
    fn interior_of_flat_terrain_is_hidden() {
        let mut world = World::new(8, 8, 10);
        TerrainGenerator::with_noise(Constant::new(0.0)).generate(&mut world);

        assert!(world.get_block(Point3::new(3, 3, 2)).hidden());
        // The top layer has void above it, the outer columns touch the edge.
        assert!(!world.get_block(Point3::new(3, 3, 4)).hidden());
        assert!(!world.get_block(Point3::new(0, 3, 2)).hidden());
    }

    #[test]
    fn generation_is_silent() {
        let mut world = World::new(8, 8, 10);
        let updates = world.subscribe();
        TerrainGenerator::with_noise(Constant::new(0.0)).generate(&mut world);
        assert!(updates.try_recv().is_err());
    }

    #[test]
    fn dirt_lies_between_the_curves() {
        // n = -0.25 around mid_z = 5 gives h = 0 and h2 = 3.25.
        let mut world = World::new(2, 2, 10);
        TerrainGenerator::with_noise(Constant::new(-0.25)).generate(&mut world);

        let column: Vec<_> = world
            .zlevels()
            .map(|z| world.get_block(Point3::new(0, 0, z)))
            .collect();
        assert_eq!(column[0].substance(), Substance::Stone);
        assert_eq!(column[1].substance(), Substance::Dirt);
        assert_eq!(column[2].substance(), Substance::Dirt);
        assert_eq!(column[3].form(), Some(FormKind::Void));
    }

    #[test]
    fn seeded_terrain_is_deterministic() {
        let params = TerrainParams::default();
        let mut a = World::new(16, 16, 20);
        let mut b = World::new(16, 16, 20);
        TerrainGenerator::from_params(&params).generate(&mut a);
        TerrainGenerator::from_params(&params).generate(&mut b);
        assert_eq!(a.blocks(), b.blocks());
    }
}
