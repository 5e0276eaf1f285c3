//! # Engine Configuration
//!
//! Settings for building and running a world, read from a JSON file. Every
//! field is optional in the file and falls back to its default.
//!
//! ```json
//! { "width": 32, "height": 32, "depth": 40, "terrain": { "seed": 7 } }
//! ```

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::generation::TerrainParams;
use crate::error::{WorldError, WorldResult};

/// Environment variable naming the config file `run()` reads.
pub const CONFIG_ENV_VAR: &str = "DORFDELF_CONFIG";

/// Settings of an engine run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cells along x.
    pub width: usize,
    /// Cells along y.
    pub height: usize,
    /// Cells along z; also the number of slices.
    pub depth: usize,
    /// Noise settings used when generating.
    pub terrain: TerrainParams,
    /// World to load instead of generating one.
    pub world_file: Option<PathBuf>,
    /// Where to save the world after the demo run.
    pub save_file: Option<PathBuf>,
    /// Ticks the headless demo runs for.
    pub demo_ticks: u32,
    /// Radius of the bomb the demo drops.
    pub bomb_radius: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            width: 64,
            height: 64,
            depth: 80,
            terrain: TerrainParams::default(),
            world_file: None,
            save_file: None,
            demo_ticks: 120,
            bomb_radius: 5,
        }
    }
}

impl EngineConfig {
    /// Reads and validates the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads the config named by `DORFDELF_CONFIG`, or the defaults if the
    /// variable is unset.
    pub fn from_env() -> WorldResult<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => EngineConfig::load(path),
            None => {
                info!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(EngineConfig::default())
            }
        }
    }

    /// Rejects configurations that cannot produce a world.
    pub fn validate(&self) -> WorldResult<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(WorldError::InvalidConfig(format!(
                "world extents must be non-zero, got {}x{}x{}",
                self.width, self.height, self.depth
            )));
        }
        if self.terrain.scale <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "terrain scale must be positive, got {}",
                self.terrain.scale
            )));
        }
        Ok(())
    }
}
