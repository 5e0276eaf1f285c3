#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Dorfdelf
//!
//! A voxel world simulation core: a dense grid of typed blocks, procedurally
//! generated, edited interactively, and turned into chunked meshes with
//! visibility per z-level ("slice").
//!
//! ## Key Modules
//!
//! * `config` - Engine settings loaded from JSON
//! * `core` - Shared-ownership primitives used by the scheduler
//! * `engine_state` - The world, its geometry and the tasks keeping them in step
//! * `error` - The error type of every fallible operation
//!
//! ## Architecture
//!
//! Generation and edits mutate the voxel grid. The grid publishes a block
//! update per committed change; the geometry marks the owning chunk dirty and
//! a per-slice task rebuilds one dirty chunk each tick from the live grid.
//! Rendering the produced mesh batches is left to the embedding application.
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     if let Err(err) = dorfdelf::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use log::info;
use web_time::Instant;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

use engine_state::voxels::tools;

pub use config::EngineConfig;
pub use engine_state::EngineState;
pub use error::{WorldError, WorldResult};

/// Label of the start-up timing log line.
pub const APPLICATION_INITIALIZATION_STOPWATCH: &str = "Application Initialization";

/// Runs the headless demo: builds the configured world, drops a bomb on a
/// random surface column, lets the geometry catch up and reports mesh
/// statistics.
pub fn run() -> WorldResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let start = Instant::now();
    let config = EngineConfig::from_env()?;
    let mut engine_state = EngineState::new(config)?;
    info!(
        "{} took {:?}",
        APPLICATION_INITIALIZATION_STOPWATCH,
        start.elapsed()
    );

    let midpoint = engine_state.world().get().midpoint();
    engine_state.change_slice(midpoint.z, false);
    engine_state.toggle_explore();

    let target = tools::random_surface(&engine_state.world().get());
    match target {
        Some(centre) => {
            let radius = engine_state.config().bomb_radius;
            let ramps = engine_state.bomb(centre, radius);
            info!("Dropped bomb at {:?}, {} ramps placed", centre, ramps);
        }
        None => info!("Picked an empty column, no bomb dropped"),
    }

    let ticks = engine_state.config().demo_ticks;
    for _ in 0..ticks {
        engine_state.tick();
    }

    info!(
        "After {} ticks: {:?}, {} chunks still dirty",
        ticks,
        engine_state.stats(),
        engine_state.pending_updates()
    );

    if let Some(path) = engine_state.config().save_file.clone() {
        engine_state.save(path)?;
    }

    Ok(())
}
