//! # Engine State Module
//!
//! The core engine module that owns the world and keeps its geometry current.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `rendering` - Chunked slice meshes, display policy and the rebuild tasks
//! * `task_management` - The cooperative per-tick scheduler
//! * `voxels` - The voxel grid, its forms, generation, edits and persistence
//!
//! ## Architecture
//!
//! `EngineState` holds the world and its geometry in shared single-threaded
//! handles. The recurring tasks it schedules hold clones of the same handles:
//! one task drains block updates into the geometry, and one task per slice
//! rebuilds a dirty chunk each tick. Edits made through the engine state (or
//! directly on the world) show up in the meshes within a few ticks.
//!
//! ## Slice focus
//!
//! The engine tracks the active slice and whether explore mode is on. Every
//! change to either is pushed to the geometry, which recomputes which slices
//! are drawn, how much they are dimmed and whether hidden geometry shows.

use std::path::Path;

use cgmath::Point3;
use log::info;
use rendering::{
    meshing::MeshStats,
    tasks::{BlockUpdateTask, SliceUpdateTask},
    WorldGeometry,
};
use task_management::TaskManager;
use voxels::{
    block::substance::Substance,
    form::FormKind,
    generation::TerrainGenerator,
    serialization, tools,
    world::World,
};

use crate::{config::EngineConfig, core::StResource, error::WorldResult};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container for the engine.
///
/// # Examples
///
/// ```
/// use dorfdelf::config::EngineConfig;
/// use dorfdelf::engine_state::EngineState;
///
/// let config = EngineConfig {
///     width: 16,
///     height: 16,
///     depth: 12,
///     ..EngineConfig::default()
/// };
/// let mut engine_state = EngineState::new(config).unwrap();
///
/// engine_state.change_slice(-2, true);
/// engine_state.toggle_explore();
/// engine_state.tick();
/// assert_eq!(engine_state.current_slice(), 4);
/// assert!(!engine_state.explore());
/// ```
pub struct EngineState {
    /// The voxel grid
    world: StResource<World>,
    /// Meshes of every slice of the grid
    geometry: StResource<WorldGeometry>,
    /// Scheduler running the geometry update tasks
    task_manager: TaskManager,
    /// Settings the state was built from
    config: EngineConfig,
    /// Z-level the view is focused on
    current_slice: i32,
    /// Whether every slice is drawn
    explore: bool,
}

impl EngineState {
    /// Builds the world described by `config`: loaded from `world_file` if
    /// set, generated from `terrain` otherwise.
    pub fn new(config: EngineConfig) -> WorldResult<Self> {
        config.validate()?;

        let world = match &config.world_file {
            Some(path) => serialization::load(path)?,
            None => {
                let mut world = World::new(config.width, config.height, config.depth);
                TerrainGenerator::from_params(&config.terrain).generate(&mut world);
                world
            }
        };

        Ok(EngineState::from_world(world, config))
    }

    /// Wraps an existing world, builds its geometry and schedules the update
    /// tasks.
    pub fn from_world(mut world: World, config: EngineConfig) -> Self {
        let geometry = StResource::new(WorldGeometry::new(&mut world));
        let depth = world.depth();
        let current_slice = world.midpoint().z;
        let world = StResource::new(world);

        let mut task_manager = TaskManager::new();
        task_manager.publish_task(Box::new(BlockUpdateTask::new(geometry.clone())));
        for z in 0..depth {
            task_manager.publish_task(Box::new(SliceUpdateTask::new(
                z,
                world.clone(),
                geometry.clone(),
            )));
        }

        let engine_state = EngineState {
            world,
            geometry,
            task_manager,
            config,
            current_slice,
            explore: true,
        };
        engine_state.publish_slice_change();
        engine_state
    }

    /// Shared handle to the world.
    pub fn world(&self) -> &StResource<World> {
        &self.world
    }

    /// Shared handle to the world geometry.
    pub fn geometry(&self) -> &StResource<WorldGeometry> {
        &self.geometry
    }

    /// Settings the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The z-level the view is focused on.
    pub fn current_slice(&self) -> i32 {
        self.current_slice
    }

    /// Whether explore mode is on.
    pub fn explore(&self) -> bool {
        self.explore
    }

    fn publish_slice_change(&self) {
        self.geometry
            .get_mut()
            .slice_changed(self.current_slice, self.explore);
    }

    /// Moves the focus to slice `n`, or by `n` slices if `relative`. The
    /// result is clamped to the world.
    ///
    /// # Arguments
    /// * `n` - Target slice, or offset from the current one
    /// * `relative` - Whether `n` is an offset; the sum saturates
    ///
    /// # Returns
    /// The new active slice.
    pub fn change_slice(&mut self, n: i32, relative: bool) -> i32 {
        let target = if relative {
            self.current_slice.saturating_add(n)
        } else {
            n
        };
        let top = self.world.get().depth() as i32 - 1;
        self.current_slice = target.clamp(0, top.max(0));
        self.publish_slice_change();
        self.current_slice
    }

    /// Flips between explore and focus mode.
    ///
    /// # Returns
    /// Whether explore mode is now on.
    pub fn toggle_explore(&mut self) -> bool {
        self.explore = !self.explore;
        self.publish_slice_change();
        self.explore
    }

    /// Runs every scheduled task once.
    pub fn tick(&mut self) {
        self.task_manager.tick();
    }

    /// Replaces the terrain with a freshly generated one and rebuilds every
    /// slice wholesale.
    pub fn regenerate(&mut self) {
        {
            let mut world = self.world.get_mut();
            world.clear();
            TerrainGenerator::from_params(&self.config.terrain).generate(&mut world);
            self.geometry.get_mut().rebuild_all(&world);
        }
        self.publish_slice_change();
    }

    /// Saves the world to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> WorldResult<()> {
        serialization::save(&self.world.get(), path)
    }

    /// Drops a bomb at `centre`.
    ///
    /// # Returns
    /// The number of ramps placed around the crater.
    pub fn bomb(&mut self, centre: Point3<i32>, radius: i32) -> usize {
        tools::bomb(&mut self.world.get_mut(), centre, radius)
    }

    /// Places a single block.
    pub fn place(&mut self, position: Point3<i32>, form: FormKind, substance: Substance) -> bool {
        tools::place(&mut self.world.get_mut(), position, form, substance)
    }

    /// Chunks still waiting for a rebuild.
    pub fn pending_updates(&self) -> usize {
        self.geometry.get().pending()
    }

    /// Totals over every chunk mesh.
    pub fn stats(&self) -> MeshStats {
        self.geometry.get().stats()
    }

    /// Runs ticks until no chunk is dirty, at most `max_ticks` of them.
    ///
    /// # Returns
    /// The number of ticks run.
    pub fn settle(&mut self, max_ticks: u32) -> u32 {
        for ran in 0..max_ticks {
            self.tick();
            if self.pending_updates() == 0 {
                return ran + 1;
            }
        }
        info!("Geometry still has {} dirty chunks", self.pending_updates());
        max_ticks
    }
}
