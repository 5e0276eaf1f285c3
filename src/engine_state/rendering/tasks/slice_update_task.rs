//! Task rebuilding the dirty chunks of one slice.
//!
//! One task is scheduled per z-level. Each tick it rebuilds at most one dirty
//! chunk, reading the grid as it is at that moment, so rebuild cost is spread
//! across ticks and every rebuild reflects the latest edits.

use crate::{
    core::StResource,
    engine_state::{
        rendering::meshing::WorldGeometry,
        task_management::task::{Task, TaskStatus},
        voxels::world::World,
    },
};

/// Rebuilds one dirty chunk of slice `z` per tick.
pub struct SliceUpdateTask {
    /// Z-level of the slice this task serves
    z: usize,
    /// Grid the chunks are rebuilt from
    world: StResource<World>,
    /// Geometry holding the slice
    geometry: StResource<WorldGeometry>,
    name: String,
}

impl SliceUpdateTask {
    /// Creates a new slice update task.
    ///
    /// # Arguments
    /// * `z` - Z-level of the slice
    /// * `world` - Shared handle to the grid
    /// * `geometry` - Shared handle to the geometry
    pub fn new(z: usize, world: StResource<World>, geometry: StResource<WorldGeometry>) -> Self {
        SliceUpdateTask {
            z,
            world,
            geometry,
            name: format!("slice {} update", z),
        }
    }
}

impl Task for SliceUpdateTask {
    fn name(&self) -> &str {
        &self.name
    }

    /// Rebuilds one pending chunk. The task retires once its slice no longer
    /// exists.
    fn process(&mut self) -> TaskStatus {
        let mut geometry = self.geometry.get_mut();
        if self.z >= geometry.depth() {
            return TaskStatus::Done;
        }
        geometry.perform_update(self.z, &self.world.get());
        TaskStatus::Continue
    }
}
