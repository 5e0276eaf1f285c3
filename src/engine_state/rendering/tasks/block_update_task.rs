//! Task forwarding block updates to the world geometry.

use log::trace;

use crate::{
    core::StResource,
    engine_state::{
        rendering::meshing::WorldGeometry,
        task_management::task::{Task, TaskStatus},
    },
};

/// Drains pending block updates every tick.
pub struct BlockUpdateTask {
    /// Geometry owning the update receiver
    geometry: StResource<WorldGeometry>,
}

impl BlockUpdateTask {
    /// Creates a new block update task.
    ///
    /// # Arguments
    /// * `geometry` - Shared handle to the geometry to feed
    pub fn new(geometry: StResource<WorldGeometry>) -> Self {
        BlockUpdateTask { geometry }
    }
}

impl Task for BlockUpdateTask {
    fn name(&self) -> &str {
        "block updates"
    }

    fn process(&mut self) -> TaskStatus {
        let received = self.geometry.get_mut().process_block_updates();
        if received > 0 {
            trace!("Received {} block updates", received);
        }
        TaskStatus::Continue
    }
}
