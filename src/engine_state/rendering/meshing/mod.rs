//! Mesh generation and management for the voxel world.
//!
//! This module turns the voxel grid into abstract mesh data: per z-level
//! slices, split into square chunks, each chunk holding one batch per
//! substance and one batch for hidden cells. Uploading and shading the batches
//! is left to whatever renderer embeds the world.
//!
//! # Architecture
//! - `WorldGeometry`: owns every slice and the block-update receiver
//! - `Slice`: the chunks of one z-level and their dirty set
//! - `batch`: vertex and index lists of one chunk
//! - `visibility`: the explore and focus display policy
//!
//! # Incremental rebuilds
//! Committed block changes arrive over the grid's update channel.
//! `process_block_updates` marks the owning chunk of each change dirty and each
//! slice rebuilds at most one dirty chunk per `perform_update` call, so the
//! cost of an edit is spread over several ticks.

use std::sync::mpsc::Receiver;

use log::info;
use web_time::Instant;

use crate::engine_state::voxels::world::{BlockUpdate, World};

mod batch;
mod slice;
mod visibility;

pub use batch::{BatchKind, ChunkMesh, MeshBatch};
pub use slice::{chunk_size_for, ChunkCoord, Slice};
pub use visibility::{SliceVisibility, FOCUS_DEPTH};

/// Totals over every chunk of the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Chunks built across all slices.
    pub chunks: usize,
    /// Non-empty batches, hidden batches included.
    pub batches: usize,
    /// Total vertex count.
    pub vertices: usize,
    /// Total triangle count.
    pub triangles: usize,
}

/// All slices of a world and the channel feeding them edits.
pub struct WorldGeometry {
    slices: Vec<Slice>,
    updates: Receiver<BlockUpdate>,
}

impl WorldGeometry {
    /// Subscribes to `world` and builds every slice from its current state.
    pub fn new(world: &mut World) -> Self {
        let updates = world.subscribe();
        let world: &World = world;
        let start = Instant::now();
        let slices = world.zlevels().map(|z| Slice::new(world, z)).collect();

        let geometry = WorldGeometry { slices, updates };
        info!(
            "Built geometry for {} slices in {:?}: {:?}",
            geometry.slices.len(),
            start.elapsed(),
            geometry.stats()
        );
        geometry
    }

    /// Number of slices.
    pub fn depth(&self) -> usize {
        self.slices.len()
    }

    /// The slice at z-level `z`, if there is one.
    pub fn slice(&self, z: usize) -> Option<&Slice> {
        self.slices.get(z)
    }

    /// Every slice, bottom first.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Marks the chunk owning `update` dirty.
    pub fn block_update(&mut self, update: BlockUpdate) {
        let position = update.position;
        let slice = usize::try_from(position.z)
            .ok()
            .and_then(|z| self.slices.get_mut(z));
        if let Some(slice) = slice {
            slice.update(position.x, position.y);
        }
    }

    /// Drains the update channel.
    ///
    /// # Returns
    /// The number of updates received.
    pub fn process_block_updates(&mut self) -> usize {
        let updates: Vec<BlockUpdate> = self.updates.try_iter().collect();
        for &update in &updates {
            self.block_update(update);
        }
        updates.len()
    }

    /// Rebuilds at most one dirty chunk of slice `z`.
    pub fn perform_update(&mut self, z: usize, world: &World) -> Option<ChunkCoord> {
        self.slices.get_mut(z)?.perform_update(world)
    }

    /// Recomputes the display policy of every slice.
    pub fn slice_changed(&mut self, current: i32, explore: bool) {
        for slice in &mut self.slices {
            slice.apply_focus(current, explore);
        }
    }

    /// Rebuilds every slice from scratch, discarding queued updates.
    pub fn rebuild_all(&mut self, world: &World) {
        let start = Instant::now();
        self.updates.try_iter().for_each(drop);
        for slice in &mut self.slices {
            slice.rebuild_all(world);
        }
        info!("Rebuilt all slices in {:?}", start.elapsed());
    }

    /// Chunks waiting for a rebuild, over all slices.
    pub fn pending(&self) -> usize {
        self.slices.iter().map(Slice::pending).sum()
    }

    /// Sums chunk, batch, vertex and triangle counts over all slices.
    pub fn stats(&self) -> MeshStats {
        let mut stats = MeshStats::default();
        for (_, mesh) in self.slices.iter().flat_map(Slice::chunks) {
            stats.chunks += 1;
            stats.batches += mesh.batches.len() + 1;
            stats.vertices += mesh.num_vertices();
            stats.triangles += mesh.num_triangles();
        }
        stats
    }
}
