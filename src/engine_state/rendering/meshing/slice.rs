//! One z-level of world geometry, partitioned into square chunks.
//!
//! The chunk size is chosen per slice from how full the slice is: emptier
//! slices get larger chunks. Edits mark their chunk dirty; each call to
//! `perform_update` rebuilds at most one dirty chunk from the live grid.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::Instant;

use super::batch::{BatchKind, ChunkMesh, MeshBatch};
use super::visibility::SliceVisibility;
use crate::engine_state::voxels::form::{FormKind, FormRegistry};
use crate::engine_state::voxels::world::World;

/// Solid cells a chunk is sized to hold on average.
pub const BLOCKS_PER_CHUNK: f64 = 256.0;

/// Chunk coordinate within a slice.
pub type ChunkCoord = (usize, usize);

/// Picks the chunk edge length for slice `z`.
///
/// With `blocks` non-air cells in the slice, the slice is split into roughly
/// `blocks / 256` chunks: the size is the largest power of two not above
/// `width / sqrt(max(1, blocks / 256))`, and at least 1.
pub fn chunk_size_for(world: &World, z: i32) -> usize {
    let blocks = world
        .columns()
        .filter(|&(x, y)| world.get_block(Point3::new(x, y, z)).substance().is_solid())
        .count();

    let chunks = (blocks as f64 / BLOCKS_PER_CHUNK).max(1.0);
    let exponent = (world.width() as f64 / chunks.sqrt()).log2().floor();
    if exponent < 1.0 {
        return 1;
    }
    1usize << (exponent as u32).min(usize::BITS - 1)
}

/// Meshes of one z-level.
pub struct Slice {
    z: i32,
    chunk_size: usize,
    chunks_x: usize,
    chunks_y: usize,
    chunks: HashMap<ChunkCoord, ChunkMesh>,
    updates: HashSet<ChunkCoord>,
    visibility: SliceVisibility,
    forms: Arc<FormRegistry>,
}

impl Slice {
    /// Builds every chunk of slice `z`.
    pub fn new(world: &World, z: i32) -> Self {
        let mut slice = Slice {
            z,
            chunk_size: 1,
            chunks_x: 0,
            chunks_y: 0,
            chunks: HashMap::new(),
            updates: HashSet::new(),
            visibility: SliceVisibility::default(),
            forms: world.forms().clone(),
        };
        slice.rebuild_all(world);
        slice
    }

    /// The z-level this slice meshes.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Edge length of a chunk, in cells.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks along x and y.
    pub fn chunk_grid(&self) -> (usize, usize) {
        (self.chunks_x, self.chunks_y)
    }

    /// How the slice is currently displayed.
    pub fn visibility(&self) -> SliceVisibility {
        self.visibility
    }

    /// The mesh of the chunk at `coord`, if it has been built.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.chunks.get(&coord)
    }

    /// Every built chunk with its coordinate, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkCoord, &ChunkMesh)> {
        self.chunks.iter()
    }

    /// Number of chunks waiting for a rebuild.
    pub fn pending(&self) -> usize {
        self.updates.len()
    }

    /// Recomputes the chunk size and rebuilds every chunk. Pending updates are
    /// dropped since every chunk is fresh afterwards.
    pub fn rebuild_all(&mut self, world: &World) {
        self.chunk_size = chunk_size_for(world, self.z);
        self.chunks_x = world.width().div_ceil(self.chunk_size);
        self.chunks_y = world.height().div_ceil(self.chunk_size);
        self.chunks.clear();
        self.updates.clear();

        for cx in 0..self.chunks_x {
            for cy in 0..self.chunks_y {
                let mesh = self.build_chunk(world, (cx, cy), 0);
                self.chunks.insert((cx, cy), mesh);
            }
        }
    }

    /// Builds the meshes of the chunk at `coord` from the current grid.
    fn build_chunk(&self, world: &World, coord: ChunkCoord, revision: u32) -> ChunkMesh {
        let size = self.chunk_size;
        let origin = Point3::new((coord.0 * size) as i32, (coord.1 * size) as i32, self.z);

        let mut batches: Vec<MeshBatch> = Vec::new();
        let mut hidden = MeshBatch::new(BatchKind::Hidden, origin);
        hidden.visible = self.visibility.hidden_shown;

        for x in 0..size {
            for y in 0..size {
                let block = world.get_block(origin + Vector3::new(x as i32, y as i32, 0));
                let substance = block.substance();
                if !substance.is_solid() {
                    continue;
                }

                let offset = Vector3::new(x as f32, y as f32, 0.0);
                if block.hidden() {
                    hidden.write_form(self.forms.get(FormKind::Hidden), offset);
                    continue;
                }

                let Some(form) = block.form() else {
                    continue;
                };
                let kind = BatchKind::Substance(substance);
                let batch = match batches.iter().position(|batch| batch.kind == kind) {
                    Some(slot) => &mut batches[slot],
                    None => {
                        batches.push(MeshBatch::new(kind, origin));
                        let last = batches.len() - 1;
                        &mut batches[last]
                    }
                };
                batch.write_form(self.forms.get(form), offset);
            }
        }

        batches.sort_by_key(|batch| match batch.kind {
            BatchKind::Substance(substance) => substance.id(),
            BatchKind::Hidden => u8::MAX,
        });

        ChunkMesh {
            batches,
            hidden,
            revision,
        }
    }

    /// Marks the chunk holding column `(x, y)` for a rebuild. Repeated marks
    /// before the rebuild collapse into one.
    pub fn update(&mut self, x: i32, y: i32) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        let coord = (x / self.chunk_size, y / self.chunk_size);
        if coord.0 < self.chunks_x && coord.1 < self.chunks_y {
            self.updates.insert(coord);
        }
    }

    /// Rebuilds one pending chunk, if any. Which one is unspecified.
    ///
    /// # Returns
    /// The coordinate of the rebuilt chunk.
    pub fn perform_update(&mut self, world: &World) -> Option<ChunkCoord> {
        let coord = self.updates.iter().next().copied()?;
        self.updates.remove(&coord);

        let start = Instant::now();
        let revision = self.chunks.get(&coord).map_or(0, |mesh| mesh.revision + 1);
        let mesh = self.build_chunk(world, coord, revision);
        self.chunks.insert(coord, mesh);

        debug!(
            "Rebuilt chunk {:?} of slice {} in {:?}",
            coord,
            self.z,
            start.elapsed()
        );
        Some(coord)
    }

    /// Applies the display policy for `current` being the active slice.
    pub fn apply_focus(&mut self, current: i32, explore: bool) {
        self.visibility.apply(self.z, current, explore);
        let hidden_shown = self.visibility.hidden_shown;
        for mesh in self.chunks.values_mut() {
            mesh.hidden.visible = hidden_shown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::substance::Substance;
    use crate::engine_state::voxels::block::Block;
    use crate::engine_state::voxels::world::Propagation;

    fn filled(width: usize, height: usize, layers: i32) -> World {
        let mut world = World::new(width, height, 4);
        for position in world.positions().collect::<Vec<_>>() {
            if position.z < layers {
                let block = Block::solid(Substance::Stone);
                world.set_block_with(position, block, Propagation::Silent);
            }
        }
        world
    }

    #[test]
    fn empty_slices_use_the_widest_chunks() {
        let world = World::new(64, 64, 2);
        assert_eq!(chunk_size_for(&world, 0), 64);

        let world = World::new(48, 48, 2);
        assert_eq!(chunk_size_for(&world, 0), 32);
    }

    #[test]
    fn full_slices_split_into_smaller_chunks() {
        // 64 * 64 = 4096 blocks, 16 chunks, 64 / 4 = 16.
        let world = filled(64, 64, 1);
        assert_eq!(chunk_size_for(&world, 0), 16);
        assert_eq!(chunk_size_for(&world, 1), 64);
    }

    #[test]
    fn tiny_worlds_still_get_chunks() {
        let world = World::new(1, 1, 1);
        assert_eq!(chunk_size_for(&world, 0), 1);
        let slice = Slice::new(&world, 0);
        assert_eq!(slice.chunk_grid(), (1, 1));
    }

    #[test]
    fn edge_tiles_cover_the_whole_slice() {
        let world = World::new(48, 20, 1);
        let slice = Slice::new(&world, 0);
        assert_eq!(slice.chunk_size(), 32);
        assert_eq!(slice.chunk_grid(), (2, 1));
        assert_eq!(slice.chunks().count(), 2);
    }

    #[test]
    fn empty_chunks_have_empty_meshes() {
        let world = World::new(8, 8, 1);
        let slice = Slice::new(&world, 0);
        let mesh = slice.chunk((0, 0)).unwrap();
        assert!(mesh.batches.is_empty());
        assert!(mesh.hidden.is_empty());
    }

    #[test]
    fn hidden_cells_go_to_the_hidden_batch() {
        let mut world = World::new(3, 3, 3);
        for position in world.positions().collect::<Vec<_>>() {
            world.set_block_with(position, Block::solid(Substance::Dirt), Propagation::Silent);
        }
        world.update_hidden_with(Point3::new(1, 1, 1), Propagation::Silent);

        let slice = Slice::new(&world, 1);
        let hidden: usize = slice.chunks().map(|(_, m)| m.hidden.num_triangles()).sum();
        let dirt: usize = slice
            .chunks()
            .filter_map(|(_, m)| m.batch(Substance::Dirt))
            .map(MeshBatch::num_triangles)
            .sum();
        assert_eq!(hidden, 12);
        assert_eq!(dirt, 8 * 12);
        assert!(slice.chunks().all(|(_, m)| !m.hidden.visible));
    }

    #[test]
    fn repeated_updates_collapse() {
        let world = World::new(8, 8, 1);
        let mut slice = Slice::new(&world, 0);
        slice.update(0, 0);
        slice.update(3, 5);
        slice.update(7, 7);
        assert_eq!(slice.pending(), 1);

        assert_eq!(slice.perform_update(&world), Some((0, 0)));
        assert_eq!(slice.perform_update(&world), None);
        assert_eq!(slice.chunk((0, 0)).unwrap().revision, 1);
    }

    #[test]
    fn rebuilds_read_the_live_grid() {
        let mut world = World::new(8, 8, 1);
        let mut slice = Slice::new(&world, 0);

        world.set_block_with(
            Point3::new(2, 2, 0),
            Block::solid(Substance::Stone),
            Propagation::Silent,
        );
        slice.update(2, 2);
        slice.perform_update(&world);

        let mesh = slice.chunk((0, 0)).unwrap();
        assert_eq!(mesh.batch(Substance::Stone).unwrap().num_triangles(), 12);
        assert_eq!(mesh.batches[0].origin, Point3::new(0, 0, 0));
    }

    #[test]
    fn rebuilt_hidden_batches_keep_the_reveal_state() {
        let world = World::new(4, 4, 1);
        let mut slice = Slice::new(&world, 0);
        slice.apply_focus(0, false);
        assert!(slice.chunk((0, 0)).unwrap().hidden.visible);

        slice.update(1, 1);
        slice.perform_update(&world);
        assert!(slice.chunk((0, 0)).unwrap().hidden.visible);
    }
}
