//! # World Module
//!
//! This module provides the `World` struct, the dense voxel grid every other
//! system reads from.
//!
//! ## Architecture
//!
//! The grid has fixed extents and stores one `Block` per cell in a flat buffer
//! indexed by `x * height * depth + y * depth + z`. Coordinates outside the
//! extents never fail: reads resolve to the null block and writes are no-ops
//! that return `false`.
//!
//! ## Change notification
//!
//! Committed changes are published as `BlockUpdate` events on every channel
//! handed out by `World::subscribe`. The mesh builder drains its receiver once
//! per tick. How far a write propagates is chosen per call with `Propagation`:
//!
//! * `Full` emits an event and recomputes the hidden flag of the six axis
//!   neighbours.
//! * `Notify` emits an event only.
//! * `Silent` touches nothing but the cell. Generation and loading use it and
//!   rebuild meshes wholesale afterwards.
//!
//! Writing a block identical to the stored one is never a change: it emits
//! nothing and recomputes nothing.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use cgmath::Point3;
use log::debug;

use super::block::direction::Direction;
use super::block::substance::Substance;
use super::block::{Block, BlockView};
use super::form::{FormKind, FormRegistry, RampDirection};

/// Notification that the cell at `position` changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockUpdate {
    /// The changed cell.
    pub position: Point3<i32>,
}

/// How far a committed write propagates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// Emit a `BlockUpdate` and recompute the neighbours' hidden flags.
    Full,
    /// Emit a `BlockUpdate` only.
    Notify,
    /// Store the cell and nothing else.
    Silent,
}

/// Ramp orientations in the order they are tried, paired with the sides that
/// must hold solid blocks. The substance is taken from the first side.
const RAMP_PRIORITY: [(RampDirection, &[Direction]); 8] = [
    (RampDirection::WN, &[Direction::Left, Direction::Front]),
    (RampDirection::NE, &[Direction::Front, Direction::Right]),
    (RampDirection::ES, &[Direction::Right, Direction::Back]),
    (RampDirection::SW, &[Direction::Back, Direction::Left]),
    (RampDirection::W, &[Direction::Left]),
    (RampDirection::E, &[Direction::Right]),
    (RampDirection::S, &[Direction::Back]),
    (RampDirection::N, &[Direction::Front]),
];

/// Width, height and depth of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extents {
    /// Cells along x.
    pub width: usize,
    /// Cells along y.
    pub height: usize,
    /// Cells along z.
    pub depth: usize,
}

impl Extents {
    /// Bundles the three extents.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Extents {
            width,
            height,
            depth,
        }
    }

    /// Number of cells. Saturates at `usize::MAX` for extents too large to
    /// store; see [`Extents::checked_len`].
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Number of cells, or `None` if the product overflows `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(self.depth)
    }

    /// Whether every extent is non-zero and every in-bounds position fits an
    /// `i32` coordinate.
    pub fn is_addressable(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|&extent| extent > 0 && extent <= i32::MAX as usize)
    }

    /// Whether the extents hold no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `position` lies inside the extents.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.index(position).is_some()
    }

    /// Flat buffer index of `position`, or `None` if it is out of bounds.
    pub fn index(&self, position: Point3<i32>) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        let z = usize::try_from(position.z).ok()?;

        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }

        Some(x * self.height * self.depth + y * self.depth + z)
    }

    /// Every position in canonical order: `x` outermost, then `y`, then `z`.
    pub fn positions(&self) -> impl Iterator<Item = Point3<i32>> {
        let Extents {
            width,
            height,
            depth,
        } = *self;
        (0..width as i32).flat_map(move |x| {
            (0..height as i32)
                .flat_map(move |y| (0..depth as i32).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// The dense voxel grid.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use dorfdelf::engine_state::voxels::block::substance::Substance;
/// use dorfdelf::engine_state::voxels::form::FormKind;
/// use dorfdelf::engine_state::voxels::world::World;
///
/// let mut world = World::new(4, 4, 2);
/// let updates = world.subscribe();
///
/// assert!(world.set_block(Point3::new(1, 1, 0), FormKind::Block, Substance::Stone, false));
/// assert!(!world.set_block(Point3::new(4, 0, 0), FormKind::Block, Substance::Stone, false));
/// assert_eq!(updates.try_iter().count(), 1);
/// ```
pub struct World {
    extents: Extents,
    forms: Arc<FormRegistry>,
    blocks: Vec<Block>,
    listeners: Vec<Sender<BlockUpdate>>,
}

impl World {
    /// Creates a void-filled world with its own form registry.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        World::with_forms(
            Extents::new(width, height, depth),
            Arc::new(FormRegistry::new()),
        )
    }

    /// Creates a void-filled world sharing an existing form registry.
    ///
    /// # Arguments
    /// * `extents` - Size of the grid
    /// * `forms` - Registry the grid and its mesh builder look shapes up in
    pub fn with_forms(extents: Extents, forms: Arc<FormRegistry>) -> Self {
        debug!(
            "Creating {}x{}x{} world",
            extents.width, extents.height, extents.depth
        );
        World {
            extents,
            forms,
            blocks: vec![Block::void(); extents.len()],
            listeners: Vec::new(),
        }
    }

    /// The extents of the grid.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.extents.width
    }

    /// Cells along y.
    pub fn height(&self) -> usize {
        self.extents.height
    }

    /// Cells along z; also the number of slices.
    pub fn depth(&self) -> usize {
        self.extents.depth
    }

    /// Extents as `[width, height, depth]`.
    pub fn size(&self) -> [usize; 3] {
        [self.extents.width, self.extents.height, self.extents.depth]
    }

    /// The centre cell, rounded down on every axis.
    pub fn midpoint(&self) -> Point3<i32> {
        Point3::new(
            (self.extents.width / 2) as i32,
            (self.extents.height / 2) as i32,
            (self.extents.depth / 2) as i32,
        )
    }

    /// The form registry shared with this grid.
    pub fn forms(&self) -> &Arc<FormRegistry> {
        &self.forms
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.extents.contains(position)
    }

    /// The stored cell, or `None` outside the grid.
    pub(crate) fn cell(&self, position: Point3<i32>) -> Option<&Block> {
        self.extents.index(position).map(|index| &self.blocks[index])
    }

    /// A view of the cell at `position`. Never fails: out-of-bounds positions
    /// yield the null block.
    pub fn get_block(&self, position: Point3<i32>) -> BlockView<'_> {
        BlockView::new(self, position)
    }

    /// Every cell in canonical order.
    pub fn all(&self) -> impl Iterator<Item = BlockView<'_>> {
        self.extents
            .positions()
            .map(move |position| self.get_block(position))
    }

    /// Every position in canonical order.
    pub fn positions(&self) -> impl Iterator<Item = Point3<i32>> {
        self.extents.positions()
    }

    /// Every `(x, y)` column.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> {
        let height = self.extents.height as i32;
        (0..self.extents.width as i32).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Every z-level, bottom first.
    pub fn zlevels(&self) -> std::ops::Range<i32> {
        0..self.extents.depth as i32
    }

    /// Stored cells in canonical order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Height of the topmost non-void cell of column `(x, y)`.
    pub fn surface(&self, x: i32, y: i32) -> Option<i32> {
        self.zlevels()
            .rev()
            .find(|&z| self.cell(Point3::new(x, y, z)).is_some_and(|b| !b.form.is_void()))
    }

    /// Resets every cell to void without notifying anyone.
    pub fn clear(&mut self) {
        self.blocks.fill(Block::void());
    }

    /// Registers a new listener for block updates.
    pub fn subscribe(&mut self) -> Receiver<BlockUpdate> {
        let (sender, receiver) = channel();
        self.listeners.push(sender);
        receiver
    }

    fn emit(&mut self, position: Point3<i32>) {
        let update = BlockUpdate { position };
        self.listeners.retain(|listener| listener.send(update).is_ok());
    }

    /// Writes a cell with full propagation.
    ///
    /// # Arguments
    /// * `position` - The cell to write
    /// * `form` - Shape of the new block
    /// * `substance` - Material of the new block
    /// * `hidden` - Whether the block starts out enclosed
    ///
    /// # Returns
    /// `false` if `position` is out of bounds, `true` otherwise (including when
    /// the write changed nothing).
    pub fn set_block(
        &mut self,
        position: Point3<i32>,
        form: FormKind,
        substance: Substance,
        hidden: bool,
    ) -> bool {
        self.set_block_with(
            position,
            Block::new(form, substance, hidden),
            Propagation::Full,
        )
    }

    /// Writes a cell, propagating the change as `propagation` says.
    ///
    /// Identical writes are dropped before any propagation happens.
    pub fn set_block_with(
        &mut self,
        position: Point3<i32>,
        block: Block,
        propagation: Propagation,
    ) -> bool {
        let Some(index) = self.extents.index(position) else {
            return false;
        };

        if self.blocks[index] == block {
            return true;
        }
        self.blocks[index] = block;

        match propagation {
            Propagation::Silent => {}
            Propagation::Notify => self.emit(position),
            Propagation::Full => {
                self.emit(position);
                for direction in Direction::ALL {
                    self.update_hidden_with(direction.step(position), Propagation::Notify);
                }
            }
        }

        true
    }

    /// Whether the cell at `position` is enclosed on all six axis sides by
    /// neighbours that hide it. Missing neighbours never hide.
    pub fn is_enclosed(&self, position: Point3<i32>) -> bool {
        Direction::ALL.into_iter().all(|direction| {
            self.cell(direction.step(position))
                .is_some_and(|neighbour| neighbour.form.hides(direction))
        })
    }

    /// Recomputes the hidden flag of the cell at `position` and emits an update
    /// if it changed.
    pub fn update_hidden(&mut self, position: Point3<i32>) {
        self.update_hidden_with(position, Propagation::Notify);
    }

    /// Recomputes the hidden flag of the cell at `position`.
    ///
    /// `Full` is treated as `Notify`: a hidden flag never affects whether a
    /// neighbour is hidden, so recursing would only repeat work.
    pub fn update_hidden_with(&mut self, position: Point3<i32>, propagation: Propagation) {
        let Some(block) = self.cell(position).copied() else {
            return;
        };

        let propagation = match propagation {
            Propagation::Full => Propagation::Notify,
            other => other,
        };

        let hidden = self.is_enclosed(position);
        self.set_block_with(position, Block { hidden, ..block }, propagation);
    }

    /// Turns the cell at `position` into a ramp leaning against its solid
    /// cardinal neighbours, with full propagation.
    ///
    /// # Returns
    /// `false` if no cardinal neighbour is a solid block or `position` is out
    /// of bounds.
    pub fn make_ramp(&mut self, position: Point3<i32>) -> bool {
        self.make_ramp_with(position, Propagation::Full)
    }

    /// Turns the cell at `position` into a ramp.
    ///
    /// Corner ramps win over straight ones. Within each group the sides are
    /// tried in a fixed order, so the result does not depend on call order:
    /// left+front, front+right, right+back, back+left, then left, right, back,
    /// front. The ramp takes the substance of the first side named.
    pub fn make_ramp_with(&mut self, position: Point3<i32>, propagation: Propagation) -> bool {
        if !self.contains(position) {
            return false;
        }

        let view = self.get_block(position);
        let chosen = RAMP_PRIORITY.iter().find_map(|(direction, sides)| {
            sides
                .iter()
                .all(|&side| view.neighbour(side).is_block())
                .then(|| (*direction, view.neighbour(sides[0]).substance()))
        });

        match chosen {
            Some((direction, substance)) => self.set_block_with(
                position,
                Block::new(FormKind::Ramp(direction), substance, false),
                propagation,
            ),
            None => false,
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("extents", &self.extents)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
