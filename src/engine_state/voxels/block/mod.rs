//! # Block Module
//!
//! This module provides the per-cell data of the voxel grid and a read accessor
//! over it.
//!
//! * `Block` is the stored `(form, substance, hidden)` triple.
//! * `BlockView` is a position-bound view that re-reads the grid on every call,
//!   so neighbour queries always see live data. Views at out-of-bounds
//!   positions behave as the null block: every classification predicate is
//!   false and the view hides whatever faces it.

use cgmath::Point3;

use super::form::FormKind;
use super::world::World;
use direction::Direction;
use substance::Substance;

pub mod direction;
pub mod substance;

/// The contents of one grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// Shape of the cell.
    pub form: FormKind,
    /// Material the cell is made of.
    pub substance: Substance,
    /// Whether the cell is fully enclosed by neighbours that hide it.
    pub hidden: bool,
}

impl Block {
    /// Creates a new block.
    ///
    /// # Arguments
    /// * `form` - Shape of the block
    /// * `substance` - Material of the block
    /// * `hidden` - Whether the block is fully enclosed
    pub fn new(form: FormKind, substance: Substance, hidden: bool) -> Self {
        Block {
            form,
            substance,
            hidden,
        }
    }

    /// An empty air cell, the value every grid starts with.
    pub fn void() -> Self {
        Block::default()
    }

    /// A visible solid cube.
    pub fn solid(substance: Substance) -> Self {
        Block::new(FormKind::Block, substance, false)
    }
}

/// A cheap, non-owning view of the cell at one position.
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
/// world.set_block(Point3::new(1, 1, 0), FormKind::Block, Substance::Stone, false);
///
/// let above = world.get_block(Point3::new(1, 1, 1));
/// assert!(above.is_void());
/// assert!(above.down().is_block());
/// assert!(!world.get_block(Point3::new(-1, 0, 0)).is_void());
/// ```
#[derive(Copy, Clone)]
pub struct BlockView<'a> {
    world: &'a World,
    position: Point3<i32>,
}

impl<'a> BlockView<'a> {
    pub(crate) fn new(world: &'a World, position: Point3<i32>) -> Self {
        BlockView { world, position }
    }

    fn cell(&self) -> Option<&'a Block> {
        self.world.cell(self.position)
    }

    /// The position this view is bound to.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Whether this view lies outside the grid.
    pub fn is_null(&self) -> bool {
        self.cell().is_none()
    }

    /// The stored block, or `None` for the null block.
    pub fn block(&self) -> Option<Block> {
        self.cell().copied()
    }

    /// The stored form, or `None` for the null block.
    pub fn form(&self) -> Option<FormKind> {
        self.cell().map(|block| block.form)
    }

    /// The stored substance. The null block reports air.
    pub fn substance(&self) -> Substance {
        self.cell().map(|block| block.substance).unwrap_or_default()
    }

    /// The stored hidden flag. The null block is never hidden.
    pub fn hidden(&self) -> bool {
        self.cell().is_some_and(|block| block.hidden)
    }

    /// Whether the cell is empty space. `false` for the null block.
    pub fn is_void(&self) -> bool {
        self.form().is_some_and(FormKind::is_void)
    }

    /// Whether the cell is a full cube. `false` for the null block.
    pub fn is_block(&self) -> bool {
        self.form().is_some_and(FormKind::is_block)
    }

    /// Whether the cell is a ramp of any orientation.
    pub fn is_ramp(&self) -> bool {
        self.form().is_some_and(FormKind::is_ramp)
    }

    /// Whether entities can walk through the cell. `false` for the null
    /// block.
    pub fn passable(&self) -> bool {
        self.form().is_some_and(FormKind::passable)
    }

    /// Whether this cell hides the face of a cell looking at it in `toward`.
    /// The null block hides everything.
    pub fn hides(&self, toward: Direction) -> bool {
        self.form().map_or(true, |form| form.hides(toward))
    }

    /// The neighbour in `direction`, re-queried from the grid.
    pub fn neighbour(&self, direction: Direction) -> BlockView<'a> {
        BlockView::new(self.world, direction.step(self.position))
    }

    /// The cell above.
    pub fn up(&self) -> BlockView<'a> {
        self.neighbour(Direction::Up)
    }

    /// The cell below.
    pub fn down(&self) -> BlockView<'a> {
        self.neighbour(Direction::Down)
    }

    /// The cell at `x - 1`.
    pub fn left(&self) -> BlockView<'a> {
        self.neighbour(Direction::Left)
    }

    /// The cell at `x + 1`.
    pub fn right(&self) -> BlockView<'a> {
        self.neighbour(Direction::Right)
    }

    /// The cell at `y + 1`.
    pub fn front(&self) -> BlockView<'a> {
        self.neighbour(Direction::Front)
    }

    /// The cell at `y - 1`.
    pub fn back(&self) -> BlockView<'a> {
        self.neighbour(Direction::Back)
    }
}

impl std::fmt::Debug for BlockView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockView")
            .field("position", &self.position)
            .field("block", &self.block())
            .finish()
    }
}
