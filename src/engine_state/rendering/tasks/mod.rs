//! Recurring tasks that keep the world geometry in step with the grid.
//!
//! # Available Tasks
//! - `BlockUpdateTask`: drains the grid's block-update channel into the
//!   geometry, marking dirty chunks
//! - `SliceUpdateTask`: rebuilds at most one dirty chunk of one slice per tick
//!
//! The block-update task is published before the slice tasks so edits made
//! before a tick are picked up by that same tick.

pub mod block_update_task;
pub mod slice_update_task;

pub use block_update_task::BlockUpdateTask;
pub use slice_update_task::SliceUpdateTask;
