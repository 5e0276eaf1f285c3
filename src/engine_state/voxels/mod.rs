//! # Voxel World
//!
//! This module contains the world data model: the dense voxel grid, the block
//! shapes it is built from, and everything that fills, edits and persists it.
//!
//! ## Architecture
//!
//! * **Form**: the closed set of block shapes and the registry holding their
//!   geometry
//! * **Block**: the per-cell `(form, substance, hidden)` triple and the
//!   position-bound `BlockView` accessor
//! * **World**: the fixed-size grid, its neighbour queries and the
//!   hidden-face and ramp rules
//! * **Generation**: noise terrain with ramp and hidden-face post passes
//! * **Serialization**: whole-world JSON save and load
//! * **Tools**: interactive edits such as bombs and block placement
//!
//! ## Data Flow
//!
//! 1. Generation or loading fills the grid silently
//! 2. The geometry is rebuilt wholesale from the filled grid
//! 3. Later edits go through `World::set_block`, which publishes a
//!    `BlockUpdate` per committed change
//! 4. The mesh builder drains those updates and rebuilds dirty chunks, one per
//!    slice per tick

pub mod block;
pub mod form;
pub mod generation;
pub mod serialization;
pub mod tools;
pub mod world;
