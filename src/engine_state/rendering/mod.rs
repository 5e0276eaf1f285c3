//! Rendering side of the world.
//!
//! This module produces the data a renderer needs and nothing more: chunked
//! mesh batches per z-level, their display policy, and the recurring tasks
//! that keep them current as the grid changes. Uploading, texturing and
//! shading the batches belongs to the embedding application.

pub mod meshing;
pub mod tasks;
mod vertex;

// Re-export commonly used types
pub use meshing::WorldGeometry;
pub use vertex::Vertex;
