//! Vertex data structures for slice meshes.
//!
//! Mesh batches are plain vertex and index lists handed to whatever renderer
//! embeds the world. The vertex is `Pod` so it can be uploaded as raw bytes.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk mesh batch.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), relative to the batch origin
/// - Normal: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the batch origin
    pub position: [f32; 3],
    /// Outward facing unit normal
    pub normal: [f32; 3],
    /// UV texture coordinates
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Position relative to the batch origin
    /// * `normal` - Unit normal
    /// * `tex_coords` - Texture coordinates
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tex_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_cast_to_bytes() {
        let vertices = [Vertex::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, 1.0),
            [0.5, 0.5],
        ); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
