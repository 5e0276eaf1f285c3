//! Mesh batches and the per-chunk meshes built from them.
//!
//! A chunk owns one batch per substance present among its visible cells and a
//! single batch for its hidden cells. Batches are never patched: a rebuild
//! throws the old `ChunkMesh` away and builds a new one.

use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::substance::{Substance, HIDDEN_TEXTURE};
use crate::engine_state::voxels::form::Form;

/// What a batch draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// Visible cells of one substance.
    Substance(Substance),
    /// Hidden cells of any substance, drawn with the placeholder form.
    Hidden,
}

impl BatchKind {
    /// Texture the batch is drawn with.
    pub fn texture(self) -> &'static str {
        match self {
            BatchKind::Substance(substance) => substance.texture().unwrap_or(HIDDEN_TEXTURE),
            BatchKind::Hidden => HIDDEN_TEXTURE,
        }
    }
}

/// Vertex and index lists positioned at a chunk origin.
#[derive(Clone, Debug)]
pub struct MeshBatch {
    /// What the batch holds.
    pub kind: BatchKind,
    /// World position of the chunk corner the vertices are relative to.
    pub origin: Point3<i32>,
    /// Vertex data, relative to the world origin.
    pub vertices: Vec<Vertex>,
    /// Triangle list indexing into `vertices`.
    pub indices: Vec<u32>,
    /// Whether the batch is currently drawn.
    pub visible: bool,
}

impl MeshBatch {
    /// An empty batch.
    pub fn new(kind: BatchKind, origin: Point3<i32>) -> Self {
        MeshBatch {
            kind,
            origin,
            vertices: Vec::new(),
            indices: Vec::new(),
            visible: true,
        }
    }

    /// Texture the batch is drawn with.
    pub fn texture(&self) -> &'static str {
        self.kind.texture()
    }

    /// Appends the geometry of `form`, translated by `offset`.
    pub fn write_form(&mut self, form: &Form, offset: Vector3<f32>) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(form.vertices.iter().map(|vertex| {
            Vertex::new(vertex.position + offset, vertex.normal, vertex.texcoord)
        }));
        self.indices.extend(form.indices.iter().map(|&index| base + index));
    }

    /// Whether the batch has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles in the batch.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The meshes of one chunk.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    /// Substance batches ordered by substance id.
    pub batches: Vec<MeshBatch>,
    /// Placeholder geometry of the chunk's hidden cells. Always present, even
    /// when empty.
    pub hidden: MeshBatch,
    /// How many times this chunk has been rebuilt since the slice was built.
    pub revision: u32,
}

impl ChunkMesh {
    /// The batch drawing `substance`, if the chunk has one.
    pub fn batch(&self, substance: Substance) -> Option<&MeshBatch> {
        self.batches
            .iter()
            .find(|batch| batch.kind == BatchKind::Substance(substance))
    }

    /// Every batch, hidden one last.
    pub fn all_batches(&self) -> impl Iterator<Item = &MeshBatch> {
        self.batches.iter().chain(std::iter::once(&self.hidden))
    }

    /// Vertices over every batch, hidden included.
    pub fn num_vertices(&self) -> usize {
        self.all_batches().map(|batch| batch.vertices.len()).sum()
    }

    /// Triangles over every batch, hidden included.
    pub fn num_triangles(&self) -> usize {
        self.all_batches().map(MeshBatch::num_triangles).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::form::{FormKind, FormRegistry};

    #[test]
    fn written_indices_are_rebased() {
        let forms = FormRegistry::new();
        let cube = forms.get(FormKind::Block);
        let kind = BatchKind::Substance(Substance::Stone);
        let mut batch = MeshBatch::new(kind, Point3::new(0, 0, 0));

        batch.write_form(cube, Vector3::new(0.0, 0.0, 0.0));
        batch.write_form(cube, Vector3::new(1.0, 0.0, 0.0));

        assert_eq!(batch.vertices.len(), 48);
        assert_eq!(batch.num_triangles(), 24);
        assert_eq!(*batch.indices.iter().max().unwrap(), 47);
        assert!(batch.vertices[24..].iter().all(|v| v.position[0] >= 1.0));
    }

    #[test]
    fn void_writes_nothing() {
        let forms = FormRegistry::new();
        let mut batch = MeshBatch::new(BatchKind::Hidden, Point3::new(0, 0, 0));
        batch.write_form(forms.get(FormKind::Void), Vector3::new(0.0, 0.0, 0.0));
        assert!(batch.is_empty());
    }

    #[test]
    fn textures_follow_the_batch_kind() {
        assert_eq!(BatchKind::Substance(Substance::Dirt).texture(), "dirt");
        assert_eq!(BatchKind::Hidden.texture(), "hidden");
    }
}
