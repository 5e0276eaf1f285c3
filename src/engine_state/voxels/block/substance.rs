//! # Substance Module
//!
//! Materials a block can be made of. A substance carries no behaviour: it is
//! only a key into texture and colour tables.

use num_derive::FromPrimitive;

/// The underlying integer type substances are stored and serialized as.
pub type SubstanceId = u8;

/// Enumerates every material in the world.
///
/// The discriminants are the on-disk ids; new materials are appended.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Substance {
    /// Empty space. Cells made of air are never meshed.
    #[default]
    Air = 0,

    /// Soft upper layers.
    Dirt = 1,

    /// Bedrock and deep layers.
    Stone = 2,
}

/// Texture names indexed by substance id. Air has no texture.
pub static SUBSTANCE_TEXTURES: [Option<&str>; 3] = [None, Some("dirt"), Some("stone")];

/// Texture used for the placeholder geometry of hidden blocks.
pub const HIDDEN_TEXTURE: &str = "hidden";

impl Substance {
    /// Converts a stored id back into a `Substance`.
    ///
    /// # Returns
    /// `None` if no substance has that id.
    pub fn from_id(id: SubstanceId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// The id this substance is stored as.
    pub fn id(self) -> SubstanceId {
        self as SubstanceId
    }

    /// Whether this substance is anything other than air.
    pub fn is_solid(self) -> bool {
        self != Substance::Air
    }

    /// The texture a mesh batch of this substance is drawn with.
    pub fn texture(self) -> Option<&'static str> {
        SUBSTANCE_TEXTURES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for substance in [Substance::Air, Substance::Dirt, Substance::Stone] {
            assert_eq!(Substance::from_id(substance.id()), Some(substance));
        }
        assert_eq!(Substance::from_id(3), None);
    }

    #[test]
    fn air_has_no_texture() {
        assert_eq!(Substance::Air.texture(), None);
        assert_eq!(Substance::Stone.texture(), Some("stone"));
    }
}
