//! # Form Module
//!
//! Block shapes. A form decides two things about a block: the geometry it is
//! meshed with and how it classifies for neighbour queries (void, solid, ramp).
//!
//! ## Architecture
//!
//! * `FormKind` is the closed set of shapes a cell can hold. It is `Copy` and is
//!   what the voxel grid stores per cell.
//! * `Form` is the immutable geometry of one kind, built once by the
//!   `FormRegistry` and shared by reference with the grid and the mesh builder.
//!
//! Ramps come in eight orientations, named after the sides they lean against:
//! four straight ramps (`RampN`, `RampS`, `RampE`, `RampW`) and four corner
//! ramps (`RampWN`, `RampNE`, `RampES`, `RampSW`).

use std::fmt;

use phf::phf_map;

use super::block::direction::Direction;

mod geometry;
pub mod registry;

pub use geometry::FormVertex;
pub use registry::{Form, FormRegistry};

/// Orientation of a ramp, named after the solid side(s) it leans against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RampDirection {
    /// Leans against the north (front) neighbour.
    N,
    /// Leans against the south (back) neighbour.
    S,
    /// Leans against the east (right) neighbour.
    E,
    /// Leans against the west (left) neighbour.
    W,
    /// Corner ramp between west and north.
    WN,
    /// Corner ramp between north and east.
    NE,
    /// Corner ramp between east and south.
    ES,
    /// Corner ramp between south and west.
    SW,
}

impl RampDirection {
    /// Every orientation, in registration order.
    pub const ALL: [RampDirection; 8] = [
        RampDirection::N,
        RampDirection::S,
        RampDirection::E,
        RampDirection::W,
        RampDirection::WN,
        RampDirection::NE,
        RampDirection::ES,
        RampDirection::SW,
    ];

    /// The sides this ramp rises toward.
    pub fn high_sides(self) -> &'static [Direction] {
        match self {
            RampDirection::N => &[Direction::Front],
            RampDirection::S => &[Direction::Back],
            RampDirection::E => &[Direction::Right],
            RampDirection::W => &[Direction::Left],
            RampDirection::WN => &[Direction::Left, Direction::Front],
            RampDirection::NE => &[Direction::Front, Direction::Right],
            RampDirection::ES => &[Direction::Right, Direction::Back],
            RampDirection::SW => &[Direction::Back, Direction::Left],
        }
    }
}

/// The shape held by a voxel cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Empty space, no geometry.
    #[default]
    Void,
    /// A full unit cube.
    Block,
    /// A sloped block leaning against one or two solid neighbours.
    Ramp(RampDirection),
    /// The placeholder shape drawn in place of fully enclosed blocks.
    Hidden,
}

/// Lookup from serialized form name to kind.
static FORM_NAMES: phf::Map<&'static str, FormKind> = phf_map! {
    "Void" => FormKind::Void,
    "Block" => FormKind::Block,
    "RampN" => FormKind::Ramp(RampDirection::N),
    "RampS" => FormKind::Ramp(RampDirection::S),
    "RampE" => FormKind::Ramp(RampDirection::E),
    "RampW" => FormKind::Ramp(RampDirection::W),
    "RampWN" => FormKind::Ramp(RampDirection::WN),
    "RampNE" => FormKind::Ramp(RampDirection::NE),
    "RampES" => FormKind::Ramp(RampDirection::ES),
    "RampSW" => FormKind::Ramp(RampDirection::SW),
    "Hidden" => FormKind::Hidden,
};

impl FormKind {
    /// Every form kind, in the order the registry lists them.
    pub fn all() -> impl Iterator<Item = FormKind> {
        [FormKind::Void, FormKind::Block]
            .into_iter()
            .chain(RampDirection::ALL.into_iter().map(FormKind::Ramp))
            .chain(std::iter::once(FormKind::Hidden))
    }

    /// The name this form is serialized under.
    pub fn name(self) -> &'static str {
        match self {
            FormKind::Void => "Void",
            FormKind::Block => "Block",
            FormKind::Ramp(RampDirection::N) => "RampN",
            FormKind::Ramp(RampDirection::S) => "RampS",
            FormKind::Ramp(RampDirection::E) => "RampE",
            FormKind::Ramp(RampDirection::W) => "RampW",
            FormKind::Ramp(RampDirection::WN) => "RampWN",
            FormKind::Ramp(RampDirection::NE) => "RampNE",
            FormKind::Ramp(RampDirection::ES) => "RampES",
            FormKind::Ramp(RampDirection::SW) => "RampSW",
            FormKind::Hidden => "Hidden",
        }
    }

    /// Parses a serialized form name.
    pub fn from_name(name: &str) -> Option<FormKind> {
        FORM_NAMES.get(name).copied()
    }

    /// Whether this is empty space.
    pub fn is_void(self) -> bool {
        self == FormKind::Void
    }

    /// Whether this is the full cube.
    pub fn is_block(self) -> bool {
        self == FormKind::Block
    }

    /// Whether this is a ramp of any orientation.
    pub fn is_ramp(self) -> bool {
        matches!(self, FormKind::Ramp(_))
    }

    /// Whether an entity can walk through a cell of this form.
    pub fn passable(self) -> bool {
        self.is_void()
    }

    /// Whether a neighbour of this form hides the face of a cell that looks at
    /// it in `toward`.
    ///
    /// `toward` is the direction from the cell being tested to this neighbour.
    /// Solid blocks hide every face; a ramp only covers the cell beneath it,
    /// since its base is the only full face it has.
    pub fn hides(self, toward: Direction) -> bool {
        match self {
            FormKind::Block => true,
            FormKind::Ramp(_) => toward == Direction::Up,
            FormKind::Void | FormKind::Hidden => false,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
