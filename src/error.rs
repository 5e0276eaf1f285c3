//! # Error Module
//!
//! Errors surfaced by the world model. Only the load/save path and configuration
//! can fail: out-of-bounds reads and writes degrade to the null block or a
//! `false` return instead of producing an error.

use std::io;

use thiserror::Error;

/// Result alias used by every fallible world operation.
pub type WorldResult<T> = Result<T, WorldError>;

/// Failures while loading, saving or configuring a world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The world or config file could not be read or written.
    #[error("world file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid world record.
    #[error("malformed world record: {0}")]
    Format(#[from] serde_json::Error),

    /// `extents` must hold exactly width, height and depth.
    #[error("expected 3 extents, found {0}")]
    ExtentCount(usize),

    /// The extents are zero or too large to address.
    #[error("unusable extents {width}x{height}x{depth}")]
    InvalidExtents {
        /// Cells along x.
        width: usize,
        /// Cells along y.
        height: usize,
        /// Cells along z.
        depth: usize,
    },

    /// A form name in the record is not known to the registry.
    #[error("unknown form `{0}`")]
    UnknownForm(String),

    /// A cell references a form slot past the end of the `forms` list.
    #[error("form index {index} out of range ({count} forms listed)")]
    FormIndex {
        /// The offending index.
        index: usize,
        /// Number of forms listed in the record.
        count: usize,
    },

    /// A cell carries a substance id with no matching `Substance`.
    #[error("unknown substance id {0}")]
    UnknownSubstance(u8),

    /// The number of cells does not match the extents.
    #[error("expected {expected} cells, found {found}")]
    CellCount {
        /// `width * height * depth`.
        expected: usize,
        /// Cells present in the record.
        found: usize,
    },

    /// The engine configuration cannot produce a world.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
