//! # World Serialization
//!
//! Saves and loads whole worlds as a flat JSON record:
//!
//! ```json
//! { "extents": [w, h, d], "forms": ["Void", ...], "data": [[form, substance, hidden], ...] }
//! ```
//!
//! `data` lists every cell in canonical order (`x` outermost, then `y`, then
//! `z`). `form` indexes into `forms`, `hidden` is `0` or `1`.
//!
//! Loading writes silently; the caller rebuilds geometry afterwards.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use super::block::substance::Substance;
use super::block::Block;
use super::form::{FormKind, FormRegistry};
use super::world::{Extents, Propagation, World};
use crate::error::{WorldError, WorldResult};

/// On-disk layout of a world.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorldRecord {
    /// Width, height and depth.
    pub extents: Vec<usize>,
    /// Form names, indexed by the first field of each cell.
    pub forms: Vec<String>,
    /// Every cell as `(form index, substance id, hidden)`, in canonical
    /// order.
    pub data: Vec<(usize, u8, u8)>,
}

impl WorldRecord {
    /// Captures the state of `world`.
    pub fn capture(world: &World) -> Self {
        let forms: Vec<FormKind> = world.forms().iter().map(|form| form.kind).collect();
        let slot = |kind: FormKind| forms.iter().position(|&k| k == kind).unwrap_or(0);

        WorldRecord {
            extents: world.size().to_vec(),
            forms: forms.iter().map(|kind| kind.name().to_owned()).collect(),
            data: world
                .blocks()
                .iter()
                .map(|block| {
                    (
                        slot(block.form),
                        block.substance.id(),
                        u8::from(block.hidden),
                    )
                })
                .collect(),
        }
    }

    /// Rebuilds a world from this record.
    ///
    /// # Errors
    /// Fails if the extents are not a triple of non-zero, addressable sizes,
    /// a form name is unknown to
    /// `forms`, a cell references a missing form or substance, or the cell
    /// count does not match the extents.
    pub fn restore(&self, forms: Arc<FormRegistry>) -> WorldResult<World> {
        let [width, height, depth] = <[usize; 3]>::try_from(self.extents.as_slice())
            .map_err(|_| WorldError::ExtentCount(self.extents.len()))?;
        let extents = Extents::new(width, height, depth);
        let cells = extents
            .checked_len()
            .filter(|_| extents.is_addressable())
            .ok_or(WorldError::InvalidExtents {
                width,
                height,
                depth,
            })?;

        let kinds = self
            .forms
            .iter()
            .map(|name| {
                forms
                    .lookup(name)
                    .map(|form| form.kind)
                    .ok_or_else(|| WorldError::UnknownForm(name.clone()))
            })
            .collect::<WorldResult<Vec<_>>>()?;

        if self.data.len() != cells {
            return Err(WorldError::CellCount {
                expected: cells,
                found: self.data.len(),
            });
        }

        let mut world = World::with_forms(extents, forms);
        for (position, &(form, substance, hidden)) in extents.positions().zip(&self.data) {
            let form = *kinds.get(form).ok_or(WorldError::FormIndex {
                index: form,
                count: kinds.len(),
            })?;
            let substance =
                Substance::from_id(substance).ok_or(WorldError::UnknownSubstance(substance))?;

            world.set_block_with(
                position,
                Block::new(form, substance, hidden != 0),
                Propagation::Silent,
            );
        }

        Ok(world)
    }
}

/// Writes `world` as JSON to `writer`.
pub fn save_to_writer<W: Write>(world: &World, writer: W) -> WorldResult<()> {
    serde_json::to_writer(writer, &WorldRecord::capture(world))?;
    Ok(())
}

/// Saves `world` to the file at `path`, replacing it if it exists.
pub fn save(world: &World, path: impl AsRef<Path>) -> WorldResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    save_to_writer(world, &mut writer)?;
    writer.flush()?;
    info!("Saved world to {}", path.display());
    Ok(())
}

/// Reads a world from JSON, resolving form names against `forms`.
pub fn load_from_reader<R: Read>(reader: R, forms: Arc<FormRegistry>) -> WorldResult<World> {
    let record: WorldRecord = serde_json::from_reader(reader)?;
    record.restore(forms)
}

/// Loads the world saved at `path` with a fresh form registry.
pub fn load(path: impl AsRef<Path>) -> WorldResult<World> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let world = load_from_reader(reader, Arc::new(FormRegistry::new()))?;
    info!(
        "Loaded {}x{}x{} world from {}",
        world.width(),
        world.height(),
        world.depth(),
        path.display()
    );
    Ok(world)
}
