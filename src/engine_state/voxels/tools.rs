//! # Edit Tools
//!
//! World edits driven from outside the core, such as the player digging or
//! building. Every edit goes through the normal `set_block` path so meshes
//! follow along.

use cgmath::Point3;
use log::debug;

use super::block::substance::Substance;
use super::form::FormKind;
use super::world::World;

/// Blasts a roughly spherical hole around `centre`.
///
/// A cell at squared distance `d` from the centre is cleared iff a uniform
/// random integer drawn from `[r² - r, r²]` exceeds `d`, which roughens the
/// edge of the sphere. Afterwards every void cell in the cube below the centre
/// that rests on a solid block is turned into a ramp where possible.
///
/// # Arguments
/// * `world` - The grid to blast
/// * `centre` - Centre of the sphere; may lie outside the world
/// * `radius` - Sphere radius, clamped to `[0, largest extent]`
///
/// # Returns
/// The number of cells turned into ramps.
pub fn bomb(world: &mut World, centre: Point3<i32>, radius: i32) -> usize {
    let reach = world.size().into_iter().max().unwrap_or(0);
    let r = radius.clamp(0, i32::try_from(reach).unwrap_or(i32::MAX));
    let rr = i64::from(r) * i64::from(r);
    let span = move |c: i32| c.saturating_sub(r)..=c.saturating_add(r);

    let mut cleared = 0;
    for x in span(centre.x) {
        for y in span(centre.y) {
            for z in span(centre.z) {
                let dsq = [x - centre.x, y - centre.y, z - centre.z]
                    .iter()
                    .map(|&d| i64::from(d) * i64::from(d))
                    .sum::<i64>();
                if fastrand::i64(rr - i64::from(r)..=rr) > dsq {
                    let position = Point3::new(x, y, z);
                    if world.contains(position) {
                        cleared += 1;
                    }
                    world.set_block(position, FormKind::Void, Substance::Air, false);
                }
            }
        }
    }

    let mut ramps = 0;
    for x in span(centre.x) {
        for y in span(centre.y) {
            for z in centre.z.saturating_sub(r)..centre.z {
                let position = Point3::new(x, y, z);
                let view = world.get_block(position);
                if view.is_void() && view.down().is_block() && world.make_ramp(position) {
                    ramps += 1;
                }
            }
        }
    }

    debug!(
        "Bomb at {:?} (r = {}) cleared {} cells, placed {} ramps",
        centre, r, cleared, ramps
    );
    ramps
}

/// Picks a random column and returns the position of its topmost solid
/// cell.
///
/// # Returns
/// `None` if the world has no columns or the picked column is empty.
pub fn random_surface(world: &World) -> Option<Point3<i32>> {
    let width = i32::try_from(world.width()).ok().filter(|&w| w > 0)?;
    let height = i32::try_from(world.height()).ok().filter(|&h| h > 0)?;
    let x = fastrand::i32(0..width);
    let y = fastrand::i32(0..height);
    world.surface(x, y).map(|z| Point3::new(x, y, z))
}

/// Places a single visible block.
///
/// # Returns
/// `false` if `position` is outside the world.
pub fn place(
    world: &mut World,
    position: Point3<i32>,
    form: FormKind,
    substance: Substance,
) -> bool {
    world.set_block(position, form, substance, false)
}
