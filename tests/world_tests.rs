use cgmath::Point3;
use dorfdelf::engine_state::voxels::{
    block::{direction::Direction, substance::Substance, Block},
    form::{FormKind, RampDirection},
    generation::TerrainGenerator,
    serialization,
    world::{Propagation, World},
};
use noise::Constant;

/// Helper: a world with every cell set to a visible stone block
fn stone_world(width: usize, height: usize, depth: usize) -> World {
    let mut world = World::new(width, height, depth);
    for position in world.positions().collect::<Vec<_>>() {
        world.set_block_with(position, Block::solid(Substance::Stone), Propagation::Silent);
    }
    world
}

#[test]
fn set_block_round_trips_for_every_cell() {
    let mut world = World::new(3, 4, 2);
    let forms: Vec<FormKind> = FormKind::all().collect();

    for (i, position) in world.positions().collect::<Vec<_>>().into_iter().enumerate() {
        let form = forms[i % forms.len()];
        let substance = if i % 2 == 0 { Substance::Dirt } else { Substance::Stone };
        let hidden = i % 3 == 0;
        // Silent writes keep neighbours from rewriting the hidden flags.
        world.set_block_with(position, Block::new(form, substance, hidden), Propagation::Silent);

        let view = world.get_block(position);
        assert_eq!(view.form(), Some(form));
        assert_eq!(view.substance(), substance);
        assert_eq!(view.hidden(), hidden);
    }
}

#[test]
fn out_of_bounds_views_are_never_classified() {
    let world = stone_world(2, 2, 2);
    let outside = [
        Point3::new(-1, 0, 0),
        Point3::new(2, 0, 0),
        Point3::new(0, -1, 0),
        Point3::new(0, 2, 0),
        Point3::new(0, 0, -1),
        Point3::new(0, 0, 2),
    ];
    for position in outside {
        let view = world.get_block(position);
        assert!(!view.is_void() && !view.is_block() && !view.is_ramp() && !view.passable());
    }
}

#[test]
fn neighbours_beyond_the_edge_are_null() {
    let world = stone_world(2, 2, 2);
    let corner = world.get_block(Point3::new(0, 0, 0));
    assert!(corner.left().is_null());
    assert!(corner.back().is_null());
    assert!(corner.down().is_null());
    assert!(corner.right().is_block());
}

#[test]
fn boundary_cells_are_never_hidden_by_missing_neighbours() {
    let mut world = stone_world(3, 3, 3);
    for position in world.positions().collect::<Vec<_>>() {
        world.update_hidden(position);
    }
    for view in world.all() {
        let interior = view.position() == Point3::new(1, 1, 1);
        assert_eq!(view.hidden(), interior, "{:?}", view.position());
    }
}

#[test]
fn hidden_flag_follows_the_axis_rule() {
    let mut world = stone_world(3, 3, 3);
    let centre = Point3::new(1, 1, 1);

    for direction in Direction::ALL {
        let neighbour = direction.step(centre);
        world.set_block_with(
            neighbour,
            Block::new(FormKind::Ramp(RampDirection::N), Substance::Stone, false),
            Propagation::Silent,
        );
        world.update_hidden(centre);
        assert_eq!(world.get_block(centre).hidden(), direction == Direction::Up);
        world.set_block_with(neighbour, Block::solid(Substance::Stone), Propagation::Silent);
    }
}

#[test]
fn corner_ramp_wins_regardless_of_placement_order() {
    for front_first in [true, false] {
        let mut world = World::new(3, 3, 1);
        let left = Point3::new(0, 1, 0);
        let front = Point3::new(1, 2, 0);
        if front_first {
            world.set_block(front, FormKind::Block, Substance::Stone, false);
            world.set_block(left, FormKind::Block, Substance::Dirt, false);
        } else {
            world.set_block(left, FormKind::Block, Substance::Dirt, false);
            world.set_block(front, FormKind::Block, Substance::Stone, false);
        }

        let centre = Point3::new(1, 1, 0);
        assert!(world.make_ramp(centre));
        assert_eq!(
            world.get_block(centre).form(),
            Some(FormKind::Ramp(RampDirection::WN))
        );
        assert_eq!(world.get_block(centre).substance(), Substance::Dirt);
    }
}

#[test]
fn make_ramp_emits_a_single_update() {
    let mut world = World::new(3, 3, 1);
    world.set_block(Point3::new(2, 1, 0), FormKind::Block, Substance::Stone, false);
    let updates = world.subscribe();

    assert!(world.make_ramp(Point3::new(1, 1, 0)));
    let positions: Vec<_> = updates.try_iter().map(|u| u.position).collect();
    assert_eq!(positions, vec![Point3::new(1, 1, 0)]);

    // Same ramp again: nothing changes.
    assert!(world.make_ramp(Point3::new(1, 1, 0)));
    assert!(updates.try_recv().is_err());
}

#[test]
fn flat_generation_fills_five_stone_layers() {
    let mut world = World::new(8, 8, 10);
    TerrainGenerator::with_noise(Constant::new(0.0)).generate(&mut world);

    for (x, y) in world.columns().collect::<Vec<_>>() {
        let solid: Vec<_> = world
            .zlevels()
            .filter(|&z| world.get_block(Point3::new(x, y, z)).is_block())
            .collect();
        assert_eq!(solid, vec![0, 1, 2, 3, 4]);
        assert_eq!(world.surface(x, y), Some(4));
    }
    assert!(world
        .all()
        .filter(|view| view.is_block())
        .all(|view| view.substance() == Substance::Stone));
}

#[test]
fn generated_worlds_survive_a_file_round_trip() {
    let mut world = World::new(12, 10, 16);
    TerrainGenerator::with_noise(noise::Perlin::new(3)).generate(&mut world);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    serialization::save(&world, &path).unwrap();
    let loaded = serialization::load(&path).unwrap();

    assert_eq!(loaded.size(), world.size());
    for (a, b) in world.all().zip(loaded.all()) {
        assert_eq!(a.block(), b.block(), "{:?}", a.position());
    }
}
