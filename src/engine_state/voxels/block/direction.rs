//! # Direction Module
//!
//! The six axis directions a block can see a neighbour in. Diagonal neighbours
//! play no part in hidden-face computation, so they are not modelled here.

use cgmath::{Point3, Vector3};

/// One of the six axis-aligned neighbour directions.
///
/// The world is laid out with `x` running west to east, `y` running south to
/// north and `z` running bottom to top, so `Left` is west, `Front` is north and
/// `Up` is toward the sky.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    /// Negative X (west)
    Left = 0,

    /// Positive X (east)
    Right = 1,

    /// Negative Y (south)
    Back = 2,

    /// Positive Y (north)
    Front = 3,

    /// Negative Z
    Down = 4,

    /// Positive Z
    Up = 5,
}

impl Direction {
    /// All six directions, in the order neighbours are visited.
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Back,
        Direction::Front,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit offset from a cell to its neighbour in this direction.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            Direction::Left => Vector3::new(-1, 0, 0),
            Direction::Right => Vector3::new(1, 0, 0),
            Direction::Back => Vector3::new(0, -1, 0),
            Direction::Front => Vector3::new(0, 1, 0),
            Direction::Down => Vector3::new(0, 0, -1),
            Direction::Up => Vector3::new(0, 0, 1),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Back => Direction::Front,
            Direction::Front => Direction::Back,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// Position of the neighbour of `position` in this direction.
    pub fn step(self, position: Point3<i32>) -> Point3<i32> {
        position + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_offsets_cancel() {
        for direction in Direction::ALL {
            assert_eq!(
                direction.offset() + direction.opposite().offset(),
                Vector3::new(0, 0, 0)
            );
        }
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = Point3::new(3, 4, 5);
        assert_eq!(Direction::Front.step(origin), Point3::new(3, 5, 5));
        assert_eq!(Direction::Down.step(origin), Point3::new(3, 4, 4));
    }
}
