//! Procedural geometry for block forms.
//!
//! Every solid form is a unit prism standing on the `z = 0` plane whose top is
//! described by four corner heights. A cube has all corners at height 1; a
//! ramp lowers the corners that do not touch the side it leans against.

use cgmath::{InnerSpace, Point3, Vector3};

use super::RampDirection;
use crate::engine_state::voxels::block::direction::Direction;

/// A single vertex of a form, in block-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FormVertex {
    /// Position inside the unit cell.
    pub position: Point3<f32>,
    /// Outward facing unit normal.
    pub normal: Vector3<f32>,
    /// Texture coordinates.
    pub texcoord: [f32; 2],
}

/// Corner heights indexed as `heights[x][y]`.
type CornerHeights = [[f32; 2]; 2];

/// Accumulates triangles into vertex and index lists.
#[derive(Default)]
struct PrismBuilder {
    vertices: Vec<FormVertex>,
    indices: Vec<u32>,
}

impl PrismBuilder {
    fn push(&mut self, corners: &[(Point3<f32>, [f32; 2])], normal: Vector3<f32>) {
        let base = self.vertices.len() as u32;
        for &(position, texcoord) in corners {
            self.vertices.push(FormVertex {
                position,
                normal,
                texcoord,
            });
        }
        // Fan triangulation: a triangle yields one, a quad two.
        for i in 1..corners.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    fn bottom(&mut self) {
        self.push(
            &[
                (Point3::new(0.0, 0.0, 0.0), [0.0, 0.0]),
                (Point3::new(0.0, 1.0, 0.0), [0.0, 1.0]),
                (Point3::new(1.0, 1.0, 0.0), [1.0, 1.0]),
                (Point3::new(1.0, 0.0, 0.0), [1.0, 0.0]),
            ],
            Vector3::new(0.0, 0.0, -1.0),
        );
    }

    fn top(&mut self, heights: CornerHeights) {
        let p00 = Point3::new(0.0, 0.0, heights[0][0]);
        let p10 = Point3::new(1.0, 0.0, heights[1][0]);
        let p11 = Point3::new(1.0, 1.0, heights[1][1]);
        let p01 = Point3::new(0.0, 1.0, heights[0][1]);

        let flat = heights.iter().flatten().all(|&h| h == heights[0][0]);
        if flat {
            self.push(
                &[
                    (p00, [0.0, 0.0]),
                    (p10, [1.0, 0.0]),
                    (p11, [1.0, 1.0]),
                    (p01, [0.0, 1.0]),
                ],
                Vector3::new(0.0, 0.0, 1.0),
            );
            return;
        }

        for [a, b, c] in [[p00, p10, p11], [p00, p11, p01]] {
            let normal = (b - a).cross(c - a).normalize();
            self.push(&[(a, [a.x, a.y]), (b, [b.x, b.y]), (c, [c.x, c.y])], normal);
        }
    }

    /// A side wall running from corner `a` to corner `b` along the bottom edge,
    /// counter-clockwise when seen from outside.
    fn wall(&mut self, a: (f32, f32), b: (f32, f32), heights: CornerHeights, normal: Vector3<f32>) {
        let ha = heights[a.0 as usize][a.1 as usize];
        let hb = heights[b.0 as usize][b.1 as usize];
        let a0 = (Point3::new(a.0, a.1, 0.0), [0.0, 0.0]);
        let b0 = (Point3::new(b.0, b.1, 0.0), [1.0, 0.0]);
        let b1 = (Point3::new(b.0, b.1, hb), [1.0, hb]);
        let a1 = (Point3::new(a.0, a.1, ha), [0.0, ha]);

        match (ha > 0.0, hb > 0.0) {
            (false, false) => {}
            (false, true) => self.push(&[a0, b0, b1], normal),
            (true, false) => self.push(&[a0, b0, a1], normal),
            (true, true) => self.push(&[a0, b0, b1, a1], normal),
        }
    }

    fn prism(heights: CornerHeights) -> (Vec<FormVertex>, Vec<u32>) {
        let mut builder = PrismBuilder::default();
        builder.bottom();
        builder.top(heights);
        builder.wall((0.0, 0.0), (1.0, 0.0), heights, Vector3::new(0.0, -1.0, 0.0));
        builder.wall((1.0, 0.0), (1.0, 1.0), heights, Vector3::new(1.0, 0.0, 0.0));
        builder.wall((1.0, 1.0), (0.0, 1.0), heights, Vector3::new(0.0, 1.0, 0.0));
        builder.wall((0.0, 1.0), (0.0, 0.0), heights, Vector3::new(-1.0, 0.0, 0.0));
        (builder.vertices, builder.indices)
    }
}

/// Geometry of the unit cube.
pub(super) fn cube() -> (Vec<FormVertex>, Vec<u32>) {
    PrismBuilder::prism([[1.0; 2]; 2])
}

/// Geometry of a ramp. A corner is raised iff it touches one of the sides the
/// ramp leans against.
pub(super) fn ramp(direction: RampDirection) -> (Vec<FormVertex>, Vec<u32>) {
    let mut heights = [[0.0; 2]; 2];
    for (x, column) in heights.iter_mut().enumerate() {
        for (y, height) in column.iter_mut().enumerate() {
            let raised = direction.high_sides().iter().any(|side| match side {
                Direction::Left => x == 0,
                Direction::Right => x == 1,
                Direction::Back => y == 0,
                Direction::Front => y == 1,
                Direction::Down | Direction::Up => false,
            });
            if raised {
                *height = 1.0;
            }
        }
    }
    PrismBuilder::prism(heights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_quads() {
        let (vertices, indices) = cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn straight_ramp_drops_the_far_wall() {
        // bottom quad, two top triangles, two end triangles, one back quad
        let (vertices, indices) = ramp(RampDirection::W);
        assert_eq!(vertices.len(), 4 + 6 + 3 + 3 + 4);
        assert_eq!(indices.len(), 6 + 6 + 3 + 3 + 6);
        assert!(vertices
            .iter()
            .filter(|v| v.position.x == 1.0)
            .all(|v| v.position.z == 0.0));
    }

    #[test]
    fn corner_ramp_keeps_three_high_corners() {
        let (vertices, _) = ramp(RampDirection::WN);
        let high: Vec<_> = vertices.iter().filter(|v| v.position.z == 1.0).collect();
        assert!(high.iter().all(|v| !(v.position.x == 1.0 && v.position.y == 0.0)));
        assert!(!high.is_empty());
    }

    #[test]
    fn indices_stay_in_range_and_normals_are_unit() {
        for direction in RampDirection::ALL {
            let (vertices, indices) = ramp(direction);
            assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
            assert_eq!(indices.len() % 3, 0);
            for vertex in &vertices {
                assert!((vertex.normal.magnitude() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn top_normals_point_up() {
        let (vertices, _) = ramp(RampDirection::ES);
        let sloped = vertices
            .iter()
            .filter(|v| v.normal.z != 0.0 && (v.normal.x != 0.0 || v.normal.y != 0.0));
        for vertex in sloped {
            assert!(vertex.normal.z > 0.0);
        }
    }
}
