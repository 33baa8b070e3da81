//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Vertices emitted per rectangle
pub const RECT_VERTICES: usize = 6;

/// Axis-aligned rectangle covering `center ± radius` as two CCW triangles
/// sharing the bottom-left/top-right diagonal.
pub fn rectangle(center: Vec2, radius: Vec2, color: [u8; 4]) -> [Vertex; RECT_VERTICES] {
    let min = center - radius;
    let max = center + radius;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::SOLID_TEX_COORD;

    fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b - a).perp_dot(c - a) * 0.5
    }

    #[test]
    fn test_rectangle_is_two_ccw_triangles() {
        let verts = rectangle(Vec2::new(1.0, -2.0), Vec2::new(0.5, 0.25), [1, 2, 3, 4]);

        for tri in verts.chunks(3) {
            let area = signed_area(tri[0].xy(), tri[1].xy(), tri[2].xy());
            assert!(area > 0.0, "triangle must wind counter-clockwise");
        }
        // Together the triangles cover the full 1.0 x 0.5 rectangle
        let total: f32 = verts
            .chunks(3)
            .map(|t| signed_area(t[0].xy(), t[1].xy(), t[2].xy()))
            .sum();
        assert!((total - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rectangle_bounds_and_attributes() {
        let verts = rectangle(Vec2::ZERO, Vec2::new(2.0, 1.0), [9, 9, 9, 255]);
        for v in &verts {
            assert_eq!(v.position[0].abs(), 2.0);
            assert_eq!(v.position[1].abs(), 1.0);
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.color, [9, 9, 9, 255]);
            assert_eq!(v.tex_coord, SOLID_TEX_COORD);
        }
    }
}
