/// Geometry primitives for the cube viewer
use nalgebra::Vector3;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::vector::Vector;

/// Linear RGB, each channel in `0.0..=1.0`
pub type Rgb = [f32; 3];

/// A flat-coloured triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector; 3],
    pub color: Rgb,
}

impl Triangle {
    pub fn new(v0: Vector, v1: Vector, v2: Vector, color: Rgb) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color,
        }
    }

    /// Calculate the face normal from the triangle's winding
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(Vector3::from);
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }
}

/// A triangle list, drawn with one `TRIANGLES` call
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Vertex positions as a flat `x, y, z` buffer
    pub fn positions(&self) -> Vec<f32> {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter().flatten().copied())
            .collect()
    }

    /// Per-vertex colours as a flat `r, g, b` buffer, parallel to `positions`
    pub fn colors(&self) -> Vec<f32> {
        self.triangles
            .iter()
            .flat_map(|t| std::iter::repeat(t.color).take(3).flatten())
            .collect()
    }

    /// Axis-aligned cube centred on the origin, faces ordered
    /// front, left, back, right, top, bottom, two triangles each.
    pub fn cube(size: f32, face_colors: &[Rgb; 6]) -> Self {
        let h = size / 2.0;
        let faces: [[Vector; 6]; 6] = [
            // Front
            [[h, h, h], [h, -h, h], [-h, h, h], [-h, h, h], [h, -h, h], [-h, -h, h]],
            // Left
            [[-h, h, h], [-h, -h, h], [-h, h, -h], [-h, h, -h], [-h, -h, h], [-h, -h, -h]],
            // Back
            [[-h, h, -h], [-h, -h, -h], [h, h, -h], [h, h, -h], [-h, -h, -h], [h, -h, -h]],
            // Right
            [[h, h, -h], [h, -h, -h], [h, h, h], [h, h, h], [h, -h, h], [h, -h, -h]],
            // Top
            [[h, h, h], [h, h, -h], [-h, h, h], [-h, h, h], [h, h, -h], [-h, h, -h]],
            // Bottom
            [[h, -h, h], [h, -h, -h], [-h, -h, h], [-h, -h, h], [h, -h, -h], [-h, -h, -h]],
        ];

        let mut mesh = Self::with_capacity(12);
        for (face, &color) in faces.iter().zip(face_colors) {
            mesh.add_triangle(Triangle::new(face[0], face[1], face[2], color));
            mesh.add_triangle(Triangle::new(face[3], face[4], face[5], color));
        }
        mesh
    }
}

/// Six random face colours, reproducible from `seed`
pub fn random_face_colors(seed: u64) -> [Rgb; 6] {
    let mut rng = SmallRng::seed_from_u64(seed);
    std::array::from_fn(|_| [rng.gen(), rng.gen(), rng.gen()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_buffers() {
        let cube = Mesh::cube(1.0, &random_face_colors(7));
        assert_eq!(cube.triangles.len(), 12);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.positions().len(), 108);
        assert_eq!(cube.colors().len(), 108);
        assert!(cube.positions().iter().all(|c| c.abs() == 0.5));
    }

    #[test]
    fn test_face_shares_one_color() {
        let colors = random_face_colors(3);
        let cube = Mesh::cube(1.0, &colors);
        let flat = cube.colors();
        // 6 vertices per face, 3 channels each
        for (face, expected) in colors.iter().enumerate() {
            for vertex in 0..6 {
                let start = (face * 6 + vertex) * 3;
                assert_eq!(&flat[start..start + 3], expected);
            }
        }
    }

    #[test]
    fn test_face_colors_are_seeded() {
        assert_eq!(random_face_colors(42), random_face_colors(42));
        assert!(random_face_colors(1)
            .iter()
            .flatten()
            .all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn test_normal_of_axis_triangle() {
        let t = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0; 3]);
        let n = t.calculate_normal();
        assert!((n - Vector3::z()).norm() < 1e-6);
    }
}
