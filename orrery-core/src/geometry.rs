/// Geometry primitives for the render pipeline
use std::f64::consts::{PI, TAU};

use nalgebra::Point3;

/// Ordered vertex indices of one polygonal face, zero-based into the
/// owning mesh's vertex list. Faces keep their source arity; anything
/// with more than three corners is fan-triangulated at projection time.
pub type Face = Vec<usize>;

/// An indexed mesh: a fixed vertex list plus faces referencing it.
///
/// Built or loaded once, then copied per frame by the transform stages.
/// Faces are wound counter-clockwise seen from outside the surface.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Axis-aligned cube centered on the origin, six quad faces.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let faces = vec![
            // Front face
            vec![4, 5, 6, 7],
            // Back face
            vec![1, 0, 3, 2],
            // Right face
            vec![5, 1, 2, 6],
            // Left face
            vec![0, 4, 7, 3],
            // Top face
            vec![3, 7, 6, 2],
            // Bottom face
            vec![0, 1, 5, 4],
        ];
        Self { vertices, faces }
    }

    /// UV sphere centered on the origin: triangle caps at the poles and
    /// quad bands between the rings. `segments` counts slices around the
    /// polar axis (clamped to >= 3), `rings` counts stacks from pole to
    /// pole (clamped to >= 2).
    pub fn uv_sphere(radius: f64, segments: usize, rings: usize) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(segments * (rings - 1) + 2);
        vertices.push(Point3::new(0.0, radius, 0.0));
        for ring in 1..rings {
            let polar = PI * ring as f64 / rings as f64;
            let y = radius * polar.cos();
            let band = radius * polar.sin();
            for segment in 0..segments {
                let azimuth = TAU * segment as f64 / segments as f64;
                vertices.push(Point3::new(band * azimuth.cos(), y, band * azimuth.sin()));
            }
        }
        vertices.push(Point3::new(0.0, -radius, 0.0));

        // Ring r (1-based from the north pole) starts after the pole vertex
        let ring_start = |ring: usize| 1 + (ring - 1) * segments;
        let south = vertices.len() - 1;

        let mut faces = Vec::with_capacity(segments * rings);
        for segment in 0..segments {
            let a = ring_start(1) + segment;
            let b = ring_start(1) + (segment + 1) % segments;
            faces.push(vec![0, b, a]);
        }
        for ring in 1..rings - 1 {
            let upper = ring_start(ring);
            let lower = ring_start(ring + 1);
            for segment in 0..segments {
                let next = (segment + 1) % segments;
                faces.push(vec![
                    upper + segment,
                    upper + next,
                    lower + next,
                    lower + segment,
                ]);
            }
        }
        for segment in 0..segments {
            let a = ring_start(rings - 1) + segment;
            let b = ring_start(rings - 1) + (segment + 1) % segments;
            faces.push(vec![south, a, b]);
        }

        Self { vertices, faces }
    }
}
