/// Transformation matrices and the vertex-set operations built on them.
/// Every rotation builder takes radians; `body` owns the one spot where
/// accumulated degrees become radians.
use nalgebra::{Matrix4, Point3, Vector3};

/// A principal axis. Selects the spin rotation and, for orbits, the
/// plane perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotation matrix around this axis (radians).
    pub fn rotation_matrix(self, angle: f64) -> Matrix4<f64> {
        match self {
            Axis::X => rotation_x(angle),
            Axis::Y => rotation_y(angle),
            Axis::Z => rotation_z(angle),
        }
    }
}

/// Translation matrix moving points by `offset`.
pub fn translation(offset: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(offset)
}

/// Scaling matrix with `factors` on the diagonal.
pub fn scaling(factors: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(factors)
}

/// Rotation around the X axis (radians).
pub fn rotation_x(angle: f64) -> Matrix4<f64> {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        1.0, 0.0,  0.0, 0.0,
        0.0, cos, -sin, 0.0,
        0.0, sin,  cos, 0.0,
        0.0, 0.0,  0.0, 1.0,
    );
    matrix
}

/// Rotation around the Y axis (radians).
pub fn rotation_y(angle: f64) -> Matrix4<f64> {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
         cos, 0.0, sin, 0.0,
         0.0, 1.0, 0.0, 0.0,
        -sin, 0.0, cos, 0.0,
         0.0, 0.0, 0.0, 1.0,
    );
    matrix
}

/// Rotation around the Z axis (radians).
pub fn rotation_z(angle: f64) -> Matrix4<f64> {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        cos, -sin, 0.0, 0.0,
        sin,  cos, 0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,
        0.0,  0.0, 0.0, 1.0,
    );
    matrix
}

/// Move every vertex by `offset`, through the homogeneous form.
pub fn translate(vertices: &[Point3<f64>], offset: &Vector3<f64>) -> Vec<Point3<f64>> {
    let matrix = translation(offset);
    vertices.iter().map(|v| matrix.transform_point(v)).collect()
}

/// Scale every vertex by `factors` about the origin.
pub fn scale(vertices: &[Point3<f64>], factors: &Vector3<f64>) -> Vec<Point3<f64>> {
    let matrix = scaling(factors);
    vertices.iter().map(|v| matrix.transform_point(v)).collect()
}

/// Arithmetic mean of the vertex positions. Callers feed non-empty sets.
pub fn centroid(vertices: &[Point3<f64>]) -> Point3<f64> {
    let sum = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.coords);
    Point3::from(sum / vertices.len() as f64)
}

/// Spin the vertex set in place around its own centroid.
///
/// The pivot is the set's current geometric center, not the world
/// origin; a mesh already pushed out into the scene keeps its position
/// and only changes orientation.
pub fn rotate_around_object(
    vertices: &[Point3<f64>],
    axis: Axis,
    angle: f64,
) -> Vec<Point3<f64>> {
    let center = centroid(vertices);
    let rotation = axis.rotation_matrix(angle);
    vertices
        .iter()
        .map(|v| rotation.transform_point(&Point3::from(v - center)) + center.coords)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_translation_moves_points() {
        let matrix = translation(&Vector3::new(1.0, -2.0, 3.0));
        let moved = matrix.transform_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(moved, Point3::new(1.5, -1.5, 3.5), epsilon = 1e-12);
    }

    #[test]
    fn test_scaling_is_diagonal() {
        let matrix = scaling(&Vector3::new(2.0, 3.0, 4.0));
        let scaled = matrix.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(scaled, Point3::new(2.0, 3.0, 4.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_y_sends_x_to_minus_z() {
        let matrix = rotation_y(FRAC_PI_2);
        let turned = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(turned, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_x_sends_y_to_z() {
        let matrix = rotation_x(FRAC_PI_2);
        let turned = matrix.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(turned, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_z_sends_x_to_y() {
        let matrix = rotation_z(FRAC_PI_2);
        let turned = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(turned, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_of_cube_sits_at_its_center() {
        let cube = crate::geometry::Mesh::cube(2.0);
        let shifted = translate(&cube.vertices, &Vector3::new(5.0, 0.0, -3.0));
        assert_relative_eq!(
            centroid(&shifted),
            Point3::new(5.0, 0.0, -3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rotation_preserves_centroid() {
        let cube = crate::geometry::Mesh::cube(2.0);
        let placed = translate(&cube.vertices, &Vector3::new(3.0, 1.0, 12.0));
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let spun = rotate_around_object(&placed, axis, 1.234);
            assert_relative_eq!(centroid(&spun), centroid(&placed), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotations_compose_additively() {
        let cube = crate::geometry::Mesh::cube(2.0);
        let placed = translate(&cube.vertices, &Vector3::new(0.0, 2.0, 9.0));

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let stepped = rotate_around_object(
                &rotate_around_object(&placed, axis, PI / 5.0),
                axis,
                PI / 7.0,
            );
            let direct = rotate_around_object(&placed, axis, PI / 5.0 + PI / 7.0);

            for (a, b) in stepped.iter().zip(direct.iter()) {
                assert_relative_eq!(a, b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_object_rotation_spins_in_place() {
        // A cube pushed off-origin must not sweep around the world origin
        let cube = crate::geometry::Mesh::cube(2.0);
        let placed = translate(&cube.vertices, &Vector3::new(0.0, 0.0, 12.0));
        let spun = rotate_around_object(&placed, Axis::Y, FRAC_PI_2);

        // Corner (-1, -1, 11) relative to center (0, 0, 12) is (-1, -1, -1);
        // a quarter turn around Y takes that to (-1, -1, 1), so world (-1, -1, 13)
        assert_relative_eq!(spun[0], Point3::new(-1.0, -1.0, 13.0), epsilon = 1e-9);
    }
}
