/// A renderable body: mesh, place in the scene, accumulated spin, and
/// optionally a satellite riding a circular track around it.
use nalgebra::{Point3, Vector3};

use crate::frame::{Polygon, Rgb};
use crate::geometry::{Face, Mesh};
use crate::projection::{Projection, ScreenPoint, Viewport};
use crate::transform::{rotate_around_object, translate, Axis};

/// The secondary body: its own mesh and fill, placed by its primary.
#[derive(Debug, Clone)]
pub struct Satellite {
    mesh: Mesh,
    fill: Rgb,
}

/// The primary body plus everything needed to turn it into screen-space
/// polygons each frame.
pub struct Body {
    mesh: Mesh,
    position: Vector3<f64>,
    /// Accumulated spin in degrees. Grows without bound; only its
    /// radian image ever reaches the trigonometry.
    angle: f64,
    projection: Projection,
    viewport: Viewport,
    fill: Rgb,
    orbit_radius: f64,
    satellite: Option<Satellite>,
}

impl Body {
    pub fn new(
        mesh: Mesh,
        position: Vector3<f64>,
        projection: Projection,
        viewport: Viewport,
        start_angle: f64,
        fill: Rgb,
    ) -> Self {
        Self {
            mesh,
            position,
            angle: start_angle,
            projection,
            viewport,
            fill,
            orbit_radius: 0.0,
            satellite: None,
        }
    }

    /// Attach a satellite on a circular track of `orbit_radius` around
    /// this body. The track lies in the plane perpendicular to the spin
    /// axis, and the satellite runs it opposite to the spin direction.
    pub fn with_satellite(mut self, mesh: Mesh, orbit_radius: f64, fill: Rgb) -> Self {
        self.orbit_radius = orbit_radius;
        self.satellite = Some(Satellite { mesh, fill });
        self
    }

    /// Accumulated spin in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advance the spin by `step` degrees and emit this frame's screen
    /// polygons, the primary's first and the satellite's after.
    ///
    /// The primary translates to its scene position and spins around its
    /// own centroid. The satellite translates onto its orbit track,
    /// spins around its own Y axis, and then translates by the
    /// primary's position once more. The track's center already carries
    /// that position, so the second translate doubles the offset and
    /// pushes the ring out past the primary; the pair reads as a
    /// fly-by rather than a tight orbit.
    pub fn advance_and_project(&mut self, step: f64, axis: Axis) -> Vec<Polygon> {
        self.angle += step;
        let spin = self.angle.to_radians();

        let mut polygons = Vec::new();

        let placed = translate(&self.mesh.vertices, &self.position);
        let spun = rotate_around_object(&placed, axis, spin);
        let screen = self.to_screen_points(&spun);
        for face in &self.mesh.faces {
            emit_face(face, &screen, self.fill, &mut polygons);
        }

        if let Some(satellite) = &self.satellite {
            let track = orbit_position(axis, -spin, self.orbit_radius, &self.position);
            let placed = translate(&satellite.mesh.vertices, &track);
            let spun = rotate_around_object(&placed, Axis::Y, -spin);
            let pushed = translate(&spun, &self.position);
            let screen = self.to_screen_points(&pushed);
            for face in &satellite.mesh.faces {
                emit_face(face, &screen, satellite.fill, &mut polygons);
            }
        }

        polygons
    }

    fn to_screen_points(&self, vertices: &[Point3<f64>]) -> Vec<ScreenPoint> {
        self.projection
            .project(vertices)
            .iter()
            .map(|ndc| self.viewport.to_screen(ndc))
            .collect()
    }
}

/// Where the satellite's track puts it: a circle of `radius` around
/// `center` in the plane perpendicular to `axis`. The axis coordinate
/// stays at the center's value; the other two take cos and sin in
/// coordinate order.
fn orbit_position(axis: Axis, angle: f64, radius: f64, center: &Vector3<f64>) -> Vector3<f64> {
    let swing = radius * angle.cos();
    let sweep = radius * angle.sin();
    match axis {
        Axis::X => Vector3::new(center.x, center.y + swing, center.z + sweep),
        Axis::Y => Vector3::new(center.x + swing, center.y, center.z + sweep),
        Axis::Z => Vector3::new(center.x + swing, center.y + sweep, center.z),
    }
}

/// Emit one face as polygons: a fan from the first corner when the face
/// has more than three, otherwise the face as-is.
fn emit_face(face: &Face, screen: &[ScreenPoint], fill: Rgb, out: &mut Vec<Polygon>) {
    if face.len() > 3 {
        for i in 1..face.len() - 1 {
            out.push(Polygon::new(
                vec![screen[face[0]], screen[face[i]], screen[face[i + 1]]],
                fill,
            ));
        }
    } else {
        out.push(Polygon::new(
            face.iter().map(|&index| screen[index]).collect(),
            fill,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Projection, Viewport};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const BLUE: Rgb = Rgb::new(33, 70, 94);
    const GREY: Rgb = Rgb::new(204, 204, 204);

    fn scene_projection() -> Projection {
        Projection::new(PI / 3.0, 1.0, 0.1, 1000.0)
    }

    fn scene_viewport() -> Viewport {
        Viewport::new(800.0, 800.0)
    }

    fn screen_strip(count: usize) -> Vec<ScreenPoint> {
        (0..count)
            .map(|i| ScreenPoint {
                x: i as f64,
                y: (i * i) as f64,
                depth: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_angle_accumulates_without_wrapping() {
        let mut body = Body::new(
            Mesh::cube(2.0),
            Vector3::new(0.0, 0.0, 12.0),
            scene_projection(),
            scene_viewport(),
            0.0,
            BLUE,
        );
        body.advance_and_project(200.0, Axis::Y);
        body.advance_and_project(200.0, Axis::Y);
        assert_relative_eq!(body.angle(), 400.0);
    }

    #[test]
    fn test_quad_face_fans_into_two_triangles() {
        let screen = screen_strip(4);
        let mut out = Vec::new();
        emit_face(&vec![0, 1, 2, 3], &screen, BLUE, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].points.len(), 3);
        assert_eq!(out[1].points.len(), 3);
        // Both triangles share the face's first corner
        assert_eq!(out[0].points[0], screen[0]);
        assert_eq!(out[1].points[0], screen[0]);
        assert_eq!(out[1].points[1], screen[2]);
    }

    #[test]
    fn test_polygon_face_fans_into_n_minus_two() {
        let screen = screen_strip(7);
        let mut out = Vec::new();
        emit_face(&vec![0, 1, 2, 3, 4, 5, 6], &screen, BLUE, &mut out);

        assert_eq!(out.len(), 5);
        // Every fan triangle hangs off the face's first corner
        assert!(out.iter().all(|p| p.points[0] == screen[0]));
        assert_eq!(out[4].points[1], screen[5]);
        assert_eq!(out[4].points[2], screen[6]);
    }

    #[test]
    fn test_triangle_face_passes_through() {
        let screen = screen_strip(3);
        let mut out = Vec::new();
        emit_face(&vec![2, 0, 1], &screen, GREY, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points, vec![screen[2], screen[0], screen[1]]);
        assert_eq!(out[0].fill, GREY);
    }

    #[test]
    fn test_orbit_track_stays_in_plane_of_axis() {
        let center = Vector3::new(1.0, 2.0, 3.0);
        for angle in [0.0, 0.7, 2.1, 4.9] {
            let y = orbit_position(Axis::Y, angle, 10.0, &center);
            assert_relative_eq!(y.y, center.y, epsilon = 1e-12);

            let x = orbit_position(Axis::X, angle, 10.0, &center);
            assert_relative_eq!(x.x, center.x, epsilon = 1e-12);

            let z = orbit_position(Axis::Z, angle, 10.0, &center);
            assert_relative_eq!(z.z, center.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_orbit_track_at_angle_zero() {
        let center = Vector3::new(0.0, 0.0, 12.0);
        let track = orbit_position(Axis::Y, 0.0, 10.0, &center);
        assert_relative_eq!(track, Vector3::new(10.0, 0.0, 12.0), epsilon = 1e-12);
    }

    #[test]
    fn test_primary_polygons_precede_satellite_polygons() {
        let mut body = Body::new(
            Mesh::cube(2.0),
            Vector3::new(0.0, 0.0, 12.0),
            scene_projection(),
            scene_viewport(),
            0.0,
            BLUE,
        )
        .with_satellite(Mesh::cube(1.0), 10.0, GREY);

        let polygons = body.advance_and_project(5.0, Axis::Y);

        // Each cube fans its 6 quads into 12 triangles
        assert_eq!(polygons.len(), 24);
        assert!(polygons[..12].iter().all(|p| p.fill == BLUE));
        assert!(polygons[12..].iter().all(|p| p.fill == GREY));
    }

    #[test]
    fn test_satellite_placement_matches_pipeline_stages() {
        let position = Vector3::new(0.0, 0.0, 12.0);
        let projection = scene_projection();
        let viewport = scene_viewport();
        let moon = Mesh::cube(1.0);

        let mut body = Body::new(
            Mesh::cube(2.0),
            position,
            projection,
            viewport,
            0.0,
            BLUE,
        )
        .with_satellite(moon.clone(), 10.0, GREY);

        let step = 30.0;
        let polygons = body.advance_and_project(step, Axis::Y);

        // Rebuild the satellite stages by hand: orbit track at the
        // negated spin angle, own-axis spin, then the primary's offset a
        // second time
        let spin = step.to_radians();
        let track = orbit_position(Axis::Y, -spin, 10.0, &position);
        let placed = translate(&moon.vertices, &track);
        let spun = rotate_around_object(&placed, Axis::Y, -spin);
        let pushed = translate(&spun, &position);
        let expected: Vec<ScreenPoint> = projection
            .project(&pushed)
            .iter()
            .map(|ndc| viewport.to_screen(ndc))
            .collect();

        let first_satellite_polygon = &polygons[12];
        assert_eq!(first_satellite_polygon.points[0], expected[moon.faces[0][0]]);
        assert_eq!(first_satellite_polygon.points[1], expected[moon.faces[0][1]]);
        assert_eq!(first_satellite_polygon.points[2], expected[moon.faces[0][2]]);
    }
}
