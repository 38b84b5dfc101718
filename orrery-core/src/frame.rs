/// Draw-order and visibility decisions for one frame's polygons.
///
/// Ordering uses a radial stand-in for depth: polygons sort by mean
/// squared pixel distance from the viewport center, farthest first.
/// For round bodies centered on screen that coincides with a true
/// painter's sort, and it stays independent of the projected z range.
/// The depth and facing tests run later, in the draw sink.
use std::cmp::Ordering;

use nalgebra::Vector3;

use crate::projection::{ScreenPoint, Viewport};

/// A solid color as the draw sink expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A frame-scoped primitive: screen-space corners plus fill color.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<ScreenPoint>,
    pub fill: Rgb,
}

impl Polygon {
    pub fn new(points: Vec<ScreenPoint>, fill: Rgb) -> Self {
        Self { points, fill }
    }
}

/// Mean squared pixel distance from the polygon's corners to the
/// viewport center. Projected depth never enters the key.
pub fn radial_depth_key(polygon: &Polygon, viewport: &Viewport) -> f64 {
    let (cx, cy) = viewport.center();
    let sum: f64 = polygon
        .points
        .iter()
        .map(|p| {
            let dx = cx - p.x;
            let dy = cy - p.y;
            dx * dx + dy * dy
        })
        .sum();
    sum / polygon.points.len() as f64
}

/// Stable sort, largest radial key first, so painting front to back of
/// the list layers near polygons over far ones. Ties keep emission
/// order.
pub fn sort_back_to_front(polygons: &mut [Polygon], viewport: &Viewport) {
    polygons.sort_by(|a, b| {
        let da = radial_depth_key(a, viewport);
        let db = radial_depth_key(b, viewport);
        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
    });
}

/// Depth acceptance: every corner inside `[near, far]`, bounds
/// included. One corner outside rejects the whole polygon; there is no
/// partial clipping.
pub fn within_depth_range(polygon: &Polygon, near: f64, far: f64) -> bool {
    polygon
        .points
        .iter()
        .all(|p| near <= p.depth && p.depth <= far)
}

/// Facing test on the first three corners over (x, y, depth) exactly as
/// stored: the polygon is kept when the winding normal's z component is
/// positive. The sign convention already absorbs the perspective divide
/// and the canvas y flip, so meshes wound counter-clockwise from
/// outside show their camera-facing half.
pub fn front_facing(polygon: &Polygon) -> bool {
    if polygon.points.len() < 3 {
        return false;
    }
    let a = polygon.points[0];
    let b = polygon.points[1];
    let c = polygon.points[2];
    let u = Vector3::new(b.x - a.x, b.y - a.y, b.depth - a.depth);
    let v = Vector3::new(c.x - a.x, c.y - a.y, c.depth - a.depth);
    u.cross(&v).z > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgb = Rgb::new(10, 20, 30);

    fn flat(points: &[(f64, f64)]) -> Polygon {
        Polygon::new(
            points
                .iter()
                .map(|&(x, y)| ScreenPoint { x, y, depth: 1.0 })
                .collect(),
            INK,
        )
    }

    #[test]
    fn test_radial_key_grows_away_from_center() {
        let viewport = Viewport::new(100.0, 100.0);
        let near = flat(&[(50.0, 50.0), (52.0, 50.0), (50.0, 52.0)]);
        let far = flat(&[(90.0, 90.0), (92.0, 90.0), (90.0, 92.0)]);
        assert!(radial_depth_key(&far, &viewport) > radial_depth_key(&near, &viewport));
    }

    #[test]
    fn test_radial_key_ignores_depth() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut shallow = flat(&[(10.0, 10.0), (12.0, 10.0), (10.0, 12.0)]);
        let mut deep = shallow.clone();
        for point in &mut shallow.points {
            point.depth = 0.1;
        }
        for point in &mut deep.points {
            point.depth = 900.0;
        }
        assert_eq!(
            radial_depth_key(&shallow, &viewport),
            radial_depth_key(&deep, &viewport)
        );
    }

    #[test]
    fn test_sort_is_back_to_front() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut polygons = vec![
            flat(&[(50.0, 50.0), (51.0, 50.0), (50.0, 51.0)]),
            flat(&[(5.0, 5.0), (6.0, 5.0), (5.0, 6.0)]),
            flat(&[(70.0, 50.0), (71.0, 50.0), (70.0, 51.0)]),
        ];
        sort_back_to_front(&mut polygons, &viewport);

        let keys: Vec<f64> = polygons
            .iter()
            .map(|p| radial_depth_key(p, &viewport))
            .collect();
        assert!(keys.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_depth_range_bounds_are_inclusive() {
        let mut polygon = flat(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        polygon.points[0].depth = 0.1;
        polygon.points[1].depth = 1000.0;
        polygon.points[2].depth = 500.0;
        assert!(within_depth_range(&polygon, 0.1, 1000.0));
    }

    #[test]
    fn test_one_corner_outside_rejects_polygon() {
        let mut polygon = flat(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        polygon.points[1].depth = 1000.1;
        assert!(!within_depth_range(&polygon, 0.1, 1000.0));
    }

    #[test]
    fn test_facing_follows_winding_sign() {
        let kept = flat(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(front_facing(&kept));

        let culled = flat(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)]);
        assert!(!front_facing(&culled));
    }

    #[test]
    fn test_degenerate_polygons_never_face_front() {
        let line = flat(&[(0.0, 0.0), (10.0, 10.0)]);
        assert!(!front_facing(&line));

        let collapsed = flat(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        assert!(!front_facing(&collapsed));
    }
}
