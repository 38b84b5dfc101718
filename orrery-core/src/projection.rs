/// Perspective projection and the normalized-to-pixel mapping
use nalgebra::{Matrix4, Point3};

/// Immutable projection parameters shared by every body in a scene.
///
/// `fov` is the vertical field of view in radians. Callers keep `fov`
/// inside (0, pi) and `far` above `near`; the matrix divides by
/// `tan(fov / 2)` and `far - near` without guarding them.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub fn new(fov: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// The perspective matrix. The aspect ratio multiplies the x focal
    /// term directly, and the bottom row copies `-z` into `w` so the
    /// later divide flips x and y for points in front of the camera.
    pub fn matrix(&self) -> Matrix4<f64> {
        let focal = 1.0 / (self.fov / 2.0).tan();
        let depth_scale = -(self.far + self.near) / (self.far - self.near);
        let depth_offset = -2.0 * self.far * self.near / (self.far - self.near);
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            self.aspect_ratio * focal,   0.0,         0.0,          0.0,
            0.0,                       focal,         0.0,          0.0,
            0.0,                         0.0, depth_scale, depth_offset,
            0.0,                         0.0,        -1.0,          0.0,
        );
        matrix
    }

    /// Project a vertex set into normalized device coordinates.
    ///
    /// Each vertex passes through the homogeneous form; when the
    /// resulting `w` is exactly zero the undivided components are kept
    /// as they are instead of raising.
    pub fn project(&self, vertices: &[Point3<f64>]) -> Vec<Point3<f64>> {
        let matrix = self.matrix();
        vertices
            .iter()
            .map(|v| {
                let h = matrix * v.to_homogeneous();
                if h.w != 0.0 {
                    Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
                } else {
                    Point3::new(h.x, h.y, h.z)
                }
            })
            .collect()
    }
}

/// A vertex mapped onto the canvas: pixel x/y plus the projected depth
/// carried along for the near/far test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center pixel, the reference point for the draw-order key.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Map normalized coordinates onto pixels. Canvas y grows downward,
    /// so y flips sign here; depth passes through untouched.
    pub fn to_screen(&self, ndc: &Point3<f64>) -> ScreenPoint {
        ScreenPoint {
            x: ndc.x * self.width / 2.0 + self.width / 2.0,
            y: -ndc.y * self.height / 2.0 + self.height / 2.0,
            depth: ndc.z,
        }
    }
}
