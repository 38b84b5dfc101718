/// Orrery Core Library - Shared geometry and projection logic
///
/// This library provides the stateless core of the renderer: OBJ
/// parsing, transformation matrices, perspective projection, and the
/// per-frame polygon pipeline that front ends draw from.

pub mod body;
pub mod frame;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use body::{Body, Satellite};
pub use frame::{Polygon, Rgb};
pub use geometry::{Face, Mesh};
pub use projection::{Projection, ScreenPoint, Viewport};
pub use transform::Axis;
