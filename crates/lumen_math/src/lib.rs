//! Lumen math - tuples, matrices, rays and bounding boxes for the ray tracer.
//!
//! Geometry works in `f64` homogeneous tuples; `glam` provides the underlying
//! matrix algebra and is re-exported for colour and vector work elsewhere.

// Re-export glam for convenience
pub use glam;

mod bounds;
mod interval;
mod matrix;
mod ray;
mod transform;
mod tuple;

pub use bounds::BoundingBox;
pub use interval::Interval;
pub use matrix::Matrix;
pub use ray::Ray;
pub use transform::view_transform;
pub use tuple::{near, point, vector, Tuple, EPSILON};
