//! Lumen Renderer - CPU Whitted-style ray tracing.
//!
//! Shapes live in an owned tree: primitives, groups and CSG nodes. Each node
//! bakes its world-space matrices when the tree is built, after which the
//! whole scene is read-only and shared across render threads.
//!
//! Rays are resolved recursively: direct Phong lighting with soft shadows
//! from area lights, mirror reflection and refraction blended by Schlick's
//! approximation, bounded by a maximum depth.
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::{Camera, Shape, World};
//! use lumen_core::{Color, Light};
//! use lumen_math::{point, vector, view_transform};
//!
//! let world = World::new(
//!     vec![Shape::sphere()],
//!     vec![Light::point(point(-10.0, 10.0, -10.0), Color::ONE)],
//! );
//! let camera = Camera::new(
//!     320,
//!     240,
//!     std::f64::consts::FRAC_PI_3,
//!     view_transform(point(0.0, 1.5, -5.0), point(0.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)),
//! );
//! let image = camera.render(&world);
//! ```

mod camera;
mod config;
mod csg;
mod cube;
mod cylinder;
mod group;
mod intersection;
mod plane;
mod renderer;
mod shape;
mod sphere;
mod triangle;
mod world;

pub use camera::Camera;
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use csg::{Csg, CsgOperation};
pub use cube::Cube;
pub use cylinder::{Cone, Cylinder};
pub use group::Group;
pub use intersection::{hit, hit_index, Computations, Intersection};
pub use plane::Plane;
pub use renderer::{color_to_rgba, render, ImageBuffer};
pub use shape::{LocalHit, Primitive, Shape, ShapeKind};
pub use sphere::Sphere;
pub use triangle::{SmoothTriangle, Triangle};
pub use world::World;

/// Re-export the types scenes are assembled from
pub use lumen_core::{AreaLight, Color, Light, Material, Pattern};
pub use lumen_math::{point, vector, view_transform, Matrix, Ray, Tuple};
