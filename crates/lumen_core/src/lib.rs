//! Lumen Core - surface appearance and lighting.
//!
//! This crate provides:
//!
//! - **Materials**: Phong parameters plus reflection/refraction terms
//! - **Patterns**: procedural and UV-mapped colour functions, Perlin perturbation
//! - **Textures**: image loading for UV patterns
//! - **Lights**: point and area lights, and the shading equation
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Color, Light, Material, Pattern};
//! use lumen_math::point;
//!
//! let floor = Material::default().with_pattern(Pattern::checker(
//!     Pattern::solid(Color::ONE),
//!     Pattern::solid(Color::ZERO),
//! ));
//! let light = Light::point(point(-10.0, 10.0, -10.0), Color::ONE);
//! ```

pub mod light;
pub mod material;
pub mod noise;
pub mod pattern;
pub mod texture;
pub mod uv;

/// Linear RGB colour. Components are nominally in [0, 1] but may exceed it
/// before output.
pub type Color = glam::DVec3;

// Re-export commonly used types
pub use light::{AreaLight, Light};
pub use material::Material;
pub use pattern::{Pattern, PatternKind};
pub use texture::{Texture, TextureError, TextureResult};
pub use uv::{CubeFace, UvMapping, UvPoint, UvTexture};
