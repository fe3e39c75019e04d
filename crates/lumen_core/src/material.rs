//! Surface appearance for the Phong shading model.

use crate::{Color, Pattern};

/// Phong material with reflection and refraction terms.
#[derive(Clone, Debug)]
pub struct Material {
    /// Surface colour as a function of position
    pub pattern: Pattern,

    /// Fraction of light reflected regardless of orientation
    pub ambient: f64,

    /// Lambertian reflection factor
    pub diffuse: f64,

    /// Highlight strength
    pub specular: f64,

    /// Highlight tightness (larger = smaller, sharper highlight)
    pub shininess: f64,

    /// Mirror reflection amount (0 = none, 1 = perfect mirror)
    pub reflective: f64,

    /// Transmitted light amount (0 = opaque)
    pub transparency: f64,

    /// Index of refraction (1.0 = vacuum)
    pub refractive_index: f64,

    /// Whether the surface occludes light for shadow rays
    pub shadow: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            shadow: true,
        }
    }
}

impl Material {
    /// Default material with a flat colour.
    pub fn new(color: Color) -> Self {
        Self {
            pattern: Pattern::solid(color),
            ..Default::default()
        }
    }

    /// Replace the pattern.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Glass-like preset: fully transparent with index 1.5.
    pub fn glass() -> Self {
        Self {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Default::default()
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.reflective > 0.0
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}
