//! Patterns: colour as a function of a point on a surface.
//!
//! Every pattern carries its own transform. `color_at_object` takes a point in
//! the owning shape's object space, moves it into pattern space and samples.
//! Composite patterns hand their pattern-space point to child patterns, which
//! apply their own transform in turn.

use lumen_math::{near, Matrix, Tuple};

use crate::noise::octave_noise;
use crate::uv::{CubeFace, UvMapping, UvTexture};
use crate::Color;

#[derive(Debug, Clone)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates between `a` and `b` every unit of x, cycling through
    /// `repeat` bands (`a` on the first, `b` on the rest).
    Stripe {
        a: Box<Pattern>,
        b: Box<Pattern>,
        repeat: u32,
    },
    /// Concentric rings in the xz plane.
    Ring { a: Box<Pattern>, b: Box<Pattern> },
    /// 3-D checkerboard of unit cubes.
    Checker { a: Box<Pattern>, b: Box<Pattern> },
    /// Linear blend from `a` to `b` over each unit of x.
    Gradient { a: Box<Pattern>, b: Box<Pattern> },
    /// Linear blend by distance from the y axis.
    RadialGradient { a: Box<Pattern>, b: Box<Pattern> },
    /// Blend by distance from the nearest integer corner in the xz plane.
    CornerGradient { a: Box<Pattern>, b: Box<Pattern> },
    /// Perturbs the sample point with Perlin noise before delegating.
    Perlin {
        inner: Box<Pattern>,
        scale: f64,
        octaves: u32,
        persistence: f64,
    },
    /// 2-D texture projected with a UV mapping.
    Mapped { texture: UvTexture, mapping: UvMapping },
    /// One UV texture per face of the unit cube.
    CubeMap {
        left: UvTexture,
        front: UvTexture,
        right: UvTexture,
        back: UvTexture,
        up: UvTexture,
        down: UvTexture,
    },
    /// Returns the pattern-space point as a colour. Handy for debugging and tests.
    Coordinates,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    transform: Matrix,
    inverse: Matrix,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(PatternKind::Solid(color))
    }

    pub fn stripe(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Stripe {
            a: Box::new(a),
            b: Box::new(b),
            repeat: 2,
        })
    }

    pub fn ring(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Ring {
            a: Box::new(a),
            b: Box::new(b),
        })
    }

    pub fn checker(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Checker {
            a: Box::new(a),
            b: Box::new(b),
        })
    }

    pub fn gradient(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Gradient {
            a: Box::new(a),
            b: Box::new(b),
        })
    }

    pub fn radial_gradient(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::RadialGradient {
            a: Box::new(a),
            b: Box::new(b),
        })
    }

    pub fn corner_gradient(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::CornerGradient {
            a: Box::new(a),
            b: Box::new(b),
        })
    }

    /// Perlin wrapper with the usual settings (scale 0.02, one octave).
    pub fn perlin(inner: Pattern) -> Self {
        Self::perlin_with(inner, 0.02, 1, 0.2)
    }

    pub fn perlin_with(inner: Pattern, scale: f64, octaves: u32, persistence: f64) -> Self {
        Self::new(PatternKind::Perlin {
            inner: Box::new(inner),
            scale,
            octaves,
            persistence,
        })
    }

    pub fn mapped(texture: UvTexture, mapping: UvMapping) -> Self {
        Self::new(PatternKind::Mapped { texture, mapping })
    }

    pub fn cube_map(
        left: UvTexture,
        front: UvTexture,
        right: UvTexture,
        back: UvTexture,
        up: UvTexture,
        down: UvTexture,
    ) -> Self {
        Self::new(PatternKind::CubeMap {
            left,
            front,
            right,
            back,
            up,
            down,
        })
    }

    pub fn coordinates() -> Self {
        Self::new(PatternKind::Coordinates)
    }

    /// Set the pattern transform (pattern space -> object space).
    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.inverse = transform.inverse();
        self.transform = transform;
        self
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Colour at a point given in the owner's object space.
    pub fn color_at_object(&self, object_point: Tuple) -> Color {
        self.color_at(self.inverse * object_point)
    }

    /// Colour at a point already in this pattern's space.
    pub fn color_at(&self, p: Tuple) -> Color {
        match &self.kind {
            PatternKind::Solid(color) => *color,
            PatternKind::Stripe { a, b, repeat } => {
                let band = p.x.floor().rem_euclid(f64::from((*repeat).max(1)));
                if near(band, 0.0) {
                    a.color_at_object(p)
                } else {
                    b.color_at_object(p)
                }
            }
            PatternKind::Ring { a, b } => {
                let distance = (p.x * p.x + p.z * p.z).sqrt();
                if near(distance.floor().rem_euclid(2.0), 0.0) {
                    a.color_at_object(p)
                } else {
                    b.color_at_object(p)
                }
            }
            PatternKind::Checker { a, b } => {
                let sum = p.x.floor() + p.y.floor() + p.z.floor();
                if near(sum.rem_euclid(2.0), 0.0) {
                    a.color_at_object(p)
                } else {
                    b.color_at_object(p)
                }
            }
            PatternKind::Gradient { a, b } => {
                let fraction = p.x - p.x.floor();
                blend(a.color_at_object(p), b.color_at_object(p), fraction)
            }
            PatternKind::RadialGradient { a, b } => {
                let distance = (p.x * p.x + p.z * p.z).sqrt();
                let fraction = distance - distance.floor();
                blend(a.color_at_object(p), b.color_at_object(p), fraction)
            }
            PatternKind::CornerGradient { a, b } => {
                let fx = p.x - p.x.floor();
                let fz = p.z - p.z.floor();
                let fraction = (fx * fx + fz * fz).sqrt();
                blend(a.color_at_object(p), b.color_at_object(p), fraction)
            }
            PatternKind::Perlin {
                inner,
                scale,
                octaves,
                persistence,
            } => {
                let jitter = |dz: f64| octave_noise(p.x, p.y, p.z + dz, *octaves, *persistence) * scale;
                let perturbed = Tuple::new(
                    p.x + jitter(0.0),
                    p.y + jitter(1.0),
                    p.z + jitter(2.0),
                    p.w,
                );
                inner.color_at_object(perturbed)
            }
            PatternKind::Mapped { texture, mapping } => texture.color_at(mapping.map(p)),
            PatternKind::CubeMap {
                left,
                front,
                right,
                back,
                up,
                down,
            } => {
                let face = CubeFace::of(p);
                let texture = match face {
                    CubeFace::Left => left,
                    CubeFace::Front => front,
                    CubeFace::Right => right,
                    CubeFace::Back => back,
                    CubeFace::Up => up,
                    CubeFace::Down => down,
                };
                texture.color_at(face.uv(p))
            }
            PatternKind::Coordinates => Color::new(p.x, p.y, p.z),
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::solid(Color::ONE)
    }
}

impl From<Color> for Pattern {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

fn blend(a: Color, b: Color, fraction: f64) -> Color {
    a + (b - a) * fraction
}
