//! UV mapping: projecting 3-D surface points onto a 2-D texture space.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use lumen_math::{near, Tuple};

use crate::{Color, Texture};

/// Texture-space coordinate; both axes nominally in [0, 1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// Projection from a pattern-space point to UV.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UvMapping {
    Planar,
    Spherical,
    Cylindrical,
}

impl UvMapping {
    pub fn map(&self, p: Tuple) -> UvPoint {
        match self {
            UvMapping::Planar => planar_map(p),
            UvMapping::Spherical => spherical_map(p),
            UvMapping::Cylindrical => cylindrical_map(p),
        }
    }
}

pub fn planar_map(p: Tuple) -> UvPoint {
    UvPoint::new(p.x.rem_euclid(1.0), p.z.rem_euclid(1.0))
}

/// Azimuth as u, polar angle as v; the north pole maps to v = 1.
pub fn spherical_map(p: Tuple) -> UvPoint {
    let theta = p.x.atan2(p.z);
    let radius = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
    let phi = (p.y / radius).acos();
    let raw_u = theta / (2.0 * PI);
    UvPoint::new(1.0 - (raw_u + 0.5), 1.0 - phi / PI)
}

pub fn cylindrical_map(p: Tuple) -> UvPoint {
    let theta = p.x.atan2(p.z);
    let raw_u = theta / (2.0 * PI);
    UvPoint::new(1.0 - (raw_u + 0.5), p.y.rem_euclid(1.0))
}

/// Face of the unit cube a point projects onto.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CubeFace {
    Left,
    Right,
    Front,
    Back,
    Up,
    Down,
}

impl CubeFace {
    /// Face selected by the dominant coordinate of `p`.
    pub fn of(p: Tuple) -> CubeFace {
        let abs_x = p.x.abs();
        let abs_y = p.y.abs();
        let abs_z = p.z.abs();
        let coord = abs_x.max(abs_y).max(abs_z);

        if coord == p.x {
            CubeFace::Right
        } else if coord == -p.x {
            CubeFace::Left
        } else if coord == p.y {
            CubeFace::Up
        } else if coord == -p.y {
            CubeFace::Down
        } else if coord == p.z {
            CubeFace::Front
        } else {
            CubeFace::Back
        }
    }

    /// UV of `p` on this face.
    pub fn uv(&self, p: Tuple) -> UvPoint {
        let wrap = |a: f64| a.rem_euclid(2.0) / 2.0;
        match self {
            CubeFace::Front => UvPoint::new(wrap(p.x + 1.0), wrap(p.y + 1.0)),
            CubeFace::Back => UvPoint::new(wrap(1.0 - p.x), wrap(p.y + 1.0)),
            CubeFace::Left => UvPoint::new(wrap(p.z + 1.0), wrap(p.y + 1.0)),
            CubeFace::Right => UvPoint::new(wrap(1.0 - p.z), wrap(p.y + 1.0)),
            CubeFace::Up => UvPoint::new(wrap(p.x + 1.0), wrap(1.0 - p.z)),
            CubeFace::Down => UvPoint::new(wrap(p.x + 1.0), wrap(p.z + 1.0)),
        }
    }
}

/// A 2-D colour function sampled at UV coordinates.
#[derive(Clone)]
pub enum UvTexture {
    /// `width` x `height` squares alternating between `a` and `b`.
    Checker {
        width: f64,
        height: f64,
        a: Color,
        b: Color,
    },
    /// Solid `main` with distinct colours in each corner, for checking
    /// face orientation on cube maps.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
    Image(Arc<Texture>),
    Function(Arc<dyn Fn(UvPoint) -> Color + Send + Sync>),
}

impl UvTexture {
    pub fn checker(width: f64, height: f64, a: Color, b: Color) -> Self {
        UvTexture::Checker { width, height, a, b }
    }

    pub fn image(texture: Texture) -> Self {
        UvTexture::Image(Arc::new(texture))
    }

    pub fn function(f: impl Fn(UvPoint) -> Color + Send + Sync + 'static) -> Self {
        UvTexture::Function(Arc::new(f))
    }

    pub fn color_at(&self, uv: UvPoint) -> Color {
        match self {
            UvTexture::Checker { width, height, a, b } => {
                let u2 = (uv.u * width).floor();
                let v2 = (uv.v * height).floor();
                if near((u2 + v2).rem_euclid(2.0), 0.0) {
                    *a
                } else {
                    *b
                }
            }
            UvTexture::AlignCheck {
                main,
                ul,
                ur,
                bl,
                br,
            } => {
                if uv.v > 0.8 {
                    if uv.u < 0.2 {
                        return *ul;
                    }
                    if uv.u > 0.8 {
                        return *ur;
                    }
                } else if uv.v < 0.2 {
                    if uv.u < 0.2 {
                        return *bl;
                    }
                    if uv.u > 0.8 {
                        return *br;
                    }
                }
                *main
            }
            UvTexture::Image(texture) => texture.sample(uv.u, uv.v),
            UvTexture::Function(f) => f(uv),
        }
    }
}

impl fmt::Debug for UvTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvTexture::Checker { width, height, a, b } => f
                .debug_struct("Checker")
                .field("width", width)
                .field("height", height)
                .field("a", a)
                .field("b", b)
                .finish(),
            UvTexture::AlignCheck { main, .. } => {
                f.debug_struct("AlignCheck").field("main", main).finish_non_exhaustive()
            }
            UvTexture::Image(texture) => f
                .debug_struct("Image")
                .field("width", &texture.width)
                .field("height", &texture.height)
                .finish(),
            UvTexture::Function(_) => f.write_str("Function(..)"),
        }
    }
}
