//! Image textures for UV-mapped patterns.
//!
//! Textures are decoded with the `image` crate and kept as floating point
//! colours. Sampling is nearest-pixel, matching the blocky look of the
//! procedural UV checkers.

use std::path::Path;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {width}x{height} needs {expected} pixels, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Texture has zero size")]
    Empty,
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded image, row-major with the first row at the top.
#[derive(Clone, Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// Create a texture from in-memory pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load a texture from disk. Channel values are scaled to 0..1 without
    /// any colour-space conversion.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels: Vec<Color> = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    p[0] as f64 / 255.0,
                    p[1] as f64 / 255.0,
                    p[2] as f64 / 255.0,
                )
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Self::from_pixels(width, height, pixels)
    }

    /// Pixel at integer coordinates, (0, 0) top-left.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Sample at UV coordinates with (0, 0) at the bottom-left.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let v = 1.0 - v;
        let x = (u * (self.width - 1) as f64).round().max(0.0) as u32;
        let y = (v * (self.height - 1) as f64).round().max(0.0) as u32;
        self.pixel(x, y)
    }
}
