//! Image output and the parallel render loop.
//!
//! Each pixel's colour depends only on its camera ray and the read-only
//! world, so rows are handed out to rayon workers as disjoint slices of the
//! output buffer.

use std::time::Instant;

use lumen_core::Color;
use rayon::prelude::*;

use crate::{Camera, World};

/// Convert a linear colour to 8-bit RGBA. Components are clamped to [0, 1];
/// no gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Row-major grid of linear colours produced by a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Render every pixel of `camera`'s view of `world`, rows in parallel.
pub fn render(camera: &Camera, world: &World) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.hsize, camera.vsize);
    if image.pixels.is_empty() {
        return image;
    }

    log::info!(
        "Rendering {}x{} ({} objects, {} lights, depth {})",
        camera.hsize,
        camera.vsize,
        world.objects.len(),
        world.lights.len(),
        world.config.max_depth
    );
    let start = Instant::now();

    let width = camera.hsize as usize;
    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let ray = camera.ray_for_pixel(x as u32, y as u32);
                *pixel = world.trace(&ray);
            }
        });

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
