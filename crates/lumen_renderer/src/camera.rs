//! Pinhole camera for primary ray generation.

use lumen_math::{point, Matrix, Ray};

use crate::{ImageBuffer, World};

/// Camera looking down -z in its own space, with the canvas one unit in
/// front of the eye.
#[derive(Debug, Clone)]
pub struct Camera {
    pub hsize: u32,
    pub vsize: u32,
    /// Horizontal (wide images) or vertical (tall images) field of view, in radians
    pub field_of_view: f64,

    transform: Matrix,
    inverse: Matrix,

    // Derived from size and field of view
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    pub fn new(hsize: u32, vsize: u32, field_of_view: f64, transform: Matrix) -> Self {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;

        // The longer side spans the whole field of view
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            inverse: transform.inverse(),
            transform,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize as f64,
        }
    }

    /// Replace the view transform.
    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.inverse = transform.inverse();
        self.transform = transform;
        self
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// World-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Ray from the eye through the centre of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: u32, py: u32) -> Ray {
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;

        // Camera looks toward -z, so +x is to the left
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let pixel = self.inverse * point(world_x, world_y, -1.0);
        let origin = self.inverse * point(0.0, 0.0, 0.0);
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Render `world` as seen from this camera.
    pub fn render(&self, world: &World) -> ImageBuffer {
        crate::renderer::render(self, world)
    }
}
