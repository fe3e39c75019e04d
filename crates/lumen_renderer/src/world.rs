//! Scene container and the recursive Whitted shading loop.
//!
//! A ray is resolved by finding its visible hit, lighting it from every
//! light, and then following mirror reflection and refraction until the
//! remaining depth runs out.

use lumen_core::{Color, Light};
use lumen_math::{Ray, Tuple};

use crate::{hit_index, Computations, Intersection, RenderConfig, Shape};

/// Shapes and lights to render, plus the settings rays are traced with.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<Light>,
    pub config: RenderConfig,
}

impl World {
    pub fn new(objects: Vec<Shape>, lights: Vec<Light>) -> Self {
        log::debug!(
            "World created: {} objects ({} leaf shapes), {} lights",
            objects.len(),
            objects.iter().map(Shape::leaf_count).sum::<usize>(),
            lights.len()
        );
        Self {
            objects,
            lights,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Every intersection of `ray` with the world, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        let mut xs: Vec<Intersection<'_>> = self.objects.iter().flat_map(|o| o.intersect(ray)).collect();
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        xs
    }

    /// True if a shadow-casting surface lies between `point` and `light_position`.
    pub fn is_occluded(&self, light_position: Tuple, point: Tuple) -> bool {
        let v = light_position - point;
        let distance = v.magnitude();
        let ray = Ray::new(point, v.normalize());

        self.intersect(&ray)
            .iter()
            .any(|i| i.t >= 0.0 && i.t < distance && i.shape.material.shadow)
    }

    /// Hard shadow test against the light's representative position.
    pub fn is_shadowed(&self, light: &Light, point: Tuple) -> bool {
        self.is_occluded(light.position, point)
    }

    /// Colour seen along `ray` with `remaining` bounces left.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match hit_index(&xs) {
            Some(index) => {
                let comps = Computations::prepare(&xs, index, ray);
                self.shade_hit(&comps, remaining)
            }
            None => self.config.background,
        }
    }

    /// Colour seen along a camera ray.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.color_at(ray, self.config.max_depth)
    }

    /// Direct lighting from every light plus reflected and refracted light.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let material = &comps.shape.material;
        let object_point = comps.shape.world_to_object(comps.over_point);

        let surface = self.lights.iter().fold(Color::ZERO, |acc, light| {
            acc + light.lighting(
                material,
                object_point,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                |sample, point| self.is_occluded(sample, point),
            )
        });

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if material.is_reflective() && material.is_transparent() {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = comps.shape.material.reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::ZERO;
        }

        let ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&ray, remaining - 1) * reflective
    }

    /// Light transmitted through the surface. Black under total internal
    /// reflection.
    pub fn refracted_color(&self, comps: &Computations, remaining: u32) -> Color {
        let transparency = comps.shape.material.transparency;
        if remaining == 0 || transparency == 0.0 {
            return Color::ZERO;
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Color::ZERO;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let ray = Ray::new(comps.under_point, direction);
        self.color_at(&ray, remaining - 1) * transparency
    }
}
