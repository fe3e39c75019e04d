//! Point and area lights, and the Phong lighting equation.
//!
//! Every light is reduced to a list of sample points. A point light has a
//! single sample; an area light has one (jittered) sample per cell of its
//! parallelogram. Soft shadows come from averaging visibility across samples.

use lumen_math::Tuple;
use rand::Rng;

use crate::{Color, Material};

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Representative position, used for hard shadow tests
    pub position: Tuple,
    pub color: Color,
    /// Points the surface is lit from; an empty list gives ambient light only
    pub samples: Vec<Tuple>,
}

impl Light {
    pub fn point(position: Tuple, color: Color) -> Self {
        Self {
            position,
            color,
            samples: vec![position],
        }
    }

    /// Fraction of samples visible from `point`, in [0, 1].
    ///
    /// `is_occluded(sample, point)` reports whether something blocks the
    /// segment between the two.
    pub fn intensity_at<F>(&self, point: Tuple, is_occluded: F) -> f64
    where
        F: Fn(Tuple, Tuple) -> bool,
    {
        if self.samples.is_empty() {
            return 0.0;
        }
        let visible = self
            .samples
            .iter()
            .filter(|&&sample| !is_occluded(sample, point))
            .count();
        visible as f64 / self.samples.len() as f64
    }

    /// Phong shading of `point` by this light, averaged over all samples.
    ///
    /// `object_point` is `point` in the shape's object space and is only used
    /// to sample the material pattern. Occluded samples and samples behind
    /// the surface contribute the ambient term alone.
    pub fn lighting<F>(
        &self,
        material: &Material,
        object_point: Tuple,
        point: Tuple,
        eyev: Tuple,
        normalv: Tuple,
        is_occluded: F,
    ) -> Color
    where
        F: Fn(Tuple, Tuple) -> bool,
    {
        let effective_color = material.pattern.color_at_object(object_point) * self.color;
        let ambient = effective_color * material.ambient;
        if self.samples.is_empty() {
            return ambient;
        }

        let mut total = Color::ZERO;
        for &sample in &self.samples {
            total += ambient;

            let lightv = (sample - point).normalize();
            let light_dot_normal = lightv.dot(&normalv);
            if light_dot_normal < 0.0 || is_occluded(sample, point) {
                continue;
            }

            total += effective_color * material.diffuse * light_dot_normal;

            let reflectv = (-lightv).reflect(&normalv);
            let reflect_dot_eye = reflectv.dot(&eyev);
            if reflect_dot_eye > 0.0 {
                let factor = reflect_dot_eye.powf(material.shininess);
                total += self.color * material.specular * factor;
            }
        }

        total / self.samples.len() as f64
    }
}

/// Rectangular light defined by a corner and two edge vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLight {
    pub corner: Tuple,
    /// Edge of a single cell along the first axis
    pub u_vec: Tuple,
    pub u_steps: u32,
    /// Edge of a single cell along the second axis
    pub v_vec: Tuple,
    pub v_steps: u32,
    pub color: Color,
}

impl AreaLight {
    /// `full_u` and `full_v` span the whole light; they are divided into
    /// `u_steps` x `v_steps` cells.
    pub fn new(
        corner: Tuple,
        full_u: Tuple,
        u_steps: u32,
        full_v: Tuple,
        v_steps: u32,
        color: Color,
    ) -> Self {
        let u_steps = u_steps.max(1);
        let v_steps = v_steps.max(1);
        Self {
            corner,
            u_vec: full_u / u_steps as f64,
            u_steps,
            v_vec: full_v / v_steps as f64,
            v_steps,
            color,
        }
    }

    pub fn sample_count(&self) -> usize {
        (self.u_steps * self.v_steps) as usize
    }

    /// Centre of the parallelogram.
    pub fn position(&self) -> Tuple {
        let u = self.u_vec * self.u_steps as f64;
        let v = self.v_vec * self.v_steps as f64;
        self.corner + (u + v) / 2.0
    }

    /// Point inside cell (`u`, `v`), offset by `jitter` on each axis.
    pub fn cell_point<J>(&self, u: u32, v: u32, mut jitter: J) -> Tuple
    where
        J: FnMut() -> f64,
    {
        self.corner + self.u_vec * (u as f64 + jitter()) + self.v_vec * (v as f64 + jitter())
    }

    /// Sample every cell once with an explicit jitter source.
    pub fn light_with<J>(&self, mut jitter: J) -> Light
    where
        J: FnMut() -> f64,
    {
        let mut samples = Vec::with_capacity(self.sample_count());
        for u in 0..self.u_steps {
            for v in 0..self.v_steps {
                samples.push(self.cell_point(u, v, &mut jitter));
            }
        }
        Light {
            position: self.position(),
            color: self.color,
            samples,
        }
    }

    /// Sample every cell once with offsets drawn uniformly from [0, 1).
    pub fn light<R: Rng>(&self, rng: &mut R) -> Light {
        self.light_with(|| rng.gen::<f64>())
    }

    /// Sample at cell centres. Deterministic.
    pub fn centered_light(&self) -> Light {
        self.light_with(|| 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{point, vector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn never(_: Tuple, _: Tuple) -> bool {
        false
    }

    fn always(_: Tuple, _: Tuple) -> bool {
        true
    }

    fn near_color(a: Color, b: Color) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn test_point_light_has_single_sample() {
        let light = Light::point(point(0.0, 0.0, 0.0), Color::ONE);
        assert_eq!(light.position, point(0.0, 0.0, 0.0));
        assert_eq!(light.color, Color::ONE);
        assert_eq!(light.samples, vec![point(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_eye_between_light_and_surface() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, -10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let result = light.lighting(&m, p, p, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), never);
        assert!(near_color(result, Color::splat(1.9)));
    }

    #[test]
    fn test_eye_offset_45_degrees() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, -10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let half = 2f64.sqrt() / 2.0;
        let result = light.lighting(&m, p, p, vector(0.0, half, -half), vector(0.0, 0.0, -1.0), never);
        assert!(near_color(result, Color::ONE));
    }

    #[test]
    fn test_light_offset_45_degrees() {
        let m = Material::default();
        let light = Light::point(point(0.0, 10.0, -10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let result = light.lighting(&m, p, p, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), never);
        assert!(near_color(result, Color::splat(0.7364)));
    }

    #[test]
    fn test_eye_in_reflection_path() {
        let m = Material::default();
        let light = Light::point(point(0.0, 10.0, -10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let half = 2f64.sqrt() / 2.0;
        let result = light.lighting(&m, p, p, vector(0.0, -half, -half), vector(0.0, 0.0, -1.0), never);
        assert!(near_color(result, Color::splat(1.6364)));
    }

    #[test]
    fn test_light_behind_surface() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, 10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let result = light.lighting(&m, p, p, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), never);
        assert!(near_color(result, Color::splat(0.1)));
    }

    #[test]
    fn test_surface_in_shadow() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, -10.0), Color::ONE);
        let p = point(0.0, 0.0, 0.0);
        let result = light.lighting(&m, p, p, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), always);
        assert!(near_color(result, Color::splat(0.1)));
    }

    #[test]
    fn test_lighting_uses_pattern_in_object_space() {
        use crate::Pattern;
        let m = Material {
            pattern: Pattern::stripe(Pattern::solid(Color::ONE), Pattern::solid(Color::ZERO)),
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            ..Default::default()
        };
        let light = Light::point(point(0.0, 0.0, -10.0), Color::ONE);
        let eyev = vector(0.0, 0.0, -1.0);
        let normalv = vector(0.0, 0.0, -1.0);
        // World point is irrelevant to the pattern lookup
        let world = point(0.0, 0.0, 0.0);
        let c1 = light.lighting(&m, point(0.9, 0.0, 0.0), world, eyev, normalv, never);
        let c2 = light.lighting(&m, point(1.1, 0.0, 0.0), world, eyev, normalv, never);
        assert_eq!(c1, Color::ONE);
        assert_eq!(c2, Color::ZERO);
    }

    #[test]
    fn test_area_light_construction() {
        let corner = point(0.0, 0.0, 0.0);
        let area = AreaLight::new(corner, vector(2.0, 0.0, 0.0), 4, vector(0.0, 0.0, 1.0), 2, Color::ONE);
        assert_eq!(area.u_vec, vector(0.5, 0.0, 0.0));
        assert_eq!(area.v_vec, vector(0.0, 0.0, 0.5));
        assert_eq!(area.sample_count(), 8);
        assert_eq!(area.position(), point(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_area_light_cell_points() {
        let area = AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 0.0, 1.0),
            2,
            Color::ONE,
        );
        let cases = [
            (0, 0, point(0.25, 0.0, 0.25)),
            (1, 0, point(0.75, 0.0, 0.25)),
            (0, 1, point(0.25, 0.0, 0.75)),
            (2, 0, point(1.25, 0.0, 0.25)),
            (3, 1, point(1.75, 0.0, 0.75)),
        ];
        for (u, v, expected) in cases {
            assert_eq!(area.cell_point(u, v, || 0.5), expected);
        }
    }

    #[test]
    fn test_area_light_jittered_cell_points() {
        let area = AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 0.0, 1.0),
            2,
            Color::ONE,
        );
        let sequence = [0.3, 0.7];
        let cases = [
            (0, 0, point(0.15, 0.0, 0.35)),
            (1, 0, point(0.65, 0.0, 0.35)),
            (0, 1, point(0.15, 0.0, 0.85)),
            (2, 0, point(1.15, 0.0, 0.35)),
            (3, 1, point(1.65, 0.0, 0.85)),
        ];
        for (u, v, expected) in cases {
            let mut i = 0;
            let jitter = || {
                let j = sequence[i % sequence.len()];
                i += 1;
                j
            };
            assert_eq!(area.cell_point(u, v, jitter), expected);
        }
    }

    #[test]
    fn test_area_light_sample_order() {
        let area = AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::ONE,
        );
        let light = area.centered_light();
        assert_eq!(
            light.samples,
            vec![
                point(0.25, 0.25, 0.0),
                point(0.25, 0.75, 0.0),
                point(0.75, 0.25, 0.0),
                point(0.75, 0.75, 0.0),
            ]
        );
        assert_eq!(light.position, point(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_random_jitter_stays_in_cells() {
        let area = AreaLight::new(
            point(-1.0, 2.0, 0.0),
            vector(2.0, 0.0, 0.0),
            3,
            vector(0.0, 0.0, 2.0),
            3,
            Color::ONE,
        );
        let mut rng = StdRng::seed_from_u64(42);
        let light = area.light(&mut rng);
        assert_eq!(light.samples.len(), 9);
        for s in &light.samples {
            assert!(s.x >= -1.0 && s.x < 1.0);
            assert!(s.z >= 0.0 && s.z < 2.0);
            assert_eq!(s.y, 2.0);
        }
    }

    #[test]
    fn test_lighting_samples_area_light() {
        let area = AreaLight::new(
            point(-0.5, -0.5, -5.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::ONE,
        );
        let light = area.centered_light();
        let m = Material {
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.0,
            ..Default::default()
        };
        let eye = point(0.0, 0.0, -5.0);
        let cases = [
            (point(0.0, 0.0, -1.0), 0.9965),
            (point(0.0, 0.7071, -0.7071), 0.62318),
        ];
        for (p, expected) in cases {
            let eyev = (eye - p).normalize();
            let normalv = vector(p.x, p.y, p.z);
            let result = light.lighting(&m, p, p, eyev, normalv, never);
            assert!(near_color(result, Color::splat(expected)), "{:?}", result);
        }
    }

    #[test]
    fn test_intensity_bounds() {
        let area = AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::ONE,
        );
        let light = area.centered_light();
        let p = point(0.0, 0.0, -3.0);
        assert_eq!(light.intensity_at(p, never), 1.0);
        assert_eq!(light.intensity_at(p, always), 0.0);

        // Block only the samples with x < 0.5
        let half = light.intensity_at(p, |sample, _| sample.x < 0.5);
        assert_eq!(half, 0.5);
    }

    #[test]
    fn test_light_without_samples_gives_ambient_only() {
        let light = Light {
            position: point(0.0, 0.0, -10.0),
            color: Color::ONE,
            samples: Vec::new(),
        };
        let p = point(0.0, 0.0, 0.0);
        assert_eq!(light.intensity_at(p, never), 0.0);

        let m = Material::default();
        let result = light.lighting(&m, p, p, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), never);
        assert!(!result.is_nan());
        assert!(near_color(result, Color::splat(0.1)));
    }
}
