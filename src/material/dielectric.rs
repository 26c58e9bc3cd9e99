use super::{Material, ScatterRecord};
use crate::hittable::HitRecord;
use crate::math::{Color, Ray};
use rand::Rng;

/// A refractive dielectric (glass, water, ...). Deterministic given the
/// random reflect-vs-refract coin flip, so this is a `Specular` scatter —
/// there is no PDF for a single exact direction.
pub struct Dielectric {
    refractive_index: f64,
}

impl Dielectric {
    pub const fn new(refractive_index: f64) -> Self {
        Self { refractive_index }
    }

    /// Schlick's approximation to the Fresnel reflectance at normal-to-grazing
    /// incidence: `r0 + (1-r0)(1-cosθ)^5`.
    fn schlick_reflectance(cosine: f64, refractive_index: f64) -> f64 {
        let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<ScatterRecord> {
        let eta_ratio = if hit.front_face { 1.0 / self.refractive_index } else { self.refractive_index };

        let unit_direction = ray.direction.normalized();
        let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = eta_ratio * sin_theta > 1.0;
        let direction = if cannot_refract || Self::schlick_reflectance(cos_theta, eta_ratio) > rng.gen::<f64>() {
            unit_direction.reflect(hit.normal)
        } else {
            unit_direction
                .refract(hit.normal, eta_ratio)
                .unwrap_or_else(|| unit_direction.reflect(hit.normal))
        };

        Some(ScatterRecord::Specular {
            attenuation: Color::ones(),
            ray: Ray::with_time(hit.point, direction, ray.time),
        })
    }
}
