use super::{Material, ScatterRecord};
use crate::hittable::HitRecord;
use crate::math::{Color, Ray, Vec3};

/// A specular reflector. Reflection is deterministic, so this is a
/// `Specular` (skip-PDF) scatter: there is no hemisphere to importance
/// sample. `fuzz` (clamped to `[0,1]`) perturbs the reflected direction by a
/// vector of exact unit length scaled by `fuzz`, not a point inside the
/// unit ball, so a fuzz of `1.0` still produces directions on a well-defined
/// cone around the ideal reflection rather than one skewed toward the
/// normal.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self { albedo, fuzz: fuzz.clamp(0.0, 1.0) }
    }
}

impl Material for Metal {
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<ScatterRecord> {
        let reflected = ray.direction.normalized().reflect(hit.normal);
        let fuzzed = reflected + Vec3::random_unit_vector(rng) * self.fuzz;
        if fuzzed.dot(hit.normal) <= 0.0 {
            return None;
        }
        Some(ScatterRecord::Specular {
            attenuation: self.albedo,
            ray: Ray::with_time(hit.point, fuzzed, ray.time),
        })
    }
}
