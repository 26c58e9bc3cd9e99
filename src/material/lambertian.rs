use super::{Material, ScatterRecord};
use crate::hittable::HitRecord;
use crate::math::{Color, Ray};
use crate::pdf::CosinePdf;
use crate::texture::{SolidTexture, Texture};
use std::sync::Arc;

/// The "rough" material: a perfectly diffuse (Lambertian) reflector. The
/// outgoing direction is cosine-weighted around the surface normal, so
/// `scatter_pdf` and the sampling PDF agree exactly — this is what makes
/// plain Lambertian scattering its own ideal importance sampler.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo: Arc::new(SolidTexture::new(albedo)) }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray: &Ray, hit: &HitRecord, _rng: &mut dyn rand::RngCore) -> Option<ScatterRecord> {
        Some(ScatterRecord::Scatter {
            attenuation: self.albedo.value(hit.u, hit.v, hit.point),
            pdf: Box::new(CosinePdf::new(hit.normal)),
        })
    }

    fn scatter_pdf(&self, _ray: &Ray, hit: &HitRecord, scattered: &Ray) -> f64 {
        let cosine = hit.normal.dot(scattered.direction.normalized());
        (cosine / std::f64::consts::PI).max(0.0)
    }
}
