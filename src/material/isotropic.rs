use super::{Material, ScatterRecord};
use crate::hittable::HitRecord;
use crate::math::{Color, Ray};
use crate::pdf::UniformPdf;
use crate::texture::{SolidTexture, Texture};
use std::sync::Arc;

/// Uniform scattering in every direction — the phase function used inside a
/// `ConstantMedium`. Unlike `Lambertian`'s cosine weighting, there is no
/// preferred direction at all.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self { albedo: Arc::new(SolidTexture::new(albedo)) }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, _ray: &Ray, hit: &HitRecord, _rng: &mut dyn rand::RngCore) -> Option<ScatterRecord> {
        Some(ScatterRecord::Scatter {
            attenuation: self.albedo.value(hit.u, hit.v, hit.point),
            pdf: Box::new(UniformPdf),
        })
    }

    fn scatter_pdf(&self, _ray: &Ray, _hit: &HitRecord, _scattered: &Ray) -> f64 {
        1.0 / (4.0 * std::f64::consts::PI)
    }
}
