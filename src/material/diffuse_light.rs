use super::{Material, ScatterRecord};
use crate::hittable::HitRecord;
use crate::math::{Color, Ray};
use crate::texture::{SolidTexture, Texture};
use std::sync::Arc;

/// An area light: never scatters, only emits, and only from its front face
/// — the back of a one-sided light panel stays black.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(color: Color) -> Self {
        Self { emit: Arc::new(SolidTexture::new(color)) }
    }

    pub fn textured(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray: &Ray, _hit: &HitRecord, _rng: &mut dyn rand::RngCore) -> Option<ScatterRecord> {
        None
    }

    fn emitted(&self, _ray: &Ray, hit: &HitRecord) -> Color {
        if hit.front_face {
            self.emit.value(hit.u, hit.v, hit.point)
        } else {
            Color::zero()
        }
    }
}
