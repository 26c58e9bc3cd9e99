//! Probability density functions over directions on the sphere. Used both
//! to importance-sample material BRDFs and to importance-sample hittable
//! targets (lights), then combined into a mixture for multiple importance
//! sampling in the integrator.

use crate::hittable::Hittable;
use crate::math::{OrthonormalBase, Point3, Vec3};
use std::sync::Arc;

/// `generate()` draws a direction from the density; `value(direction)`
/// evaluates that density at an arbitrary direction. Boxed trait objects
/// rather than an enum since `MixturePdf` needs to hold a heterogeneous list
/// (material PDFs alongside per-target `HittablePdf`s).
pub trait Pdf {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Vec3;
    fn value(&self, direction: Vec3) -> f64;
}

/// Cosine-weighted hemisphere distribution around `normal`: density `cosθ/π`.
/// The optimal importance-sampling strategy for a perfectly diffuse BRDF.
pub struct CosinePdf {
    basis: OrthonormalBase,
}

impl CosinePdf {
    pub fn new(normal: Vec3) -> Self {
        Self { basis: OrthonormalBase::from_w(normal) }
    }
}

impl Pdf for CosinePdf {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Vec3 {
        self.basis.transform(Vec3::random_cosine_direction(rng))
    }

    fn value(&self, direction: Vec3) -> f64 {
        let cosine = direction.normalized().dot(self.basis.w);
        (cosine / std::f64::consts::PI).max(0.0)
    }
}

/// Uniform distribution over the whole sphere: density `1/4π` everywhere.
pub struct UniformPdf;

impl Pdf for UniformPdf {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Vec3 {
        Vec3::random_unit_vector(rng)
    }

    fn value(&self, _direction: Vec3) -> f64 {
        1.0 / (4.0 * std::f64::consts::PI)
    }
}

/// Importance-samples a hittable target directly: `generate` asks the
/// target for a random direction toward itself from `origin`, `value` asks
/// it for the solid-angle density of an arbitrary direction. This is how
/// lights (and any other primitive named as an importance target) pull
/// samples toward themselves instead of relying on the material's own PDF.
pub struct HittablePdf {
    target: Arc<dyn Hittable>,
    origin: Point3,
    time: f64,
}

impl HittablePdf {
    pub fn new(target: Arc<dyn Hittable>, origin: Point3, time: f64) -> Self {
        Self { target, origin, time }
    }
}

impl Pdf for HittablePdf {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Vec3 {
        self.target.random_direction(self.origin, self.time, rng)
    }

    fn value(&self, direction: Vec3) -> f64 {
        self.target.pdf_value(self.origin, direction, self.time)
    }
}

/// An equal-weight mixture of sub-PDFs: picks one uniformly to `generate`
/// from, and averages all of their densities for `value`. With one
/// `HittablePdf` per importance target plus the material's own PDF, this is
/// the mixture the integrator uses for multiple importance sampling.
pub struct MixturePdf {
    components: Vec<Box<dyn Pdf>>,
}

impl MixturePdf {
    pub fn new(components: Vec<Box<dyn Pdf>>) -> Self {
        assert!(!components.is_empty(), "MixturePdf requires at least one component");
        Self { components }
    }
}

impl Pdf for MixturePdf {
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Vec3 {
        use rand::Rng;
        let idx = rng.gen_range(0..self.components.len());
        self.components[idx].generate(rng)
    }

    fn value(&self, direction: Vec3) -> f64 {
        let sum: f64 = self.components.iter().map(|p| p.value(direction)).sum();
        sum / self.components.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_pdf_generates_finite_nonnegative_density() {
        let pdf = CosinePdf::new(Vec3::unit_y());
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let d = pdf.generate(&mut rng);
            let v = pdf.value(d);
            assert!(v.is_finite());
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn uniform_pdf_value_is_constant() {
        let pdf = UniformPdf;
        assert!((pdf.value(Vec3::unit_x()) - pdf.value(Vec3::unit_z())).abs() < 1e-15);
    }

    #[test]
    fn mixture_averages_component_densities() {
        let a = Box::new(UniformPdf);
        let b = Box::new(UniformPdf);
        let mix = MixturePdf::new(vec![a, b]);
        let expected = UniformPdf.value(Vec3::unit_x());
        assert!((mix.value(Vec3::unit_x()) - expected).abs() < 1e-15);
    }
}
