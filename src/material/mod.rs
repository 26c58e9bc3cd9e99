//! Materials decide how a surface scatters (or emits) light. Each one is a
//! small, closed capability rather than a node in a deep class hierarchy:
//! the integrator's only "is this a light" check is `emitted()`, which
//! defaults to black for every material that isn't one.

mod dielectric;
mod diffuse_light;
mod isotropic;
mod lambertian;
mod metal;

pub use dielectric::Dielectric;
pub use diffuse_light::DiffuseLight;
pub use isotropic::Isotropic;
pub use lambertian::Lambertian;
pub use metal::Metal;

use crate::hittable::HitRecord;
use crate::math::{Color, Ray};
use crate::pdf::Pdf;

/// The result of a material's `scatter`: either a deterministic specular
/// bounce that bypasses PDF-based integration (`Specular`), or an
/// attenuation paired with an importance PDF over the outgoing hemisphere
/// (`Scatter`). Exactly one branch is ever active, which is why this is an
/// enum rather than a struct with a boolean flag and two optional fields.
pub enum ScatterRecord {
    Specular { attenuation: Color, ray: Ray },
    Scatter { attenuation: Color, pdf: Box<dyn Pdf> },
}

pub trait Material: Send + Sync {
    /// Attempts to scatter `ray` at `hit`. Returns `None` when the material
    /// absorbs the ray outright (e.g. a metal whose fuzz perturbed the
    /// reflection below the surface).
    fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<ScatterRecord>;

    /// The density of scattering toward `scattered` given `ray` hit at
    /// `hit`, used by the integrator to weight the mixture-PDF sample
    /// against this material's own distribution. Materials whose `scatter`
    /// only ever returns `Specular` never have this called.
    fn scatter_pdf(&self, _ray: &Ray, _hit: &HitRecord, _scattered: &Ray) -> f64 {
        0.0
    }

    /// Emitted radiance at this hit, or black for every non-emissive
    /// material (the default). Checked before `scatter` is attempted: an
    /// emitting hit never bounces further.
    fn emitted(&self, _ray: &Ray, _hit: &HitRecord) -> Color {
        Color::zero()
    }
}
