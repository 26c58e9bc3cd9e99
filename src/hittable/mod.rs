//! The hittable abstraction: every piece of scene geometry — primitives,
//! wrappers (transform, constant medium), and aggregates (collection, BVH)
//! — implements this same small trait.

mod collection;
mod medium;
mod parallelogram;
mod polyhedron;
mod sphere;
mod transform;
mod triangle;

pub use collection::HittableCollection;
pub use medium::ConstantMedium;
pub use parallelogram::Parallelogram;
pub use polyhedron::Polyhedron;
pub use sphere::Sphere;
pub use transform::Transform;
pub use triangle::Triangle;

use crate::material::Material;
use crate::math::{Point3, Range, Ray, Vec3};
use std::sync::Arc;

/// The result of a successful intersection: where it happened, the
/// (always-against-the-incoming-ray) surface normal, the ray parameter,
/// whether the ray hit the front or back face, the material at that point,
/// and its `(u, v)` texture coordinates.
pub struct HitRecord {
    pub point: Point3,
    pub normal: Vec3,
    pub t: f64,
    pub front_face: bool,
    pub material: Arc<dyn Material>,
    pub u: f64,
    pub v: f64,
}

impl HitRecord {
    /// Derives `front_face` from the incoming ray direction and the
    /// *outward*-facing geometric normal, storing the normal the convention
    /// requires: always pointing back against the ray.
    pub fn with_face_normal(
        point: Point3,
        ray: &Ray,
        outward_normal: Vec3,
        t: f64,
        u: f64,
        v: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face { outward_normal } else { -outward_normal };
        Self { point, normal, t, front_face, material, u, v }
    }
}

/// Every hittable — primitive, wrapper, or aggregate — implements this.
///
/// `pdf_value`/`random_direction` are only meaningful for hittables used as
/// importance-sampling targets (lights, mostly); the defaults match what a
/// non-target hittable would never be asked to compute correctly anyway.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord>;

    fn bounding_box(&self) -> crate::aabb::Aabb;

    fn pdf_value(&self, _origin: Point3, _direction: Vec3, _time: f64) -> f64 {
        1.0
    }

    fn random_direction(&self, _origin: Point3, _time: f64, _rng: &mut dyn rand::RngCore) -> Vec3 {
        Vec3::zero()
    }
}

impl Hittable for Arc<dyn Hittable> {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        self.as_ref().hit(ray, range)
    }

    fn bounding_box(&self) -> crate::aabb::Aabb {
        self.as_ref().bounding_box()
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3, time: f64) -> f64 {
        self.as_ref().pdf_value(origin, direction, time)
    }

    fn random_direction(&self, origin: Point3, time: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        self.as_ref().random_direction(origin, time, rng)
    }
}
