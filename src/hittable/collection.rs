use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::math::{Point3, Range, Ray, Vec3};
use std::sync::Arc;

/// An unordered group of hittables, bounded by the running union of their
/// individual boxes. Used both as a scene's top-level light list (where
/// `pdf_value`/`random_direction` average/pick uniformly across members) and
/// as a plain aggregate fed into `Bvh::build`.
#[derive(Default)]
pub struct HittableCollection {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableCollection {
    pub fn new() -> Self {
        Self { objects: Vec::new(), bbox: Aabb::empty() }
    }

    pub fn push(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::merge(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableCollection {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let mut closest = range;
        let mut best: Option<HitRecord> = None;
        for object in &self.objects {
            if let Some(hit) = object.hit(ray, closest) {
                closest = Range::new(closest.min, hit.t);
                best = Some(hit);
            }
        }
        best
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Average of each member's density, weighted uniformly — the standard
    /// mixture-over-lights PDF used when this collection stands in as the
    /// importance-sampling light list for MIS.
    fn pdf_value(&self, origin: Point3, direction: Vec3, time: f64) -> f64 {
        if self.objects.is_empty() {
            return 0.0;
        }
        let weight = 1.0 / self.objects.len() as f64;
        self.objects.iter().map(|o| weight * o.pdf_value(origin, direction, time)).sum()
    }

    fn random_direction(&self, origin: Point3, time: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::zero();
        }
        use rand::Rng;
        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random_direction(origin, time, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Sphere;
    use crate::material::Lambertian;
    use crate::math::Color;
    use rand::SeedableRng;

    #[test]
    fn bounding_box_covers_all_members() {
        let mut collection = HittableCollection::new();
        collection.push(Arc::new(Sphere::stationary(Point3::new(-5.0, 0.0, 0.0), 1.0, Arc::new(Lambertian::new(Color::ones())))));
        collection.push(Arc::new(Sphere::stationary(Point3::new(5.0, 0.0, 0.0), 1.0, Arc::new(Lambertian::new(Color::ones())))));
        let bbox = collection.bounding_box();
        assert!(bbox.min().x <= -5.5);
        assert!(bbox.max().x >= 5.5);
    }

    #[test]
    fn hit_keeps_the_nearest_member() {
        let mut collection = HittableCollection::new();
        collection.push(Arc::new(Sphere::stationary(Point3::new(0.0, 0.0, -5.0), 1.0, Arc::new(Lambertian::new(Color::ones())))));
        collection.push(Arc::new(Sphere::stationary(Point3::new(0.0, 0.0, 5.0), 1.0, Arc::new(Lambertian::new(Color::ones())))));
        let ray = Ray::new(Point3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = collection.hit(&ray, Range::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.point.z - 6.0).abs() < 1e-6);
    }

    #[test]
    fn empty_collection_has_zero_pdf_and_no_crash_on_random_direction() {
        let collection = HittableCollection::new();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        assert_eq!(collection.pdf_value(Point3::zero(), Vec3::unit_x(), 0.0), 0.0);
        assert_eq!(collection.random_direction(Point3::zero(), 0.0, &mut rng), Vec3::zero());
    }
}
