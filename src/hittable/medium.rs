use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::material::{Isotropic, Material};
use crate::math::{Range, Ray, Vec3};
use rand::Rng;
use std::sync::Arc;

/// A constant-density participating medium (fog, smoke) occupying the
/// interior of a convex `boundary` hittable. Intersection doesn't find a
/// surface at all in the usual sense — it finds where the ray enters and
/// exits the boundary, then samples a free-flight distance along the way via
/// Beer-Lambert: `distance = -ln(rand) / density`. If that distance lands
/// inside the boundary segment, the ray "hit" the fog at that point with an
/// arbitrary normal (the `Isotropic` phase function doesn't care).
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    phase_function: Arc<dyn Material>,
    neg_inv_density: f64,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, color: crate::math::Color) -> Self {
        Self {
            boundary,
            phase_function: Arc::new(Isotropic::new(color)),
            neg_inv_density: -1.0 / density,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let mut rng = rand::thread_rng();

        let mut hit1 = self.boundary.hit(ray, Range::UNIVERSE)?;
        let mut hit2 = self.boundary.hit(ray, Range::new(hit1.t + 1e-3, f64::INFINITY))?;

        if hit1.t < range.min {
            hit1.t = range.min;
        }
        if hit2.t > range.max {
            hit2.t = range.max;
        }
        if hit1.t >= hit2.t {
            return None;
        }
        if hit1.t < 0.0 {
            hit1.t = 0.0;
        }

        let ray_length = ray.direction.length();
        let distance_inside_boundary = (hit2.t - hit1.t) * ray_length;
        let hit_distance = self.neg_inv_density * rng.gen::<f64>().ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = hit1.t + hit_distance / ray_length;
        let point = ray.at(t);

        Some(HitRecord {
            point,
            normal: Vec3::unit_x(),
            t,
            front_face: true,
            material: self.phase_function.clone(),
            u: 0.0,
            v: 0.0,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Sphere;
    use crate::material::Lambertian;
    use crate::math::{Color, Point3};

    #[test]
    fn dense_fog_almost_always_scatters_inside_the_boundary() {
        let boundary: Arc<dyn Hittable> =
            Arc::new(Sphere::stationary(Point3::zero(), 5.0, Arc::new(Lambertian::new(Color::ones()))));
        let fog = ConstantMedium::new(boundary, 10.0, Color::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Point3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = fog.hit(&ray, Range::new(0.001, f64::INFINITY));
        assert!(hit.is_some());
        let hit = hit.unwrap();
        assert!(hit.t > 5.0 && hit.t < 15.0);
    }

    #[test]
    fn ray_missing_the_boundary_never_scatters() {
        let boundary: Arc<dyn Hittable> =
            Arc::new(Sphere::stationary(Point3::zero(), 1.0, Arc::new(Lambertian::new(Color::ones()))));
        let fog = ConstantMedium::new(boundary, 1.0, Color::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Point3::new(10.0, 10.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(fog.hit(&ray, Range::new(0.001, f64::INFINITY)).is_none());
    }
}
