use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::material::Material;
use crate::math::{OrthonormalBase, Point3, Range, Ray, Vec3};
use std::f64::consts::PI;
use std::sync::Arc;

enum Center {
    Static(Point3),
    /// Linearly interpolated between two keyframes, evaluated at the ray's
    /// `time` — this is what produces motion blur.
    Moving { from: Point3, to: Point3 },
}

impl Center {
    fn at(&self, time: f64) -> Point3 {
        match self {
            Center::Static(p) => *p,
            Center::Moving { from, to } => *from + (*to - *from) * time,
        }
    }
}

pub struct Sphere {
    center: Center,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    pub fn stationary(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self { center: Center::Static(center), radius, material }
    }

    pub fn moving(from: Point3, to: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self { center: Center::Moving { from, to }, radius, material }
    }

    /// Spherical UV mapping: `φ = atan2(-z, x) + π`, `θ = acos(-y)`.
    fn uv(outward_normal: Vec3) -> (f64, f64) {
        let phi = (-outward_normal.z).atan2(outward_normal.x) + PI;
        let theta = (-outward_normal.y).acos();
        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let center = self.center.at(ray.time);
        let oc = ray.origin - center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut root = (-half_b - sqrtd) / a;
        if !range.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !range.contains(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - center) / self.radius;
        let (u, v) = Self::uv(outward_normal);
        Some(HitRecord::with_face_normal(point, ray, outward_normal, root, u, v, self.material.clone()))
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vec3::new(self.radius, self.radius, self.radius);
        match &self.center {
            Center::Static(c) => Aabb::new(*c - r, *c + r),
            Center::Moving { from, to } => {
                let box_from = Aabb::new(*from - r, *from + r);
                let box_to = Aabb::new(*to - r, *to + r);
                Aabb::merge(&box_from, &box_to)
            }
        }
    }

    /// Solid-angle density of the visible cap as seen from `origin` at
    /// `time` — the center is evaluated at the *query* time, not hardcoded
    /// to `0`, so a moving sphere used as a light still importance-samples
    /// correctly at every shutter instant.
    fn pdf_value(&self, origin: Point3, direction: Vec3, time: f64) -> f64 {
        let probe = Ray::with_time(origin, direction, time);
        if self.hit(&probe, Range::new(0.001, f64::INFINITY)).is_none() {
            return 0.0;
        }

        let center = self.center.at(time);
        let distance_squared = (center - origin).length_squared();
        let cos_theta_max = (1.0 - self.radius * self.radius / distance_squared).max(0.0).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn random_direction(&self, origin: Point3, time: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        let center = self.center.at(time);
        let direction = center - origin;
        let distance_squared = direction.length_squared();
        let basis = OrthonormalBase::from_w(direction);
        basis.transform(Self::random_to_sphere(self.radius, distance_squared, rng))
    }
}

impl Sphere {
    fn random_to_sphere(radius: f64, distance_squared: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        use rand::Rng;
        let r1: f64 = rng.gen();
        let r2: f64 = rng.gen();
        let z = 1.0 + r2 * ((1.0 - radius * radius / distance_squared).sqrt() - 1.0);
        let phi = 2.0 * PI * r1;
        let sin_theta = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn white_sphere(center: Point3, radius: f64) -> Sphere {
        Sphere::stationary(center, radius, Arc::new(Lambertian::new(crate::math::Color::ones())))
    }

    #[test]
    fn ray_through_center_hits_at_radius() {
        let s = white_sphere(Point3::zero(), 1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = s.hit(&ray, Range::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!(hit.front_face);
    }

    #[test]
    fn ray_missing_the_sphere_reports_none() {
        let s = white_sphere(Point3::zero(), 1.0);
        let ray = Ray::new(Point3::new(10.0, 10.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(s.hit(&ray, Range::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn moving_sphere_bounding_box_covers_both_keyframes() {
        let s = Sphere::moving(
            Point3::zero(),
            Point3::new(2.0, 0.0, 0.0),
            0.5,
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        );
        let bbox = s.bounding_box();
        assert!(bbox.max().x >= 2.5 - 1e-9);
        assert!(bbox.min().x <= -0.5 + 1e-9);
    }

    #[test]
    fn pdf_value_uses_query_time_for_a_moving_center() {
        let s = Sphere::moving(
            Point3::zero(),
            Point3::new(10.0, 0.0, 0.0),
            1.0,
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        );
        let origin = Point3::new(0.0, 0.0, -5.0);
        // At time 0 the sphere is near the origin and visible along +z;
        // at time 1 it has moved far along +x and the same direction misses.
        let dir = Vec3::new(0.0, 0.0, 1.0);
        assert!(s.pdf_value(origin, dir, 0.0) > 0.0);
        assert_eq!(s.pdf_value(origin, dir, 1.0), 0.0);
    }
}
