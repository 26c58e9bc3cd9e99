use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::error::Result;
use crate::math::{Matrix4, Range, Ray, Vec3};
use std::sync::Arc;

/// Wraps a child hittable in an affine transform composed `T · R · S`
/// (shift, then rotate, then scale, applied to the child's local space).
/// Rays are carried into the child's local space via the inverse matrix;
/// the resulting hit point and normal are carried back out via the forward
/// matrix and the inverse-transpose respectively.
pub struct Transform {
    child: Arc<dyn Hittable>,
    forward: Matrix4,
    inverse: Matrix4,
    inverse_transpose: Matrix4,
    bbox: Aabb,
}

impl Transform {
    pub fn new(child: Arc<dyn Hittable>, shift: Vec3, rotate_degrees: Vec3, scale: Vec3) -> Result<Self> {
        let t = Matrix4::translation(shift);
        let r = Matrix4::rotation_xyz_degrees(rotate_degrees);
        let s = Matrix4::scaling(scale);
        let forward = t.mul_mat(&r).mul_mat(&s);
        let inverse = forward.inverse()?;
        let inverse_transpose = inverse.transpose();
        let bbox = child.bounding_box().transformed_by(&forward);
        Ok(Self { child, forward, inverse, inverse_transpose, bbox })
    }

    pub fn translate(child: Arc<dyn Hittable>, shift: Vec3) -> Result<Self> {
        Self::new(child, shift, Vec3::zero(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl Hittable for Transform {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let local_origin = self.inverse.transform_point(ray.origin);
        let local_direction = self.inverse.transform_vector(ray.direction);
        let local_ray = Ray::with_time(local_origin, local_direction, ray.time);

        let local_hit = self.child.hit(&local_ray, range)?;

        let world_point = self.forward.transform_point(local_hit.point);
        let world_normal = self.inverse_transpose.transform_vector(local_hit.normal).normalized();

        // Re-derive front/back from the world-space ray against the
        // world-space normal rather than trusting the child's local flag —
        // a reflection (negative-determinant scale) can invert handedness
        // and flip which side is "front" independently of what the child
        // already decided in its own space.
        let front_face = ray.direction.dot(world_normal) < 0.0;
        let normal = if front_face { world_normal } else { -world_normal };

        Some(HitRecord {
            point: world_point,
            normal,
            t: local_hit.t,
            front_face,
            material: local_hit.material,
            u: local_hit.u,
            v: local_hit.v,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: crate::math::Point3, direction: Vec3, time: f64) -> f64 {
        let local_origin = self.inverse.transform_point(origin);
        let local_direction = self.inverse.transform_vector(direction);
        self.child.pdf_value(local_origin, local_direction, time)
    }

    fn random_direction(&self, origin: crate::math::Point3, time: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        let local_origin = self.inverse.transform_point(origin);
        let local_direction = self.child.random_direction(local_origin, time, rng);
        self.forward.transform_vector(local_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Sphere;
    use crate::material::Lambertian;
    use crate::math::{Color, Point3};

    #[test]
    fn translated_sphere_hits_at_the_shifted_location() {
        let sphere: Arc<dyn Hittable> =
            Arc::new(Sphere::stationary(Point3::zero(), 1.0, Arc::new(Lambertian::new(Color::ones()))));
        let moved = Transform::translate(sphere, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let ray = Ray::new(Point3::new(5.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = moved.hit(&ray, Range::new(0.001, f64::INFINITY));
        assert!(hit.is_some());
        let hit = hit.unwrap();
        assert!((hit.point.x - 5.0).abs() < 1e-6);
        assert!((hit.point.z - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_moves_with_the_translation() {
        let sphere: Arc<dyn Hittable> =
            Arc::new(Sphere::stationary(Point3::zero(), 1.0, Arc::new(Lambertian::new(Color::ones()))));
        let moved = Transform::translate(sphere, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let bbox = moved.bounding_box();
        assert!(bbox.min().x > 3.0);
        assert!(bbox.max().x < 7.0);
    }

    #[test]
    fn rotation_reorients_the_surface_normal() {
        let sphere: Arc<dyn Hittable> =
            Arc::new(Sphere::stationary(Point3::new(0.0, 0.0, 2.0), 1.0, Arc::new(Lambertian::new(Color::ones()))));
        let rotated = Transform::new(sphere, Vec3::zero(), Vec3::new(0.0, 90.0, 0.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        // After a 90 degree rotation about Y, the point that was at local
        // (0,0,1) on the sphere surface (nearest the camera along -z) is now
        // reachable along a ray fired down world +x instead.
        let ray = Ray::new(Point3::new(-10.0, 0.0, 2.0), Vec3::unit_x());
        assert!(rotated.hit(&ray, Range::new(0.001, f64::INFINITY)).is_some());
    }
}
