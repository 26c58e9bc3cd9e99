use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::error::{RendererError, Result};
use crate::material::Material;
use crate::math::{Point3, Range, Ray, Vec3};
use rand::Rng;
use std::sync::Arc;

/// A finite planar quadrilateral spanned by two edge vectors `u, v` from an
/// anchor point `q`. The plane equation is built once at construction
/// (`normal`, `d`, and the `w` helper vector used for the barycentric-style
/// interior test), so `hit` itself is just a ray/plane intersection plus a
/// two-coordinate bounds check.
pub struct Parallelogram {
    q: Point3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    normal: Vec3,
    d: f64,
    area: f64,
    material: Arc<dyn Material>,
}

impl Parallelogram {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Result<Self> {
        let n = u.cross(v);
        let area = n.length();
        if area < 1e-10 {
            return Err(RendererError::DegenerateGeometry(
                "parallelogram edges are parallel (|u x v| ~ 0)".into(),
            ));
        }
        let normal = n / area;
        let d = normal.dot(q);
        let w = n / n.length_squared();
        Ok(Self { q, u, v, w, normal, d, area, material })
    }

    fn is_interior(alpha: f64, beta: f64) -> bool {
        (0.0..=1.0).contains(&alpha) && (0.0..=1.0).contains(&beta)
    }
}

impl Hittable for Parallelogram {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !range.contains(t) {
            return None;
        }

        let intersection = ray.at(t);
        let planar_hit = intersection - self.q;
        let alpha = self.w.dot(planar_hit.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit));
        if !Self::is_interior(alpha, beta) {
            return None;
        }

        Some(HitRecord::with_face_normal(intersection, ray, self.normal, t, alpha, beta, self.material.clone()))
    }

    fn bounding_box(&self) -> Aabb {
        let diagonal_a = Aabb::new(self.q, self.q + self.u + self.v);
        let diagonal_b = Aabb::new(self.q + self.u, self.q + self.v);
        Aabb::merge(&diagonal_a, &diagonal_b)
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3, time: f64) -> f64 {
        let probe = Ray::with_time(origin, direction, time);
        match self.hit(&probe, Range::new(0.001, f64::INFINITY)) {
            Some(hit) => {
                let distance_squared = hit.t * hit.t * direction.length_squared();
                let cosine = (direction.dot(hit.normal) / direction.length()).abs();
                if cosine < 1e-8 {
                    0.0
                } else {
                    distance_squared / (cosine * self.area)
                }
            }
            None => 0.0,
        }
    }

    fn random_direction(&self, origin: Point3, _time: f64, rng: &mut dyn rand::RngCore) -> Vec3 {
        let point = self.q + self.u * rng.gen::<f64>() + self.v * rng.gen::<f64>();
        point - origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn white_quad() -> Parallelogram {
        Parallelogram::new(
            Point3::new(-1.0, -1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        )
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_edges() {
        let err = Parallelogram::new(
            Point3::zero(),
            Vec3::unit_x(),
            Vec3::unit_x() * 2.0,
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        );
        assert!(matches!(err, Err(RendererError::DegenerateGeometry(_))));
    }

    #[test]
    fn hits_inside_the_quad_and_reports_uv() {
        let quad = white_quad();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = quad.hit(&ray, Range::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.u - 0.5).abs() < 1e-9);
        assert!((hit.v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn misses_outside_the_quad_bounds() {
        let quad = white_quad();
        let ray = Ray::new(Point3::new(10.0, 10.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(quad.hit(&ray, Range::new(0.001, f64::INFINITY)).is_none());
    }
}
