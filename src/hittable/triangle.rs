use super::{HitRecord, Hittable};
use crate::aabb::Aabb;
use crate::error::{RendererError, Result};
use crate::material::Material;
use crate::math::{Point3, Range, Ray, Vec3};
use std::sync::Arc;

enum Shading {
    Flat(Vec3),
    Smooth { n0: Vec3, n1: Vec3, n2: Vec3 },
}

/// A single triangle, intersected with the Moller-Trumbore algorithm. Either
/// flat-shaded (one normal for the whole face) or smooth-shaded (per-vertex
/// normals interpolated by the hit's barycentric coordinates).
pub struct Triangle {
    v0: Point3,
    edge1: Vec3,
    edge2: Vec3,
    shading: Shading,
    material: Arc<dyn Material>,
}

const EPSILON: f64 = 1e-10;

impl Triangle {
    pub fn flat(v0: Point3, v1: Point3, v2: Point3, material: Arc<dyn Material>) -> Result<Self> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let normal = edge1.cross(edge2);
        if normal.length_squared() < EPSILON {
            return Err(RendererError::DegenerateGeometry("triangle vertices are collinear".into()));
        }
        Ok(Self { v0, edge1, edge2, shading: Shading::Flat(normal.normalized()), material })
    }

    pub fn smooth(
        v0: Point3,
        v1: Point3,
        v2: Point3,
        n0: Vec3,
        n1: Vec3,
        n2: Vec3,
        material: Arc<dyn Material>,
    ) -> Result<Self> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        if edge1.cross(edge2).length_squared() < EPSILON {
            return Err(RendererError::DegenerateGeometry("triangle vertices are collinear".into()));
        }
        Ok(Self {
            v0,
            edge1,
            edge2,
            shading: Shading::Smooth { n0: n0.normalized(), n1: n1.normalized(), n2: n2.normalized() },
            material,
        })
    }

    fn vertices(&self) -> (Point3, Point3, Point3) {
        (self.v0, self.v0 + self.edge1, self.v0 + self.edge2)
    }

    fn interpolated_normal(&self, beta: f64, gamma: f64) -> Vec3 {
        match self.shading {
            Shading::Flat(n) => n,
            Shading::Smooth { n0, n1, n2 } => {
                let alpha = 1.0 - beta - gamma;
                (n0 * alpha + n1 * beta + n2 * gamma).normalized()
            }
        }
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let pvec = ray.direction.cross(self.edge2);
        let det = self.edge1.dot(pvec);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - self.v0;
        let beta = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&beta) {
            return None;
        }

        let qvec = tvec.cross(self.edge1);
        let gamma = ray.direction.dot(qvec) * inv_det;
        if gamma < 0.0 || beta + gamma > 1.0 {
            return None;
        }

        let t = self.edge2.dot(qvec) * inv_det;
        if !range.contains(t) {
            return None;
        }

        let point = ray.at(t);
        let normal = self.interpolated_normal(beta, gamma);
        Some(HitRecord::with_face_normal(point, ray, normal, t, beta, gamma, self.material.clone()))
    }

    fn bounding_box(&self) -> Aabb {
        let (p0, p1, p2) = self.vertices();
        let min = Point3::new(p0.x.min(p1.x).min(p2.x), p0.y.min(p1.y).min(p2.y), p0.z.min(p1.z).min(p2.z));
        let max = Point3::new(p0.x.max(p1.x).max(p2.x), p0.y.max(p1.y).max(p2.y), p0.z.max(p1.z).max(p2.z));
        Aabb::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn flat_triangle() -> Triangle {
        Triangle::flat(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        )
        .unwrap()
    }

    #[test]
    fn rejects_collinear_vertices() {
        let err = Triangle::flat(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        );
        assert!(matches!(err, Err(RendererError::DegenerateGeometry(_))));
    }

    #[test]
    fn ray_through_centroid_hits() {
        let tri = flat_triangle();
        let ray = Ray::new(Point3::new(0.0, -0.3, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = tri.hit(&ray, Range::new(0.001, f64::INFINITY));
        assert!(hit.is_some());
    }

    #[test]
    fn ray_outside_the_edges_misses() {
        let tri = flat_triangle();
        let ray = Ray::new(Point3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.hit(&ray, Range::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn smooth_shading_interpolates_between_vertex_normals() {
        let tri = Triangle::smooth(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 1.0).normalized(),
            Vec3::new(1.0, 0.0, 1.0).normalized(),
            Vec3::new(0.0, 0.0, 1.0).normalized(),
            Arc::new(Lambertian::new(crate::math::Color::ones())),
        )
        .unwrap();
        let ray = Ray::new(Point3::new(0.0, 1.0 - 1e-6, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = tri.hit(&ray, Range::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-3);
    }
}
