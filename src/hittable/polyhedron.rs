use super::{HitRecord, Hittable, Triangle};
use crate::aabb::Aabb;
use crate::math::{Point3, Range, Ray, Vec3};

/// A closed mesh: a flat list of triangles plus the precomputed union of
/// their bounding boxes. Intersection is a linear scan keeping the closest
/// hit — meshes are expected to sit behind a `Bvh` node for anything larger
/// than a handful of faces.
pub struct Polyhedron {
    triangles: Vec<Triangle>,
    bbox: Aabb,
}

impl Polyhedron {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bbox = triangles
            .iter()
            .map(Hittable::bounding_box)
            .fold(Aabb::empty(), |acc, b| Aabb::merge(&acc, &b));
        Self { triangles, bbox }
    }
}

impl Hittable for Polyhedron {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        let mut closest = range;
        let mut best: Option<HitRecord> = None;
        for triangle in &self.triangles {
            if let Some(hit) = triangle.hit(ray, closest) {
                closest = Range::new(closest.min, hit.t);
                best = Some(hit);
            }
        }
        best
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use std::sync::Arc;

    fn unit_tetrahedron() -> Polyhedron {
        let mat = Arc::new(Lambertian::new(crate::math::Color::ones()));
        let a = Point3::new(0.0, 1.0, 0.0);
        let b = Point3::new(-1.0, -1.0, 1.0);
        let c = Point3::new(1.0, -1.0, 1.0);
        let d = Point3::new(0.0, -1.0, -1.0);
        Polyhedron::new(vec![
            Triangle::flat(a, b, c, mat.clone()).unwrap(),
            Triangle::flat(a, c, d, mat.clone()).unwrap(),
            Triangle::flat(a, d, b, mat.clone()).unwrap(),
            Triangle::flat(b, d, c, mat).unwrap(),
        ])
    }

    #[test]
    fn bounding_box_covers_all_faces() {
        let poly = unit_tetrahedron();
        let bbox = poly.bounding_box();
        assert!(bbox.min().y <= -1.0);
        assert!(bbox.max().y >= 1.0);
    }

    #[test]
    fn keeps_the_nearest_of_multiple_hit_faces() {
        let poly = unit_tetrahedron();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = poly.hit(&ray, Range::new(0.001, f64::INFINITY));
        assert!(hit.is_some());
        let t_first = hit.unwrap().t;
        assert!(poly.hit(&ray, Range::new(t_first + 1e-6, f64::INFINITY)).is_none());
    }
}
