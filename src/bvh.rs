//! A bounding volume hierarchy over a flat list of hittables, built once at
//! scene-construction time and never mutated afterwards.

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::math::{Range, Ray};
use std::sync::Arc;

enum Node {
    Leaf(Arc<dyn Hittable>),
    Interior { left: Box<Bvh>, right: Box<Bvh>, bbox: Aabb },
}

/// A binary BVH node. Construction picks the longest axis of the current
/// object list's bounding box and splits at the median, recursing until one
/// or two objects remain.
pub struct Bvh {
    node: Node,
}

impl Bvh {
    pub fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Arc<dyn Hittable> {
        match objects.len() {
            0 => Arc::new(crate::hittable::HittableCollection::new()),
            1 => {
                let only = objects.pop().unwrap();
                Arc::new(Bvh { node: Node::Leaf(only) })
            }
            _ => Arc::new(Self::build_node(objects)),
        }
    }

    fn build_node(mut objects: Vec<Arc<dyn Hittable>>) -> Bvh {
        if objects.len() == 1 {
            return Bvh { node: Node::Leaf(objects.pop().unwrap()) };
        }
        if objects.len() == 2 {
            let bbox = Aabb::merge(&objects[0].bounding_box(), &objects[1].bounding_box());
            let left = Box::new(Bvh { node: Node::Leaf(objects[0].clone()) });
            let right = Box::new(Bvh { node: Node::Leaf(objects[1].clone()) });
            return Bvh { node: Node::Interior { left, right, bbox } };
        }

        let bounds = objects
            .iter()
            .map(|o| o.bounding_box())
            .fold(Aabb::empty(), |acc, b| Aabb::merge(&acc, &b));
        let axis = bounds.longest_axis();

        objects.sort_by(|a, b| {
            let ca = a.bounding_box().center();
            let cb = b.bounding_box().center();
            let (va, vb) = match axis {
                0 => (ca.x, cb.x),
                1 => (ca.y, cb.y),
                _ => (ca.z, cb.z),
            };
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = objects.len() / 2;
        let right_half = objects.split_off(mid);
        let left = Box::new(Self::build_node(objects));
        let right = Box::new(Self::build_node(right_half));
        let bbox = Aabb::merge(&left.bounding_box(), &right.bounding_box());
        Bvh { node: Node::Interior { left, right, bbox } }
    }
}

impl Hittable for Bvh {
    fn hit(&self, ray: &Ray, range: Range) -> Option<HitRecord> {
        match &self.node {
            Node::Leaf(object) => object.hit(ray, range),
            Node::Interior { left, right, bbox } => {
                if !bbox.hit(ray, range) {
                    return None;
                }
                let left_hit = left.hit(ray, range);
                let narrowed = Range::new(range.min, left_hit.as_ref().map_or(range.max, |h| h.t));
                let right_hit = right.hit(ray, narrowed);
                right_hit.or(left_hit)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match &self.node {
            Node::Leaf(object) => object.bounding_box(),
            Node::Interior { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::math::{Color, Point3, Vec3};

    fn sphere_at(x: f64) -> Arc<dyn Hittable> {
        Arc::new(crate::hittable::Sphere::stationary(
            Point3::new(x, 0.0, 0.0),
            1.0,
            Arc::new(Lambertian::new(Color::ones())),
        ))
    }

    #[test]
    fn single_object_tree_hits_like_the_bare_object() {
        let bvh = Bvh::build(vec![sphere_at(0.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(bvh.hit(&ray, Range::new(0.001, f64::INFINITY)).is_some());
    }

    #[test]
    fn finds_the_nearest_of_many_spheres() {
        let spheres: Vec<_> = (0..20).map(|i| sphere_at(i as f64 * 3.0)).collect();
        let bvh = Bvh::build(spheres);
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::unit_x());
        let hit = bvh.hit(&ray, Range::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.point.x - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn ray_missing_everything_reports_none() {
        let spheres: Vec<_> = (0..10).map(|i| sphere_at(i as f64 * 3.0)).collect();
        let bvh = Bvh::build(spheres);
        let ray = Ray::new(Point3::new(0.0, 100.0, 0.0), Vec3::unit_x());
        assert!(bvh.hit(&ray, Range::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn bounding_box_contains_every_leaf() {
        let spheres: Vec<_> = (0..5).map(|i| sphere_at(i as f64 * 3.0)).collect();
        let bvh = Bvh::build(spheres);
        let bbox = bvh.bounding_box();
        assert!(bbox.min().x <= -1.5);
        assert!(bbox.max().x >= 12.5);
    }
}
