//! Axis-aligned bounding boxes — the bounding volume used throughout the BVH.

use crate::error::{RendererError, Result};
use crate::math::{Matrix4, Point3, Range, Ray};

/// The minimum axis length an `Aabb` will report. Any axis narrower than
/// this (a flat quad lying exactly in a coordinate plane, for instance) is
/// padded symmetrically around its center so slab intersection never
/// degenerates to a zero-width interval.
const MIN_AXIS_PADDING: f64 = 5e-4;

/// An axis-aligned bounding box, stored as three per-axis `Range`s.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub x: Range,
    pub y: Range,
    pub z: Range,
}

impl Aabb {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self {
            x: Self::padded(Range::new(min.x, max.x)),
            y: Self::padded(Range::new(min.y, max.y)),
            z: Self::padded(Range::new(min.z, max.z)),
        }
    }

    pub fn from_ranges(x: Range, y: Range, z: Range) -> Self {
        Self { x: Self::padded(x), y: Self::padded(y), z: Self::padded(z) }
    }

    fn padded(r: Range) -> Range {
        if r.length() < MIN_AXIS_PADDING {
            r.expand(MIN_AXIS_PADDING)
        } else {
            r
        }
    }

    pub fn empty() -> Self {
        Self { x: Range::EMPTY, y: Range::EMPTY, z: Range::EMPTY }
    }

    #[inline]
    pub fn axis(&self, i: usize) -> Result<Range> {
        match i {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(RendererError::OutOfRange(format!("Aabb axis index out of bounds: {i}"))),
        }
    }

    #[inline]
    fn axis_unchecked(&self, i: usize) -> Range {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min(&self) -> Point3 {
        Point3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Point3 {
        Point3::new(self.x.max, self.y.max, self.z.max)
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Component-wise union of two boxes.
    pub fn merge(a: &Aabb, b: &Aabb) -> Aabb {
        Aabb::from_ranges(Range::union(a.x, b.x), Range::union(a.y, b.y), Range::union(a.z, b.z))
    }

    /// Index of the axis (0=x, 1=y, 2=z) with the greatest extent, used to
    /// pick the BVH split dimension.
    pub fn longest_axis(&self) -> usize {
        let (dx, dy, dz) = (self.x.length(), self.y.length(), self.z.length());
        if dx > dy && dx > dz {
            0
        } else if dy > dz {
            1
        } else {
            2
        }
    }

    /// Slab-method ray/box intersection test against `range`. The
    /// branchless min/max formulation handles axis-aligned rays (where
    /// `inv_d` is infinite) correctly without a special case.
    pub fn hit(&self, ray: &Ray, range: Range) -> bool {
        let mut t_min = range.min;
        let mut t_max = range.max;
        for axis in 0..3 {
            let a = self.axis_unchecked(axis);
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (a.min - ray.origin[axis]) * inv_d;
            let mut t1 = (a.max - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }

    /// The AABB of the eight transformed corners — used to re-bound a child
    /// hittable wrapped in an affine `Transform`.
    pub fn transformed_by(&self, m: &Matrix4) -> Aabb {
        let (min, max) = (self.min(), self.max());
        let mut result = Aabb::empty_unpadded();
        for i in 0..8 {
            let corner = Point3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            let transformed = m.transform_point(corner);
            result = result.grow_to_include(transformed);
        }
        result
    }

    fn empty_unpadded() -> Aabb {
        Aabb { x: Range::EMPTY, y: Range::EMPTY, z: Range::EMPTY }
    }

    fn grow_to_include(&self, p: Point3) -> Aabb {
        Aabb::from_ranges(
            Range::union(self.x, Range::new(p.x, p.x)),
            Range::union(self.y, Range::new(p.y, p.y)),
            Range::union(self.z, Range::new(p.z, p.z)),
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn degenerate_axis_is_padded() {
        let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0));
        assert!(b.y.length() >= MIN_AXIS_PADDING);
    }

    #[test]
    fn merge_contains_both_inputs() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(0.5, 0.5, 0.5));
        let m = Aabb::merge(&a, &b);
        assert_eq!(m.min(), Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(m.max(), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn miss_implies_contained_primitive_would_also_miss() {
        let outer = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(10.0, 10.0, 10.0), Vec3::unit_x());
        assert!(!outer.hit(&ray, Range::new(0.001, f64::INFINITY)));
    }

    #[test]
    fn axis_out_of_range_is_a_typed_error() {
        let b = Aabb::new(Point3::zero(), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(b.axis(0).unwrap(), b.x);
        assert!(matches!(b.axis(3), Err(RendererError::OutOfRange(_))));
    }

    #[test]
    fn transformed_by_translation_shifts_corners() {
        let b = Aabb::new(Point3::zero(), Point3::new(1.0, 1.0, 1.0));
        let m = Matrix4::translation(Vec3::new(2.0, 0.0, 0.0));
        let t = b.transformed_by(&m);
        assert!((t.min().x - 2.0).abs() < 1e-9);
        assert!((t.max().x - 3.0).abs() < 1e-9);
    }
}
